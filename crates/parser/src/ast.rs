//! # Go declaration-level syntax tree
//!
//! Models the top level of a Go file: the package clause, imports,
//! `const`/`var`/`type` groups and function/method declarations, plus the
//! complete type-expression grammar. Function bodies and initializer
//! expressions are kept as spans only.
//!
//! ## Architecture
//!
//! - **Nodes**: allocated in typed arenas (`SpannedArena<T>`) addressed by `Id<T>`
//! - **Lists**: centralized buffers in `ExtraData`, addressed by `ListRef<T>`
//! - **Spans**: stored in side tables next to each arena
//! - **Symbols**: identifiers and literal text are interned once per file

use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher, RandomState};

pub use crate::error::Span;

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Type-safe identifier for arena-allocated nodes.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Id<T> {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }
}

/// Typed reference into a centralized list buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    const fn range(&self) -> core::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

// =============================================================================
// Symbol Interning
// =============================================================================

/// Interned string symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

/// Identifier occurrence (interned symbol + source position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentName {
    pub sym: Symbol,
    pub pos: Span,
}

/// Identity hasher for the pre-computed `u64` bucket keys.
#[derive(Default)]
struct U64IdentityHasher(u64);

impl Hasher for U64IdentityHasher {
    fn write(&mut self, _b: &[u8]) {
        unreachable!("U64IdentityHasher only supports write_u64")
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

type U64IdentityBuild = BuildHasherDefault<U64IdentityHasher>;

/// String interner: every distinct identifier or literal is stored once.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[Symbol; 1]>, U64IdentityBuild>,
    state: RandomState,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        let h = self.state.hash_one(s);
        let entry = self.buckets.entry(h).or_default();

        for &sym in entry.iter() {
            if self.strings[sym.0 as usize].as_ref() == s {
                return sym;
            }
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.into());
        entry.push(sym);
        sym
    }

    /// # Panics
    /// Panics if `sym` was produced by a different interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.strings
            .get(sym.0 as usize)
            .expect("symbol from a foreign interner")
            .as_ref()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

/// Arena for nodes with associated spans (parallel vectors).
#[derive(Debug)]
pub struct SpannedArena<T> {
    data: Vec<T>,
    spans: Vec<Span>,
}

impl<T> Default for SpannedArena<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<T> SpannedArena<T> {
    #[inline]
    pub fn alloc(&mut self, node: T, span: Span) -> Id<T> {
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }

    #[inline]
    pub fn span(&self, id: Id<T>) -> Span {
        self.spans[id.to_usize()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Index<Id<T>> for SpannedArena<T> {
    type Output = T;
    fn index(&self, id: Id<T>) -> &T {
        self.get(id)
    }
}

impl<T> IndexMut<Id<T>> for SpannedArena<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.data[id.to_usize()]
    }
}

pub type DeclId = Id<Decl>;
pub type TypeId = Id<Type>;
pub type FieldId = Id<Field>;
pub type ExprId = Id<Expr>;
pub type SignatureId = Id<Signature>;

/// Centralized list buffers that `ListRef<T>` points into.
#[derive(Debug, Default)]
pub struct ExtraData {
    pub ident_names: Vec<IdentName>,
    pub decls: Vec<DeclId>,
    pub specs: Vec<Spec>,
    pub types: Vec<TypeId>,
    pub fields: Vec<FieldId>,
    pub type_terms: Vec<TypeTerm>,
}

/// Central arena holding all nodes, list buffers and the interner of one file.
#[derive(Debug, Default)]
pub struct AstArena {
    pub decls: SpannedArena<Decl>,
    pub types: SpannedArena<Type>,
    pub fields: SpannedArena<Field>,
    pub exprs: SpannedArena<Expr>,
    pub signatures: SpannedArena<Signature>,
    pub extras: ExtraData,
    pub interner: Interner,
}

macro_rules! list_accessors {
    ($($build:ident / $get:ident: $t:ty => $buf:ident),* $(,)?) => {
        impl AstArena {
            $(
                pub fn $build(&mut self, items: impl IntoIterator<Item = $t>) -> ListRef<$t> {
                    let buf = &mut self.extras.$buf;
                    let start = buf.len();
                    buf.extend(items);
                    ListRef::new(start as u32, (buf.len() - start) as u32)
                }

                pub fn $get(&self, r: ListRef<$t>) -> &[$t] {
                    &self.extras.$buf[r.range()]
                }
            )*
        }
    };
}

list_accessors! {
    list_ident_names / ident_names: IdentName => ident_names,
    list_decls / decls_list: DeclId => decls,
    list_specs / specs_list: Spec => specs,
    list_types / types_list: TypeId => types,
    list_fields / fields_list: FieldId => fields,
    list_type_terms / type_terms_list: TypeTerm => type_terms,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.interner.intern(s)
    }

    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    #[inline]
    pub fn name(&self, ident: IdentName) -> &str {
        self.interner.resolve(ident.sym)
    }
}

// =============================================================================
// File
// =============================================================================

/// One parsed Go file. Owns its arena; read-only once built.
#[derive(Debug)]
pub struct SourceFile {
    /// Package name from the `package` clause
    pub package: IdentName,
    /// All top-level declarations in source order (imports included)
    pub decls: ListRef<DeclId>,
    pub arena: AstArena,
}

impl SourceFile {
    pub fn package_name(&self) -> &str {
        self.arena.name(self.package)
    }

    pub fn decls(&self) -> &[DeclId] {
        self.arena.decls_list(self.decls)
    }
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decl {
    /// `import`, `const`, `type` or `var`, single or parenthesized group
    Gen(GenDecl),
    /// Function or method
    Func(FuncDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenDecl {
    pub kind: GenDeclKind,
    pub specs: ListRef<Spec>,
    /// True for the `kw ( ... )` form
    pub grouped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `ImportSpec = [ "." | PackageName ] ImportPath`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSpec {
    /// Alias, `_`, or `.`
    pub name: Option<IdentName>,
    pub path: StringLit,
}

/// `ValueSpec = IdentifierList [ Type ] [ "=" ExpressionList ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: ListRef<IdentName>,
    pub typ: Option<TypeId>,
    /// Span of the initializer list, if any
    pub values: Option<Span>,
}

/// `TypeSpec = AliasDecl | TypeDef`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: IdentName,
    /// Type parameters (`[K comparable, V any]`), empty when absent
    pub type_params: ListRef<FieldId>,
    /// True for `type A = B`
    pub alias: bool,
    pub typ: TypeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncDecl {
    /// Receiver (present only for methods)
    pub recv: Option<FieldId>,
    pub name: IdentName,
    pub type_params: ListRef<FieldId>,
    pub signature: SignatureId,
    /// Span of `{ ... }`; absent for external (assembly) functions
    pub body: Option<Span>,
}

// =============================================================================
// Signatures and Fields
// =============================================================================

/// `Signature = Parameters [ Result ]`
///
/// A bare result type is stored as a single unnamed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: ListRef<FieldId>,
    pub results: ListRef<FieldId>,
}

/// Parameter group, struct field, interface element or type parameter.
///
/// `names` is empty for unnamed parameters, embedded fields and embedded
/// interface elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub names: ListRef<IdentName>,
    pub typ: TypeId,
    /// Struct tag (struct fields only)
    pub tag: Option<StringLit>,
}

// =============================================================================
// Literals and expressions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// `` `...` ``
    Raw,
    /// `"..."`
    Interpreted,
}

/// String literal; `value` is the token text including its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLit {
    pub kind: StringKind,
    pub value: Symbol,
    pub pos: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicLitKind {
    Int,
    Float,
    Imag,
    Rune,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: BasicLitKind,
    pub value: Symbol,
}

/// Expressions that can appear inside a type (array lengths).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    Ident(IdentName),
    /// `pkg.Name`
    Selector { pkg: IdentName, sel: IdentName },
    BasicLit(BasicLit),
    /// Any other constant expression (`N*2`, `len(x)`); kept as a span
    Other,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// `Name`
    Name(IdentName),
    /// `pkg.Name`
    Qualified { pkg: IdentName, name: IdentName },
    /// `Base[A, B]`
    Instance { base: TypeId, args: ListRef<TypeId> },
    /// `*T`
    Pointer(TypeId),
    /// `[N]T` or `[...]T`
    Array { len: ArrayLen, elem: TypeId },
    /// `[]T`
    Slice(TypeId),
    /// `map[K]V`
    Map { key: TypeId, value: TypeId },
    /// `chan T`, `<-chan T`, `chan<- T`
    Chan { dir: ChanDir, elem: TypeId },
    /// `func(...) ...`
    Func(SignatureId),
    /// `struct { ... }`
    Struct { fields: ListRef<FieldId> },
    /// `interface { ... }`; methods carry a name, embedded elements do not
    Interface { elems: ListRef<FieldId> },
    /// `...T`, final parameter only
    Ellipsis(TypeId),
    /// `(T)`
    Paren(TypeId),
    /// Constraint union `~int | string`; also a lone `~T`
    Union(ListRef<TypeTerm>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLen {
    Expr(ExprId),
    /// `[...]T` (composite literals only)
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// One term of a constraint union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTerm {
    pub tilde: bool,
    pub typ: TypeId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interner_dedups() {
        let mut i = Interner::new();
        let a = i.intern("Foo");
        let b = i.intern("Bar");
        assert_ne!(a, b);
        assert_eq!(i.intern("Foo"), a);
        assert_eq!(i.resolve(b), "Bar");
        assert_eq!(i.len(), 2);
    }

    #[test]
    fn lists_are_contiguous_slices() {
        let mut a = AstArena::new();
        let x = a.intern("x");
        let first = a.list_ident_names([IdentName {
            sym: x,
            pos: Span::new(0, 1),
        }]);
        let second = a.list_ident_names([]);
        assert_eq!(a.ident_names(first).len(), 1);
        assert!(second.is_empty());
        assert!(a.ident_names(second).is_empty());
    }
}
