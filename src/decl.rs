//! Classification of a file's top-level declarations.

use std::slice;

use goinspect_parser::ast::{
    AstArena, Decl, DeclId, FieldId, GenDeclKind, ListRef, Spec, SourceFile, Type, TypeSpec,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Var,
    Const,
}

/// Shape of a declared type, as far as field listing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underlying {
    Struct(ListRef<FieldId>),
    Interface(ListRef<FieldId>),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration<'a> {
    /// Function or method; methods go by their bare name.
    Function { name: &'a str, has_receiver: bool },
    /// One `var`/`const` declaration, single or grouped. Never empty.
    Value { kind: ValueKind, names: Vec<&'a str> },
    /// One type spec; aliases included.
    Type { name: &'a str, underlying: Underlying },
}

impl<'a> Declaration<'a> {
    /// Declared names in source order.
    pub fn names(&self) -> &[&'a str] {
        match self {
            Declaration::Function { name, .. } | Declaration::Type { name, .. } => {
                slice::from_ref(name)
            }
            Declaration::Value { names, .. } => names,
        }
    }
}

/// Iterate `file`'s declarations in source order. Imports are skipped.
pub fn declarations(file: &SourceFile) -> Declarations<'_> {
    Declarations {
        arena: &file.arena,
        decls: file.decls().iter(),
        type_specs: (&[] as &[Spec]).iter(),
    }
}

pub struct Declarations<'a> {
    arena: &'a AstArena,
    decls: slice::Iter<'a, DeclId>,
    /// Remaining specs of the current `type ( ... )` group.
    type_specs: slice::Iter<'a, Spec>,
}

impl<'a> Iterator for Declarations<'a> {
    type Item = Declaration<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        loop {
            if let Some(spec) = self.type_specs.next() {
                if let Spec::Type(ts) = spec {
                    return Some(type_declaration(arena, ts));
                }
                continue;
            }

            let id = *self.decls.next()?;
            let group = match arena.decls[id] {
                Decl::Func(func) => {
                    return Some(Declaration::Function {
                        name: arena.name(func.name),
                        has_receiver: func.recv.is_some(),
                    })
                }
                Decl::Gen(group) => group,
            };

            let kind = match group.kind {
                GenDeclKind::Import => continue,
                GenDeclKind::Type => {
                    self.type_specs = arena.specs_list(group.specs).iter();
                    continue;
                }
                GenDeclKind::Var => ValueKind::Var,
                GenDeclKind::Const => ValueKind::Const,
            };

            let names: Vec<&'a str> = arena
                .specs_list(group.specs)
                .iter()
                .filter_map(|spec| match spec {
                    Spec::Value(v) => Some(arena.ident_names(v.names)),
                    _ => None,
                })
                .flatten()
                .map(|&name| arena.name(name))
                .collect();
            if names.is_empty() {
                continue;
            }
            return Some(Declaration::Value { kind, names });
        }
    }
}

fn type_declaration<'a>(arena: &'a AstArena, spec: &TypeSpec) -> Declaration<'a> {
    let underlying = match arena.types[spec.typ] {
        Type::Struct { fields } => Underlying::Struct(fields),
        Type::Interface { elems } => Underlying::Interface(elems),
        _ => Underlying::Other,
    };
    Declaration::Type {
        name: arena.name(spec.name),
        underlying,
    }
}
