//! Recursive-descent parser for Go's top-level declaration syntax.
//!
//! Declarations and every type expression are parsed fully. Function bodies
//! and initializer expressions are only checked for balanced delimiters and
//! recorded as spans.

use crate::ast::{
    self, ArrayLen, AstArena, BasicLit, BasicLitKind, ChanDir, Decl, Expr, Field, FieldId,
    FuncDecl, GenDecl, GenDeclKind, IdentName, ImportSpec, ListRef, Signature, SourceFile, Span,
    Spec, StringKind, StringLit, Type, TypeId, TypeSpec, TypeTerm, ValueSpec,
};
use crate::error::SyntaxError;
use crate::lexer::{Spanned, Tok};
use crate::parser_support::{named_type_from_ident, resolve_param_list, ParamDecl};

type PResult<T> = Result<T, SyntaxError>;

pub struct Parser<'src> {
    toks: Vec<Spanned<'src>>,
    pos: usize,
    last_end: usize,
    src_len: usize,
    arena: AstArena,
}

/// Tokens that can begin a type expression.
fn starts_type(tok: Tok<'_>) -> bool {
    matches!(
        tok,
        Tok::Ident(_)
            | Tok::Star
            | Tok::LBrack
            | Tok::LParen
            | Tok::Arrow
            | Tok::KwFunc
            | Tok::KwMap
            | Tok::KwChan
            | Tok::KwStruct
            | Tok::KwInterface
    )
}

fn is_string(tok: Tok<'_>) -> bool {
    matches!(tok, Tok::StringLit(_) | Tok::RawStringLit(_))
}

impl<'src> Parser<'src> {
    pub fn new(toks: Vec<Spanned<'src>>, src_len: usize) -> Self {
        Self {
            toks,
            pos: 0,
            last_end: 0,
            src_len,
            arena: AstArena::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Token cursor
    // -------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<Tok<'src>> {
        self.peek_at(0)
    }

    #[inline]
    fn peek_at(&self, n: usize) -> Option<Tok<'src>> {
        self.toks.get(self.pos + n).map(|t| t.1)
    }

    #[inline]
    fn at(&self, tok: Tok<'_>) -> bool {
        self.peek() == Some(tok)
    }

    fn span_here(&self) -> Span {
        match self.toks.get(self.pos) {
            Some(&(s, _, e)) => Span::new(s, e),
            None => Span::empty_at(self.src_len),
        }
    }

    fn bump(&mut self) -> Option<Spanned<'src>> {
        let tok = self.toks.get(self.pos).copied();
        if let Some((_, _, end)) = tok {
            self.pos += 1;
            self.last_end = end;
        }
        tok
    }

    fn eat(&mut self, tok: Tok<'_>) -> bool {
        if self.at(tok) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn since(&self, start: Span) -> Span {
        Span::new(start.start as usize, self.last_end.max(start.start as usize))
    }

    fn unexpected(&self, what: &str) -> SyntaxError {
        let found = match self.peek() {
            Some(Tok::Semi) if self.span_here().is_empty() => "newline".to_string(),
            Some(tok) => tok.to_string(),
            None => "EOF".to_string(),
        };
        SyntaxError::new(self.span_here(), format!("expected {what}, found {found}"))
    }

    fn expect(&mut self, tok: Tok<'_>, what: &str) -> PResult<Span> {
        if self.at(tok) {
            let here = self.span_here();
            self.bump();
            Ok(here)
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_ident(&mut self) -> PResult<IdentName> {
        match self.peek() {
            Some(Tok::Ident(name)) => {
                let pos = self.span_here();
                self.bump();
                let sym = self.arena.intern(name);
                Ok(IdentName { sym, pos })
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn expect_string(&mut self) -> PResult<StringLit> {
        let pos = self.span_here();
        let (kind, text) = match self.peek() {
            Some(Tok::StringLit(s)) => (StringKind::Interpreted, s),
            Some(Tok::RawStringLit(s)) => (StringKind::Raw, s),
            _ => return Err(self.unexpected("string literal")),
        };
        self.bump();
        let value = self.arena.intern(text);
        Ok(StringLit { kind, value, pos })
    }

    /// `;` or end of input.
    fn expect_semi(&mut self, after: &str) -> PResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(Tok::Semi) => {
                self.bump();
                Ok(())
            }
            _ => Err(self.unexpected(&format!("';' after {after}"))),
        }
    }

    /// Index of the token closing the bracket opened at `open_idx`.
    fn matching_close(&self, open_idx: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, (_, tok, _)) in self.toks.iter().enumerate().skip(open_idx) {
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// With `ident [` at `pos`, `pos + 1`: does the bracket open an array or
    /// slice type (so the identifier is a field/parameter name) rather than
    /// type arguments of a generic instance?
    fn bracket_starts_named_type(&self) -> bool {
        match self.peek_at(2) {
            Some(Tok::RBrack | Tok::Ellipsis) => true,
            _ => match self.matching_close(self.pos + 1) {
                Some(close) => self.toks.get(close + 1).is_some_and(|t| starts_type(t.1)),
                None => false,
            },
        }
    }

    /// With `Name [` ahead in a type spec: type parameters or array length?
    fn looks_like_type_params(&self) -> bool {
        match (self.peek_at(1), self.peek_at(2)) {
            (Some(Tok::Ident(_)), Some(next)) => match next {
                Tok::Ident(_)
                | Tok::Comma
                | Tok::Tilde
                | Tok::Arrow
                | Tok::KwInterface
                | Tok::KwFunc
                | Tok::KwMap
                | Tok::KwChan
                | Tok::KwStruct => true,
                Tok::LBrack => self.peek_at(3) == Some(Tok::RBrack),
                _ => false,
            },
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // File and declarations
    // -------------------------------------------------------------------------

    pub fn parse_file(mut self) -> PResult<SourceFile> {
        while self.eat(Tok::Semi) {}
        self.expect(Tok::KwPackage, "'package'")?;
        let package = self.expect_ident()?;
        self.expect_semi("package clause")?;

        let mut decls = Vec::new();
        loop {
            while self.eat(Tok::Semi) {}
            let decl = match self.peek() {
                None => break,
                Some(Tok::KwImport | Tok::KwConst | Tok::KwVar | Tok::KwType) => {
                    self.parse_gen_decl()?
                }
                Some(Tok::KwFunc) => self.parse_func_decl()?,
                Some(_) => return Err(self.unexpected("declaration")),
            };
            decls.push(decl);
            self.expect_semi("top level declaration")?;
        }

        let decls = self.arena.list_decls(decls);
        Ok(SourceFile {
            package,
            decls,
            arena: self.arena,
        })
    }

    fn parse_gen_decl(&mut self) -> PResult<ast::DeclId> {
        let start = self.span_here();
        let kind = match self.bump().map(|t| t.1) {
            Some(Tok::KwImport) => GenDeclKind::Import,
            Some(Tok::KwConst) => GenDeclKind::Const,
            Some(Tok::KwVar) => GenDeclKind::Var,
            _ => GenDeclKind::Type,
        };

        let mut specs = Vec::new();
        let grouped = self.eat(Tok::LParen);
        if grouped {
            loop {
                if self.eat(Tok::RParen) {
                    break;
                }
                if self.peek().is_none() {
                    return Err(self.unexpected("')'"));
                }
                specs.push(self.parse_spec(kind, true)?);
                if !self.eat(Tok::Semi) && !self.at(Tok::RParen) {
                    return Err(self.unexpected("';' or ')'"));
                }
            }
        } else {
            specs.push(self.parse_spec(kind, false)?);
        }

        let specs = self.arena.list_specs(specs);
        let span = self.since(start);
        Ok(self
            .arena
            .decls
            .alloc(Decl::Gen(GenDecl { kind, specs, grouped }), span))
    }

    fn parse_spec(&mut self, kind: GenDeclKind, grouped: bool) -> PResult<Spec> {
        match kind {
            GenDeclKind::Import => {
                let name = match self.peek() {
                    Some(Tok::Dot) => {
                        let pos = self.span_here();
                        self.bump();
                        let sym = self.arena.intern(".");
                        Some(IdentName { sym, pos })
                    }
                    Some(Tok::Ident(_)) => Some(self.expect_ident()?),
                    _ => None,
                };
                let path = self.expect_string()?;
                Ok(Spec::Import(ImportSpec { name, path }))
            }
            GenDeclKind::Const | GenDeclKind::Var => {
                let names = self.parse_ident_list()?;
                let typ = match self.peek() {
                    Some(tok) if starts_type(tok) => Some(self.parse_type()?),
                    _ => None,
                };
                let values = if self.eat(Tok::Assign) {
                    Some(self.skip_expr_list()?)
                } else {
                    None
                };
                if values.is_none() {
                    match kind {
                        // Inside a const group a bare name list repeats the previous spec.
                        GenDeclKind::Const if grouped && typ.is_none() => {}
                        GenDeclKind::Const => {
                            return Err(self.unexpected("'=' in constant declaration"))
                        }
                        _ if typ.is_none() => {
                            return Err(self.unexpected("type or '=' in variable declaration"))
                        }
                        _ => {}
                    }
                }
                Ok(Spec::Value(ValueSpec { names, typ, values }))
            }
            GenDeclKind::Type => {
                let name = self.expect_ident()?;
                let type_params = if self.at(Tok::LBrack) && self.looks_like_type_params() {
                    self.parse_type_params()?
                } else {
                    ListRef::EMPTY
                };
                let alias = self.eat(Tok::Assign);
                let typ = self.parse_type()?;
                Ok(Spec::Type(TypeSpec {
                    name,
                    type_params,
                    alias,
                    typ,
                }))
            }
        }
    }

    fn parse_ident_list(&mut self) -> PResult<ListRef<IdentName>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(Tok::Comma) {
            names.push(self.expect_ident()?);
        }
        Ok(self.arena.list_ident_names(names))
    }

    fn parse_func_decl(&mut self) -> PResult<ast::DeclId> {
        let start = self.expect(Tok::KwFunc, "'func'")?;

        let recv = if self.at(Tok::LParen) {
            let recv_span = self.span_here();
            match self.parse_parameters()?.as_slice() {
                [only] => Some(*only),
                [] => return Err(SyntaxError::new(recv_span, "method has no receiver")),
                _ => return Err(SyntaxError::new(recv_span, "method has multiple receivers")),
            }
        } else {
            None
        };

        let name = self.expect_ident()?;
        let type_params = if self.at(Tok::LBrack) {
            self.parse_type_params()?
        } else {
            ListRef::EMPTY
        };
        let signature = self.parse_signature()?;
        let body = if self.at(Tok::LBrace) {
            Some(self.skip_block()?)
        } else {
            None
        };

        let span = self.since(start);
        Ok(self.arena.decls.alloc(
            Decl::Func(FuncDecl {
                recv,
                name,
                type_params,
                signature,
                body,
            }),
            span,
        ))
    }

    // -------------------------------------------------------------------------
    // Skipped regions
    // -------------------------------------------------------------------------

    /// Balanced `{ ... }`; returns its span.
    fn skip_block(&mut self) -> PResult<Span> {
        let start = self.expect(Tok::LBrace, "'{'")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.bump() {
                Some((_, Tok::LBrace, _)) => depth += 1,
                Some((_, Tok::RBrace, _)) => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(SyntaxError::new(
                        start,
                        "unexpected EOF: unclosed '{' in function body",
                    ))
                }
            }
        }
        Ok(self.since(start))
    }

    /// Initializer expressions: everything up to `;` or the group's `)` at
    /// bracket depth zero.
    fn skip_expr_list(&mut self) -> PResult<Span> {
        let start = self.span_here();
        let mut depth = 0usize;
        let mut consumed = 0usize;

        while let Some(tok) = self.peek() {
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Tok::Semi if depth == 0 => break,
                _ => {}
            }
            self.bump();
            consumed += 1;
        }

        if depth > 0 {
            return Err(SyntaxError::new(start, "unexpected EOF in expression"));
        }
        if consumed == 0 {
            return Err(self.unexpected("expression"));
        }
        Ok(self.since(start))
    }

    // -------------------------------------------------------------------------
    // Signatures and parameter lists
    // -------------------------------------------------------------------------

    fn parse_signature(&mut self) -> PResult<ast::SignatureId> {
        let start = self.span_here();
        let params = self.parse_parameters()?;
        let results = match self.peek() {
            Some(Tok::LParen) => self.parse_parameters()?,
            Some(tok) if starts_type(tok) => {
                let result_start = self.span_here();
                let typ = self.parse_type()?;
                let span = self.since(result_start);
                let names = ListRef::EMPTY;
                vec![self.arena.fields.alloc(Field { names, typ, tag: None }, span)]
            }
            _ => Vec::new(),
        };

        let params = self.arena.list_fields(params);
        let results = self.arena.list_fields(results);
        let span = self.since(start);
        Ok(self.arena.signatures.alloc(Signature { params, results }, span))
    }

    fn parse_parameters(&mut self) -> PResult<Vec<FieldId>> {
        self.expect(Tok::LParen, "'('")?;
        let mut entries = Vec::new();
        while !self.eat(Tok::RParen) {
            entries.push(self.parse_param_decl()?);
            if !self.eat(Tok::Comma) {
                self.expect(Tok::RParen, "',' or ')' in parameter list")?;
                break;
            }
        }
        resolve_param_list(&mut self.arena, entries)
    }

    fn parse_param_decl(&mut self) -> PResult<ParamDecl> {
        let start = self.span_here();
        if let Some(Tok::Ident(_)) = self.peek() {
            let named = match self.peek_at(1) {
                None | Some(Tok::Comma | Tok::RParen) => {
                    let name = self.expect_ident()?;
                    return Ok(ParamDecl {
                        name: Some(name),
                        typ: None,
                        span: start,
                    });
                }
                Some(Tok::Dot) => false,
                Some(Tok::LBrack) => self.bracket_starts_named_type(),
                Some(Tok::Ellipsis) => true,
                Some(tok) => starts_type(tok),
            };
            if named {
                let name = self.expect_ident()?;
                let typ = self.parse_param_type()?;
                return Ok(ParamDecl {
                    name: Some(name),
                    typ: Some(typ),
                    span: self.since(start),
                });
            }
        }

        let typ = self.parse_param_type()?;
        Ok(ParamDecl {
            name: None,
            typ: Some(typ),
            span: self.since(start),
        })
    }

    fn parse_param_type(&mut self) -> PResult<TypeId> {
        let start = self.span_here();
        if self.eat(Tok::Ellipsis) {
            let elem = self.parse_type()?;
            let span = self.since(start);
            return Ok(self.arena.types.alloc(Type::Ellipsis(elem), span));
        }
        self.parse_type()
    }

    /// `[P any, K comparable, V interface{ ~int }]`
    fn parse_type_params(&mut self) -> PResult<ListRef<FieldId>> {
        self.expect(Tok::LBrack, "'['")?;
        let mut params = Vec::new();
        loop {
            if self.eat(Tok::RBrack) {
                break;
            }
            let start = self.span_here();
            let mut names = vec![self.expect_ident()?];
            while self.eat(Tok::Comma) {
                names.push(self.expect_ident()?);
            }
            let typ = self.parse_constraint()?;
            let names = self.arena.list_ident_names(names);
            let span = self.since(start);
            params.push(self.arena.fields.alloc(Field { names, typ, tag: None }, span));
            if !self.eat(Tok::Comma) {
                self.expect(Tok::RBrack, "',' or ']' in type parameter list")?;
                break;
            }
        }
        if params.is_empty() {
            return Err(SyntaxError::new(self.span_here(), "empty type parameter list"));
        }
        Ok(self.arena.list_fields(params))
    }

    /// `[~]T { | [~]T }`; a single plain term is returned as the type itself.
    fn parse_constraint(&mut self) -> PResult<TypeId> {
        let start = self.span_here();
        let mut terms = Vec::new();
        loop {
            let tilde = self.eat(Tok::Tilde);
            let typ = self.parse_type()?;
            terms.push(TypeTerm { tilde, typ });
            if !self.eat(Tok::Pipe) {
                break;
            }
        }
        if let [TypeTerm { tilde: false, typ }] = terms.as_slice() {
            return Ok(*typ);
        }
        let terms = self.arena.list_type_terms(terms);
        let span = self.since(start);
        Ok(self.arena.types.alloc(Type::Union(terms), span))
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    pub fn parse_type(&mut self) -> PResult<TypeId> {
        let start = self.span_here();
        let typ = match self.peek() {
            Some(Tok::Ident(_)) => return self.parse_type_name(),
            Some(Tok::Star) => {
                self.bump();
                Type::Pointer(self.parse_type()?)
            }
            Some(Tok::LBrack) => {
                self.bump();
                if self.eat(Tok::RBrack) {
                    Type::Slice(self.parse_type()?)
                } else if self.eat(Tok::Ellipsis) {
                    self.expect(Tok::RBrack, "']'")?;
                    let elem = self.parse_type()?;
                    Type::Array {
                        len: ArrayLen::Ellipsis,
                        elem,
                    }
                } else {
                    let len = self.parse_array_len()?;
                    self.expect(Tok::RBrack, "']'")?;
                    let elem = self.parse_type()?;
                    Type::Array {
                        len: ArrayLen::Expr(len),
                        elem,
                    }
                }
            }
            Some(Tok::KwMap) => {
                self.bump();
                self.expect(Tok::LBrack, "'[' after map")?;
                let key = self.parse_type()?;
                self.expect(Tok::RBrack, "']'")?;
                let value = self.parse_type()?;
                Type::Map { key, value }
            }
            Some(Tok::KwChan) => {
                self.bump();
                let dir = if self.eat(Tok::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Type::Chan { dir, elem }
            }
            Some(Tok::Arrow) => {
                self.bump();
                self.expect(Tok::KwChan, "'chan'")?;
                let elem = self.parse_type()?;
                Type::Chan {
                    dir: ChanDir::Recv,
                    elem,
                }
            }
            Some(Tok::KwFunc) => {
                self.bump();
                Type::Func(self.parse_signature()?)
            }
            Some(Tok::KwStruct) => {
                self.bump();
                Type::Struct {
                    fields: self.parse_struct_body()?,
                }
            }
            Some(Tok::KwInterface) => {
                self.bump();
                Type::Interface {
                    elems: self.parse_interface_body()?,
                }
            }
            Some(Tok::LParen) => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(Tok::RParen, "')'")?;
                Type::Paren(inner)
            }
            _ => return Err(self.unexpected("type")),
        };
        let span = self.since(start);
        Ok(self.arena.types.alloc(typ, span))
    }

    /// `Name`, `pkg.Name`, optionally followed by type arguments.
    fn parse_type_name(&mut self) -> PResult<TypeId> {
        let start = self.span_here();
        let first = self.expect_ident()?;
        let mut base = if self.eat(Tok::Dot) {
            let name = self.expect_ident()?;
            let span = self.since(start);
            self.arena
                .types
                .alloc(Type::Qualified { pkg: first, name }, span)
        } else {
            named_type_from_ident(&mut self.arena, first)
        };

        if self.eat(Tok::LBrack) {
            let mut args = Vec::new();
            loop {
                if self.eat(Tok::RBrack) {
                    break;
                }
                args.push(self.parse_type()?);
                if !self.eat(Tok::Comma) {
                    self.expect(Tok::RBrack, "',' or ']' in type arguments")?;
                    break;
                }
            }
            if args.is_empty() {
                return Err(SyntaxError::new(self.since(start), "empty type argument list"));
            }
            let args = self.arena.list_types(args);
            let span = self.since(start);
            base = self.arena.types.alloc(Type::Instance { base, args }, span);
        }
        Ok(base)
    }

    /// Array length between `[` and `]`; the closing bracket is left in place.
    fn parse_array_len(&mut self) -> PResult<ast::ExprId> {
        let close = self
            .matching_close(self.pos.saturating_sub(1))
            .ok_or_else(|| self.unexpected("']'"))?;
        let toks: Vec<Spanned<'src>> = self.toks[self.pos..close].to_vec();
        let Some(&(first_start, _, _)) = toks.first() else {
            return Err(self.unexpected("array length"));
        };
        let span = Span::new(first_start, toks[toks.len() - 1].2);

        let expr = match toks.as_slice() {
            [(s, Tok::Ident(name), e)] => Expr::Ident(IdentName {
                sym: self.arena.intern(name),
                pos: Span::new(*s, *e),
            }),
            [(ps, Tok::Ident(pkg), pe), (_, Tok::Dot, _), (ss, Tok::Ident(sel), se)] => {
                Expr::Selector {
                    pkg: IdentName {
                        sym: self.arena.intern(pkg),
                        pos: Span::new(*ps, *pe),
                    },
                    sel: IdentName {
                        sym: self.arena.intern(sel),
                        pos: Span::new(*ss, *se),
                    },
                }
            }
            [(_, tok, _)] => {
                let kind = match tok {
                    Tok::IntLit(_) => Some(BasicLitKind::Int),
                    Tok::FloatLit(_) => Some(BasicLitKind::Float),
                    Tok::ImagLit(_) => Some(BasicLitKind::Imag),
                    Tok::RuneLit(_) => Some(BasicLitKind::Rune),
                    Tok::StringLit(_) | Tok::RawStringLit(_) => Some(BasicLitKind::String),
                    _ => None,
                };
                match (kind, tok.text()) {
                    (Some(kind), Some(text)) => Expr::BasicLit(BasicLit {
                        kind,
                        value: self.arena.intern(text),
                    }),
                    _ => Expr::Other,
                }
            }
            _ => Expr::Other,
        };

        while self.pos < close {
            self.bump();
        }
        Ok(self.arena.exprs.alloc(expr, span))
    }

    fn parse_struct_body(&mut self) -> PResult<ListRef<FieldId>> {
        self.expect(Tok::LBrace, "'{' after struct")?;
        let mut fields = Vec::new();
        loop {
            if self.eat(Tok::RBrace) {
                break;
            }
            fields.push(self.parse_field_decl()?);
            if !self.eat(Tok::Semi) && !self.at(Tok::RBrace) {
                return Err(self.unexpected("';' or '}' in struct type"));
            }
        }
        Ok(self.arena.list_fields(fields))
    }

    /// `IdentifierList Type [Tag]` or `EmbeddedField [Tag]`.
    fn parse_field_decl(&mut self) -> PResult<FieldId> {
        let start = self.span_here();
        let embedded = match (self.peek(), self.peek_at(1)) {
            (Some(Tok::Star), _) => true,
            (Some(Tok::Ident(_)), None) => true,
            (Some(Tok::Ident(_)), Some(next)) => match next {
                Tok::Semi | Tok::RBrace | Tok::Dot => true,
                Tok::LBrack => !self.bracket_starts_named_type(),
                next => is_string(next),
            },
            _ => return Err(self.unexpected("field name or embedded type")),
        };

        let (names, typ) = if embedded {
            (ListRef::EMPTY, self.parse_type()?)
        } else {
            let names = self.parse_ident_list()?;
            (names, self.parse_type()?)
        };

        let tag = match self.peek() {
            Some(tok) if is_string(tok) => Some(self.expect_string()?),
            _ => None,
        };

        let span = self.since(start);
        Ok(self.arena.fields.alloc(Field { names, typ, tag }, span))
    }

    fn parse_interface_body(&mut self) -> PResult<ListRef<FieldId>> {
        self.expect(Tok::LBrace, "'{' after interface")?;
        let mut elems = Vec::new();
        loop {
            if self.eat(Tok::RBrace) {
                break;
            }
            let start = self.span_here();
            let field = match (self.peek(), self.peek_at(1)) {
                (Some(Tok::Ident(_)), Some(Tok::LParen)) => {
                    let name = self.expect_ident()?;
                    let sig = self.parse_signature()?;
                    let sig_span = self.arena.signatures.span(sig);
                    let typ = self.arena.types.alloc(Type::Func(sig), sig_span);
                    let names = self.arena.list_ident_names([name]);
                    Field {
                        names,
                        typ,
                        tag: None,
                    }
                }
                _ => Field {
                    names: ListRef::EMPTY,
                    typ: self.parse_constraint()?,
                    tag: None,
                },
            };
            let span = self.since(start);
            elems.push(self.arena.fields.alloc(field, span));
            if !self.eat(Tok::Semi) && !self.at(Tok::RBrace) {
                return Err(self.unexpected("';' or '}' in interface type"));
            }
        }
        Ok(self.arena.list_fields(elems))
    }
}
