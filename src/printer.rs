//! Canonical source text for type expressions.
//!
//! Rendering is a function of structure only: spacing and comments of the
//! original are not preserved, and nested struct or interface types collapse
//! to `struct{}` / `interface{}`.

use goinspect_parser::ast::{
    ArrayLen, AstArena, ChanDir, Expr, FieldId, IdentName, SignatureId, Span, Type, TypeId,
};
use thiserror::Error;

/// A node the printer has no canonical form for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type expression: {kind} at {}..{}", .span.start, .span.end)]
pub struct UnsupportedTypeExpression {
    pub kind: &'static str,
    pub span: Span,
}

type Result<T> = std::result::Result<T, UnsupportedTypeExpression>;

/// Render `typ`; an absent type renders as the empty string.
pub fn type_string(arena: &AstArena, typ: Option<TypeId>) -> Result<String> {
    let mut out = String::new();
    if let Some(id) = typ {
        append_type(&mut out, arena, id)?;
    }
    Ok(out)
}

pub fn append_type(out: &mut String, arena: &AstArena, id: TypeId) -> Result<()> {
    match arena.types[id] {
        Type::Name(name) => out.push_str(arena.name(name)),
        Type::Qualified { pkg, name } => append_qualified(out, arena, pkg, name),
        Type::Instance { base, args } => {
            append_type(out, arena, base)?;
            out.push('[');
            for (i, &arg) in arena.types_list(args).iter().enumerate() {
                if i != 0 {
                    out.push_str(", ");
                }
                append_type(out, arena, arg)?;
            }
            out.push(']');
        }
        Type::Pointer(elem) => {
            out.push('*');
            append_type(out, arena, elem)?;
        }
        Type::Array { len, elem } => {
            out.push('[');
            append_array_len(out, arena, len, id)?;
            out.push(']');
            append_type(out, arena, elem)?;
        }
        Type::Slice(elem) => {
            out.push_str("[]");
            append_type(out, arena, elem)?;
        }
        Type::Map { key, value } => {
            out.push_str("map[");
            append_type(out, arena, key)?;
            out.push(']');
            append_type(out, arena, value)?;
        }
        Type::Chan { dir, elem } => {
            out.push_str(match dir {
                ChanDir::Recv => "<-chan ",
                ChanDir::Send => "chan<- ",
                ChanDir::Both => "chan ",
            });
            append_type(out, arena, elem)?;
        }
        Type::Func(sig) => append_signature(out, arena, sig)?,
        Type::Struct { .. } => out.push_str("struct{}"),
        Type::Interface { .. } => out.push_str("interface{}"),
        Type::Ellipsis(elem) => {
            out.push_str("...");
            append_type(out, arena, elem)?;
        }
        Type::Paren(_) => return Err(unsupported(arena, id, "parenthesized type")),
        Type::Union(_) => return Err(unsupported(arena, id, "constraint union")),
    }
    Ok(())
}

fn unsupported(arena: &AstArena, id: TypeId, kind: &'static str) -> UnsupportedTypeExpression {
    UnsupportedTypeExpression {
        kind,
        span: arena.types.span(id),
    }
}

fn append_qualified(out: &mut String, arena: &AstArena, pkg: IdentName, name: IdentName) {
    out.push_str(arena.name(pkg));
    out.push('.');
    out.push_str(arena.name(name));
}

fn append_array_len(out: &mut String, arena: &AstArena, len: ArrayLen, id: TypeId) -> Result<()> {
    let ArrayLen::Expr(expr) = len else {
        return Err(unsupported(arena, id, "[...] array length"));
    };
    match arena.exprs[expr] {
        Expr::Ident(name) => out.push_str(arena.name(name)),
        Expr::Selector { pkg, sel } => append_qualified(out, arena, pkg, sel),
        Expr::BasicLit(lit) => out.push_str(arena.resolve(lit.value)),
        Expr::Other => {
            return Err(UnsupportedTypeExpression {
                kind: "array length expression",
                span: arena.exprs.span(expr),
            })
        }
    }
    Ok(())
}

fn append_signature(out: &mut String, arena: &AstArena, sig: SignatureId) -> Result<()> {
    let sig = arena.signatures[sig];
    out.push_str("func(");
    append_field_groups(out, arena, arena.fields_list(sig.params))?;
    out.push(')');

    match arena.fields_list(sig.results) {
        [] => {}
        [only] if arena.fields[*only].names.is_empty() => {
            out.push(' ');
            append_type(out, arena, arena.fields[*only].typ)?;
        }
        results => {
            out.push_str(" (");
            append_field_groups(out, arena, results)?;
            out.push(')');
        }
    }
    Ok(())
}

/// `a, b int, c string` or `int, string`.
fn append_field_groups(out: &mut String, arena: &AstArena, fields: &[FieldId]) -> Result<()> {
    for (i, &id) in fields.iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        let field = arena.fields[id];
        let names = arena.ident_names(field.names);
        if !names.is_empty() {
            for (j, &name) in names.iter().enumerate() {
                if j != 0 {
                    out.push_str(", ");
                }
                out.push_str(arena.name(name));
            }
            out.push(' ');
        }
        append_type(out, arena, field.typ)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goinspect_parser::ast::{Decl, Spec};
    use goinspect_parser::parse_source;

    fn render(typ: &str) -> Result<String> {
        let src = format!("package p\ntype T {typ}\n");
        let file = parse_source(&src).unwrap();
        let Decl::Gen(g) = file.arena.decls[file.decls()[0]] else {
            panic!("expected a type declaration");
        };
        let Spec::Type(spec) = file.arena.specs_list(g.specs)[0] else {
            panic!("expected a type spec");
        };
        type_string(&file.arena, Some(spec.typ))
    }

    #[test]
    fn absent_type_is_empty() {
        let arena = AstArena::new();
        assert_eq!(type_string(&arena, None).unwrap(), "");
    }

    #[test]
    fn basic_forms() {
        assert_eq!(render("*T").unwrap(), "*T");
        assert_eq!(render("[]T").unwrap(), "[]T");
        assert_eq!(render("[3]T").unwrap(), "[3]T");
        assert_eq!(render("[N]T").unwrap(), "[N]T");
        assert_eq!(render("[pkg.N]T").unwrap(), "[pkg.N]T");
        assert_eq!(render("map[string]int").unwrap(), "map[string]int");
        assert_eq!(render("time.Duration").unwrap(), "time.Duration");
    }

    #[test]
    fn func_result_suffix() {
        assert_eq!(render("func()").unwrap(), "func()");
        assert_eq!(render("func() error").unwrap(), "func() error");
        assert_eq!(render("func() (int, error)").unwrap(), "func() (int, error)");
        assert_eq!(render("func() (n int)").unwrap(), "func() (n int)");
        assert_eq!(
            render("func(a, b int,c string)(x, y float64)").unwrap(),
            "func(a, b int, c string) (x, y float64)"
        );
        assert_eq!(
            render("func(string, ...interface{ M() })").unwrap(),
            "func(string, ...interface{})"
        );
    }

    #[test]
    fn channels_and_placeholders() {
        assert_eq!(render("<-chan int").unwrap(), "<-chan int");
        assert_eq!(render("chan<- []byte").unwrap(), "chan<- []byte");
        assert_eq!(render("chan  struct{ x int }").unwrap(), "chan struct{}");
        assert_eq!(render("map[K]List[K, V]").unwrap(), "map[K]List[K, V]");
    }

    #[test]
    fn unsupported_forms_fail_loudly() {
        assert_eq!(render("(int)").unwrap_err().kind, "parenthesized type");
        assert_eq!(render("[...]int").unwrap_err().kind, "[...] array length");
        assert_eq!(render("[N*2]int").unwrap_err().kind, "array length expression");

        // Unions nested in an interface never reach the printer.
        assert_eq!(render("[]interface{ ~int | string }").unwrap(), "[]interface{}");
    }
}
