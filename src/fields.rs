//! Member listing for struct and interface type declarations.

use goinspect_parser::ast::{AstArena, SourceFile, StringKind, StringLit, TypeId};

use crate::decl::{Declaration, Underlying};
use crate::tag;

/// One named member of a struct or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    /// Declared type; always `None` for interface methods.
    pub type_expr: Option<TypeId>,
    /// Tag content without its delimiters; empty when absent.
    pub raw_tag: String,
}

/// Members of `decl` if it is the struct or interface named `type_name`.
///
/// `X, Y int` yields one record per name, sharing type and tag. Embedded
/// fields and embedded interfaces have no name and are skipped.
pub fn project_fields<'a>(
    file: &'a SourceFile,
    decl: &Declaration<'a>,
    type_name: &str,
) -> Vec<Field<'a>> {
    let Declaration::Type { name, underlying } = decl else {
        return Vec::new();
    };
    if *name != type_name {
        return Vec::new();
    }

    let (members, is_struct) = match *underlying {
        Underlying::Struct(fields) => (fields, true),
        Underlying::Interface(elems) => (elems, false),
        Underlying::Other => {
            log::trace!("type {name} matched but has no members to list");
            return Vec::new();
        }
    };

    let arena = &file.arena;
    let mut out = Vec::new();
    for &id in arena.fields_list(members) {
        let member = arena.fields[id];
        let (type_expr, raw_tag) = if is_struct {
            (Some(member.typ), raw_tag(arena, member.tag))
        } else {
            (None, String::new())
        };
        for &ident in arena.ident_names(member.names) {
            out.push(Field {
                name: arena.name(ident),
                type_expr,
                raw_tag: raw_tag.clone(),
            });
        }
    }
    out
}

/// Tag literal text with its quoting removed.
fn raw_tag(arena: &AstArena, lit: Option<StringLit>) -> String {
    let Some(lit) = lit else {
        return String::new();
    };
    let text = arena.resolve(lit.value);
    match lit.kind {
        // Carriage returns are discarded from raw string literals.
        StringKind::Raw => text.trim_matches('`').replace('\r', ""),
        StringKind::Interpreted => tag::unquote(text)
            .unwrap_or_else(|| text.trim_matches('"').to_owned()),
    }
}
