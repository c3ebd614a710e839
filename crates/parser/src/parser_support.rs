use crate::ast::{self, IdentName, Span};
use crate::error::SyntaxError;

/// One comma-separated entry of a parameter list, before grouping.
///
/// `a int` has a name and a type, a bare `a` has only a name (it may be a
/// parameter name or a type name), and `[]int` has only a type.
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub name: Option<IdentName>,
    pub typ: Option<ast::TypeId>,
    pub span: Span,
}

/// Groups parameter entries the way Go does.
///
/// If any entry is `name Type`, the list is fully named: bare identifiers
/// share the type of the next typed entry (`a, b int`). Otherwise every entry
/// is an unnamed parameter and bare identifiers are type names.
pub fn resolve_param_list(
    arena: &mut ast::AstArena,
    params: Vec<ParamDecl>,
) -> Result<Vec<ast::FieldId>, SyntaxError> {
    let named = params.iter().any(|p| p.name.is_some() && p.typ.is_some());
    let mut out = Vec::with_capacity(params.len());

    if !named {
        for param in params {
            let typ = match (param.typ, param.name) {
                (Some(typ), _) => typ,
                (None, Some(name)) => named_type_from_ident(arena, name),
                (None, None) => return Err(SyntaxError::new(param.span, "expected parameter type")),
            };
            let names = ast::ListRef::EMPTY;
            out.push(arena.fields.alloc(ast::Field { names, typ, tag: None }, param.span));
        }
        return Ok(out);
    }

    let mut pending: Vec<IdentName> = Vec::new();
    let mut pending_start: Option<u32> = None;

    for param in params {
        match (param.name, param.typ) {
            (Some(name), None) => {
                pending_start.get_or_insert(param.span.start);
                pending.push(name);
            }
            (Some(name), Some(typ)) => {
                pending.push(name);
                let start = pending_start.take().unwrap_or(param.span.start);
                let names = arena.list_ident_names(pending.drain(..));
                let span = Span {
                    start,
                    end: param.span.end,
                };
                out.push(arena.fields.alloc(ast::Field { names, typ, tag: None }, span));
            }
            (None, _) => {
                return Err(SyntaxError::new(
                    param.span,
                    "mixed named and unnamed parameters",
                ));
            }
        }
    }

    if let Some(last) = pending.last() {
        return Err(SyntaxError::new(last.pos, "missing parameter type"));
    }

    Ok(out)
}

pub fn named_type_from_ident(arena: &mut ast::AstArena, name: IdentName) -> ast::TypeId {
    arena.types.alloc(ast::Type::Name(name), name.pos)
}
