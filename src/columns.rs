//! Column selection and record encoding for field listings.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use goinspect_parser::ast::AstArena;

use crate::error::{Error, Result};
use crate::fields::Field;
use crate::printer::type_string;
use crate::tag::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Member name
    Name,
    /// Canonical type text
    Type,
    /// Whole tag, verbatim
    Tags,
    /// One tag value, `tag[json]`; empty when the key is missing
    Tag(String),
}

impl Column {
    pub fn value(&self, arena: &AstArena, field: &Field<'_>) -> Result<String> {
        Ok(match self {
            Column::Name => field.name.to_owned(),
            Column::Type => type_string(arena, field.type_expr)?,
            Column::Tags => field.raw_tag.clone(),
            Column::Tag(key) => Tag::parse(&field.raw_tag)
                .get(key)
                .unwrap_or_default()
                .to_owned(),
        })
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => return Ok(Column::Name),
            "type" => return Ok(Column::Type),
            "tags" => return Ok(Column::Tags),
            _ => {}
        }
        s.strip_prefix("tag[")
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|key| !key.is_empty() && !key.contains(']'))
            .map(|key| Column::Tag(key.to_owned()))
            .ok_or_else(|| Error::UnknownColumn(s.to_owned()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Name => f.write_str("name"),
            Column::Type => f.write_str("type"),
            Column::Tags => f.write_str("tags"),
            Column::Tag(key) => write!(f, "tag[{key}]"),
        }
    }
}

/// Parse every column spec; the first unknown one is the error.
pub fn parse_columns<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Column>> {
    specs.iter().map(|s| s.as_ref().parse()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// Values joined by a space, one record per line
    #[default]
    Lines,
    /// Every value followed by a NUL byte
    NulTerminated,
}

pub fn write_record<W: Write + ?Sized>(
    out: &mut W,
    values: &[String],
    encoding: OutputEncoding,
) -> io::Result<()> {
    match encoding {
        OutputEncoding::Lines => writeln!(out, "{}", values.join(" ")),
        OutputEncoding::NulTerminated => {
            for value in values {
                out.write_all(value.as_bytes())?;
                out.write_all(b"\0")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_columns() {
        let cols = parse_columns(&["name", "type", "tags", "tag[json]"]).unwrap();
        assert_eq!(
            cols,
            [
                Column::Name,
                Column::Type,
                Column::Tags,
                Column::Tag("json".into())
            ]
        );
        let round: Vec<_> = cols.iter().map(Column::to_string).collect();
        assert_eq!(round, ["name", "type", "tags", "tag[json]"]);
    }

    #[test]
    fn rejects_unknown_columns() {
        for bad in ["Name", "tag[]", "tag[json", "xtag[json]", "tag[a]b]", ""] {
            let err = bad.parse::<Column>().unwrap_err();
            assert!(
                matches!(err, Error::UnknownColumn(ref c) if c == bad),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn first_unknown_column_is_reported() {
        let err = parse_columns(&["name", "size", "kind"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown column: size");
    }

    #[test]
    fn tag_column_reads_the_parsed_tag() {
        let arena = AstArena::new();
        let field = Field {
            name: "ID",
            type_expr: None,
            raw_tag: r#"a:"\q" json:"id" a:"later""#.to_owned(),
        };
        let value = |key: &str| Column::Tag(key.into()).value(&arena, &field).unwrap();
        assert_eq!(value("json"), Tag::parse(&field.raw_tag).get("json").unwrap());
        assert_eq!(value("json"), "id");
        assert_eq!(value("a"), "");
        assert_eq!(value("xml"), "");
    }

    #[test]
    fn line_encoding() {
        let mut out = Vec::new();
        write_record(&mut out, &["ID".into(), "int64".into()], OutputEncoding::Lines).unwrap();
        write_record(&mut out, &["Name".into(), String::new()], OutputEncoding::Lines).unwrap();
        assert_eq!(out, b"ID int64\nName \n");
    }

    #[test]
    fn nul_encoding_terminates_every_value() {
        let mut out = Vec::new();
        let values = ["ID".to_string(), String::new(), "id".to_string()];
        write_record(&mut out, &values, OutputEncoding::NulTerminated).unwrap();
        assert_eq!(out, b"ID\0\0id\0");
    }
}
