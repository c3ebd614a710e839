//! Per-invocation settings, validated before any file is read.

use crate::columns::{parse_columns, Column, OutputEncoding};
use crate::error::Result;
use crate::filter::NameFilter;

/// Settings for `list funcs`, `list values` and `list types`.
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    pub filter: NameFilter,
}

impl ListConfig {
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        Ok(Self {
            filter: NameFilter::new(pattern)?,
        })
    }
}

/// Settings for `list fields`.
#[derive(Debug, Clone)]
pub struct FieldsConfig {
    pub filter: NameFilter,
    pub columns: Vec<Column>,
    pub encoding: OutputEncoding,
}

impl FieldsConfig {
    /// An empty column list means `[name]`.
    pub fn new<S: AsRef<str>>(
        pattern: Option<&str>,
        columns: &[S],
        encoding: OutputEncoding,
    ) -> Result<Self> {
        let filter = NameFilter::new(pattern)?;
        let mut columns = parse_columns(columns)?;
        if columns.is_empty() {
            columns.push(Column::Name);
        }
        Ok(Self {
            filter,
            columns,
            encoding,
        })
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            filter: NameFilter::all(),
            columns: vec![Column::Name],
            encoding: OutputEncoding::Lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn pattern_checked_before_columns() {
        let err = FieldsConfig::new(Some("["), &["bogus"], OutputEncoding::Lines).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)), "{err:?}");
    }

    #[test]
    fn empty_columns_default_to_name() {
        let cfg = FieldsConfig::new::<&str>(None, &[], OutputEncoding::NulTerminated).unwrap();
        assert_eq!(cfg.columns, [Column::Name]);
        assert_eq!(cfg.encoding, OutputEncoding::NulTerminated);
    }
}
