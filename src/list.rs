//! The `list` operations, writing to any `io::Write`.

use std::io::Write;
use std::path::Path;

use crate::columns::write_record;
use crate::config::{FieldsConfig, ListConfig};
use crate::decl::{declarations, Declaration};
use crate::error::{Error, Result};
use crate::fields::project_fields;
use crate::inspect::inspect_files;

/// Function and method names, one per line.
pub fn list_funcs<P, W>(paths: &[P], config: &ListConfig, out: &mut W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    list_names(paths, config, out, |d| matches!(d, Declaration::Function { .. }))
}

/// `var` and `const` names, one per line, groups flattened.
pub fn list_values<P, W>(paths: &[P], config: &ListConfig, out: &mut W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    list_names(paths, config, out, |d| matches!(d, Declaration::Value { .. }))
}

/// Type names, one per line.
pub fn list_types<P, W>(paths: &[P], config: &ListConfig, out: &mut W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    list_names(paths, config, out, |d| matches!(d, Declaration::Type { .. }))
}

fn list_names<P, W>(
    paths: &[P],
    config: &ListConfig,
    out: &mut W,
    wanted: impl Fn(&Declaration<'_>) -> bool,
) -> Result<()>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    inspect_files(paths, |_, file| {
        for decl in declarations(file).filter(|d| wanted(d)) {
            for name in decl.names() {
                if config.filter.is_match(name) {
                    writeln!(out, "{name}").map_err(Error::Output)?;
                }
            }
        }
        Ok(())
    })
}

/// Members of every type named `type_name` in `path`, one record each.
pub fn list_fields<P, W>(path: P, type_name: &str, config: &FieldsConfig, out: &mut W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    inspect_files(&[path], |_, file| {
        let mut values = Vec::with_capacity(config.columns.len());
        for decl in declarations(file) {
            for field in project_fields(file, &decl, type_name) {
                if !config.filter.is_match(field.name) {
                    continue;
                }
                values.clear();
                for column in &config.columns {
                    values.push(column.value(&file.arena, &field)?);
                }
                write_record(out, &values, config.encoding).map_err(Error::Output)?;
            }
        }
        Ok(())
    })
}
