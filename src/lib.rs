//! Declaration inventories for Go source files.
//!
//! Parses Go files with [`goinspect_parser`] and lists their functions,
//! values, types and struct/interface members. Member types are rendered as
//! canonical text ([`printer`]) and struct tags can be projected key by key
//! ([`tag`]).
//!
//! ```no_run
//! use goinspect::{list_fields, FieldsConfig, OutputEncoding};
//!
//! let config = FieldsConfig::new(None, &["name", "type", "tag[json]"], OutputEncoding::Lines)?;
//! list_fields("models.go", "User", &config, &mut std::io::stdout())?;
//! # Ok::<(), goinspect::Error>(())
//! ```

pub mod columns;
pub mod config;
pub mod decl;
pub mod error;
pub mod fields;
pub mod filter;
pub mod inspect;
pub mod list;
pub mod printer;
pub mod tag;

pub use columns::{Column, OutputEncoding};
pub use config::{FieldsConfig, ListConfig};
pub use decl::{declarations, Declaration, Declarations, Underlying, ValueKind};
pub use error::{Error, Result};
pub use fields::{project_fields, Field};
pub use filter::NameFilter;
pub use inspect::{inspect_files, load_file};
pub use list::{list_fields, list_funcs, list_types, list_values};
pub use printer::{append_type, type_string, UnsupportedTypeExpression};
pub use tag::Tag;
