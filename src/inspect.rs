//! Sequential, fail-fast file driver.

use std::fs;
use std::path::Path;

use goinspect_parser::{parse_source, SourceFile};

use crate::error::{Error, Result};

/// Read and parse `path`.
pub fn load_file(path: &Path) -> Result<SourceFile> {
    let src = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("read {} ({} bytes)", path.display(), src.len());

    let file = parse_source(&src).map_err(|failure| Error::parse(path.to_owned(), &src, failure))?;
    log::debug!(
        "parsed {}: package {}, {} top-level declarations",
        path.display(),
        file.package_name(),
        file.decls().len()
    );
    Ok(file)
}

/// Load each file in order and hand it to `visit`.
///
/// The first read, parse or visitor error stops the walk; later files are
/// never opened.
pub fn inspect_files<P, F>(paths: &[P], mut visit: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&Path, &SourceFile) -> Result<()>,
{
    for path in paths {
        let path = path.as_ref();
        let file = load_file(path)?;
        visit(path, &file)?;
    }
    Ok(())
}
