use goinspect::{declarations, load_file, project_fields, type_string, Declaration, Error};
use walkdir::WalkDir;

#[test]
fn inspects_go_corpus_if_configured() {
    let Some(root) = std::env::var_os("GOINSPECT_CORPUS") else {
        eprintln!("GOINSPECT_CORPUS not set; skipping corpus test");
        return;
    };

    let mut total = 0usize;
    let mut members = 0usize;
    let mut unsupported = 0usize;

    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }
        // testdata holds deliberately invalid sources.
        if path.components().any(|c| c.as_os_str() == "testdata") {
            continue;
        }

        total += 1;
        let file = match load_file(path) {
            Ok(file) => file,
            Err(Error::Io { .. }) => continue,
            Err(err) => panic!("corpus inspection failed after {total} files: {err}"),
        };

        for decl in declarations(&file) {
            let Declaration::Type { name, .. } = decl else {
                continue;
            };
            for field in project_fields(&file, &decl, name) {
                members += 1;
                match type_string(&file.arena, field.type_expr).map_err(Error::from) {
                    Ok(_) => {}
                    Err(Error::UnsupportedTypeExpression(_)) => unsupported += 1,
                    Err(err) => panic!("{}: {name}.{}: {err}", path.display(), field.name),
                }
            }
        }
    }

    eprintln!(
        "Inspected {total} Go files, {members} members ({unsupported} with unsupported types)."
    );
}
