use std::path::{Path, PathBuf};

use goinspect::{
    list_fields, list_funcs, list_types, list_values, Error, FieldsConfig, ListConfig,
    OutputEncoding,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn output(
    run: impl FnOnce(&mut Vec<u8>) -> goinspect::Result<()>,
) -> (String, goinspect::Result<()>) {
    let mut out = Vec::new();
    let result = run(&mut out);
    (String::from_utf8(out).unwrap(), result)
}

fn fields(columns: &[&str], encoding: OutputEncoding, ty: &str) -> String {
    let config = FieldsConfig::new(None, columns, encoding).unwrap();
    let (out, result) = output(|out| list_fields(fixture("models.go"), ty, &config, out));
    result.unwrap();
    out
}

#[test]
fn funcs_include_methods_by_bare_name() {
    let (out, result) =
        output(|out| list_funcs(&[fixture("valid.go")], &ListConfig::default(), out));
    result.unwrap();
    assert_eq!(out, "NewCircle\nArea\nPerimeter\n");
}

#[test]
fn values_and_types_across_files() {
    let files = [fixture("valid.go"), fixture("valid2.go")];

    let (values, result) = output(|out| list_values(&files, &ListConfig::default(), out));
    result.unwrap();
    assert_eq!(values, "Pi2\nTau\nDefaultScale\nregistry\n");

    let (types, result) = output(|out| list_types(&files, &ListConfig::default(), out));
    result.unwrap();
    assert_eq!(types, "Shape\nCircle\nSquare\n");
}

#[test]
fn pattern_applies_to_every_file() {
    let files = [fixture("valid.go"), fixture("valid2.go")];
    let config = ListConfig::new(Some("^New")).unwrap();
    let (out, result) = output(|out| list_funcs(&files, &config, out));
    result.unwrap();
    assert_eq!(out, "NewCircle\nNewSquare\n");
}

#[test]
fn fail_fast_stops_before_later_files() {
    let files = [fixture("valid.go"), fixture("broken.go"), fixture("valid2.go")];
    let (out, result) = output(|out| list_funcs(&files, &ListConfig::default(), out));

    assert_eq!(out, "NewCircle\nArea\nPerimeter\n");
    let err = result.unwrap_err();
    match &err {
        Error::Parse { path, position, .. } => {
            assert!(path.ends_with("broken.go"), "{path:?}");
            assert!(position.starts_with("3:"), "{position}");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert!(err.to_string().contains("broken.go:3:"), "{err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let files = [fixture("valid.go"), fixture("does_not_exist.go")];
    let (out, result) = output(|out| list_types(&files, &ListConfig::default(), out));
    assert_eq!(out, "Shape\nCircle\n");
    assert!(matches!(result, Err(Error::Io { .. })), "{result:?}");
}

#[test]
fn struct_fields_default_to_names() {
    let out = fields(&["name"], OutputEncoding::Lines, "User");
    assert_eq!(
        out,
        "ID\nFirst\nLast\nEmail\nRoles\nScores\nAttrs\nEvents\nOnSave\nVisit\nNested\n"
    );
}

#[test]
fn struct_fields_with_types_and_tag_values() {
    let out = fields(&["name", "type", "tag[json]"], OutputEncoding::Lines, "User");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "ID int64 id",
            "First string name,omitempty",
            "Last string name,omitempty",
            "Email *string email",
            "Roles []string roles",
            "Scores [4]int -",
            "Attrs map[string]any ",
            "Events <-chan time.Time -",
            "OnSave func(u *User) error ",
            "Visit func(fn func(int) bool, limit int) (n int, err error) ",
            "Nested struct{} nested",
        ]
    );
}

#[test]
fn raw_tags_column_is_verbatim() {
    let config = FieldsConfig::new(Some("^(ID|Email)$"), &["tags"], OutputEncoding::Lines).unwrap();
    let (out, result) = output(|out| list_fields(fixture("models.go"), "User", &config, out));
    result.unwrap();
    assert_eq!(out, "json:\"id\" db:\"user_id\"\njson:\"email\"\n");
}

#[test]
fn nul_encoding() {
    let config = FieldsConfig::new(
        Some("^First$"),
        &["name", "tag[xml]", "tag[db]"],
        OutputEncoding::NulTerminated,
    )
    .unwrap();
    let (out, result) = output(|out| list_fields(fixture("models.go"), "User", &config, out));
    result.unwrap();
    assert_eq!(out, "First\0Name\0\0");
}

#[test]
fn interface_methods_only() {
    let out = fields(&["name", "type", "tags"], OutputEncoding::Lines, "Store");
    assert_eq!(out, "Get  \nPut  \n");
}

#[test]
fn opaque_or_unknown_types_list_nothing() {
    assert_eq!(fields(&["name"], OutputEncoding::Lines, "ID"), "");
    assert_eq!(fields(&["name"], OutputEncoding::Lines, "Nope"), "");
}

#[test]
fn configuration_errors_come_first() {
    assert!(matches!(
        ListConfig::new(Some("(")),
        Err(Error::InvalidPattern(_))
    ));
    assert!(matches!(
        FieldsConfig::new(None, &["name", "tag[json"], OutputEncoding::Lines),
        Err(Error::UnknownColumn(c)) if c == "tag[json"
    ));
}
