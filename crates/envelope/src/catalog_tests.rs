use super::*;
use std::io::Write;

#[test]
fn render_substitutes_positional_arguments() {
    let cases: &[(&str, &[&str], &str)] = &[
        ("Invalid file path: {0}", &["/tmp/x"], "Invalid file path: /tmp/x"),
        ("{1} before {0}", &["a", "b"], "b before a"),
        ("{0} and {0}", &["x"], "x and x"),
        ("no placeholders", &["unused"], "no placeholders"),
        ("missing {3}", &["a"], "missing {3}"),
        ("not a number {abc}", &["a"], "not a number {abc}"),
        ("unterminated {0", &["a"], "unterminated {0"),
        ("{0}", &[], "{0}"),
        ("", &[], ""),
    ];

    for (template, args, expected) in cases {
        assert_eq!(
            render(template, args),
            *expected,
            "render({:?}, {:?})",
            template,
            args
        );
    }
}

#[test]
fn render_does_not_reinterpret_substituted_text() {
    assert_eq!(render("path: {0}", &["{1}"]), "path: {1}");
}

#[test]
fn builtin_catalog_covers_every_kind() {
    let catalog = ErrorCatalog::builtin();
    for kind in ErrorKind::ALL {
        assert_eq!(catalog.template(kind), kind.default_template());
    }
    assert_eq!(
        catalog.describe(ErrorKind::MissingParameter, &["path"]),
        "path parameter is missing"
    );
}

#[test]
fn overrides_replace_known_codes_and_skip_unknown() {
    let catalog = ErrorCatalog::with_overrides([
        ("INVALID_FILE_PATH", "No such file: {0}"),
        ("SOMETHING_ELSE", "ignored"),
    ]);

    assert_eq!(
        catalog.describe(ErrorKind::InvalidFilePath, &["a.txt"]),
        "No such file: a.txt"
    );
    assert_eq!(
        catalog.template(ErrorKind::InvalidDirectoryPath),
        ErrorKind::InvalidDirectoryPath.default_template()
    );
}

#[test]
fn load_reads_json_overrides() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("error-codes.json");
    {
        let mut f = std::fs::File::create(&path).expect("create catalog file");
        writeln!(
            f,
            r#"{{ "INTERNAL_SERVER_ERROR": "Service unavailable, ref the id" }}"#
        )
        .unwrap();
    }

    let catalog = ErrorCatalog::load(&path).expect("load catalog");
    assert_eq!(
        catalog.template(ErrorKind::InternalServerError),
        "Service unavailable, ref the id"
    );
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("missing.json");

    assert!(matches!(
        ErrorCatalog::load(&missing),
        Err(CatalogError::Read { .. })
    ));

    let catalog = ErrorCatalog::load_or_builtin(&missing).expect("missing file is fine");
    assert_eq!(
        catalog.template(ErrorKind::InvalidFilePath),
        ErrorKind::InvalidFilePath.default_template()
    );

    let malformed = tmp.path().join("bad.json");
    std::fs::write(&malformed, b"[not, an, object").expect("write malformed");
    assert!(matches!(
        ErrorCatalog::load_or_builtin(&malformed),
        Err(CatalogError::Parse { .. })
    ));
}
