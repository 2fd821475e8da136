use super::*;

fn values<'a>(params: &'a Params, name: &str) -> Vec<&'a str> {
    params
        .get(name)
        .map(|v| v.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn decodes_percent_escapes_and_plus() {
    let cases: &[(&str, &str)] = &[
        ("plain", "plain"),
        ("a+b", "a b"),
        ("%2Ftmp%2Fx", "/tmp/x"),
        ("%2ftmp", "/tmp"),
        ("caf%C3%A9", "café"),
        ("100%", "100%"),
        ("%zz", "%zz"),
        ("%4", "%4"),
        ("%00", "\0"),
        ("%FF", "\u{FFFD}"),
        ("", ""),
    ];

    for (raw, expected) in cases {
        assert_eq!(decode_component(raw), *expected, "decode {raw:?}");
    }
}

#[test]
fn splits_path_and_repeated_params() {
    let (path, params) = split_target("/filemetadata/list?path=%2Fsrv&depth=2&path=/b");

    assert_eq!(path, "/filemetadata/list");
    assert_eq!(values(&params, "path"), ["/srv", "/b"]);
    assert_eq!(values(&params, "depth"), ["2"]);
}

#[test]
fn target_without_query_has_no_params() {
    let (path, params) = split_target("/healthz");
    assert_eq!(path, "/healthz");
    assert!(params.is_empty());

    let (path, params) = split_target("/healthz?");
    assert_eq!(path, "/healthz");
    assert!(params.is_empty());
}

#[test]
fn bare_names_and_empty_values() {
    let (_, params) = split_target("/x?path&depth=&&flag=a=b#frag");
    assert_eq!(values(&params, "path"), [""]);
    assert_eq!(values(&params, "depth"), [""]);
    assert_eq!(values(&params, "flag"), ["a=b"]);
    assert_eq!(params.len(), 3);
}

#[test]
fn plus_in_path_segment_is_literal() {
    let (path, _) = split_target("/a+b%20c?x=1");
    assert_eq!(path, "/a+b c");
}

#[test]
fn json_output_respects_compact_flag() {
    let value = serde_json::json!({ "a": 1, "b": [true] });

    let compact = to_json(&value, true).unwrap();
    assert_eq!(compact, br#"{"a":1,"b":[true]}"#);

    let pretty = String::from_utf8(to_json(&value, false).unwrap()).unwrap();
    assert!(pretty.contains('\n'));

    let mut buf = Vec::new();
    write_json(&mut buf, &value, true).unwrap();
    assert_eq!(buf.last(), Some(&b'\n'));
}
