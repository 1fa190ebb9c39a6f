use chrono::{TimeZone, Utc};
use docpath::{Codec, CodecError, Document, FnCodec, Format, Map, Value};
use std::fs::File;

const PROFILE_TOML: &str = r#"
domain = "t6"
released = 2014-05-09T12:01:05Z
local = 1979-05-27T07:32:00

[meta]
owner = "e.persienko"
bool = true
ratio = 0.25
workers = 8

[resources.conf]
depends = ["mysql_single", "mongo_single"]
"#;

#[test]
fn decodes_toml_with_native_timestamps() {
    let doc = Document::decode(&Format::Toml, PROFILE_TOML.as_bytes()).expect("toml decodes");
    assert_eq!(doc.get_str("domain").expect("domain"), "t6");
    assert_eq!(doc.get_int("meta.workers").expect("workers"), 8);
    assert_eq!(doc.get_float("meta.ratio").expect("ratio"), 0.25);
    assert_eq!(
        doc.get_timestamp("released").expect("released"),
        Utc.with_ymd_and_hms(2014, 5, 9, 12, 1, 5).unwrap()
    );
    // No offset, so no instant: kept as text.
    assert_eq!(doc.get_str("local").expect("local"), "1979-05-27T07:32:00");
    assert_eq!(
        doc.get_string_slice("resources.conf.depends").expect("depends"),
        ["mysql_single", "mongo_single"]
    );
}

#[test]
fn scalar_and_map_documents_round_trip_through_every_format() {
    let mut doc = Document::new();
    doc.set("name", "demo").expect("set");
    doc.set("meta.port", 8080).expect("set");
    doc.set("meta.debug", false).expect("set");
    doc.set("meta.limits.ratio", 0.75).expect("set");

    for format in [Format::Toml, Format::Json, Format::Yaml] {
        let bytes = doc.encode(&format).expect("encode");
        let decoded = Document::decode(&format, &bytes).expect("decode");
        assert_eq!(decoded, doc, "{format} round trip");
    }
}

#[test]
fn timestamps_round_trip_through_toml() {
    let mut doc = Document::new();
    let ts = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    doc.set("deploy.at", ts).expect("set");

    let bytes = doc.encode(&Format::Toml).expect("encode");
    let text = String::from_utf8(bytes.clone()).expect("utf8");
    assert!(text.contains("at = 2020-01-02T03:04:05Z"), "{text}");

    let decoded = Document::decode(&Format::Toml, &bytes).expect("decode");
    assert_eq!(decoded.get_timestamp("deploy.at").expect("at"), ts);
}

#[test]
fn typed_lists_come_back_as_generic_lists() {
    let mut doc = Document::new();
    doc.append_int_slice("ports", 80).expect("append");
    doc.append_int_slice("ports", 443).expect("append");

    let bytes = doc.encode(&Format::Json).expect("encode");
    let decoded = Document::decode(&Format::Json, &bytes).expect("decode");
    assert_eq!(
        decoded.get("ports"),
        Some(&Value::List(vec![Value::Int(80), Value::Int(443)]))
    );
    assert_eq!(decoded.get_int_slice("ports").expect("ports"), [80, 443]);
}

#[test]
fn toml_output_skips_nulls() {
    let mut doc = Document::new();
    doc.set("kept", 1).expect("set");
    doc.set("gone", Value::Null).expect("set");

    let text = String::from_utf8(doc.encode(&Format::Toml).expect("encode")).expect("utf8");
    assert!(text.contains("kept = 1"));
    assert!(!text.contains("gone"));
}

#[test]
fn yaml_mappings_with_non_string_keys_are_normalized() {
    let yaml = b"ports:\n  80: http\n  name: web\n  true: yes\n";
    let doc = Document::decode(&Format::Yaml, yaml).expect("yaml decodes");
    let ports = doc.get_map("ports").expect("ports");
    assert_eq!(ports.len(), 1);
    assert_eq!(ports.get("name"), Some(&Value::from("web")));
}

#[test]
fn empty_yaml_is_an_empty_document() {
    let doc = Document::decode(&Format::Yaml, b"").expect("empty yaml");
    assert!(doc.is_empty());
}

#[test]
fn non_mapping_roots_are_rejected() {
    match Document::decode(&Format::Json, b"[1, 2, 3]") {
        Err(CodecError::RootNotMap { found }) => assert_eq!(found, "list"),
        other => panic!("expected RootNotMap, got {other:?}"),
    }
}

#[test]
fn corrupted_input_is_a_codec_error() {
    assert!(matches!(
        Document::decode(&Format::Json, b"{\"this\": "),
        Err(CodecError::Json(_))
    ));
    assert!(matches!(
        Document::decode(&Format::Toml, b"key = = 1"),
        Err(CodecError::TomlDecode(_))
    ));
}

#[test]
fn reads_and_writes_files() {
    let dir = tempfile::tempdir().expect("tempdir");

    let toml_path = dir.path().join("profile.toml");
    std::fs::write(&toml_path, PROFILE_TOML).expect("write toml");
    let format = Format::from_path(&toml_path).expect("known extension");
    let doc = Document::read_from(&format, File::open(&toml_path).expect("open"))
        .expect("read profile");

    let json_path = dir.path().join("profile.json");
    doc.write_to(&Format::Json, File::create(&json_path).expect("create"))
        .expect("write json");

    let json = std::fs::read_to_string(&json_path).expect("read json");
    assert!(json.contains("\"owner\": \"e.persienko\""));
    assert!(json.contains("\"released\": \"2014-05-09T12:01:05Z\""));
}

#[test]
fn format_is_guessed_from_extension() {
    assert_eq!(Format::from_path("a/b.toml"), Some(Format::Toml));
    assert_eq!(Format::from_path("b.yml"), Some(Format::Yaml));
    assert_eq!(Format::from_path("b.yaml"), Some(Format::Yaml));
    assert_eq!(Format::from_path("b.json"), Some(Format::Json));
    assert_eq!(Format::from_path("b.ini"), None);
    assert_eq!(Format::from_path("noext"), None);
}

#[test]
fn caller_supplied_functions_plug_into_the_boundary() {
    let codec = FnCodec::new(
        |bytes: &[u8]| {
            let text = std::str::from_utf8(bytes).map_err(CodecError::custom)?;
            let mut map = Map::new();
            for line in text.lines() {
                let (key, value) = line
                    .split_once('=')
                    .ok_or_else(|| CodecError::custom(format!("bad line `{line}`")))?;
                map.insert(key.to_string(), Value::from(value));
            }
            Ok(map)
        },
        |map: &Map| {
            let lines: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{key}={}", value.as_str().unwrap_or_default()))
                .collect();
            Ok(lines.join("\n").into_bytes())
        },
    );

    let mut doc = Document::decode(&codec, b"a=1\nb=two").expect("decode");
    assert_eq!(doc.get_str("a").expect("a"), "1");
    doc.set("c", "three").expect("set");
    assert_eq!(doc.encode(&codec).expect("encode"), b"a=1\nb=two\nc=three");

    let err = Document::decode(&codec, b"broken").unwrap_err();
    assert_eq!(err.to_string(), "bad line `broken`");
}

#[test]
fn display_renders_indented_json() {
    let mut doc = Document::new();
    doc.set("key1", "string").expect("set");
    doc.set("key2", 10).expect("set");
    assert_eq!(doc.to_string(), "{\n  \"key1\": \"string\",\n  \"key2\": 10\n}");
}
