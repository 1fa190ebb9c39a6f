use docpath::{Document, Format, REQUIRED, Validate, Value};

#[test]
fn reports_the_single_nested_placeholder() {
    let mut doc = Document::new();
    doc.set("a.b", REQUIRED).expect("set");
    doc.set("c", "x").expect("set");

    let errors = doc.validate().expect_err("a.b is unset");
    assert!(!errors.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.paths(), ["a.b"]);
}

#[test]
fn fully_specified_documents_validate() {
    let mut doc = Document::new();
    doc.set("meta.owner", "ops").expect("set");
    doc.set("meta.required_count", 3).expect("set");
    doc.set("note", "[REQUIRED] appears inside, not equal").expect("set");
    assert!(doc.validate().is_ok());
    assert!(doc.required_violations().is_empty());
}

#[test]
fn reports_every_violation_in_key_order() {
    let toml = br#"
domain = "[REQUIRED]"

[meta]
owner = "[REQUIRED]"
email = "ops@example.com"

[resources.mysql]
provider = "[REQUIRED]"
pool = "[REQUIRED]"

[resources.app]
provider = "dbfarm"
"#;
    let doc = Document::decode(&Format::Toml, toml).expect("toml decodes");
    let errors = doc.validate().expect_err("four fields unset");
    assert_eq!(
        errors.paths(),
        [
            "domain",
            "meta.owner",
            "resources.mysql.pool",
            "resources.mysql.provider"
        ]
    );

    let rendered = errors.to_string();
    assert!(rendered.starts_with("validation failed:"));
    assert!(rendered.contains("meta.owner is required"));
}

#[test]
fn sequences_and_non_strings_are_not_inspected() {
    let mut doc = Document::new();
    doc.set("tags", vec![Value::from(REQUIRED)]).expect("set");
    doc.set("count", 0).expect("set");
    assert!(doc.validate().is_ok());
}

#[test]
fn overriding_a_placeholder_clears_it() {
    let mut doc = Document::new();
    doc.set("meta.owner", REQUIRED).expect("set");
    assert!(doc.validate().is_err());

    doc.set("meta.owner", "alice").expect("set");
    assert!(doc.validate().is_ok());
}

#[test]
fn walks_deeply_nested_documents() {
    let mut doc = Document::new();
    let path: Vec<String> = (0..500).map(|i| format!("k{i}")).collect();
    doc.set(path.clone(), REQUIRED).expect("set");

    let violations = doc.required_violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, path.join("."));
}
