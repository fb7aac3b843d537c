use skald::domain::{Metadata, MetadataValue};

#[test]
fn given_empty_metadata_when_inserting_then_value_is_retrievable() {
    let mut metadata = Metadata::new();

    let previous = metadata.insert("file_name", "lecture.mp3");

    assert!(previous.is_none());
    assert_eq!(
        metadata.get("file_name"),
        Some(&MetadataValue::Text("lecture.mp3".to_string()))
    );
    assert!(metadata.contains_key("file_name"));
    assert_eq!(metadata.len(), 1);
}

#[test]
fn given_existing_key_when_inserting_then_previous_value_is_returned() {
    let mut metadata = Metadata::new();
    metadata.insert("size", 100u64);

    let previous = metadata.insert("size", 2048u64);

    assert_eq!(previous, Some(MetadataValue::Integer(100)));
    assert_eq!(metadata.get("size"), Some(&MetadataValue::Integer(2048)));
    assert_eq!(metadata.len(), 1);
}

#[test]
fn given_mixed_value_types_when_serializing_then_json_is_untagged() {
    let mut metadata = Metadata::new();
    metadata.insert("file_name", "talk.wav");
    metadata.insert("size", 44_100u64);
    metadata.insert("duration_secs", 2.5);
    metadata.insert("is_file", true);

    let json = serde_json::to_value(&metadata).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "file_name": "talk.wav",
            "size": 44_100,
            "duration_secs": 2.5,
            "is_file": true,
        })
    );
}

#[test]
fn given_value_conversions_when_building_then_variants_match() {
    assert_eq!(MetadataValue::from(true), MetadataValue::Bool(true));
    assert_eq!(MetadataValue::from(7i64), MetadataValue::Integer(7));
    assert_eq!(MetadataValue::from(7u64), MetadataValue::Integer(7));
    assert_eq!(MetadataValue::from(0.5), MetadataValue::Float(0.5));
    assert_eq!(
        MetadataValue::from("text"),
        MetadataValue::Text("text".to_string())
    );
}

#[test]
fn given_values_when_displaying_then_renders_plain_text() {
    assert_eq!(MetadataValue::Bool(false).to_string(), "false");
    assert_eq!(MetadataValue::Integer(42).to_string(), "42");
    assert_eq!(
        MetadataValue::Text("hello".to_string()).to_string(),
        "hello"
    );
}
