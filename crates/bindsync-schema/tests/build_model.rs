//! Integration test: build the schema model from a realistic API definition.

use std::path::PathBuf;

use bindsync_core::{MatchConfig, MethodKey};
use bindsync_schema::{build_schema_model, load_document};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_fixture_model_counts() {
    let doc = load_document(&fixture("api-definition.yaml")).expect("fixture should load");
    let model = build_schema_model(&doc, &MatchConfig::default());

    // drawRect, drawCircle, createSound, play, stop, clamp (x2), fromAngle.
    assert_eq!(model.global_functions.len(), 7);
    assert_eq!(model.global_functions.value_count(), 8);
    // Vec2.length, Vec2.normalize, Color.lerp.
    assert_eq!(model.object_methods.len(), 3);
    assert_eq!(
        model.callbacks.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["draw", "keyPressed", "setup"]
    );
}

#[test]
fn test_fixture_sound_category_is_method_bearing() {
    let doc = load_document(&fixture("api-definition.yaml")).unwrap();
    let model = build_schema_model(&doc, &MatchConfig::default());

    for name in ["createSound", "play", "stop"] {
        let entries = model.global_functions.get_str(name).unwrap();
        assert!(entries[0].is_object_method_candidate, "{name} should be a method candidate");
        assert_eq!(entries[0].candidate_types, vec!["Sound"]);
    }
    let draw_rect = &model.global_functions.get_str("drawRect").unwrap()[0];
    assert!(!draw_rect.is_object_method_candidate);
    assert_eq!(draw_rect.signatures.len(), 2);
}

#[test]
fn test_fixture_duplicate_clamp_kept() {
    let doc = load_document(&fixture("api-definition.yaml")).unwrap();
    let model = build_schema_model(&doc, &MatchConfig::default());

    let clamps = model.global_functions.get_str("clamp").unwrap();
    let categories: Vec<_> = clamps
        .iter()
        .map(|e| e.source_category.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(categories, vec!["Math", "Utility"]);
    assert_eq!(clamps[0].signatures[0].return_type, "float");
    assert_eq!(clamps[1].signatures[0].return_type, "int");
}

#[test]
fn test_fixture_type_methods() {
    let doc = load_document(&fixture("api-definition.yaml")).unwrap();
    let model = build_schema_model(&doc, &MatchConfig::default());

    let lerp = model
        .object_methods
        .get(&MethodKey::new("Color", "lerp"))
        .unwrap();
    assert_eq!(lerp[0].signatures[0].parameter_types, vec!["const Color &in", "float"]);
    assert!(!model
        .object_methods
        .contains_key(&MethodKey::new("Vec2", "internalData")));

    let from_angle = &model.global_functions.get_str("fromAngle").unwrap()[0];
    assert!(from_angle.is_static);
}

#[test]
fn test_model_is_deterministic() {
    let doc = load_document(&fixture("api-definition.yaml")).unwrap();
    let a = build_schema_model(&doc, &MatchConfig::default());
    let b = build_schema_model(&doc, &MatchConfig::default());
    assert_eq!(a, b);
}

#[test]
fn test_schema_entries_serialize() {
    let doc = load_document(&fixture("api-definition.yaml")).unwrap();
    let model = build_schema_model(&doc, &MatchConfig::default());
    let play = &model.global_functions.get_str("play").unwrap()[0];
    let json = serde_json::to_value(play).unwrap();
    assert_eq!(json["name"], "play");
    assert_eq!(json["source_category"], "Sound");
    assert_eq!(json["candidate_types"][0], "Sound");
    assert!(json.get("type_name").is_none());
}
