//! Synchronization controller scenarios
//!
//! Drives a controller the way the two surfaces would: text replacements
//! from the text surface, structural operations from the form surface.

mod fixtures;

use manifest_sync::config::{EditorSettings, EffectiveConfig};
use manifest_sync::schema::{FormConstant, FormField, FormValidator, OnMatch, ValidatorFactory};
use manifest_sync::session;
use manifest_sync::source::{BundledSample, InitialManifest, ManifestFile};
use manifest_sync::sync::{FormError, FormOp, Propagation, SyncController, SyncError, SyncState};
use manifest_sync::transform;
use std::fs::File;
use std::io::BufReader;

fn started(name: &str) -> SyncController {
    let mut ctl = SyncController::default();
    let p = ctl.start(&ManifestFile::new(fixtures::manifest_path(name))).unwrap();
    assert!(matches!(p, Propagation::FormUpdated { .. }));
    ctl
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn test_start_from_bundled_sample() {
    let mut ctl = SyncController::default();
    let p = ctl.start(&BundledSample).unwrap();

    assert_eq!(p, Propagation::FormUpdated { fields: 3 });
    assert_eq!(ctl.text(), BundledSample.load().unwrap());
    assert_eq!(ctl.form().fields[1].constants[0], FormConstant::new("clientSecret", "c2VjcmV0", true));
}

#[test]
fn test_start_from_missing_file_fails() {
    let mut ctl = SyncController::default();
    assert!(ctl.start(&ManifestFile::new("/nonexistent/manifest.json")).is_err());
    assert_eq!(ctl.state(), SyncState::Quiescent);
}

// =============================================================================
// Decode fallback
// =============================================================================

#[test]
fn test_fallback_inputs_yield_identical_reset_form() {
    let reset = {
        let mut ctl = SyncController::default();
        ctl.on_text("not json");
        ctl.form().clone()
    };
    assert_eq!(reset.fields, vec![FormField::named("test")]);

    for text in [
        "{}".to_string(),
        String::new(),
        fixtures::manifest_text("no_fields.json"),
    ] {
        let mut ctl = started("ordered.json");
        let p = ctl.on_text(text.clone());
        assert!(matches!(p, Propagation::FormReset { .. }));
        assert_eq!(ctl.form(), &reset);
        // malformed text stays as typed
        assert_eq!(ctl.text(), text);
    }
}

#[test]
fn test_user_keeps_correcting_text() {
    let mut ctl = started("ordered.json");

    ctl.on_text("{\"manifest\": {\"data\"");
    assert_eq!(ctl.form().fields.len(), 1);

    let fixed = r#"{"manifest": {"data": {"fields": {"z": {"inputName": "z"}}}}}"#;
    assert_eq!(ctl.on_text(fixed), Propagation::FormUpdated { fields: 1 });
    assert_eq!(ctl.form().fields[0].name, "z");
    assert_eq!(ctl.text(), fixed);
}

// =============================================================================
// Form -> text
// =============================================================================

#[test]
fn test_noop_edit_is_idempotent() {
    let mut ctl = started("ordered.json");
    // first form edit puts canonical text in place
    ctl.apply(FormOp::SetFieldLabel { field: 0, value: "B".into() }).unwrap();
    let form_before = ctl.form().clone();
    let text_before = ctl.text().to_string();

    ctl.apply(FormOp::SetFieldName { field: 0, value: "b".into() }).unwrap();

    assert_eq!(ctl.form(), &form_before);
    assert_eq!(ctl.text(), text_before);
}

#[test]
fn test_noop_edit_on_canonical_start_text() {
    let mut ctl = started("ordered.json");
    let original = fixtures::manifest_text("ordered.json");

    ctl.apply(FormOp::SetFieldName { field: 1, value: "a".into() }).unwrap();
    assert_eq!(ctl.text(), original.trim_end());
}

#[test]
fn test_validator_variant_isolation_in_text() {
    let mut ctl = started("ordered.json");
    ctl.apply(FormOp::AddValidator { field: 0 }).unwrap();
    ctl.apply(FormOp::SetValidatorFactory { field: 0, validator: 0, factory: ValidatorFactory::Length })
        .unwrap();
    ctl.apply(FormOp::SetMinLength { field: 0, validator: 0, value: 2 }).unwrap();
    ctl.apply(FormOp::SetMaxLength { field: 0, validator: 0, value: 10 }).unwrap();
    assert_eq!(
        ctl.form().fields[0].validators[0],
        FormValidator::Length { min_length: Some(2), max_length: Some(10) }
    );

    ctl.apply(FormOp::SetValidatorFactory { field: 0, validator: 0, factory: ValidatorFactory::Regex })
        .unwrap();
    assert_eq!(
        ctl.form().fields[0].validators[0],
        FormValidator::Regex { regex: Some(String::new()), on_match: Some(OnMatch::Pass) }
    );

    let document = transform::parse_document(ctl.text()).unwrap();
    let validator = serde_json::to_value(&document.fields()["b"].validators[0]).unwrap();
    assert_eq!(validator, serde_json::json!({"factory": "regex", "value": "", "onMatch": "pass"}));
}

#[test]
fn test_text_and_form_stay_consistent() {
    let mut ctl = started("rich.json");
    let ops = vec![
        FormOp::AddField,
        FormOp::SetFieldInputName { field: 1, value: "extra".into() },
        FormOp::AddConstant { field: 1 },
        FormOp::ToggleConstantSecure { field: 1, constant: 0 },
        FormOp::DeleteConstant { field: 0, constant: 1 },
        FormOp::DeleteValidator { field: 0, validator: 0 },
        FormOp::SetEnumValues { field: 0, validator: 2, values: vec!["only".into()] },
    ];

    for op in ops {
        ctl.apply(op).unwrap();
        let reparsed = transform::decode_text(ctl.text()).unwrap();
        assert_eq!(&reparsed, ctl.form());
        assert_eq!(ctl.state(), SyncState::Quiescent);
    }

    let document = transform::parse_document(ctl.text()).unwrap();
    let extra = &document.fields()["1. Field"];
    assert_eq!(extra.input_name, "extra");
    assert_eq!(extra.constants.get("1. const:enc").map(String::as_str), Some(""));
}

#[test]
fn test_out_of_range_is_invariant_violation() {
    let mut ctl = started("ordered.json");
    let text = ctl.text().to_string();

    let err = ctl
        .apply(FormOp::SetConstantValue { field: 0, constant: 3, value: "x".into() })
        .unwrap_err();
    assert!(matches!(
        err,
        SyncError::Form(FormError::ConstantOutOfRange { field: 0, index: 3, len: 0 })
    ));
    assert_eq!(ctl.text(), text);
    assert_eq!(ctl.state(), SyncState::Quiescent);
}

// =============================================================================
// Echo suppression
// =============================================================================

#[test]
fn test_emitted_text_echo_does_not_redecode() {
    let mut ctl = started("ordered.json");
    ctl.apply(FormOp::AddField).unwrap();
    let text = ctl.text().to_string();

    assert_eq!(ctl.on_text(text.clone()), Propagation::Suppressed);
    assert_eq!(ctl.text(), text);
    assert_eq!(ctl.form().fields.len(), 3);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_settings_drive_placeholders_and_defaults() {
    let overrides = serde_json::json!({
        "placeholders": {"field": "field_{index}"},
        "reset": {"field_name": "blank"},
        "validators": {"length_min": 1, "length_max": 8, "on_match": "fail"},
        "output": {"indent": 4}
    });
    let settings: EditorSettings = EffectiveConfig::build(None, Some(overrides))
        .unwrap()
        .settings()
        .unwrap();
    let mut ctl = SyncController::new(settings);

    ctl.on_text("garbage");
    assert_eq!(ctl.form().fields[0].name, "blank");

    ctl.apply(FormOp::AddField).unwrap();
    assert_eq!(ctl.form().fields[1].name, "field_1");
    assert!(ctl.text().starts_with("{\n    \"manifest\""));

    ctl.apply(FormOp::AddValidator { field: 0 }).unwrap();
    ctl.apply(FormOp::SetValidatorFactory { field: 0, validator: 0, factory: ValidatorFactory::Length })
        .unwrap();
    assert_eq!(
        ctl.form().fields[0].validators[0],
        FormValidator::Length { min_length: Some(1), max_length: Some(8) }
    );
    ctl.apply(FormOp::SetValidatorFactory { field: 0, validator: 0, factory: ValidatorFactory::Regex })
        .unwrap();
    assert_eq!(
        ctl.form().fields[0].validators[0],
        FormValidator::Regex { regex: Some(String::new()), on_match: Some(OnMatch::Fail) }
    );
}

// =============================================================================
// Scripted session
// =============================================================================

#[test]
fn test_scripted_session() {
    let mut ctl = started("ordered.json");
    let file = File::open(fixtures::session_path("edit.jsonl")).unwrap();
    let events = session::parse_script(BufReader::new(file)).unwrap();
    let reports = session::replay(&mut ctl, events).unwrap();

    assert_eq!(reports.len(), 10);
    assert!(reports.iter().all(|r| r.state == SyncState::Quiescent));

    // after the secure toggle
    assert!(matches!(reports[3].propagation, Propagation::TextUpdated { .. }));
    // broken paste
    assert!(matches!(reports[7].propagation, Propagation::FormReset { .. }));
    assert_eq!(reports[7].fields, 1);
    // fixed paste
    assert_eq!(reports[8].propagation, Propagation::FormUpdated { fields: 1 });

    assert_eq!(ctl.form().fields[0].name, "only");
    assert_eq!(ctl.form().fields[0].label, "Only");
    let document = transform::parse_document(ctl.text()).unwrap();
    assert_eq!(document.fields()["only"].ui.label, "Only");
}

#[test]
fn test_scripted_session_state_before_broken_paste() {
    let mut ctl = started("ordered.json");
    let file = File::open(fixtures::session_path("edit.jsonl")).unwrap();
    let events = session::parse_script(BufReader::new(file)).unwrap();
    // replay only the form edits
    session::replay(&mut ctl, events.into_iter().take(7).collect()).unwrap();

    let form = ctl.form();
    assert_eq!(form.fields[0].constants, vec![FormConstant::new("token", "abc", true)]);
    assert_eq!(
        form.fields[1].validators,
        vec![FormValidator::Length { min_length: Some(0), max_length: Some(12) }]
    );

    let document = transform::parse_document(ctl.text()).unwrap();
    assert_eq!(document.fields()["b"].constants.get("token:enc").map(String::as_str), Some("abc"));
}
