//! Configuration loading integration tests.

use serde_json::json;

use cue_engine::core::{EngineConfig, Point, ReferencePolicy, TickInput};
use cue_engine::engine::TriggerEngine;
use cue_engine::error::{EngineError, ValidationError};
use cue_engine::events::{EventDefinition, EventKind, EventStatus};
use cue_engine::flags::{CompareOp, FlagValue};
use cue_engine::triggers::{TriggerCondition, TriggerType};

const LEVEL_ONE: &str = r#"{
    "events": [
        { "id": "intro", "kind": "dialogue", "priority": 10, "content": { "line": "Wake up." } },
        { "id": "first_enemy", "kind": "spawn", "content": { "enemy": "slime", "count": 3 } },
        { "id": "boss", "kind": "boss" },
        { "id": "secret", "kind": "easter_egg" }
    ],
    "triggers": [
        { "id": "wake", "eventId": "intro", "type": "time", "condition": { "delayMs": 500 } },
        { "id": "cave_mouth", "eventId": "first_enemy", "type": "spatial",
          "condition": { "x": 0, "y": 0, "width": 64, "height": 32, "shape": "rectangle" } },
        { "id": "boss_gate", "eventId": "boss", "type": "flag",
          "condition": { "requiredFlags": [
              { "flag": "keys", "operator": ">=", "value": 3 },
              { "flag": "event_intro_completed", "operator": "==", "value": true }
          ] } },
        { "id": "peek", "eventId": "secret", "type": "viewport",
          "condition": { "x": 5000, "y": 5000, "width": 10, "height": 10 }, "oneTime": false }
    ]
}"#;

/// A full level document loads, and its triggers behave as declared.
#[test]
fn test_load_level_document() {
    let mut engine = TriggerEngine::new();
    let summary = engine.load_config(LEVEL_ONE).unwrap();

    assert_eq!(summary.events, 4);
    assert_eq!(summary.triggers, 4);

    let intro = engine.get_event(&"intro".into()).unwrap();
    assert_eq!(intro.priority, 10.0);
    assert_eq!(intro.content["line"], "Wake up.");
    assert_eq!(engine.get_event(&"boss".into()).unwrap().priority, 0.0);
    assert_eq!(
        engine.get_event(&"secret".into()).unwrap().kind,
        EventKind::Custom("easter_egg".into())
    );

    let gate = engine.get_trigger(&"boss_gate".into()).unwrap();
    assert_eq!(gate.trigger_type(), TriggerType::Flag);
    assert!(gate.one_time);
    assert!(!engine.get_trigger(&"peek".into()).unwrap().one_time);

    // Timer and region fire independently
    engine.advance(&TickInput::at(0));
    let fired = engine.advance(&TickInput::at(500).with_position(Point::new(32.0, 16.0)));
    let events: Vec<_> = fired.iter().map(|f| f.event_id.as_str()).collect();
    assert_eq!(events, vec!["intro", "first_enemy"]);

    // The gate needs both flags
    engine.set_flag("keys", 3);
    assert!(engine.advance(&TickInput::at(516)).is_empty());
    engine.complete_event(&"intro".into()).unwrap();
    let fired = engine.advance(&TickInput::at(532));
    assert_eq!(fired.len(), 1);
    assert_eq!(engine.get_event(&"boss".into()).unwrap().status, EventStatus::Active);
}

/// Sections may be loaded from separate documents.
#[test]
fn test_load_in_parts() {
    let mut engine = TriggerEngine::new();
    engine
        .load_config_value(json!({ "events": [{ "id": "door", "kind": "tutorial" }] }))
        .unwrap();
    engine
        .load_config_value(json!({
            "triggers": [{ "id": "t", "eventId": "door", "type": "time", "condition": { "delayMs": 1 } }]
        }))
        .unwrap();

    assert_eq!(engine.all_events().len(), 1);
    assert_eq!(engine.all_triggers().len(), 1);
}

/// The second entry of a bad document is named in the error.
#[test]
fn test_error_names_entry() {
    let mut engine = TriggerEngine::new();
    let err = engine
        .load_config_value(json!({
            "events": [{ "id": "a", "kind": "spawn" }],
            "triggers": [
                { "id": "ok", "eventId": "a", "type": "time", "condition": { "delayMs": 1 } },
                { "id": "bad", "eventId": "a", "type": "flag", "condition": { "requiredFlags": [] } }
            ]
        }))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("triggers[1] (\"bad\")"), "{message}");
    assert!(engine.all_events().is_empty());
}

/// Unknown condition fields are rejected.
#[test]
fn test_unknown_condition_field_rejected() {
    let mut engine = TriggerEngine::new();
    let err = engine
        .load_config_value(json!({
            "triggers": [{ "id": "t", "eventId": "e", "type": "time",
                           "condition": { "delayMs": 5, "repeat": true } }]
        }))
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(ValidationError::InvalidEntry { .. })));
}

/// Unknown operators are rejected.
#[test]
fn test_unknown_operator_rejected() {
    let mut engine = TriggerEngine::new();
    let result = engine.load_config_value(json!({
        "triggers": [{ "id": "t", "eventId": "e", "type": "flag",
                       "condition": { "requiredFlags": [{ "flag": "x", "operator": "~=", "value": 1 }] } }]
    }));
    assert!(result.is_err());
}

/// Strict references reject triggers for undefined events.
#[test]
fn test_reject_dangling_reference() {
    let config = EngineConfig::default().with_reference_policy(ReferencePolicy::Reject);
    let mut engine = TriggerEngine::with_config(config);

    let doc = json!({
        "triggers": [{ "id": "t", "eventId": "later", "type": "time", "condition": { "delayMs": 1 } }]
    });
    let err = engine.load_config_value(doc.clone()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::DanglingReference { .. })
    ));

    engine.register_event(EventDefinition::new("later", "spawn"));
    assert!(engine.load_config_value(doc).is_ok());
}

/// Loading an id that already exists replaces it and resets its state.
#[test]
fn test_reload_replaces_entries() {
    let mut engine = TriggerEngine::new();
    engine.load_config(LEVEL_ONE).unwrap();
    engine.trigger_event(&"intro".into()).unwrap();

    let summary = engine
        .load_config_value(json!({
            "events": [{ "id": "intro", "kind": "dialogue", "priority": 1 }],
            "triggers": [{ "id": "peek", "eventId": "secret", "type": "time", "condition": { "delayMs": 9 } }]
        }))
        .unwrap();

    assert_eq!(summary.replaced_events, 1);
    assert_eq!(summary.replaced_triggers, 1);
    let intro = engine.get_event(&"intro".into()).unwrap();
    assert_eq!(intro.status, EventStatus::Registered);
    assert_eq!(intro.priority, 1.0);
    assert_eq!(engine.get_trigger(&"peek".into()).unwrap().condition, TriggerCondition::after(9));
    assert_eq!(engine.all_triggers().len(), 4);
}

/// Flag values in documents keep their JSON types.
#[test]
fn test_flag_values_from_json() {
    let mut engine = TriggerEngine::new();
    engine
        .load_config_value(json!({
            "events": [{ "id": "e", "kind": "spawn" }],
            "triggers": [{ "id": "t", "eventId": "e", "type": "flag",
                           "condition": { "requiredFlags": [{ "flag": "zone", "operator": "!=", "value": "town" }] } }]
        }))
        .unwrap();

    let TriggerCondition::Flag(condition) = &engine.get_trigger(&"t".into()).unwrap().condition else {
        panic!("Expected a flag condition");
    };
    assert_eq!(condition.required_flags[0].operator, CompareOp::Ne);
    assert_eq!(condition.required_flags[0].value, FlagValue::Text("town".into()));

    // Unset compares unequal
    assert_eq!(engine.advance(&TickInput::at(0)).len(), 1);
}
