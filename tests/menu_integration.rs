//! Integration tests for menu-driven triggers
//!
//! Config → registry → MenuTrigger → decisions over several events.

use hlt_trigger::config::TriggerConfig;
use hlt_trigger::core::{MenuItem, TriggerMenu, ANY_FIRED_TRIGGER};
use hlt_trigger::types::{DataType, EventState, TriggerDecision, TriggerReason};
use hlt_trigger::TriggerError;
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"{
    "registry_capacity": 4,
    "log_level": "warn",
    "menus": [
        {
            "name": "PhysicsMenu",
            "default_description": "Rejected",
            "items": [
                {"trigger_class": "DIMUON", "condition": "MUON_LEFT && MUON_RIGHT", "description": "Dimuon"},
                {"trigger_class": "PHOS_HIGH", "condition": "CLUSTERS:PHOS/0x1 && !VETO"},
                {"trigger_class": "MINBIAS", "condition": "true", "prescalar": 2}
            ]
        },
        {
            "name": "MenuA",
            "items": [{"trigger_class": "ANY", "condition": "L0 || L1 || L2"}]
        }
    ]
}"#;

fn config() -> TriggerConfig {
    serde_json::from_str(CONFIG).unwrap()
}

fn phos() -> DataType {
    "CLUSTERS:PHOS".parse().unwrap()
}

#[test]
fn test_config_registers_menus_after_builtin() {
    let registry = config().build_registry().unwrap();
    assert_eq!(registry.names(), vec![ANY_FIRED_TRIGGER, "PhysicsMenu", "MenuA"]);
    assert_eq!(registry.capacity(), 4);
    assert_eq!(config().level_filter(), log::LevelFilter::Warn);
}

#[test]
fn test_physics_menu_over_events() {
    let registry = config().build_registry().unwrap();
    let mut trigger = registry.create_new("PhysicsMenu").unwrap();
    assert_eq!(trigger.counters().len(), 3);

    // Event 1: dimuon, minbias fires (first match)
    trigger.new_event();
    trigger.add_decision(&TriggerDecision::new("MUON_LEFT", true));
    trigger.add_decision(&TriggerDecision::new("MUON_RIGHT", true));
    let d1 = trigger.calculate_trigger_decision();
    assert_eq!(d1.trigger_classes, vec!["DIMUON", "MINBIAS"]);
    assert_eq!(d1.description, "Dimuon, MINBIAS");

    // Event 2: PHOS object in partition 0x1, objects and decisions interleaved;
    // minbias prescaled away
    trigger.new_event();
    trigger.add_decision(&TriggerDecision::new("MUON_LEFT", true));
    trigger.add_object(&serde_json::json!({"e": 4.2}), &phos(), 0x1);
    trigger.add_decision(&TriggerDecision::new("VETO", false));
    let d2 = trigger.calculate_trigger_decision();
    assert_eq!(d2.trigger_classes, vec!["PHOS_HIGH"]);
    assert!(d2.fired);

    // Event 3: vetoed PHOS, minbias fires again
    trigger.new_event();
    trigger.add_object(&serde_json::Value::Null, &phos(), 0x1);
    trigger.add_decision(&TriggerDecision::new("VETO", true));
    let d3 = trigger.calculate_trigger_decision();
    assert_eq!(d3.trigger_classes, vec!["MINBIAS"]);

    // DIMUON 1, PHOS_HIGH 1, MINBIAS matched 3 times
    assert_eq!(trigger.counters().as_slice(), &[1, 1, 3]);
    assert_eq!(d3.counters, vec![1, 1, 3]);
}

#[test]
fn test_wrong_spec_does_not_match() {
    let registry = config().build_registry().unwrap();
    let mut trigger = registry.create_new("PhysicsMenu").unwrap();
    trigger.new_event();
    trigger.add_object(&serde_json::Value::Null, &phos(), 0x2);
    let decision = trigger.calculate_trigger_decision();
    assert!(!decision.trigger_classes.contains(&"PHOS_HIGH".to_string()));
}

#[test]
fn test_compute_twice_is_idempotent() {
    let registry = config().build_registry().unwrap();
    let mut trigger = registry.create_new("PhysicsMenu").unwrap();
    trigger.new_event();
    trigger.add_decision(&TriggerDecision::new("MUON_LEFT", true));
    trigger.add_decision(&TriggerDecision::new("MUON_RIGHT", true));

    let first = trigger.calculate_trigger_decision();
    let second = trigger.calculate_trigger_decision();

    assert_eq!(first.trigger_classes, second.trigger_classes);
    assert_eq!(first.counters, second.counters);
    assert_eq!(trigger.counters().as_slice(), &[1, 0, 1]);
}

#[test]
fn test_late_input_is_ignored() {
    let registry = config().build_registry().unwrap();
    let mut trigger = registry.create_new("MenuA").unwrap();
    trigger.new_event();
    let before = trigger.calculate_trigger_decision();
    trigger.add_decision(&TriggerDecision::new("L0", true));

    assert_eq!(trigger.ignored_inputs(), 1);
    assert_eq!(trigger.state(), EventState::Computed);
    assert!(!trigger.calculate_trigger_decision().fired);
    assert_eq!(before.reason, TriggerReason::R002_NO_INPUTS);
}

#[test]
fn test_menu_a_scenarios() {
    let registry = config().build_registry().unwrap();
    let mut trigger = registry.create_new("MenuA").unwrap();

    trigger.new_event();
    trigger.add_decision(&TriggerDecision::new("L1", true));
    assert!(trigger.calculate_trigger_decision().fired);

    trigger.new_event();
    trigger.add_decision(&TriggerDecision::new("L0", false));
    trigger.add_decision(&TriggerDecision::new("L2", false));
    let quiet = trigger.calculate_trigger_decision();
    assert!(!quiet.fired);
    assert_eq!(quiet.reason, TriggerReason::R001_NOT_FIRED);
}

#[test]
fn test_bad_condition_in_config() {
    let config = TriggerConfig {
        menus: vec![TriggerMenu::new("Broken").with_item(MenuItem::new("X", "A && (B"))],
        ..TriggerConfig::default()
    };
    let err = config.build_registry().unwrap_err();
    assert!(matches!(err, TriggerError::Menu(_)));
    assert!(err.to_string().starts_with("R301_CONDITION_SYNTAX"));
}
