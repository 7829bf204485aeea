//! Menu-driven trigger variant
//!
//! A [`TriggerMenu`] is compiled once into a [`CompiledMenu`], shared by every
//! [`MenuTrigger`] its [`MenuFactory`] creates. Each item owns one counter:
//! the counter advances whenever the item's condition holds, and the item fires
//! on the first match and every `prescalar`-th match after it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{Condition, EventAccumulator, GlobalTrigger, TriggerFactory};
use crate::types::{
    DataType, EventCounters, EventState, GlobalTriggerDecision, InputReason, MenuReason,
    Specification, TriggerDecision,
};
use crate::{DEFAULT_MENU_DESCRIPTION, DEFAULT_PRESCALAR};

fn default_prescalar() -> u32 {
    DEFAULT_PRESCALAR
}

fn default_description() -> String {
    DEFAULT_MENU_DESCRIPTION.to_string()
}

/// One trigger class in a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Trigger class name reported when this item fires
    pub trigger_class: String,
    /// Condition expression (see [`Condition`])
    pub condition: String,
    /// Fire on every N-th match; 0 behaves like 1
    #[serde(default = "default_prescalar")]
    pub prescalar: u32,
    /// Description used when this item fires (defaults to the class name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    pub fn new(trigger_class: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            trigger_class: trigger_class.into(),
            condition: condition.into(),
            prescalar: DEFAULT_PRESCALAR,
            description: None,
        }
    }

    pub fn with_prescalar(mut self, prescalar: u32) -> Self {
        self.prescalar = prescalar;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Trigger menu as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerMenu {
    /// Class name the menu registers under
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
    /// Description when nothing fired
    #[serde(default = "default_description")]
    pub default_description: String,
}

impl TriggerMenu {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            default_description: default_description(),
        }
    }

    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    /// Check names and parse every condition
    pub fn compile(&self) -> Result<CompiledMenu, MenuReason> {
        if self.name.trim().is_empty() {
            return Err(MenuReason::R304_UNNAMED);
        }
        if self.items.is_empty() {
            return Err(MenuReason::R303_EMPTY_MENU);
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if item.trigger_class.trim().is_empty() {
                return Err(MenuReason::R304_UNNAMED);
            }
            if !seen.insert(item.trigger_class.as_str()) {
                return Err(MenuReason::R302_DUPLICATE_ITEM(item.trigger_class.clone()));
            }
            let condition: Condition =
                item.condition
                    .parse()
                    .map_err(|detail| MenuReason::R301_CONDITION_SYNTAX {
                        item: item.trigger_class.clone(),
                        detail,
                    })?;
            items.push(CompiledItem {
                trigger_class: item.trigger_class.clone(),
                condition,
                prescalar: item.prescalar.max(1),
                description: item
                    .description
                    .clone()
                    .unwrap_or_else(|| item.trigger_class.clone()),
            });
        }

        Ok(CompiledMenu {
            name: self.name.clone(),
            items,
            default_description: self.default_description.clone(),
        })
    }
}

#[derive(Debug, Clone)]
struct CompiledItem {
    trigger_class: String,
    condition: Condition,
    prescalar: u32,
    description: String,
}

/// Menu with parsed conditions, ready to evaluate
#[derive(Debug, Clone)]
pub struct CompiledMenu {
    name: String,
    items: Vec<CompiledItem>,
    default_description: String,
}

impl CompiledMenu {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trigger class names in counter order
    pub fn trigger_classes(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.trigger_class.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Trigger variant interpreting a compiled menu
#[derive(Debug, Clone)]
pub struct MenuTrigger {
    menu: Arc<CompiledMenu>,
    events: EventAccumulator,
    counters: EventCounters,
}

impl MenuTrigger {
    pub fn new(menu: Arc<CompiledMenu>) -> Self {
        let counters = EventCounters::new(menu.len());
        Self {
            menu,
            events: EventAccumulator::new(),
            counters,
        }
    }

    pub fn menu(&self) -> &CompiledMenu {
        &self.menu
    }
}

impl GlobalTrigger for MenuTrigger {
    fn class_name(&self) -> &str {
        &self.menu.name
    }

    fn new_event(&mut self) {
        self.events.reset();
    }

    fn add_decision(&mut self, decision: &TriggerDecision) {
        let _ = self.events.add_decision(decision);
    }

    fn add_object(
        &mut self,
        payload: &serde_json::Value,
        data_type: &DataType,
        spec: Specification,
    ) {
        let _ = self.events.add_object(payload, data_type, spec);
    }

    fn reject_input(&mut self, reason: InputReason) {
        self.events.ignore(reason);
    }

    fn calculate_trigger_decision(&mut self) -> GlobalTriggerDecision {
        if let Some(done) = self.events.computed() {
            return done.clone();
        }

        let mut classes = Vec::new();
        let mut descriptions = Vec::new();
        for (index, item) in self.menu.items.iter().enumerate() {
            if !item.condition.evaluate(&self.events) {
                continue;
            }
            match self.counters.increment(index) {
                Ok(count) if (count - 1) % u64::from(item.prescalar) == 0 => {
                    classes.push(item.trigger_class.clone());
                    descriptions.push(item.description.as_str());
                }
                Ok(count) => {
                    log::debug!(
                        "'{}' matched but prescaled ({} of {})",
                        item.trigger_class,
                        count,
                        item.prescalar
                    );
                }
                Err(reason) => log::warn!("'{}' not counted [{}]", item.trigger_class, reason),
            }
        }

        let fired = !classes.is_empty();
        let description = if fired {
            descriptions.join(", ")
        } else {
            self.menu.default_description.clone()
        };

        let decision = GlobalTriggerDecision::new(
            self.menu.name.clone(),
            fired,
            classes,
            description,
            self.events.decisions().to_vec(),
            self.events.has_inputs(),
        )
        .with_counters(self.counters.as_slice());
        self.events.finish(decision)
    }

    fn counters(&self) -> &EventCounters {
        &self.counters
    }

    fn state(&self) -> EventState {
        self.events.state()
    }

    fn ignored_inputs(&self) -> u64 {
        self.events.ignored()
    }
}

/// Factory producing [`MenuTrigger`]s for one compiled menu
#[derive(Debug, Clone)]
pub struct MenuFactory {
    menu: Arc<CompiledMenu>,
}

impl MenuFactory {
    pub fn new(menu: CompiledMenu) -> Self {
        Self {
            menu: Arc::new(menu),
        }
    }
}

impl TriggerFactory for MenuFactory {
    fn class_name(&self) -> &str {
        &self.menu.name
    }

    fn create(&self) -> Box<dyn GlobalTrigger> {
        Box::new(MenuTrigger::new(Arc::clone(&self.menu)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> TriggerMenu {
        TriggerMenu::new("PhysicsMenu")
            .with_item(MenuItem::new("MUON_OR_PHOS", "MUON || CLUSTERS:PHOS").with_description("Muon or photon"))
            .with_item(MenuItem::new("MINBIAS", "true").with_prescalar(3))
    }

    fn trigger() -> MenuTrigger {
        MenuTrigger::new(Arc::new(menu().compile().unwrap()))
    }

    #[test]
    fn test_compile_rejects_bad_menus() {
        assert_eq!(TriggerMenu::new("").compile().err(), Some(MenuReason::R304_UNNAMED));
        assert_eq!(TriggerMenu::new("M").compile().err(), Some(MenuReason::R303_EMPTY_MENU));

        let dup = TriggerMenu::new("M")
            .with_item(MenuItem::new("A", "true"))
            .with_item(MenuItem::new("A", "false"));
        assert_eq!(
            dup.compile().err(),
            Some(MenuReason::R302_DUPLICATE_ITEM("A".to_string()))
        );

        let bad = TriggerMenu::new("M").with_item(MenuItem::new("A", "X &&"));
        assert!(matches!(
            bad.compile(),
            Err(MenuReason::R301_CONDITION_SYNTAX { .. })
        ));
    }

    #[test]
    fn test_counters_declared_per_item() {
        let trigger = trigger();
        assert_eq!(trigger.counters().len(), 2);
        assert_eq!(trigger.menu().trigger_classes(), vec!["MUON_OR_PHOS", "MINBIAS"]);
    }

    #[test]
    fn test_item_fires_on_decision() {
        let mut trigger = trigger();
        trigger.new_event();
        trigger.add_decision(&TriggerDecision::new("MUON", true));
        let decision = trigger.calculate_trigger_decision();
        assert!(decision.fired);
        assert_eq!(decision.trigger_classes, vec!["MUON_OR_PHOS", "MINBIAS"]);
        assert_eq!(decision.description, "Muon or photon, MINBIAS");
    }

    #[test]
    fn test_item_fires_on_object() {
        let mut trigger = trigger();
        trigger.new_event();
        let phos: DataType = "CLUSTERS:PHOS".parse().unwrap();
        trigger.add_object(&serde_json::json!({"energy": 3.1}), &phos, 0x1);
        let decision = trigger.calculate_trigger_decision();
        assert!(decision.trigger_classes.contains(&"MUON_OR_PHOS".to_string()));
        assert_eq!(decision.contributing_count(), 0);
    }

    #[test]
    fn test_prescalar_fires_every_third_match() {
        let mut trigger = trigger();
        let mut fired = Vec::new();
        for _ in 0..6 {
            trigger.new_event();
            let decision = trigger.calculate_trigger_decision();
            fired.push(decision.trigger_classes.contains(&"MINBIAS".to_string()));
        }
        assert_eq!(fired, vec![true, false, false, true, false, false]);
        assert_eq!(trigger.counters().get(1), Some(6));
    }

    #[test]
    fn test_zero_prescalar_behaves_like_one() {
        let menu = TriggerMenu::new("M").with_item(MenuItem::new("A", "true").with_prescalar(0));
        let mut trigger = MenuTrigger::new(Arc::new(menu.compile().unwrap()));
        for _ in 0..3 {
            trigger.new_event();
            assert!(trigger.calculate_trigger_decision().fired);
        }
    }

    #[test]
    fn test_nothing_fired_uses_default_description() {
        let menu = TriggerMenu::new("M").with_item(MenuItem::new("A", "MUON"));
        let mut trigger = MenuTrigger::new(Arc::new(menu.compile().unwrap()));
        trigger.new_event();
        trigger.add_decision(&TriggerDecision::new("MUON", false));
        let decision = trigger.calculate_trigger_decision();
        assert!(!decision.fired);
        assert_eq!(decision.description, DEFAULT_MENU_DESCRIPTION);
        assert_eq!(trigger.counters().get(0), Some(0));
    }

    #[test]
    fn test_factory_shares_menu_not_counters() {
        let factory = MenuFactory::new(menu().compile().unwrap());
        let mut a = factory.create();
        let b = factory.create();
        a.new_event();
        a.calculate_trigger_decision();
        assert_eq!(a.counters().get(1), Some(1));
        assert_eq!(b.counters().get(1), Some(0));
        assert_eq!(factory.class_name(), "PhysicsMenu");
    }

    #[test]
    fn test_menu_from_json() {
        let json = r#"{
            "name": "MenuFromJson",
            "items": [{"trigger_class": "HM", "condition": "TRACKS:TPC/0x3"}]
        }"#;
        let menu: TriggerMenu = serde_json::from_str(json).unwrap();
        assert_eq!(menu.items[0].prescalar, DEFAULT_PRESCALAR);
        assert_eq!(menu.default_description, DEFAULT_MENU_DESCRIPTION);
        assert!(menu.compile().is_ok());
    }
}
