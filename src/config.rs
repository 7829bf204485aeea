//! JSON configuration: registry capacity, log level and trigger menus

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{register_builtin, FactoryRegistry, MenuFactory, TriggerMenu};
use crate::{TriggerError, MAX_FACTORIES};

fn default_capacity() -> usize {
    MAX_FACTORIES
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Top-level configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Maximum number of registered trigger factories
    #[serde(default = "default_capacity")]
    pub registry_capacity: usize,
    /// One of off, error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Menus registered as trigger variants, in order
    #[serde(default)]
    pub menus: Vec<TriggerMenu>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            registry_capacity: default_capacity(),
            log_level: default_log_level(),
            menus: Vec::new(),
        }
    }
}

impl TriggerConfig {
    /// Registry holding the built-in variants followed by every menu
    pub fn build_registry(&self) -> Result<FactoryRegistry, TriggerError> {
        let mut registry = FactoryRegistry::with_capacity(self.registry_capacity);
        register_builtin(&mut registry)?;
        for menu in &self.menus {
            let compiled = menu.compile()?;
            log::info!(
                "menu '{}' compiled with {} trigger classes",
                compiled.name(),
                compiled.len()
            );
            registry.register(Box::new(MenuFactory::new(compiled)))?;
        }
        Ok(registry)
    }

    /// Parsed log level, `Info` if unrecognised
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &str) -> Result<TriggerConfig, TriggerError> {
    let json = std::fs::read_to_string(path).map_err(|e| TriggerError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Save configuration as pretty JSON
pub fn save_config(config: &TriggerConfig, path: &str) -> Result<(), TriggerError> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).map_err(|e| TriggerError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MenuItem, ANY_FIRED_TRIGGER};
    use crate::types::{MenuReason, RegistryReason};

    #[test]
    fn test_defaults_from_empty_document() {
        let config: TriggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TriggerConfig::default());
        assert_eq!(config.registry_capacity, MAX_FACTORIES);
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_level_filter() {
        let config = TriggerConfig {
            log_level: "DEBUG".to_string(),
            ..TriggerConfig::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);

        let bad = TriggerConfig {
            log_level: "loud".to_string(),
            ..TriggerConfig::default()
        };
        assert_eq!(bad.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_build_registry_with_menus() {
        let config = TriggerConfig {
            menus: vec![TriggerMenu::new("MenuA").with_item(MenuItem::new("A", "MUON"))],
            ..TriggerConfig::default()
        };
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.names(), vec![ANY_FIRED_TRIGGER, "MenuA"]);
    }

    #[test]
    fn test_build_registry_capacity_exceeded() {
        let config = TriggerConfig {
            registry_capacity: 1,
            menus: vec![TriggerMenu::new("MenuA").with_item(MenuItem::new("A", "true"))],
            ..TriggerConfig::default()
        };
        assert!(matches!(
            config.build_registry(),
            Err(TriggerError::Registry(RegistryReason::R101_CAPACITY_EXCEEDED))
        ));
    }

    #[test]
    fn test_build_registry_bad_menu() {
        let config = TriggerConfig {
            menus: vec![TriggerMenu::new("Empty")],
            ..TriggerConfig::default()
        };
        assert!(matches!(
            config.build_registry(),
            Err(TriggerError::Menu(MenuReason::R303_EMPTY_MENU))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/nonexistent/hlt-trigger.json").unwrap_err();
        assert!(matches!(err, TriggerError::Io { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("hlt-trigger-config-{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = TriggerConfig {
            registry_capacity: 4,
            menus: vec![TriggerMenu::new("MenuA").with_item(MenuItem::new("A", "true").with_prescalar(5))],
            ..TriggerConfig::default()
        };
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
