//! Process-wide factory registry
//!
//! Meant to be filled once during start-up, before worker threads exist, and
//! only read afterwards. The lock keeps misuse memory-safe but does not make
//! concurrent registration a supported pattern.

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::core::{FactoryRegistry, GlobalTrigger, TriggerFactory};
use crate::types::RegistryReason;

lazy_static! {
    static ref REGISTRY: RwLock<FactoryRegistry> = RwLock::new(FactoryRegistry::new());
}

/// Add a factory to the process-wide registry
pub fn register(factory: Box<dyn TriggerFactory>) -> Result<(), RegistryReason> {
    REGISTRY.write().register(factory)
}

/// Register a closure as the process-wide factory for `name`
pub fn register_fn<F>(name: impl Into<String>, build: F) -> Result<(), RegistryReason>
where
    F: Fn() -> Box<dyn GlobalTrigger> + Send + Sync + 'static,
{
    REGISTRY.write().register_fn(name, build)
}

/// Remove the factory registered as `name`
pub fn unregister(name: &str) -> Result<(), RegistryReason> {
    REGISTRY.write().unregister(name).map(|_| ())
}

/// Create a new instance of the variant registered as `name`
pub fn create_new(name: &str) -> Result<Box<dyn GlobalTrigger>, RegistryReason> {
    REGISTRY.read().create_new(name)
}

/// Registered class names in registration order
pub fn names() -> Vec<String> {
    REGISTRY.read().names().into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AnyFiredTrigger;

    // Tests share one process-wide registry; keep names unique per test.

    #[test]
    fn test_global_register_create_unregister() {
        register_fn("GlobalUnitA", || Box::new(AnyFiredTrigger::with_name("GlobalUnitA"))).unwrap();
        assert!(names().contains(&"GlobalUnitA".to_string()));

        let trigger = create_new("GlobalUnitA").unwrap();
        assert_eq!(trigger.class_name(), "GlobalUnitA");

        unregister("GlobalUnitA").unwrap();
        assert_eq!(
            create_new("GlobalUnitA").err(),
            Some(RegistryReason::R103_UNKNOWN_VARIANT)
        );
        assert_eq!(
            unregister("GlobalUnitA"),
            Err(RegistryReason::R104_NOT_REGISTERED)
        );
    }
}
