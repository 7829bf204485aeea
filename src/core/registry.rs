//! Factory registry: create trigger variants by class name
//!
//! Bounded, ordered, unique by name. Duplicate names are rejected and
//! unregistering an unknown name reports `R104_NOT_REGISTERED`.

use crate::core::GlobalTrigger;
use crate::types::RegistryReason;
use crate::MAX_FACTORIES;

/// Builds new instances of one trigger variant
pub trait TriggerFactory: Send + Sync {
    /// Class name of the instances returned by `create`
    fn class_name(&self) -> &str;

    /// Create a fresh instance, owned by the caller
    fn create(&self) -> Box<dyn GlobalTrigger>;
}

/// Factory backed by a closure
pub struct FnFactory<F> {
    name: String,
    build: F,
}

impl<F> FnFactory<F>
where
    F: Fn() -> Box<dyn GlobalTrigger> + Send + Sync,
{
    pub fn new(name: impl Into<String>, build: F) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }
}

impl<F> TriggerFactory for FnFactory<F>
where
    F: Fn() -> Box<dyn GlobalTrigger> + Send + Sync,
{
    fn class_name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Box<dyn GlobalTrigger> {
        (self.build)()
    }
}

/// Ordered, fixed-capacity table of trigger factories
pub struct FactoryRegistry {
    capacity: usize,
    factories: Vec<Box<dyn TriggerFactory>>,
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("capacity", &self.capacity)
            .field("names", &self.names())
            .finish()
    }
}

impl FactoryRegistry {
    /// Create a registry holding up to `MAX_FACTORIES` factories
    pub fn new() -> Self {
        Self::with_capacity(MAX_FACTORIES)
    }

    /// Create a registry holding up to `capacity` factories
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            factories: Vec::with_capacity(capacity),
        }
    }

    /// Add a factory under its class name
    pub fn register(&mut self, factory: Box<dyn TriggerFactory>) -> Result<(), RegistryReason> {
        let name = factory.class_name();
        if name.trim().is_empty() {
            return Err(RegistryReason::R105_INVALID_NAME);
        }
        if self.contains(name) {
            log::warn!("cannot register '{}' [{}]", name, RegistryReason::R102_DUPLICATE_NAME);
            return Err(RegistryReason::R102_DUPLICATE_NAME);
        }
        if self.is_full() {
            log::error!(
                "cannot register '{}', {} of {} slots used [{}]",
                name,
                self.factories.len(),
                self.capacity,
                RegistryReason::R101_CAPACITY_EXCEEDED
            );
            return Err(RegistryReason::R101_CAPACITY_EXCEEDED);
        }
        log::debug!("registered trigger factory '{}'", name);
        self.factories.push(factory);
        Ok(())
    }

    /// Register a closure as the factory for `name`
    pub fn register_fn<F>(&mut self, name: impl Into<String>, build: F) -> Result<(), RegistryReason>
    where
        F: Fn() -> Box<dyn GlobalTrigger> + Send + Sync + 'static,
    {
        self.register(Box::new(FnFactory::new(name, build)))
    }

    /// Remove the factory registered as `name` and hand it back
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn TriggerFactory>, RegistryReason> {
        let index = self
            .position(name)
            .ok_or(RegistryReason::R104_NOT_REGISTERED)?;
        log::debug!("unregistered trigger factory '{}'", name);
        Ok(self.factories.remove(index))
    }

    /// Create a new instance of the variant registered as `name`
    pub fn create_new(&self, name: &str) -> Result<Box<dyn GlobalTrigger>, RegistryReason> {
        match self.factories.iter().find(|f| f.class_name() == name) {
            Some(factory) => Ok(factory.create()),
            None => {
                log::error!("no trigger factory for '{}' [{}]", name, RegistryReason::R103_UNKNOWN_VARIANT);
                Err(RegistryReason::R103_UNKNOWN_VARIANT)
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.factories.iter().position(|f| f.class_name() == name)
    }

    /// Is `name` registered? (exact, case-sensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registered class names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.class_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.factories.len() >= self.capacity
    }
}
