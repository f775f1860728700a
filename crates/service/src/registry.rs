//! Method handler registry.
//!
//! Maps a method name to exactly one handler. The registry is populated while
//! its owning service is constructed and is read-only afterwards, so lookups
//! need no locking.

use crate::errors::{ConfigurationError, HandlerNotFound};
use std::collections::HashMap;

pub struct HandlerRegistry<H: ?Sized> {
    /// Service kind used in error messages, e.g. "DID".
    kind: &'static str,
    handlers: HashMap<String, Box<H>>,
}

impl<H: ?Sized> HandlerRegistry<H> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            handlers: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register `handler` under `method`. A second registration for the same
    /// name is a configuration error.
    pub fn register(
        &mut self,
        method: impl Into<String>,
        handler: Box<H>,
    ) -> Result<(), ConfigurationError> {
        let method = method.into();
        if self.handlers.contains_key(&method) {
            return Err(ConfigurationError::DuplicateHandler {
                kind: self.kind,
                method,
            });
        }
        self.handlers.insert(method, handler);
        Ok(())
    }

    pub fn resolve(&self, method: &str) -> Result<&H, HandlerNotFound> {
        self.handlers
            .get(method)
            .map(Box::as_ref)
            .ok_or_else(|| HandlerNotFound {
                kind: self.kind,
                method: method.to_string(),
            })
    }

    /// Names of every registered method, sorted.
    pub fn supported_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.handlers.keys().cloned().collect();
        methods.sort();
        methods
    }

    pub fn handlers(&self) -> impl Iterator<Item = &H> {
        self.handlers.values().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Fixed(&'static str);

    impl Greeter for Fixed {
        fn greet(&self) -> String {
            self.0.to_string()
        }
    }

    fn registry() -> HandlerRegistry<dyn Greeter> {
        let mut registry: HandlerRegistry<dyn Greeter> = HandlerRegistry::new("DID");
        registry.register("key", Box::new(Fixed("key"))).unwrap();
        registry.register("web", Box::new(Fixed("web"))).unwrap();
        registry
    }

    #[test]
    fn resolves_registered_handlers() {
        let registry = registry();
        assert_eq!(registry.resolve("key").unwrap().greet(), "key");
        assert_eq!(registry.resolve("web").unwrap().greet(), "web");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_method_names_the_method() {
        let registry = registry();
        let err = registry.resolve("bad").err().expect("unknown method");
        assert_eq!(err.method, "bad");
        assert_eq!(err.to_string(), "could not get handler for DID method: bad");
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = registry();
        let err = registry
            .register("key", Box::new(Fixed("again")))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DuplicateHandler { ref method, .. } if method == "key"
        ));
        assert_eq!(registry.resolve("key").unwrap().greet(), "key");
    }

    #[test]
    fn supported_methods_lists_every_name() {
        let registry = registry();
        assert_eq!(registry.supported_methods(), vec!["key", "web"]);
        assert!(!registry.is_empty());
        assert!(HandlerRegistry::<dyn Greeter>::new("DID").is_empty());
    }
}
