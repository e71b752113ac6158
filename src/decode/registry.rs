use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::decode::backend::DecoderBackend;

/// Thread-safe registry of decoder backends.
///
/// Backends are wrapped in `Mutex` because `DecoderBackend::decode` takes
/// `&mut self`.
pub struct DecoderRegistry {
    backends: HashMap<String, Arc<Mutex<dyn DecoderBackend>>>,
    default_name: Option<String>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
            default_name: None,
        }
    }

    /// Register a backend. The first registered backend becomes the default.
    pub fn register<B: DecoderBackend + 'static>(&mut self, backend: B) {
        let name = backend.name().to_string();
        if self.default_name.is_none() {
            self.default_name = Some(name.clone());
        }
        self.backends.insert(name, Arc::new(Mutex::new(backend)));
    }

    /// Set default backend by name.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.backends.contains_key(name) {
            return Err(anyhow!("decoder backend '{}' not registered", name));
        }
        self.default_name = Some(name.to_string());
        Ok(())
    }

    /// Get backend by name.
    pub fn get(&self, name: &str) -> Option<Arc<Mutex<dyn DecoderBackend>>> {
        self.backends.get(name).cloned()
    }

    /// Get default backend.
    pub fn default_backend(&self) -> Option<Arc<Mutex<dyn DecoderBackend>>> {
        self.default_name.as_ref().and_then(|name| self.get(name))
    }

    /// List registered backends.
    pub fn list(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::backends::stub::StubBackend;

    #[test]
    fn first_registered_backend_is_default() {
        let mut registry = DecoderRegistry::new();
        registry.register(StubBackend::new());
        assert_eq!(registry.list(), vec!["stub".to_string()]);
        assert!(registry.default_backend().is_some());
    }

    #[test]
    fn set_default_rejects_unknown_backend() {
        let mut registry = DecoderRegistry::new();
        registry.register(StubBackend::new());
        assert!(registry.set_default("zxing").is_err());
        assert!(registry.set_default("stub").is_ok());
    }
}
