//! Named-service registry
//!
//! Services (validators, transformers, anything `Send + Sync`) are stored
//! by name and retrieved by name plus expected type. The type check is a
//! checked downcast: asking for the wrong type yields
//! [`LookupError::TypeMismatch`], never a bad cast.

use dashmap::DashMap;
use std::any::{type_name, Any};
use std::sync::Arc;
use thiserror::Error;

/// Why a typed lookup failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Service not found: {0}")]
    NotFound(String),

    #[error("Service '{name}' is a {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Clone)]
struct ServiceEntry {
    type_name: &'static str,
    service: Arc<dyn Any + Send + Sync>,
}

/// Thread-safe name → service registry
///
/// Cloning yields another handle to the same storage, so the validation and
/// transformer services can share one registry. Names are case-sensitive;
/// registering an existing name replaces the previous service.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<DashMap<String, ServiceEntry>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under `name`, returning true if one was replaced
    pub fn register_service<S>(&self, name: impl Into<String>, service: S) -> bool
    where
        S: Any + Send + Sync,
    {
        self.register_shared(name, Arc::new(service))
    }

    /// Register an already shared service; lookups hand out this same `Arc`
    pub fn register_shared<S>(&self, name: impl Into<String>, service: Arc<S>) -> bool
    where
        S: Any + Send + Sync,
    {
        let name = name.into();
        let entry = ServiceEntry {
            type_name: type_name::<S>(),
            service,
        };
        let replaced = self.services.insert(name.clone(), entry).is_some();
        if replaced {
            tracing::debug!(service = %name, "replaced registered service");
        } else {
            tracing::debug!(service = %name, "registered service");
        }
        replaced
    }

    /// Look up a service by name and type
    pub fn lookup<S>(&self, name: &str) -> Result<Arc<S>, LookupError>
    where
        S: Any + Send + Sync,
    {
        // Clone the entry out so the shard lock is released before downcasting
        let entry = self
            .services
            .get(name)
            .map(|e| e.value().clone())
            .ok_or_else(|| LookupError::NotFound(name.to_string()))?;

        entry
            .service
            .downcast::<S>()
            .map_err(|_| LookupError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<S>(),
                actual: entry.type_name,
            })
    }

    /// Look up a service, treating a miss or a type mismatch as absent
    pub fn get_service<S>(&self, name: &str) -> Option<Arc<S>>
    where
        S: Any + Send + Sync,
    {
        match self.lookup(name) {
            Ok(service) => Some(service),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Remove a service, returning whether it was present
    pub fn remove(&self, name: &str) -> bool {
        self.services.remove(name).is_some()
    }

    /// Registered names, sorted
    pub fn service_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.service_names())
            .finish()
    }
}
