use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::namespace::{Namespace, Var};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

type ModuleLoader = Box<dyn Fn(&mut Namespace) -> Result<(), BoxError> + Send + Sync>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no module registered under \"{module}\"")]
    ModuleNotFound { module: String },

    #[error("module \"{module}\" failed to load")]
    ModuleLoadFailed {
        module: String,
        #[source]
        source: BoxError,
    },

    #[error("no binding named \"{binding}\" in module \"{module}\"")]
    BindingNotFound { module: String, binding: String },
}

struct ModuleEntry {
    loader: ModuleLoader,
    namespace: Option<Namespace>,
}

/// Registry of named modules.
///
/// Loaders are registered up front by the process composition root; a module
/// body runs at most once, on the first successful [`Runtime::require`].
pub struct Runtime {
    modules: RwLock<HashMap<String, ModuleEntry>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `loader` under `module`, replacing any previous loader and
    /// discarding that module's loaded namespace.
    pub fn register<F>(&self, module: impl Into<String>, loader: F)
    where
        F: Fn(&mut Namespace) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let module = module.into();
        let entry = ModuleEntry {
            loader: Box::new(loader),
            namespace: None,
        };

        if self.write().insert(module.clone(), entry).is_some() {
            warn!(%module, "replacing previously registered module");
        }
    }

    /// Loads `module` if it has not been loaded yet.
    ///
    /// A failed load leaves no namespace behind; a later `require` runs the
    /// loader again.
    pub fn require(&self, module: &str) -> Result<(), RuntimeError> {
        let mut modules = self.write();

        let entry = modules
            .get_mut(module)
            .ok_or_else(|| RuntimeError::ModuleNotFound {
                module: module.to_owned(),
            })?;

        if entry.namespace.is_some() {
            return Ok(());
        }

        let mut namespace = Namespace::default();
        (entry.loader)(&mut namespace).map_err(|source| RuntimeError::ModuleLoadFailed {
            module: module.to_owned(),
            source,
        })?;

        debug!(%module, namespace = ?namespace, "module loaded");
        entry.namespace = Some(namespace);

        Ok(())
    }

    /// Looks up a global binding in a loaded module's namespace.
    pub fn var(&self, module: &str, binding: &str) -> Result<Var, RuntimeError> {
        let modules = self.read();

        let namespace = modules
            .get(module)
            .and_then(|entry| entry.namespace.as_ref())
            .ok_or_else(|| RuntimeError::ModuleNotFound {
                module: module.to_owned(),
            })?;

        namespace
            .var(binding)
            .ok_or_else(|| RuntimeError::BindingNotFound {
                module: module.to_owned(),
                binding: binding.to_owned(),
            })
    }

    pub fn is_loaded(&self, module: &str) -> bool {
        self.read()
            .get(module)
            .is_some_and(|entry| entry.namespace.is_some())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ModuleEntry>> {
        match self.modules.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ModuleEntry>> {
        match self.modules.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
