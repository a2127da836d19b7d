//! Type-keyed registry of module handlers.
//!
//! The registry is the only state shared across requests in the core. It is
//! populated at start-up, read on every dispatch, and guarded by a sync
//! `RwLock` with short critical sections; no lock is ever held across an
//! await. Lookups return clones of the stored `Arc`, so unregistering a
//! module has no effect on in-flight requests holding a prior reference.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::GatewayError;
use crate::module::Module;

/// Concurrent store of [`Module`] handlers keyed by module type.
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, Arc<dyn Module>>>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a module under its own `module_type()`.
    ///
    /// Duplicate registration is a start-up defect: the second call fails
    /// and the original entry is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DuplicateModule`] if the type is already
    /// registered.
    pub fn register(&self, module: Arc<dyn Module>) -> Result<(), GatewayError> {
        let module_type = module.module_type().to_owned();
        let mut modules = self.modules.write();
        match modules.entry(module_type) {
            std::collections::hash_map::Entry::Occupied(e) => {
                Err(GatewayError::DuplicateModule(e.key().clone()))
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(module);
                Ok(())
            }
        }
    }

    /// Removes the handler for `module_type`; no-op when absent.
    pub fn unregister(&self, module_type: &str) {
        self.modules.write().remove(module_type);
    }

    /// Looks up a handler. Absence is an ordinary outcome, never a fault.
    #[must_use]
    pub fn get(&self, module_type: &str) -> Option<Arc<dyn Module>> {
        self.modules.read().get(module_type).cloned()
    }

    /// All registered type keys from a single snapshot; order unspecified.
    #[must_use]
    pub fn module_types(&self) -> Vec<String> {
        self.modules.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, module_type: &str) -> bool {
        self.modules.read().contains_key(module_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldMap, GenericRequest, GenericResponse, ValidationResult};
    use async_trait::async_trait;

    struct FixedModule(&'static str);

    #[async_trait]
    impl Module for FixedModule {
        fn module_type(&self) -> &str {
            self.0
        }

        fn validate(&self, _request: &GenericRequest) -> ValidationResult {
            ValidationResult::valid()
        }

        async fn process(
            &self,
            _request: &GenericRequest,
        ) -> Result<GenericResponse, GatewayError> {
            Ok(GenericResponse::success(FieldMap::new(), "ok"))
        }

        fn field_mappings(&self) -> &'static crate::mapping::FieldTable {
            &[]
        }
    }

    #[test]
    fn register_and_get() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(FixedModule("incident"))).unwrap();

        let module = registry.get("incident").expect("registered module");
        assert_eq!(module.module_type(), "incident");
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("incident"));
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_original() {
        let registry = ModuleRegistry::new();
        let original: Arc<dyn Module> = Arc::new(FixedModule("incident"));
        registry.register(original.clone()).unwrap();

        let err = registry
            .register(Arc::new(FixedModule("incident")))
            .unwrap_err();
        assert!(matches!(err, GatewayError::DuplicateModule(t) if t == "incident"));

        let resolved = registry.get("incident").unwrap();
        assert!(Arc::ptr_eq(&original, &resolved), "original entry untouched");
    }

    #[test]
    fn lookup_is_total() {
        let registry = ModuleRegistry::new();
        assert!(registry.get("ghost").is_none());
        assert!(registry.get("").is_none());
        assert!(!registry.contains("ghost"));
    }

    #[test]
    fn unregister_is_a_noop_when_absent() {
        let registry = ModuleRegistry::new();
        registry.unregister("ghost");
        assert!(registry.is_empty());

        registry.register(Arc::new(FixedModule("incident"))).unwrap();
        registry.unregister("incident");
        assert!(registry.get("incident").is_none());
    }

    #[test]
    fn unregister_does_not_invalidate_held_references() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(FixedModule("incident"))).unwrap();

        let held = registry.get("incident").unwrap();
        registry.unregister("incident");

        assert_eq!(held.module_type(), "incident");
        assert!(registry.get("incident").is_none());
    }

    #[test]
    fn module_types_snapshot_has_no_duplicates() {
        let registry = ModuleRegistry::new();
        registry.register(Arc::new(FixedModule("incident"))).unwrap();
        registry.register(Arc::new(FixedModule("workorder"))).unwrap();

        let mut types = registry.module_types();
        types.sort();
        assert_eq!(types, ["incident", "workorder"]);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn registration_races_with_lookups_without_corruption() {
        let registry = Arc::new(ModuleRegistry::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let name: &'static str = match i % 4 {
                    0 => "incident",
                    1 => "workorder",
                    2 => "change",
                    _ => "asset",
                };
                let _ = registry.register(Arc::new(FixedModule(name)));
                for _ in 0..100 {
                    if let Some(module) = registry.get(name) {
                        assert_eq!(module.module_type(), name);
                    }
                    let types = registry.module_types();
                    assert!(types.len() <= 4);
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.len(), 4);
    }
}
