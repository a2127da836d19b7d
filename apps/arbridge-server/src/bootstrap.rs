//! Process wiring: logging, the form backend and the module registry.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use arbridge_core::{ModuleRegistry, ModuleService};
use arbridge_forms::InMemoryFormStore;
use incident_module::IncidentModule;
use work_order_module::WorkOrderModule;

use crate::config::{AppConfig, LogFormat};

/// Filter directive for the subscriber. Each `-v` raises verbosity above
/// the configured level: `-v` debug, `-vv` trace.
fn log_directive(config: &AppConfig, verbose: u8) -> String {
    match verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_owned(),
        _ => "trace".to_owned(),
    }
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; `verbose` counts from the CLI
/// win over both.
pub fn init_logging(config: &AppConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(config, verbose)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Builds the dispatch orchestrator with every enabled module registered
/// against a shared in-memory form backend.
pub fn build_service(config: &AppConfig) -> Result<Arc<ModuleService>> {
    let store: Arc<InMemoryFormStore> =
        Arc::new(InMemoryFormStore::with_starting_id(config.forms.starting_entry_id));
    let registry = Arc::new(ModuleRegistry::new());

    if config.modules.incident.enabled {
        registry.register(Arc::new(IncidentModule::new(store.clone())))?;
        tracing::info!(module_type = "incident", "module registered");
    }
    if config.modules.work_order.enabled {
        registry.register(Arc::new(WorkOrderModule::new(store.clone())))?;
        tracing::info!(module_type = "workorder", "module registered");
    }

    if registry.is_empty() {
        tracing::warn!("no modules enabled; every dispatch will be rejected");
    }

    Ok(Arc::new(ModuleService::new(registry)))
}
