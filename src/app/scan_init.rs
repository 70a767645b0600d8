// src/app/scan_init.rs
//
// Scan Subsystem Initialization
//
// Wires the catalog client, history store, confirmation workflow and scan
// session onto one event bus.
//
// CRITICAL RULES:
// - Exactly one history store per process; every consumer gets the same Arc
// - The scan session only sees the catalog through CatalogLookup

use log::info;
use std::sync::Arc;

use super::config::AppConfig;
use crate::application::AppState;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{CatalogClient, CatalogLookup};
use crate::repositories::{HistoryRepository, InMemoryHistoryRepository};
use crate::services::{
    ConfirmationWorkflow, HistoryService, PlaceholderTotal, ScanSession, TotalPolicy,
};

/// Build the application state from configuration, using the HTTP catalog
pub fn init_app_state(config: &AppConfig) -> AppResult<AppState> {
    info!("Initializing scan subsystem against {}", config.catalog.base_url);

    let catalog: Arc<dyn CatalogLookup> = Arc::new(CatalogClient::new(config.catalog.clone())?);
    let event_bus = Arc::new(EventBus::with_log_capacity(config.event_log_capacity));

    Ok(assemble_app_state(
        catalog,
        event_bus,
        Arc::new(PlaceholderTotal),
    ))
}

/// Assemble the services around an arbitrary catalog lookup
pub fn assemble_app_state(
    catalog: Arc<dyn CatalogLookup>,
    event_bus: Arc<EventBus>,
    total_policy: Arc<dyn TotalPolicy>,
) -> AppState {
    let history_repo: Arc<dyn HistoryRepository> = Arc::new(InMemoryHistoryRepository::new());

    let history_service = Arc::new(HistoryService::with_total_policy(
        history_repo,
        Arc::clone(&event_bus),
        total_policy,
    ));
    let confirmation = Arc::new(ConfirmationWorkflow::new(
        Arc::clone(&history_service),
        Arc::clone(&event_bus),
    ));
    let scan_session = Arc::new(ScanSession::new(
        catalog,
        confirmation,
        Arc::clone(&event_bus),
    ));

    info!("Scan session {} ready", scan_session.id());

    AppState {
        event_bus,
        history_service,
        scan_session,
    }
}
