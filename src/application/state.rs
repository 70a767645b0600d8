// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::{HistoryService, ScanSession};

/// Application state shared by all commands.
/// All fields are Arc-wrapped for thread-safe sharing across tasks.
/// Services are initialized in app::scan_init and passed here.
#[derive(Clone)]
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub history_service: Arc<HistoryService>,
    pub scan_session: Arc<ScanSession>,
}
