// src/services/scan_service.rs
//
// Scan Session - camera events -> single-flight lookup -> confirmation
//
// CRITICAL RULES:
// - The gate moves to Resolving BEFORE the lookup is awaited
// - The session lock is never held across an await
// - Detections while Idle or Resolving are dropped, never queued
// - A failed lookup returns the gate to Idle without user input
// - A lookup that completes after the gate moved on (mode switch,
//   teardown) is dropped silently
// - Teardown waits for a decision in progress; nothing is recorded after close

use log::{debug, error, info, trace, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::domain::{
    validate_barcode_event, validate_scan_gate, ArmTicket, BarcodeEvent, DomainError,
    ProductRecord, ScanGate, ScanGateState, ScanMode,
};
use crate::error::{AppError, AppResult, LookupError};
use crate::events::{
    BarcodeAccepted, EventBus, LookupFailed, ProductResolved, ScanArmed, ScanModeChanged,
};
use crate::integrations::CatalogLookup;
use crate::services::confirmation_service::{
    ConfirmationOutcome, ConfirmationWorkflow, Decision, PendingConfirmation,
};

pub const RECEIPT_UNSUPPORTED_MESSAGE: &str = "Receipt capture not implemented yet.";

/// Result of a capture press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Gate armed; the next detection will be looked up
    Armed(ArmTicket),
    /// Already armed or resolving; nothing changed
    Ignored(ScanGateState),
    /// Capture in receipt mode
    ReceiptUnsupported,
    /// Session has been torn down
    Closed,
}

/// Result of one camera detection
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    /// Gate not armed or event unusable; no lookup issued
    Discarded,
    /// Product found; confirmation waiting for the user
    Resolved(PendingConfirmation),
    /// Lookup failed; gate already back to Idle
    Failed(LookupError),
    /// Lookup finished after the gate moved on; result dropped
    Stale,
}

/// Snapshot of the scan screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanStatus {
    pub session_id: Uuid,
    pub gate_state: ScanGateState,
    pub mode: ScanMode,
    /// Capture and side buttons are disabled while a scan is being resolved
    pub controls_enabled: bool,
    pub pending: Option<ProductRecord>,
    pub closed: bool,
}

struct SessionState {
    gate: ScanGate,
    mode: ScanMode,
    pending: Option<PendingConfirmation>,
    closed: bool,
}

impl SessionState {
    /// Re-check gate invariants after a transition
    fn check_gate(&self) {
        if let Err(e) = validate_scan_gate(&self.gate) {
            error!("Scan gate invariant broken: {}", e);
        }
    }
}

pub struct ScanSession {
    id: Uuid,
    catalog: Arc<dyn CatalogLookup>,
    confirmation: Arc<ConfirmationWorkflow>,
    event_bus: Arc<EventBus>,
    state: Mutex<SessionState>,
    /// Held for a whole answer and for teardown. Bus handlers for the
    /// confirmation events must not call back into `answer` or `close`.
    decision: Mutex<()>,
}

impl ScanSession {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        confirmation: Arc<ConfirmationWorkflow>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog,
            confirmation,
            event_bus,
            state: Mutex::new(SessionState {
                gate: ScanGate::new(),
                mode: ScanMode::default(),
                pending: None,
                closed: false,
            }),
            decision: Mutex::new(()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Capture button pressed
    pub fn capture_pressed(&self) -> CaptureOutcome {
        let outcome = {
            let mut state = self.lock_state();
            if state.closed {
                CaptureOutcome::Closed
            } else if state.mode == ScanMode::Receipt {
                CaptureOutcome::ReceiptUnsupported
            } else {
                match state.gate.arm() {
                    Ok(ticket) => {
                        state.check_gate();
                        CaptureOutcome::Armed(ticket)
                    }
                    Err(e) => {
                        debug!("Capture ignored: {}", e);
                        CaptureOutcome::Ignored(state.gate.state())
                    }
                }
            }
        };

        if let CaptureOutcome::Armed(ticket) = outcome {
            info!("Barcode scanning initiated (ticket {})", ticket.value());
            self.event_bus.emit(ScanArmed::new(self.id, ticket.value()));
        }

        outcome
    }

    /// Switch capture mode. Any scan in progress is abandoned.
    pub fn switch_mode(&self, mode: ScanMode) -> bool {
        let changed = {
            let mut state = self.lock_state();
            if state.closed || state.mode == mode {
                false
            } else {
                state.mode = mode;
                state.pending = None;
                let previous = state.gate.reset();
                state.check_gate();
                debug!("Mode switched to {} (gate was {})", mode, previous);
                true
            }
        };

        if changed {
            self.event_bus.emit(ScanModeChanged::new(self.id, mode));
        }
        changed
    }

    /// Camera detection callback.
    ///
    /// Only the first detection after an arm starts a lookup; the gate is
    /// switched to Resolving before the lookup is awaited.
    pub async fn on_barcode(&self, event: BarcodeEvent) -> DetectionOutcome {
        let ticket = {
            let mut state = self.lock_state();
            if state.closed || state.mode != ScanMode::Barcode {
                return DetectionOutcome::Discarded;
            }
            if let Err(e) = validate_barcode_event(&event) {
                warn!("Ignoring detection: {}", e);
                return DetectionOutcome::Discarded;
            }
            match state.gate.accept() {
                Ok(ticket) => {
                    state.check_gate();
                    ticket
                }
                Err(e) => {
                    trace!("{} ({})", e, event.payload);
                    return DetectionOutcome::Discarded;
                }
            }
        };

        info!(
            "Barcode scanned! Type: {}, Data: {}",
            event.symbology, event.payload
        );
        self.event_bus.emit(BarcodeAccepted::new(
            self.id,
            ticket.value(),
            event.symbology,
            event.payload.clone(),
        ));

        let result = self.catalog.lookup(&event.payload).await;

        let outcome = {
            let mut state = self.lock_state();
            if state.closed || !state.gate.holds(ticket) {
                debug!(
                    "Dropping stale lookup result for {} (ticket {})",
                    event.payload,
                    ticket.value()
                );
                return DetectionOutcome::Stale;
            }

            match result {
                Ok(product) => {
                    let pending = self.confirmation.present(product, ticket);
                    state.pending = Some(pending.clone());
                    DetectionOutcome::Resolved(pending)
                }
                Err(lookup_error) => {
                    if let Err(e) = state.gate.release(ticket) {
                        error!("Failed to release scan gate: {}", e);
                    }
                    state.check_gate();
                    DetectionOutcome::Failed(lookup_error)
                }
            }
        };

        match &outcome {
            DetectionOutcome::Resolved(pending) => {
                self.event_bus.emit(ProductResolved::new(
                    self.id,
                    ticket.value(),
                    pending.product.barcode.clone(),
                    pending.product.name.clone(),
                ));
            }
            DetectionOutcome::Failed(lookup_error) => {
                warn!("Lookup for {} failed: {}", event.payload, lookup_error);
                self.event_bus.emit(LookupFailed::new(
                    self.id,
                    ticket.value(),
                    event.payload.clone(),
                    lookup_error.to_string(),
                ));
            }
            _ => {}
        }

        outcome
    }

    /// The user answered the confirmation prompt. The gate returns to Idle
    /// whatever the answer.
    pub fn answer(&self, decision: Decision) -> AppResult<ConfirmationOutcome> {
        let _deciding = self.decision.lock().unwrap_or_else(PoisonError::into_inner);

        let pending = {
            let mut state = self.lock_state();
            if state.closed {
                return Err(AppError::SessionClosed);
            }
            state.pending.take().ok_or_else(|| {
                DomainError::InvalidStateTransition(
                    "No product is awaiting confirmation".to_string(),
                )
            })?
        };

        let ticket = pending.ticket;
        let outcome = self.confirmation.decide(pending, decision);

        {
            let mut state = self.lock_state();
            if let Err(e) = state.gate.release(ticket) {
                debug!("Gate already moved on: {}", e);
            }
            state.check_gate();
        }

        Ok(outcome)
    }

    pub fn status(&self) -> ScanStatus {
        let state = self.lock_state();
        ScanStatus {
            session_id: self.id,
            gate_state: state.gate.state(),
            mode: state.mode,
            controls_enabled: !state.closed && state.gate.controls_enabled(),
            pending: state.pending.as_ref().map(|p| p.product.clone()),
            closed: state.closed,
        }
    }

    pub fn gate_state(&self) -> ScanGateState {
        self.lock_state().gate.state()
    }

    /// Tear the session down. Later callbacks, including lookups still in
    /// flight, become no-ops.
    pub fn close(&self) {
        let _deciding = self.decision.lock().unwrap_or_else(PoisonError::into_inner);

        let mut state = self.lock_state();
        if !state.closed {
            state.closed = true;
            state.pending = None;
            state.gate.reset();
            state.check_gate();
            info!("Scan session {} closed", self.id);
        }
    }
}
