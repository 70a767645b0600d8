use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

/// Arbitration state for camera detection events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanGateState {
    /// Waiting for the user to press capture
    Idle,
    /// Capture pressed, the next detection event will be accepted
    Armed,
    /// A detection was accepted; lookup in flight or awaiting the user's answer
    Resolving,
}

/// What the capture button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    Barcode,
    Receipt,
}

/// Identifies one arm of the gate.
/// A lookup result is only applied while the gate still holds the ticket it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmTicket(u64);

impl ArmTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Single-flight gate between the camera event stream and the catalog lookup.
///
/// Transitions:
/// - Idle --arm--> Armed
/// - Armed --accept--> Resolving (the only transition allowed to start a lookup)
/// - Resolving --release(ticket)--> Idle
/// - any --reset--> Idle (mode switch, teardown)
///
/// Every other request is rejected and leaves the state untouched.
#[derive(Debug, Clone)]
pub struct ScanGate {
    state: ScanGateState,
    current: Option<ArmTicket>,
    issued: u64,
}

impl ScanGate {
    pub fn new() -> Self {
        Self {
            state: ScanGateState::Idle,
            current: None,
            issued: 0,
        }
    }

    pub fn state(&self) -> ScanGateState {
        self.state
    }

    pub fn current_ticket(&self) -> Option<ArmTicket> {
        self.current
    }

    /// Number of tickets handed out since creation
    pub fn issued_tickets(&self) -> u64 {
        self.issued
    }

    /// Capture and side controls are disabled while a scan is being resolved
    pub fn controls_enabled(&self) -> bool {
        self.state != ScanGateState::Resolving
    }

    /// Capture pressed
    pub fn arm(&mut self) -> DomainResult<ArmTicket> {
        if self.state != ScanGateState::Idle {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot arm scan gate while {}",
                self.state
            )));
        }

        self.issued += 1;
        let ticket = ArmTicket(self.issued);
        self.current = Some(ticket);
        self.state = ScanGateState::Armed;
        Ok(ticket)
    }

    /// Detection event received.
    /// Must be called synchronously, before any lookup is started.
    pub fn accept(&mut self) -> DomainResult<ArmTicket> {
        match (self.state, self.current) {
            (ScanGateState::Armed, Some(ticket)) => {
                self.state = ScanGateState::Resolving;
                Ok(ticket)
            }
            (state, _) => Err(DomainError::InvalidStateTransition(format!(
                "Detection event discarded while {}",
                state
            ))),
        }
    }

    /// True while the gate is resolving under this ticket
    pub fn holds(&self, ticket: ArmTicket) -> bool {
        self.state == ScanGateState::Resolving && self.current == Some(ticket)
    }

    /// Lookup failed or the confirmation was answered
    pub fn release(&mut self, ticket: ArmTicket) -> DomainResult<()> {
        if !self.holds(ticket) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Ticket {} is stale (gate is {})",
                ticket.value(),
                self.state
            )));
        }

        self.state = ScanGateState::Idle;
        self.current = None;
        Ok(())
    }

    /// Unconditionally return to Idle. Outstanding tickets become stale.
    pub fn reset(&mut self) -> ScanGateState {
        let previous = self.state;
        self.state = ScanGateState::Idle;
        self.current = None;
        previous
    }
}

impl Default for ScanGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanGateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanGateState::Idle => write!(f, "idle"),
            ScanGateState::Armed => write!(f, "armed"),
            ScanGateState::Resolving => write!(f, "resolving"),
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Barcode => write!(f, "barcode"),
            ScanMode::Receipt => write!(f, "receipt"),
        }
    }
}

impl FromStr for ScanMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "barcode" => Ok(ScanMode::Barcode),
            "receipt" => Ok(ScanMode::Receipt),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown scan mode: {}",
                other
            ))),
        }
    }
}
