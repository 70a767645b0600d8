use super::entity::{ScanGate, ScanGateState};
use crate::domain::{DomainError, DomainResult};

/// Validates all ScanGate invariants
pub fn validate_scan_gate(gate: &ScanGate) -> DomainResult<()> {
    validate_ticket_presence(gate)?;
    validate_ticket_range(gate)?;
    Ok(())
}

/// An idle gate holds no ticket; an armed or resolving gate holds exactly one
fn validate_ticket_presence(gate: &ScanGate) -> DomainResult<()> {
    match (gate.state(), gate.current_ticket()) {
        (ScanGateState::Idle, None) => Ok(()),
        (ScanGateState::Idle, Some(ticket)) => Err(DomainError::InvariantViolation(format!(
            "Idle gate still holds ticket {}",
            ticket.value()
        ))),
        (state, None) => Err(DomainError::InvariantViolation(format!(
            "Gate is {} without a ticket",
            state
        ))),
        (_, Some(_)) => Ok(()),
    }
}

/// The held ticket is always the most recently issued one
fn validate_ticket_range(gate: &ScanGate) -> DomainResult<()> {
    if let Some(ticket) = gate.current_ticket() {
        if ticket.value() != gate.issued_tickets() {
            return Err(DomainError::InvariantViolation(format!(
                "Held ticket {} is not the latest ({})",
                ticket.value(),
                gate.issued_tickets()
            )));
        }
    }
    Ok(())
}

/// Critical ScanGate Invariants:
///
/// 1. Exactly one gate per scan session
/// 2. A lookup may only start on the Armed -> Resolving transition
/// 3. At most one lookup in flight per gate
/// 4. Events received while Idle or Resolving are dropped, never queued
/// 5. Resolving is entered before the lookup suspends
/// 6. A failed lookup returns the gate to Idle without user input
