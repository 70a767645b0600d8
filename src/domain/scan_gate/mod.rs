pub mod entity;
pub mod invariants;

pub use entity::{ArmTicket, ScanGate, ScanGateState, ScanMode};
pub use invariants::validate_scan_gate;
