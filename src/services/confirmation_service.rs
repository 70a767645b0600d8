// src/services/confirmation_service.rs
//
// Confirmation Workflow
//
// Presents a resolved product and routes the user's answer:
// - Accept: the product name is recorded in the purchase history
// - Reject: the product is dropped, history untouched
//
// The pending product is owned by value and consumed by `decide`, so it
// cannot outlive the decision.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{ArmTicket, DomainError, HistoryEntry, ProductRecord};
use crate::events::{EventBus, ScanConfirmed, ScanRejected};
use crate::services::history_service::HistoryService;

pub const CONFIRMATION_TITLE: &str = "Product Found";
pub const ACCEPTED_ACKNOWLEDGMENT: &str = "Added to your purchase history.";

/// The user's answer to the confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "accept" => Ok(Decision::Accept),
            "no" | "n" | "reject" => Ok(Decision::Reject),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown confirmation answer: {}",
                other
            ))),
        }
    }
}

/// A product on screen, waiting for the user's answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirmation {
    pub product: ProductRecord,

    /// Gate ticket the product was resolved under
    pub ticket: ArmTicket,

    pub presented_at: DateTime<Utc>,
}

impl PendingConfirmation {
    /// Prompt body: every field on its own line, values verbatim
    pub fn message(&self) -> String {
        self.product
            .display_fields()
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationOutcome {
    Accepted {
        entry: HistoryEntry,
        acknowledgment: String,
    },
    Rejected {
        barcode: String,
    },
}

pub struct ConfirmationWorkflow {
    history_service: Arc<HistoryService>,
    event_bus: Arc<EventBus>,
}

impl ConfirmationWorkflow {
    pub fn new(history_service: Arc<HistoryService>, event_bus: Arc<EventBus>) -> Self {
        Self {
            history_service,
            event_bus,
        }
    }

    pub fn present(&self, product: ProductRecord, ticket: ArmTicket) -> PendingConfirmation {
        info!(
            "Presenting {} ({}) for confirmation",
            product.name, product.barcode
        );

        PendingConfirmation {
            product,
            ticket,
            presented_at: Utc::now(),
        }
    }

    pub fn decide(&self, pending: PendingConfirmation, decision: Decision) -> ConfirmationOutcome {
        let product = pending.product;

        match decision {
            Decision::Accept => {
                // Current policy records the product name only
                let entry = self.history_service.append(vec![product.name.clone()]);

                self.event_bus
                    .emit(ScanConfirmed::new(product.barcode.clone(), entry.id));

                ConfirmationOutcome::Accepted {
                    entry,
                    acknowledgment: ACCEPTED_ACKNOWLEDGMENT.to_string(),
                }
            }
            Decision::Reject => {
                info!("Product {} rejected", product.barcode);
                self.event_bus.emit(ScanRejected::new(product.barcode.clone()));

                ConfirmationOutcome::Rejected {
                    barcode: product.barcode,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScanGate;
    use crate::services::history_service::tests::history_service;

    fn workflow() -> (ConfirmationWorkflow, Arc<HistoryService>, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let history = Arc::new(history_service(Arc::clone(&bus)));
        let workflow = ConfirmationWorkflow::new(Arc::clone(&history), Arc::clone(&bus));
        (workflow, history, bus)
    }

    fn pending(workflow: &ConfirmationWorkflow) -> PendingConfirmation {
        let mut gate = ScanGate::new();
        let ticket = gate.arm().unwrap();
        let product = ProductRecord::from_attributes(
            "012345678905",
            Some("Widget".to_string()),
            None,
            None,
            Some("Acme".to_string()),
        );
        workflow.present(product, ticket)
    }

    #[test]
    fn test_message_shows_sentinels_verbatim() {
        let (workflow, _, _) = workflow();
        let message = pending(&workflow).message();

        assert_eq!(
            message,
            "Barcode: 012345678905\nProduct: Widget\nDescription: N/A\nModel: N/A\nBrand: Acme"
        );
    }

    #[test]
    fn test_accept_records_product_name() {
        let (workflow, history, bus) = workflow();
        let pending = pending(&workflow);

        let outcome = workflow.decide(pending, Decision::Accept);

        let entries = history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].items, vec!["Widget".to_string()]);
        match outcome {
            ConfirmationOutcome::Accepted {
                entry,
                acknowledgment,
            } => {
                assert_eq!(entry.id, entries[0].id);
                assert_eq!(acknowledgment, ACCEPTED_ACKNOWLEDGMENT);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }

        let types: Vec<String> = bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["HistoryEntryAppended", "ScanConfirmed"]);
    }

    #[test]
    fn test_reject_leaves_history_untouched() {
        let (workflow, history, _) = workflow();
        let pending = pending(&workflow);

        let outcome = workflow.decide(pending, Decision::Reject);

        assert!(history.is_empty());
        assert_eq!(
            outcome,
            ConfirmationOutcome::Rejected {
                barcode: "012345678905".to_string()
            }
        );
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!("yes".parse::<Decision>().unwrap(), Decision::Accept);
        assert_eq!("N".parse::<Decision>().unwrap(), Decision::Reject);
        assert!("maybe".parse::<Decision>().is_err());
    }
}
