// tests/scan_pipeline.rs
//
// End-to-end scan pipeline: capture -> detection -> lookup -> confirmation
// -> history, driven through AppState with a scripted catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use shopscan::application::commands::*;
use shopscan::application::dto::{BarcodeEventDto, ConfirmationResultDto, DetectionDto};
use shopscan::{
    assemble_app_state, AppState, BarcodeEvent, CatalogClient, CatalogConfig, CatalogLookup,
    ConfirmationOutcome, Decision, DetectionOutcome, EventBus, LookupError, ProductRecord,
    ScanGateState, ScanMode, Symbology, TotalPolicy, NOT_AVAILABLE,
};

// ============================================================================
// SCRIPTED CATALOG
// ============================================================================

/// Catalog that answers from a fixed table and can hold lookups open
#[derive(Default)]
struct ScriptedLookup {
    answers: Mutex<HashMap<String, Result<ProductRecord, LookupError>>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    hold: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedLookup {
    fn new() -> Self {
        Self::default()
    }

    /// Every lookup signals `started` and then waits for `release`
    fn holding(started: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            hold: Some((started, release)),
            ..Self::default()
        }
    }

    fn answer(self, barcode: &str, result: Result<ProductRecord, LookupError>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(barcode.to_string(), result);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogLookup for ScriptedLookup {
    async fn lookup(&self, barcode: &str) -> Result<ProductRecord, LookupError> {
        self.calls.lock().unwrap().push(barcode.to_string());
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        if let Some((started, release)) = &self.hold {
            started.notify_one();
            release.notified().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get(barcode)
            .cloned()
            .unwrap_or(Err(LookupError::Upstream("Product not found".to_string())))
    }
}

struct FixedTotal;

impl TotalPolicy for FixedTotal {
    fn total_for(&self, _items: &[String]) -> f64 {
        12.0
    }
}

fn app(catalog: Arc<ScriptedLookup>) -> AppState {
    assemble_app_state(catalog, Arc::new(EventBus::new()), Arc::new(FixedTotal))
}

fn widget() -> ProductRecord {
    ProductRecord::from_attributes(
        "012345678905",
        Some("Widget".to_string()),
        None,
        None,
        Some("Acme".to_string()),
    )
}

fn named(barcode: &str, name: &str) -> ProductRecord {
    ProductRecord::from_attributes(barcode, Some(name.to_string()), None, None, None)
}

fn ean13(payload: &str) -> BarcodeEventDto {
    BarcodeEventDto {
        symbology: "EAN-13".to_string(),
        payload: payload.to_string(),
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[tokio::test]
async fn accept_scenario_records_one_entry() {
    let catalog = Arc::new(ScriptedLookup::new().answer("012345678905", Ok(widget())));
    let state = app(Arc::clone(&catalog));

    assert!(capture_pressed(&state).armed);

    let prompt = match barcode_detected(&state, ean13("012345678905")).await.unwrap() {
        DetectionDto::Confirm(prompt) => prompt,
        DetectionDto::Ignored => panic!("detection was ignored"),
    };
    assert_eq!(prompt.product.description, NOT_AVAILABLE);
    assert_eq!(prompt.product.model, NOT_AVAILABLE);
    assert_eq!(prompt.product.brand, "Acme");

    let result = answer_confirmation(&state, "yes").unwrap();
    match result {
        ConfirmationResultDto::Accepted {
            entry,
            acknowledgment,
        } => {
            assert_eq!(entry.items, vec!["Widget".to_string()]);
            assert_eq!(entry.formatted_total, "$12.00");
            assert!(!acknowledgment.is_empty());
        }
        other => panic!("expected acceptance, got {:?}", other),
    }

    let history = list_history(&state);
    assert_eq!(history.entries.len(), 1);
    assert_eq!(history.entries[0].item_summary, "Widget");
    assert_eq!(scan_status(&state).gate_state, "idle");
    assert_eq!(catalog.calls(), vec!["012345678905".to_string()]);
}

#[tokio::test]
async fn reject_scenario_leaves_history_unchanged() {
    let catalog = Arc::new(ScriptedLookup::new().answer("012345678905", Ok(widget())));
    let state = app(catalog);

    capture_pressed(&state);
    barcode_detected(&state, ean13("012345678905")).await.unwrap();

    let result = answer_confirmation(&state, "no").unwrap();
    assert!(matches!(result, ConfirmationResultDto::Rejected { .. }));

    let history = list_history(&state);
    assert!(history.entries.is_empty());
    assert_eq!(history.empty_message.as_deref(), Some("No purchases yet"));
    assert_eq!(state.scan_session.gate_state(), ScanGateState::Idle);
}

#[tokio::test]
async fn concurrent_detections_issue_a_single_lookup() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let catalog = Arc::new(
        ScriptedLookup::holding(Arc::clone(&started), Arc::clone(&release))
            .answer("first", Ok(widget())),
    );
    let state = app(Arc::clone(&catalog));

    capture_pressed(&state);

    let session = Arc::clone(&state.scan_session);
    let first = tokio::spawn(async move {
        session
            .on_barcode(BarcodeEvent::new(Symbology::Ean13, "first"))
            .await
    });

    started.notified().await;
    assert_eq!(state.scan_session.gate_state(), ScanGateState::Resolving);
    assert!(!scan_status(&state).controls_enabled);

    for payload in ["second", "first", "third", "fourth"] {
        let outcome = state
            .scan_session
            .on_barcode(BarcodeEvent::new(Symbology::Ean13, payload))
            .await;
        assert_eq!(outcome, DetectionOutcome::Discarded);
    }
    assert!(!capture_pressed(&state).armed);

    release.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(outcome, DetectionOutcome::Resolved(_)));
    assert_eq!(catalog.calls(), vec!["first".to_string()]);
    assert_eq!(catalog.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn every_failure_kind_returns_gate_to_idle() {
    let catalog = Arc::new(
        ScriptedLookup::new()
            .answer("transport", Err(LookupError::Transport(Some(503))))
            .answer("offline", Err(LookupError::Transport(None)))
            .answer("format", Err(LookupError::UnexpectedFormat))
            .answer(
                "upstream",
                Err(LookupError::Upstream("Invalid keycode".to_string())),
            ),
    );
    let state = app(catalog);

    for barcode in ["transport", "offline", "format", "upstream"] {
        assert!(capture_pressed(&state).armed);
        let error = barcode_detected(&state, ean13(barcode)).await.unwrap_err();
        assert!(!error.message.is_empty());
        assert_eq!(scan_status(&state).gate_state, "idle");
        assert!(scan_status(&state).pending_product.is_none());
    }

    assert!(state.history_service.is_empty());
}

#[tokio::test]
async fn history_lists_most_recent_first() {
    let catalog = Arc::new(
        ScriptedLookup::new()
            .answer("1", Ok(named("1", "Milk")))
            .answer("2", Ok(named("2", "Bread"))),
    );
    let state = app(catalog);

    for barcode in ["1", "2"] {
        capture_pressed(&state);
        barcode_detected(&state, ean13(barcode)).await.unwrap();
        answer_confirmation(&state, "yes").unwrap();
    }

    let summaries: Vec<String> = list_history(&state)
        .entries
        .into_iter()
        .map(|e| e.item_summary)
        .collect();
    assert_eq!(summaries, vec!["Bread".to_string(), "Milk".to_string()]);
}

#[tokio::test]
async fn history_subscribers_see_each_confirmation() {
    let catalog = Arc::new(ScriptedLookup::new().answer("012345678905", Ok(widget())));
    let state = app(catalog);
    let mut receiver = state.history_service.subscribe();

    capture_pressed(&state);
    barcode_detected(&state, ean13("012345678905")).await.unwrap();
    answer_confirmation(&state, "yes").unwrap();

    receiver.changed().await.unwrap();
    assert_eq!(receiver.borrow().len(), 1);
}

#[tokio::test]
async fn mode_switch_mid_lookup_drops_the_result() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let catalog = Arc::new(
        ScriptedLookup::holding(Arc::clone(&started), Arc::clone(&release))
            .answer("012345678905", Ok(widget())),
    );
    let state = app(catalog);

    capture_pressed(&state);
    let session = Arc::clone(&state.scan_session);
    let pending = tokio::spawn(async move {
        session
            .on_barcode(BarcodeEvent::new(Symbology::Ean13, "012345678905"))
            .await
    });

    started.notified().await;
    assert!(state.scan_session.switch_mode(ScanMode::Receipt));
    release.notify_one();

    assert_eq!(pending.await.unwrap(), DetectionOutcome::Stale);
    assert_eq!(state.scan_session.gate_state(), ScanGateState::Idle);
    assert!(scan_status(&state).pending_product.is_none());

    // Back in barcode mode the scanner works again
    state.scan_session.switch_mode(ScanMode::Barcode);
    assert!(capture_pressed(&state).armed);
}

#[tokio::test]
async fn closing_mid_lookup_makes_completion_a_no_op() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let catalog = Arc::new(
        ScriptedLookup::holding(Arc::clone(&started), Arc::clone(&release))
            .answer("012345678905", Ok(widget())),
    );
    let state = app(catalog);

    capture_pressed(&state);
    let session = Arc::clone(&state.scan_session);
    let pending = tokio::spawn(async move {
        session
            .on_barcode(BarcodeEvent::new(Symbology::Ean13, "012345678905"))
            .await
    });

    started.notified().await;
    state.scan_session.close();
    release.notify_one();

    assert_eq!(pending.await.unwrap(), DetectionOutcome::Stale);
    assert!(matches!(
        state.scan_session.answer(Decision::Accept),
        Err(shopscan::AppError::SessionClosed)
    ));
    assert!(state.history_service.is_empty());
}

#[tokio::test]
async fn confirmation_outcome_carries_the_new_entry() {
    let catalog = Arc::new(ScriptedLookup::new().answer("012345678905", Ok(widget())));
    let state = app(catalog);

    capture_pressed(&state);
    barcode_detected(&state, ean13("012345678905")).await.unwrap();

    match state.scan_session.answer(Decision::Accept).unwrap() {
        ConfirmationOutcome::Accepted { entry, .. } => {
            assert_eq!(state.history_service.entries()[0].id, entry.id);
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
}

#[tokio::test]
async fn timed_out_lookup_returns_gate_to_idle() {
    // Endpoint that accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/feed/", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let client = CatalogClient::new(CatalogConfig {
        base_url,
        keycode: String::new(),
        lookup_timeout: Some(Duration::from_secs(1)),
    })
    .unwrap();
    let state = assemble_app_state(
        Arc::new(client),
        Arc::new(EventBus::new()),
        Arc::new(FixedTotal),
    );

    assert!(capture_pressed(&state).armed);
    let outcome = state
        .scan_session
        .on_barcode(BarcodeEvent::new(Symbology::Ean13, "012345678905"))
        .await;
    server.abort();

    assert_eq!(outcome, DetectionOutcome::Failed(LookupError::Transport(None)));
    assert_eq!(state.scan_session.gate_state(), ScanGateState::Idle);
    assert!(capture_pressed(&state).armed);
}
