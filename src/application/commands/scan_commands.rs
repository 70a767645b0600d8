// src/application/commands/scan_commands.rs

use crate::application::dto::{
    BarcodeEventDto, CaptureResultDto, ConfirmationDto, ConfirmationResultDto, DetectionDto,
    ScanStatusDto,
};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{BarcodeEvent, DomainError, ScanMode, Symbology};
use crate::error::AppError;
use crate::services::{Decision, DetectionOutcome};

pub fn capture_pressed(state: &AppState) -> CaptureResultDto {
    state.scan_session.capture_pressed().into()
}

pub fn switch_mode(state: &AppState, mode: &str) -> Result<ScanStatusDto, ErrorResponse> {
    let mode: ScanMode = mode
        .parse()
        .map_err(|e: DomainError| ErrorResponse::validation(e.to_string()))?;

    state.scan_session.switch_mode(mode);
    Ok(state.scan_session.status().into())
}

/// Camera detection callback. A failed lookup comes back as an error
/// response carrying the notification text.
pub async fn barcode_detected(
    state: &AppState,
    event: BarcodeEventDto,
) -> Result<DetectionDto, ErrorResponse> {
    let symbology: Symbology = event
        .symbology
        .parse()
        .map_err(|e: DomainError| ErrorResponse::validation(e.to_string()))?;

    let outcome = state
        .scan_session
        .on_barcode(BarcodeEvent::new(symbology, event.payload))
        .await;

    match outcome {
        DetectionOutcome::Resolved(pending) => {
            Ok(DetectionDto::Confirm(ConfirmationDto::from(&pending)))
        }
        DetectionOutcome::Failed(lookup_error) => {
            Err(ErrorResponse::from_app_error(AppError::Lookup(lookup_error)))
        }
        DetectionOutcome::Discarded | DetectionOutcome::Stale => Ok(DetectionDto::Ignored),
    }
}

pub fn answer_confirmation(
    state: &AppState,
    answer: &str,
) -> Result<ConfirmationResultDto, ErrorResponse> {
    let decision: Decision = answer
        .parse()
        .map_err(|e: DomainError| ErrorResponse::validation(e.to_string()))?;

    state
        .scan_session
        .answer(decision)
        .map(ConfirmationResultDto::from)
        .map_err(ErrorResponse::from_app_error)
}

pub fn scan_status(state: &AppState) -> ScanStatusDto {
    state.scan_session.status().into()
}
