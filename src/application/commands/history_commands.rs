// src/application/commands/history_commands.rs

use crate::application::dto::{HistoryEntryDto, HistoryViewDto, RecordPurchaseDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;

pub fn list_history(state: &AppState) -> HistoryViewDto {
    HistoryViewDto::from_entries(&state.history_service.entries())
}

/// Manual entry into the history, bypassing the scan flow
pub fn record_purchase(
    state: &AppState,
    request: RecordPurchaseDto,
) -> Result<HistoryEntryDto, ErrorResponse> {
    let items: Vec<String> = request
        .items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Err(ErrorResponse::validation(
            "A purchase needs at least one item".to_string(),
        ));
    }

    let entry = state.history_service.append(items);
    Ok(HistoryEntryDto::from(&entry))
}
