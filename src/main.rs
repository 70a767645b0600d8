// src/main.rs
//
// Console front end: stands in for the camera preview and the dialogs.
// Lookups run in background tasks so repeated scans while one is in flight
// exercise the gate exactly like a live camera stream would.

use anyhow::Context;
use env_logger::Env;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use shopscan::application::commands::*;
use shopscan::application::dto::{
    BarcodeEventDto, ConfirmationResultDto, DetectionDto, NotificationDto, RecordPurchaseDto,
};
use shopscan::application::{AppState, ErrorResponse};
use shopscan::{init_app_state, AppConfig, ScanArmed};

const HELP: &str = "\
Commands:
  capture                      arm the scanner
  mode <barcode|receipt>       switch capture mode
  scan <symbology> <payload>   simulate a camera detection
  yes | no                     answer the confirmation prompt
  history                      show purchase history
  add <item>[, <item>...]      record a purchase manually
  status                       show scanner state
  quit                         exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. LOGGING
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // 2. CONFIGURATION
    let config = AppConfig::from_env().context("failed to load configuration")?;

    // 3. SERVICES
    let state = init_app_state(&config).context("failed to initialize scan subsystem")?;

    state.event_bus.subscribe::<ScanArmed, _>(|_| {
        println!("Scanning... point the camera at a barcode.");
    });

    println!("{}", HELP);

    // 4. CONSOLE LOOP
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "capture" => {
                let result = capture_pressed(&state);
                if let Some(notice) = result.notice {
                    notify(&NotificationDto::new("Capture", notice));
                } else if !result.armed {
                    println!("Scanner busy.");
                }
            }
            "mode" => match switch_mode(&state, rest) {
                Ok(status) => println!("Mode: {}", status.mode),
                Err(e) => report(&e),
            },
            "scan" => match rest.split_once(char::is_whitespace) {
                Some((symbology, payload)) => {
                    let event = BarcodeEventDto {
                        symbology: symbology.to_string(),
                        payload: payload.trim().to_string(),
                    };
                    tokio::spawn(detect(state.clone(), event));
                }
                None => println!("usage: scan <symbology> <payload>"),
            },
            "yes" | "no" | "y" | "n" => match answer_confirmation(&state, command) {
                Ok(ConfirmationResultDto::Accepted { acknowledgment, .. }) => {
                    notify(&NotificationDto::new("Success", acknowledgment));
                }
                Ok(ConfirmationResultDto::Rejected { barcode }) => {
                    println!("Discarded {}.", barcode);
                }
                Err(e) => report(&e),
            },
            "history" => print_history(&state),
            "add" => {
                let items = rest.split(',').map(str::to_string).collect();
                match record_purchase(&state, RecordPurchaseDto { items }) {
                    Ok(entry) => {
                        println!("Recorded {} ({})", entry.item_summary, entry.formatted_total)
                    }
                    Err(e) => report(&e),
                }
            }
            "status" => {
                let status = scan_status(&state);
                println!(
                    "Scanner: {} | mode: {} | controls {}",
                    status.gate_state,
                    status.mode,
                    if status.controls_enabled { "enabled" } else { "disabled" }
                );
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    state.scan_session.close();
    info!("Session ended with {} history entries", state.history_service.len());
    Ok(())
}

async fn detect(state: AppState, event: BarcodeEventDto) {
    match barcode_detected(&state, event).await {
        Ok(DetectionDto::Confirm(prompt)) => {
            println!("\n== {} ==\n{}\nAdd to history? (yes/no)", prompt.title, prompt.message);
        }
        Ok(DetectionDto::Ignored) => {}
        Err(e) => report(&e),
    }
}

fn print_history(state: &AppState) {
    let view = list_history(state);
    if let Some(message) = view.empty_message {
        println!("{}", message);
        return;
    }
    for entry in view.entries {
        println!(
            "{}  {}  {}",
            entry.date, entry.item_summary, entry.formatted_total
        );
    }
}

fn notify(notification: &NotificationDto) {
    println!("[{}] {}", notification.title, notification.message);
}

fn report(error: &ErrorResponse) {
    notify(&NotificationDto::new("Error", error.message.clone()));
}
