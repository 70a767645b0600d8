// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data holders
// - NO business logic
// - NO event emission
// - NO cross-repository calls
// - In-memory only: nothing outlives the process

pub mod history_repository;

pub use history_repository::{HistoryRepository, InMemoryHistoryRepository};
