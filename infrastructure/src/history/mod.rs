//! History persistence

pub mod jsonl_store;

pub use jsonl_store::JsonlHistoryStore;
