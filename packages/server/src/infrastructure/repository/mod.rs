//! Repository 実装

pub mod inmemory;

pub use inmemory::InMemoryHistoryRepository;
