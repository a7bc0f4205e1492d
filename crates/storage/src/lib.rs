//! Storage layer for Bandnote
//!
//! This crate provides the key-value store abstraction and the typed,
//! JSON-encoded accessors that persist whole entity collections.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod kv;

pub use collection::{keys, CollectionStorage, DocumentStorage, StorageError};
pub use kv::{KeyValueStore, KvConfig, KvError, MemoryKvStore, SledKvStore};
