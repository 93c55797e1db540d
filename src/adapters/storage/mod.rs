//! Storage adapters - file-backed session persistence and an in-memory double.

mod file_persistence;
mod in_memory;

pub use file_persistence::FileSessionPersistence;
pub use in_memory::InMemorySessionPersistence;
