#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]

pub mod inmemory;
pub mod storage;

pub use inmemory::InMemoryStore;
pub use storage::Access;
