//! Domain store implementations
//!
//! - [`FileDomainStore`]: JSON file with atomic writes and backup recovery
//! - [`MemoryDomainStore`]: in-memory, for tests and throwaway runs

pub mod file;
pub mod memory;

pub use file::FileDomainStore;
pub use memory::MemoryDomainStore;
