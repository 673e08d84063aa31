//! Coordination of the link decision against the project API

pub mod linker;

pub use linker::ProjectLinker;
