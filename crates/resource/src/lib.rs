//! Resource providers for the Quire exporters.
//!
//! - [`FilesystemResourceProvider`]: loads assets below an asset root directory
//! - [`InMemoryResourceProvider`]: re-exported from quire-traits for tests and embedding

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use quire_traits::InMemoryResourceProvider;
