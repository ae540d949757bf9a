pub mod backend;
pub mod filesystem;
pub mod memory;

pub use backend::BookStore;
pub use filesystem::FilesystemBookStore;
pub use memory::MemoryBookStore;
