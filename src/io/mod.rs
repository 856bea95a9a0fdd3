pub mod real;
pub mod traits;
pub mod walker;

// Re-export I/O traits for convenient access
pub use real::{MemoryFileSystem, RealFileSystem};
pub use traits::FileSystem;
pub use walker::{find_route_files, is_dynamic_segment, RouteWalker};
