pub mod fs;

pub use fs::{FileSystem, MemFs, RealFs};
