//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod os_file_system;

pub use os_file_system::OsFileSystem;
