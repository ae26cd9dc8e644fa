//! Application services and ports.

#![forbid(unsafe_code)]

mod filesystem_ports;
mod truncation_service;

pub use filesystem_ports::{
    DeletionOutcome, DeletionStatus, DirectoryEntry, FileSystem, TruncationReport,
};
pub use truncation_service::TruncationService;
