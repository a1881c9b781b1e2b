//! vmmsim - a demand-paged virtual memory simulator
//!
//! This is the main library for vmmsim, modelling the data path of a
//! hardware MMU: a 16-entry translation cache in front of a 256-entry
//! page table, backed by demand paging from a read-only backing store
//! with FIFO page replacement across 128 physical frames.

use std::fmt;
use std::io;

// Core modules
pub mod utils;
pub mod config;

// Translation engine
pub mod core;

// Backing store and address trace adapters
pub mod drivers;

// Re-export key types for convenience
pub use crate::core::mmu::{Mmu, Translation};
pub use crate::core::stats::StatsCollector;
pub use crate::drivers::store::{BackingStore, PageSource};
pub use crate::drivers::trace::AddressTrace;

use crate::core::mm::PageNr;

/// vmmsim version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common error type for vmmsim
#[derive(Debug)]
pub enum Error {
    /// Wrong command-line argument count
    Usage,
    /// Underlying I/O failure (open, seek, read)
    Io(io::Error),
    /// Backing store exists but has the wrong size
    StoreSize { expected: u64, actual: u64 },
    /// A page read from the backing store came back short
    ShortRead { page: PageNr },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage => write!(f, "expected exactly one address-file argument"),
            Error::Io(err) => write!(f, "{}", err),
            Error::StoreSize { expected, actual } => write!(
                f,
                "backing store must be exactly {} bytes, found {}",
                expected, actual
            ),
            Error::ShortRead { page } => {
                write!(f, "short read from backing store for page {}", page)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
