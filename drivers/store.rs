//! Backing store adapter
//!
//! The backing store is a read-only binary file of exactly
//! `NUM_PAGES * PAGE_SIZE` bytes; page `p` occupies the byte range
//! `[p * PAGE_SIZE, (p + 1) * PAGE_SIZE)`. Faulted pages are always
//! re-read from the same offset; the store itself is never written.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::core::mm::{PageNr, PAGE_SIZE, STORE_SIZE};
use crate::{Error, Result};

/// Source of page contents for fault handling
///
/// The seam between the translation engine and the on-disk store;
/// tests substitute an in-memory implementation.
pub trait PageSource {
    /// Fill `buf` (one page, `PAGE_SIZE` bytes) with the contents of
    /// `page`.
    fn read_page(&mut self, page: PageNr, buf: &mut [u8]) -> Result<()>;
}

/// File-backed page store, opened read-only
#[derive(Debug)]
pub struct BackingStore {
    file: File,
}

impl BackingStore {
    /// Open and size-check the store file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;

        let actual = file.metadata()?.len();
        if actual != STORE_SIZE {
            return Err(Error::StoreSize {
                expected: STORE_SIZE,
                actual,
            });
        }

        Ok(Self { file })
    }
}

impl PageSource for BackingStore {
    fn read_page(&mut self, page: PageNr, buf: &mut [u8]) -> Result<()> {
        debug_assert_eq!(buf.len(), PAGE_SIZE);

        self.file
            .seek(SeekFrom::Start((page * PAGE_SIZE) as u64))?;
        self.file.read_exact(buf).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                Error::ShortRead { page }
            } else {
                Error::Io(err)
            }
        })
    }
}
