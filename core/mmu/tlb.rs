//! Translation cache (TLB)
//!
//! A 16-slot fully associative cache of page-to-frame mappings sitting
//! in front of the page table:
//! - lookup and insert are linear scans over the fixed slot array
//! - replacement inside the cache is least-recently-used, driven by a
//!   monotonically increasing recency stamp
//! - eviction of a page from physical memory invalidates every slot
//!   that still names it, so valid slots are always a subset of the
//!   page table's mapped entries

use crate::core::mm::{FrameNr, PageNr, TLB_SIZE};

/// One valid cache slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TlbSlot {
    page: PageNr,
    frame: FrameNr,
    /// Recency stamp; larger means more recently used
    stamp: u64,
}

/// Fixed-capacity translation cache with LRU replacement
pub struct TranslationCache {
    slots: [Option<TlbSlot>; TLB_SIZE],
    /// Global recency counter, bumped on every hit and every insert
    clock: u64,
}

impl TranslationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: [None; TLB_SIZE],
            clock: 0,
        }
    }

    /// Look up a page, refreshing its recency stamp on a hit
    pub fn lookup(&mut self, page: PageNr) -> Option<FrameNr> {
        for slot in self.slots.iter_mut().flatten() {
            if slot.page == page {
                self.clock += 1;
                slot.stamp = self.clock;
                return Some(slot.frame);
            }
        }
        None
    }

    /// Inspect a page's slot without touching recency state
    ///
    /// Debug/test probe; a real lookup goes through [`lookup`].
    ///
    /// [`lookup`]: TranslationCache::lookup
    pub fn peek(&self, page: PageNr) -> Option<FrameNr> {
        self.slots
            .iter()
            .flatten()
            .find(|slot| slot.page == page)
            .map(|slot| slot.frame)
    }

    /// Insert a mapping, preferring the first empty slot and otherwise
    /// replacing the least recently used one (lowest index on ties).
    pub fn insert(&mut self, page: PageNr, frame: FrameNr) {
        let mut victim = 0;
        let mut victim_stamp = u64::MAX;

        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                None => {
                    victim = index;
                    break;
                }
                Some(slot) if slot.stamp < victim_stamp => {
                    victim = index;
                    victim_stamp = slot.stamp;
                }
                Some(_) => {}
            }
        }

        self.clock += 1;
        self.slots[victim] = Some(TlbSlot {
            page,
            frame,
            stamp: self.clock,
        });
    }

    /// Clear every slot naming `page`; returns how many were cleared
    pub fn invalidate(&mut self, page: PageNr) -> usize {
        let mut count = 0;
        for slot in self.slots.iter_mut() {
            if matches!(slot, Some(s) if s.page == page) {
                *slot = None;
                count += 1;
            }
        }
        count
    }

    /// Number of valid slots
    pub fn valid_entries(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}
