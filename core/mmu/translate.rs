//! Address translation
//!
//! The `Mmu` context owns every piece of simulated hardware state: the
//! translation cache, the page table, the frame allocator, physical
//! memory and the run counters, plus the page source that fault
//! handling reads from. One context is constructed per run and driven
//! one logical address at a time; nothing here is shared or static.

use crate::core::mm::{
    frame_to_phys, page_number, page_offset, FrameAllocator, FrameNr, PageNr, PageTable, PhysAddr,
    MEMORY_SIZE, NUM_FRAMES, PAGE_SIZE, TLB_SIZE,
};
use crate::core::mmu::TranslationCache;
use crate::core::stats::StatsCollector;
use crate::drivers::store::PageSource;
use crate::Result;

/// Outcome of translating one logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    /// The logical address as consumed
    pub logical: u16,
    /// Resolved physical address
    pub physical: PhysAddr,
    /// Signed byte stored at the physical address
    pub value: i8,
    /// The mapping came straight from the translation cache
    pub tlb_hit: bool,
    /// The page had to be loaded from the backing store
    pub page_fault: bool,
}

/// The simulated MMU
pub struct Mmu<S: PageSource> {
    tlb: TranslationCache,
    ptable: PageTable,
    frames: FrameAllocator,
    memory: Box<[u8]>,
    store: S,
    stats: StatsCollector,
}

impl<S: PageSource> Mmu<S> {
    /// Create a cold MMU: empty cache, fully unmapped page table, all
    /// frames free.
    pub fn new(store: S) -> Self {
        log::info!(
            "mmu: {} frames of {} bytes, {}-entry TLB",
            NUM_FRAMES,
            PAGE_SIZE,
            TLB_SIZE
        );

        Self {
            tlb: TranslationCache::new(),
            ptable: PageTable::new(),
            frames: FrameAllocator::new(),
            memory: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
            store,
            stats: StatsCollector::new(),
        }
    }

    /// Translate one logical address, faulting the page in if needed
    pub fn translate(&mut self, logical: u16) -> Result<Translation> {
        self.stats.record_translation();

        let page = page_number(logical);
        let offset = page_offset(logical);

        let mut tlb_hit = false;
        let mut page_fault = false;

        let frame = match self.tlb.lookup(page) {
            Some(frame) => {
                self.stats.record_tlb_hit();
                tlb_hit = true;
                frame
            }
            None => {
                let frame = match self.ptable.lookup(page) {
                    Some(frame) => {
                        self.stats.record_page_table_hit();
                        frame
                    }
                    None => {
                        page_fault = true;
                        self.handle_fault(page)?
                    }
                };
                // Cache the mapping whenever it did not come from the
                // cache itself.
                self.tlb.insert(page, frame);
                frame
            }
        };

        let physical = frame_to_phys(frame) + offset;
        let value = self.memory[physical] as i8;

        Ok(Translation {
            logical,
            physical,
            value,
            tlb_hit,
            page_fault,
        })
    }

    /// Load `page` from the backing store into a frame, evicting the
    /// oldest loaded frame when none are free.
    fn handle_fault(&mut self, page: PageNr) -> Result<FrameNr> {
        self.stats.record_fault();

        let grant = self.frames.allocate(page);
        if let Some(victim) = grant.evicted_page {
            self.ptable.unmap(victim);
            let cleared = self.tlb.invalidate(victim);
            log::debug!(
                "evicted page {} from frame {}, {} TLB slot(s) cleared",
                victim,
                grant.frame,
                cleared
            );
        }

        let base = frame_to_phys(grant.frame);
        self.store
            .read_page(page, &mut self.memory[base..base + PAGE_SIZE])?;
        self.ptable.map(page, grant.frame);

        log::debug!("loaded page {} into frame {}", page, grant.frame);
        Ok(grant.frame)
    }

    /// Run counters
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    /// Translation cache state
    pub fn tlb(&self) -> &TranslationCache {
        &self.tlb
    }

    /// Page table state
    pub fn page_table(&self) -> &PageTable {
        &self.ptable
    }

    /// Frame allocator state
    pub fn frames(&self) -> &FrameAllocator {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mm::NUM_PAGES;

    /// In-memory page source: byte at store position `p * PAGE_SIZE + o`
    /// is `(p + o) % 256`.
    struct PatternStore;

    impl PageSource for PatternStore {
        fn read_page(&mut self, page: PageNr, buf: &mut [u8]) -> Result<()> {
            for (offset, byte) in buf.iter_mut().enumerate() {
                *byte = ((page + offset) % 256) as u8;
            }
            Ok(())
        }
    }

    fn addr(page: usize, offset: usize) -> u16 {
        ((page << 8) | offset) as u16
    }

    #[test]
    fn test_cold_address_zero() {
        let mut mmu = Mmu::new(PatternStore);
        let t = mmu.translate(0).unwrap();

        assert_eq!(t.physical, 0);
        assert_eq!(t.value, 0);
        assert!(t.page_fault);
        assert!(!t.tlb_hit);
        assert_eq!(mmu.stats().page_faults(), 1);
    }

    #[test]
    fn test_fault_loads_whole_page() {
        let mut mmu = Mmu::new(PatternStore);
        mmu.translate(addr(7, 0)).unwrap();

        for offset in 0..PAGE_SIZE {
            let t = mmu.translate(addr(7, offset)).unwrap();
            assert_eq!(t.value, ((7 + offset) % 256) as u8 as i8);
        }
        assert_eq!(mmu.stats().page_faults(), 1);
    }

    #[test]
    fn test_repeat_translation_is_tlb_hit() {
        let mut mmu = Mmu::new(PatternStore);
        let first = mmu.translate(addr(3, 20)).unwrap();
        let second = mmu.translate(addr(3, 20)).unwrap();

        assert_eq!(first.physical, second.physical);
        assert_eq!(first.value, second.value);
        assert!(!first.tlb_hit);
        assert!(second.tlb_hit);
        assert!(!second.page_fault);
    }

    #[test]
    fn test_twenty_repeats_one_fault() {
        let mut mmu = Mmu::new(PatternStore);
        for _ in 0..20 {
            mmu.translate(16916).unwrap();
        }

        assert_eq!(mmu.stats().total_translations(), 20);
        assert_eq!(mmu.stats().page_faults(), 1);
        assert_eq!(mmu.stats().tlb_hits(), 19);
    }

    #[test]
    fn test_distinct_pages_fill_frames_in_order() {
        let mut mmu = Mmu::new(PatternStore);
        for page in 0..NUM_FRAMES {
            let t = mmu.translate(addr(page, 0)).unwrap();
            assert!(t.page_fault);
            assert_eq!(t.physical, page * PAGE_SIZE);
        }

        assert_eq!(mmu.stats().page_faults(), NUM_FRAMES as u64);
        assert_eq!(mmu.page_table().mapped_count(), NUM_FRAMES);
        assert_eq!(mmu.frames().free_frames(), 0);
    }

    #[test]
    fn test_eviction_targets_first_loaded_page() {
        let mut mmu = Mmu::new(PatternStore);
        for page in 0..NUM_FRAMES {
            mmu.translate(addr(page, 0)).unwrap();
        }

        // Touch page 0 again so it sits in the TLB; FIFO order must
        // ignore the renewed interest.
        let t = mmu.translate(addr(0, 0)).unwrap();
        assert!(!t.page_fault);
        assert_eq!(mmu.tlb().peek(0), Some(0));

        let t = mmu.translate(addr(NUM_FRAMES, 0)).unwrap();
        assert!(t.page_fault);
        assert_eq!(t.physical, 0);

        // Page 0 lost frame 0 and its cache slot with it.
        assert_eq!(mmu.page_table().lookup(0), None);
        assert_eq!(mmu.tlb().peek(0), None);
        assert_eq!(mmu.page_table().lookup(NUM_FRAMES), Some(0));
    }

    #[test]
    fn test_counters_reconcile() {
        let mut mmu = Mmu::new(PatternStore);
        for page in 0..NUM_PAGES {
            mmu.translate(addr(page, 1)).unwrap();
            mmu.translate(addr(page / 2, 2)).unwrap();
        }

        let stats = mmu.stats();
        assert_eq!(
            stats.total_translations(),
            stats.tlb_hits() + stats.page_table_hits() + stats.page_faults()
        );
    }
}
