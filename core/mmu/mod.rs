//! MMU front end
//!
//! The translation cache and the translator that drives it, the page
//! table and the frame allocator.

pub mod tlb;
pub mod translate;

pub use tlb::TranslationCache;
pub use translate::{Mmu, Translation};
