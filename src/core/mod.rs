//! Core module: Storage Manager + Cursor Protocol
//!
//! Prinsip desain:
//! - Zero-Copy: borrowed view langsung atas memory caller atau mmap
//! - Copy-on-Write: clone owned buffer hanya menaikkan reference count
//! - Bounds-checked: setiap akses dicek terhadap ukuran logis

mod buffer;
mod mapped;
mod storage;

pub use buffer::{Buffer, DEFAULT_PREFIX_WIDTH, GROWTH_ALIGN, GROWTH_SLACK};
pub use mapped::MappedFile;
