//! Storage Manager: borrowed view atau owned allocation dengan Copy-on-Write
//!
//! Prinsip desain:
//! - Borrowed: slice milik caller, tidak pernah di-free atau di-grow
//! - Owned: `Arc<[u8]>` dengan reference count atomic
//! - COW: allocation yang di-share diduplikasi tepat sebelum write pertama

use std::sync::Arc;
use tracing::{debug, trace};

/// Backing storage untuk sebuah `Buffer`.
///
/// Panjang slice = kapasitas fisik. Ukuran logis disimpan di `Buffer`.
pub(crate) enum Storage<'a> {
    /// Region eksternal, read-only, lifetime dijamin oleh borrow checker
    Borrowed(&'a [u8]),
    /// Allocation sendiri, bisa di-share antar buffer
    Owned(Arc<[u8]>),
}

impl<'a> Storage<'a> {
    /// Owned storage kosong
    #[inline]
    pub(crate) fn empty() -> Self {
        Storage::Owned(Arc::from(Vec::new()))
    }

    /// Owned storage dengan kapasitas tertentu (zero-filled)
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Storage::Owned(Arc::from(vec![0u8; capacity]))
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes().len()
    }

    /// Seluruh region, termasuk bagian di luar ukuran logis
    #[inline(always)]
    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Storage::Borrowed(bytes) => *bytes,
            Storage::Owned(block) => &block[..],
        }
    }

    #[inline(always)]
    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }

    /// True jika allocation tidak eksklusif: dipakai buffer lain
    /// atau masih bisa di-upgrade lewat `Weak`
    #[inline]
    pub(crate) fn is_shared(&self) -> bool {
        match self {
            Storage::Owned(block) => Arc::strong_count(block) > 1 || Arc::weak_count(block) > 0,
            Storage::Borrowed(_) => false,
        }
    }

    /// Ganti allocation dengan yang baru berukuran `capacity`,
    /// menyalin `keep` byte pertama. Tidak berlaku untuk borrowed storage.
    pub(crate) fn reallocate(&mut self, capacity: usize, keep: usize) {
        if let Storage::Owned(block) = self {
            let old_capacity = block.len();
            let fresh = duplicate(block, capacity, keep);
            *block = fresh;
            trace!(old_capacity, capacity, keep, "buffer storage reallocated");
        }
    }

    /// Akses mutable eksklusif ke allocation.
    ///
    /// Jika allocation tidak eksklusif (strong lain atau `Weak` yang hidup),
    /// diduplikasi dulu dengan kapasitas yang sama (COW).
    /// Borrowed storage selalu `None`.
    pub(crate) fn make_mut(&mut self, keep: usize) -> Option<&mut [u8]> {
        match self {
            Storage::Borrowed(_) => None,
            Storage::Owned(block) => {
                if Arc::get_mut(block).is_none() {
                    let capacity = block.len();
                    let fresh = duplicate(block, capacity, keep);
                    *block = fresh;
                    debug!(capacity, keep, "copy-on-write detach");
                }
                Arc::get_mut(block)
            }
        }
    }
}

/// Allocation baru berisi salinan `keep` byte pertama dari `src`
fn duplicate(src: &[u8], capacity: usize, keep: usize) -> Arc<[u8]> {
    let keep = keep.min(capacity).min(src.len());
    let mut fresh = vec![0u8; capacity];
    fresh[..keep].copy_from_slice(&src[..keep]);
    Arc::from(fresh)
}
