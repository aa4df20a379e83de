//! Memory-Mapped File untuk Zero-Copy Decode
//!
//! File di-mmap langsung ke virtual memory, lalu dipinjamkan sebagai
//! borrowed `Buffer`:
//! - Zero-copy read: decode langsung dari page cache
//! - Lifetime aman: `Buffer<'_>` tidak bisa hidup lebih lama dari mapping
//! - Persistence: konten buffer ditulis balik lewat mapping writable

use super::buffer::Buffer;
use crate::error::Result;
use memmap2::{Mmap, MmapOptions};
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::debug;

/// File read-only yang di-mmap
#[derive(Debug)]
pub struct MappedFile {
    // None untuk file kosong: mmap dengan panjang 0 tidak portable
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Membuka dan mmap file secara read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            debug!(path = %path.display(), "mapped empty file");
            return Ok(Self { mmap: None });
        }

        // SAFETY: Mapping read-only; caller tidak boleh truncate file
        // selama MappedFile masih hidup.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        debug!(path = %path.display(), len, "mapped file");

        Ok(Self { mmap: Some(mmap) })
    }

    /// Isi file
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrowed buffer di atas mapping (TRUE zero-copy!)
    pub fn buffer(&self) -> Buffer<'_> {
        Buffer::borrowed(self.as_slice())
    }

    /// Tulis konten logis `buf` ke `path` lewat mapping writable.
    ///
    /// File dibuat jika belum ada dan dipotong ke ukuran konten.
    pub fn persist<P: AsRef<Path>>(path: P, buf: &Buffer<'_>) -> Result<()> {
        let path = path.as_ref();
        let data = buf.as_slice();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(data.len() as u64)?;

        if data.is_empty() {
            return Ok(());
        }

        // SAFETY: File baru saja dibuka read/write dan di-set ke ukuran data
        let mut mmap = unsafe { MmapOptions::new().len(data.len()).map_mut(&file)? };
        mmap.copy_from_slice(data);
        mmap.flush()?;

        debug!(path = %path.display(), len = data.len(), "persisted buffer");
        Ok(())
    }
}
