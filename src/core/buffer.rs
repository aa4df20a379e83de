//! Buffer dengan cursor baca/tulis independen
//!
//! Layout owned buffer:
//! ┌──────────────────────────────┬───────────────────────┐
//! │ konten logis (0..len)        │ kapasitas cadangan    │
//! └──────────────────────────────┴───────────────────────┘
//!   ^read_pos              ^write_pos == len
//!
//! Borrowed buffer: `len` tetap = panjang region, write selalu ditolak.

use super::storage::Storage;
use crate::codec::PrefixWidth;
use crate::error::{BufferError, Result};
use std::fmt;
use std::sync::Arc;

/// Slack yang ditambahkan sebelum pembulatan saat grow
pub const GROWTH_SLACK: usize = 1024;

/// Kapasitas owned buffer selalu kelipatan ini setelah grow
pub const GROWTH_ALIGN: usize = 4096;

/// Default lebar prefix count untuk string dan sequence
pub const DEFAULT_PREFIX_WIDTH: u8 = 2;

/// Binary serialization buffer.
///
/// Dua mode storage:
/// - **Borrowed**: view zero-copy atas memory milik caller (`'a`)
/// - **Owned**: allocation sendiri, growable, copy-on-write saat di-share
///
/// `Clone` pada owned buffer hanya menaikkan reference count; duplikasi
/// baru terjadi pada write pertama. `Clone` pada borrowed buffer menyalin
/// region ke allocation owned yang baru.
pub struct Buffer<'a> {
    storage: Storage<'a>,
    read_pos: usize,
    write_pos: usize,
    len: usize,
    prefix_width: PrefixWidth,
}

impl Buffer<'static> {
    /// Membuat owned buffer kosong
    pub fn new() -> Self {
        Self::owned(Storage::empty(), 0)
    }

    /// Owned buffer kosong dengan kapasitas awal
    pub fn with_capacity(capacity: usize) -> Self {
        Self::owned(Storage::with_capacity(capacity), 0)
    }

    /// Owned buffer berisi salinan `data`
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self::owned(Storage::Owned(Arc::from(data)), data.len())
    }

    /// Adopsi allocation yang sudah ada; seluruh isinya jadi konten logis.
    ///
    /// Allocation tetap di-share dengan pemanggil sampai write pertama.
    pub fn from_shared(block: Arc<[u8]>) -> Self {
        let len = block.len();
        Self::owned(Storage::Owned(block), len)
    }

    fn owned(storage: Storage<'static>, len: usize) -> Self {
        Self {
            storage,
            read_pos: 0,
            write_pos: len,
            len,
            prefix_width: PrefixWidth::DEFAULT,
        }
    }
}

impl<'a> Buffer<'a> {
    /// View zero-copy atas `data`. Read-only, tidak bisa grow.
    pub fn borrowed(data: &'a [u8]) -> Self {
        Self {
            storage: Storage::Borrowed(data),
            read_pos: 0,
            write_pos: 0,
            len: data.len(),
            prefix_width: PrefixWidth::DEFAULT,
        }
    }

    /// Set mode prefix width (builder style)
    #[must_use]
    pub fn with_prefix_width(mut self, width: PrefixWidth) -> Self {
        self.prefix_width = width;
        self
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Ukuran logis konten
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Kapasitas fisik storage
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline(always)]
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    #[inline(always)]
    pub fn is_borrowed(&self) -> bool {
        !self.storage.is_owned()
    }

    /// True jika allocation owned dipakai bersama buffer lain
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.storage.is_shared()
    }

    #[inline(always)]
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    #[inline(always)]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Byte yang belum dibaca
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.len - self.read_pos
    }

    /// Konten logis (0..len)
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage.bytes()[..self.len]
    }

    /// Konten dari read cursor sampai akhir
    #[inline(always)]
    pub fn unread(&self) -> &[u8] {
        &self.as_slice()[self.read_pos..]
    }

    #[inline(always)]
    pub fn prefix_width(&self) -> PrefixWidth {
        self.prefix_width
    }

    /// Ganti mode prefix width; berlaku sampai diganti lagi
    #[inline]
    pub fn set_prefix_width(&mut self, width: PrefixWidth) {
        self.prefix_width = width;
    }

    // ------------------------------------------------------------------
    // Storage management
    // ------------------------------------------------------------------

    /// Pastikan ada ruang untuk `additional` byte di write cursor.
    ///
    /// Borrowed buffer tidak pernah bisa grow. Owned buffer yang kurang
    /// ruang dialokasikan ulang ke `((wpos + additional + 1024) / 4096 + 1) * 4096`.
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        if !self.storage.is_owned() {
            return Err(self.capacity_error("grow", additional));
        }
        let needed = self
            .write_pos
            .checked_add(additional)
            .ok_or_else(|| self.capacity_error("grow", additional))?;
        if needed > self.storage.capacity() {
            let target = (needed.saturating_add(GROWTH_SLACK) / GROWTH_ALIGN + 1) * GROWTH_ALIGN;
            self.storage.reallocate(target, self.len);
        }
        Ok(())
    }

    /// Copy-on-write trigger: setelah ini allocation pasti eksklusif.
    ///
    /// Allocation yang tidak di-share tidak disentuh. Borrowed buffer
    /// tidak punya allocation yang bisa ditulis: error capacity.
    #[inline]
    pub fn ensure_exclusive(&mut self) -> Result<()> {
        self.exclusive_bytes("detach", 0).map(drop)
    }

    /// Satu-satunya jalur ke byte mutable; detach dulu jika di-share
    fn exclusive_bytes(&mut self, op: &'static str, requested: usize) -> Result<&mut [u8]> {
        let err = self.capacity_error(op, requested);
        self.storage.make_mut(self.len).ok_or(err)
    }

    /// Alokasi ulang storage ke tepat `new_size` byte.
    ///
    /// Konten dipotong jika `new_size` lebih kecil dari ukuran logis.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        if !self.storage.is_owned() {
            return Err(self.capacity_error("resize", new_size));
        }
        self.storage.reallocate(new_size, self.len);
        self.len = self.len.min(new_size);
        self.write_pos = self.len;
        self.read_pos = self.read_pos.min(self.len);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cursor protocol
    // ------------------------------------------------------------------

    /// Slice `len` byte mulai `offset`, tanpa menggeser cursor
    pub fn peek(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = self.checked_end("peek", offset, len)?;
        Ok(&self.as_slice()[offset..end])
    }

    /// Salin `dest.len()` byte mulai `offset` ke `dest`
    pub fn peek_into(&self, offset: usize, dest: &mut [u8]) -> Result<()> {
        let src = self.peek(offset, dest.len())?;
        dest.copy_from_slice(src);
        Ok(())
    }

    /// Baca `len` byte dari read cursor lalu geser cursor
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        let start = self.read_pos;
        let end = self.checked_end("read", start, len)?;
        self.read_pos = end;
        Ok(&self.as_slice()[start..end])
    }

    /// Isi `dest` penuh dari read cursor
    pub fn read_into_slice(&mut self, dest: &mut [u8]) -> Result<()> {
        let src = self.read_bytes(dest.len())?;
        dest.copy_from_slice(src);
        Ok(())
    }

    /// Baca tepat `N` byte (dipakai oleh scalar codec)
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_into_slice(&mut out)?;
        Ok(out)
    }

    /// Tulis `src` di write cursor, grow dan detach jika perlu
    pub fn append(&mut self, src: &[u8]) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        if !self.storage.is_owned() {
            return Err(self.capacity_error("append", src.len()));
        }
        self.ensure_capacity(src.len())?;

        let start = self.write_pos;
        let end = start + src.len();
        let bytes = self.exclusive_bytes("append", src.len())?;
        bytes[start..end].copy_from_slice(src);

        self.write_pos = end;
        self.len = end;
        Ok(())
    }

    /// Tempel konten logis buffer lain apa adanya
    pub fn append_buffer(&mut self, other: &Buffer<'_>) -> Result<()> {
        self.append(other.as_slice())
    }

    /// Overwrite di `offset` tanpa menggeser cursor.
    ///
    /// Dipakai untuk backpatch count yang sudah di-reserve.
    pub fn put(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        if !self.storage.is_owned() {
            return Err(self.capacity_error("put", src.len()));
        }
        let end = self.checked_end("put", offset, src.len())?;
        let bytes = self.exclusive_bytes("put", src.len())?;
        bytes[offset..end].copy_from_slice(src);
        Ok(())
    }

    /// Pindahkan read cursor, di-clamp ke `[0, len]`
    pub fn set_read_pos(&mut self, pos: usize) -> usize {
        self.read_pos = pos.min(self.len);
        self.read_pos
    }

    /// Pindahkan write cursor, di-clamp ke `[0, capacity]`.
    ///
    /// Pada owned buffer ukuran logis ikut berpindah.
    pub fn set_write_pos(&mut self, pos: usize) -> usize {
        self.write_pos = pos.min(self.storage.capacity());
        if self.storage.is_owned() {
            self.len = self.write_pos;
            self.read_pos = self.read_pos.min(self.len);
        }
        self.write_pos
    }

    /// Reset cursor. Kapasitas owned buffer dipertahankan.
    pub fn clear(&mut self) {
        self.read_pos = 0;
        if self.storage.is_owned() {
            self.write_pos = 0;
            self.len = 0;
        }
    }

    /// Salinan yang berbagi allocation (owned) atau deep copy (borrowed)
    pub fn share(&self) -> Buffer<'static> {
        let storage = match &self.storage {
            Storage::Owned(block) => Storage::Owned(Arc::clone(block)),
            Storage::Borrowed(bytes) => Storage::Owned(Arc::from(*bytes)),
        };
        Buffer {
            storage,
            read_pos: 0,
            write_pos: self.len,
            len: self.len,
            prefix_width: self.prefix_width,
        }
    }

    /// Lepas ketergantungan pada lifetime region borrowed.
    ///
    /// Cursor baca dan mode prefix dipertahankan.
    pub fn into_owned(self) -> Buffer<'static> {
        let storage = match self.storage {
            Storage::Owned(block) => Storage::Owned(block),
            Storage::Borrowed(bytes) => Storage::Owned(Arc::from(bytes)),
        };
        Buffer {
            storage,
            read_pos: self.read_pos,
            write_pos: self.len,
            len: self.len,
            prefix_width: self.prefix_width,
        }
    }

    /// Salinan konten logis sebagai `Vec<u8>`
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    #[inline]
    fn checked_end(&self, op: &'static str, offset: usize, len: usize) -> Result<usize> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => Ok(end),
            _ => Err(BufferError::Range {
                op,
                read_pos: self.read_pos,
                write_pos: self.write_pos,
                requested: len,
                len: self.len,
            }),
        }
    }

    #[cold]
    fn capacity_error(&self, op: &'static str, requested: usize) -> BufferError {
        BufferError::Capacity {
            op,
            read_pos: self.read_pos,
            write_pos: self.write_pos,
            requested,
            len: self.len,
        }
    }
}

impl Default for Buffer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Buffer<'_> {
    fn clone(&self) -> Self {
        self.share()
    }
}

impl From<Vec<u8>> for Buffer<'static> {
    fn from(data: Vec<u8>) -> Self {
        let len = data.len();
        Self::owned(Storage::Owned(Arc::from(data)), len)
    }
}

impl AsRef<[u8]> for Buffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for Buffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Buffer<'_> {}

impl fmt::Debug for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("owned", &self.is_owned())
            .field("shared", &self.is_shared())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("read_pos", &self.read_pos)
            .field("write_pos", &self.write_pos)
            .field("prefix_width", &self.prefix_width.bytes())
            .finish()
    }
}
