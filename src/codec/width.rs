//! Prefix width: lebar byte count untuk string dan container
//!
//! Count ditulis dalam native byte order, tepat `width` byte
//! (byte low-order dari representasi native).

use super::{Decode, Encode};
use crate::core::{Buffer, DEFAULT_PREFIX_WIDTH};
use crate::error::{BufferError, Result};

/// Lebar prefix count, `0..=8` byte.
///
/// `0` berarti string ditulis null-terminated; tidak valid untuk container.
///
/// Nilai ini juga berfungsi sebagai marker: `buf.write(&width)` dan
/// `buf.read_into(&mut width)` mengganti mode buffer tanpa menulis
/// atau membaca byte apa pun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefixWidth(u8);

impl PrefixWidth {
    /// Mode null-terminated untuk string
    pub const TERMINATED: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const DEFAULT: Self = Self(DEFAULT_PREFIX_WIDTH);
    pub const FOUR: Self = Self(4);
    pub const EIGHT: Self = Self(8);

    /// Lebar maksimum (u64)
    pub const MAX: u8 = 8;

    pub fn new(width: u8) -> Result<Self> {
        if width > Self::MAX {
            return Err(BufferError::InvalidPrefixWidth {
                width,
                op: "prefix width",
            });
        }
        Ok(Self(width))
    }

    #[inline(always)]
    pub const fn bytes(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn is_terminated(self) -> bool {
        self.0 == 0
    }
}

impl Default for PrefixWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Encode for PrefixWidth {
    /// Ganti mode buffer, tidak menulis byte
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        buf.set_prefix_width(*self);
        Ok(())
    }
}

impl Decode for PrefixWidth {
    /// Mode buffer saat ini, tidak membaca byte
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        Ok(buf.prefix_width())
    }

    /// Ganti mode buffer ke nilai marker ini
    fn decode_into(&mut self, buf: &mut Buffer<'_>) -> Result<()> {
        buf.set_prefix_width(*self);
        Ok(())
    }
}

/// Encode `count` ke `width` byte native-order
fn count_bytes(count: usize, width: u8) -> Result<([u8; 8], usize)> {
    let w = usize::from(width);
    if w == 0 || w > usize::from(PrefixWidth::MAX) {
        return Err(BufferError::InvalidPrefixWidth { width, op: "count" });
    }

    let value = count as u64;
    if w < 8 && value >> (w * 8) != 0 {
        return Err(BufferError::CountOverflow { count, width });
    }

    let native = value.to_ne_bytes();
    let mut out = [0u8; 8];
    if cfg!(target_endian = "little") {
        out[..w].copy_from_slice(&native[..w]);
    } else {
        out[..w].copy_from_slice(&native[8 - w..]);
    }
    Ok((out, w))
}

/// Tulis count di write cursor
pub(crate) fn write_count(buf: &mut Buffer<'_>, count: usize, width: u8) -> Result<()> {
    let (bytes, w) = count_bytes(count, width)?;
    buf.append(&bytes[..w])
}

/// Backpatch count di `offset` (posisi yang sudah di-reserve)
pub(crate) fn put_count(buf: &mut Buffer<'_>, offset: usize, count: usize, width: u8) -> Result<()> {
    let (bytes, w) = count_bytes(count, width)?;
    buf.put(offset, &bytes[..w])
}

/// Baca count `width` byte dari read cursor
pub(crate) fn read_count(buf: &mut Buffer<'_>, width: u8) -> Result<usize> {
    let w = usize::from(width);
    if w == 0 || w > usize::from(PrefixWidth::MAX) {
        return Err(BufferError::InvalidPrefixWidth { width, op: "count" });
    }

    let mut native = [0u8; 8];
    let src = buf.read_bytes(w)?;
    if cfg!(target_endian = "little") {
        native[..w].copy_from_slice(src);
    } else {
        native[8 - w..].copy_from_slice(src);
    }

    let value = u64::from_ne_bytes(native);
    usize::try_from(value).map_err(|_| BufferError::CountOverflow {
        count: usize::MAX,
        width,
    })
}
