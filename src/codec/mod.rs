//! Codec Layer: Schema-less, Order-Dependent Binary Encoding
//!
//! Prinsip desain:
//! - Tanpa tag tipe: reader harus tahu urutan dan tipe field
//! - Native byte order dan native width
//! - Rekursif: container memanggil codec elemennya sendiri
//!
//! Format wire:
//! ```text
//! scalar     : [size_of::<T>() byte, native order]
//! string     : [prefix_width byte: count][count byte]   (width > 0)
//!              [byte...][0]                             (width == 0)
//! sequence   : [prefix_width byte: count][elemen...]
//! set / map  : [4 byte: count][elemen... | key value...]
//! tuple      : [field 0][field 1]...
//! ```

mod container;
mod record;
mod scalar;
mod string;
mod width;

pub use container::{pack, pack_seq_with, unpack, unpack_seq_with, CountWidth, FIXED_COUNT_WIDTH};
pub use string::{read_string_with, write_str_with, WideString};
pub use width::PrefixWidth;

use crate::core::Buffer;
use crate::error::Result;

/// Tipe yang bisa ditulis ke `Buffer`
pub trait Encode {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()>;
}

/// Tipe yang bisa dibaca dari `Buffer`.
///
/// Urutan baca harus identik dengan urutan tulis.
pub trait Decode: Sized {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self>;

    /// Decode ke nilai yang sudah ada.
    ///
    /// Default: ganti `self` dengan hasil `decode`.
    fn decode_into(&mut self, buf: &mut Buffer<'_>) -> Result<()> {
        *self = Self::decode(buf)?;
        Ok(())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        (**self).encode(buf)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    #[inline]
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        (**self).encode(buf)
    }
}

impl<T: Decode> Decode for Box<T> {
    #[inline]
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        T::decode(buf).map(Box::new)
    }
}

/// Buffer lain ditempel apa adanya, tanpa count
impl Encode for Buffer<'_> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        buf.append_buffer(self)
    }
}

impl<'a> Buffer<'a> {
    /// Tulis `value`, bisa di-chain: `buf.write(&a)?.write(&b)?`
    #[inline]
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        value.encode(self)?;
        Ok(self)
    }

    /// Baca satu nilai dari read cursor
    #[inline]
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Baca ke nilai yang sudah ada, bisa di-chain
    #[inline]
    pub fn read_into<T: Decode>(&mut self, dst: &mut T) -> Result<&mut Self> {
        dst.decode_into(self)?;
        Ok(self)
    }
}
