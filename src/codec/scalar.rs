//! Fixed-width scalar: representasi byte native apa adanya

use super::{Decode, Encode};
use crate::core::Buffer;
use crate::error::Result;

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline(always)]
                fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
                    buf.append(&self.to_ne_bytes())
                }
            }

            impl Decode for $ty {
                #[inline(always)]
                fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
                    Ok(<$ty>::from_ne_bytes(buf.read_array()?))
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Satu byte: 0 atau 1. Byte non-zero dibaca sebagai `true`.
impl Encode for bool {
    #[inline(always)]
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        buf.append(&[u8::from(*self)])
    }
}

impl Decode for bool {
    #[inline(always)]
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        Ok(u8::decode(buf)? != 0)
    }
}

/// Array fixed: elemen berurutan tanpa count
impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(buf))
    }
}

impl<T: Decode + Default, const N: usize> Decode for [T; N] {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        let mut out: [T; N] = std::array::from_fn(|_| T::default());
        for slot in out.iter_mut() {
            slot.decode_into(buf)?;
        }
        Ok(out)
    }
}
