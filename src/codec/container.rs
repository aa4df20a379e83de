//! Container Codec: satu algoritma pack/unpack untuk semua container
//!
//! Pack: reserve count → tulis elemen → backpatch count
//! Unpack: baca count → alokasi awal → decode `count` elemen
//!
//! Perbedaan antar container hanya di lebar count dan adapter elemen.

use super::width::{put_count, read_count};
use super::{Decode, Encode};
use crate::core::Buffer;
use crate::error::{BufferError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Lebar count untuk set dan map (tidak mengikuti mode buffer)
pub const FIXED_COUNT_WIDTH: u8 = 4;

/// Kebijakan lebar count untuk `pack` / `unpack`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidth {
    /// Ikuti mode prefix width buffer (sequence)
    Mode,
    /// Selalu `FIXED_COUNT_WIDTH` byte (set, map)
    Fixed,
    /// Lebar eksplisit per panggilan
    Bytes(u8),
}

impl CountWidth {
    fn resolve(self, buf: &Buffer<'_>, op: &'static str) -> Result<u8> {
        let width = match self {
            CountWidth::Mode => buf.prefix_width().bytes(),
            CountWidth::Fixed => FIXED_COUNT_WIDTH,
            CountWidth::Bytes(width) => width,
        };
        if width == 0 || width > super::PrefixWidth::MAX {
            return Err(BufferError::InvalidPrefixWidth { width, op });
        }
        Ok(width)
    }
}

/// Pack elemen dari `items` dengan count di depan.
///
/// Returns jumlah elemen yang ditulis. Count baru divalidasi saat
/// backpatch: pada `CountOverflow` slot count (nol) dan semua elemen
/// tetap ada di buffer.
pub fn pack<'b, I, F>(
    buf: &mut Buffer<'b>,
    items: I,
    width: CountWidth,
    mut encode_item: F,
) -> Result<usize>
where
    I: IntoIterator,
    F: FnMut(&mut Buffer<'b>, I::Item) -> Result<()>,
{
    let width = width.resolve(buf, "pack")?;
    let at = buf.write_pos();
    buf.append(&[0u8; 8][..usize::from(width)])?;

    let mut count = 0usize;
    for item in items {
        encode_item(buf, item)?;
        count += 1;
    }

    put_count(buf, at, count, width)?;
    Ok(count)
}

/// Unpack `count` elemen ke container hasil `init`.
///
/// `init` menerima hint kapasitas: `count` dibatasi sisa byte,
/// sehingga count korup tidak memicu alokasi besar.
pub fn unpack<'b, C, F>(
    buf: &mut Buffer<'b>,
    width: CountWidth,
    init: impl FnOnce(usize) -> C,
    mut decode_item: F,
) -> Result<C>
where
    F: FnMut(&mut Buffer<'b>, &mut C) -> Result<()>,
{
    let width = width.resolve(buf, "unpack")?;
    let count = read_count(buf, width)?;

    let mut out = init(count.min(buf.remaining()));
    for _ in 0..count {
        decode_item(buf, &mut out)?;
    }
    Ok(out)
}

/// Pack sequence dengan lebar count eksplisit
pub fn pack_seq_with<'b, I>(buf: &mut Buffer<'b>, items: I, width: u8) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Encode,
{
    pack(buf, items, CountWidth::Bytes(width), |buf, item| item.encode(buf))
}

/// Unpack sequence dengan lebar count eksplisit
pub fn unpack_seq_with<T: Decode>(buf: &mut Buffer<'_>, width: u8) -> Result<Vec<T>> {
    unpack(buf, CountWidth::Bytes(width), Vec::with_capacity, |buf, out| {
        out.push(T::decode(buf)?);
        Ok(())
    })
}

// ----------------------------------------------------------------------
// Sequence: count mengikuti mode buffer
// ----------------------------------------------------------------------

impl<T: Encode> Encode for [T] {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Mode, |buf, item| item.encode(buf)).map(drop)
    }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        self.as_slice().encode(buf)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        unpack(buf, CountWidth::Mode, Vec::with_capacity, |buf, out| {
            out.push(T::decode(buf)?);
            Ok(())
        })
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Mode, |buf, item| item.encode(buf)).map(drop)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        unpack(buf, CountWidth::Mode, VecDeque::with_capacity, |buf, out| {
            out.push_back(T::decode(buf)?);
            Ok(())
        })
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Mode, |buf, item| item.encode(buf)).map(drop)
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        unpack(buf, CountWidth::Mode, |_| LinkedList::new(), |buf, out| {
            out.push_back(T::decode(buf)?);
            Ok(())
        })
    }
}

// ----------------------------------------------------------------------
// Set: count fixed 4 byte, duplikat saat decode diabaikan
// ----------------------------------------------------------------------

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Fixed, |buf, item| item.encode(buf)).map(drop)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        unpack(buf, CountWidth::Fixed, |_| BTreeSet::new(), |buf, out| {
            out.insert(T::decode(buf)?);
            Ok(())
        })
    }
}

impl<T: Encode, S> Encode for HashSet<T, S> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Fixed, |buf, item| item.encode(buf)).map(drop)
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        let init = |n| HashSet::with_capacity_and_hasher(n, S::default());
        unpack(buf, CountWidth::Fixed, init, |buf, out| {
            out.insert(T::decode(buf)?);
            Ok(())
        })
    }
}

// ----------------------------------------------------------------------
// Map: count fixed 4 byte, lalu key value berurutan.
// Key duplikat saat decode: entry pertama yang dipakai.
// ----------------------------------------------------------------------

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Fixed, |buf, (k, v)| {
            k.encode(buf)?;
            v.encode(buf)
        })
        .map(drop)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        unpack(buf, CountWidth::Fixed, |_| BTreeMap::new(), |buf, out| {
            let k = K::decode(buf)?;
            let v = V::decode(buf)?;
            out.entry(k).or_insert(v);
            Ok(())
        })
    }
}

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        pack(buf, self, CountWidth::Fixed, |buf, (k, v)| {
            k.encode(buf)?;
            v.encode(buf)
        })
        .map(drop)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        let init = |n| HashMap::with_capacity_and_hasher(n, S::default());
        unpack(buf, CountWidth::Fixed, init, |buf, out| {
            let k = K::decode(buf)?;
            let v = V::decode(buf)?;
            out.entry(k).or_insert(v);
            Ok(())
        })
    }
}

// ----------------------------------------------------------------------
// Tuple: tanpa count, field berurutan
// ----------------------------------------------------------------------

macro_rules! impl_tuple {
    ($($name:ident)+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
                let ($($name,)+) = self;
                $($name.encode(buf)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
                Ok(($($name::decode(buf)?,)+))
            }
        }
    };
}

impl_tuple!(A B);
impl_tuple!(A B C);
impl_tuple!(A B C D);
impl_tuple!(A B C D E);
impl_tuple!(A B C D E F);
