//! String codec dengan dua mode:
//! - Length-prefixed (width > 0): `[count][bytes]`, tanpa terminator
//! - Terminated (width == 0): `[bytes][0]`
//!
//! Count untuk `WideString` adalah jumlah unit u16, bukan byte.

use super::width::{read_count, write_count};
use super::{Decode, Encode, PrefixWidth};
use crate::core::Buffer;
use crate::error::{BufferError, Result};

/// Tulis `s` dengan prefix width eksplisit, mengabaikan mode buffer.
///
/// Mode terminated mengikuti kontrak C-string: `s` ditulis apa adanya,
/// jadi byte nol di dalam `s` membuat reader berhenti lebih awal dan
/// field berikutnya ikut bergeser. Pakai mode length-prefixed untuk
/// string yang bisa berisi `\0`.
pub fn write_str_with(buf: &mut Buffer<'_>, s: &str, width: PrefixWidth) -> Result<()> {
    if width.is_terminated() {
        buf.append(s.as_bytes())?;
        return buf.append(&[0]);
    }
    write_count(buf, s.len(), width.bytes())?;
    buf.append(s.as_bytes())
}

/// Baca string dengan prefix width eksplisit, mengabaikan mode buffer
pub fn read_string_with(buf: &mut Buffer<'_>, width: PrefixWidth) -> Result<String> {
    let bytes = if width.is_terminated() {
        read_terminated(buf)?
    } else {
        let count = read_count(buf, width.bytes())?;
        buf.read_bytes(count)?.to_vec()
    };
    String::from_utf8(bytes).map_err(|source| BufferError::InvalidUtf8 {
        read_pos: buf.read_pos(),
        source,
    })
}

/// Byte sampai terminator nol (eksklusif); terminator ikut dikonsumsi.
///
/// Tanpa terminator, read cursor berhenti di akhir buffer dan
/// error range dikembalikan.
fn read_terminated(buf: &mut Buffer<'_>) -> Result<Vec<u8>> {
    let terminator = buf.unread().iter().position(|&b| b == 0);
    match terminator {
        Some(end) => {
            let bytes = buf.read_bytes(end)?.to_vec();
            buf.read_bytes(1)?;
            Ok(bytes)
        }
        None => {
            let end = buf.len();
            buf.set_read_pos(end);
            buf.read_bytes(1).map(|_| Vec::new())
        }
    }
}

impl Encode for str {
    #[inline]
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        let width = buf.prefix_width();
        write_str_with(buf, self, width)
    }
}

impl Encode for String {
    #[inline]
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        self.as_str().encode(buf)
    }
}

impl Decode for String {
    #[inline]
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        let width = buf.prefix_width();
        read_string_with(buf, width)
    }
}

/// String UTF-16 (unit u16, native order).
///
/// Dalam mode terminated, terminator adalah satu unit u16 bernilai nol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WideString(pub Vec<u16>);

impl WideString {
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Konversi ke `String`, unit invalid diganti U+FFFD
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl Encode for WideString {
    fn encode(&self, buf: &mut Buffer<'_>) -> Result<()> {
        let width = buf.prefix_width();
        if !width.is_terminated() {
            write_count(buf, self.0.len(), width.bytes())?;
        }
        for unit in &self.0 {
            unit.encode(buf)?;
        }
        if width.is_terminated() {
            0u16.encode(buf)?;
        }
        Ok(())
    }
}

impl Decode for WideString {
    fn decode(buf: &mut Buffer<'_>) -> Result<Self> {
        let width = buf.prefix_width();
        let mut units = Vec::new();
        if width.is_terminated() {
            loop {
                let unit = u16::decode(buf)?;
                if unit == 0 {
                    break;
                }
                units.push(unit);
            }
        } else {
            let count = read_count(buf, width.bytes())?;
            units.reserve(count.min(buf.remaining() / 2));
            for _ in 0..count {
                units.push(u16::decode(buf)?);
            }
        }
        Ok(Self(units))
    }
}
