//! Error types untuk semua operasi buffer dan codec.
//!
//! Semua kegagalan bounds membawa snapshot cursor saat error terjadi,
//! sehingga caller bisa melihat persis di mana decoding berhenti.

use std::io;

/// Result type untuk operasi buffer
pub type Result<T, E = BufferError> = std::result::Result<T, E>;

/// Error yang dihasilkan oleh buffer dan codec layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BufferError {
    /// Read atau peek melewati ukuran logis.
    #[error("{op}: range exceeded (rpos={read_pos}, wpos={write_pos}, requested={requested}, len={len})")]
    Range {
        /// Operasi yang mendeteksi pelanggaran
        op: &'static str,
        read_pos: usize,
        write_pos: usize,
        requested: usize,
        len: usize,
    },

    /// Grow, append, put, resize atau detach pada borrowed view.
    #[error("{op}: borrowed buffer is read-only (rpos={read_pos}, wpos={write_pos}, requested={requested}, len={len})")]
    Capacity {
        /// Operasi yang mendeteksi pelanggaran
        op: &'static str,
        read_pos: usize,
        write_pos: usize,
        requested: usize,
        len: usize,
    },

    /// Prefix width tidak bisa dipakai untuk operasi ini.
    #[error("{op}: invalid prefix width {width}")]
    InvalidPrefixWidth { width: u8, op: &'static str },

    /// Jumlah elemen tidak muat di prefix width yang dipakai.
    #[error("count {count} does not fit in {width} byte(s)")]
    CountOverflow { count: usize, width: u8 },

    /// Byte string hasil decode bukan UTF-8 valid.
    #[error("invalid utf-8 string ending at rpos={read_pos}")]
    InvalidUtf8 {
        read_pos: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// IO error dari mapped file
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl BufferError {
    /// Nama operasi yang gagal, jika error berasal dari cursor protocol
    pub fn op(&self) -> Option<&'static str> {
        match self {
            Self::Range { op, .. } | Self::Capacity { op, .. } => Some(*op),
            Self::InvalidPrefixWidth { op, .. } => Some(*op),
            _ => None,
        }
    }

    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    #[inline]
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::Capacity { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message_carries_cursors() {
        let err = BufferError::Range {
            op: "read",
            read_pos: 4,
            write_pos: 8,
            requested: 16,
            len: 8,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("read:"));
        assert!(msg.contains("rpos=4"));
        assert!(msg.contains("requested=16"));
        assert_eq!(err.op(), Some("read"));
        assert!(err.is_range());
        assert!(!err.is_capacity());
    }

    #[test]
    fn test_io_conversion() {
        let err: BufferError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, BufferError::Io(_)));
        assert_eq!(err.op(), None);
    }
}
