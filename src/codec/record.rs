//! Record codec: `Encode` + `Decode` untuk struct dari daftar field
//!
//! Field ditulis dan dibaca persis dalam urutan yang didaftarkan.
//! Tidak ada tag, tidak ada versioning.

/// Generate `Encode` dan `Decode` untuk struct dengan field bernama.
///
/// ```
/// use wirebuf::{wire_record, Buffer};
///
/// #[derive(Debug, PartialEq)]
/// struct Login {
///     user: String,
///     attempts: u32,
///     remember: bool,
/// }
///
/// wire_record!(Login { user, attempts, remember });
///
/// let mut buf = Buffer::new();
/// let login = Login { user: "zm".into(), attempts: 3, remember: true };
/// buf.write(&login)?;
/// assert_eq!(buf.read::<Login>()?, login);
/// # Ok::<(), wirebuf::BufferError>(())
/// ```
///
/// Semua field harus didaftarkan: decode membangun struct secara literal.
#[macro_export]
macro_rules! wire_record {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::Encode for $ty {
            fn encode(&self, buf: &mut $crate::Buffer<'_>) -> $crate::Result<()> {
                $( $crate::Encode::encode(&self.$field, buf)?; )+
                Ok(())
            }
        }

        impl $crate::Decode for $ty {
            fn decode(buf: &mut $crate::Buffer<'_>) -> $crate::Result<Self> {
                Ok(Self {
                    $( $field: $crate::Decode::decode(buf)?, )+
                })
            }
        }
    };
}
