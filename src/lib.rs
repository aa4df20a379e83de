//! Wirebuf - Copy-on-Write Binary Serialization Buffer
//!
//! Arsitektur:
//! - Storage: borrowed view (zero-copy) atau owned allocation (COW)
//! - Cursor: read/write offset independen, bounds-checked
//! - Codec: `Encode` / `Decode` untuk scalar, string, container, record
//! - Wire format: flat, tanpa header, tanpa tag, native byte order
//!
//! ```
//! use std::collections::BTreeMap;
//! use wirebuf::{Buffer, PrefixWidth};
//!
//! let mut buf = Buffer::new();
//! buf.write(&42u32)?
//!     .write("hello")?
//!     .write(&vec![1u8, 2, 3])?
//!     .write(&BTreeMap::from([(1u8, "a".to_string())]))?;
//!
//! // Clone hanya berbagi allocation
//! let mut reader = buf.clone();
//! assert_eq!(reader.read::<u32>()?, 42);
//! assert_eq!(reader.read::<String>()?, "hello");
//! assert_eq!(reader.read::<Vec<u8>>()?, vec![1, 2, 3]);
//! assert_eq!(reader.read::<BTreeMap<u8, String>>()?.len(), 1);
//!
//! // Zero-copy view atas memory milik caller
//! let raw = [5u8, b'h', b'e', b'l', b'l', b'o'];
//! let mut view = Buffer::borrowed(&raw).with_prefix_width(PrefixWidth::ONE);
//! assert_eq!(view.read::<String>()?, "hello");
//! # Ok::<(), wirebuf::BufferError>(())
//! ```

pub mod codec;
pub mod core;
mod error;

pub use crate::codec::{Decode, Encode, PrefixWidth, WideString};
pub use crate::core::{Buffer, MappedFile};
pub use crate::error::{BufferError, Result};
