//! Round-trip, COW isolation, dan growth test lewat public API
//!
//! Usage:
//!   cargo test --test roundtrip

use pretty_assertions::assert_eq;
use proptest::collection::{btree_map, btree_set, hash_map, vec};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use wirebuf::codec::{pack_seq_with, unpack_seq_with};
use wirebuf::{wire_record, Buffer, BufferError, MappedFile, PrefixWidth};

#[derive(Debug, Clone, PartialEq)]
struct Config {
    name: String,
    retries: u8,
    timeout_ms: u32,
    ratio: f64,
    tags: BTreeSet<String>,
    limits: BTreeMap<String, Vec<i64>>,
}

wire_record!(Config {
    name,
    retries,
    timeout_ms,
    ratio,
    tags,
    limits,
});

fn arb_config() -> impl Strategy<Value = Config> {
    (
        ".{0,24}",
        any::<u8>(),
        any::<u32>(),
        -1e9f64..1e9,
        btree_set("[a-z]{0,8}", 0..6),
        btree_map("[a-z]{1,6}", vec(any::<i64>(), 0..5), 0..4),
    )
        .prop_map(|(name, retries, timeout_ms, ratio, tags, limits)| Config {
            name,
            retries,
            timeout_ms,
            ratio,
            tags,
            limits,
        })
}

fn arb_width() -> impl Strategy<Value = PrefixWidth> {
    (1u8..=8).prop_map(|w| PrefixWidth::new(w).unwrap())
}

proptest! {
    #[test]
    fn narrow_scalars_roundtrip(a in any::<u8>(), b in any::<i8>(), c in any::<u16>(),
                                d in any::<i16>(), e in any::<u32>(), f in any::<i32>(),
                                g in any::<u64>()) {
        let mut buf = Buffer::new();
        buf.write(&a)?.write(&b)?.write(&c)?.write(&d)?
            .write(&e)?.write(&f)?.write(&g)?;
        prop_assert_eq!(buf.len(), 1 + 1 + 2 + 2 + 4 + 4 + 8);

        prop_assert_eq!(buf.read::<u8>()?, a);
        prop_assert_eq!(buf.read::<i8>()?, b);
        prop_assert_eq!(buf.read::<u16>()?, c);
        prop_assert_eq!(buf.read::<i16>()?, d);
        prop_assert_eq!(buf.read::<u32>()?, e);
        prop_assert_eq!(buf.read::<i32>()?, f);
        prop_assert_eq!(buf.read::<u64>()?, g);
        prop_assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn wide_scalars_roundtrip(a in any::<i64>(), b in any::<u128>(), c in any::<i128>(),
                              d in any::<usize>(), e in any::<isize>(), f in any::<f32>(),
                              g in any::<f64>(), h in any::<bool>()) {
        let mut buf = Buffer::new();
        buf.write(&a)?.write(&b)?.write(&c)?.write(&d)?
            .write(&e)?.write(&f)?.write(&g)?.write(&h)?;

        prop_assert_eq!(buf.read::<i64>()?, a);
        prop_assert_eq!(buf.read::<u128>()?, b);
        prop_assert_eq!(buf.read::<i128>()?, c);
        prop_assert_eq!(buf.read::<usize>()?, d);
        prop_assert_eq!(buf.read::<isize>()?, e);
        prop_assert_eq!(buf.read::<f32>()?.to_bits(), f.to_bits());
        prop_assert_eq!(buf.read::<f64>()?.to_bits(), g.to_bits());
        prop_assert_eq!(buf.read::<bool>()?, h);
        prop_assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn strings_roundtrip_in_every_width(s in ".{0,32}", width in arb_width()) {
        let mut buf = Buffer::new().with_prefix_width(width);
        buf.write(&s)?;
        prop_assert_eq!(buf.len(), usize::from(width.bytes()) + s.len());
        prop_assert_eq!(buf.read::<String>()?, s);
    }

    #[test]
    fn terminated_strings_roundtrip(s in "[^\\x00]{0,64}") {
        let mut buf = Buffer::new().with_prefix_width(PrefixWidth::TERMINATED);
        buf.write(&s)?;
        prop_assert_eq!(buf.len(), s.len() + 1);
        prop_assert_eq!(buf.read::<String>()?, s);
    }

    #[test]
    fn containers_roundtrip(v in vec(any::<u32>(), 0..64),
                            m in hash_map(any::<u16>(), ".{0,8}", 0..16),
                            width in arb_width()) {
        let mut buf = Buffer::new().with_prefix_width(width);
        buf.write(&v)?.write(&m)?;

        prop_assert_eq!(buf.read::<Vec<u32>>()?, v);
        prop_assert_eq!(buf.read::<HashMap<u16, String>>()?, m);
    }

    #[test]
    fn records_roundtrip(cfg in arb_config()) {
        let mut buf = Buffer::new();
        buf.write(&cfg)?;
        prop_assert_eq!(buf.read::<Config>()?, cfg);
        prop_assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn growth_preserves_content(chunks in vec(vec(any::<u8>(), 0..3000), 1..24)) {
        let mut buf = Buffer::new();
        let mut expected = Vec::new();
        for chunk in &chunks {
            buf.append(chunk)?;
            expected.extend_from_slice(chunk);
            prop_assert_eq!(buf.len(), expected.len());
            prop_assert!(buf.capacity() >= buf.len());
        }
        prop_assert_eq!(buf.as_slice(), &expected[..]);
    }

    #[test]
    fn cow_isolation(base in vec(any::<u8>(), 0..512),
                     extra_a in vec(any::<u8>(), 1..64),
                     extra_b in vec(any::<u8>(), 1..64)) {
        let mut a = Buffer::copy_from_slice(&base);
        let mut b = a.clone();

        b.append(&extra_b)?;
        prop_assert_eq!(a.as_slice(), &base[..]);

        a.append(&extra_a)?;
        prop_assert_eq!(&b.as_slice()[..base.len()], &base[..]);
        prop_assert_eq!(&b.as_slice()[base.len()..], &extra_b[..]);
        prop_assert_eq!(&a.as_slice()[base.len()..], &extra_a[..]);
    }
}

#[test]
fn hello_with_one_byte_prefix() {
    let mut buf = Buffer::new();
    buf.write(&PrefixWidth::ONE).unwrap().write("hello").unwrap();
    assert_eq!(buf.as_slice(), b"\x05hello");

    let mut reader = Buffer::borrowed(buf.as_slice());
    reader.read_into(&mut PrefixWidth::ONE).unwrap();
    assert_eq!(reader.read::<String>().unwrap(), "hello");
}

#[test]
fn hello_terminated() {
    let mut buf = Buffer::new();
    buf.write(&PrefixWidth::TERMINATED).unwrap().write("hello").unwrap();
    assert_eq!(buf.as_slice(), b"hello\0");
    assert_eq!(buf.read::<String>().unwrap(), "hello");
}

#[test]
fn sequence_of_three_ints() {
    let mut buf = Buffer::new();
    buf.write(&vec![1i32, 2, 3]).unwrap();
    assert_eq!(buf.len(), 14);
    assert_eq!(&buf.as_slice()[..2], &3u16.to_ne_bytes());
    assert_eq!(&buf.as_slice()[2..6], &1i32.to_ne_bytes());
    assert_eq!(buf.read::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
}

#[test]
fn explicit_width_does_not_touch_mode() {
    let mut buf = Buffer::new();
    pack_seq_with(&mut buf, &["a".to_string(), "b".to_string()], 4).unwrap();
    assert_eq!(buf.prefix_width(), PrefixWidth::DEFAULT);
    let decoded: Vec<String> = unpack_seq_with(&mut buf, 4).unwrap();
    assert_eq!(decoded, vec!["a", "b"]);
}

#[test]
fn map_roundtrip_independent_of_destination_order() {
    let source = BTreeMap::from([(1u32, "a".to_string()), (2u32, "b".to_string())]);
    let mut buf = Buffer::new();
    buf.write(&source).unwrap();

    let decoded: HashMap<u32, String> = buf.clone().read().unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(&1).map(String::as_str), Some("a"));
    assert_eq!(decoded.get(&2).map(String::as_str), Some("b"));

    let decoded: BTreeMap<u32, String> = buf.read().unwrap();
    assert_eq!(decoded, source);
}

#[test]
fn borrowed_region_is_read_only() {
    let region = [3u8, 0, 0, 0, 9, 9];
    let mut view = Buffer::borrowed(&region);

    match view.append(&[1]).unwrap_err() {
        BufferError::Capacity { op, len, .. } => {
            assert_eq!(op, "append");
            assert_eq!(len, 6);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(view.read::<u32>().unwrap(), u32::from_ne_bytes([3, 0, 0, 0]));
    assert_eq!(view.read::<u16>().unwrap(), u16::from_ne_bytes([9, 9]));
    assert!(view.read::<u8>().unwrap_err().is_range());
}

#[test]
fn failed_decode_leaves_partial_cursor() {
    let mut buf = Buffer::new();
    buf.write(&vec![1u32, 2, 3]).unwrap();
    buf.set_write_pos(buf.len() - 2);

    assert!(buf.read::<Vec<u32>>().unwrap_err().is_range());
    // count + dua elemen sudah terbaca sebelum gagal
    assert_eq!(buf.read_pos(), 2 + 8);
}

#[test]
fn mapped_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.bin");

    let cfg = Config {
        name: "edge".into(),
        retries: 3,
        timeout_ms: 1500,
        ratio: 0.25,
        tags: BTreeSet::from(["a".to_string(), "b".to_string()]),
        limits: BTreeMap::from([("cpu".to_string(), vec![1, 2])]),
    };

    let mut buf = Buffer::new();
    buf.write(&cfg).unwrap();
    MappedFile::persist(&path, &buf).unwrap();

    let mapped = MappedFile::open(&path).unwrap();
    let mut view = mapped.buffer();
    assert_eq!(view.read::<Config>().unwrap(), cfg);

    // Owned copy bisa dimodifikasi tanpa menyentuh mapping
    let mut copy = view.clone();
    copy.write(&1u8).unwrap();
    assert_eq!(copy.len(), mapped.len() + 1);
}
