//! Byte-order negotiation (spec §8 scenario 3): a foreign-endian stream
//! decodes to the same values as a native one. The foreign stream is
//! hand-assembled byte by byte (magic and tag bytes stay as-is; every
//! multi-byte scalar field has its native bytes reversed) so this test
//! exercises the decoder's flip path without going through the writer,
//! which always emits native order.

use dgrs::dg::{decode_group, encode_group, DG_MAGIC, DG_VERSION};
use dgrs::dyngroup::DynGroup;
use dgrs::dynlist::{DataType, DynValues};
use dgrs::reader::SliceSource;

fn swapped_bytes<const N: usize>(native: [u8; N]) -> [u8; N] {
    let mut out = native;
    out.reverse();
    out
}

fn push_swapped_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&swapped_bytes(v.to_ne_bytes()));
}

fn push_swapped_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&swapped_bytes(v.to_ne_bytes()));
}

fn push_swapped_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&swapped_bytes(v.to_ne_bytes()));
}

const TAG_VERSION: u8 = 0x01;
const TAG_DYN_GROUP: u8 = 0x03;
const TAG_NAME: u8 = 0x01;
const TAG_DYN_LIST: u8 = 0x03;
const TAG_INCREMENT: u8 = 0x02;
const TAG_FLAGS: u8 = 0x03;
const TAG_DATA: u8 = 0x04;
const TAG_LONG_DATA: u8 = 0x08;
const END_STRUCT: u8 = 0xFF;

fn push_string(buf: &mut Vec<u8>, tag: u8, s: &str) {
    buf.push(tag);
    push_swapped_u32(buf, (s.len() + 1) as u32);
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
}

/// Hand-assemble a foreign-endian `DYN_GROUP { DYN_LIST xs = [42, -1] }`.
fn foreign_endian_group_bytes() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&DG_MAGIC);
    buf.push(TAG_VERSION);
    push_swapped_f32(&mut buf, DG_VERSION);

    buf.push(TAG_DYN_GROUP);
    push_string(&mut buf, TAG_NAME, "g");

    buf.push(TAG_DYN_LIST);
    push_string(&mut buf, TAG_NAME, "xs");
    buf.push(TAG_INCREMENT);
    push_swapped_i32(&mut buf, 4);
    buf.push(TAG_FLAGS);
    push_swapped_u32(&mut buf, 0);
    buf.push(TAG_DATA);
    buf.push(TAG_LONG_DATA);
    push_swapped_u32(&mut buf, 2);
    push_swapped_i32(&mut buf, 42);
    push_swapped_i32(&mut buf, -1);
    buf.push(END_STRUCT); // DYN_LIST
    buf.push(END_STRUCT); // DYN_GROUP
    buf
}

#[test]
fn foreign_endian_stream_decodes_to_native_values() {
    let bytes = foreign_endian_group_bytes();
    let group = decode_group(SliceSource::new(&bytes)).unwrap();
    assert_eq!(group.name, "g");
    let xs = group.find("xs").unwrap();
    assert_eq!(xs.vals, DynValues::Long(vec![42, -1]));
}

#[test]
fn native_and_foreign_streams_decode_identically() {
    let mut group = DynGroup::new_named("g", 1);
    let idx = group.add_new_list("xs", DataType::Long, 4);
    group.list_mut(idx).append_long(42);
    group.list_mut(idx).append_long(-1);

    let native_bytes = encode_group(&group).unwrap();
    let from_native = decode_group(SliceSource::new(&native_bytes)).unwrap();
    let from_foreign = decode_group(SliceSource::new(&foreign_endian_group_bytes())).unwrap();

    assert_eq!(from_native.find("xs").unwrap().vals, from_foreign.find("xs").unwrap().vals);
}
