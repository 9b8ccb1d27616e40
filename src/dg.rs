//! DG codec: recursive encode/decode of dynamic groups and lists atop
//! the write buffer and readers (spec component J, §4.J).
//!
//! Magic/version constants are adopted verbatim from
//! `examples/original_source/c/src/dynio.c` (`dgMagicNumber`,
//! `dgVersion`) since real `.dg`/`.dgz` files on disk depend on them.

use crate::buffer::RecordBuffer;
use crate::dynlist::{DynList, DynValues};
use crate::dyngroup::DynGroup;
use crate::error::{Error, Result};
use crate::reader::{Decoder, Source};
use crate::tag::Context;

pub const DG_MAGIC: [u8; 4] = [0x21, 0x12, 0x36, 0x63];
pub const DG_VERSION: f32 = 1.0;

/// Encode a `DynGroup` into a fresh binary buffer (spec §4.J, §6.1).
pub fn encode_group(group: &DynGroup) -> Result<Vec<u8>> {
    let mut buf = RecordBuffer::new();
    buf.record_magic(DG_MAGIC)?;
    buf.record_version(DG_VERSION)?;
    encode_group_body(&mut buf, group)?;
    Ok(buf.into_bytes())
}

fn encode_group_body(buf: &mut RecordBuffer, group: &DynGroup) -> Result<()> {
    buf.begin_struct("DYN_GROUP")?;
    buf.record_string("NAME", Some(&group.name))?;
    buf.record_long("NDYNLISTS", group.n() as i32)?;
    for list in &group.lists {
        encode_list(buf, list)?;
    }
    buf.end_struct()
}

fn encode_list(buf: &mut RecordBuffer, list: &DynList) -> Result<()> {
    buf.begin_struct("DYN_LIST")?;
    buf.record_string("NAME", Some(&list.name))?;
    buf.record_long("INCREMENT", list.increment as i32)?;
    buf.record_long("FLAGS", list.flags as i32)?;
    encode_void_array(buf, list)?;
    buf.end_struct()
}

fn encode_void_array(buf: &mut RecordBuffer, list: &DynList) -> Result<()> {
    buf.record_void_array_marker("DATA")?;
    match &list.vals {
        DynValues::Long(v) => buf.record_long_array("LONG_DATA", v),
        DynValues::Short(v) => buf.record_short_array("SHORT_DATA", v),
        DynValues::Float(v) => buf.record_float_array("FLOAT_DATA", v),
        DynValues::Char(v) => buf.record_char_array("CHAR_DATA", v),
        DynValues::String(v) => buf.record_string_array("STRING_DATA", v),
        DynValues::List(children) => {
            buf.record_list_array("LIST_DATA", children.len())?;
            for child in children {
                buf.begin_struct("SUBLIST")?;
                encode_dyn_list_fields(buf, child)?;
                buf.end_struct()?;
            }
            Ok(())
        }
    }
}

/// `SUBLIST` carries the same fields as a top-level `DYN_LIST`, just
/// under a different opening tag; factored out so both paths share the
/// body.
fn encode_dyn_list_fields(buf: &mut RecordBuffer, list: &DynList) -> Result<()> {
    buf.record_string("NAME", Some(&list.name))?;
    buf.record_long("INCREMENT", list.increment as i32)?;
    buf.record_long("FLAGS", list.flags as i32)?;
    encode_void_array(buf, list)
}

/// Decode a `DynGroup` from a fully buffered or streamed source (spec
/// §4.J). Works identically over `FileSource`/`SliceSource` since both
/// implement `Source`.
pub fn decode_group<S: Source>(source: S) -> Result<DynGroup> {
    let mut dec = Decoder::new(source);
    dec.read_magic_and_version(DG_MAGIC, DG_VERSION)?;

    let tag = dec
        .next_tag()?
        .ok_or(Error::UnknownTag { context: "TOP_LEVEL", tag: 0 })?;
    let entry = dec
        .lookup(tag)
        .ok_or(Error::UnknownTag { context: "TOP_LEVEL", tag })?;
    if entry.name != "DYN_GROUP" {
        return Err(Error::UnexpectedTag { expected: "DYN_GROUP", found: tag });
    }
    dec.begin_struct(Context::DynGroup);
    let group = decode_group_body(&mut dec)?;

    // Accept either an explicit trailing top-level END_STRUCT or clean
    // EOF right after the inner container's terminator (spec §9 bullet 4).
    if let Some(trailing) = dec.next_tag()? {
        if trailing != crate::tag::END_STRUCT {
            return Err(Error::UnknownTag { context: "TOP_LEVEL", tag: trailing });
        }
    }
    Ok(group)
}

fn decode_group_body<S: Source>(dec: &mut Decoder<S>) -> Result<DynGroup> {
    let mut name = String::new();
    let mut declared_nlists: usize = 0;
    let mut lists = Vec::new();

    loop {
        let tag = dec
            .next_tag()?
            .ok_or(Error::UnknownTag { context: "DYN_GROUP", tag: 0 })?;
        if tag == crate::tag::END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec
            .lookup(tag)
            .ok_or(Error::UnknownTag { context: "DYN_GROUP", tag })?;
        match entry.name {
            "NAME" => name = dec.read_string()?,
            "NDYNLISTS" => declared_nlists = dec.read_i32()? as usize,
            "DYN_LIST" => {
                dec.begin_struct(Context::DynList);
                lists.push(decode_dyn_list_body(dec)?);
            }
            _ => return Err(Error::UnknownTag { context: "DYN_GROUP", tag }),
        }
    }

    // NLISTS is informational only; the actual count is however many
    // DYN_LIST structures were actually consumed (spec §4.J).
    let _ = declared_nlists;
    Ok(DynGroup {
        name,
        increment: crate::dyngroup::DEFAULT_INCREMENT,
        lists,
    })
}

fn decode_dyn_list_body<S: Source>(dec: &mut Decoder<S>) -> Result<DynList> {
    let mut name = String::new();
    let mut increment: usize = 1;
    let mut flags: u32 = 0;
    let mut vals: Option<DynValues> = None;

    loop {
        let tag = dec
            .next_tag()?
            .ok_or(Error::UnknownTag { context: "DYN_LIST", tag: 0 })?;
        if tag == crate::tag::END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec
            .lookup(tag)
            .ok_or(Error::UnknownTag { context: "DYN_LIST", tag })?;
        match entry.name {
            "NAME" => name = dec.read_string()?,
            "INCREMENT" => increment = (dec.read_i32()?).max(1) as usize,
            "FLAGS" => flags = dec.read_u32()?,
            "DATA" => vals = Some(decode_void_array(dec)?),
            _ => return Err(Error::UnknownTag { context: "DYN_LIST", tag }),
        }
    }

    let vals = vals.unwrap_or(DynValues::Long(Vec::new()));
    let mut list = DynList::from_values(vals);
    list.name = name;
    list.increment = increment.max(1);
    list.flags = flags;
    Ok(list)
}

fn decode_void_array<S: Source>(dec: &mut Decoder<S>) -> Result<DynValues> {
    let concrete_tag = dec
        .next_tag()?
        .ok_or(Error::UnknownTag { context: "DYN_LIST", tag: 0 })?;
    let entry = dec
        .lookup(concrete_tag)
        .ok_or(Error::UnknownTag { context: "DYN_LIST", tag: concrete_tag })?;
    match entry.name {
        "LONG_DATA" => Ok(DynValues::Long(dec.read_long_array()?)),
        "SHORT_DATA" => Ok(DynValues::Short(dec.read_short_array()?)),
        "FLOAT_DATA" => Ok(DynValues::Float(dec.read_float_array()?)),
        "CHAR_DATA" => Ok(DynValues::Char(dec.read_char_array()?)),
        "STRING_DATA" => Ok(DynValues::String(dec.read_string_array()?)),
        "LIST_DATA" => {
            let n = dec.read_count()?;
            let mut children = Vec::with_capacity(n);
            for _ in 0..n {
                let sub_tag = dec
                    .next_tag()?
                    .ok_or(Error::UnexpectedTag { expected: "SUBLIST", found: 0 })?;
                let sub_entry = dec
                    .lookup(sub_tag)
                    .ok_or(Error::UnexpectedTag { expected: "SUBLIST", found: sub_tag })?;
                if sub_entry.name != "SUBLIST" {
                    return Err(Error::UnexpectedTag { expected: "SUBLIST", found: sub_tag });
                }
                dec.begin_struct(Context::DynList);
                children.push(decode_dyn_list_body(dec)?);
            }
            Ok(DynValues::List(children))
        }
        _ => Err(Error::UnexpectedTag { expected: "typed array tag", found: concrete_tag }),
    }
}
