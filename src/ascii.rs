//! ASCII dumper (spec component K, §4.K).
//!
//! Walks the same tag-dispatch state machine as the binary decoder but
//! emits one text line per item instead of building an in-memory value.
//! Line format is preserved bit-for-bit for compatibility with existing
//! dump consumers: a structure opens with `BEGIN: name` and closes with
//! `END:   name`, a scalar is `name\tvalue`, an array is a count header
//! followed by one `index\tvalue` line per element (1-based for numeric
//! arrays, 0-based for string arrays), matching `dfuBufferToAscii`'s and
//! `dguBufferToAscii`'s output grounded in
//! `examples/original_source/MATLAB/dg_read/dfutils.c` and
//! `examples/original_source/c/src/dynio.c`.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::reader::{Decoder, Source};
use crate::tag::{Context, WireKind, END_STRUCT};

/// Dump every item in `source` as indented ASCII text, starting from
/// `top`, which must be the context entered immediately after the
/// top-level structure tag (`Context::DataFile` or `Context::DynGroup`).
pub fn dump<S: Source>(dec: &mut Decoder<S>, top: Context, out: &mut String) -> Result<()> {
    dec.begin_struct(top);
    writeln!(out, "BEGIN: {}", top.name()).unwrap();
    dump_structure(dec, out, 1, top.name())
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn dump_structure<S: Source>(
    dec: &mut Decoder<S>,
    out: &mut String,
    depth: usize,
    name: &str,
) -> Result<()> {
    loop {
        let ctx = dec.current();
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: ctx.name(), tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            indent(out, depth - 1);
            writeln!(out, "END:   {name}").unwrap();
            return Ok(());
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: ctx.name(), tag })?;

        match entry.kind {
            WireKind::Structure => {
                indent(out, depth);
                writeln!(out, "BEGIN: {}", entry.name).unwrap();
                dec.begin_struct(entry.child.expect("structure tag must declare a child context"));
                dump_structure(dec, out, depth + 1, entry.name)?;
            }
            WireKind::Flag => {
                indent(out, depth);
                writeln!(out, "{}", entry.name).unwrap();
            }
            WireKind::Char => {
                let v = dec.read_i8()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, v).unwrap();
            }
            WireKind::Short => {
                let v = dec.read_i16()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, v).unwrap();
            }
            WireKind::Long => {
                let v = dec.read_i32()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, v).unwrap();
            }
            WireKind::Float => {
                let v = dec.read_f32()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, v).unwrap();
            }
            WireKind::Version => {
                return Err(Error::UnknownTag { context: ctx.name(), tag });
            }
            WireKind::String => {
                let v = dec.read_string()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, v).unwrap();
            }
            WireKind::CharArray => {
                let vals = dec.read_char_array()?;
                dump_scalar_array(out, depth, entry.name, &vals);
            }
            WireKind::ShortArray => {
                let vals = dec.read_short_array()?;
                dump_scalar_array(out, depth, entry.name, &vals);
            }
            WireKind::LongArray => {
                let vals = dec.read_long_array()?;
                dump_scalar_array(out, depth, entry.name, &vals);
            }
            WireKind::FloatArray => {
                let vals = dec.read_float_array()?;
                dump_scalar_array(out, depth, entry.name, &vals);
            }
            WireKind::StringArray => {
                let vals = dec.read_string_array()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, vals.len()).unwrap();
                for (i, s) in vals.iter().enumerate() {
                    indent(out, depth + 1);
                    writeln!(out, "{i}\t{s}").unwrap();
                }
            }
            WireKind::ListArray => {
                let n = dec.read_count()?;
                indent(out, depth);
                writeln!(out, "{}\t{}", entry.name, n).unwrap();
                for _ in 0..n {
                    let sub_tag = dec.next_tag()?.ok_or(Error::UnexpectedTag { expected: "SUBLIST", found: 0 })?;
                    let sub_entry = dec
                        .lookup(sub_tag)
                        .ok_or(Error::UnexpectedTag { expected: "SUBLIST", found: sub_tag })?;
                    if sub_entry.name != "SUBLIST" {
                        return Err(Error::UnexpectedTag { expected: "SUBLIST", found: sub_tag });
                    }
                    indent(out, depth + 1);
                    writeln!(out, "BEGIN: {}", sub_entry.name).unwrap();
                    dec.begin_struct(Context::DynList);
                    dump_structure(dec, out, depth + 2, sub_entry.name)?;
                }
            }
            WireKind::VoidArray => {
                // The marker carries no payload; the concrete typed
                // array tag immediately follows on the wire and is
                // dumped by the next loop iteration.
            }
        }
    }
}

fn dump_scalar_array(out: &mut String, depth: usize, name: &str, vals: &[impl std::fmt::Display]) {
    indent(out, depth);
    writeln!(out, "{}\t{}", name, vals.len()).unwrap();
    for (i, v) in vals.iter().enumerate() {
        indent(out, depth + 1);
        writeln!(out, "{}\t{}", i + 1, v).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dg::encode_group;
    use crate::dyngroup::DynGroup;
    use crate::dynlist::DataType;
    use crate::reader::SliceSource;

    #[test]
    fn dumps_scalars_and_arrays_with_expected_indices() {
        let mut g = DynGroup::new_named("g", 1);
        let idx = g.add_new_list("xs", DataType::Long, 4);
        g.list_mut(idx).append_long(10);
        g.list_mut(idx).append_long(20);

        let bytes = encode_group(&g).unwrap();
        let mut dec = Decoder::new(SliceSource::new(&bytes));
        dec.read_magic_and_version(crate::dg::DG_MAGIC, crate::dg::DG_VERSION).unwrap();
        let tag = dec.next_tag().unwrap().unwrap();
        assert_eq!(dec.lookup(tag).unwrap().name, "DYN_GROUP");

        let mut out = String::new();
        dump(&mut dec, Context::DynGroup, &mut out).unwrap();
        assert!(out.contains("LONG_DATA\t2"));
        assert!(out.contains("1\t10"));
        assert!(out.contains("2\t20"));
        assert!(out.contains("BEGIN: DYN_GROUP"));
        assert!(out.contains("BEGIN: DYN_LIST"));
        assert!(out.contains("END:   DYN_LIST"));
        assert!(out.contains("END:   DYN_GROUP"));
        let begins = out.matches("BEGIN:").count();
        let ends = out.matches("END:").count();
        assert_eq!(begins, ends);
    }

    #[test]
    fn nested_lists_emit_balanced_begin_end_for_sublists() {
        let mut g = DynGroup::new_named("g", 1);
        let idx = g.add_new_list("nested", DataType::List, 2);
        let mut child = crate::dynlist::DynList::new_named("child", DataType::Long, 4);
        child.append_long(99);
        g.list_mut(idx).append_list(child);

        let bytes = encode_group(&g).unwrap();
        let mut dec = Decoder::new(SliceSource::new(&bytes));
        dec.read_magic_and_version(crate::dg::DG_MAGIC, crate::dg::DG_VERSION).unwrap();
        dec.next_tag().unwrap().unwrap();

        let mut out = String::new();
        dump(&mut dec, Context::DynGroup, &mut out).unwrap();
        assert!(out.contains("BEGIN: SUBLIST"));
        assert!(out.contains("END:   SUBLIST"));
        let begins = out.matches("BEGIN:").count();
        let ends = out.matches("END:").count();
        assert_eq!(begins, ends);
    }
}
