//! DG round-trip scenarios (spec §8): empty group, nested lists, strings.

use dgrs::dg::{decode_group, encode_group};
use dgrs::reader::SliceSource;
use dgrs::{DataType, DynGroup, DynValues};

#[test]
fn empty_group_round_trips() {
    let group = DynGroup::new_named("empty", 0);
    let bytes = encode_group(&group).unwrap();
    let back = decode_group(SliceSource::new(&bytes)).unwrap();
    assert_eq!(back.name, "empty");
    assert_eq!(back.n(), 0);
}

#[test]
fn scalar_lists_round_trip() {
    let mut group = DynGroup::new_named("scalars", 4);
    let longs = group.add_new_list("xs", DataType::Long, 8);
    group.list_mut(longs).append_long(1);
    group.list_mut(longs).append_long(2);
    group.list_mut(longs).append_long(3);

    let floats = group.add_new_list("ys", DataType::Float, 4);
    group.list_mut(floats).append_float(1.5);
    group.list_mut(floats).append_float(-2.25);

    let strings = group.add_new_list("names", DataType::String, 2);
    group.list_mut(strings).append_string("alpha");
    group.list_mut(strings).append_string("beta");

    let bytes = encode_group(&group).unwrap();
    let back = decode_group(SliceSource::new(&bytes)).unwrap();

    assert_eq!(back.find("xs").unwrap().vals, DynValues::Long(vec![1, 2, 3]));
    match &back.find("ys").unwrap().vals {
        DynValues::Float(v) => assert_eq!(v, &vec![1.5, -2.25]),
        other => panic!("expected floats, got {other:?}"),
    }
    match &back.find("names").unwrap().vals {
        DynValues::String(v) => assert_eq!(v, &vec!["alpha".to_string(), "beta".to_string()]),
        other => panic!("expected strings, got {other:?}"),
    }
}

#[test]
fn nested_lists_round_trip() {
    let mut group = DynGroup::new_named("nested", 1);
    let idx = group.add_new_list("outer", DataType::List, 2);

    let mut child_a = dgrs::DynList::new(DataType::Long, 4);
    child_a.append_long(10);
    child_a.append_long(20);
    group.list_mut(idx).append_list(child_a);

    let mut child_b = dgrs::DynList::new(DataType::String, 4);
    child_b.append_string("leaf");
    group.list_mut(idx).append_list(child_b);

    let bytes = encode_group(&group).unwrap();
    let back = decode_group(SliceSource::new(&bytes)).unwrap();

    let outer = back.find("outer").unwrap();
    assert_eq!(outer.n(), 2);
    assert_eq!(outer.get_list(0).vals, DynValues::Long(vec![10, 20]));
    match &outer.get_list(1).vals {
        DynValues::String(v) => assert_eq!(v, &vec!["leaf".to_string()]),
        other => panic!("expected strings, got {other:?}"),
    }
}

#[test]
fn lists_of_lists_of_lists_round_trip() {
    let mut leaf = dgrs::DynList::new(DataType::Long, 2);
    leaf.append_long(99);

    let mut middle = dgrs::DynList::new(DataType::List, 2);
    middle.append_list(leaf);

    let mut group = DynGroup::new_named("deep", 1);
    let idx = group.add_new_list("root", DataType::List, 2);
    group.list_mut(idx).append_list(middle);

    let bytes = encode_group(&group).unwrap();
    let back = decode_group(SliceSource::new(&bytes)).unwrap();

    let root = back.find("root").unwrap();
    let mid = root.get_list(0);
    let deepest = mid.get_list(0);
    assert_eq!(deepest.get_long(0), 99);
}
