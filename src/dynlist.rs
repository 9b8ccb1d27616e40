//! Dynamic list engine (spec component H, §3.4).
//!
//! Grounded on `c/src/dynio.c`'s `DYN_LIST` family (`dfuCreateDynList`,
//! `dfuAddDynListItem`, `dfuResetDynList`, growth via `DYN_LIST_MAX`/
//! `DYN_LIST_INCREMENT`). The legacy `void *vals` + separate `datatype`
//! field is replaced by a tagged union over `Vec<T>` per §9.

/// Which scalar kind a list holds, or whether it holds nested lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Long,
    Short,
    Float,
    Char,
    String,
    List,
}

/// The homogeneous payload of a dynamic list. The `datatype` field of the
/// legacy struct is subsumed by the variant itself.
#[derive(Debug, Clone, PartialEq)]
pub enum DynValues {
    Long(Vec<i32>),
    Short(Vec<i16>),
    Float(Vec<f32>),
    Char(Vec<i8>),
    String(Vec<String>),
    List(Vec<DynList>),
}

impl DynValues {
    pub fn datatype(&self) -> DataType {
        match self {
            DynValues::Long(_) => DataType::Long,
            DynValues::Short(_) => DataType::Short,
            DynValues::Float(_) => DataType::Float,
            DynValues::Char(_) => DataType::Char,
            DynValues::String(_) => DataType::String,
            DynValues::List(_) => DataType::List,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DynValues::Long(v) => v.len(),
            DynValues::Short(v) => v.len(),
            DynValues::Float(v) => v.len(),
            DynValues::Char(v) => v.len(),
            DynValues::String(v) => v.len(),
            DynValues::List(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty_for(datatype: DataType) -> Self {
        match datatype {
            DataType::Long => DynValues::Long(Vec::new()),
            DataType::Short => DynValues::Short(Vec::new()),
            DataType::Float => DynValues::Float(Vec::new()),
            DataType::Char => DynValues::Char(Vec::new()),
            DataType::String => DynValues::String(Vec::new()),
            DataType::List => DynValues::List(Vec::new()),
        }
    }
}

/// A named, typed, growable sequence (spec §3.4).
#[derive(Debug, Clone, PartialEq)]
pub struct DynList {
    pub name: String,
    pub capacity: usize,
    pub increment: usize,
    pub flags: u32,
    pub vals: DynValues,
}

/// Bound mirroring the legacy `DYN_LIST_NAME_SIZE` cap; enforced only
/// where the writer truncates, never silently on construction.
pub const NAME_CAP: usize = 128;

impl DynList {
    /// Create an empty list of the given type with the given growth
    /// increment (spec §4.H `new`).
    pub fn new(datatype: DataType, increment: usize) -> Self {
        Self::new_named(String::new(), datatype, increment)
    }

    pub fn new_named(name: impl Into<String>, datatype: DataType, increment: usize) -> Self {
        DynList {
            name: name.into(),
            capacity: 1,
            increment: increment.max(1),
            flags: 0,
            vals: DynValues::empty_for(datatype),
        }
    }

    /// Take ownership of an externally supplied buffer of values,
    /// choosing an increment heuristic of `max(n/2, n)` bounded by 1024,
    /// and forcing capacity >= 2 per the "non-zero capacity" invariant
    /// even for a zero-length buffer (spec §4.H).
    pub fn from_values(vals: DynValues) -> Self {
        let n = vals.len();
        let increment = if n == 0 {
            1
        } else {
            (n / 2).clamp(1, 1024)
        };
        let capacity = n.max(2);
        DynList {
            name: String::new(),
            capacity,
            increment,
            flags: 0,
            vals,
        }
    }

    pub fn n(&self) -> usize {
        self.vals.len()
    }

    pub fn datatype(&self) -> DataType {
        self.vals.datatype()
    }

    fn grow_if_full(&mut self) {
        if self.n() >= self.capacity {
            self.capacity += self.increment;
        }
    }

    /// Reset the list: release owned children (strings / sub-lists) and
    /// set `n = 0` while retaining the existing allocation (spec §4.H
    /// `reset`).
    pub fn reset(&mut self) {
        match &mut self.vals {
            DynValues::Long(v) => v.clear(),
            DynValues::Short(v) => v.clear(),
            DynValues::Float(v) => v.clear(),
            DynValues::Char(v) => v.clear(),
            DynValues::String(v) => v.clear(),
            DynValues::List(v) => v.clear(),
        }
    }

    /// Reset and reallocate to a new element type and initial capacity
    /// (spec §4.H `reset_to_type`).
    pub fn reset_to_type(&mut self, datatype: DataType, increment: usize) {
        self.vals = DynValues::empty_for(datatype);
        self.capacity = 1;
        self.increment = increment.max(1);
    }

    // --- typed append ----------------------------------------------------

    pub fn append_long(&mut self, v: i32) {
        self.grow_if_full();
        match &mut self.vals {
            DynValues::Long(vals) => vals.push(v),
            _ => panic!("append_long on a list of a different datatype"),
        }
    }

    pub fn append_short(&mut self, v: i16) {
        self.grow_if_full();
        match &mut self.vals {
            DynValues::Short(vals) => vals.push(v),
            _ => panic!("append_short on a list of a different datatype"),
        }
    }

    pub fn append_float(&mut self, v: f32) {
        self.grow_if_full();
        match &mut self.vals {
            DynValues::Float(vals) => vals.push(v),
            _ => panic!("append_float on a list of a different datatype"),
        }
    }

    pub fn append_char(&mut self, v: i8) {
        self.grow_if_full();
        match &mut self.vals {
            DynValues::Char(vals) => vals.push(v),
            _ => panic!("append_char on a list of a different datatype"),
        }
    }

    pub fn append_string(&mut self, v: impl Into<String>) {
        self.grow_if_full();
        match &mut self.vals {
            DynValues::String(vals) => vals.push(v.into()),
            _ => panic!("append_string on a list of a different datatype"),
        }
    }

    /// Append a copy of `child` (deep-copied, per §3.4).
    pub fn append_list(&mut self, child: DynList) {
        self.grow_if_full();
        match &mut self.vals {
            DynValues::List(vals) => vals.push(child),
            _ => panic!("append_list on a list of a different datatype"),
        }
    }

    /// Move a child list in without copying (spec §4.H `move_list`).
    pub fn move_list(&mut self, child: DynList) {
        self.append_list(child);
    }

    /// Insert at `pos`, shifting the tail right. `pos <= n` is required.
    pub fn insert_long(&mut self, pos: usize, v: i32) {
        assert!(pos <= self.n(), "insert position out of bounds");
        self.grow_if_full();
        match &mut self.vals {
            DynValues::Long(vals) => vals.insert(pos, v),
            _ => panic!("insert_long on a list of a different datatype"),
        }
    }

    pub fn prepend_long(&mut self, v: i32) {
        self.insert_long(0, v);
    }

    pub fn get_long(&self, idx: usize) -> i32 {
        match &self.vals {
            DynValues::Long(vals) => vals[idx],
            _ => panic!("get_long on a list of a different datatype"),
        }
    }

    pub fn get_string(&self, idx: usize) -> &str {
        match &self.vals {
            DynValues::String(vals) => &vals[idx],
            _ => panic!("get_string on a list of a different datatype"),
        }
    }

    pub fn get_list(&self, idx: usize) -> &DynList {
        match &self.vals {
            DynValues::List(vals) => &vals[idx],
            _ => panic!("get_list on a list of a different datatype"),
        }
    }

    /// Deep copy: sub-lists and strings are cloned recursively (spec
    /// §3.4 "copying is deep"). `Clone` already does this because
    /// `DynValues::List`/`String` hold owned data, not pointers — this
    /// method exists to name the operation the spec calls out explicitly.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_list_has_nonzero_capacity() {
        let l = DynList::new(DataType::Long, 4);
        assert!(l.capacity >= 1);
        assert_eq!(l.n(), 0);
    }

    #[test]
    fn from_values_empty_forces_capacity_two() {
        let l = DynList::from_values(DynValues::Long(vec![]));
        assert!(l.capacity >= 2);
    }

    #[test]
    fn growth_preserves_invariants() {
        let mut l = DynList::new(DataType::Long, 4);
        for i in 0..1_000_000i32 {
            l.append_long(i);
            assert!(l.n() <= l.capacity, "n must never exceed capacity");
            assert!(l.capacity >= l.n());
            assert!(l.increment >= 1);
        }
        assert_eq!(l.n(), 1_000_000);
    }

    #[test]
    fn insert_shifts_tail() {
        let mut l = DynList::new(DataType::Long, 4);
        l.append_long(1);
        l.append_long(3);
        l.insert_long(1, 2);
        assert_eq!((0..3).map(|i| l.get_long(i)).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut outer = DynList::new(DataType::List, 4);
        let mut inner = DynList::new(DataType::Long, 4);
        inner.append_long(1);
        outer.append_list(inner);

        let mut copy = outer.copy();
        match &mut copy.vals {
            DynValues::List(children) => children[0].append_long(2),
            _ => unreachable!(),
        }
        assert_eq!(outer.get_list(0).n(), 1);
        assert_eq!(copy.get_list(0).n(), 2);
    }

    #[test]
    fn idempotent_copy_of_copy() {
        let mut l = DynList::new(DataType::String, 4);
        l.append_string("a");
        assert_eq!(l.copy().copy(), l.copy());
    }

    #[test]
    fn reset_clears_but_keeps_capacity() {
        let mut l = DynList::new(DataType::Long, 4);
        l.append_long(1);
        l.append_long(2);
        let cap_before = l.capacity;
        l.reset();
        assert_eq!(l.n(), 0);
        assert_eq!(l.capacity, cap_before);
    }
}
