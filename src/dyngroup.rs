//! Dynamic group engine (spec component I, §3.5).
//!
//! Grounded on `c/src/dynio.c`'s `DYN_GROUP` family (`dfuCreateDynGroup`,
//! `dfuAddDynGroupExistingList`, `dgCopyDynGroup`).

use crate::dynlist::{DataType, DynList};

/// An ordered, named collection of owned dynamic lists. List names may
/// repeat; lookup by name is a linear scan (spec §3.5).
#[derive(Debug, Clone, PartialEq)]
pub struct DynGroup {
    pub name: String,
    pub increment: usize,
    pub lists: Vec<DynList>,
}

/// Default growth increment for the internal list vector (spec §4.I).
pub const DEFAULT_INCREMENT: usize = 1;

impl DynGroup {
    pub fn new_named(name: impl Into<String>, capacity_hint: usize) -> Self {
        DynGroup {
            name: name.into(),
            increment: if capacity_hint == 0 { DEFAULT_INCREMENT } else { capacity_hint },
            lists: Vec::with_capacity(capacity_hint),
        }
    }

    pub fn n(&self) -> usize {
        self.lists.len()
    }

    /// Create a new list of `datatype`, append it, and return its index
    /// (spec §4.I `add_new_list`).
    pub fn add_new_list(&mut self, name: impl Into<String>, datatype: DataType, increment: usize) -> usize {
        let list = DynList::new_named(name, datatype, increment);
        self.lists.push(list);
        self.lists.len() - 1
    }

    /// Take ownership of an existing list without copying (spec §4.I
    /// `add_existing_list`).
    pub fn add_existing_list(&mut self, list: DynList) -> usize {
        self.lists.push(list);
        self.lists.len() - 1
    }

    /// Deep-copy `list` and append the copy (spec §4.I
    /// `copy_existing_list`).
    pub fn copy_existing_list(&mut self, list: &DynList) -> usize {
        self.add_existing_list(list.copy())
    }

    pub fn list(&self, idx: usize) -> &DynList {
        &self.lists[idx]
    }

    pub fn list_mut(&mut self, idx: usize) -> &mut DynList {
        &mut self.lists[idx]
    }

    /// Linear scan by name; returns the first match, matching the
    /// legacy access pattern where duplicate names are permitted.
    pub fn find(&self, name: &str) -> Option<&DynList> {
        self.lists.iter().find(|l| l.name == name)
    }

    /// Deep-copy the whole group under a new name (spec §4.I `copy`).
    pub fn copy(&self, new_name: impl Into<String>) -> Self {
        DynGroup {
            name: new_name.into(),
            increment: self.increment,
            lists: self.lists.iter().map(DynList::copy).collect(),
        }
    }

    /// Reset every contained list (spec §4.I `reset`).
    pub fn reset(&mut self) {
        for list in &mut self.lists {
            list.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynlist::DynValues;

    #[test]
    fn add_new_list_returns_usable_index() {
        let mut g = DynGroup::new_named("g", 4);
        let idx = g.add_new_list("xs", DataType::Long, 8);
        g.list_mut(idx).append_long(42);
        assert_eq!(g.list(idx).get_long(0), 42);
    }

    #[test]
    fn find_by_name_allows_duplicates() {
        let mut g = DynGroup::new_named("g", 4);
        g.add_new_list("dup", DataType::Long, 4);
        g.add_new_list("dup", DataType::Float, 4);
        assert_eq!(g.find("dup").unwrap().datatype(), DataType::Long);
    }

    #[test]
    fn copy_is_deep_and_idempotent() {
        let mut g = DynGroup::new_named("g", 4);
        let idx = g.add_new_list("xs", DataType::String, 4);
        g.list_mut(idx).append_string("hi");

        let mut c1 = g.copy("g2");
        let c2 = c1.copy("g3");
        c1.list_mut(0).append_string("mutated");

        match &c2.list(0).vals {
            DynValues::String(v) => assert_eq!(v, &vec!["hi".to_string()]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_group_has_zero_lists() {
        let g = DynGroup::new_named("empty", 0);
        assert_eq!(g.n(), 0);
    }
}
