use quarry_core::Schema;

use std::collections::{HashMap, HashSet};

/// Hands out fresh, collision-free table aliases.
///
/// Aliases are five-character lowercase tokens produced by base-26 encoding
/// a monotonic counter, skipping any token that is also a collection name.
/// The counter never repeats, so every alias is unique within one
/// compilation, subqueries included.
pub(crate) struct AliasAllocator {
    next: usize,
    reserved: HashSet<String>,
}

impl AliasAllocator {
    pub(crate) fn new(schema: &Schema) -> Self {
        Self {
            next: 0,
            reserved: schema.collections.keys().cloned().collect(),
        }
    }

    pub(crate) fn allocate(&mut self) -> String {
        loop {
            let alias = encode(self.next);
            self.next += 1;

            if !self.reserved.contains(&alias) {
                return alias;
            }
        }
    }
}

fn encode(mut n: usize) -> String {
    let mut buf = [b'a'; 5];

    for slot in buf.iter_mut().rev() {
        *slot = b'a' + (n % 26) as u8;
        n /= 26;
    }

    buf.iter().map(|&b| b as char).collect()
}

/// Records the alias chosen for each joined relational path.
///
/// Keys mirror the join graph: the raw path segments (scope suffix
/// included) from the builder root down to the joined relation. Each
/// builder scope owns its own map; the entry for a path is written once and
/// reused by later traversals of the same prefix.
#[derive(Debug, Default)]
pub(crate) struct AliasMap {
    entries: HashMap<Vec<String>, String>,
}

impl AliasMap {
    pub(crate) fn get(&self, key: &[String]) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, key: Vec<String>, alias: String) {
        self.entries.insert(key, alias);
    }
}
