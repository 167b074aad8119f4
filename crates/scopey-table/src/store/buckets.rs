//! Chains of declaration records over fixed hash buckets.

use tracing::trace;

use super::arena::{ChainNode, DeclRecord, RecordArena, RecordRef};
use super::hash;
use crate::config::TableConfig;

/// One bucket: head and tail of its record chain.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    head: Option<RecordRef>,
    tail: Option<RecordRef>,
}

/// Multi-valued associative store keyed by identifier.
///
/// Insertion always appends to the target bucket's chain, so duplicate
/// identifiers across scopes coexist. [`search`](HashStore::search) walks
/// the full chain and keeps the last match it sees, which under the scope
/// discipline is the innermost declaration. Removal is O(1) given the
/// [`RecordRef`] returned at insertion, and never disturbs the relative
/// order of the remaining chain.
#[derive(Debug)]
pub struct HashStore {
    buckets: Vec<Bucket>,
    arena: RecordArena,
    seed: u64,
}

impl HashStore {
    /// Creates an empty store with the default bucket count and seed.
    pub fn new() -> Self {
        Self::with_config(&TableConfig::default())
    }

    /// Creates an empty store with explicit construction parameters.
    pub fn with_config(config: &TableConfig) -> Self {
        // A zero bucket count would divide by zero in the hash.
        let buckets = config.buckets.max(1);
        Self {
            buckets: vec![Bucket::default(); buckets],
            arena: RecordArena::new(),
            seed: config.hash_seed,
        }
    }

    /// Appends a record to its bucket's chain and returns its handle.
    ///
    /// Always inserts, even when the identifier is already present at some
    /// other (or the same) scope depth; the caller decides what duplicates
    /// mean.
    pub fn insert(&mut self, name: &str, line: u32, depth: u32) -> RecordRef {
        let bucket = hash::bucket_index(name, self.seed, self.buckets.len());
        let prev = self.buckets[bucket].tail;
        let handle = self.arena.insert(ChainNode {
            record: DeclRecord {
                name: name.to_string(),
                line,
                depth,
            },
            prev,
            next: None,
            bucket,
        });
        match prev {
            Some(tail) => {
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next = Some(handle);
                }
            }
            None => self.buckets[bucket].head = Some(handle),
        }
        self.buckets[bucket].tail = Some(handle);
        trace!(name, line, depth, bucket, "record inserted");
        handle
    }

    /// Finds the most recent declaration of `name`, if any.
    ///
    /// Walks the whole chain and keeps the last matching record. Insertion
    /// is append-only, so the last match is the one declared most recently;
    /// the chain is deliberately not kept sorted.
    pub fn search(&self, name: &str) -> Option<&DeclRecord> {
        let bucket = hash::bucket_index(name, self.seed, self.buckets.len());
        let mut found = None;
        let mut cursor = self.buckets[bucket].head;
        while let Some(handle) = cursor {
            match self.arena.get(handle) {
                Some(node) => {
                    if node.record.name == name {
                        found = Some(&node.record);
                    }
                    cursor = node.next;
                }
                None => break,
            }
        }
        found
    }

    /// Unlinks a record from its chain and returns it.
    ///
    /// O(1): the node carries its own chain links. Returns `None` for a
    /// handle that was already removed.
    pub fn remove(&mut self, handle: RecordRef) -> Option<DeclRecord> {
        let node = self.arena.remove(handle)?;
        match node.prev {
            Some(prev) => {
                if let Some(p) = self.arena.get_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.buckets[node.bucket].head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.arena.get_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.buckets[node.bucket].tail = node.prev,
        }
        trace!(
            name = node.record.name.as_str(),
            depth = node.record.depth,
            "record removed"
        );
        Some(node.record)
    }

    /// Number of live records across all chains.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of hash buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for HashStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single-bucket config: every identifier collides, so chain handling
    /// is exercised on each operation.
    fn colliding() -> HashStore {
        HashStore::with_config(&TableConfig {
            buckets: 1,
            hash_seed: 6,
        })
    }

    #[test]
    fn test_store_insert_and_search() {
        let mut store = HashStore::new();
        store.insert("alpha", 3, 0);
        let record = store.search("alpha").unwrap();
        assert_eq!(record.line, 3);
        assert_eq!(record.depth, 0);
        assert!(store.search("beta").is_none());
    }

    #[test]
    fn test_store_last_match_wins() {
        let mut store = HashStore::new();
        store.insert("x", 1, 0);
        store.insert("x", 9, 1);
        let record = store.search("x").unwrap();
        assert_eq!(record.line, 9);
        assert_eq!(record.depth, 1);
    }

    #[test]
    fn test_store_duplicates_coexist() {
        let mut store = HashStore::new();
        let outer = store.insert("x", 1, 0);
        let inner = store.insert("x", 9, 1);
        assert_ne!(outer, inner);
        assert_eq!(store.len(), 2);
        store.remove(inner);
        assert_eq!(store.search("x").unwrap().line, 1);
    }

    #[test]
    fn test_store_colliding_chain_search() {
        let mut store = colliding();
        store.insert("a", 1, 0);
        store.insert("b", 2, 0);
        store.insert("c", 3, 0);
        assert_eq!(store.search("a").unwrap().line, 1);
        assert_eq!(store.search("b").unwrap().line, 2);
        assert_eq!(store.search("c").unwrap().line, 3);
        assert!(store.search("d").is_none());
    }

    #[test]
    fn test_store_remove_middle_of_chain() {
        let mut store = colliding();
        store.insert("a", 1, 0);
        let b = store.insert("b", 2, 0);
        store.insert("c", 3, 0);

        assert_eq!(store.remove(b).unwrap().name, "b");
        assert_eq!(store.len(), 2);
        assert_eq!(store.search("a").unwrap().line, 1);
        assert!(store.search("b").is_none());
        assert_eq!(store.search("c").unwrap().line, 3);
    }

    #[test]
    fn test_store_remove_head_and_tail() {
        let mut store = colliding();
        let a = store.insert("a", 1, 0);
        store.insert("b", 2, 0);
        let c = store.insert("c", 3, 0);

        store.remove(a);
        store.remove(c);
        assert_eq!(store.search("b").unwrap().line, 2);

        // Chain still grows correctly after both ends were unlinked
        store.insert("d", 4, 0);
        assert_eq!(store.search("d").unwrap().line, 4);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_remove_stale_handle() {
        let mut store = HashStore::new();
        let handle = store.insert("a", 1, 0);
        assert!(store.remove(handle).is_some());
        assert!(store.remove(handle).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_bucket_count_floor() {
        let store = HashStore::with_config(&TableConfig {
            buckets: 0,
            hash_seed: 6,
        });
        assert_eq!(store.bucket_count(), 1);
    }

    #[test]
    fn test_store_reinsert_after_removal_preserves_order() {
        let mut store = colliding();
        store.insert("x", 1, 0);
        let shadow = store.insert("x", 2, 1);
        store.insert("y", 3, 1);

        store.remove(shadow);
        // "y" kept its position; "x" resolves to the survivor
        assert_eq!(store.search("x").unwrap().line, 1);
        assert_eq!(store.search("y").unwrap().line, 3);

        // A later redeclaration lands at the tail and wins again
        store.insert("x", 5, 1);
        assert_eq!(store.search("x").unwrap().line, 5);
    }
}
