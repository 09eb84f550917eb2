//! Tag index over content hashes
//!
//! Maps each tag to the set of content hashes carrying it. The index never
//! owns records; it only holds back-references into the record store and
//! must stay consistent with it: every `(tag, hash)` pair implies the record
//! at `hash` exists and lists `tag`. A tag whose set empties is removed so
//! no dangling entries accumulate.

use crate::hash::ContentHash;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Map from tag to the set of content hashes carrying it
#[derive(Debug, Default)]
pub struct TagIndex {
    tags: HashMap<String, BTreeSet<ContentHash>>,
}

impl TagIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Rebuild an index from a persisted tag map
    pub(crate) fn from_entries(tags: HashMap<String, BTreeSet<ContentHash>>) -> Self {
        Self { tags }
    }

    /// Link a hash under a tag, creating the tag entry if absent
    pub fn add(&mut self, tag: &str, hash: &ContentHash) {
        self.tags
            .entry(tag.to_string())
            .or_default()
            .insert(hash.clone());
    }

    /// Unlink a hash from a tag; drops the tag entry when its set empties
    pub fn remove(&mut self, tag: &str, hash: &ContentHash) {
        if let Some(set) = self.tags.get_mut(tag) {
            set.remove(hash);
            if set.is_empty() {
                self.tags.remove(tag);
            }
        }
    }

    /// All hashes under a tag; empty set for an unknown tag, never an error
    pub fn lookup(&self, tag: &str) -> BTreeSet<ContentHash> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    /// Intersection of the hash sets for every given tag.
    ///
    /// An empty tag list yields an empty result: there is no well-defined
    /// intersection over zero sets, and "all records" would be surprising.
    pub fn intersect(&self, tags: &[String]) -> BTreeSet<ContentHash> {
        let mut iter = tags.iter();
        let Some(first) = iter.next() else {
            return BTreeSet::new();
        };

        let mut acc = self.lookup(first);
        for tag in iter {
            match self.tags.get(tag) {
                Some(set) => acc.retain(|hash| set.contains(hash)),
                None => return BTreeSet::new(),
            }
            if acc.is_empty() {
                break;
            }
        }
        acc
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the index holds no tags
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag → record count, for stats reporting
    pub fn distribution(&self) -> BTreeMap<String, usize> {
        self.tags
            .iter()
            .map(|(tag, set)| (tag.clone(), set.len()))
            .collect()
    }

    pub(crate) fn entries(&self) -> &HashMap<String, BTreeSet<ContentHash>> {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(content: &str) -> ContentHash {
        ContentHash::of(content)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut index = TagIndex::new();
        let h = hash("a");
        index.add("rust", &h);

        assert!(index.lookup("rust").contains(&h));
        assert!(index.lookup("python").is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut index = TagIndex::new();
        let h = hash("a");
        index.add("rust", &h);
        index.add("rust", &h);

        assert_eq!(index.lookup("rust").len(), 1);
    }

    #[test]
    fn test_remove_drops_empty_tag_entry() {
        let mut index = TagIndex::new();
        let h = hash("a");
        index.add("rust", &h);
        assert_eq!(index.len(), 1);

        index.remove("rust", &h);
        assert_eq!(index.len(), 0);
        assert!(index.lookup("rust").is_empty());
    }

    #[test]
    fn test_remove_keeps_populated_tag_entry() {
        let mut index = TagIndex::new();
        let (a, b) = (hash("a"), hash("b"));
        index.add("shared", &a);
        index.add("shared", &b);

        index.remove("shared", &a);
        assert_eq!(index.len(), 1);
        assert!(index.lookup("shared").contains(&b));
    }

    #[test]
    fn test_remove_unknown_tag_is_noop() {
        let mut index = TagIndex::new();
        index.remove("ghost", &hash("a"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_intersect_two_tags() {
        let mut index = TagIndex::new();
        let (a, b) = (hash("a"), hash("b"));
        // a carries x and y, b carries only y
        index.add("x", &a);
        index.add("y", &a);
        index.add("y", &b);

        let both = index.intersect(&["y".to_string()]);
        assert_eq!(both, BTreeSet::from([a.clone(), b.clone()]));

        let only_a = index.intersect(&["x".to_string(), "y".to_string()]);
        assert_eq!(only_a, BTreeSet::from([a]));
    }

    #[test]
    fn test_intersect_empty_input_is_empty() {
        let mut index = TagIndex::new();
        index.add("x", &hash("a"));
        assert!(index.intersect(&[]).is_empty());
    }

    #[test]
    fn test_intersect_unknown_tag_is_empty() {
        let mut index = TagIndex::new();
        index.add("x", &hash("a"));
        let result = index.intersect(&["x".to_string(), "ghost".to_string()]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_distribution() {
        let mut index = TagIndex::new();
        let (a, b) = (hash("a"), hash("b"));
        index.add("x", &a);
        index.add("y", &a);
        index.add("y", &b);

        let dist = index.distribution();
        assert_eq!(dist.get("x"), Some(&1));
        assert_eq!(dist.get("y"), Some(&2));
    }
}
