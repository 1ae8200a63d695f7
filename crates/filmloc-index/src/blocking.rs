//! Token blocking: restricts fuzzy comparison to entries that share at
//! least one significant token with the query.

use std::collections::HashMap;

use filmloc_ingest::normalize::significant_tokens;

/// Inverted index from significant token to corpus positions.
#[derive(Debug, Default)]
pub struct BlockingIndex {
    buckets: HashMap<String, Vec<usize>>,
}

impl BlockingIndex {
    /// Build from normalized keys given in corpus order.
    pub fn build<'a>(keys: impl Iterator<Item = &'a str>) -> Self {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, key) in keys.enumerate() {
            for token in significant_tokens(key) {
                let bucket = buckets.entry(token.to_string()).or_default();
                // A key repeating a token must not appear twice in its bucket.
                if bucket.last() != Some(&position) {
                    bucket.push(position);
                }
            }
        }
        Self { buckets }
    }

    /// Corpus positions sharing a significant token with `query_key`,
    /// ascending and without repeats. Empty when nothing shares a token.
    pub fn candidates(&self, query_key: &str) -> Vec<usize> {
        let mut positions: Vec<usize> = significant_tokens(query_key)
            .filter_map(|token| self.buckets.get(token))
            .flatten()
            .copied()
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(keys: &[&str]) -> BlockingIndex {
        BlockingIndex::build(keys.iter().copied())
    }

    #[test]
    fn test_shared_tokens() {
        let idx = index(&["600 octavia st", "700 octavia st", "600 hayes st", "1 ferry building"]);
        assert_eq!(idx.candidates("600 octavia street"), vec![0, 1, 2]);
        assert_eq!(idx.candidates("ferry plaza"), vec![3]);
    }

    #[test]
    fn test_street_types_and_stop_words_do_not_block() {
        let idx = index(&["600 octavia st", "10 polk st"]);
        assert!(idx.candidates("the st and ave").is_empty());
        assert_eq!(idx.bucket_count(), 4);
    }

    #[test]
    fn test_repeated_token_listed_once() {
        let idx = index(&["1 1 st"]);
        assert_eq!(idx.candidates("1"), vec![0]);
    }
}
