use std::collections::HashMap;

/// Frequency counter that remembers first-insertion order, so ranking ties
/// resolve deterministically (first seen wins).
#[derive(Debug, Default)]
pub struct OrderedCounter {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl OrderedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
                self.order.push(key.to_string());
            }
        }
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Top `n` entries by count descending; equal counts keep insertion order.
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .order
            .iter()
            .map(|key| (key.clone(), self.counts[key]))
            .collect();
        // Vec::sort_by is stable, so ties stay in insertion order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}
