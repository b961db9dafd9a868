use std::collections::HashMap;

use super::Terminal;

/// Table of fixed lexemes and the terminal each one produces.
#[derive(Debug, Clone, Default)]
pub struct LexMap {
    map: HashMap<&'static str, Terminal>,
}

impl LexMap {
    pub fn insert(&mut self, key: &'static str, value: Terminal) {
        self.map.insert(key, value);
    }

    /// Whether some entry starts with `key`, i.e. whether reading more
    /// characters could still produce a match.
    pub fn can_match(&self, key: &str) -> bool {
        self.map.keys().any(|map_key| map_key.starts_with(key))
    }

    pub fn get(&self, key: &str) -> Option<Terminal> {
        self.map.get(key).copied()
    }
}
