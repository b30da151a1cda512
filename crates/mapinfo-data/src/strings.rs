//! String-table lookups for `lookup <key>` and `$key` values.

use std::collections::HashMap;

/// Resolves a string-table key to its text.
pub trait StringTable {
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// Case-insensitive string table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringMap(HashMap<String, String>);

impl StringMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(key.as_ref().to_ascii_uppercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StringMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl StringTable for StringMap {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_ascii_uppercase()).map(String::as_str)
    }
}

impl StringTable for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let strings: StringMap = [("HUSTR_1", "level 1: entryway")].into_iter().collect();
        assert_eq!(strings.lookup("hustr_1"), Some("level 1: entryway"));
        assert_eq!(strings.lookup("HUSTR_2"), None);
        assert_eq!(strings.len(), 1);
    }

    #[test]
    fn plain_hash_map_is_exact() {
        let mut strings = HashMap::new();
        strings.insert("C1TEXT".to_string(), "Once you beat".to_string());
        assert_eq!(strings.lookup("C1TEXT"), Some("Once you beat"));
        assert_eq!(strings.lookup("c1text"), None);
    }
}
