use std::collections::HashMap;

use compact_str::CompactString;

/// A named bucket of borrowed entities.
#[derive(Debug)]
pub struct Group<'a, E> {
    pub key: CompactString,
    pub entities: Vec<&'a E>,
}

/// Insertion-ordered grouping: iteration follows the first occurrence of each key.
/// Keys live in a flat `Vec`; the map only stores positions into it.
#[derive(Debug)]
pub struct Groups<'a, E> {
    groups: Vec<Group<'a, E>>,
    lookup: HashMap<CompactString, usize>,
}

impl<'a, E> Default for Groups<'a, E> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<'a, E> Groups<'a, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity to the bucket for `key`, creating the bucket on first sight.
    pub fn push(&mut self, key: &str, entity: &'a E) {
        let idx = match self.lookup.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                let key = CompactString::new(key);
                self.lookup.insert(key.clone(), idx);
                self.groups.push(Group {
                    key,
                    entities: Vec::new(),
                });
                idx
            }
        };
        self.groups[idx].entities.push(entity);
    }

    pub fn get(&self, key: &str) -> Option<&[&'a E]> {
        self.lookup
            .get(key)
            .map(|&idx| self.groups[idx].entities.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group<'a, E>> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'g, 'a, E> IntoIterator for &'g Groups<'a, E> {
    type Item = &'g Group<'a, E>;
    type IntoIter = std::slice::Iter<'g, Group<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group entities by a key accessor. Missing or empty keys land in `fallback`.
pub fn group_by_or<'a, E, K, F>(entities: &'a [E], fallback: &str, mut key_fn: F) -> Groups<'a, E>
where
    F: FnMut(&'a E) -> Option<K>,
    K: AsRef<str>,
{
    let mut groups = Groups::new();
    for entity in entities {
        match key_fn(entity) {
            Some(key) if !key.as_ref().is_empty() => groups.push(key.as_ref(), entity),
            _ => groups.push(fallback, entity),
        }
    }
    groups
}

/// Group entities by a key accessor, sending missing or empty keys to `"Unknown"`.
pub fn group_by<'a, E, K, F>(entities: &'a [E], key_fn: F) -> Groups<'a, E>
where
    F: FnMut(&'a E) -> Option<K>,
    K: AsRef<str>,
{
    group_by_or(entities, super::UNKNOWN_KEY, key_fn)
}
