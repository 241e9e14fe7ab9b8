use std::hash::Hash;

use im::HashMap;

use crate::storage::Access;

/// In-memory state storage with only the "current view" of the
/// state.
///
/// Backed by a persistent map, so `clone` is O(1) regardless of size and a
/// caller can cheaply keep the pre-invocation view around while mutating a
/// copy.
#[derive(Debug, Clone)]
pub struct InMemoryStore<K, V>
where
    K: Clone + Hash + Eq, {
    /// Current state
    state: HashMap<K, V>,
}

impl<K, V> Default for InMemoryStore<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    fn default() -> Self {
        Self {
            state: HashMap::new(),
        }
    }
}

impl<K, V> InMemoryStore<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn len(&self) -> usize { self.state.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.state.is_empty() }

    /// Iterates over all entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> { self.state.iter() }
}

impl<K, V> Access<K, V> for InMemoryStore<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<&V> { self.state.get(key) }

    fn set(&mut self, key: K, value: V) -> Option<V> { self.state.insert(key, value) }

    fn remove(&mut self, key: &K) -> Option<V> { self.state.remove(key) }
}

impl<K, V> FromIterator<(K, V)> for InMemoryStore<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            state: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let (key, value) = ("RandomKey😊", "RandomValue😊");
        let mut ims = InMemoryStore::new();
        assert!(ims.get(&key).is_none());
        assert!(ims.set(key, value).is_none());
        assert_eq!(ims.set(key, value), Some(value));
        assert_eq!(ims.get(&key), Some(&value));
        assert_eq!(ims.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut ims: InMemoryStore<u8, u64> = [(1, 10), (2, 20)].into_iter().collect();
        assert_eq!(ims.remove(&1), Some(10));
        assert_eq!(ims.remove(&1), None);
        assert_eq!(ims.get(&2), Some(&20));
        assert!(!ims.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut ims: InMemoryStore<&str, u64> = InMemoryStore::new();
        ims.set("a", 1);
        let before = ims.clone();
        ims.set("a", 2);
        ims.set("b", 3);
        assert_eq!(before.get(&"a"), Some(&1));
        assert!(before.get(&"b").is_none());
        assert_eq!(ims.get(&"a"), Some(&2));
    }
}
