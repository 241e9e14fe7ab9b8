/// Allows for any state store to provide read-write access to the
/// current state.
///
/// Stores know nothing of defaults: a key that was never
/// written reads as `None`, and reading never creates an entry. Callers that
/// treat absence as a default value (a zero balance, say) do so themselves.
pub trait Access<K, V> {
    /// Get the value corresponding to given key.
    fn get(&self, key: &K) -> Option<&V>;

    /// Set the value corresponding to given key.
    /// Returns previously set value if any.
    fn set(&mut self, key: K, value: V) -> Option<V>;

    /// Remove the value corresponding to given key.
    /// Returns the removed value if any.
    fn remove(&mut self, key: &K) -> Option<V>;
}
