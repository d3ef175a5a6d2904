//! A dictionary that can hold multiple values per key.
//!
//! [`MultiValueDict`] carries submitted form data, where a single key may
//! appear multiple times (multi-selects, checklists, repeated inline rows).
//! [`FormData`] is the string-to-string flavor every form binds from.

use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

/// Submitted form data: field names to raw string values.
pub type FormData = MultiValueDict<String, String>;

/// A dictionary that maps keys to lists of values.
///
/// [`get`](MultiValueDict::get) returns the **last** value for a key, while
/// [`get_list`](MultiValueDict::get_list) returns all values in submission order.
///
/// # Examples
///
/// ```
/// use formgen_core::utils::MultiValueDict;
///
/// let mut d = MultiValueDict::new();
/// d.append("tags".to_string(), "rust");
/// d.append("tags".to_string(), "forms");
///
/// assert_eq!(d.get(&"tags".to_string()), Some(&"forms"));
/// assert_eq!(d.get_list(&"tags".to_string()), Some(&vec!["rust", "forms"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueDict<K: Eq + Hash, V> {
    inner: HashMap<K, Vec<V>>,
}

impl<K: Eq + Hash, V> Default for MultiValueDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> MultiValueDict<K, V> {
    /// Creates an empty `MultiValueDict`.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Returns the last value submitted for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key).and_then(|v| v.last())
    }

    /// Returns every value submitted for `key`.
    pub fn get_list(&self, key: &K) -> Option<&Vec<V>> {
        self.inner.get(key)
    }

    /// Sets the value for a key, replacing any existing values.
    pub fn set(&mut self, key: K, value: V) {
        self.inner.insert(key, vec![value]);
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
    }

    /// Removes a key, returning its values.
    pub fn remove(&mut self, key: &K) -> Option<Vec<V>> {
        self.inner.remove(key)
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> hash_map::Keys<'_, K, Vec<V>> {
        self.inner.keys()
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the dictionary contains no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the dictionary contains the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns an iterator over (key, value-list) pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, K, Vec<V>> {
        self.inner.iter()
    }
}

impl MultiValueDict<String, String> {
    /// Builds form data from `(name, value)` pairs, keeping repeated names.
    ///
    /// ```
    /// use formgen_core::utils::FormData;
    ///
    /// let data = FormData::from_pairs([("list_form_pk", "7"), ("title", "Hello")]);
    /// assert_eq!(data.value("list_form_pk"), Some("7"));
    /// ```
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Returns the last value for `name` as a string slice.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.inner
            .get(name)
            .and_then(|v| v.last())
            .map(String::as_str)
    }
}

impl<K, V, N, W> FromIterator<(N, W)> for MultiValueDict<K, V>
where
    K: Eq + Hash,
    N: Into<K>,
    W: Into<V>,
{
    fn from_iter<I: IntoIterator<Item = (N, W)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.append(k.into(), v.into());
        }
        dict
    }
}

impl<'a, K: Eq + Hash, V> IntoIterator for &'a MultiValueDict<K, V> {
    type Item = (&'a K, &'a Vec<V>);
    type IntoIter = hash_map::Iter<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
