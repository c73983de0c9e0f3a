use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::list::List;

/// One `{key, value}` record produced by [`List::from_mapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Entry { key, value }
    }
}

impl From<Entry<String, Value>> for Value {
    fn from(entry: Entry<String, Value>) -> Self {
        json!({ "key": entry.key, "value": entry.value })
    }
}

impl<K, V> List<Entry<K, V>> {
    /// One record per pair, in the mapping's iteration order.
    pub fn from_mapping<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let list: Self = pairs.into_iter().map(Entry::from).collect();
        debug!("built {} records from a mapping", list.len());
        list
    }
}
