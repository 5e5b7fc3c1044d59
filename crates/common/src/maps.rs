//! Map helpers
//!
//! Includes the `key=value,key=value` text form used for labels and
//! annotations passed through environment variables.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Combine maps into one. On key conflicts the value from the later source wins.
pub fn merge_maps<K, V>(sources: &[&HashMap<K, V>]) -> HashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    let mut result = HashMap::new();
    for source in sources {
        for (key, value) in source.iter() {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

/// Keys of a map, in no particular order
pub fn keys<K: Clone, V>(map: &HashMap<K, V>) -> Vec<K> {
    map.keys().cloned().collect()
}

/// Parse `a=b,c=d` into a map.
///
/// Items are trimmed. An item is kept only when it contains exactly one `=`
/// and both sides are non-empty; everything else is dropped silently.
pub fn from_string(source: &str) -> HashMap<String, String> {
    source
        .split(',')
        .filter_map(|item| {
            let parts: Vec<&str> = item.split('=').collect();
            if parts.len() != 2 {
                return None;
            }
            let key = parts[0].trim();
            let value = parts[1].trim();
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Render a map as `a=b,c=d`, sorted by key.
///
/// Keys and values are trimmed; pairs with an empty side are skipped.
pub fn to_string(map: &HashMap<String, String>) -> String {
    let pairs: BTreeMap<&str, &str> = map
        .iter()
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect();

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}
