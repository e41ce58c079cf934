//! The merge primitives behind defaulting and per-tier precedence.
//!
//! Every mutation of the unified mapping funnels through these two functions
//! so the one precedence algorithm stays auditable in one place.

use serde_json::Value;

use crate::Mapping;

/// Merge `layer` into `target`, last writer wins per key.
///
/// Colliding keys are overwritten wholesale, including nested mappings; there
/// is no deep merge. Merging the same layer twice produces the same result as
/// merging it once.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tiered_config::{Mapping, merge};
///
/// let mut unified = Mapping::new();
/// unified.insert("k".into(), json!(1));
/// let mut layer = Mapping::new();
/// layer.insert("k".into(), json!(2));
/// merge::merge_into(&mut unified, &layer);
/// assert_eq!(unified.get("k"), Some(&json!(2)));
/// ```
pub fn merge_into(target: &mut Mapping, layer: &Mapping) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}

/// Insert `value` under `key` only when the key is absent.
///
/// This is the defaults-seeding primitive: keys already present are never
/// overwritten.
pub fn set_if_absent(target: &mut Mapping, key: &str, value: Value) {
    if !target.contains_key(key) {
        target.insert(key.to_owned(), value);
    }
}
