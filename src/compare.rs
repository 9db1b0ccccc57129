//! Structural comparison of snapshot sub-trees.
//!
//! The views are built so that derived `PartialEq` is the deep comparison the
//! predicates need:
//!
//! - `Vec` fields compare element by element, in order.
//! - Key/value mappings are `BTreeMap`, so insertion order never matters.
//! - Embedded `serde_json::Value` objects compare by key, not by key order.
//!
//! Nothing here serializes; two values are never compared through their
//! encoded form.

use crate::resource::Labels;

/// Returns true if the two sub-trees differ anywhere.
#[must_use]
pub fn subtree_changed<T: PartialEq + ?Sized>(old: &T, new: &T) -> bool {
    old != new
}

/// Returns true unless both label sets hold exactly the same key/value pairs.
#[must_use]
pub fn labels_changed(old: &Labels, new: &Labels) -> bool {
    subtree_changed(old, new)
}
