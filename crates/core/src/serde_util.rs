//! Serde helpers for partial-update request bodies.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that must distinguish "absent" from "explicit null".
///
/// Pair with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>`: a missing key stays `None` (via `default`), `null`
/// becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
