//! Serde helper for patch fields that can be cleared.
//!
//! A plain `Option<Option<T>>` deserializes JSON `null` as the outer `None`,
//! which makes "field absent" and "field set to null" indistinguishable.
//! Annotate such fields with
//! `#[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]`:
//!
//! - absent  -> `None`
//! - `null`  -> `Some(None)`
//! - value   -> `Some(Some(value))`

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
