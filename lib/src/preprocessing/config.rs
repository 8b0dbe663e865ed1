//! Configuration overrides.
//!
//! Each transformer owns a typed configuration struct. Overrides arrive as a
//! JSON object ([`Options`]) and are merged key by key over the current
//! configuration: the struct is serialized, the override keys replace the
//! matching entries, and the result is deserialized back. Unknown keys and
//! ill-typed values are rejected when the instance is created, so a bad
//! option never survives until `fit`.

use crate::preprocessing::error::{Result, TransformError};
use crate::preprocessing::traits::TransformerKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Option name to value mapping used for overrides.
pub type Options = Map<String, Value>;

/// Merge `overrides` over `base`, returning a new configuration.
///
/// # Errors
/// Returns [`TransformError::InvalidConfig`] if an override key is not a
/// field of `C` or its value does not deserialize into the field type.
pub fn merge_config<C>(kind: &TransformerKind, base: &C, overrides: &Options) -> Result<C>
where
    C: Serialize + DeserializeOwned,
{
    let invalid = |message: String| TransformError::InvalidConfig {
        kind: kind.clone(),
        message,
    };

    let mut merged = match serde_json::to_value(base).map_err(|e| invalid(e.to_string()))? {
        Value::Object(map) => map,
        other => return Err(invalid(format!("expected an object, got {}", other))),
    };

    for (key, value) in overrides {
        if !merged.contains_key(key) {
            return Err(invalid(format!("unknown option '{}'", key)));
        }
        merged.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| invalid(e.to_string()))
}

/// Fail if `overrides` holds a key outside `allowed`.
pub fn reject_unknown(kind: &TransformerKind, overrides: &Options, allowed: &[&str]) -> Result<()> {
    match overrides.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(TransformError::InvalidConfig {
            kind: kind.clone(),
            message: format!("unknown option '{}'", key),
        }),
        None => Ok(()),
    }
}

/// Overlay `overrides` on top of `base`, key by key.
pub fn overlay(base: &Options, overrides: &Options) -> Options {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
