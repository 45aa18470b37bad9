//! Asymmetric deep merge of nested configuration objects.
//!
//! Used to combine a new/base transformation parameter set with a previously
//! stored one before handing the effective configuration downstream. The
//! operation is **not** symmetric: `deep_merge(a, Some(b))` and
//! `deep_merge(b, Some(a))` differ whenever the two sides disagree on a key.
//! The argument names encode the precedence: `primary` wins.

use serde_json::Value;

/// Merge `primary` over `secondary`, primary-wins, recursing on nested
/// objects.
///
/// Rules:
///
/// - every key of `primary` overwrites `secondary`'s value, unless both
///   values are JSON objects, in which case they merge recursively under the
///   same rule
/// - keys present only in `secondary` pass through unchanged
/// - `secondary` of `None` (or JSON null) returns `primary` cloned — the
///   identity law
/// - a scalar-vs-object conflict resolves by `primary` overwriting entirely;
///   there is no partial merge of mismatched shapes
///
/// Arrays are scalars for merging purposes: `primary`'s array replaces
/// `secondary`'s wholesale. Inputs are never mutated; the result is a fresh
/// value. Key order in the result follows `secondary` for shared and
/// secondary-only keys, then `primary`'s extras in `primary` order.
pub fn deep_merge(primary: &Value, secondary: Option<&Value>) -> Value {
    let secondary = match secondary {
        Some(Value::Null) | None => return primary.clone(),
        Some(v) => v,
    };

    let (primary_map, secondary_map) = match (primary, secondary) {
        (Value::Object(p), Value::Object(s)) => (p, s),
        // A non-object on either side cannot merge; primary wins outright.
        _ => return primary.clone(),
    };

    let mut output = secondary_map.clone();
    for (key, primary_value) in primary_map {
        let merged = match (primary_value, secondary_map.get(key)) {
            (Value::Object(_), Some(nested @ Value::Object(_))) => {
                deep_merge(primary_value, Some(nested))
            }
            _ => primary_value.clone(),
        };
        output.insert(key.clone(), merged);
    }
    Value::Object(output)
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
