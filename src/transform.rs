//! Per-field value transformers.
//!
//! A [`Transformer`] converts a raw document value into a richer native value
//! on decode, and optionally back on encode. Transformers are bound to a
//! single field name in a [`ModelSchema`](crate::ModelSchema) and must be pure
//! functions of their input: they are invoked repeatedly and possibly from
//! multiple threads, must not block, and must not hold locks.

use crate::Document;
use std::fmt;

/// A conversion closure. Errors are plain strings; the codec tags them with
/// the field name when raising [`Error::Transform`](crate::Error::Transform).
pub type TransformFn = Box<dyn Fn(&Document) -> Result<Document, String> + Send + Sync>;

/// A forward / optional-reverse conversion pair for one field.
pub struct Transformer {
    forward: TransformFn,
    reverse: Option<TransformFn>,
}

impl Transformer {
    /// A decode-only transformer. Reverse transformation of a non-nil value
    /// fails the encode with
    /// [`Error::UnsupportedReverseTransform`](crate::Error::UnsupportedReverseTransform).
    pub fn one_way<F>(forward: F) -> Self
    where
        F: Fn(&Document) -> Result<Document, String> + Send + Sync + 'static,
    {
        Self {
            forward: Box::new(forward),
            reverse: None,
        }
    }

    /// A transformer with both directions defined.
    pub fn two_way<F, R>(forward: F, reverse: R) -> Self
    where
        F: Fn(&Document) -> Result<Document, String> + Send + Sync + 'static,
        R: Fn(&Document) -> Result<Document, String> + Send + Sync + 'static,
    {
        Self {
            forward: Box::new(forward),
            reverse: Some(Box::new(reverse)),
        }
    }

    /// Whether the reverse direction is defined.
    pub fn is_reversible(&self) -> bool {
        self.reverse.is_some()
    }

    /// Apply the forward (document → native) conversion.
    pub fn forward(&self, value: &Document) -> Result<Document, String> {
        (self.forward)(value)
    }

    /// Apply the reverse (native → document) conversion, if defined.
    pub fn reverse(&self, value: &Document) -> Option<Result<Document, String>> {
        self.reverse.as_ref().map(|r| r(value))
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("reversible", &self.is_reversible())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// "day-N" strings <-> native day numbers, a stand-in for a date
    /// transformer.
    fn epoch_days() -> Transformer {
        Transformer::two_way(
            |v| {
                v.as_str()
                    .and_then(|s| s.strip_prefix("day-"))
                    .and_then(|n| n.parse::<u64>().ok())
                    .map(|n| json!(n))
                    .ok_or_else(|| format!("not a day string: {v}"))
            },
            |v| {
                v.as_u64()
                    .map(|n| json!(format!("day-{n}")))
                    .ok_or_else(|| format!("not a day number: {v}"))
            },
        )
    }

    #[test]
    fn two_way_round_trip() {
        let t = epoch_days();
        assert!(t.is_reversible());

        let native = t.forward(&json!("day-42")).unwrap();
        assert_eq!(native, json!(42));

        let doc = t.reverse(&native).unwrap().unwrap();
        assert_eq!(doc, json!("day-42"));
    }

    #[test]
    fn forward_rejects_bad_input() {
        let t = epoch_days();
        let err = t.forward(&json!(true)).unwrap_err();
        assert!(err.contains("not a day string"));
    }

    #[test]
    fn one_way_has_no_reverse() {
        let t = Transformer::one_way(|v| Ok(json!(v.to_string().len())));
        assert!(!t.is_reversible());
        assert!(t.reverse(&json!(5)).is_none());
    }

    #[test]
    fn transformer_is_pure_under_repeat() {
        let t = epoch_days();
        let a = t.forward(&json!("day-7")).unwrap();
        let b = t.forward(&json!("day-7")).unwrap();
        assert_eq!(a, b);
    }
}
