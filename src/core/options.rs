//! Dynamic request options passed along with every call.

use serde_json::Value;

/// Free-form keyword options for a request, keyed by API field name.
pub type OptionMap = serde_json::Map<String, Value>;

/// Overlay `overrides` onto `base`, last write winning per key.
///
/// This is the only merge the crate performs: there is no special-casing of
/// individual keys, so a call-time override wins on any key it names,
/// including `model` and `endpoint`.
pub fn merge(base: &OptionMap, overrides: &OptionMap) -> OptionMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> OptionMap {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn override_wins_per_key() {
        let base = options(json!({ "temperature": 0.7, "top_p": 1 }));
        let overrides = options(json!({ "temperature": 0.2 }));

        let merged = merge(&base, &overrides);
        assert_eq!(merged["temperature"], json!(0.2));
        assert_eq!(merged["top_p"], json!(1));
    }

    #[test]
    fn empty_overrides_leave_base_untouched() {
        let base = options(json!({ "model": "ernie-4.0-turbo-8k", "stream": false }));

        let merged = merge(&base, &OptionMap::new());
        assert_eq!(merged, base);
    }

    #[test]
    fn overrides_may_introduce_new_keys() {
        let base = options(json!({ "temperature": 0.7 }));
        let overrides = options(json!({ "penalty_score": 1.5 }));

        let merged = merge(&base, &overrides);
        assert_eq!(merged["temperature"], json!(0.7));
        assert_eq!(merged["penalty_score"], json!(1.5));
    }
}
