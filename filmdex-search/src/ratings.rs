//! Display transforms for per-source rating entries.

use std::collections::HashMap;

use crate::types::DetailRecord;

/// Maps provider rating entries to `source -> cleaned value` pairs.
///
/// Each entry must be an object carrying string `Source` and `Value`
/// keys; anything else is skipped. Values are reduced to their leading
/// digits: `"8.8/10"` becomes `"88"`, `"87%"` becomes `"87"`, and a value
/// without digits becomes the empty string.
pub fn transform_ratings(entries: &[serde_json::Value]) -> HashMap<String, String> {
    let mut transformed = HashMap::new();

    for entry in entries {
        let Some(source) = entry.get("Source").and_then(|s| s.as_str()) else {
            continue;
        };
        let Some(value) = entry.get("Value").and_then(|v| v.as_str()) else {
            continue;
        };

        transformed.insert(source.to_string(), clean_rating_value(value));
    }

    transformed
}

/// Strips a raw rating value down to its digits.
///
/// Takes the part before the first `/`, then before the first `%`, then
/// keeps only ASCII digits.
fn clean_rating_value(value: &str) -> String {
    let before_slash = value.split('/').next().unwrap_or("");
    let before_percent = before_slash.split('%').next().unwrap_or("");
    before_percent.chars().filter(char::is_ascii_digit).collect()
}

impl DetailRecord {
    /// Ratings breakdown keyed by source, cleaned for display.
    ///
    /// Empty when the record carries no rating entries.
    pub fn transformed_ratings(&self) -> HashMap<String, String> {
        transform_ratings(&self.ratings)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_transform_ratings_valid_entries() {
        let entries = vec![
            json!({"Source": "Internet Movie Database", "Value": "8.8/10"}),
            json!({"Source": "Rotten Tomatoes", "Value": "87%"}),
            json!({"Source": "Metacritic", "Value": "74/100"}),
        ];

        let transformed = transform_ratings(&entries);

        assert_eq!(transformed.len(), 3);
        assert_eq!(transformed["Internet Movie Database"], "88");
        assert_eq!(transformed["Rotten Tomatoes"], "87");
        assert_eq!(transformed["Metacritic"], "74");
    }

    #[test]
    fn test_transform_ratings_empty_input() {
        assert!(transform_ratings(&[]).is_empty());
    }

    #[test]
    fn test_transform_ratings_skips_malformed_entries() {
        let entries = vec![
            json!({"Source": "Internet Movie Database"}),
            json!({"Value": "87%"}),
            json!({}),
            json!("not an object"),
            json!(42),
            json!({"Source": "Metacritic", "Value": "74/100"}),
        ];

        let transformed = transform_ratings(&entries);

        assert_eq!(transformed.len(), 1);
        assert_eq!(transformed["Metacritic"], "74");
    }

    #[test]
    fn test_transform_ratings_value_without_digits() {
        let entries = vec![json!({"Source": "Custom", "Value": "No Score"})];

        let transformed = transform_ratings(&entries);

        assert_eq!(transformed["Custom"], "");
    }

    #[test]
    fn test_transform_ratings_mixed_text_keeps_digits() {
        let entries = vec![
            json!({"Source": "Alpha", "Value": "A1B2C3D4"}),
            json!({"Source": "Spaced", "Value": "   90/100"}),
            json!({"Source": "Decimal", "Value": "9.5/10"}),
        ];

        let transformed = transform_ratings(&entries);

        assert_eq!(transformed["Alpha"], "1234");
        assert_eq!(transformed["Spaced"], "90");
        assert_eq!(transformed["Decimal"], "95");
    }

    #[test]
    fn test_detail_record_without_ratings() {
        let record = DetailRecord::default();
        assert!(record.transformed_ratings().is_empty());
    }

    proptest! {
        #[test]
        fn cleaned_values_contain_only_digits(value in ".*") {
            let entries = vec![json!({"Source": "Any", "Value": value})];
            let transformed = transform_ratings(&entries);

            prop_assert!(transformed["Any"].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
