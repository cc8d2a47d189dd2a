//! Column naming rules for generated indicator columns.
//!
//! Downstream consumers and expected schemas both depend on exact
//! reproduction of these names:
//!
//! | Shape | Name |
//! |-------|------|
//! | flat one-hot | `{tag_key}_{tag_value}` |
//! | grouped one-hot | `{group}_{tag_key}={tag_value}` |
//! | presence / boolean | `{tag_key}` |

/// Delimiter between tag key and tag value in flat one-hot names.
pub const FLAT_DELIMITER: char = '_';

/// Delimiter between tag key and tag value inside a grouped name.
pub const GROUPED_DELIMITER: char = '=';

/// Separator between a group name and its inner tag name.
pub const GROUP_SEPARATOR: char = '_';

/// Join a tag key and value with `delimiter`.
pub fn tag_value_column(key: &str, value: &str, delimiter: char) -> String {
    let mut name = String::with_capacity(key.len() + value.len() + delimiter.len_utf8());
    name.push_str(key);
    name.push(delimiter);
    name.push_str(value);
    name
}

/// Flat one-hot column name, e.g. `amenity_pub`.
pub fn flat_column(key: &str, value: &str) -> String {
    tag_value_column(key, value, FLAT_DELIMITER)
}

/// Prefix an inner column name with its group, e.g. `food_amenity=cafe`.
pub fn grouped_column(group: &str, inner: &str) -> String {
    tag_value_column(group, inner, GROUP_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_names() {
        assert_eq!(flat_column("amenity", "fuel"), "amenity_fuel");
        assert_eq!(
            flat_column("leisure", "adult_gaming_centre"),
            "leisure_adult_gaming_centre"
        );
    }

    #[test]
    fn grouped_names() {
        let inner = tag_value_column("amenity", "cafe", GROUPED_DELIMITER);
        assert_eq!(grouped_column("food", &inner), "food_amenity=cafe");
    }
}
