use crate::catalog::taxonomy::normalize_name;
use crate::models::{PropertyCategory, PropertyType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

pub const LAND_KEYWORDS: &[&str] = &["land", "plot", "acre", "agricultur", "farm", "estate"];

pub const RESIDENTIAL_KEYWORDS: &[&str] =
    &["house", "apartment", "villa", "flat", "residential", "bungalow"];

pub const COMMERCIAL_KEYWORDS: &[&str] =
    &["commercial", "office", "shop", "industrial", "warehouse", "factory"];

/// Keyword tables in the order they are tested. The first table with a
/// keyword contained in the name wins.
pub const KEYWORD_TABLES: &[(PropertyCategory, &[&str])] = &[
    (PropertyCategory::Land, LAND_KEYWORDS),
    (PropertyCategory::Residential, RESIDENTIAL_KEYWORDS),
    (PropertyCategory::Commercial, COMMERCIAL_KEYWORDS),
];

/// Fields a listing may carry its type name in, most specific first
const PROPERTY_TYPE_PATHS: &[&[&str]] = &[
    &["property_type_details", "name"],
    &["property_type_name"],
    &["property_type"],
    &["type"],
];

/// Classify a single type name. Matching is substring containment on the
/// normalized name, so `"Agricultural Land"` and `"Landmark Tower"` are both land.
///
/// An occurrence lying inside an occurrence of a longer keyword from any
/// table does not count: `"Warehouse"` is commercial, not residential.
pub fn classify_name(name: &str) -> PropertyCategory {
    classify_with(name, KEYWORD_TABLES)
}

/// Classify against caller-supplied tables (e.g. another locale)
pub fn classify_with(name: &str, tables: &[(PropertyCategory, &[&str])]) -> PropertyCategory {
    let normalized = normalize_name(name);
    tables
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| has_own_occurrence(&normalized, keyword, tables))
        })
        .map(|(category, _)| *category)
        .unwrap_or(PropertyCategory::Other)
}

/// True if `keyword` occurs in `haystack` at least once outside every
/// occurrence of a longer keyword
fn has_own_occurrence(haystack: &str, keyword: &str, tables: &[(PropertyCategory, &[&str])]) -> bool {
    if keyword.is_empty() {
        return false;
    }
    haystack.match_indices(keyword).any(|(start, found)| {
        let end = start + found.len();
        !tables
            .iter()
            .flat_map(|(_, keywords)| keywords.iter())
            .filter(|longer| longer.len() > keyword.len())
            .any(|longer| {
                haystack
                    .match_indices(*longer)
                    .any(|(s, m)| s <= start && s + m.len() >= end)
            })
    })
}

/// Type names grouped into their buckets
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Categories {
    pub land: Vec<String>,
    pub residential: Vec<String>,
    pub commercial: Vec<String>,
    pub other: Vec<String>,
}

impl Categories {
    pub fn bucket(&self, category: PropertyCategory) -> &[String] {
        match category {
            PropertyCategory::Land => &self.land,
            PropertyCategory::Residential => &self.residential,
            PropertyCategory::Commercial => &self.commercial,
            PropertyCategory::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, category: PropertyCategory) -> &mut Vec<String> {
        match category {
            PropertyCategory::Land => &mut self.land,
            PropertyCategory::Residential => &mut self.residential,
            PropertyCategory::Commercial => &mut self.commercial,
            PropertyCategory::Other => &mut self.other,
        }
    }
}

/// Bucket every type name. The first occurrence of a normalized name is
/// kept; later duplicates are dropped from all buckets.
pub fn categorize(types: &[PropertyType]) -> Categories {
    let mut seen = HashSet::new();
    let mut categories = Categories::default();

    for property_type in types {
        let name = property_type.name.trim();
        let normalized = normalize_name(name);
        if normalized.is_empty() || !seen.insert(normalized) {
            continue;
        }
        categories
            .bucket_mut(classify_name(name))
            .push(name.to_string());
    }

    categories
}

/// Anything that can answer "is this normalized type name land?"
pub trait LandLookup {
    fn contains_land(&self, normalized_name: &str) -> bool;
}

impl LandLookup for Categories {
    fn contains_land(&self, normalized_name: &str) -> bool {
        self.land
            .iter()
            .any(|name| normalize_name(name) == normalized_name)
    }
}

impl LandLookup for [String] {
    fn contains_land(&self, normalized_name: &str) -> bool {
        self.iter().any(|name| normalize_name(name) == normalized_name)
    }
}

impl LandLookup for Vec<String> {
    fn contains_land(&self, normalized_name: &str) -> bool {
        self.as_slice().contains_land(normalized_name)
    }
}

/// Entries are expected to be stored already normalized
impl LandLookup for HashSet<String> {
    fn contains_land(&self, normalized_name: &str) -> bool {
        self.contains(normalized_name)
    }
}

/// True if the type name is one of the land types in `categories`
pub fn is_land<L: LandLookup + ?Sized>(type_name: &str, categories: &L) -> bool {
    let normalized = normalize_name(type_name);
    !normalized.is_empty() && categories.contains_land(&normalized)
}

/// Read the type name off a raw listing record
pub fn property_type_name(property: &Value) -> Option<&str> {
    PROPERTY_TYPE_PATHS.iter().find_map(|path| {
        path.iter()
            .try_fold(property, |value, key| value.get(*key))
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    })
}

/// Classify a raw listing record as land.
///
/// Falls back to the land keywords when the name is not in `land_types`,
/// which covers listings whose type never went through [`categorize`].
pub fn is_land_property<L: LandLookup + ?Sized>(property: &Value, land_types: &L) -> bool {
    let Some(name) = property_type_name(property) else {
        return false;
    };
    let normalized = normalize_name(name);
    land_types.contains_land(&normalized) || classify_name(&normalized) == PropertyCategory::Land
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(names: &[&str]) -> Vec<PropertyType> {
        names
            .iter()
            .map(|name| PropertyType::new(name.to_lowercase(), *name))
            .collect()
    }

    #[test]
    fn buckets_by_first_matching_table() {
        let categories = categorize(&types(&["Agricultural Land", "Villa", "Warehouse", "Kiosk"]));

        assert_eq!(categories.land, vec!["Agricultural Land"]);
        assert_eq!(categories.residential, vec!["Villa"]);
        assert_eq!(categories.commercial, vec!["Warehouse"]);
        assert_eq!(categories.bucket(PropertyCategory::Other), ["Kiosk".to_string()]);
    }

    #[test]
    fn keywords_inside_longer_keywords_do_not_count() {
        assert_eq!(classify_name("Warehouse"), PropertyCategory::Commercial);
        assert_eq!(classify_name("Godown/Warehouse"), PropertyCategory::Commercial);
        assert_eq!(classify_name("Warehouse Flat"), PropertyCategory::Residential);
        assert_eq!(classify_name("Shop House"), PropertyCategory::Residential);
        assert_eq!(classify_name("Farm House"), PropertyCategory::Land);
        assert_eq!(classify_name("Warehouse Plot"), PropertyCategory::Land);
        assert!(!is_land_property(&json!({"type": "Warehouse"}), &Categories::default()));
    }

    #[test]
    fn land_wins_over_later_tables() {
        assert_eq!(classify_name("Commercial Land"), PropertyCategory::Land);
        assert_eq!(classify_name("Farm House"), PropertyCategory::Land);
        assert_eq!(classify_name("Residential Office"), PropertyCategory::Residential);
        assert_eq!(classify_name("  INDUSTRIAL building "), PropertyCategory::Commercial);
    }

    #[test]
    fn substring_matching_is_preserved() {
        // "island" contains "land"
        assert_eq!(classify_name("Island Retreat"), PropertyCategory::Land);
        assert_eq!(classify_name("Kiosk"), PropertyCategory::Other);
    }

    #[test]
    fn duplicates_are_dropped_case_and_whitespace_insensitively() {
        let categories = categorize(&types(&["House", " house ", "HOUSE", "Plot"]));

        assert_eq!(categories.residential, vec!["House"]);
        assert_eq!(categories.land, vec!["Plot"]);
    }

    #[test]
    fn categorize_is_idempotent() {
        let first = categorize(&types(&["Land", "Shop", "Flat", "Cabin"]));
        let flattened: Vec<PropertyType> = [&first.land, &first.residential, &first.commercial, &first.other]
            .into_iter()
            .flatten()
            .map(|name| PropertyType::new(name.clone(), name.clone()))
            .collect();

        let second = categorize(&flattened);

        assert_eq!(first, second);
    }

    #[test]
    fn custom_tables_classify_other_locales() {
        let tables: &[(PropertyCategory, &[&str])] = &[(PropertyCategory::Land, &["grundstück"])];

        assert_eq!(classify_with("Grundstück", tables), PropertyCategory::Land);
        assert_eq!(classify_with("Land", tables), PropertyCategory::Other);
    }

    #[test]
    fn is_land_checks_land_bucket_only() {
        let categories = categorize(&types(&["Plot", "House"]));

        assert!(is_land(" plot ", &categories));
        assert!(!is_land("House", &categories));
        assert!(!is_land("Land", &categories));
        assert!(!is_land("", &categories));
    }

    #[test]
    fn property_type_name_prefers_details() {
        let property = json!({
            "property_type_details": {"name": "Plot"},
            "property_type_name": "House",
            "type": "Shop",
        });
        assert_eq!(property_type_name(&property), Some("Plot"));

        let property = json!({"property_type": 3, "type": "Shop"});
        assert_eq!(property_type_name(&property), Some("Shop"));

        assert_eq!(property_type_name(&json!({"title": "x"})), None);
    }

    #[test]
    fn land_property_uses_lookup_or_keywords() {
        let categories = categorize(&types(&["Estate Plot", "Paddy"]));
        let mut paddy = Categories::default();
        paddy.land.push("Paddy".to_string());

        assert!(is_land_property(&json!({"property_type_name": "paddy"}), &paddy));
        assert!(is_land_property(&json!({"type": "Rubber Farm"}), &categories));
        assert!(!is_land_property(&json!({"type": "Paddy"}), &categories));
        assert!(!is_land_property(&json!({}), &categories));

        let names = vec!["Paddy".to_string()];
        assert!(is_land_property(&json!({"property_type": "PADDY"}), &names));

        let set: HashSet<String> = ["paddy".to_string()].into_iter().collect();
        assert!(is_land_property(&json!({"property_type": "Paddy "}), &set));
    }
}
