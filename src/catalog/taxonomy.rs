use crate::models::PropertyType;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Names used when the backend provides no usable taxonomy
pub const DEFAULT_TYPE_NAMES: [&str; 10] = [
    "Land",
    "Commercial Land",
    "Agriculture Land",
    "Industrial Land",
    "House",
    "Apartment",
    "Shop",
    "Office",
    "Commercial Building",
    "Industrial Building",
];

/// Turns raw property-type records into a canonical, de-duplicated list.
///
/// The fallback taxonomy is owned by the normalizer so callers (and tests)
/// can supply their own.
#[derive(Debug, Clone)]
pub struct TaxonomyNormalizer {
    defaults: Vec<PropertyType>,
}

impl TaxonomyNormalizer {
    pub fn new(defaults: Vec<PropertyType>) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &[PropertyType] {
        &self.defaults
    }

    /// Normalize whatever the property-type endpoint returned.
    ///
    /// Anything other than a non-empty array yields the default taxonomy.
    /// Entries without a usable name are skipped, and later entries whose
    /// normalized name was already seen are dropped.
    pub fn normalize(&self, raw: &Value) -> Vec<PropertyType> {
        let entries = match raw.as_array() {
            Some(entries) if !entries.is_empty() => entries,
            _ => return self.defaults.clone(),
        };

        let mut seen = HashSet::new();
        let mut types = Vec::with_capacity(entries.len());

        for entry in entries {
            let Some(name) = entry
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
            else {
                debug!("Skipping property type without a name: {}", entry);
                continue;
            };

            if !seen.insert(normalize_name(name)) {
                debug!("Dropping duplicate property type {:?}", name);
                continue;
            }

            let id = entry
                .get("id")
                .and_then(id_as_string)
                .unwrap_or_else(|| derived_id(name));

            types.push(PropertyType::new(id, name));
        }

        types
    }
}

impl Default for TaxonomyNormalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_TYPE_NAMES
                .iter()
                .map(|name| PropertyType::new(slugify(name), *name))
                .collect(),
        )
    }
}

/// Lowercased, trimmed form used for every name comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Derive an id from a type name: `"Commercial Land"` becomes `"commercial-land"`
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Slug of the name, or its lowercased hyphenated form when the slug has
/// no letters or digits left (e.g. names written entirely outside ASCII)
fn derived_id(name: &str) -> String {
    let slug = slugify(name);
    if slug.chars().any(|c| c.is_ascii_alphanumeric()) {
        return slug;
    }
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn id_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
