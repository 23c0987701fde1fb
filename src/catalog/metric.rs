use crate::catalog::classify::{is_land, is_land_property, LandLookup};
use crate::models::MetricKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property-type selection meaning "no particular type"
pub const ALL_TYPES: &str = "All";

/// Metric value meaning "no bound"
pub const ANY_VALUE: &str = "Any";

/// Resolved filter dimension for a type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricResolution {
    pub kind: MetricKind,
    pub reset_value: &'static str,
}

/// Decide which metric filter applies to the selected property type
pub fn resolve_metric<L: LandLookup + ?Sized>(selected_type: &str, categories: &L) -> MetricResolution {
    let kind = if selected_type == ALL_TYPES {
        MetricKind::Beds
    } else if is_land(selected_type, categories) {
        MetricKind::Cents
    } else {
        MetricKind::Sqft
    };

    MetricResolution {
        kind,
        reset_value: ANY_VALUE,
    }
}

/// Metric kind and bucket currently chosen in the search form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSelection {
    pub kind: MetricKind,
    pub value: String,
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self {
            kind: MetricKind::Beds,
            value: ANY_VALUE.to_string(),
        }
    }
}

impl MetricSelection {
    /// Selection after switching to `selected_type`. A change of kind always
    /// resets the value so a range never outlives its unit.
    pub fn for_type<L: LandLookup + ?Sized>(&self, selected_type: &str, categories: &L) -> Self {
        let resolution = resolve_metric(selected_type, categories);
        if resolution.kind == self.kind {
            return self.clone();
        }
        Self {
            kind: resolution.kind,
            value: resolution.reset_value.to_string(),
        }
    }

    /// Same kind, new bucket
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            kind: self.kind,
            value: value.into(),
        }
    }
}

/// Render a listing's area with its unit, or `None` when it has no area
pub fn format_area<L: LandLookup + ?Sized>(property: &Value, categories: &L) -> Option<String> {
    let area = area_text(property.get("area")?)?;
    let kind = if is_land_property(property, categories) {
        MetricKind::Cents
    } else {
        MetricKind::Sqft
    };
    let unit = kind.unit_label()?;
    Some(format!("{} {}", area, unit))
}

fn area_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => {
            let area = number.as_f64()?;
            if area == 0.0 {
                None
            } else if area.fract() == 0.0 && area.abs() < 1e15 {
                Some(format!("{}", area as i64))
            } else {
                Some(number.to_string())
            }
        }
        Value::String(text) => {
            let text = text.trim();
            let is_zero = text.parse::<f64>().map(|n| n == 0.0).unwrap_or(false);
            (!text.is_empty() && !is_zero).then(|| text.to_string())
        }
        _ => None,
    }
}
