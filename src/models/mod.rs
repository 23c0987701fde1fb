use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A canonical property type entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyType {
    pub id: String,
    pub name: String,
}

impl PropertyType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Semantic bucket a property type falls into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Land,
    Residential,
    Commercial,
    Other,
}

/// Whether a listing is for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sell,
    Rent,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sell => "sell",
            TransactionType::Rent => "rent",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "sell" => Some(TransactionType::Sell),
            "rent" => Some(TransactionType::Rent),
            _ => None,
        }
    }
}

/// Which filter dimension applies to a property type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Beds,
    Sqft,
    Cents,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Beds, MetricKind::Sqft, MetricKind::Cents];

    /// Query parameter key carrying the chosen bucket for this kind
    pub fn param_key(&self) -> &'static str {
        match self {
            MetricKind::Beds => "beds",
            MetricKind::Sqft => "sqft",
            MetricKind::Cents => "cents",
        }
    }

    /// Unit label used when rendering an area of this kind
    pub fn unit_label(&self) -> Option<&'static str> {
        match self {
            MetricKind::Beds => None,
            MetricKind::Sqft => Some("sq.ft."),
            MetricKind::Cents => Some("cents"),
        }
    }
}

/// Device coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Filter selection made in the search UI
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilter {
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub transaction_type: Option<TransactionType>,
    pub property_type: Option<String>,
    pub metric_kind: MetricKind,
    /// Bucket such as `"10-20"` or `"100+"`; `"Any"` means unbounded
    pub metric_value: Option<String>,
    /// Price bucket, same grammar as `metric_value`
    pub price_range: Option<String>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// A place near a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NearbyPlace {
    pub place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

/// Canonical paginated listing result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResult<T = Value> {
    pub results: Vec<T>,
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PaginatedResult<T> {
    /// Result with no entries, used whenever the payload is unusable
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            results: Vec::new(),
            count: 0,
            next: None,
            previous: None,
            page,
            page_size,
        }
    }
}
