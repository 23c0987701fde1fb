use crate::catalog::metric::ALL_TYPES;
use crate::models::{MetricKind, SearchFilter, TransactionType};
use crate::search::bucket::parse_bucket;
use serde::{Deserialize, Serialize};

/// Parameters understood by the property listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Minimum price
    pub price_min: Option<u64>,
    /// Maximum price
    pub price_max: Option<u64>,
    pub property_type: Option<String>,
    /// Minimum number of bedrooms
    pub bedrooms_min: Option<u32>,
    /// Minimum number of bathrooms
    pub bathrooms_min: Option<u32>,
    pub ownership: Option<String>,
    /// Minimum area, in `area_unit`
    pub area_min: Option<f64>,
    /// Maximum area, in `area_unit`
    pub area_max: Option<f64>,
    pub area_unit: Option<String>,
    /// Free-text city or locality
    pub location: Option<String>,
    pub property_for: Option<TransactionType>,
    pub furnishing: Option<String>,
    pub search: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl ListParams {
    /// First page with the given size
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    /// Translate a search form selection into listing parameters
    pub fn from_filter(filter: &SearchFilter) -> Self {
        let mut params = Self {
            page: filter.page,
            page_size: filter.page_size,
            location: filter.location.clone(),
            property_for: filter.transaction_type,
            property_type: filter
                .property_type
                .clone()
                .filter(|name| name != ALL_TYPES),
            lat: filter.coordinates.map(|c| c.lat),
            lng: filter.coordinates.map(|c| c.lng),
            ..Self::default()
        };

        let price = filter
            .price_range
            .as_deref()
            .and_then(parse_bucket)
            .unwrap_or_default();
        params.price_min = filter.price_min.or(price.whole_min());
        params.price_max = filter.price_max.or(price.whole_max());

        if let Some(bucket) = filter.metric_value.as_deref().and_then(parse_bucket) {
            match filter.metric_kind {
                MetricKind::Beds => {
                    params.bedrooms_min = bucket.whole_min().and_then(|v| u32::try_from(v).ok())
                }
                kind => {
                    params.area_min = bucket.min;
                    params.area_max = bucket.max;
                    params.area_unit = Some(kind.param_key().to_string());
                }
            }
        }

        params
    }
}
