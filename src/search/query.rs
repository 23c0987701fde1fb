use crate::api::types::ListParams;
use crate::catalog::metric::{ALL_TYPES, ANY_VALUE};
use crate::models::{Coordinates, MetricKind, SearchFilter, TransactionType};
use crate::search::bucket::parse_bucket;
use std::collections::HashMap;
use std::fmt::Display;
use url::form_urlencoded;

/// Appends only parameters that carry a value
struct QueryWriter {
    serializer: form_urlencoded::Serializer<'static, String>,
}

impl QueryWriter {
    fn new() -> Self {
        Self {
            serializer: form_urlencoded::Serializer::new(String::new()),
        }
    }

    fn text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.serializer.append_pair(key, value);
        }
        self
    }

    fn number<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.serializer.append_pair(key, &value.to_string());
        }
        self
    }

    fn finish(&mut self) -> String {
        self.serializer.finish()
    }
}

/// Serialize a search form selection for the listing page URL
pub fn build_query(filter: &SearchFilter) -> String {
    let mut writer = QueryWriter::new();

    writer
        .text("location", filter.location.as_deref())
        .number("lat", filter.coordinates.map(|c| c.lat))
        .number("lng", filter.coordinates.map(|c| c.lng))
        .text("property_for", filter.transaction_type.map(|t| t.as_str()))
        .text(
            "property_type",
            filter.property_type.as_deref().filter(|name| *name != ALL_TYPES),
        )
        .text(
            filter.metric_kind.param_key(),
            filter
                .metric_value
                .as_deref()
                .filter(|value| !value.trim().eq_ignore_ascii_case(ANY_VALUE)),
        );

    let price = filter
        .price_range
        .as_deref()
        .and_then(parse_bucket)
        .unwrap_or_default();
    writer
        .number("price_min", filter.price_min.or(price.whole_min()))
        .number("price_max", filter.price_max.or(price.whole_max()))
        .number("page", filter.page)
        .number("page_size", filter.page_size);

    writer.finish()
}

/// Read a listing page URL query back into filter state.
///
/// Unknown keys are ignored; when a key repeats, the first value wins.
pub fn parse_query(query: &str) -> SearchFilter {
    let query = query.trim().trim_start_matches('?');
    let mut pairs: HashMap<String, String> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        if !value.is_empty() {
            pairs.entry(key.into_owned()).or_insert_with(|| value.to_string());
        }
    }

    let text = |key: &str| pairs.get(key).cloned();
    let number = |key: &str| {
        pairs
            .get(key)
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|value| value.is_finite())
    };

    let coordinates = match (number("lat"), number("lng")) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ => None,
    };

    let (metric_kind, metric_value) = MetricKind::ALL
        .iter()
        .find_map(|kind| text(kind.param_key()).map(|value| (*kind, Some(value))))
        .unwrap_or((MetricKind::Beds, None));

    SearchFilter {
        location: text("location"),
        coordinates,
        transaction_type: pairs
            .get("property_for")
            .and_then(|value| TransactionType::parse(value)),
        property_type: text("property_type"),
        metric_kind,
        metric_value,
        price_range: text("price_range"),
        price_min: pairs.get("price_min").and_then(|v| v.parse().ok()),
        price_max: pairs.get("price_max").and_then(|v| v.parse().ok()),
        page: pairs.get("page").and_then(|v| v.parse().ok()),
        page_size: pairs.get("page_size").and_then(|v| v.parse().ok()),
    }
}

/// Serialize listing parameters for the server-side listing endpoint
pub fn build_list_params(params: &ListParams) -> String {
    let mut writer = QueryWriter::new();

    writer
        .number("page", params.page)
        .number("page_size", params.page_size)
        .number("price_min", params.price_min)
        .number("price_max", params.price_max)
        .text("property_type", params.property_type.as_deref())
        .number("bedrooms_min", params.bedrooms_min)
        .number("bathrooms_min", params.bathrooms_min)
        .text("ownership", params.ownership.as_deref())
        .number("area_min", params.area_min)
        .number("area_max", params.area_max)
        .text("area_unit", params.area_unit.as_deref())
        .text("location", params.location.as_deref())
        .text("property_for", params.property_for.map(|t| t.as_str()))
        .text("furnishing", params.furnishing.as_deref())
        .text("search", params.search.as_deref())
        .number("lat", params.lat)
        .number("lng", params.lng);

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_empty_and_missing_fields() {
        let filter = SearchFilter {
            price_min: None,
            price_max: Some(50),
            location: Some(String::new()),
            ..SearchFilter::default()
        };

        assert_eq!(build_query(&filter), "price_max=50");
    }

    #[test]
    fn empty_filter_builds_empty_query() {
        assert_eq!(build_query(&SearchFilter::default()), "");
    }

    #[test]
    fn metric_kind_names_the_parameter() {
        let mut filter = SearchFilter {
            metric_kind: MetricKind::Cents,
            metric_value: Some("10-20".to_string()),
            ..SearchFilter::default()
        };
        assert_eq!(build_query(&filter), "cents=10-20");

        filter.metric_kind = MetricKind::Sqft;
        filter.metric_value = Some("2000+".to_string());
        assert_eq!(build_query(&filter), "sqft=2000%2B");

        filter.metric_value = Some("Any".to_string());
        assert_eq!(build_query(&filter), "");
    }

    #[test]
    fn coordinates_are_sent_alongside_location() {
        let filter = SearchFilter {
            location: Some("Fort Kochi".to_string()),
            coordinates: Some(Coordinates { lat: 9.9658, lng: 76.2421 }),
            transaction_type: Some(TransactionType::Rent),
            property_type: Some("House".to_string()),
            ..SearchFilter::default()
        };

        assert_eq!(
            build_query(&filter),
            "location=Fort+Kochi&lat=9.9658&lng=76.2421&property_for=rent&property_type=House"
        );
    }

    #[test]
    fn all_types_and_price_bucket() {
        let filter = SearchFilter {
            property_type: Some("All".to_string()),
            price_range: Some("500000-1000000".to_string()),
            page: Some(2),
            ..SearchFilter::default()
        };

        assert_eq!(build_query(&filter), "price_min=500000&price_max=1000000&page=2");
    }

    #[test]
    fn parse_reads_back_built_query() {
        let filter = SearchFilter {
            location: Some("Thrissur".to_string()),
            coordinates: Some(Coordinates { lat: 10.5, lng: 76.25 }),
            transaction_type: Some(TransactionType::Sell),
            property_type: Some("Agriculture Land".to_string()),
            metric_kind: MetricKind::Cents,
            metric_value: Some("50+".to_string()),
            price_min: Some(100_000),
            price_max: None,
            page: Some(3),
            page_size: Some(24),
            price_range: None,
        };

        assert_eq!(parse_query(&build_query(&filter)), filter);
    }

    #[test]
    fn parse_tolerates_noise() {
        let filter = parse_query("?location=&lat=9.9&price_max=abc&beds=3%2B&extra=1&page=x");

        assert_eq!(filter.location, None);
        assert_eq!(filter.coordinates, None);
        assert_eq!(filter.price_max, None);
        assert_eq!(filter.page, None);
        assert_eq!(filter.metric_kind, MetricKind::Beds);
        assert_eq!(filter.metric_value.as_deref(), Some("3+"));
    }

    #[test]
    fn fractional_price_bucket_never_widens() {
        let filter = SearchFilter {
            price_range: Some("0.5-1.5".to_string()),
            ..SearchFilter::default()
        };

        assert_eq!(build_query(&filter), "price_min=1&price_max=1");
    }

    #[test]
    fn non_finite_coordinates_are_ignored() {
        assert_eq!(parse_query("lat=NaN&lng=inf").coordinates, None);
        assert_eq!(parse_query("lat=9.9&lng=-inf").coordinates, None);
        assert_eq!(build_query(&parse_query("lat=NaN&lng=76.2&location=Kochi")), "location=Kochi");
    }

    #[test]
    fn parse_defaults_metric_to_beds() {
        let filter = parse_query("property_for=RENT");

        assert_eq!(filter.metric_kind, MetricKind::Beds);
        assert_eq!(filter.metric_value, None);
        assert_eq!(filter.transaction_type, Some(TransactionType::Rent));
    }

    #[test]
    fn list_params_in_endpoint_order() {
        let params = ListParams {
            page: Some(1),
            page_size: Some(12),
            price_max: Some(9_000_000),
            bedrooms_min: Some(2),
            area_min: Some(1200.5),
            area_unit: Some("sqft".to_string()),
            search: Some("sea view".to_string()),
            ownership: Some("  ".to_string()),
            ..ListParams::default()
        };

        assert_eq!(
            build_list_params(&params),
            "page=1&page_size=12&price_max=9000000&bedrooms_min=2&area_min=1200.5&area_unit=sqft&search=sea+view"
        );
    }
}
