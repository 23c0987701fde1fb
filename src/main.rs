use chrono::{DateTime, Utc};
use estate_catalog::api::{CatalogService, HttpApiClient, ListParams};
use estate_catalog::catalog::metric::{ALL_TYPES, ANY_VALUE};
use estate_catalog::catalog::{format_area, MetricSelection};
use estate_catalog::config::Config;
use estate_catalog::models::PaginatedResult;
use estate_catalog::payload::nearby_places_of;
use estate_catalog::search::{build_query, parse_query};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// What gets written to disk after a run
#[derive(Serialize)]
struct ListingSnapshot<'a> {
    fetched_at: DateTime<Utc>,
    query: String,
    result: &'a PaginatedResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Estate Catalog");

    let config = Config::from_env()?;
    let service = CatalogService::new(HttpApiClient::new(&config)?);

    let categories = service.categories().await?;
    info!(
        "Taxonomy: {} land, {} residential, {} commercial, {} other",
        categories.land.len(),
        categories.residential.len(),
        categories.commercial.len(),
        categories.other.len()
    );

    // Optional listing-page query, e.g. "property_type=Land&cents=10-20"
    let mut filter = parse_query(&std::env::args().nth(1).unwrap_or_default());
    let selected = filter.property_type.clone().unwrap_or_else(|| ALL_TYPES.to_string());
    let current = MetricSelection {
        kind: filter.metric_kind,
        value: filter.metric_value.clone().unwrap_or_else(|| ANY_VALUE.to_string()),
    };
    let selection = current.for_type(&selected, &categories);
    if selection != current {
        info!("{} filters by {}, dropping {:?}", selected, selection.kind.param_key(), current.value);
    }
    filter.metric_kind = selection.kind;
    filter.metric_value = Some(selection.value);
    filter.page_size = filter.page_size.or(Some(config.page_size));

    let query = build_query(&filter);
    info!("Searching with: {}", query);

    let result = service.list_properties(&ListParams::from_filter(&filter)).await?;
    info!("\n✅ Page {}, {} properties total\n", result.page, result.count);

    for (i, property) in result.results.iter().enumerate() {
        let title = property
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Untitled");
        println!("{}. {}", i + 1, title);
        if let Some(area) = format_area(property, &categories) {
            println!("   Area: {}", area);
        }
        let nearby = nearby_places_of(property);
        if !nearby.is_empty() {
            let places: Vec<String> = nearby
                .iter()
                .map(|p| match &p.distance {
                    Some(distance) => format!("{} ({})", p.place, distance),
                    None => p.place.clone(),
                })
                .collect();
            println!("   Nearby: {}", places.join(", "));
        }
        println!();
    }

    let snapshot = ListingSnapshot {
        fetched_at: Utc::now(),
        query,
        result: &result,
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    tokio::fs::write("listing_snapshot.json", json).await?;
    info!("💾 Saved listing snapshot to listing_snapshot.json");

    Ok(())
}
