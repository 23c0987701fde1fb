pub mod classify;
pub mod metric;
pub mod taxonomy;

pub use classify::{categorize, classify_name, is_land, is_land_property, Categories, LandLookup};
pub use metric::{format_area, resolve_metric, MetricResolution, MetricSelection};
pub use taxonomy::{slugify, TaxonomyNormalizer};
