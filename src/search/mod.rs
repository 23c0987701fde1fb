pub mod bucket;
pub mod query;

pub use bucket::{parse_bucket, Bucket};
pub use query::{build_list_params, build_query, parse_query};
