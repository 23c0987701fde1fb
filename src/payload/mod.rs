pub mod nearby;
pub mod response;

pub use nearby::{nearby_places_of, parse_nearby_places};
pub use response::{normalize_flat_list, normalize_list, recover_list};
