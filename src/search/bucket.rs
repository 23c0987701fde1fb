use crate::catalog::metric::ANY_VALUE;

/// Numeric range picked from a filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bucket {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bucket {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Lower bound for an integer parameter, rounded up so the range never widens
    pub fn whole_min(&self) -> Option<u64> {
        self.min.map(|min| min.ceil() as u64)
    }

    /// Upper bound for an integer parameter, rounded down
    pub fn whole_max(&self) -> Option<u64> {
        self.max.map(|max| max.floor() as u64)
    }
}

/// Parse `"10-20"`, `"100+"` or `"3"` into bounds.
///
/// `"Any"`, blank and unparsable buckets yield `None`.
pub fn parse_bucket(raw: &str) -> Option<Bucket> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(ANY_VALUE) {
        return None;
    }

    if let Some(min) = raw.strip_suffix('+') {
        return parse_bound(min).map(|min| Bucket {
            min: Some(min),
            max: None,
        });
    }

    if let Some((min, max)) = raw.split_once('-') {
        let bucket = Bucket {
            min: parse_bound(min),
            max: parse_bound(max),
        };
        return (!bucket.is_unbounded()).then_some(bucket);
    }

    parse_bound(raw).map(|min| Bucket {
        min: Some(min),
        max: None,
    })
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}
