//! Dashboard Data Model
//!
//! Transient view records built from the analytics service's JSON.
//! Every collection is rebuilt wholesale from a fresh response; nothing
//! here is cached or merged across fetches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of engagement records shown on the radar chart
pub const RADAR_TOP_N: usize = 8;

/// One (date, count) sample of query volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPoint {
    /// Date label as sent by the service (kept verbatim, order-preserving)
    pub date: String,
    /// Number of queries on that date
    pub queries: u64,
}

/// One category's contribution to the query breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub count: u64,
}

/// How often a given query type occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub user_query: String,
    pub count: u64,
}

impl QueryPoint {
    pub fn new(date: impl Into<String>, queries: u64) -> Self {
        Self {
            date: date.into(),
            queries,
        }
    }

    /// Map a raw `/query-trends` response.
    ///
    /// Each record's `query_count` becomes `queries`, defaulting to 0 when
    /// absent or not a non-negative integer. A response that is not an
    /// array yields no points.
    pub fn list_from_json(value: &Value) -> Vec<QueryPoint> {
        records(value)
            .map(|record| QueryPoint {
                date: string_field(record, "date"),
                queries: count_field(record, "query_count"),
            })
            .collect()
    }
}

impl CategorySlice {
    pub fn new(category: impl Into<String>, count: u64) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }

    /// Map a raw `/query-category-distribution` response.
    pub fn list_from_json(value: &Value) -> Vec<CategorySlice> {
        records(value)
            .map(|record| CategorySlice {
                category: string_field(record, "category"),
                count: count_field(record, "count"),
            })
            .collect()
    }
}

impl EngagementRecord {
    pub fn new(user_query: impl Into<String>, count: u64) -> Self {
        Self {
            user_query: user_query.into(),
            count,
        }
    }

    /// Map a raw `/user-engagement` response.
    pub fn list_from_json(value: &Value) -> Vec<EngagementRecord> {
        records(value)
            .map(|record| EngagementRecord {
                user_query: string_field(record, "user_query"),
                count: count_field(record, "count"),
            })
            .collect()
    }
}

/// Select the `n` records with the highest count.
///
/// The sort is stable, so records with equal counts keep the order the
/// service returned them in.
pub fn top_engagement(records: &[EngagementRecord], n: usize) -> Vec<EngagementRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted.truncate(n);
    sorted
}

/// Iterate the elements of an array response; anything else is empty.
fn records(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_array().into_iter().flatten()
}

fn string_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn count_field(record: &Value, key: &str) -> u64 {
    let Some(value) = record.get(key) else {
        return 0;
    };

    if let Some(n) = value.as_u64() {
        return n;
    }

    // Whole floats such as 5.0 are common from Python services
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => f as u64,
        _ => 0,
    }
}
