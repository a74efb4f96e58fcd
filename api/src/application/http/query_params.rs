use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Equality filter on a single field, from `filter[field]=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub conditions: Vec<FilterCondition>,
}

impl FilterParams {
    /// Value of the first condition on `field`, trimmed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.conditions
            .iter()
            .find(|cond| cond.field == field)
            .map(|cond| cond.value.trim())
    }
}

#[derive(Debug, Clone)]
pub struct PaginationParams {
    pub offset: i64,
    pub limit: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PaginationParams {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

/// Filter and pagination parameters of a list endpoint.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub filter: FilterParams,
    pub pagination: PaginationParams,
}

impl QueryParams {
    /// Reads `filter[field]=value`, `offset` and `limit`.
    ///
    /// Unknown keys and unparseable numbers are ignored. Conditions are kept
    /// in key order so repeated lookups are deterministic.
    pub fn from_query_map(query_map: &HashMap<String, String>) -> Self {
        let mut conditions: Vec<FilterCondition> = query_map
            .iter()
            .filter_map(|(key, value)| {
                let field = key.strip_prefix("filter[")?.strip_suffix(']')?;
                (!field.is_empty() && !field.contains(['[', ']'])).then(|| FilterCondition {
                    field: field.to_string(),
                    value: value.clone(),
                })
            })
            .collect();
        conditions.sort_by(|a, b| a.field.cmp(&b.field));

        let number = |key: &str| query_map.get(key).and_then(|v| v.trim().parse::<i64>().ok());

        Self {
            filter: FilterParams { conditions },
            pagination: PaginationParams::new(number("offset"), number("limit")),
        }
    }
}
