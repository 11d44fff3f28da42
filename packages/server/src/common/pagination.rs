//! Offset pagination for list endpoints.

use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

/// Raw `limit` / `offset` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Pagination with defaults applied and bounds enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationArgs {
    /// Apply defaults (limit 50, offset 0) and clamp limit to 1..=200.
    pub fn validate(&self) -> Page {
        Page {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        PaginationArgs::default().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            PaginationArgs::default().validate(),
            Page { limit: 50, offset: 0 }
        );
    }

    #[test]
    fn test_bounds() {
        let page = PaginationArgs {
            limit: Some(10_000),
            offset: Some(-5),
        }
        .validate();
        assert_eq!(page, Page { limit: 200, offset: 0 });

        let page = PaginationArgs {
            limit: Some(0),
            offset: Some(20),
        }
        .validate();
        assert_eq!(page, Page { limit: 1, offset: 20 });
    }
}
