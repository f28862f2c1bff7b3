use bigdecimal::BigDecimal;

use super::value_objects::{ProductStatus, SortField, SortOrder};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Listing query as received from a client, before validation.
///
/// `0` for `page`/`limit` and `None` for the sort options mean "use the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProductsParams {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub page: i64,
    pub limit: i64,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Listing query with defaults applied and every identifier resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            name: None,
            sku: None,
            category: None,
            status: None,
            min_price: None,
            max_price: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ProductFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_offset_by_whole_pages() {
        let filter = ProductFilter {
            page: 3,
            limit: 25,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 50);
        assert_eq!(ProductFilter::default().offset(), 0);
    }

    #[test]
    fn should_saturate_offset_instead_of_overflowing() {
        let filter = ProductFilter {
            page: i64::MAX,
            limit: MAX_LIMIT,
            ..Default::default()
        };
        assert_eq!(filter.offset(), i64::MAX);
    }
}
