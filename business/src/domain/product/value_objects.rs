use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "Active"),
            ProductStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ProductStatus::Active),
            "Inactive" => Ok(ProductStatus::Inactive),
            _ => Err(format!("Invalid product status: {}", s)),
        }
    }
}

/// Columns a product listing may be ordered by.
///
/// The SQL identifier for each variant comes from [`SortField::column`], so
/// nothing a client sends ever reaches the ORDER BY clause verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    Sku,
    Name,
    Price,
    Stock,
    Category,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Id,
        SortField::Sku,
        SortField::Name,
        SortField::Price,
        SortField::Stock,
        SortField::Category,
        SortField::Status,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Sku => "sku",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Stock => "stock",
            SortField::Category => "category",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| format!("Invalid sort field: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Presence-aware value for partial updates.
///
/// `Keep` means the caller did not mention the field. For nullable columns the
/// payload is itself an `Option`, so `Set(None)` clears the column while `Keep`
/// leaves it alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Keep,
        }
    }
}
