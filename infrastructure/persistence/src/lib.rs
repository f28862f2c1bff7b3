pub mod db;
pub mod product {
    pub mod entity;
    pub mod query;
    pub mod repository;
}
