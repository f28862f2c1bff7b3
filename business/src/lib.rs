pub mod application {
    pub mod product {
        pub mod create;
        pub mod delete;
        pub mod delete_image;
        pub mod get_by_id;
        pub mod get_by_sku;
        pub mod image_cleanup;
        pub mod list;
        pub mod update;
        pub mod upload_image;

        #[cfg(test)]
        pub(crate) mod test_support;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod product {
        pub mod errors;
        pub mod filter;
        pub mod image;
        pub mod model;
        pub mod repository;
        pub mod validation;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod delete_image;
            pub mod get_by_id;
            pub mod get_by_sku;
            pub mod list;
            pub mod update;
            pub mod upload_image;
        }
    }
    pub mod storage {
        pub mod blob_store;
        pub mod errors;
    }
}
