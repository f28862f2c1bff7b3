use poem::middleware::Cors;

use super::error::optional;

/// Initialize CORS middleware for cross-origin requests
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///   (default: "http://localhost:3000")
pub fn init_cors(lookup: &impl Fn(&str) -> Option<String>) -> Cors {
    let allowed_origins = optional(lookup, "CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    Cors::new()
        .allow_origins(parse_origins(&allowed_origins))
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec![
            "accept",
            "authorization",
            "content-type",
            "x-csrf-token",
        ])
        .expose_headers(vec!["link"])
        .allow_credentials(true)
        .max_age(300)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
