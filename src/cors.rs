use http::Method;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Local development origins, including the usual frontend dev server ports.
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost,https://localhost,http://127.0.0.1,https://127.0.0.1";

/// Whether `origin` is covered by the configured list. Entries match by
/// prefix, so `http://localhost` also admits `http://localhost:3000`; a
/// `*` entry admits everything.
#[must_use]
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed
        .iter()
        .any(|candidate| candidate == "*" || origin.starts_with(candidate.as_str()))
}

/// Build a CORS layer for gRPC-Web with the given allowed origins.
pub fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin
                .to_str()
                .is_ok_and(|origin_str| origin_allowed(origin_str, &cors_origins))
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(Any)
}
