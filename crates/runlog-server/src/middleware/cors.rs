//! Cross-origin headers
//!
//! Every response carries the three `Access-Control-Allow-*` headers and any
//! `OPTIONS` request is answered with 200 before it reaches the router.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
}

impl CorsHeaders {
    /// `origin` is `*` or a single origin such as `http://localhost:3000`
    pub fn new(origin: &str) -> anyhow::Result<Self> {
        let allow_origin = HeaderValue::from_str(origin.trim())
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", origin, e))?;
        Ok(Self { allow_origin })
    }

    pub fn any() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
        }
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

pub async fn cors(State(cors): State<CorsHeaders>, request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    cors.apply(response.headers_mut());
    response
}
