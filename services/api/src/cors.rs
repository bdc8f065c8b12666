use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use gradecast::config::{ConfigError, CorsConfig};

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Cross-origin policy for dashboard clients. The default origin is `*`,
/// suitable only because scoring handles no sensitive data.
#[derive(Debug, Clone)]
pub(crate) struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    pub(crate) fn from_config(config: &CorsConfig) -> Result<Self, ConfigError> {
        let allow_origin =
            HeaderValue::from_str(&config.allow_origin).map_err(|_| ConfigError::InvalidSetting {
                key: "APP_CORS_ORIGIN",
                value: config.allow_origin.clone(),
            })?;
        Ok(Self { allow_origin })
    }
}

/// Stamps CORS headers on every response. Preflight requests to a known path
/// answer 204; unknown paths keep the router's 404.
pub(crate) async fn apply_cors(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if preflight && response.status() != StatusCode::NOT_FOUND {
        response = StatusCode::NO_CONTENT.into_response();
    }

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        policy.allow_origin.clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}
