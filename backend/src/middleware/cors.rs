//! Cross-origin headers for browser clients.
//!
//! Preflight `OPTIONS` requests are answered here with `204 No Content`
//! without reaching a handler. Every other response, error responses
//! included, carries the same `Access-Control-*` headers.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, HeaderMap, HeaderValue, ORIGIN, VARY,
};
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;
use url::{Host, Url};

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOW_METHODS: &str = "POST, OPTIONS";
const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

/// Origin rules shared by every worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    /// Allow `origins` in addition to any localhost origin.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins
                .into_iter()
                .map(Into::into)
                .map(|origin| origin.trim().trim_end_matches('/').to_owned())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }

    /// Configured allow-list, without the implicit localhost origins.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Value for `Access-Control-Allow-Origin` given the request `Origin`.
    ///
    /// Localhost and allow-listed origins are reflected. Any other origin
    /// receives the first allow-listed origin, so the browser rejects the
    /// response, or `*` when no allow-list is configured.
    ///
    /// # Examples
    /// ```
    /// use pawdesk::middleware::cors::CorsPolicy;
    ///
    /// let policy = CorsPolicy::new(["https://app.pawdesk.example"]);
    /// assert_eq!(policy.allow_origin(Some("http://localhost:5173")), "http://localhost:5173");
    /// assert_eq!(policy.allow_origin(Some("https://evil.example")), "https://app.pawdesk.example");
    /// assert_eq!(CorsPolicy::default().allow_origin(None), "*");
    /// ```
    pub fn allow_origin(&self, origin: Option<&str>) -> String {
        if let Some(origin) = origin
            && (is_localhost(origin) || self.allowed_origins.iter().any(|allowed| allowed == origin))
        {
            return origin.to_owned();
        }
        self.allowed_origins
            .first()
            .cloned()
            .unwrap_or_else(|| "*".to_owned())
    }

    fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        let allow_origin = self.allow_origin(origin);
        match HeaderValue::from_str(&allow_origin) {
            Ok(value) => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
            Err(error) => {
                debug!(%error, origin = %allow_origin, "origin is not a valid header value");
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
        }
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(VARY, HeaderValue::from_static("Origin"));
    }
}

fn is_localhost(origin: &str) -> bool {
    let Ok(url) = Url::parse(origin) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(addr)) => addr.is_loopback(),
        Some(Host::Ipv6(addr)) => addr.is_loopback(),
        None => false,
    }
}

/// Middleware applying a [`CorsPolicy`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pawdesk::middleware::cors::{Cors, CorsPolicy};
///
/// let app = App::new().wrap(Cors::new(CorsPolicy::default()));
/// ```
#[derive(Clone)]
pub struct Cors {
    policy: Arc<CorsPolicy>,
}

impl Cors {
    pub fn new(policy: CorsPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service: Rc::new(service),
            policy: Arc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`Cors`].
pub struct CorsMiddleware<S> {
    service: Rc<S>,
    policy: Arc<CorsPolicy>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let origin = req
            .headers()
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let policy = Arc::clone(&self.policy);

        if req.method() == Method::OPTIONS {
            let mut response = HttpResponse::NoContent().finish();
            policy.apply(origin.as_deref(), response.headers_mut());
            response.headers_mut().insert(
                ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECS),
            );
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let mut res = service.call(req).await?;
            policy.apply(origin.as_deref(), res.headers_mut());
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiResult, Error as DomainError};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:5173", true)]
    #[case("http://127.0.0.1:8080", true)]
    #[case("http://[::1]:3000", true)]
    #[case("http://LOCALHOST", true)]
    #[case("https://localhost.evil.example", false)]
    #[case("https://app.pawdesk.example", false)]
    #[case("not a url", false)]
    fn localhost_detection(#[case] origin: &str, #[case] expected: bool) {
        assert_eq!(is_localhost(origin), expected);
    }

    #[rstest]
    #[case(Some("https://app.pawdesk.example"), "https://app.pawdesk.example")]
    #[case(Some("https://admin.pawdesk.example"), "https://admin.pawdesk.example")]
    #[case(Some("https://evil.example"), "https://app.pawdesk.example")]
    #[case(None, "https://app.pawdesk.example")]
    fn allow_list_reflects_known_origins(#[case] origin: Option<&str>, #[case] expected: &str) {
        let policy = CorsPolicy::new(["https://app.pawdesk.example/", " https://admin.pawdesk.example"]);
        assert_eq!(policy.allow_origin(origin), expected);
    }

    #[rstest]
    fn empty_allow_list_falls_back_to_wildcard() {
        let policy = CorsPolicy::new(["", "  "]);
        assert!(policy.allowed_origins().is_empty());
        assert_eq!(policy.allow_origin(Some("https://evil.example")), "*");
    }

    async fn handler() -> ApiResult<&'static str> {
        Err(DomainError::unauthorized("missing bearer token"))
    }

    #[actix_web::test]
    async fn preflight_short_circuits_with_no_content() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Cors::new(CorsPolicy::default()))
                .route("/", web::post().to(handler)),
        )
        .await;
        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/")
            .insert_header((ORIGIN, "http://localhost:5173"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(
            res.headers().get(ACCESS_CONTROL_ALLOW_METHODS),
            Some(&HeaderValue::from_static(ALLOW_METHODS))
        );
        assert!(res.headers().contains_key(ACCESS_CONTROL_MAX_AGE));
    }

    #[actix_web::test]
    async fn error_responses_carry_cors_headers() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Cors::new(CorsPolicy::new(["https://app.pawdesk.example"])))
                .route("/", web::post().to(handler)),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/")
            .insert_header((ORIGIN, "https://app.pawdesk.example"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://app.pawdesk.example"))
        );
        assert_eq!(
            res.headers().get(VARY),
            Some(&HeaderValue::from_static("Origin"))
        );
    }
}
