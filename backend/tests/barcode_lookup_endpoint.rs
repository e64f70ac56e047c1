//! Behavioural tests for `POST /api/v1/barcode-lookup`.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN, RETRY_AFTER,
};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pawdesk::Trace;
use pawdesk::domain::ports::{
    FixtureProductCatalogSource, ProductCatalogError, ProductCatalogSource,
};
use pawdesk::domain::{Barcode, ProductDetails, ProductSource, TRACE_ID_HEADER};
use pawdesk::inbound::http::api_scope;
use pawdesk::inbound::http::state::HttpState;
use pawdesk::middleware::{Cors, CorsPolicy};
use pawdesk::test_support::clock::MutableClock;
use pawdesk::test_support::http::{TEST_TOKEN, TestHttpState, bearer};
use rstest::rstest;
use serde_json::{Value, json};

const URI: &str = "/api/v1/barcode-lookup";
const EAN13: &str = "4006381333931";

async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Cors::new(CorsPolicy::new(["https://app.pawdesk.example"])))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

fn lookup_request(barcode: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(URI)
        .insert_header(bearer(TEST_TOKEN))
        .set_json(json!({ "barcode": barcode }))
}

fn product(source: ProductSource) -> ProductDetails {
    ProductDetails {
        barcode: EAN13.to_owned(),
        name: "Rubber chew toy".to_owned(),
        brand: Some("Kong".to_owned()),
        category: Some("Dog toys".to_owned()),
        description: None,
        image_url: None,
        size: Some("Medium".to_owned()),
        source,
    }
}

fn catalogue_with(source: ProductSource) -> FixtureProductCatalogSource {
    FixtureProductCatalogSource::default()
        .with_product(Barcode::parse(EAN13).expect("barcode"), product(source))
}

struct FailingSource;

#[async_trait]
impl ProductCatalogSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn lookup(
        &self,
        _barcode: &Barcode,
    ) -> Result<Option<ProductDetails>, ProductCatalogError> {
        Err(ProductCatalogError::upstream(503_u16, "maintenance"))
    }
}

#[rstest]
#[case::nine_digits("123456789")]
#[case::letters("4006381333ABC")]
#[case::too_long("123456789012345678901")]
#[case::blank("   ")]
#[actix_web::test]
async fn invalid_barcodes_are_bad_requests(#[case] barcode: &str) {
    let app = init_app(TestHttpState::default().build()).await;
    let res = actix_test::call_service(&app, lookup_request(barcode).to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let app = init_app(TestHttpState::default().build()).await;
    let req = actix_test::TestRequest::post()
        .uri(URI)
        .insert_header(bearer(TEST_TOKEN))
        .set_payload("barcode=4006381333931")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::missing(None)]
#[case::unknown(Some("Bearer someone-else"))]
#[case::basic(Some("Basic Zm9vOmJhcg=="))]
#[actix_web::test]
async fn missing_or_invalid_tokens_are_unauthorised(#[case] header: Option<&str>) {
    let app = init_app(TestHttpState::default().build()).await;
    let mut req = actix_test::TestRequest::post()
        .uri(URI)
        .set_json(json!({ "barcode": EAN13 }));
    if let Some(value) = header {
        req = req.insert_header(("authorization", value));
    }
    let res = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn unconfigured_auth_is_a_redacted_server_error() {
    let app = init_app(TestHttpState::default().without_auth().build()).await;
    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn sixty_first_request_in_a_minute_is_rate_limited() {
    let app = init_app(TestHttpState::default().build()).await;
    for attempt in 1..=60 {
        let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "attempt {attempt}");
    }

    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after = res
        .headers()
        .get(RETRY_AFTER)
        .expect("Retry-After header")
        .to_str()
        .expect("ascii header");
    assert_eq!(retry_after, "60");
}

#[rstest]
#[actix_web::test]
async fn rate_limit_window_slides() {
    let clock = Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).single().expect("timestamp"),
    ));
    let state = TestHttpState::default()
        .with_clock(clock.clone())
        .with_rate_limit(2)
        .build();
    let app = init_app(state).await;

    for _ in 0..2 {
        let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

    clock.advance(Duration::from_secs(61));
    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn primary_hit_is_returned() {
    let state = TestHttpState::default()
        .with_primary(catalogue_with(ProductSource::OpenFoodFacts))
        .build();
    let app = init_app(state).await;
    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["product"]["name"], "Rubber chew toy");
    assert_eq!(body["product"]["source"], "open_food_facts");
}

#[rstest]
#[actix_web::test]
async fn fallback_is_consulted_when_primary_misses() {
    let state = TestHttpState::default()
        .with_fallback(catalogue_with(ProductSource::BarcodeLookup))
        .build();
    let app = init_app(state).await;
    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["product"]["source"], "barcode_lookup");
}

#[rstest]
#[actix_web::test]
async fn provider_errors_read_as_not_found() {
    let state = TestHttpState::default()
        .with_primary(FailingSource)
        .with_fallback(FailingSource)
        .build();
    let app = init_app(state).await;
    let res = actix_test::call_service(&app, lookup_request(EAN13).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "found": false }));
}

#[rstest]
#[case::localhost("http://localhost:5173", "http://localhost:5173")]
#[case::listed("https://app.pawdesk.example", "https://app.pawdesk.example")]
#[case::unlisted("https://evil.example", "https://app.pawdesk.example")]
#[actix_web::test]
async fn preflight_answers_with_cors_headers(#[case] origin: &str, #[case] expected: &str) {
    let app = init_app(TestHttpState::default().build()).await;
    let req = actix_test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri(URI)
        .insert_header((ORIGIN, origin))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        res.headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(expected)
    );
}

#[rstest]
#[actix_web::test]
async fn error_responses_carry_cors_and_trace_headers() {
    let app = init_app(TestHttpState::default().build()).await;
    let req = actix_test::TestRequest::post()
        .uri(URI)
        .insert_header((ORIGIN, "http://127.0.0.1:8080"))
        .set_json(json!({ "barcode": EAN13 }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("http://127.0.0.1:8080")
    );
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn other_methods_are_not_allowed() {
    let app = init_app(TestHttpState::default().build()).await;
    let req = actix_test::TestRequest::get()
        .uri(URI)
        .insert_header(bearer(TEST_TOKEN))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
