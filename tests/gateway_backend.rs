//! Gateway integration tests against a local stub backend
//!
//! The stub plays the financial-aggregation API: success bodies, the
//! 401-with-login-url handshake, invalid-session rejections, and plain
//! server errors.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use financial_dashboard_client::{
    BackendGateway, DashboardLoader, GatewayConfig, GatewayError, LoadOutcome,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Serve `router` on an ephemeral port, returning the base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub local addr");

    tokio::spawn(async move {
        axum::serve(listener, router.layer(CorsLayer::permissive()))
            .await
            .expect("stub backend serve");
    });

    format!("http://{}", addr)
}

async fn gateway_for(base_url: String) -> BackendGateway {
    BackendGateway::new(GatewayConfig::with_base_url(base_url)).expect("build gateway")
}

fn sample_summary() -> Value {
    json!({
        "netWorth": {
            "totalNetWorthValue": {"units": "436546", "currencyCode": "INR"},
            "assetValues": [
                {"netWorthAttribute": "ASSET_TYPE_CASH",
                 "value": {"units": "100", "currencyCode": "INR"}},
                {"netWorthAttribute": "ASSET_TYPE_MUTUAL_FUND",
                 "value": {"units": "84613", "nanos": 500000000, "currencyCode": "INR"}}
            ],
            "liabilityValues": [
                {"netWorthAttribute": "LIABILITY_TYPE_HOME_LOAN",
                 "value": {"units": "17000", "currencyCode": "INR"}}
            ]
        },
        "creditReport": {
            "creditReports": [
                {"creditReportData": {"score": {"bureauScore": "746"}}}
            ]
        },
        "epfDetails": {"overall_pf_balance": {"current_pf_balance": "211111"}},
        "mfTransactions": [
            {"schemeName": "Canara Robeco Gilt Fund", "isinNumber": "INF760K01FC4"},
            {"schemeName": "ICICI Prudential Nifty 50 Index Fund", "isinNumber": "INF109K016L0"}
        ]
    })
}

#[tokio::test]
async fn success_body_is_returned_unmodified() {
    let expected = sample_summary();
    let body = expected.clone();
    let router = Router::new().route(
        "/getFinancialSummary",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );

    let gateway = gateway_for(spawn_backend(router).await).await;
    let raw = gateway
        .call("/getFinancialSummary", &json!({"userId": "u-1"}))
        .await
        .expect("2xx call succeeds");

    // No schema validation, no reshaping: the parsed body comes back as-is.
    assert_eq!(raw, expected);
}

#[tokio::test]
async fn typed_summary_exposes_computed_totals() {
    let body = sample_summary();
    let router = Router::new().route(
        "/getFinancialSummary",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );

    let gateway = gateway_for(spawn_backend(router).await).await;
    let summary = gateway
        .fetch_financial_summary("u-1")
        .await
        .expect("summary fetch succeeds");

    assert_eq!(summary.net_worth.total_assets(), 84713.5);
    assert_eq!(summary.net_worth.total_liabilities(), 17000.0);
    assert_eq!(summary.credit_score(), Some("746".to_string()));
    assert_eq!(summary.mf_rows().len(), 2);
}

#[tokio::test]
async fn http_401_with_login_url_classifies_as_auth_required() {
    let router = Router::new().route(
        "/getFinancialSummary",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Authentication required",
                    "login_url": "https://provider.example/login?session=abc"
                })),
            )
        }),
    );

    let gateway = gateway_for(spawn_backend(router).await).await;
    let err = gateway.fetch_financial_summary("u-1").await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::AuthRequired {
            login_url: "https://provider.example/login?session=abc".to_string()
        }
    );
}

#[tokio::test]
async fn invalid_session_text_wins_regardless_of_status() {
    for status in [StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR] {
        let router = Router::new().route(
            "/chat",
            post(move || async move {
                (status, Json(json!({"error": "Invalid session ID"})))
            }),
        );

        let gateway = gateway_for(spawn_backend(router).await).await;
        let err = gateway.send_chat("hi", "u-1").await.unwrap_err();

        assert!(
            matches!(err, GatewayError::InvalidSession(_)),
            "status {} should classify as InvalidSession, got {:?}",
            status,
            err
        );
    }
}

#[tokio::test]
async fn server_error_keeps_provided_message() {
    let router = Router::new().route(
        "/chat",
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "upstream aggregator down"})),
            )
        }),
    );

    let gateway = gateway_for(spawn_backend(router).await).await;
    let err = gateway.send_chat("hi", "u-1").await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Http {
            status: 503,
            message: "upstream aggregator down".to_string()
        }
    );
}

#[tokio::test]
async fn transport_failure_reports_status_zero() {
    // Nothing is listening here.
    let gateway = gateway_for("http://127.0.0.1:9".to_string()).await;
    let err = gateway.send_chat("hi", "u-1").await.unwrap_err();

    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(err.status(), 0);
}

#[tokio::test]
async fn dashboard_redirect_then_resume_after_login() {
    let logged_in = Arc::new(AtomicBool::new(false));

    async fn summary_handler(
        State(logged_in): State<Arc<AtomicBool>>,
    ) -> (StatusCode, Json<Value>) {
        if logged_in.load(Ordering::SeqCst) {
            (StatusCode::OK, Json(sample_summary()))
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Authentication required",
                    "login_url": "https://provider.example/login"
                })),
            )
        }
    }

    let router = Router::new()
        .route("/getFinancialSummary", post(summary_handler))
        .with_state(logged_in.clone());

    let gateway = gateway_for(spawn_backend(router).await).await;

    let LoadOutcome::RedirectToLogin(mut redirect) =
        DashboardLoader::load(&gateway, "u-1").await
    else {
        panic!("expected redirect outcome before login");
    };

    assert_eq!(
        redirect.take_url(),
        Some("https://provider.example/login".to_string())
    );
    // One-shot: the token is spent.
    assert!(redirect.is_consumed());
    assert_eq!(redirect.take_url(), None);

    // The user completes login out of band; nothing carries over.
    logged_in.store(true, Ordering::SeqCst);

    let LoadOutcome::Loaded(summary) = DashboardLoader::resume(&gateway, "u-1").await else {
        panic!("expected loaded outcome after login");
    };
    assert_eq!(summary.net_worth.total_liabilities(), 17000.0);
}

#[tokio::test]
async fn dashboard_load_failure_is_reported_not_redirected() {
    let router = Router::new().route(
        "/getFinancialSummary",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
    );

    let gateway = gateway_for(spawn_backend(router).await).await;
    match DashboardLoader::load(&gateway, "u-1").await {
        LoadOutcome::Failed(GatewayError::Http { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Failed(Http), got {:?}", other),
    }
}
