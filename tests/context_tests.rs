//! Integration tests for cancellation, deadlines, and transport failures.

mod common;

use std::time::{Duration, Instant};

use common::client_for;
use kong_admin::admin::ResourceError;
use kong_admin::{CancelReason, HttpError, RequestContext};
use serde_json::json;
use tokio_test::assert_err;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn slow_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consumers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [], "next": null}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_cancellation_interrupts_in_flight_request() {
    let server = slow_server().await;
    let client = client_for(&server);

    let token = CancellationToken::new();
    let ctx = RequestContext::with_cancellation(token.clone());
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let started = Instant::now();
    let error = assert_err!(client.consumers().list(&ctx, None).await);
    canceller.await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    match error {
        ResourceError::Canceled {
            resource,
            operation,
            reason,
        } => {
            assert_eq!(resource, "Consumer");
            assert_eq!(operation, "list");
            assert_eq!(reason, CancelReason::Canceled);
        }
        other => panic!("Expected Canceled, got {other:?}"),
    }
}

#[tokio::test]
async fn test_deadline_interrupts_in_flight_request() {
    let server = slow_server().await;
    let client = client_for(&server);
    let ctx = RequestContext::background().with_timeout(Duration::from_millis(100));

    let started = Instant::now();
    let error = assert_err!(client.consumers().list(&ctx, None).await);

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(matches!(
        error,
        ResourceError::Canceled {
            reason: CancelReason::DeadlineExceeded,
            ..
        }
    ));
}

#[tokio::test]
async fn test_server_error_is_transport_with_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consumers/alice"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("X-Kong-Request-Id", "abc123")
                .set_body_json(json!({"message": "An unexpected error occurred"})),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);

    let error = assert_err!(
        client
            .consumers()
            .get(&RequestContext::background(), "alice")
            .await
    );

    assert_eq!(error.request_id(), Some("abc123"));
    match error {
        ResourceError::Transport {
            operation,
            id,
            source: HttpError::Response(response),
            ..
        } => {
            assert_eq!(operation, "get");
            assert_eq!(id.as_deref(), Some("alice"));
            assert_eq!(response.code, 500);
            assert_eq!(response.message, "An unexpected error occurred");
        }
        other => panic!("Expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consumers/alice"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let error = assert_err!(
        client
            .consumers()
            .delete(&RequestContext::background(), "alice")
            .await
    );

    match error {
        ResourceError::Transport {
            source: HttpError::Response(response),
            ..
        } => {
            assert_eq!(response.code, 502);
            assert_eq!(response.message, "<html>Bad Gateway</html>");
        }
        other => panic!("Expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_gateway_is_network_error() {
    // Bind and drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = kong_admin::KongConfig::builder()
        .admin_url(kong_admin::AdminUrl::new(format!("http://127.0.0.1:{port}")).unwrap())
        .build()
        .unwrap();
    let client = kong_admin::KongClient::new(&config).unwrap();

    let error = assert_err!(
        client
            .consumers()
            .get(&RequestContext::background(), "alice")
            .await
    );
    assert!(matches!(
        error,
        ResourceError::Transport {
            source: HttpError::Network(_),
            ..
        }
    ));
}
