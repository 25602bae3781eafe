//! Integration tests that drive `HttpRatesApi` against a local listener
//! serving one canned HTTP response per test.
//!
//! The listener records the raw request so the tests can check the exact
//! path, query string, and body the client produced.

use std::time::Duration;

use pretty_assertions::assert_eq;
use rates_core::{ApiConfig, ApiError, FilingStatus, HistoryMetric, HistoryPoint, RatesApi, TaxInput};
use rates_http::HttpRatesApi;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single response and return the base URL plus a handle that
/// resolves to the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}/api"), handle)
}

/// Read headers, then as many body bytes as `content-length` announces.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn client(base_url: &str) -> HttpRatesApi {
    HttpRatesApi::new(ApiConfig::new(base_url)).unwrap()
}

fn request_line(raw: &str) -> &str {
    raw.lines().next().unwrap_or_default()
}

fn request_body(raw: &str) -> &str {
    raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default()
}

// ── years ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn years_hits_years_endpoint() {
    let (base, server) = serve_once("200 OK", "[2023, 2022, 2021]").await;

    let years = client(&base).fetch_available_years().await.unwrap();
    let raw = server.await.unwrap();

    assert_eq!(years, vec![2023, 2022, 2021]);
    assert_eq!(request_line(&raw), "GET /api/tax/years HTTP/1.1");
}

#[tokio::test]
async fn empty_years_is_not_an_error() {
    let (base, server) = serve_once("200 OK", "[]").await;

    let years = client(&base).fetch_available_years().await.unwrap();
    server.await.unwrap();

    assert!(years.is_empty());
}

// ── history ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_sends_query_parameters() {
    let (base, server) = serve_once("200 OK", r#"[{"year": 1990, "value": 28}]"#).await;

    client(&base)
        .fetch_history(FilingStatus::MarriedFilingJointly, HistoryMetric::BracketCount, 1980, 1990)
        .await
        .unwrap();
    let raw = server.await.unwrap();

    assert_eq!(
        request_line(&raw),
        "GET /api/tax/history?status=MFJ&metric=BRACKET_COUNT&startYear=1980&endYear=1990 HTTP/1.1"
    );
}

#[tokio::test]
async fn history_normalizes_percent_strings() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"year": 2017, "value": "39.6%"}, {"year": 2018, "value": "37%"}, {"year": 2019, "value": 37}]"#,
    )
    .await;

    let points = client(&base)
        .fetch_history(FilingStatus::Single, HistoryMetric::TopRate, 2017, 2019)
        .await
        .unwrap();
    server.await.unwrap();

    assert_eq!(
        points,
        vec![
            HistoryPoint::new(2017, 39.6),
            HistoryPoint::new(2018, 37.0),
            HistoryPoint::new(2019, 37.0),
        ]
    );
}

#[tokio::test]
async fn history_with_unparseable_value_is_decode_error() {
    let (base, server) = serve_once("200 OK", r#"[{"year": 2017, "value": "high"}]"#).await;

    let result = client(&base)
        .fetch_history(FilingStatus::Single, HistoryMetric::TopRate, 2017, 2017)
        .await;
    server.await.unwrap();

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

// ── calculation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn calculation_posts_json_body() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"totalTaxPaid": "1,100", "avgRate": "10%", "brackets": []}"#,
    )
    .await;
    let input = TaxInput {
        year: 2023,
        status: FilingStatus::Single,
        income: dec!(11000),
    };

    let calc = client(&base).fetch_calculation(&input).await.unwrap();
    let raw = server.await.unwrap();

    assert_eq!(calc.total_tax_paid, "1,100");
    assert_eq!(request_line(&raw), "POST /api/tax/breakdown HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(request_body(&raw)).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "year": 2023, "status": "S", "income": 11000.0 })
    );
}

// ── failures ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_is_status_error() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;

    let result = client(&base).fetch_available_years().await;
    server.await.unwrap();

    match result {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected Status error, got {other:#?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (base, server) = serve_once("200 OK", r#"{"not": "a list"}"#).await;

    let result = client(&base).fetch_available_years().await;
    server.await.unwrap();

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    // Bind and immediately drop to get a port with nothing listening.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();

    let result = client(&format!("http://{addr}/api")).fetch_available_years().await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(socket);
    });
    let config =
        ApiConfig::new(format!("http://{addr}/api")).with_timeout(Duration::from_millis(200));

    let result = HttpRatesApi::new(config).unwrap().fetch_available_years().await;
    server.abort();

    assert_eq!(result, Err(ApiError::Timeout));
}
