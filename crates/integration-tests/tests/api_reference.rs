mod support;

use axum::http::{Method, StatusCode};

use support::{ScriptedGateway, build_test_router, error_code, request, send_json};

#[tokio::test]
async fn healthz_reports_ok_and_tags_request_id() {
    let app = build_test_router(ScriptedGateway::with_replies(Vec::new()));

    let response = send_json(&app, request(Method::GET, "/healthz", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);

    let request_id = response
        .headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .expect("request id header should be set");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn echoes_valid_client_request_id() {
    let app = build_test_router(ScriptedGateway::with_replies(Vec::new()));

    let mut outbound = request(Method::GET, "/healthz", None);
    outbound.headers_mut().insert(
        "x-request-id",
        "scan-client-1".parse().expect("header value should parse"),
    );
    let response = send_json(&app, outbound).await;

    assert_eq!(
        response
            .headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok()),
        Some("scan-client-1")
    );
}

#[tokio::test]
async fn navigation_lists_pages_in_menu_order() {
    let app = build_test_router(ScriptedGateway::with_replies(Vec::new()));

    let response = send_json(&app, request(Method::GET, "/v1/navigation", None)).await;
    assert_eq!(response.status, StatusCode::OK);

    let labels = response.body["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .filter_map(|item| item["label"].as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        labels,
        vec![
            "Home",
            "AI Diagnosis",
            "Health Insights",
            "Disease Encyclopedia",
            "Prevention Hub",
            "Risk Assessment",
            "Medical Resources",
            "FAQ",
            "Contact",
        ]
    );
    assert_eq!(response.body["items"][1]["page"], "ai-diagnosis");
}

#[tokio::test]
async fn disease_encyclopedia_lists_and_looks_up_entries() {
    let app = build_test_router(ScriptedGateway::with_replies(Vec::new()));

    let list = send_json(&app, request(Method::GET, "/v1/diseases", None)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(
        list.body["items"]
            .as_array()
            .expect("items should be an array")
            .len(),
        5
    );

    let entry = send_json(&app, request(Method::GET, "/v1/diseases/asthma", None)).await;
    assert_eq!(entry.status, StatusCode::OK);
    assert_eq!(entry.body["name"], "Asthma");
    assert!(
        entry.body["description"]
            .as_str()
            .is_some_and(|description| !description.is_empty())
    );

    let missing = send_json(&app, request(Method::GET, "/v1/diseases/scurvy", None)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&missing.body), Some("not_found"));
}
