use super::*;

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url).expect("client construction should not fail")
}

#[test]
fn endpoint_appends_api_path() {
    let client = test_client("http://localhost:5000");
    let url = client.endpoint("api/create_campaign", &[]);
    assert_eq!(url.as_str(), "http://localhost:5000/api/create_campaign");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("https://example.com/inflo/");
    let url = client.endpoint("api/list_campaigns", &[]);
    assert_eq!(url.as_str(), "https://example.com/inflo/api/list_campaigns");
}

#[test]
fn endpoint_encodes_query_values() {
    let client = test_client("http://localhost:5000");
    let url = client.endpoint("api/fetch_campaign_data", &[("campaign_id", "a b&c")]);
    assert!(
        url.as_str().ends_with("campaign_id=a+b%26c"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn proxy_image_url_encodes_target() {
    let client = test_client("http://localhost:5000");
    let url = client.proxy_image_url("https://cdn.example.com/p.jpg?size=80&x=1");
    assert_eq!(url.path(), "/api/proxy_image");
    let target = url
        .query_pairs()
        .find(|(k, _)| k == "url")
        .map(|(_, v)| v.into_owned());
    assert_eq!(
        target.as_deref(),
        Some("https://cdn.example.com/p.jpg?size=80&x=1")
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ApiClient::new("not a url").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));

    let err = ApiClient::new("mailto:someone@example.com").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn default_search_timeout_is_45_seconds() {
    let client = test_client("http://localhost:5000");
    assert_eq!(client.search_timeout(), Duration::from_secs(45));
    let client = client.with_search_timeout(Duration::from_millis(10));
    assert_eq!(client.search_timeout(), Duration::from_millis(10));
}

#[test]
fn rejection_carries_server_message() {
    let err = ApiClient::rejection(&serde_json::json!({
        "success": false,
        "message": "Campaign not found"
    }));
    assert_eq!(err.server_message(), Some("Campaign not found"));

    let err = ApiClient::rejection(&serde_json::json!({ "success": false }));
    assert!(err.server_message().is_none());
}
