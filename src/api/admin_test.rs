use super::*;

fn base() -> Url {
    Url::parse("http://127.0.0.1:5000").unwrap()
}

#[test]
fn file_endpoint_appends_one_segment() {
    let url = file_endpoint(&base(), VALIDATE_ROUTE, "openai_feed_20240307_150500.jsonl").unwrap();
    assert_eq!(
        url.as_str(),
        "http://127.0.0.1:5000/api/validate/openai_feed_20240307_150500.jsonl"
    );
}

#[test]
fn file_endpoint_encodes_separators_and_spaces() {
    let url = file_endpoint(&base(), SAMPLE_ROUTE, "spring sale/products.csv").unwrap();
    assert_eq!(
        url.as_str(),
        "http://127.0.0.1:5000/api/sample/spring%20sale%2Fproducts.csv"
    );
}

#[test]
fn file_endpoint_rejects_empty_names() {
    assert!(matches!(
        file_endpoint(&base(), SAMPLE_ROUTE, ""),
        Err(ApiError::InvalidEndpoint { .. })
    ));
}

#[test]
fn transform_request_defaults_match_server() {
    let body = serde_json::to_value(TransformRequest::new("products.csv")).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"input_file": "products.csv", "format": "openai", "compress": true})
    );
}
