//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes a page request, the expected HTTP request, a simulated
//! response, and either the expected parse result or the expected error.
//! Results are compared as parsed values, not raw strings.

use catalog_core::{
    error_message, ApiError, HttpClient, HttpMethod, HttpResponse, PageRequest, PageResult,
    ProductService,
};

const BASE_URL: &str = "http://localhost:3000";

fn service() -> ProductService {
    ProductService::new(HttpClient::new(BASE_URL))
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::NotFound => "NotFound",
        ApiError::HttpError { .. } => "HttpError",
        ApiError::Deserialization(_) => "Deserialization",
        ApiError::Transport(_) => "Transport",
        ApiError::InvalidPageRequest { .. } => "InvalidPageRequest",
    }
}

#[test]
fn products_test_vectors() {
    let raw = include_str!("../../test-vectors/products.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let s = service();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let request = PageRequest::new(
            input["page"].as_u64().unwrap() as u32,
            input["limit"].as_u64().unwrap() as u32,
        )
        .unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = s.build_find_all_paginated(request);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.url(), format!("{BASE_URL}{}", expected_req["url"].as_str().unwrap()), "{name}: url");

        let expected_query: Vec<(String, String)> = expected_req["query"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let arr = pair.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.query, expected_query, "{name}: query");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = s.parse_find_all_paginated(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(error_kind(&err), expected_error.as_str().unwrap(), "{name}: error kind");
            if let Some(message) = case.get("expected_message") {
                assert_eq!(error_message(&err), message.as_str().unwrap(), "{name}: message");
            }
        } else {
            let page = result.unwrap();
            let expected: PageResult = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(page, expected, "{name}: parsed result");
        }
    }
}

#[test]
fn find_all_has_no_paging_query() {
    let req = service().build_find_all();
    assert_eq!(req.url(), format!("{BASE_URL}/products"));
    assert!(req.query.is_empty());
}
