//! Check query-string and URL-template helpers against JSON vectors stored
//! in `test-vectors/`.

use restclient_core::{query_string, ClientError, Headers, Params, RestClient};

// ---------------------------------------------------------------------------
// Query string
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/query.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let params: Params = serde_json::from_value(case["params"].clone()).unwrap();
        assert_eq!(
            query_string(&params),
            case["expected"].as_str().unwrap(),
            "{name}"
        );
    }
}

// ---------------------------------------------------------------------------
// URL templating
// ---------------------------------------------------------------------------

#[test]
fn make_url_test_vectors() {
    let raw = include_str!("../../test-vectors/make_url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = RestClient::new(vectors["base_url"].as_str().unwrap(), Headers::new(), false);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let template = case["template"].as_str().unwrap();
        let pairs: Vec<&str> = case["pairs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p.as_str().unwrap())
            .collect();

        let result = client.make_url(template, &pairs);
        match case["expected_error"].as_str() {
            Some("RequestConstruction") => {
                assert!(
                    matches!(result, Err(ClientError::RequestConstruction(_))),
                    "{name}: expected construction error, got {result:?}"
                );
            }
            Some(other) => panic!("{name}: unknown expected_error {other}"),
            None => assert_eq!(result.unwrap(), case["expected"].as_str().unwrap(), "{name}"),
        }
    }
}
