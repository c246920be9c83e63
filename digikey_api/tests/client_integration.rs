use std::time::Duration;

use digikey_api::{Client, Credentials, Error, KeywordSearchRequest, Locale};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "test-token",
            "expires_in": 1799
        })))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), Credentials::new("client-1", "secret-1")).unwrap()
}

#[tokio::test]
async fn search_keyword_success() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/products/v4/search/keyword"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("x-digikey-client-id", "client-1"))
        .and(header("x-digikey-locale-language", "en"))
        .and(header("x-digikey-locale-currency", "USD"))
        .and(header("x-digikey-locale-site", "US"))
        .and(body_json(serde_json::json!({
            "Keywords": "STM32F103",
            "RecordCount": 20,
            "RecordStartPosition": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("keyword_search.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = KeywordSearchRequest::new("STM32F103")
        .with_record_count(20)
        .with_offset(5);
    let resp = client(&mock_server)
        .search_keyword(&request, &Locale::default())
        .await
        .unwrap();

    assert_eq!(resp.products.len(), 2);
    assert_eq!(resp.products[0].product.digi_key_part_number, "497-6063-ND");
    assert_eq!(resp.products_count, 2);
}

#[tokio::test]
async fn search_keyword_sends_locale_headers() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/products/v4/search/keyword"))
        .and(header("x-digikey-locale-language", "de"))
        .and(header("x-digikey-locale-currency", "EUR"))
        .and(header("x-digikey-locale-site", "DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Products": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client(&mock_server)
        .search_keyword(
            &KeywordSearchRequest::new("resistor"),
            &Locale::new("de", "EUR", "DE"),
        )
        .await
        .unwrap();
    assert!(resp.products.is_empty());
}

#[tokio::test]
async fn search_keyword_server_error() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/products/v4/search/keyword"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .search_keyword(&KeywordSearchRequest::new("x"), &Locale::default())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn search_keyword_malformed_json() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/products/v4/search/keyword"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .search_keyword(&KeywordSearchRequest::new("x"), &Locale::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
}

#[tokio::test]
async fn search_keyword_times_out() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/products/v4/search/keyword"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"Products": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_timeout(
        &mock_server.uri(),
        Credentials::new("client-1", "secret-1"),
        Duration::from_millis(300),
    )
    .unwrap();
    let err = client
        .search_keyword(&KeywordSearchRequest::new("x"), &Locale::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
}

#[tokio::test]
async fn token_failure_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products/v4/search/keyword"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .search_keyword(&KeywordSearchRequest::new("x"), &Locale::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn token_is_fetched_once_across_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "test-token",
            "expires_in": 1799
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/v4/search/manufacturers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("manufacturers.json")))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    for _ in 0..3 {
        client.manufacturers(&Locale::default()).await.unwrap();
    }
    assert!(client.tokens().is_token_valid());
}

#[tokio::test]
async fn product_details_success() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/products/v4/search/296-6501-1-ND/productdetails"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("product_details.json")))
        .mount(&mock_server)
        .await;

    let record = client(&mock_server)
        .product_details("296-6501-1-ND", &Locale::default())
        .await
        .unwrap();
    assert_eq!(record.product.manufacturer_part_number, "NE555DR");
    assert_eq!(record.raw["Packaging"], "Cut Tape (CT)");
}

#[tokio::test]
async fn product_details_not_found() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/products/v4/search/NOPE/productdetails"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .product_details("NOPE", &Locale::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn listings_force_usd_currency() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/products/v4/search/categories"))
        .and(header("x-digikey-locale-currency", "USD"))
        .and(header("x-digikey-locale-language", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("categories.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/v4/search/categories/685"))
        .and(header("x-digikey-locale-currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Category": { "CategoryId": 685, "Name": "Microcontrollers" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let locale = Locale::new("fr", "EUR", "FR");
    let categories = client.categories(&locale).await.unwrap();
    assert_eq!(categories.categories.len(), 2);

    let category = client.category(685, &locale).await.unwrap();
    assert_eq!(category["Category"]["Name"], "Microcontrollers");
}
