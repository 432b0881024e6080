use serde_json::json;
use trustpilot_query::api::client::{Resource, TrustpilotClient};
use trustpilot_query::error::{ApiError, AppError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reviews(server: &MockServer) -> Resource {
    let client = TrustpilotClient::new(server.uri()).expect("client creation failed");
    Resource::new(client, "/v1/business-units/abc/reviews").with_items_key("reviews")
}

#[tokio::test]
async fn test_get_sends_rendered_query_and_parses_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/business-units/abc/reviews"))
        .and(query_param("stars", "5"))
        .and(query_param("isVerified", "true"))
        .and(query_param("orderBy", "createdat.desc,stars.asc"))
        .and(query_param("perPage", "10"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [
                {"id": "r1", "stars": 5, "createdAt": "2023-01-01T10:00:00Z"},
                {"id": "r2", "stars": 5, "createdAt": "2023-01-02T11:30:00.250Z"}
            ],
            "links": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = reviews(&server);
    let items = resource
        .query()
        .filter("stars", 5)
        .filter("isVerified", true)
        .order("createdAt", "DESC")
        .order("stars", "asc")
        .limit(10)
        .offset(25)
        .get()
        .await
        .expect("query should succeed");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get_str("id"), Some("r1"));
    assert_eq!(
        items[1].to_mapping()["createdAt"],
        json!("2023-01-02T11:30:00.250Z")
    );
}

#[tokio::test]
async fn test_first_requests_a_single_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/business-units/abc/reviews"))
        .and(query_param("perPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [{"id": "only"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = reviews(&server);
    let items = resource
        .query()
        .limit(40)
        .page(9)
        .first()
        .await
        .expect("query should succeed");

    assert_eq!(items.len(), 1);
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests[0].url.query(), Some("perPage=1"));
}

#[tokio::test]
async fn test_all_sends_no_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/business-units/abc/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reviews": []})))
        .expect(1)
        .mount(&server)
        .await;

    let resource = reviews(&server);
    let items = resource
        .query()
        .filter("language", "en")
        .limit(5)
        .page(2)
        .all()
        .await
        .expect("query should succeed");

    assert!(items.is_empty());
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests[0].url.query(), Some("language=en"));
}

#[tokio::test]
async fn test_unauthorized_response_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid ApiKey"))
        .mount(&server)
        .await;

    let result = reviews(&server).query().get().await;

    match result {
        Err(AppError::Api(ApiError::Unauthorized {
            status,
            server_message,
            ..
        })) => {
            assert_eq!(status, 401);
            assert_eq!(server_message, "Invalid ApiKey");
        }
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_propagates_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = reviews(&server).query().get().await;

    assert!(matches!(
        result,
        Err(AppError::Api(ApiError::Http { status: 503, .. }))
    ));
}

#[tokio::test]
async fn test_missing_items_key_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"businessUnits": []})))
        .mount(&server)
        .await;

    let result = reviews(&server).query().get().await;

    assert!(matches!(
        result,
        Err(AppError::Api(ApiError::UnexpectedShape { .. }))
    ));
}

#[tokio::test]
async fn test_bad_date_in_payload_surfaces_item_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [{"id": "r1", "updatedAt": "yesterday"}]
        })))
        .mount(&server)
        .await;

    let result = reviews(&server).query().get().await;

    assert!(matches!(result, Err(AppError::Item(_))));
}

#[tokio::test]
async fn test_null_updated_at_does_not_fail_the_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [
                {"id": "r1", "createdAt": "2023-01-01T10:00:00Z", "updatedAt": null},
                {"id": "r2", "createdAt": "2023-01-02T10:00:00Z", "updatedAt": "2023-01-03T08:00:00Z"}
            ]
        })))
        .mount(&server)
        .await;

    let items = reviews(&server).query().get().await.expect("query failed");

    assert_eq!(items.len(), 2);
    assert!(items[0].updated_at().is_none());
    assert!(items[1].updated_at().is_some());
}

#[tokio::test]
async fn test_items_keep_payload_field_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"reviews": [{"title": "Great", "stars": 5, "id": "r1", "createdAt": "2023-01-01T10:00:00Z"}]}"#,
        ))
        .mount(&server)
        .await;

    let items = reviews(&server).query().get().await.expect("query failed");
    let keys: Vec<&str> = items[0].keys().collect();

    assert_eq!(keys, vec!["title", "stars", "id", "createdAt"]);
}
