//! # API Docs
//!
//! Publishes the OpenAPI document generated from the route annotations in
//! [`crate::api`] and a Swagger UI page that renders it.
//!
//! - `GET /docs` - interactive documentation
//! - `GET /docs/json` - raw OpenAPI document

use crate::model::{ErrorBody, NewPerson, Person, PersonUpdate, Sex};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::openapi::{self, server::Server};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "People API",
        description = "Person registry API documentation",
        version = "1.0.0"
    ),
    paths(
        crate::api::create_person,
        crate::api::list_people,
        crate::api::update_person,
        crate::api::delete_person,
    ),
    components(schemas(Person, NewPerson, PersonUpdate, Sex, ErrorBody)),
    tags((name = "people", description = "Person registry"))
)]
pub struct ApiDoc;

/// Builds the OpenAPI document advertising `server_url` as the base URL
pub fn openapi_document(server_url: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(server_url)]);
    doc
}

/// Creates the docs router
pub fn create_docs_router(doc: openapi::OpenApi) -> Router {
    Router::new()
        .route("/docs", get(serve_ui))
        .route("/docs/", get(serve_ui))
        .route("/docs/json", get(serve_document))
        .with_state(Arc::new(doc))
}

async fn serve_document(State(doc): State<Arc<openapi::OpenApi>>) -> impl IntoResponse {
    Json(doc.as_ref().clone())
}

async fn serve_ui() -> impl IntoResponse {
    Html(swagger_ui_html())
}

/// Swagger UI shell; assets come from the public CDN
pub fn swagger_ui_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>People API - Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/docs/json',
                dom_id: '#swagger-ui',
                docExpansion: 'full',
                deepLinking: true,
            });
        };
    </script>
</body>
</html>"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = openapi_document("http://localhost:3333");
        let json: Value = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["info"]["title"], "People API");
        assert_eq!(json["servers"][0]["url"], "http://localhost:3333");

        let people = &json["paths"]["/people"];
        assert!(people["get"].is_object());
        assert!(people["post"].is_object());
        let by_id = &json["paths"]["/people/{id}"];
        assert!(by_id["put"].is_object());
        assert!(by_id["delete"].is_object());

        assert!(people["post"]["responses"]["201"].is_object());
        assert!(people["post"]["responses"]["400"].is_object());
        assert!(by_id["put"]["responses"]["204"].is_object());
    }

    #[test]
    fn test_person_schema_matches_model() {
        let json: Value = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let person = &json["components"]["schemas"]["Person"]["properties"];
        for field in ["id", "name", "age", "sex", "occupation"] {
            assert!(person[field].is_object(), "missing {}", field);
        }

        let required = &json["components"]["schemas"]["NewPerson"]["required"];
        assert_eq!(required, &serde_json::json!(["name"]));
    }

    #[tokio::test]
    async fn test_docs_routes() {
        let app = create_docs_router(openapi_document("https://people.example.com"));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/docs/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["servers"][0]["url"], "https://people.example.com");
    }
}
