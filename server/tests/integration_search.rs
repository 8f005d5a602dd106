use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docserve_core::{Config, IndexBuilder, Registry};
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn build_tiny_registry() -> (TempDir, Registry) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "cat cat dog").unwrap();
    fs::write(dir.path().join("b.txt"), "dog dog dog").unwrap();
    fs::write(dir.path().join("c.xml"), "<note><to>bird</to><body>cat &amp; bird</body></note>").unwrap();
    let mut registry = Registry::new();
    IndexBuilder::new(&Config::default())
        .add_documents_from_directory(&mut registry, dir.path())
        .unwrap();
    (dir, registry)
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

fn post_search(query: &str) -> Request<Body> {
    Request::post("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("search_query={query}")))
        .unwrap()
}

#[tokio::test]
async fn index_page_has_search_form() {
    let app = docserve_server::build_app(Registry::new(), &Config::default());
    let (status, body) = call(app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"action="/search""#));
    assert!(html.contains(r#"name="search_query""#));
}

#[tokio::test]
async fn search_renders_ranked_documents() {
    let (dir, registry) = build_tiny_registry();
    let app = docserve_server::build_app(registry, &Config::default());

    let (status, body) = call(app, post_search("dog")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("3 results"));
    let b = html.find(&dir.path().join("b.txt").display().to_string()).unwrap();
    let a = html.find(&dir.path().join("a.txt").display().to_string()).unwrap();
    assert!(b < a, "b.txt should rank above a.txt");
}

#[tokio::test]
async fn search_on_empty_registry_is_not_an_error() {
    let app = docserve_server::build_app(Registry::new(), &Config::default());
    let (status, body) = call(app, post_search("anything")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body.to_vec()).unwrap().contains("0 results"));
}

#[tokio::test]
async fn search_without_query_field_is_rejected() {
    let app = docserve_server::build_app(Registry::new(), &Config::default());
    let req = Request::post("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("other=1"))
        .unwrap();
    let (status, _) = call(app, req).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn api_search_returns_json_in_rank_order() {
    let (dir, registry) = build_tiny_registry();
    let app = docserve_server::build_app(registry, &Config::default());

    let (status, body) = call(app, Request::get("/api/search?q=cat&k=2").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["original_query"], "cat");
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["path"].as_str().unwrap(), dir.path().join("a.txt").to_str().unwrap());
    assert_eq!(arr[0]["term_count"], 3);
}
