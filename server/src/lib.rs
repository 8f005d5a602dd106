use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use docserve_core::config::MAX_QUERY_LIMIT;
use docserve_core::{Config, Document, QueryResult, Registry};
use serde::Deserialize;
use std::sync::Arc;
use time::macros::format_description;
use time::OffsetDateTime;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const SEARCH_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>docserve</title></head>
<body>
<h1>docserve</h1>
<form action="/search" method="post">
  <input type="text" name="search_query" autofocus>
  <button type="submit">Search</button>
</form>
</body>
</html>
"#;

#[derive(Deserialize)]
pub struct SearchForm {
    pub search_query: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
}

/// Read-only view of the registry shared by all handlers. Nothing indexes
/// while the server runs, so no lock is taken.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub result_limit: usize,
}

pub fn build_app(registry: Registry, config: &Config) -> Router {
    let state = AppState {
        registry: Arc::new(registry),
        result_limit: config.result_limit.clamp(1, MAX_QUERY_LIMIT),
    };
    Router::new()
        .route("/", get(index_handler))
        .route("/search", post(search_handler))
        .route("/api/search", get(api_search_handler))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind `config.host:config.port`. The host may be an address or a name
/// such as `localhost`.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;
    Ok(listener)
}

/// Serve the registry until the process is stopped.
pub async fn serve(registry: Registry, config: &Config) -> Result<()> {
    let docs = registry.len();
    let app = build_app(registry, config);
    let listener = bind(config).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, docs, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn index_handler() -> Html<&'static str> {
    Html(SEARCH_FORM)
}

pub async fn search_handler(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Html<String> {
    let result = state.registry.query(&form.search_query, state.result_limit);
    tracing::debug!(query = %form.search_query, hits = result.results_count(), "search");
    Html(render_results(&result))
}

pub async fn api_search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<QueryResult> {
    let k = params.k.unwrap_or(state.result_limit).clamp(1, MAX_QUERY_LIMIT);
    Json(state.registry.query(&params.q, k))
}

fn render_results(result: &QueryResult) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{q} - docserve</title></head>\n<body>\n\
         <p><a href=\"/\">New search</a></p>\n\
         <h1>Results for \"{q}\"</h1>\n<p>{n} results in {s:.6} seconds</p>\n<ol>\n",
        q = escape_html(&result.original_query),
        n = result.results_count(),
        s = result.seconds_elapsed,
    );
    for doc in &result.results {
        html.push_str(&format!(
            "  <li><code>{}</code> ({} terms, modified {})</li>\n",
            escape_html(&doc.path.display().to_string()),
            doc.term_count,
            format_modified(doc),
        ));
    }
    html.push_str("</ol>\n</body>\n</html>\n");
    html
}

fn format_modified(doc: &Document) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    OffsetDateTime::from(doc.last_modified)
        .format(format)
        .unwrap_or_default()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
