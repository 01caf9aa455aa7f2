use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// One node of a navigation tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<Value>,
    #[serde(default)]
    pub children: Vec<NavigationItem>,
}

/// One document in the search index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchDocument {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Read-only content fixtures the server answers from.
///
/// Pages are keyed by site path without the `.json` suffix. Locale-prefixed
/// routes resolve against the same fixtures; the mock serves one content
/// variant for every locale.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub pages: HashMap<String, Value>,
    pub navigations: HashMap<String, Vec<NavigationItem>>,
    pub snippet_areas: HashMap<String, Value>,
    pub documents: Vec<SearchDocument>,
}

impl Fixtures {
    /// Sample content covering every endpoint.
    pub fn seed() -> Self {
        let mut pages = HashMap::new();
        pages.insert(
            "/".to_string(),
            json!({
                "id": "a1f6e3c0-0001-4000-8000-000000000001",
                "template": "homepage",
                "content": {"title": "Home", "url": "/"}
            }),
        );
        pages.insert(
            "/lorem-ipsum".to_string(),
            json!({
                "id": "a1f6e3c0-0002-4000-8000-000000000002",
                "template": "default",
                "content": {"title": "Lorem Ipsum", "url": "/lorem-ipsum", "article": "<p>Dolor sit amet.</p>"}
            }),
        );

        let mut navigations = HashMap::new();
        navigations.insert(
            "main".to_string(),
            vec![
                NavigationItem {
                    title: "Home".to_string(),
                    url: "/".to_string(),
                    excerpt: Some(json!({"description": "Landing page"})),
                    children: Vec::new(),
                },
                NavigationItem {
                    title: "Articles".to_string(),
                    url: "/articles".to_string(),
                    excerpt: Some(json!({"description": "All articles"})),
                    children: vec![NavigationItem {
                        title: "Lorem Ipsum".to_string(),
                        url: "/lorem-ipsum".to_string(),
                        excerpt: None,
                        children: Vec::new(),
                    }],
                },
            ],
        );

        let mut snippet_areas = HashMap::new();
        snippet_areas.insert(
            "footer".to_string(),
            json!({
                "id": "b2e7f4d1-0001-4000-8000-000000000003",
                "template": "footer-block",
                "content": {"title": "Imprint", "text": "© Example Corp"},
                "extension": {"seo": {"title": "Imprint"}}
            }),
        );

        let documents = vec![
            SearchDocument {
                title: "Lorem Ipsum".to_string(),
                description: "Dolor sit amet".to_string(),
                url: "/lorem-ipsum".to_string(),
            },
            SearchDocument {
                title: "Home".to_string(),
                description: "Landing page".to_string(),
                url: "/".to_string(),
            },
        ];

        Self {
            pages,
            navigations,
            snippet_areas,
            documents,
        }
    }
}

pub type SharedFixtures = Arc<Fixtures>;

/// Router over the seed fixtures.
pub fn app() -> Router {
    app_with(Fixtures::seed())
}

/// Router over caller-supplied fixtures.
///
/// Pages live at the root (`/{site_path}.json`, no base path or locale);
/// the API endpoints live under `/api` with an optional leading locale
/// segment. Anything that is not an API route falls through to the page
/// handler.
pub fn app_with(fixtures: Fixtures) -> Router {
    let fixtures: SharedFixtures = Arc::new(fixtures);
    Router::new()
        .route("/api/navigations/{key}", get(get_navigation))
        .route("/{locale}/api/navigations/{key}", get(get_localized_navigation))
        .route("/api/snippet-areas/{area}", get(get_snippet_area))
        .route("/{locale}/api/snippet-areas/{area}", get(get_localized_snippet_area))
        .route("/api/search", get(search))
        .route("/{locale}/api/search", get(localized_search))
        .fallback(get_page)
        .with_state(fixtures)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_page(State(fixtures): State<SharedFixtures>, uri: Uri) -> Result<Json<Value>, StatusCode> {
    let path = uri.path();
    debug!(path, "page lookup");
    let site_path = path.strip_suffix(".json").ok_or(StatusCode::NOT_FOUND)?;
    fixtures
        .pages
        .get(site_path)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Debug, Deserialize)]
struct NavigationQuery {
    depth: Option<u32>,
    excerpt: Option<bool>,
    flat: Option<bool>,
}

async fn get_navigation(
    State(fixtures): State<SharedFixtures>,
    Path(key): Path<String>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<Value>, StatusCode> {
    navigation_response(&fixtures, &key, &query)
}

async fn get_localized_navigation(
    State(fixtures): State<SharedFixtures>,
    Path((_locale, key)): Path<(String, String)>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<Value>, StatusCode> {
    navigation_response(&fixtures, &key, &query)
}

fn navigation_response(
    fixtures: &Fixtures,
    key: &str,
    query: &NavigationQuery,
) -> Result<Json<Value>, StatusCode> {
    let items = fixtures.navigations.get(key).ok_or(StatusCode::NOT_FOUND)?;
    let items = shape_navigation(
        items.clone(),
        query.depth.unwrap_or(1),
        query.excerpt.unwrap_or(false),
        query.flat.unwrap_or(false),
    );
    Ok(Json(json!({"_embedded": {"items": items}})))
}

/// Apply `depth`, `excerpt`, and `flat` to a navigation tree.
fn shape_navigation(
    mut items: Vec<NavigationItem>,
    depth: u32,
    excerpt: bool,
    flat: bool,
) -> Vec<NavigationItem> {
    prune_depth(&mut items, depth);
    if !excerpt {
        strip_excerpts(&mut items);
    }
    if flat {
        return flatten(items);
    }
    items
}

/// Drop children below `depth` levels. `depth == 1` keeps top-level items
/// only.
fn prune_depth(items: &mut [NavigationItem], depth: u32) {
    for item in items {
        if depth <= 1 {
            item.children.clear();
        } else {
            prune_depth(&mut item.children, depth - 1);
        }
    }
}

fn strip_excerpts(items: &mut [NavigationItem]) {
    for item in items {
        item.excerpt = None;
        strip_excerpts(&mut item.children);
    }
}

/// Depth-first flattening; flattened items carry no children of their own.
fn flatten(items: Vec<NavigationItem>) -> Vec<NavigationItem> {
    let mut flat = Vec::new();
    for mut item in items {
        let children = std::mem::take(&mut item.children);
        flat.push(item);
        flat.extend(flatten(children));
    }
    flat
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnippetAreaQuery {
    include_extension: Option<bool>,
}

async fn get_snippet_area(
    State(fixtures): State<SharedFixtures>,
    Path(area): Path<String>,
    Query(query): Query<SnippetAreaQuery>,
) -> Result<Json<Value>, StatusCode> {
    snippet_area_response(&fixtures, &area, &query)
}

async fn get_localized_snippet_area(
    State(fixtures): State<SharedFixtures>,
    Path((_locale, area)): Path<(String, String)>,
    Query(query): Query<SnippetAreaQuery>,
) -> Result<Json<Value>, StatusCode> {
    snippet_area_response(&fixtures, &area, &query)
}

fn snippet_area_response(
    fixtures: &Fixtures,
    area: &str,
    query: &SnippetAreaQuery,
) -> Result<Json<Value>, StatusCode> {
    let mut snippet = fixtures
        .snippet_areas
        .get(area)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    if !query.include_extension.unwrap_or(false) {
        if let Value::Object(map) = &mut snippet {
            map.remove("extension");
        }
    }
    Ok(Json(snippet))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search(
    State(fixtures): State<SharedFixtures>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    search_response(&fixtures, &query.q)
}

async fn localized_search(
    State(fixtures): State<SharedFixtures>,
    Path(_locale): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    search_response(&fixtures, &query.q)
}

/// Case-insensitive substring match over title and description.
fn search_response(fixtures: &Fixtures, q: &str) -> Json<Value> {
    let needle = q.to_lowercase();
    let hits: Vec<&SearchDocument> = fixtures
        .documents
        .iter()
        .filter(|doc| {
            doc.title.to_lowercase().contains(&needle)
                || doc.description.to_lowercase().contains(&needle)
        })
        .collect();
    let total = hits.len();
    Json(json!({"_embedded": {"result": hits, "total": total}}))
}
