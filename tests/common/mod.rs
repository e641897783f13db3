#![allow(dead_code)]

//! In-process stand-in for the remote catalogue API.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use catalogue_review_client::{
    config::AppConfig,
    models::{Product, Review},
    state::AppState,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Status(StatusCode),
    Garbage,
}

#[derive(Debug, Default)]
pub struct MockCatalogue {
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    pub next_review_id: i64,
    /// Requests seen, keyed by `"METHOD /path"`.
    pub hits: HashMap<String, usize>,
    /// Injected failures, keyed like `hits`.
    pub faults: HashMap<String, Fault>,
    /// Response delays, keyed by path and query (`/products?page=1&limit=2`).
    pub delays: HashMap<String, Duration>,
    /// Answer the listing endpoints with a bare array.
    pub bare_list: bool,
}

pub type SharedMock = Arc<Mutex<MockCatalogue>>;

pub struct TestApi {
    pub base_url: String,
    pub mock: SharedMock,
}

impl TestApi {
    pub fn state(&self) -> AppState {
        self.state_with(AppConfig::new(&self.base_url).expect("mock url"))
    }

    pub fn state_with(&self, config: AppConfig) -> AppState {
        AppState::new(&config).expect("http client")
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::new(&self.base_url).expect("mock url")
    }

    pub fn hits(&self, key: &str) -> usize {
        self.mock.lock().unwrap().hits.get(key).copied().unwrap_or(0)
    }

    pub fn fail(&self, key: &str, fault: Fault) {
        self.mock.lock().unwrap().faults.insert(key.to_string(), fault);
    }

    pub fn heal(&self, key: &str) {
        self.mock.lock().unwrap().faults.remove(key);
    }

    pub fn delay(&self, path_and_query: &str, delay: Duration) {
        self.mock
            .lock()
            .unwrap()
            .delays
            .insert(path_and_query.to_string(), delay);
    }

    pub fn server_reviews(&self, product_id: i64) -> Vec<Review> {
        reviews_for(&self.mock.lock().unwrap(), product_id)
    }
}

pub fn product(id: i64, name: &str, category: &str, rating: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: format!("{name} description"),
        price: 10.0 * id as f64,
        category: category.to_string(),
        average_rating: rating,
        image_path: format!("/images/{id}.png"),
    }
}

pub fn review(id: i64, product_id: i64, author: &str, rating: u8) -> Review {
    Review {
        id,
        product_id,
        author: author.to_string(),
        rating,
        comment: format!("comment from {author}"),
        date: "2024-03-01T12:00:00.000Z".to_string(),
    }
}

pub fn seeded() -> MockCatalogue {
    MockCatalogue {
        products: vec![
            product(1, "Desk Lamp", "Home", 4.5),
            product(2, "Hammer", "Tools", 3.0),
            product(3, "Garden Hose", "Garden", 0.0),
            product(4, "Screwdriver Set", "Tools", 4.0),
            product(5, "Throw Pillow", "Home", 2.5),
        ],
        reviews: vec![
            review(1, 2, "Ana", 3),
            review(2, 2, "Ben", 4),
            review(3, 1, "Caro", 5),
        ],
        next_review_id: 4,
        ..Default::default()
    }
}

pub async fn spawn(mock: MockCatalogue) -> anyhow::Result<TestApi> {
    let mock: SharedMock = Arc::new(Mutex::new(mock));
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/search", get(search_products))
        .route("/products/categories", get(list_categories))
        .route("/products/{id}", get(get_product))
        .route(
            "/products/{id}/reviews",
            get(list_reviews).post(create_review),
        )
        .route(
            "/products/{id}/reviews/{review_id}",
            put(update_review).delete(delete_review),
        )
        .layer(middleware::from_fn_with_state(mock.clone(), record))
        .layer(TraceLayer::new_for_http())
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestApi {
        base_url: format!("http://{addr}"),
        mock,
    })
}

async fn record(State(mock): State<SharedMock>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let (fault, delay) = {
        let mut mock = mock.lock().unwrap();
        *mock.hits.entry(key.clone()).or_default() += 1;
        (
            mock.faults.get(&key).copied(),
            mock.delays.get(&path_and_query).copied(),
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    match fault {
        Some(Fault::Status(status)) => (status, "injected failure").into_response(),
        Some(Fault::Garbage) => (StatusCode::OK, "<html>not json</html>").into_response(),
        None => next.run(request).await,
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: usize,
    limit: usize,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
    page: usize,
    limit: usize,
}

fn paged(mock: &MockCatalogue, matching: Vec<Product>, page: usize, limit: usize) -> Response {
    let total = matching.len();
    let items: Vec<Product> = matching
        .into_iter()
        .skip(page.saturating_sub(1) * limit)
        .take(limit)
        .collect();
    if mock.bare_list {
        return Json(items).into_response();
    }
    Json(json!({ "products": items, "totalCount": total })).into_response()
}

async fn list_products(State(mock): State<SharedMock>, Query(query): Query<ListQuery>) -> Response {
    let mock = mock.lock().unwrap();
    let matching = mock
        .products
        .iter()
        .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
        .cloned()
        .collect();
    paged(&mock, matching, query.page, query.limit)
}

async fn search_products(
    State(mock): State<SharedMock>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let mock = mock.lock().unwrap();
    let needle = query.q.to_lowercase();
    let matching = mock
        .products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    paged(&mock, matching, query.page, query.limit)
}

async fn list_categories(State(mock): State<SharedMock>) -> Json<Vec<String>> {
    let mock = mock.lock().unwrap();
    let categories: BTreeSet<String> = mock.products.iter().map(|p| p.category.clone()).collect();
    Json(categories.into_iter().collect())
}

async fn get_product(
    State(mock): State<SharedMock>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, StatusCode> {
    let mock = mock.lock().unwrap();
    mock.products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn reviews_for(mock: &MockCatalogue, product_id: i64) -> Vec<Review> {
    let mut reviews: Vec<Review> = mock
        .reviews
        .iter()
        .filter(|r| r.product_id == product_id)
        .cloned()
        .collect();
    reviews.sort_by(|a, b| b.id.cmp(&a.id));
    reviews
}

async fn list_reviews(State(mock): State<SharedMock>, Path(id): Path<i64>) -> Json<Vec<Review>> {
    Json(reviews_for(&mock.lock().unwrap(), id))
}

async fn create_review(
    State(mock): State<SharedMock>,
    Path(id): Path<i64>,
    Json(mut review): Json<Review>,
) -> (StatusCode, Json<Review>) {
    let mut mock = mock.lock().unwrap();
    review.id = mock.next_review_id;
    review.product_id = id;
    mock.next_review_id += 1;
    mock.reviews.push(review.clone());
    (StatusCode::CREATED, Json(review))
}

async fn update_review(
    State(mock): State<SharedMock>,
    Path((id, review_id)): Path<(i64, i64)>,
    Json(mut review): Json<Review>,
) -> Result<Json<Review>, StatusCode> {
    let mut mock = mock.lock().unwrap();
    let slot = mock
        .reviews
        .iter_mut()
        .find(|r| r.id == review_id && r.product_id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    review.id = review_id;
    review.product_id = id;
    *slot = review.clone();
    Ok(Json(review))
}

async fn delete_review(
    State(mock): State<SharedMock>,
    Path((id, review_id)): Path<(i64, i64)>,
) -> StatusCode {
    let mut mock = mock.lock().unwrap();
    let before = mock.reviews.len();
    mock.reviews
        .retain(|r| !(r.id == review_id && r.product_id == id));
    if mock.reviews.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
