use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    api::CatalogueClient,
    config::AppConfig,
    error::AppResult,
    models::{Category, Product, Review},
    response::total_pages,
};

/// Shared handle passed to every service call. Clones share the same store.
#[derive(Clone)]
pub struct AppState {
    pub client: CatalogueClient,
    pub store: Arc<RwLock<CatalogueState>>,
    pub sequence: Arc<RequestSequence>,
    pub product_max_age: Option<Duration>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            client: CatalogueClient::new(config)?,
            store: Arc::new(RwLock::new(CatalogueState::default())),
            sequence: Arc::new(RequestSequence::default()),
            product_max_age: config.product_max_age,
        })
    }

    /// Consistent copy of the current state for rendering.
    pub async fn snapshot(&self) -> CatalogueState {
        self.store.read().await.clone()
    }
}

/// Per-operation request counters. A response is only committed when its
/// ticket is still the newest issued for that operation.
#[derive(Debug, Default)]
pub struct RequestSequence {
    products: AtomicU64,
    categories: AtomicU64,
    detail: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Products,
    Categories,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    operation: Operation,
    seq: u64,
}

impl RequestSequence {
    fn counter(&self, operation: Operation) -> &AtomicU64 {
        match operation {
            Operation::Products => &self.products,
            Operation::Categories => &self.categories,
            Operation::Detail => &self.detail,
        }
    }

    pub fn issue(&self, operation: Operation) -> Ticket {
        let seq = self.counter(operation).fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { operation, seq }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counter(ticket.operation).load(Ordering::SeqCst) == ticket.seq
    }
}

/// Which product the detail state was fetched for, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub id: i64,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fetched_at: Utc::now(),
        }
    }

    /// A hit is the same id, and within `max_age` when one is configured.
    pub fn is_fresh_for(&self, id: i64, max_age: Option<Duration>, now: DateTime<Utc>) -> bool {
        if self.id != id {
            return false;
        }
        match max_age {
            None => true,
            Some(max_age) => match chrono::Duration::from_std(max_age) {
                Ok(max_age) => now.signed_duration_since(self.fetched_at) <= max_age,
                Err(_) => true,
            },
        }
    }
}

/// Everything the view layer renders.
#[derive(Debug, Clone, Default)]
pub struct CatalogueState {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub categories: Vec<Category>,
    pub current_product: Option<Product>,
    pub current_reviews: Vec<Review>,
    pub cache: Option<CacheEntry>,
    pub loading: bool,
    pub error: Option<String>,
    pub(crate) in_flight: u32,
}

impl CatalogueState {
    pub fn total_pages(&self, page_size: u32) -> u64 {
        total_pages(self.total_count, page_size)
    }

    pub fn current_product_id(&self) -> Option<i64> {
        self.current_product.as_ref().map(|p| p.id)
    }

    pub(crate) fn begin_loading(&mut self) {
        self.in_flight += 1;
        self.loading = true;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    /// Replace the detail view with a freshly fetched product. Reviews are
    /// cleared so they never belong to a different product.
    pub(crate) fn set_product(&mut self, product: Product) {
        self.cache = Some(CacheEntry::new(product.id));
        self.current_product = Some(product);
        self.current_reviews.clear();
    }

    pub(crate) fn prepend_review(&mut self, review: Review) {
        self.current_reviews.insert(0, review);
    }

    pub(crate) fn replace_review(&mut self, review_id: i64, review: Review) {
        if let Some(slot) = self.current_reviews.iter_mut().find(|r| r.id == review_id) {
            *slot = review;
        }
    }

    pub(crate) fn remove_review(&mut self, review_id: i64) {
        self.current_reviews.retain(|r| r.id != review_id);
    }
}
