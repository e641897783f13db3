use chrono::Utc;

use crate::{
    dto::products::ProductQuery,
    error::AppResult,
    state::{AppState, Operation},
};

pub const PRODUCTS_ERROR: &str = "Failed to fetch products";
pub const CATEGORIES_ERROR: &str = "Failed to fetch product categories";
pub const DETAIL_ERROR: &str = "Failed to fetch product details or reviews";

/// What a load did to the shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was committed.
    Applied,
    /// Nothing was fetched; the loaded product already matched.
    Cached,
    /// A newer request of the same kind was issued meanwhile; the response
    /// was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Refresh {
    /// Skip the network when the requested product is already loaded.
    #[default]
    IfMissing,
    Force,
}

/// Fetch one page of products, from the search endpoint when the query has
/// a search term. On failure the previous page stays in place.
pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<Outcome> {
    let query = query.normalize();
    let ticket = state.sequence.issue(Operation::Products);
    {
        let mut store = state.store.write().await;
        store.begin_loading();
        store.error = None;
    }

    let result = match query.search_term() {
        Some(_) => state.client.search_products(&query).await,
        None => state.client.list_products(&query).await,
    };

    let mut store = state.store.write().await;
    store.finish_loading();
    if !state.sequence.is_current(ticket) {
        tracing::warn!(page = query.page, "discarding superseded product listing");
        return Ok(Outcome::Stale);
    }

    match result {
        Ok(page) => {
            tracing::info!(
                page = query.page,
                count = page.products.len(),
                total = page.total_count,
                "products loaded"
            );
            store.products = page.products;
            store.total_count = page.total_count;
            Ok(Outcome::Applied)
        }
        Err(err) => {
            tracing::warn!(error = %err, "product listing failed");
            store.error = Some(PRODUCTS_ERROR.to_string());
            Err(err)
        }
    }
}

pub async fn list_categories(state: &AppState) -> AppResult<Outcome> {
    let ticket = state.sequence.issue(Operation::Categories);
    {
        let mut store = state.store.write().await;
        store.begin_loading();
        store.error = None;
    }

    let result = state.client.list_categories().await;

    let mut store = state.store.write().await;
    store.finish_loading();
    if !state.sequence.is_current(ticket) {
        return Ok(Outcome::Stale);
    }

    match result {
        Ok(categories) => {
            store.categories = categories;
            Ok(Outcome::Applied)
        }
        Err(err) => {
            tracing::warn!(error = %err, "category listing failed");
            store.error = Some(CATEGORIES_ERROR.to_string());
            Err(err)
        }
    }
}

/// Load a product and then its reviews.
///
/// With [`Refresh::IfMissing`] a request for the product that is already
/// loaded is a no-op: neither the product nor its reviews are refetched
/// (unless a max age is configured and has elapsed). The two fetches are
/// sequential, so a failed reviews fetch leaves the new product in place with
/// an empty review list.
pub async fn load_product_with_reviews(
    state: &AppState,
    id: i64,
    refresh: Refresh,
) -> AppResult<Outcome> {
    let ticket = {
        let mut store = state.store.write().await;
        let hit = store.current_product.is_some()
            && store
                .cache
                .is_some_and(|entry| entry.is_fresh_for(id, state.product_max_age, Utc::now()));
        if hit && refresh == Refresh::IfMissing {
            // Still the newest request: earlier loads for other ids go stale.
            state.sequence.issue(Operation::Detail);
            tracing::debug!(product_id = id, "product already loaded");
            return Ok(Outcome::Cached);
        }
        store.begin_loading();
        store.error = None;
        state.sequence.issue(Operation::Detail)
    };

    let product = state.client.get_product(id).await;
    {
        let mut store = state.store.write().await;
        if !state.sequence.is_current(ticket) {
            store.finish_loading();
            tracing::warn!(product_id = id, "discarding superseded product");
            return Ok(Outcome::Stale);
        }
        match product {
            Ok(product) => store.set_product(product),
            Err(err) => {
                store.finish_loading();
                tracing::warn!(product_id = id, error = %err, "product fetch failed");
                store.error = Some(DETAIL_ERROR.to_string());
                return Err(err);
            }
        }
    }

    let reviews = state.client.list_reviews(id).await;

    let mut store = state.store.write().await;
    store.finish_loading();
    if !state.sequence.is_current(ticket) {
        tracing::warn!(product_id = id, "discarding superseded reviews");
        return Ok(Outcome::Stale);
    }
    match reviews {
        Ok(reviews) => {
            tracing::info!(product_id = id, reviews = reviews.len(), "product loaded");
            store.current_reviews = reviews;
            Ok(Outcome::Applied)
        }
        Err(err) => {
            tracing::warn!(product_id = id, error = %err, "reviews fetch failed");
            store.error = Some(DETAIL_ERROR.to_string());
            Err(err)
        }
    }
}
