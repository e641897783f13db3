use crate::{
    dto::reviews::ReviewForm,
    error::{AppError, AppResult},
    models::Review,
    state::AppState,
};

pub const CREATE_ERROR: &str = "Failed to add review";
pub const UPDATE_ERROR: &str = "Failed to update review";
pub const DELETE_ERROR: &str = "Failed to delete review";

async fn loaded_product_id(state: &AppState) -> AppResult<i64> {
    state
        .store
        .read()
        .await
        .current_product_id()
        .ok_or(AppError::NoProductLoaded)
}

async fn record_failure(state: &AppState, message: &str, err: &AppError) {
    tracing::warn!(error = %err, "{message}");
    state.store.write().await.error = Some(message.to_string());
}

/// Validate the form, then create a review for the loaded product. An
/// incomplete form is rejected before any request is made.
pub async fn submit_review(state: &AppState, form: ReviewForm) -> AppResult<Review> {
    form.validate()?;
    let product_id = loaded_product_id(state).await?;
    let draft = form.into_draft(product_id)?;
    create_review(state, draft).await
}

/// Persist an unsaved review. The server's copy, not the draft, is put at the
/// front of the loaded review list.
pub async fn create_review(state: &AppState, review: Review) -> AppResult<Review> {
    if !review.is_draft() {
        return Err(AppError::Validation("Review has already been saved".into()));
    }
    let product_id = loaded_product_id(state).await?;
    if review.product_id != product_id {
        return Err(AppError::Validation(
            "Review does not belong to the loaded product".into(),
        ));
    }

    state.store.write().await.error = None;
    match state.client.create_review(&review).await {
        Ok(saved) => {
            let mut store = state.store.write().await;
            if store.current_product_id() == Some(saved.product_id) {
                store.prepend_review(saved.clone());
            }
            tracing::info!(product_id, review_id = saved.id, "review created");
            Ok(saved)
        }
        Err(err) => {
            record_failure(state, CREATE_ERROR, &err).await;
            Err(err)
        }
    }
}

/// Replace a review of the loaded product. The list keeps its order. An
/// incomplete review or one for another product is rejected before any
/// request is made.
pub async fn update_review(state: &AppState, review_id: i64, review: Review) -> AppResult<Review> {
    let product_id = loaded_product_id(state).await?;
    if review.product_id != product_id {
        return Err(AppError::Validation(
            "Review does not belong to the loaded product".into(),
        ));
    }
    ReviewForm::from(&review).validate()?;

    state.store.write().await.error = None;
    match state
        .client
        .update_review(product_id, review_id, &review)
        .await
    {
        Ok(updated) => {
            let mut store = state.store.write().await;
            if store.current_product_id() == Some(product_id) {
                store.replace_review(review_id, updated.clone());
            }
            tracing::info!(product_id, review_id, "review updated");
            Ok(updated)
        }
        Err(err) => {
            record_failure(state, UPDATE_ERROR, &err).await;
            Err(err)
        }
    }
}

/// Apply the filled-in fields of `form` to a loaded review and save it.
pub async fn edit_review(state: &AppState, review_id: i64, form: ReviewForm) -> AppResult<Review> {
    let existing = state
        .store
        .read()
        .await
        .current_reviews
        .iter()
        .find(|r| r.id == review_id)
        .cloned()
        .ok_or(AppError::NotFound)?;
    let review = form.apply_to(&existing)?;
    update_review(state, review_id, review).await
}

pub async fn delete_review(state: &AppState, review_id: i64) -> AppResult<()> {
    let product_id = loaded_product_id(state).await?;

    state.store.write().await.error = None;
    match state.client.delete_review(product_id, review_id).await {
        Ok(()) => {
            let mut store = state.store.write().await;
            if store.current_product_id() == Some(product_id) {
                store.remove_review(review_id);
            }
            tracing::info!(product_id, review_id, "review deleted");
            Ok(())
        }
        Err(err) => {
            record_failure(state, DELETE_ERROR, &err).await;
            Err(err)
        }
    }
}
