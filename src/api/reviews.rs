use crate::{error::AppResult, models::Review};

use super::CatalogueClient;

fn collection(product_id: i64) -> String {
    format!("/products/{product_id}/reviews")
}

fn member(product_id: i64, review_id: i64) -> String {
    format!("/products/{product_id}/reviews/{review_id}")
}

impl CatalogueClient {
    pub async fn list_reviews(&self, product_id: i64) -> AppResult<Vec<Review>> {
        self.send_json(self.get(&collection(product_id))).await
    }

    /// The server ignores `review.id` and answers with the stored review.
    pub async fn create_review(&self, review: &Review) -> AppResult<Review> {
        let request = self.post(&collection(review.product_id)).json(review);
        self.send_json(request).await
    }

    pub async fn update_review(
        &self,
        product_id: i64,
        review_id: i64,
        review: &Review,
    ) -> AppResult<Review> {
        let request = self.put(&member(product_id, review_id)).json(review);
        self.send_json(request).await
    }

    /// The response body, if any, is ignored.
    pub async fn delete_review(&self, product_id: i64, review_id: i64) -> AppResult<()> {
        self.send(self.delete(&member(product_id, review_id))).await?;
        Ok(())
    }
}
