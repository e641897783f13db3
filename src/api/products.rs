use crate::{
    dto::products::ProductQuery,
    error::AppResult,
    models::{Category, Product},
    response::{ProductListBody, ProductPage},
};

use super::CatalogueClient;

impl CatalogueClient {
    /// `GET /products?page&limit[&category]`
    pub async fn list_products(&self, query: &ProductQuery) -> AppResult<ProductPage> {
        let request = self.get("/products").query(&query.list_params());
        let body: ProductListBody = self.send_json(request).await?;
        Ok(body.into())
    }

    /// `GET /products/search?q&page&limit`. Falls back to the plain listing
    /// when the query carries no search term.
    pub async fn search_products(&self, query: &ProductQuery) -> AppResult<ProductPage> {
        let Some(term) = query.search_term() else {
            return self.list_products(query).await;
        };
        let request = self
            .get("/products/search")
            .query(&query.search_params(term));
        let body: ProductListBody = self.send_json(request).await?;
        Ok(body.into())
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.send_json(self.get("/products/categories")).await
    }

    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.send_json(self.get(&format!("/products/{id}"))).await
    }
}
