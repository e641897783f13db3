use serde::{Deserialize, Serialize};

use crate::models::Product;

/// One page of the product listing, as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: u64,
}

impl ProductPage {
    pub fn total_pages(&self, page_size: u32) -> u64 {
        total_pages(self.total_count, page_size)
    }
}

/// The listing endpoint answers either with the paginated envelope or, in the
/// simpler server variant, with a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductListBody {
    Paged(ProductPage),
    Bare(Vec<Product>),
}

impl From<ProductListBody> for ProductPage {
    fn from(body: ProductListBody) -> Self {
        match body {
            ProductListBody::Paged(page) => page,
            ProductListBody::Bare(products) => ProductPage {
                total_count: products.len() as u64,
                products,
            },
        }
    }
}

pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    total_count.div_ceil(page_size)
}
