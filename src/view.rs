//! Plain-text rendering of catalogue state for the terminal.

use std::fmt::Write;

use crate::{
    error::{AppError, AppResult},
    models::Review,
    rating::StarRating,
    state::CatalogueState,
};

pub fn render_product_list(state: &CatalogueState, page: u32, page_size: u32) -> String {
    if state.loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return error.clone();
    }

    let mut out = String::from("Product List\n");
    if state.products.is_empty() {
        out.push_str("\nNo products found\n");
    }
    for product in &state.products {
        let _ = writeln!(out, "\n[{}] {}", product.id, product.name);
        let _ = writeln!(out, "    {}", product.category);
        let _ = writeln!(out, "    ${:.2}", product.price);
        let _ = writeln!(
            out,
            "    Average Rating: {:.1} {}",
            product.average_rating,
            StarRating::out_of_five(product.average_rating)
        );
    }
    let _ = writeln!(
        out,
        "\nPage {} of {} ({} products)",
        page.max(1),
        state.total_pages(page_size).max(1),
        state.total_count
    );
    out
}

pub fn render_categories(state: &CatalogueState) -> String {
    if let Some(error) = &state.error {
        return error.clone();
    }
    if state.categories.is_empty() {
        return "No categories".to_string();
    }
    let mut out = String::from("Categories\n");
    for category in &state.categories {
        let _ = writeln!(out, "  - {category}");
    }
    out
}

pub fn render_product_page(state: &CatalogueState) -> String {
    if state.loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return error.clone();
    }
    let Some(product) = &state.current_product else {
        return render_not_found("/products");
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(out, "{}", product.description);
    if !product.image_path.is_empty() {
        let _ = writeln!(out, "Image: {}", product.image_path);
    }
    let _ = writeln!(out, "Price: ${:.2}", product.price);
    let _ = writeln!(out, "Category: {}", product.category);
    let rating = if product.average_rating > 0.0 {
        format!("{:.1}", product.average_rating)
    } else {
        "Not Rated".to_string()
    };
    let _ = writeln!(
        out,
        "Rating: {rating} / 5 {}",
        StarRating::out_of_five(product.average_rating)
    );

    out.push_str("\nReviews\n");
    if state.current_reviews.is_empty() {
        out.push_str("No reviews yet\n");
    }
    for review in &state.current_reviews {
        out.push_str(&render_review(review));
    }
    out
}

/// Product page after loading product `id`; the 404 page when the API does
/// not know the product.
pub fn render_loaded_product<T>(state: &CatalogueState, id: i64, loaded: &AppResult<T>) -> String {
    match loaded {
        Err(AppError::NotFound) => render_not_found(&format!("/products/{id}")),
        _ => render_product_page(state),
    }
}

fn render_review(review: &Review) -> String {
    format!(
        "\n#{} {}\n{}\nRating: {} / 5 {}\n",
        review.id,
        review.author,
        review.comment,
        review.rating,
        StarRating::out_of_five(f64::from(review.rating))
    )
}

pub fn render_not_found(path: &str) -> String {
    format!("404 - Page Not Found\nThe page {path} does not exist.")
}

pub fn render_footer() -> String {
    format!(
        "Catalogue client v{} · Product reviews",
        env!("CARGO_PKG_VERSION")
    )
}
