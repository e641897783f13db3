use chrono::{SecondsFormat, Utc};

use crate::{
    error::{AppError, AppResult},
    models::Review,
    rating::StarRating,
};

/// Review authoring form. A `rating` of 0 means no rating was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub author: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewForm {
    pub fn new(author: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            rating,
            comment: comment.into(),
        }
    }

    /// Set the rating by clicking the star at `index` (0-based) of the form's
    /// star picker. Positions past the last star leave the rating unchanged.
    pub fn pick_star(&mut self, index: usize) {
        let stars = StarRating::out_of_five(f64::from(self.rating));
        if let Some(value) = stars.value_at(index) {
            // A whole-number rating never shows a half star.
            self.rating = value.floor() as u8;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.author.trim().is_empty()
            || self.comment.trim().is_empty()
            || !(1..=5).contains(&self.rating)
        {
            return Err(AppError::incomplete_form());
        }
        Ok(())
    }

    /// Unsaved review for `product_id`, stamped with the current time.
    pub fn into_draft(self, product_id: i64) -> AppResult<Review> {
        self.validate()?;
        Ok(Review {
            id: 0,
            product_id,
            author: self.author,
            rating: self.rating,
            comment: self.comment,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Overlay the non-empty fields of this form onto an existing review.
    pub fn apply_to(&self, review: &Review) -> AppResult<Review> {
        let mut updated = review.clone();
        if !self.author.trim().is_empty() {
            updated.author = self.author.clone();
        }
        if self.rating != 0 {
            updated.rating = self.rating;
        }
        if !self.comment.trim().is_empty() {
            updated.comment = self.comment.clone();
        }
        ReviewForm::from(&updated).validate()?;
        Ok(updated)
    }
}

impl From<&Review> for ReviewForm {
    fn from(review: &Review) -> Self {
        Self {
            author: review.author.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
        }
    }
}
