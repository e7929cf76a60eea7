/*
 * Responsibility
 * - Reviews の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(1..=5).contains(&self.rating) {
            return Err("rating must be between 1 and 5");
        }
        if let Some(comment) = &self.comment
            && comment.len() > 2000
        {
            return Err("comment must be <= 2000 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        for rating in [0, 6, -1] {
            let req = CreateReviewRequest {
                rating,
                comment: None,
            };
            assert!(req.validate().is_err(), "rating {rating} must be rejected");
        }
        for rating in 1..=5 {
            let req = CreateReviewRequest {
                rating,
                comment: None,
            };
            assert!(req.validate().is_ok());
        }
    }
}
