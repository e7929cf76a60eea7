/*
 * Responsibility
 * - Endorsements の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateEndorsementRequest {
    pub comment: Option<String>,
}

impl CreateEndorsementRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(comment) = &self.comment
            && comment.len() > 1000
        {
            return Err("comment must be <= 1000 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct EndorsementResponse {
    pub id: Uuid,
    pub endorser_id: Uuid,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
