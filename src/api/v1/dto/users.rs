/*
 * Responsibility
 * - /me の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.display_name.trim().is_empty() {
            return Err("display_name is required");
        }
        if let Some(phone) = &self.phone
            && phone.len() > 32
        {
            return Err("phone must be <= 32 chars");
        }
        if let Some(url) = &self.image_url
            && url.len() > 256
        {
            return Err("image_url must be <= 256 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub display_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_display_name_is_invalid() {
        let req = UpdateProfileRequest {
            display_name: "   ".to_string(),
            phone: None,
            image_url: None,
        };
        assert!(req.validate().is_err());
    }
}
