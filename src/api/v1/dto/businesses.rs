/*
 * Responsibility
 * - Businesses の request/response DTO
 * - 公開 ID を返す場合は encode 済みの値を返す (内部 ID を漏らさない)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub upi_vpa: Option<String>,
}

impl CreateBusinessRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.len() > 120 {
            return Err("name must be <= 120 chars");
        }
        if self.category.trim().is_empty() {
            return Err("category is required");
        }
        if let Some(vpa) = &self.upi_vpa
            && !vpa.contains('@')
        {
            return Err("upi_vpa must look like name@provider");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub upi_vpa: Option<String>,
}

impl UpdateBusinessRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name cannot be empty");
            }
            if name.len() > 120 {
                return Err("name must be <= 120 chars");
            }
        }
        if let Some(category) = &self.category
            && category.trim().is_empty()
        {
            return Err("category cannot be empty");
        }
        if let Some(vpa) = &self.upi_vpa
            && !vpa.contains('@')
        {
            return Err("upi_vpa must look like name@provider");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListBusinessesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BusinessResponse {
    pub id: String, // encoded
    pub owner_id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub upi_vpa: Option<String>,
    // Stored value only; no scoring engine exists.
    pub trust_score: i32,
}

/// QR payload: the string a client encodes into the QR image.
#[derive(Debug, Serialize)]
pub struct QrPayloadResponse {
    pub id: String,
    pub share_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CreateBusinessRequest {
        CreateBusinessRequest {
            name: "Chai Corner".to_string(),
            category: "cafe".to_string(),
            description: None,
            phone: None,
            address: None,
            city: None,
            upi_vpa: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn vpa_without_at_sign_is_invalid() {
        let mut req = base();
        req.upi_vpa = Some("chaicorner".to_string());
        assert!(req.validate().is_err());
    }
}
