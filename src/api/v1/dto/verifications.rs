/*
 * Responsibility
 * - Trust verification の request/response DTO
 * - method / status は閉集合。wire 文字列との変換をここで持つ
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationMethod {
    PhoneOtp,
    Endorsement,
    UpiPayment,
    Document,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhoneOtp => "PHONE_OTP",
            Self::Endorsement => "ENDORSEMENT",
            Self::UpiPayment => "UPI_PAYMENT",
            Self::Document => "DOCUMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationDecision {
    Verified,
    Rejected,
}

impl VerificationDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVerificationRequest {
    pub method: VerificationMethod,
}

#[derive(Debug, Deserialize)]
pub struct DecideVerificationRequest {
    pub status: VerificationDecision,
    pub reviewer_note: Option<String>,
}

impl DecideVerificationRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(note) = &self.reviewer_note
            && note.len() > 1000
        {
            return Err("reviewer_note must be <= 1000 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AttachUpiTransactionRequest {
    pub utr: String,
    pub amount_paise: i64,
    pub payer_vpa: String,
}

impl AttachUpiTransactionRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        // UTR: bank reference, 12-22 alphanumeric depending on the rail
        let utr = self.utr.trim();
        if utr.is_empty() || utr.len() > 22 || !utr.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("utr must be alphanumeric, <= 22 chars");
        }
        if self.amount_paise <= 0 {
            return Err("amount_paise must be positive");
        }
        if !self.payer_vpa.contains('@') {
            return Err("payer_vpa must look like name@provider");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub id: Uuid,
    pub method: String,
    pub status: String,
    pub reviewer_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct UpiTransactionResponse {
    pub id: Uuid,
    pub utr: String,
    pub amount_paise: i64,
    pub payer_vpa: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_wire_strings() {
        let m: VerificationMethod = serde_json::from_str("\"UPI_PAYMENT\"").expect("method");
        assert_eq!(m, VerificationMethod::UpiPayment);
        assert_eq!(m.as_str(), "UPI_PAYMENT");
    }

    #[test]
    fn utr_validation() {
        let mut req = AttachUpiTransactionRequest {
            utr: "AXIS0012345678".to_string(),
            amount_paise: 10_000,
            payer_vpa: "shop@upi".to_string(),
        };
        assert!(req.validate().is_ok());

        req.utr = "has spaces".to_string();
        assert!(req.validate().is_err());
    }
}
