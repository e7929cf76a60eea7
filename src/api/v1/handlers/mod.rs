pub mod analytics;
pub mod businesses;
pub mod endorsements;
pub mod health;
pub mod reviews;
pub mod users;
pub mod verifications;
