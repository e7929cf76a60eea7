pub mod analytics_repo;
pub mod business_repo;
pub mod endorsement_repo;
pub mod error;
pub mod review_repo;
pub mod upi_transaction_repo;
pub mod user_repo;
pub mod verification_repo;
