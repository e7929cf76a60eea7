/**
 * Responsibility
 * - リソースごとの「意味付き公開ID型」を宣言する
 * - decode ロジックや extractor 実装は core 側
 */
use super::core::PublicId;

// businesses
pub enum BusinessTag {}
pub type PublicBusinessId = PublicId<BusinessTag>;
