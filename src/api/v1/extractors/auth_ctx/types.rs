/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token 検証ロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 * - role は wire 文字列のまま持つ。未知の role は「どの allow-list にも
 *   属さない」扱いになるため、ここで enum に潰さない
 */

use uuid::Uuid;

use crate::services::auth::Role;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID (token の sub, UUID)
/// - `role` は token の role claim そのまま
/// - `jti` は監査/相関用 (denylist 等は必要になった時点で追加)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub role: String,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, role: String, jti: Option<String>) -> Self {
        Self { user_id, role, jti }
    }

    /// Parsed role, `None` for unknown wire strings.
    pub fn parsed_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.parsed_role() == Some(role)
    }

    /// Ownership check used by handlers: the owner themselves, or an admin.
    pub fn can_manage(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id || self.has_role(Role::Admin)
    }
}
