/*
 * Responsibility
 * - アプリ全体で使う Role の閉集合 (CUSTOMER / BUSINESS_OWNER / ADMIN)
 * - wire 文字列との相互変換 (token claim / DB column / allow-list 判定)
 *
 * Notes
 * - claim に載ってくる未知の role 文字列は「どの allow-list にも属さない」
 *   として扱うため、parse は Option を返す (エラーにはしない)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    BusinessOwner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::BusinessOwner => "BUSINESS_OWNER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a wire string. Unknown strings are `None`, not an error:
    /// an unknown role is simply not a member of any allow-list.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CUSTOMER" => Some(Role::Customer),
            "BUSINESS_OWNER" => Some(Role::BusinessOwner),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_known_roles() {
        for role in [Role::Customer, Role::BusinessOwner, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_rejects_unknown_strings() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("customer"), None);
        assert_eq!(Role::parse("SUPERUSER"), None);
    }
}
