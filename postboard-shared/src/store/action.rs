//! The closed set of state changes and their wire names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::models::{AuthProfile, Post, PostId};

/// A state change request handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the feed with the server's snapshot.
    FetchAll(Vec<Post>),
    /// Append a freshly created post.
    Create(Post),
    /// Replace the post with the same id (edits and likes).
    Update(Post),
    /// Drop the post with this id.
    Delete(PostId),
    /// Record a login payload; `None` persists an empty profile.
    Auth(Option<AuthProfile>),
    /// Forget the signed-in user.
    Logout,
}

/// Discriminant of an [`Action`], spelled as the wire literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// `FETCH_ALL`
    FetchAll,
    /// `CREATE`
    Create,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
    /// `AUTH`
    Auth,
    /// `LOGOUT`
    Logout,
}

impl Action {
    /// Which variant this is, without the payload.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::FetchAll(_) => ActionKind::FetchAll,
            Self::Create(_) => ActionKind::Create,
            Self::Update(_) => ActionKind::Update,
            Self::Delete(_) => ActionKind::Delete,
            Self::Auth(_) => ActionKind::Auth,
            Self::Logout => ActionKind::Logout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case(ActionKind::FetchAll, "FETCH_ALL")]
    #[test_case(ActionKind::Create, "CREATE")]
    #[test_case(ActionKind::Update, "UPDATE")]
    #[test_case(ActionKind::Delete, "DELETE")]
    #[test_case(ActionKind::Auth, "AUTH")]
    #[test_case(ActionKind::Logout, "LOGOUT")]
    fn kind_literals(kind: ActionKind, literal: &str) {
        assert_eq!(kind.to_string(), literal);
        assert_eq!(ActionKind::from_str(literal).unwrap(), kind);
        let as_static: &'static str = kind.into();
        assert_eq!(as_static, literal);
    }

    #[test]
    fn unknown_literal_is_rejected() {
        assert!(ActionKind::from_str("LIKE").is_err());
    }

    #[test]
    fn serialized_type_matches_kind() {
        let actions = [
            Action::FetchAll(vec![]),
            Action::Create(Post::new("1", "t")),
            Action::Update(Post::new("1", "t")),
            Action::Delete(PostId::from("1")),
            Action::Auth(None),
            Action::Logout,
        ];
        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], action.kind().to_string());
        }
    }

    #[test]
    fn delete_wire_shape() {
        let value = serde_json::to_value(Action::Delete(PostId::from("42"))).unwrap();
        assert_eq!(value, json!({"type": "DELETE", "payload": "42"}));

        let parsed: Action = serde_json::from_value(json!({"type": "DELETE", "payload": 42})).unwrap();
        assert_eq!(parsed, Action::Delete(PostId::from(42_u64)));
    }
}
