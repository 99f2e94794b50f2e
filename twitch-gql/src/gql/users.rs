//! Twitch user types.

use crate::gql::types::null_as_default;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A Twitch account.
///
/// Lookups fill in every field they select; objects embedded in other results (a stream's
/// broadcaster, a video's owner) usually carry only `id`, `login` and `display_name`.
///
/// A `User` is also the subject of relationship queries, where only `id` matters:
///
/// ```rust
/// # use twitch_gql::User;
/// let subject = User { id: "12826".into(), ..Default::default() };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The opaque ID Twitch uses to identify the account.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// The lowercase name used in URLs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        rename = "profileImageURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<UserRoles>,
}

/// Platform-wide roles held by an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoles {
    #[serde(default)]
    pub is_affiliate: bool,
    #[serde(default)]
    pub is_partner: bool,
    #[serde(default)]
    pub is_staff: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_full_user() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "12826",
            "login": "twitch",
            "displayName": "Twitch",
            "description": "Twitch is where thousands of communities come together",
            "createdAt": "2007-05-22T10:39:54.92Z",
            "profileImageURL": "https://static-cdn.jtvnw.net/jtv_user_pictures/twitch.png",
            "roles": { "isAffiliate": false, "isPartner": true }
        }))
        .unwrap();
        assert_eq!(user.id, "12826");
        assert_eq!(user.display_name.as_deref(), Some("Twitch"));
        assert_eq!(
            user.created_at,
            Some("2007-05-22T10:39:54.92Z".parse().unwrap())
        );
        assert_eq!(
            user.roles,
            Some(UserRoles {
                is_affiliate: false,
                is_partner: true,
                is_staff: false,
            })
        );
    }

    #[test]
    fn decodes_compact_user() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1", "login": "a", "displayName": "A"
        }))
        .unwrap();
        assert_eq!(
            user,
            User {
                id: "1".into(),
                login: "a".into(),
                display_name: Some("A".into()),
                ..Default::default()
            }
        );
    }
}
