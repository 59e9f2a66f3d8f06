//! Sign in and sign up payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend user id (`_id`), or the identity provider's id.
    #[serde(rename = "_id", alias = "id", alias = "googleId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Sign-in email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Avatar link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Login payload kept in the auth slice and mirrored into durable storage.
///
/// Unknown keys are preserved in `extra` so a payload written by another
/// client survives a load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthProfile {
    /// The user the session belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<UserProfile>,

    /// Bearer token for authorized requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Keys this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthProfile {
    /// Profile carrying only a bearer token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// True for the `{}` payload, which carries no session at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Best label for the signed-in user.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let user = self.result.as_ref()?;
        user.name.as_deref().or(user.email.as_deref())
    }

    /// Id used to match the user against `Post::creator`.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.result.as_ref()?.id.as_deref()
    }
}

/// Credentials for `POST /user/signin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Account email
    pub email: String,
    /// Plain password, sent over the request body only
    pub password: String,
}

/// Registration form for `POST /user/signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Account email
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Must equal `password`
    pub confirm_password: String,
}

impl SignUpRequest {
    /// Check the form before it is sent.
    ///
    /// # Errors
    /// Returns a user-facing message describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_profile_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&AuthProfile::default()).unwrap(), "{}");
    }

    #[test]
    fn token_only_payload_round_trips() {
        let profile: AuthProfile = serde_json::from_value(json!({"token": "t"})).unwrap();
        assert_eq!(profile, AuthProfile::with_token("t"));
        assert_eq!(serde_json::to_value(&profile).unwrap(), json!({"token": "t"}));
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let value = json!({
            "result": {"_id": "u1", "name": "Ana", "email": "ana@example.com"},
            "token": "jwt",
            "provider": "google"
        });
        let profile: AuthProfile = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(profile.extra.get("provider"), Some(&json!("google")));
        assert_eq!(serde_json::to_value(&profile).unwrap(), value);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut profile = AuthProfile::with_token("t");
        assert_eq!(profile.display_name(), None);

        profile.result = Some(UserProfile {
            email: Some("ana@example.com".into()),
            ..UserProfile::default()
        });
        assert_eq!(profile.display_name(), Some("ana@example.com"));

        if let Some(user) = profile.result.as_mut() {
            user.name = Some("Ana".into());
        }
        assert_eq!(profile.display_name(), Some("Ana"));
    }

    #[test]
    fn google_id_is_accepted_as_user_id() {
        let profile: AuthProfile =
            serde_json::from_value(json!({"result": {"googleId": "g-1"}})).unwrap();
        assert_eq!(profile.user_id(), Some("g-1"));
    }

    #[test]
    fn sign_up_validation() {
        let mut request = SignUpRequest {
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        };
        assert!(request.validate().is_ok());

        request.confirm_password = "other".into();
        assert_eq!(request.validate().unwrap_err(), "Passwords do not match");

        request.email = " ".into();
        assert_eq!(request.validate().unwrap_err(), "Email is required");
    }

    #[test]
    fn sign_up_uses_camel_case() {
        let json = serde_json::to_value(SignUpRequest::default()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("confirmPassword").is_some());
    }
}
