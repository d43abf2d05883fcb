//! User model and the raw role field shapes.

use serde::Deserialize;

use super::UserId;

/// Role field as the gateway may deliver it.
///
/// Different endpoints historically returned the role as a plain string
/// or as a nested object; [`crate::session::Role`] normalizes both into
/// one enum at session-load time so nothing downstream inspects this.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RoleField {
    /// Plain role name, e.g. `"CUSTOMER"`.
    Name(String),
    /// Nested role object, e.g. `{"name": "CUSTOMER"}`.
    Object {
        /// Role name inside the object.
        name: String,
    },
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role in whichever shape the gateway used (`role` key).
    #[serde(default)]
    pub role: Option<RoleField>,
    /// Role name when delivered as a separate `role_name` key.
    #[serde(default)]
    pub role_name: Option<String>,
}

impl User {
    /// Returns the raw role name, whichever wire shape carried it.
    ///
    /// `role_name` wins when both are present since it is the flattened
    /// form newer endpoints emit.
    #[must_use]
    pub fn raw_role(&self) -> Option<&str> {
        self.role_name
            .as_deref()
            .or(match self.role.as_ref() {
                Some(RoleField::Name(name) | RoleField::Object { name }) => Some(name.as_str()),
                None => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_role_from_plain_string() {
        let json = r#"{"id": 1, "name": "Ayu", "email": "ayu@example.com", "role": "SELLER"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.raw_role(), Some("SELLER"));
    }

    #[test]
    fn raw_role_from_nested_object() {
        let json = r#"{
            "id": 1,
            "name": "Ayu",
            "email": "ayu@example.com",
            "role": {"name": "ADMIN", "id": 3}
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.raw_role(), Some("ADMIN"));
    }

    #[test]
    fn role_name_key_wins() {
        let json = r#"{
            "id": 1,
            "name": "Ayu",
            "email": "ayu@example.com",
            "role": "SELLER",
            "role_name": "CUSTOMER"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.raw_role(), Some("CUSTOMER"));
    }

    #[test]
    fn missing_role_is_none() {
        let json = r#"{"id": 1, "name": "Ayu", "email": "ayu@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.raw_role().is_none());
    }
}
