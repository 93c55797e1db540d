//! User profile value object with validate-then-construct parsing.
//!
//! Profiles arrive as raw JSON from the server or from persisted storage.
//! They are never trusted as-is: `UserProfile::parse` checks the expected
//! shape and constructs the value object, or rejects the payload with a
//! field-level error. Role-specific fields the portal does not model
//! explicitly are retained verbatim so partial updates never drop them.

use serde_json::{Map, Value};
use std::fmt;

use crate::domain::foundation::{SchemaError, UserId};

/// Role of a portal user. Dashboards and navigation branch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Superadmin,
    Admin,
    Teacher,
    Student,
    Parent,
}

impl UserRole {
    /// Parses a role string as issued by the server.
    pub fn parse(value: &str) -> Result<Self, SchemaError> {
        match value {
            "superadmin" => Ok(Self::Superadmin),
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "parent" => Ok(Self::Parent),
            other => Err(SchemaError::unknown_value("role", other)),
        }
    }

    /// Returns the wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated user profile.
///
/// Invariant: a `UserProfile` only exists if its payload passed shape
/// validation, including a present, well-formed email.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    id: UserId,
    email: String,
    role: UserRole,
    name: Option<String>,
    /// Role-specific fields (registration number, assigned classes, ...)
    /// carried through verbatim.
    extra: Map<String, Value>,
}

/// Fields the profile models explicitly; everything else goes to `extra`.
const KNOWN_FIELDS: [&str; 4] = ["id", "email", "role", "name"];

impl UserProfile {
    /// Validates a raw payload and constructs a profile from it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the payload is not an object, if `id`,
    /// `email`, or `role` are missing, empty, or of the wrong type, if
    /// the email has no `@`, or if the role is not a known value.
    pub fn parse(value: &Value) -> Result<Self, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object("profile"))?;

        let id = UserId::new(require_string(obj, "id")?)?;

        let email = require_string(obj, "email")?;
        if !email.contains('@') {
            return Err(SchemaError::invalid_format("email", "email address"));
        }

        let role = UserRole::parse(&require_string(obj, "role")?)?;

        let name = match obj.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(SchemaError::invalid_type("name", "string")),
        };

        let extra = obj
            .iter()
            .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            email,
            role,
            name,
            extra,
        })
    }

    /// Returns the user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the display name if the server provided one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the display name, or email as fallback.
    pub fn name_or_email(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// Returns a role-specific field by name.
    pub fn extra_field(&self, field: &str) -> Option<&Value> {
        self.extra.get(field)
    }

    /// Serializes the profile back to its canonical JSON object.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".to_string(), Value::String(self.id.as_str().to_string()));
        obj.insert("email".to_string(), Value::String(self.email.clone()));
        obj.insert("role".to_string(), Value::String(self.role.as_str().to_string()));
        if let Some(name) = &self.name {
            obj.insert("name".to_string(), Value::String(name.clone()));
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        Value::Object(obj)
    }

    /// Merges a partial update onto this profile and revalidates the result.
    ///
    /// A `null` value in the partial removes the key before revalidation,
    /// so an update that nulls out the email fails validation. The partial
    /// must itself be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the partial is not an object or the merged
    /// payload no longer matches the profile shape. `self` is unchanged
    /// either way.
    pub fn merged_with(&self, partial: &Value) -> Result<Self, SchemaError> {
        let updates = partial
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object("profile update"))?;

        let mut merged = match self.to_value() {
            Value::Object(obj) => obj,
            _ => unreachable!("to_value always returns an object"),
        };
        for (key, value) in updates {
            if value.is_null() {
                merged.remove(key);
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }

        Self::parse(&Value::Object(merged))
    }
}

/// Extracts a required, non-empty string field from an object.
fn require_string(obj: &Map<String, Value>, field: &str) -> Result<String, SchemaError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(SchemaError::missing(field)),
        Some(Value::String(s)) if s.is_empty() => Err(SchemaError::empty(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::invalid_type(field, "string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student_payload() -> Value {
        json!({
            "id": "usr-1",
            "email": "amina@school.example",
            "role": "student",
            "name": "Amina",
            "registrationNumber": "A123"
        })
    }

    #[test]
    fn parse_accepts_valid_student_profile() {
        let profile = UserProfile::parse(&student_payload()).unwrap();
        assert_eq!(profile.id().as_str(), "usr-1");
        assert_eq!(profile.email(), "amina@school.example");
        assert_eq!(profile.role(), UserRole::Student);
        assert_eq!(profile.name(), Some("Amina"));
        assert_eq!(
            profile.extra_field("registrationNumber"),
            Some(&json!("A123"))
        );
    }

    #[test]
    fn parse_rejects_missing_email() {
        let mut payload = student_payload();
        payload.as_object_mut().unwrap().remove("email");
        assert_eq!(
            UserProfile::parse(&payload),
            Err(SchemaError::missing("email"))
        );
    }

    #[test]
    fn parse_rejects_empty_email() {
        let mut payload = student_payload();
        payload["email"] = json!("");
        assert_eq!(
            UserProfile::parse(&payload),
            Err(SchemaError::empty("email"))
        );
    }

    #[test]
    fn parse_rejects_malformed_email() {
        let mut payload = student_payload();
        payload["email"] = json!("not-an-email");
        assert_eq!(
            UserProfile::parse(&payload),
            Err(SchemaError::invalid_format("email", "email address"))
        );
    }

    #[test]
    fn parse_rejects_wrong_type_for_id() {
        let mut payload = student_payload();
        payload["id"] = json!(42);
        assert_eq!(
            UserProfile::parse(&payload),
            Err(SchemaError::invalid_type("id", "string"))
        );
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let mut payload = student_payload();
        payload["role"] = json!("janitor");
        assert_eq!(
            UserProfile::parse(&payload),
            Err(SchemaError::unknown_value("role", "janitor"))
        );
    }

    #[test]
    fn parse_rejects_non_object_payload() {
        assert_eq!(
            UserProfile::parse(&json!("nope")),
            Err(SchemaError::not_an_object("profile"))
        );
    }

    #[test]
    fn parse_treats_null_name_as_absent() {
        let mut payload = student_payload();
        payload["name"] = Value::Null;
        let profile = UserProfile::parse(&payload).unwrap();
        assert_eq!(profile.name(), None);
        assert_eq!(profile.name_or_email(), "amina@school.example");
    }

    #[test]
    fn to_value_round_trips_including_extras() {
        let profile = UserProfile::parse(&student_payload()).unwrap();
        let reparsed = UserProfile::parse(&profile.to_value()).unwrap();
        assert_eq!(profile, reparsed);
    }

    #[test]
    fn merged_with_overlays_fields() {
        let profile = UserProfile::parse(&student_payload()).unwrap();
        let merged = profile.merged_with(&json!({"name": "Amina B."})).unwrap();
        assert_eq!(merged.name(), Some("Amina B."));
        assert_eq!(merged.email(), "amina@school.example");
        assert_eq!(
            merged.extra_field("registrationNumber"),
            Some(&json!("A123"))
        );
    }

    #[test]
    fn merged_with_null_email_fails_validation() {
        let profile = UserProfile::parse(&student_payload()).unwrap();
        let result = profile.merged_with(&json!({"name": "X", "email": null}));
        assert_eq!(result, Err(SchemaError::missing("email")));
    }

    #[test]
    fn merged_with_non_object_partial_fails() {
        let profile = UserProfile::parse(&student_payload()).unwrap();
        assert_eq!(
            profile.merged_with(&json!([1, 2])),
            Err(SchemaError::not_an_object("profile update"))
        );
    }

    #[test]
    fn role_parse_and_as_str_are_inverse() {
        for role in ["superadmin", "admin", "teacher", "student", "parent"] {
            assert_eq!(UserRole::parse(role).unwrap().as_str(), role);
        }
    }
}
