use super::null_to_default;
use super::restaurant::Restaurant;
use chrono::{DateTime, Utc};
use searchdish_core::validation::{Validate, ValidationResult, Validator, rules};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// User role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Back-office administrator
    Admin,
    /// Restaurant owner/operator
    Restaurateur,
    /// Regular user
    #[default]
    Customer,
}

impl Role {
    /// Wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Restaurateur => "RESTAURATEUR",
            Self::Customer => "CUSTOMER",
        }
    }

    /// Home view a user lands on after login
    #[must_use]
    pub fn home_view(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Restaurateur => "restaurateur",
            Self::Customer => "explore",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "RESTAURATEUR" => Ok(Self::Restaurateur),
            "CUSTOMER" => Ok(Self::Customer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
    }
}

/// A backend user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque id
    pub id: String,
    /// Email address
    #[serde(default, deserialize_with = "null_to_default")]
    pub email: String,
    /// Present on some payloads; never sent back
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Display name
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    /// Role
    #[serde(default)]
    pub role: Role,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Restaurants owned by this user (restaurateurs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<Vec<Restaurant>>,
}

impl User {
    /// First owned restaurant, which the back office edits
    #[must_use]
    pub fn primary_restaurant(&self) -> Option<&Restaurant> {
        self.restaurants.as_deref().and_then(<[Restaurant]>::first)
    }

    /// Name to greet the user with
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Credentials for `POST auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

impl LoginRequest {
    /// Create a login request
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("email", &self.email)
            .min_length("email", &self.email, rules::LOGIN_IDENTIFIER_MIN)
            .required("password", &self.password)
            .min_length("password", &self.password, rules::PASSWORD_MIN)
            .validate()
    }
}

/// Token envelope returned by `auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthToken {
    /// Bearer token
    pub access_token: String,
    /// Refresh token, when the backend issues one
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Logged-in user
    pub user: User,
    /// Issued tokens
    pub token: AuthToken,
}

/// Body of `POST auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterDto {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
    /// Display name
    pub name: String,
    /// Requested role
    pub role: Role,
}

impl Validate for RegisterDto {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .min_length("name", self.name.trim(), rules::USER_NAME_MIN)
            .pattern(
                "email",
                &self.email,
                rules::EMAIL_PATTERN,
                "a valid email address",
            )
            .min_length("password", &self.password, rules::PASSWORD_MIN)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_minimal_payload() {
        let user: User = serde_json::from_str(r#"{"id":"1","role":"ADMIN"}"#).unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.role, Role::Admin);
        assert!(user.email.is_empty());
        assert!(user.primary_restaurant().is_none());
    }

    #[test]
    fn test_unknown_role_is_customer() {
        let user: User = serde_json::from_str(r#"{"id":"2","role":"SUPERUSER"}"#).unwrap();
        assert_eq!(user.role, Role::Customer);

        let user: User = serde_json::from_str(r#"{"id":"3","role":null}"#).unwrap();
        assert_eq!(user.role, Role::Customer);
    }

    #[test]
    fn test_password_never_serialized() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","email":"a@b.com","password":"hash"}"#).unwrap();
        assert_eq!(user.password.as_deref(), Some("hash"));
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "CUSTOMER");
    }

    #[test]
    fn test_role_parsing_and_home() {
        assert_eq!("restaurateur".parse::<Role>().unwrap(), Role::Restaurateur);
        assert!("chef".parse::<Role>().is_err());
        assert_eq!(Role::Admin.home_view(), "admin");
        assert_eq!(Role::Customer.home_view(), "explore");
    }

    #[test]
    fn test_login_validation() {
        assert!(LoginRequest::new("a@b.com", "secret").validate().error_for("email").is_some());
        assert!(LoginRequest::new("awa@site.sn", "12345").validate().error_for("password").is_some());
        assert!(LoginRequest::new("awa@site.sn", "secret").validate().is_valid());
    }

    #[test]
    fn test_register_validation() {
        let mut dto = RegisterDto {
            email: "awa@site.sn".to_string(),
            password: "secret".to_string(),
            name: "  Al ".to_string(),
            role: Role::Customer,
        };
        let result = dto.validate();
        assert!(result.error_for("name").is_some());

        dto.name = "Awa".to_string();
        dto.email = "awa@site".to_string();
        assert!(dto.validate().error_for("email").is_some());

        dto.email = "awa@site.sn".to_string();
        assert!(dto.validate().is_valid());
    }
}
