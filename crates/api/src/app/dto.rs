use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_auth::{Principal, PrincipalId, Role};
use stockroom_store::products::ProductDraft;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
    pub brand: String,
    pub image_url: Option<String>,
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        ProductDraft {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
            category: req.category,
            brand: req.brand,
            image_url: req.image_url,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Login response: the token plus the profile fields the original contract
/// exposes. `expires_in` is the configured lifetime in milliseconds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub r#type: &'static str,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn new(token: String, principal: &Principal, expires_in: i64) -> Self {
        Self {
            token,
            r#type: "Bearer",
            username: principal.username.clone(),
            email: principal.email.clone(),
            full_name: principal.full_name(),
            role: principal.role,
            expires_in,
        }
    }
}

/// Principal profile with the password hash structurally absent: the type has
/// no field that could carry it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub id: PrincipalId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
}

impl From<&Principal> for PrincipalResponse {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.id,
            username: p.username.clone(),
            email: p.email.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            full_name: p.full_name(),
            role: p.role,
            active: p.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_response_never_carries_password_material() {
        let principal = Principal {
            id: PrincipalId::new(),
            username: "usuario".to_string(),
            email: "usuario@tecsup.edu.pe".to_string(),
            password_hash: "$argon2id$super-secret".to_string(),
            first_name: "Usuario".to_string(),
            last_name: "Prueba".to_string(),
            role: Role::User,
            active: true,
        };

        let body = serde_json::to_string(&PrincipalResponse::from(&principal)).unwrap();
        assert!(!body.contains("argon2"));
        assert!(!body.contains("password"));
        assert!(body.contains("\"fullName\":\"Usuario Prueba\""));
    }

    #[test]
    fn login_request_uses_the_original_field_names() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"usernameOrEmail":"usuario@tecsup.edu.pe","password":"user123"}"#,
        )
        .unwrap();
        assert_eq!(req.username_or_email, "usuario@tecsup.edu.pe");
    }
}
