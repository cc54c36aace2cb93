use axum::http::{HeaderMap, header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError};

#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user_uuid: Uuid,
    pub email: Option<String>,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Unauthorized("user is not an administrator".into()));
    }
    Ok(())
}

/// Verifies `Authorization: Bearer <jwt>` headers against a shared secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn verify(&self, headers: &HeaderMap) -> Result<AuthUser, AppError> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("invalid Authorization scheme".into()))?;

        let decoded = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|err| AppError::Unauthorized(format!("invalid or expired token: {err}")))?;

        let user_uuid = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("invalid user id in token".into()))?;

        Ok(AuthUser {
            user_uuid,
            email: decoded.claims.email,
            role: decoded.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    const SECRET: &str = "test-secret";

    fn token(sub: &str, role: &str, exp_offset: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            email: Some("someone@example.com".into()),
            role: role.to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_valid_bearer_token() {
        let uuid = Uuid::new_v4();
        let verifier = TokenVerifier::new(SECRET);
        let user = verifier
            .verify(&headers(&format!("Bearer {}", token(&uuid.to_string(), "admin", 600))))
            .unwrap();
        assert_eq!(user.user_uuid, uuid);
        assert!(user.is_admin());
        assert!(ensure_admin(&user).is_ok());
    }

    #[test]
    fn rejects_missing_wrong_scheme_and_expired() {
        let verifier = TokenVerifier::new(SECRET);
        let uuid = Uuid::new_v4().to_string();

        assert!(matches!(
            verifier.verify(&HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            verifier.verify(&headers(&format!("Basic {}", token(&uuid, "user", 600)))),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            verifier.verify(&headers(&format!("Bearer {}", token(&uuid, "user", -3600)))),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            verifier.verify(&headers(&format!("Bearer {}", token("not-a-uuid", "user", 600)))),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn non_admin_is_rejected() {
        let user = AuthUser {
            user_uuid: Uuid::new_v4(),
            email: None,
            role: "user".into(),
        };
        assert!(ensure_admin(&user).is_err());
    }
}
