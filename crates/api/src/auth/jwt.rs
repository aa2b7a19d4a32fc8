//! Access-token validation.
//!
//! Sessions are issued by the managed backend as HS256-signed JWTs. The
//! server checks signature, expiry and audience locally so a bad token is
//! refused before any backend call is made; the token itself is then
//! forwarded so the backend applies the admin's row policies.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sustaineco_db::backend::{AccessClaims, AUTHENTICATED_AUDIENCE};

/// Validate and decode an access token, returning the embedded
/// [`AccessClaims`].
pub fn validate_access_token(
    token: &str,
    secret: &str,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn claims(aud: &str, exp_offset: i64) -> AccessClaims {
        let now = chrono::Utc::now().timestamp();
        AccessClaims {
            sub: "8d0b6f5e-5a43-4d0e-9a51-1f1e2c3d4e5f".to_string(),
            email: Some("admin@sustaineco.test".to_string()),
            role: "authenticated".to_string(),
            aud: aud.to_string(),
            exp: now + exp_offset,
            iat: now,
            session_id: None,
        }
    }

    fn sign(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn test_valid_token_round_trips_claims() {
        let token = sign(&claims(AUTHENTICATED_AUDIENCE, 3600), SECRET);
        let decoded = validate_access_token(&token, SECRET).expect("token should validate");
        assert_eq!(decoded.sub, "8d0b6f5e-5a43-4d0e-9a51-1f1e2c3d4e5f");
        assert_eq!(decoded.email.as_deref(), Some("admin@sustaineco.test"));
    }

    #[test]
    fn test_expired_token_fails() {
        // Well past the default 60-second leeway.
        let token = sign(&claims(AUTHENTICATED_AUDIENCE, -300), SECRET);
        assert!(validate_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let token = sign(&claims("anon", 3600), SECRET);
        assert!(validate_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let token = sign(&claims(AUTHENTICATED_AUDIENCE, 3600), "secret-alpha");
        assert!(validate_access_token(&token, "secret-bravo").is_err());
    }
}
