use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::models::{Claims, TokenType};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn issue(user_id: u64, username: String, role: u8, token_type: TokenType, secret: &str, ttl: usize) -> (String, Claims) {
    let claims = Claims {
        user_id,
        sub: username,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn generate_access_token(
    user_id: u64,
    username: String,
    role: u8,
    secret: &str,
    ttl: usize,
) -> String {
    issue(user_id, username, role, TokenType::Access, secret, ttl).0
}

pub fn generate_refresh_token(
    user_id: u64,
    username: String,
    role: u8,
    secret: &str,
    ttl: usize,
) -> (String, Claims) {
    issue(user_id, username, role, TokenType::Refresh, secret, ttl)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_round_trips() {
        let token = generate_access_token(7, "nadia".to_string(), 1, "secret", 600);
        let claims = verify_token(&token, "secret").unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "nadia");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_carries_refresh_type_and_jti() {
        let (token, claims) = generate_refresh_token(7, "nadia".to_string(), 2, "secret", 600);
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert!(!claims.jti.is_empty());

        let decoded = verify_token(&token, "secret").unwrap();
        assert_eq!(decoded.jti, claims.jti);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(7, "nadia".to_string(), 1, "secret", 600);
        assert!(verify_token(&token, "other").is_err());
    }
}
