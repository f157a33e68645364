use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use crate::domains::auth::models::jwt::Claims;
use crate::domains::member::models::Member;
use crate::shared::errors::AuthError;

const REFRESH_TOKEN_LENGTH: usize = 64;

/// JWT 서비스
/// Access token signing/verification and refresh token minting
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl_hours,
        }
    }

    /// Access Token 발급 (HS256)
    /// Issue a signed access token for the member; no storage side effect
    pub fn generate_access_token(&self, member: &Member) -> Result<String, AuthError> {
        let claims = Claims::new(member.id, member.social_type, self.access_token_ttl_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate access token: {}", e)))
    }

    /// Refresh Token 생성 (64자 랜덤 문자열, 회원에 저장)
    /// Mint a random refresh token
    pub fn generate_refresh_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Access Token 검증 (서명 + 만료)
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::InvalidToken
            })
    }
}
