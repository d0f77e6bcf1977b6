use crate::error::FolioError;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload: who the bearer is and when the token stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: TimeDelta) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, FolioError> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    #[test]
    fn issued_token_verifies() {
        let issuer = TokenIssuer::new(b"secret", TimeDelta::hours(1));
        let id = Uuid::new_v4();
        let token = issuer.issue(id).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.id, id);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(b"secret", TimeDelta::seconds(-30));
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        let err = issuer.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let ours = TokenIssuer::new(b"ours", TimeDelta::hours(1));
        let theirs = TokenIssuer::new(b"theirs", TimeDelta::hours(1));
        let token = theirs.issue(Uuid::new_v4()).unwrap();

        let err = ours.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
        assert!(ours.verify("not-a-jwt").is_err());
    }
}
