//! Admin session token encoding and decoding
//!
//! Tokens are three dot-joined segments, each the unpadded base64url form of
//! a JSON document: `header.payload.signature`. Two codecs exist:
//!
//! - [`TokenCodec::Hs256`] signs with HMAC-SHA256 and checks the signature
//!   before anything else.
//! - [`TokenCodec::Unsigned`] is the legacy scheme. The signature segment is
//!   empty and nothing but the expiry is checked, so anyone who knows the
//!   encoding can mint a token. Only enable it for compatibility.
//!
//! Whatever the codec, freshness is decided the same way: the payload must
//! carry a numeric `exp` strictly greater than the current Unix second.

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Malformed token: {0}")]
    Malformed(&'static str),
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token has no numeric expiry")]
    MissingExpiry,
    #[error("Token expired")]
    TokenExpired,
}

/// Payload of an admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Administrator email.
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    /// Random session id, only used to correlate log lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl SessionClaims {
    /// Reads claims out of a decoded payload. Only `exp` is mandatory; older
    /// tokens may lack the other fields.
    fn from_payload(payload: &Value) -> Result<(Self, f64), JwtError> {
        let exp = payload
            .get("exp")
            .and_then(Value::as_f64)
            .ok_or(JwtError::MissingExpiry)?;

        let text = |key: &str| {
            payload
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let claims = Self {
            sub: text("sub").or_else(|| text("email")).unwrap_or_default(),
            role: text("role").unwrap_or_default(),
            iat: payload.get("iat").and_then(Value::as_i64).unwrap_or_default(),
            exp: exp as i64,
            jti: text("jti"),
        };
        Ok((claims, exp))
    }
}

#[derive(Serialize)]
struct UnsignedHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Clone)]
pub enum TokenCodec {
    Unsigned,
    Hs256 {
        encoding_key: EncodingKey,
        decoding_key: DecodingKey,
    },
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCodec::Unsigned => f.write_str("TokenCodec::Unsigned"),
            TokenCodec::Hs256 { .. } => f.write_str("TokenCodec::Hs256 { .. }"),
        }
    }
}

impl TokenCodec {
    pub fn unsigned() -> Self {
        TokenCodec::Unsigned
    }

    pub fn hs256(secret: &[u8]) -> Self {
        TokenCodec::Hs256 {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, TokenCodec::Hs256 { .. })
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        match self {
            TokenCodec::Unsigned => {
                let header = serde_json::to_vec(&UnsignedHeader {
                    alg: "none",
                    typ: "JWT",
                })
                .map_err(|e| JwtError::CreationError(e.to_string()))?;
                let payload = serde_json::to_vec(claims)
                    .map_err(|e| JwtError::CreationError(e.to_string()))?;
                Ok(format!(
                    "{}.{}.",
                    URL_SAFE_NO_PAD.encode(header),
                    URL_SAFE_NO_PAD.encode(payload)
                ))
            }
            TokenCodec::Hs256 { encoding_key, .. } => {
                encode(&Header::new(Algorithm::HS256), claims, encoding_key)
                    .map_err(|e| JwtError::CreationError(e.to_string()))
            }
        }
    }

    /// Decodes `token` and checks it is fresh at `now` (Unix seconds).
    pub fn decode(&self, token: &str, now: i64) -> Result<SessionClaims, JwtError> {
        if let TokenCodec::Hs256 { decoding_key, .. } = self {
            verify_signature(token, decoding_key)?;
        }

        let segment = token
            .split('.')
            .nth(1)
            .ok_or(JwtError::Malformed("expected at least two segments"))?;
        let payload = decode_payload_segment(segment)?;
        let (claims, exp) = SessionClaims::from_payload(&payload)?;

        if exp > now as f64 {
            Ok(claims)
        } else {
            Err(JwtError::TokenExpired)
        }
    }
}

/// Verifies the HMAC only. Expiry is checked by the shared freshness rule so
/// that both codecs agree on the boundary.
fn verify_signature(token: &str, key: &DecodingKey) -> Result<(), JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Value>(token, key, &validation)
        .map(|_| ())
        .map_err(|_| JwtError::InvalidSignature)
}

/// Base64url payload segment to JSON. Accepts both alphabets and missing
/// padding.
fn decode_payload_segment(segment: &str) -> Result<Value, JwtError> {
    let mut normalized: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    let bytes = STANDARD
        .decode(normalized)
        .map_err(|_| JwtError::Malformed("payload is not base64"))?;
    let text = String::from_utf8(bytes).map_err(|_| JwtError::Malformed("payload is not UTF-8"))?;
    serde_json::from_str(&text).map_err(|_| JwtError::Malformed("payload is not JSON"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn claims(exp: i64) -> SessionClaims {
        SessionClaims {
            sub: "admin@civic.test".to_string(),
            role: "admin".to_string(),
            iat: NOW,
            exp,
            jti: None,
        }
    }

    fn segment(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn test_unsigned_round_trip() {
        let codec = TokenCodec::unsigned();
        let token = codec.encode(&claims(NOW + 60)).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert!(token.ends_with('.'));
        assert_eq!(codec.decode(&token, NOW).unwrap(), claims(NOW + 60));
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let codec = TokenCodec::unsigned();
        let at = |exp| codec.decode(&codec.encode(&claims(exp)).unwrap(), NOW);

        assert_eq!(at(NOW - 1), Err(JwtError::TokenExpired));
        assert_eq!(at(NOW), Err(JwtError::TokenExpired));
        assert!(at(NOW + 1).is_ok());
    }

    #[test]
    fn test_malformed_tokens_fail_closed() {
        let codec = TokenCodec::unsigned();

        assert!(matches!(
            codec.decode("no-dots-at-all", NOW),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(
            codec.decode("header.!!!not*base64!!!.", NOW),
            Err(JwtError::Malformed(_))
        ));
        let not_json = format!("h.{}.", segment("definitely not json"));
        assert!(matches!(codec.decode(&not_json, NOW), Err(JwtError::Malformed(_))));
        let no_exp = format!("h.{}.", segment(r#"{"sub":"admin@civic.test"}"#));
        assert_eq!(codec.decode(&no_exp, NOW), Err(JwtError::MissingExpiry));
        let string_exp = format!("h.{}.", segment(r#"{"exp":"9999999999"}"#));
        assert_eq!(codec.decode(&string_exp, NOW), Err(JwtError::MissingExpiry));
        assert!(codec.decode("", NOW).is_err());
        assert!(codec.decode(".", NOW).is_err());
    }

    #[test]
    fn test_two_segments_and_minimal_payload_are_accepted() {
        let codec = TokenCodec::unsigned();
        let token = format!("x.{}", segment(&format!(r#"{{"exp":{}}}"#, NOW + 10)));

        let claims = codec.decode(&token, NOW).unwrap();
        assert_eq!(claims.exp, NOW + 10);
        assert!(claims.sub.is_empty());
    }

    #[test]
    fn test_standard_alphabet_and_padding_are_tolerated() {
        let codec = TokenCodec::unsigned();
        let payload = format!(r#"{{"exp":{},"sub":"ops???@civic.test"}}"#, NOW + 10);
        let padded = STANDARD.encode(&payload);
        assert!(padded.contains('/') && padded.ends_with('='));

        let claims = codec.decode(&format!("h.{}.", padded), NOW).unwrap();
        assert_eq!(claims.sub, "ops???@civic.test");
    }

    #[test]
    fn test_fractional_expiry_compares_against_whole_seconds() {
        let codec = TokenCodec::unsigned();
        let token = format!("h.{}.", segment(&format!(r#"{{"exp":{}.5}}"#, NOW)));
        assert!(codec.decode(&token, NOW).is_ok());
        assert_eq!(codec.decode(&token, NOW + 1), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_signed_round_trip() {
        let codec = TokenCodec::hs256(b"test-secret");
        let token = codec.encode(&claims(NOW + 60)).unwrap();

        assert!(!token.ends_with('.'));
        assert_eq!(codec.decode(&token, NOW).unwrap(), claims(NOW + 60));
        assert_eq!(codec.decode(&token, NOW + 60), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_signed_codec_rejects_forgeries() {
        let signed = TokenCodec::hs256(b"test-secret");
        let token = signed.encode(&claims(NOW + 60)).unwrap();

        let other = TokenCodec::hs256(b"other-secret");
        assert_eq!(other.decode(&token, NOW), Err(JwtError::InvalidSignature));

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = segment(&format!(
            r#"{{"sub":"intruder@evil.test","role":"admin","iat":0,"exp":{}}}"#,
            NOW + 999_999
        ));
        parts[1] = &forged;
        assert_eq!(
            signed.decode(&parts.join("."), NOW),
            Err(JwtError::InvalidSignature)
        );

        let legacy = TokenCodec::unsigned().encode(&claims(NOW + 60)).unwrap();
        assert_eq!(signed.decode(&legacy, NOW), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_codec_debug_hides_keys() {
        assert_eq!(
            format!("{:?}", TokenCodec::hs256(b"top-secret")),
            "TokenCodec::Hs256 { .. }"
        );
    }
}
