//! Access token validation.
//!
//! Access tokens are three-segment signed tokens (`header.claims.signature`).
//! The client is not the issuer and never checks the signature: it only reads
//! the `exp` claim so that an expired token fails before any request is sent.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use serde_json::Value;
use std::fmt;

use crate::error::{ChatError, ChatResult};

/// Ready-to-send `Authorization` header value (`Bearer <token>`).
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    /// The full header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Keep tokens out of logs.
impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthHeader(Bearer ***)")
    }
}

/// Validate `token` against the current wall-clock time.
pub fn validate(token: &str) -> ChatResult<AuthHeader> {
    validate_at(token, chrono::Utc::now().timestamp())
}

/// Validate `token` as of `now` (seconds since the Unix epoch).
///
/// Fails with [`ChatError::InvalidCredential`] if the token does not have
/// three segments or its middle segment is not base64url-encoded JSON
/// object, and with [`ChatError::CredentialExpired`] if its `exp` claim is
/// strictly before `now`. A token without a numeric `exp` never expires.
pub fn validate_at(token: &str, now: i64) -> ChatResult<AuthHeader> {
    let claims = decode_claims(token)?;

    if let Some(exp) = claims.get("exp").and_then(Value::as_f64) {
        if exp < now as f64 {
            return Err(ChatError::CredentialExpired {
                expired_at: exp.floor() as i64,
            });
        }
    }

    Ok(AuthHeader(format!("Bearer {}", token)))
}

/// Decode the claims segment of `token` into a JSON object.
pub fn decode_claims(token: &str) -> ChatResult<serde_json::Map<String, Value>> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ChatError::invalid_credential(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let padded = pad_base64(segments[1]);
    let bytes = URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| ChatError::invalid_credential(format!("claims are not base64url: {e}")))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(_) => Err(ChatError::invalid_credential("claims are not a JSON object")),
        Err(e) => Err(ChatError::invalid_credential(format!(
            "claims are not JSON: {e}"
        ))),
    }
}

/// Append `=` until the length is a multiple of 4.
fn pad_base64(segment: &str) -> String {
    let mut padded = segment.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    const NOW: i64 = 1_700_000_000;

    fn token_with_claims(claims: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims);
        let signature = URL_SAFE_NO_PAD.encode("fake-signature");
        format!("{}.{}.{}", header, payload, signature)
    }

    #[test]
    fn test_future_exp_is_valid() {
        let token = token_with_claims(&format!(r#"{{"exp":{}}}"#, NOW + 3600));
        let header = validate_at(&token, NOW).unwrap();
        assert_eq!(header.as_str(), format!("Bearer {}", token));
    }

    #[test]
    fn test_exp_equal_to_now_is_still_valid() {
        let token = token_with_claims(&format!(r#"{{"exp":{}}}"#, NOW));
        assert!(validate_at(&token, NOW).is_ok());
    }

    #[test]
    fn test_past_exp_is_expired() {
        let token = token_with_claims(&format!(r#"{{"exp":{}}}"#, NOW - 1));
        assert_eq!(
            validate_at(&token, NOW),
            Err(ChatError::CredentialExpired {
                expired_at: NOW - 1
            })
        );
    }

    #[test]
    fn test_fractional_exp() {
        let token = token_with_claims(&format!(r#"{{"exp":{}.5}}"#, NOW - 10));
        assert!(matches!(
            validate_at(&token, NOW),
            Err(ChatError::CredentialExpired { .. })
        ));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let token = token_with_claims(r#"{"sub":"user-1"}"#);
        assert!(validate_at(&token, NOW).is_ok());
        assert!(validate_at(&token, i64::MAX).is_ok());
    }

    #[test]
    fn test_every_padding_length_decodes() {
        // Claims of varying length exercise 0, 1 and 2 missing pad chars.
        for sub in ["a", "ab", "abc", "abcd"] {
            let token = token_with_claims(&format!(r#"{{"sub":"{}"}}"#, sub));
            assert!(validate_at(&token, NOW).is_ok(), "sub = {}", sub);
        }
    }

    #[test]
    fn test_already_padded_claims_decode() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let payload = URL_SAFE.encode(r#"{"sub":"a"}"#);
        let token = format!("{}.{}.sig", header, payload);
        assert!(payload.ends_with('='));
        assert!(validate_at(&token, NOW).is_ok());
    }

    #[test]
    fn test_wrong_segment_count() {
        for token in ["", "not-a-token", "only.two", "a.b.c.d"] {
            assert!(
                matches!(
                    validate_at(token, NOW),
                    Err(ChatError::InvalidCredential { .. })
                ),
                "token = {:?}",
                token
            );
        }
    }

    #[test]
    fn test_malformed_claims_are_invalid_for_any_length() {
        let bad_segments = [
            "!",
            "!!",
            "!!!",
            "!!!!",
            "bm90LWpzb24",       // "not-json"
            "bm90LWpzb24x",      // "not-json1"
            "bm90LWpzb24xMg",    // "not-json12"
            "bm90LWpzb24xMjM",   // "not-json123"
            "NDI",               // "42", JSON but not an object
            "a",                 // impossible length
        ];
        for segment in bad_segments {
            let token = format!("aGVhZGVy.{}.c2ln", segment);
            assert!(
                matches!(
                    validate_at(&token, NOW),
                    Err(ChatError::InvalidCredential { .. })
                ),
                "segment = {:?}",
                segment
            );
        }
    }

    #[test]
    fn test_validate_uses_wall_clock() {
        let far_future = chrono::Utc::now().timestamp() + 86_400;
        let token = token_with_claims(&format!(r#"{{"exp":{}}}"#, far_future));
        assert!(validate(&token).is_ok());

        let token = token_with_claims(r#"{"exp":1000}"#);
        assert!(matches!(
            validate(&token),
            Err(ChatError::CredentialExpired { expired_at: 1000 })
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let token = token_with_claims(r#"{"sub":"secret"}"#);
        let header = validate_at(&token, NOW).unwrap();
        assert!(!format!("{:?}", header).contains(&token));
    }
}
