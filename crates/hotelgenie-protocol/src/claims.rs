//! Unverified reading of a credential's JWT payload.
//!
//! A JWT is three base64url segments joined by dots:
//! `header.payload.signature`. We read the claims but never check the
//! signature. Nothing here grants access: the claims only let the session
//! layer skip a validation call for a token that is obviously stale.

use std::sync::LazyLock;

use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;

use crate::{Credential, ProtocolError};

/// Decodes without checking the signature or any registered claim.
/// Expiry is judged by the caller, in milliseconds.
static UNVERIFIED: LazyLock<Validation> = LazyLock::new(|| {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
});

/// The claims we care about. Everything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiration, in seconds since the Unix epoch. Some issuers emit a
    /// fractional value, so this is an `f64`.
    #[serde(default)]
    pub exp: Option<f64>,

    /// Subject (usually the account email). Informational only.
    #[serde(default)]
    pub sub: Option<String>,
}

impl Claims {
    /// The expiration instant in milliseconds since the epoch, if present.
    pub fn expires_at_millis(&self) -> Option<f64> {
        self.exp.filter(|exp| exp.is_finite()).map(|exp| exp * 1000.0)
    }
}

/// Decodes the claims of `credential` without verifying anything.
///
/// The token must be a complete `header.payload.signature` JWT whose
/// header names an algorithm; the signature itself may be anything.
///
/// # Errors
/// [`ProtocolError::MalformedToken`] if the token isn't a JWT or its
/// payload isn't a JSON object of the expected shape.
pub fn decode_claims(credential: &Credential) -> Result<Claims, ProtocolError> {
    jsonwebtoken::decode::<Claims>(credential.as_str(), &DecodingKey::from_secret(&[]), &UNVERIFIED)
        .map(|data| data.claims)
        .map_err(|e| ProtocolError::MalformedToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    /// Builds an unsigned token around the given JSON payload.
    fn token_with_payload(json: &str) -> Credential {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(json);
        Credential::new(format!("{header}.{payload}.c2lnbmF0dXJl"))
    }

    #[test]
    fn test_decode_claims_reads_exp_and_sub() {
        let cred = token_with_payload(r#"{"sub":"guest@example.com","exp":1700000000}"#);

        let claims = decode_claims(&cred).expect("should decode");

        assert_eq!(claims.exp, Some(1_700_000_000.0));
        assert_eq!(claims.sub.as_deref(), Some("guest@example.com"));
        assert_eq!(claims.expires_at_millis(), Some(1_700_000_000_000.0));
    }

    #[test]
    fn test_decode_claims_fractional_exp() {
        let cred = token_with_payload(r#"{"exp":5.5}"#);
        assert_eq!(decode_claims(&cred).unwrap().expires_at_millis(), Some(5_500.0));
    }

    #[test]
    fn test_decode_claims_ignores_signature_and_audience() {
        let cred = token_with_payload(r#"{"exp":5,"aud":"someone-else","nbf":99999999999}"#);
        assert_eq!(decode_claims(&cred).unwrap().exp, Some(5.0));
    }

    #[test]
    fn test_decode_claims_missing_exp_is_none() {
        let cred = token_with_payload(r#"{"sub":"x"}"#);
        assert_eq!(decode_claims(&cred).unwrap().expires_at_millis(), None);
    }

    #[test]
    fn test_decode_claims_missing_signature_segment_is_malformed() {
        let full = token_with_payload(r#"{"exp":4102444800}"#);
        let (unsigned, _) = full.as_str().rsplit_once('.').unwrap();

        let result = decode_claims(&Credential::new(unsigned));

        assert!(matches!(result, Err(ProtocolError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_claims_header_without_alg_is_malformed() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let payload = URL_SAFE_NO_PAD.encode(r#"{"exp":5}"#);
        let result = decode_claims(&Credential::new(format!("{header}.{payload}.sig")));
        assert!(matches!(result, Err(ProtocolError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_claims_bad_base64_is_malformed() {
        let result = decode_claims(&Credential::new("a.!!!.c"));
        assert!(matches!(result, Err(ProtocolError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_claims_non_json_payload_is_malformed() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode("not json");
        let result = decode_claims(&Credential::new(format!("{header}.{payload}.s")));
        assert!(matches!(result, Err(ProtocolError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_claims_string_exp_is_malformed() {
        let cred = token_with_payload(r#"{"exp":"tomorrow"}"#);
        assert!(matches!(decode_claims(&cred), Err(ProtocolError::MalformedToken(_))));
    }
}
