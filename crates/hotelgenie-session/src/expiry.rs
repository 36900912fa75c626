//! Local expiry check for a stored credential.
//!
//! This is an optimization, not a gate: it lets the controller skip the
//! validation round-trip for a credential that is obviously stale. A
//! credential that passes here still has to be accepted by the backend.

use std::time::{SystemTime, UNIX_EPOCH};

use hotelgenie_protocol::{Credential, decode_claims};

/// Milliseconds since the Unix epoch, from the local system clock.
///
/// A clock set before 1970 reads as zero.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Returns `true` if `credential` is expired right now.
///
/// See [`is_expired_at`] for the rules.
pub fn is_expired(credential: &Credential) -> bool {
    is_expired_at(credential, now_millis())
}

/// Returns `true` if `credential` is expired at `now_millis`.
///
/// The credential is expired iff `exp * 1000 < now_millis`: the expiry
/// instant itself still counts as valid, and there is no skew allowance.
///
/// Fails closed: a credential that can't be decoded, or has no numeric
/// `exp` claim, is reported as expired.
pub fn is_expired_at(credential: &Credential, now_millis: u64) -> bool {
    let claims = match decode_claims(credential) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "credential unreadable, treating as expired");
            return true;
        }
    };

    match claims.expires_at_millis() {
        Some(expires_at) => expires_at < now_millis as f64,
        None => {
            tracing::debug!("credential has no exp claim, treating as expired");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    fn token_expiring_at(exp_secs: i64) -> Credential {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"a@b.c","exp":{exp_secs}}}"#));
        Credential::new(format!("{header}.{payload}.sig"))
    }

    fn now_secs() -> i64 {
        (now_millis() / 1000) as i64
    }

    #[test]
    fn test_is_expired_past_exp_returns_true() {
        assert!(is_expired(&token_expiring_at(now_secs() - 10)));
        assert!(is_expired(&token_expiring_at(1)));
    }

    #[test]
    fn test_is_expired_future_exp_returns_false() {
        assert!(!is_expired(&token_expiring_at(now_secs() + 1)));
        assert!(!is_expired(&token_expiring_at(now_secs() + 3600)));
    }

    #[test]
    fn test_is_expired_at_boundary_is_exclusive() {
        let cred = token_expiring_at(1_000);

        // exp * 1000 == now → not yet expired.
        assert!(!is_expired_at(&cred, 1_000_000));
        // One millisecond later → expired.
        assert!(is_expired_at(&cred, 1_000_001));
    }

    #[test]
    fn test_is_expired_fractional_exp() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"exp":1000.5}"#);
        let cred = Credential::new(format!("{header}.{payload}.s"));

        assert!(!is_expired_at(&cred, 1_000_400));
        assert!(is_expired_at(&cred, 1_000_501));
    }

    #[test]
    fn test_is_expired_malformed_token_fails_closed() {
        assert!(is_expired(&Credential::new("not-a-jwt")));
        assert!(is_expired(&Credential::new("")));
        assert!(is_expired(&Credential::new("a.%%%.c")));
    }

    #[test]
    fn test_is_expired_unsigned_token_fails_closed() {
        // header.payload with no signature segment, even with a future exp.
        let full = token_expiring_at(now_secs() + 3600);
        let (unsigned, _) = full.as_str().rsplit_once('.').unwrap();

        assert!(is_expired(&Credential::new(unsigned)));
    }

    #[test]
    fn test_is_expired_ignores_foreign_audience() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"aud":"another-service","exp":2000}"#);
        let cred = Credential::new(format!("{header}.{payload}.not-a-real-signature"));

        assert!(!is_expired_at(&cred, 2_000_000));
        assert!(is_expired_at(&cred, 2_000_001));
    }

    #[test]
    fn test_is_expired_missing_exp_fails_closed() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"a@b.c"}"#);
        let cred = Credential::new(format!("{header}.{payload}.s"));

        assert!(is_expired_at(&cred, 0));
    }
}
