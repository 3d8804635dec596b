//! Session Token Codec
//!
//! Encodes identity claims into a tamper-evident, stateless token:
//!
//! ```text
//! base64url(JSON claims) "." base64url(HMAC-SHA256(secret, encoded payload))
//! ```
//!
//! The delimiter `.` is outside the base64url alphabet, so splitting is
//! unambiguous. The MAC guarantees integrity and authenticity only: the
//! payload is readable by anyone holding the token, and the codec
//! performs no expiry check. Token lifetime is bounded solely by the
//! cookie Max-Age, so a captured token string stays verifiable until
//! the secret rotates.

use serde::{Deserialize, Serialize};

use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

use crate::domain::entity::user::User;

/// Identity claims embedded in the session token
///
/// Recomputed from the User record at login; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    pub matricule: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl SessionClaims {
    /// Build claims from a stored user
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.user_id.as_i64(),
            matricule: user.matricule.as_str().to_string(),
            name: user.name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }

    /// Full display name, as captured on submitted requests
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Signs and verifies session tokens with a process-wide secret
#[derive(Clone)]
pub struct SessionTokenCodec {
    secret: [u8; 32],
}

impl SessionTokenCodec {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Encode claims into a signed token
    pub fn encode(&self, claims: &SessionClaims) -> String {
        let payload =
            serde_json::to_vec(claims).expect("claims contain no non-serializable values");
        let payload_b64 = to_base64url(&payload);
        let mac = hmac_sha256(&self.secret, payload_b64.as_bytes());

        format!("{}.{}", payload_b64, to_base64url(&mac))
    }

    /// Decode and verify a token
    ///
    /// Any failure (missing or extra delimiter, invalid encoding, MAC
    /// mismatch, malformed payload) yields `None`. The payload is never
    /// parsed before the MAC has been verified.
    pub fn decode(&self, token: &str) -> Option<SessionClaims> {
        let (payload_b64, mac_b64) = token.split_once('.')?;
        if mac_b64.contains('.') {
            return None;
        }

        let received_mac = from_base64url(mac_b64).ok()?;
        let expected_mac = hmac_sha256(&self.secret, payload_b64.as_bytes());
        if !constant_time_eq(&expected_mac, &received_mac) {
            return None;
        }

        let payload = from_base64url(payload_b64).ok()?;
        serde_json::from_slice(&payload).ok()
    }
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims {
            user_id: 1,
            matricule: "A123".to_string(),
            name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            email: "a@x.edu".to_string(),
        }
    }

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new([42u8; 32])
    }

    #[test]
    fn test_roundtrip() {
        let codec = codec();
        let token = codec.encode(&claims());
        assert_eq!(codec.decode(&token), Some(claims()));
    }

    #[test]
    fn test_token_shape() {
        let token = codec().encode(&claims());
        assert_eq!(token.matches('.').count(), 1);
    }

    #[test]
    fn test_flipped_payload_byte_rejected() {
        let codec = codec();
        let token = codec.encode(&claims());
        let (payload, mac) = token.split_once('.').unwrap();

        let mut bytes = payload.as_bytes().to_vec();
        bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", String::from_utf8(bytes).unwrap(), mac);

        assert_eq!(codec.decode(&tampered), None);
    }

    #[test]
    fn test_flipped_mac_byte_rejected() {
        let codec = codec();
        let token = codec.encode(&claims());
        let (payload, mac) = token.split_once('.').unwrap();

        let mut bytes = mac.as_bytes().to_vec();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = format!("{}.{}", payload, String::from_utf8(bytes).unwrap());

        assert_eq!(codec.decode(&tampered), None);
    }

    #[test]
    fn test_missing_delimiter_rejected() {
        let codec = codec();
        let token = codec.encode(&claims()).replace('.', "");
        assert_eq!(codec.decode(&token), None);
        assert_eq!(codec.decode(""), None);
    }

    #[test]
    fn test_extra_delimiter_rejected() {
        let codec = codec();
        let token = format!("{}.x", codec.encode(&claims()));
        assert_eq!(codec.decode(&token), None);
    }

    #[test]
    fn test_garbage_rejected_without_panic() {
        let codec = codec();
        assert_eq!(codec.decode("not a token"), None);
        assert_eq!(codec.decode("!!!.???"), None);
        assert_eq!(codec.decode("."), None);
    }

    #[test]
    fn test_valid_mac_over_non_json_payload_rejected() {
        let codec = codec();
        // Correctly signed, but the payload is not a claims document
        let payload_b64 = to_base64url(b"[1,2,3]");
        let mac = hmac_sha256(&[42u8; 32], payload_b64.as_bytes());
        let token = format!("{}.{}", payload_b64, to_base64url(&mac));
        assert_eq!(codec.decode(&token), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().encode(&claims());
        let other = SessionTokenCodec::new([43u8; 32]);
        assert_eq!(other.decode(&token), None);
    }
}
