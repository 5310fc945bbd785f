use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checks the hex digest from `x-razorpay-signature` against an HMAC-SHA256
/// over the raw body bytes. Must run on the bytes as received: re-serializing
/// the parsed payload is not guaranteed byte-identical. `verify_slice` does a
/// constant-time comparison, so direct string equality is avoided.
pub fn signature_matches(body: &[u8], signature: &str, secret: &str) -> bool {
    let Ok(claimed) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mut hmac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    hmac.update(body);
    hmac.verify_slice(&claimed).is_ok()
}

#[cfg(test)]
pub(crate) fn sign(body: &[u8], secret: &str) -> String {
    let mut hmac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    hmac.update(body);
    hex::encode(hmac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_own_digest() {
        let body = br#"{"event":"payment.captured","amount":10000}"#;
        let signature = sign(body, "whsec-test");
        assert!(signature_matches(body, &signature, "whsec-test"));
    }

    #[test]
    fn rejects_mutated_body() {
        let body = br#"{"event":"payment.captured","amount":10000}"#;
        let signature = sign(body, "whsec-test");

        for i in 0..body.len() {
            let mut mutated = body.to_vec();
            mutated[i] ^= 0x01;
            assert!(
                !signature_matches(&mutated, &signature, "whsec-test"),
                "mutation at byte {i} still verified"
            );
        }
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = b"payload";
        let signature = sign(body, "whsec-test");
        assert!(!signature_matches(body, &signature, "other-secret"));
    }

    #[test]
    fn rejects_empty_or_non_hex_signature() {
        let body = b"payload";
        assert!(!signature_matches(body, "", "whsec-test"));
        assert!(!signature_matches(body, "not hex at all", "whsec-test"));
    }

    #[test]
    fn rejects_truncated_digest() {
        let body = b"payload";
        let signature = sign(body, "whsec-test");
        assert!(!signature_matches(body, &signature[..32], "whsec-test"));
    }
}
