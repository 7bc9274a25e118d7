use reth_rpc_layer::JwtSecret;

/// Builds the 32-byte JWT secret used to authenticate against EE1, from
/// whatever length of raw secret bytes the configuration supplied.
///
/// Shorter secrets are right-padded with zeros, longer ones truncated. An
/// empty secret is not treated as "no auth": it becomes the single sentinel
/// byte `0x7B` followed by zeros, matching the fallback the upstream geth
/// link has always used when no secret file was configured.
pub fn build_jwt_secret(raw: &[u8]) -> JwtSecret {
    let mut bytes = [0u8; 32];
    if raw.is_empty() {
        bytes[0] = 0x7B;
    } else {
        let n = raw.len().min(32);
        bytes[..n].copy_from_slice(&raw[..n]);
    }
    JwtSecret::from_hex(hex::encode(bytes)).expect("32-byte secret is always valid hex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_uses_sentinel_byte() {
        let secret = build_jwt_secret(&[]);
        let expected = {
            let mut b = [0u8; 32];
            b[0] = 0x7B;
            JwtSecret::from_hex(hex::encode(b)).unwrap()
        };
        assert_eq!(secret.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn short_secret_is_zero_padded() {
        let secret = build_jwt_secret(&[1, 2, 3]);
        let mut expected = [0u8; 32];
        expected[0] = 1;
        expected[1] = 2;
        expected[2] = 3;
        assert_eq!(secret.as_bytes(), &expected);
    }

    #[test]
    fn long_secret_is_truncated() {
        let raw = [9u8; 40];
        let secret = build_jwt_secret(&raw);
        assert_eq!(secret.as_bytes(), &[9u8; 32]);
    }
}
