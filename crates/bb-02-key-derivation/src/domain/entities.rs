//! # Derived Keys

use shared_crypto::{sha256, BlsKeyPair, PUBLIC_KEY_BYTES};
use shared_types::BLS_WITHDRAWAL_PREFIX;

/// A validator's key pair and withdrawal credentials.
///
/// The secret half lives inside `keypair` and is zeroized when dropped; it
/// never reaches the encoded state.
pub struct ValidatorKey {
    pub index: u64,
    pub keypair: BlsKeyPair,
    pub withdrawal_credentials: [u8; 32],
}

impl ValidatorKey {
    pub fn new(index: u64, keypair: BlsKeyPair) -> Self {
        let withdrawal_credentials = withdrawal_credentials(&keypair.public_key().to_bytes());
        Self {
            index,
            keypair,
            withdrawal_credentials,
        }
    }

    /// Compressed public key.
    pub fn pubkey(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.keypair.public_key().to_bytes()
    }
}

impl std::fmt::Debug for ValidatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorKey")
            .field("index", &self.index)
            .field("pubkey", &hex::encode(self.pubkey()))
            .finish_non_exhaustive()
    }
}

/// `0x00 || SHA-256(pubkey)[1..]`
pub fn withdrawal_credentials(pubkey: &[u8; PUBLIC_KEY_BYTES]) -> [u8; 32] {
    let mut credentials = sha256(pubkey);
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    credentials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_credentials_prefix() {
        let pubkey = [0xAA; PUBLIC_KEY_BYTES];
        let credentials = withdrawal_credentials(&pubkey);
        assert_eq!(credentials[0], BLS_WITHDRAWAL_PREFIX);
        assert_eq!(credentials[1..], sha256(&pubkey)[1..]);
    }
}
