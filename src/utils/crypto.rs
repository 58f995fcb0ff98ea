use aes_gcm::{
    aead::{Aead, OsRng},
    AeadCore, Aes256Gcm, KeyInit,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encryption failed")]
    EncryptionFailed,
    #[error("Invalid encrypted data")]
    InvalidCiphertext,
}

/// Cipher for bank payout details. AES-256-GCM with a per-record random
/// nonce; the key is derived once from the configured secret and salt.
/// Stored format: `hex(nonce):hex(ciphertext)`.
#[derive(Clone)]
pub struct BankDetailCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for BankDetailCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankDetailCipher").finish()
    }
}

impl BankDetailCipher {
    pub fn new(secret: &str, salt: &str) -> Self {
        // HMAC accepts keys of any length, so this cannot fail.
        let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(salt.as_bytes());
        let key: [u8; 32] = mac.finalize().into_bytes().into();
        BankDetailCipher { key }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| CryptoError::EncryptionFailed)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        Ok(format!("{}:{}", hex::encode(nonce), hex::encode(ciphertext)))
    }

    pub fn decrypt(&self, encrypted: &str) -> Result<String, CryptoError> {
        let (nonce_part, data_part) = encrypted
            .split_once(':')
            .ok_or(CryptoError::InvalidCiphertext)?;

        let nonce_bytes = hex::decode(nonce_part).map_err(|_| CryptoError::InvalidCiphertext)?;
        if nonce_bytes.len() != 12 {
            return Err(CryptoError::InvalidCiphertext);
        }
        let ciphertext = hex::decode(data_part).map_err(|_| CryptoError::InvalidCiphertext)?;

        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| CryptoError::InvalidCiphertext)?;
        let plaintext = cipher
            .decrypt(aes_gcm::Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|_| CryptoError::InvalidCiphertext)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidCiphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> BankDetailCipher {
        BankDetailCipher::new("test-encryption-secret", "test-salt")
    }

    #[test]
    fn round_trip() {
        let c = cipher();
        let encrypted = c.encrypt("0123456789012").unwrap();
        assert_eq!(c.decrypt(&encrypted).unwrap(), "0123456789012");
    }

    #[test]
    fn nonce_is_random_per_record() {
        let c = cipher();
        let a = c.encrypt("same plaintext").unwrap();
        let b = c.encrypt("same plaintext").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let c = cipher();
        let encrypted = c.encrypt("account holder").unwrap();
        let mut chars: Vec<char> = encrypted.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '0' { '1' } else { '0' };
        let tampered: String = chars.into_iter().collect();
        assert!(c.decrypt(&tampered).is_err());
    }

    #[test]
    fn different_keys_cannot_decrypt() {
        let a = BankDetailCipher::new("secret-a", "salt");
        let b = BankDetailCipher::new("secret-b", "salt");
        let encrypted = a.encrypt("Holder Name").unwrap();
        assert!(b.decrypt(&encrypted).is_err());
    }

    #[test]
    fn malformed_input_is_rejected() {
        let c = cipher();
        assert!(c.decrypt("no-separator").is_err());
        assert!(c.decrypt("zz:zz").is_err());
        assert!(c.decrypt("abcd:1234").is_err());
    }
}
