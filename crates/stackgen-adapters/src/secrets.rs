//! Secret material adapter.
//!
//! Hex secrets come from the OS RNG. VAPID keypairs prefer the `web-push`
//! CLI (via `npx`) so the keys are real P-256 material; when the tool is
//! unavailable the adapter falls back to random base64url strings, which is
//! enough for a development `.env` and never fails the run.

use std::process::Command;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use serde_json::Value;
use tracing::{debug, warn};

use stackgen_core::application::ports::{SecretProvider, VapidKeypair};

/// OS-randomness backed secret provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSecrets;

impl OsRandomSecrets {
    pub fn new() -> Self {
        Self
    }

    fn vapid_from_tool(&self) -> Option<VapidKeypair> {
        let output = Command::new("npx")
            .args(["--yes", "web-push", "generate-vapid-keys", "--json"])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let parsed: Value = serde_json::from_slice(&output.stdout).ok()?;
        let public_key = parsed.get("publicKey")?.as_str()?.to_string();
        let private_key = parsed.get("privateKey")?.as_str()?.to_string();
        debug!("VAPID keypair generated by web-push CLI");
        Some(VapidKeypair {
            public_key,
            private_key,
        })
    }

    fn vapid_fallback(&self) -> VapidKeypair {
        warn!("web-push CLI unavailable, generating fallback VAPID material");
        let mut public = [0u8; 65];
        let mut private = [0u8; 32];
        OsRng.fill_bytes(&mut public);
        OsRng.fill_bytes(&mut private);
        VapidKeypair {
            public_key: URL_SAFE_NO_PAD.encode(public),
            private_key: URL_SAFE_NO_PAD.encode(private),
        }
    }
}

impl SecretProvider for OsRandomSecrets {
    fn secure_key(&self, bytes: usize) -> String {
        let mut buf = vec![0u8; bytes];
        OsRng.fill_bytes(&mut buf);
        let mut out = String::with_capacity(bytes * 2);
        for byte in buf {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    fn vapid_keypair(&self) -> VapidKeypair {
        self.vapid_from_tool()
            .unwrap_or_else(|| self.vapid_fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_key_is_hex_of_requested_length() {
        let secrets = OsRandomSecrets::new();
        let key = secrets.secure_key(64);
        assert_eq!(key.len(), 128);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn secure_key_never_repeats() {
        let secrets = OsRandomSecrets::new();
        assert_ne!(secrets.secure_key(32), secrets.secure_key(32));
    }

    #[test]
    fn vapid_fallback_yields_distinct_base64url_keys() {
        let secrets = OsRandomSecrets::new();
        let pair = secrets.vapid_fallback();
        assert_ne!(pair.public_key, pair.private_key);
        for key in [&pair.public_key, &pair.private_key] {
            assert!(!key.is_empty());
            assert!(key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
