//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: key material on disk and an
//! independent verifier for the tokens the issuer produces.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use notiflux_token_core::{Claims, SUBJECT};
use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use tempfile::TempDir;

/// Fixed key material, generated once with OpenSSL.
pub mod keys {
    /// P-256 private key, PKCS#8 (`openssl genpkey`).
    pub const P256_PKCS8: &str = include_str!("../keys/p256_pkcs8.pem");
    /// The same key as [`P256_PKCS8`], SEC1 (`openssl ec`).
    pub const P256_SEC1: &str = include_str!("../keys/p256_sec1.pem");
    /// Public half of [`P256_PKCS8`] / [`P256_SEC1`].
    pub const P256_PUBLIC: &str = include_str!("../keys/p256_public.pem");
    /// P-256 SEC1 key preceded by an `EC PARAMETERS` block (`openssl ecparam -genkey`).
    pub const P256_WITH_PARAMS: &str = include_str!("../keys/p256_with_params.pem");
    /// Public half of [`P256_WITH_PARAMS`].
    pub const P256_WITH_PARAMS_PUBLIC: &str = include_str!("../keys/p256_with_params_public.pem");
    /// An unrelated P-256 public key.
    pub const OTHER_P256_PUBLIC: &str = include_str!("../keys/other_p256_public.pem");
    /// A P-384 private key (wrong curve).
    pub const P384_PKCS8: &str = include_str!("../keys/p384_pkcs8.pem");
    /// An RSA private key (not an EC key).
    pub const RSA_PKCS8: &str = include_str!("../keys/rsa_pkcs8.pem");
}

/// File name the fixture writes its private key to.
pub const KEY_FILE_NAME: &str = "private_key.pem";

/// A temporary directory holding a private key, plus the matching public key.
pub struct TestFixture {
    dir: TempDir,
    private_pem: String,
    public_pem: String,
}

impl TestFixture {
    /// Fixture using the fixed PKCS#8 P-256 key.
    pub fn new() -> Self {
        Self::with_keys(keys::P256_PKCS8, keys::P256_PUBLIC)
    }

    /// Fixture using the given PEM texts.
    pub fn with_keys(private_pem: &str, public_pem: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join(KEY_FILE_NAME), private_pem).expect("failed to write key");
        Self {
            dir,
            private_pem: private_pem.to_owned(),
            public_pem: public_pem.to_owned(),
        }
    }

    /// Fixture with a freshly generated P-256 key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let private_pem = signing_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("failed to encode private key");
        let public_pem = VerifyingKey::from(&signing_key)
            .to_public_key_pem(LineEnding::LF)
            .expect("failed to encode public key");
        Self::with_keys(&private_pem, &public_pem)
    }

    /// The temporary directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the written private key file.
    pub fn key_path(&self) -> PathBuf {
        self.dir.path().join(KEY_FILE_NAME)
    }

    /// A path inside the fixture directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.dir.path().join("does-not-exist.pem")
    }

    /// Write an extra file into the fixture directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write fixture file");
        path
    }

    /// The private key PEM text.
    pub fn private_pem(&self) -> &str {
        &self.private_pem
    }

    /// The public key PEM text.
    pub fn public_pem(&self) -> &str {
        &self.public_pem
    }

    /// The private key PEM, base64-encoded for `NOTIFLUX_PRIVATE_KEY_B64`.
    pub fn private_key_b64(&self) -> String {
        general_purpose::STANDARD.encode(&self.private_pem)
    }

    /// Verify a token against this fixture's public key.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        reference_verify(token, &self.public_pem)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Verify a token the way the notiflux broker does: ES256 only, `exp`
/// required and in the future, `sub` must be `notiflux`.
pub fn reference_verify(
    token: &str,
    public_pem: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_ec_pem(public_pem.as_bytes())?;
    let mut validation = Validation::new(Algorithm::ES256);
    validation.sub = Some(SUBJECT.to_owned());
    jsonwebtoken::decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

/// Decode the payload segment without checking the signature.
pub fn decode_payload_unverified(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Flip one bit of the decoded signature byte at `index` (mod 64) and
/// re-encode the token.
pub fn tamper_signature(token: &str, index: usize) -> String {
    let (signing_input, signature_b64) = token
        .rsplit_once('.')
        .expect("token has a signature segment");
    let mut signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .expect("signature is base64url");
    let i = index % signature.len();
    signature[i] ^= 0x01;
    format!(
        "{signing_input}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}
