use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;

use crate::error::{Error, Result};

const TOKEN_PREFIX: &str = "menulinx";
const SECRET_BYTES: usize = 16;

/// An admin token as handed to a restaurant owner: `menulinx_<slug>_<secret>`.
///
/// The slug travels inside the token, so a token presented on another
/// restaurant's routes is refused before any hashing. The stored hash covers
/// the slug as well as the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken {
    pub slug: String,
    pub secret: String,
}

impl AdminToken {
    /// Creates a token with a fresh random secret for `slug`.
    #[must_use]
    pub fn generate(slug: &str) -> Self {
        let mut bytes = [0u8; SECRET_BYTES];
        rand::thread_rng().fill(&mut bytes);
        Self {
            slug: slug.to_string(),
            secret: hex::encode(bytes),
        }
    }

    /// Parses a raw token. Slugs never contain `_`, so the last separator
    /// splits slug from secret.
    pub fn parse(raw: &str) -> Result<Self> {
        let rest = raw
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|r| r.strip_prefix('_'))
            .ok_or(Error::InvalidTokenFormat)?;
        let (slug, secret) = rest.rsplit_once('_').ok_or(Error::InvalidTokenFormat)?;

        let secret_ok =
            secret.len() == SECRET_BYTES * 2 && secret.bytes().all(|b| b.is_ascii_hexdigit());
        if slug.is_empty() || slug.contains('_') || !secret_ok {
            return Err(Error::InvalidTokenFormat);
        }

        Ok(Self {
            slug: slug.to_string(),
            secret: secret.to_string(),
        })
    }

    #[must_use]
    pub fn raw(&self) -> String {
        format!("{TOKEN_PREFIX}_{}_{}", self.slug, self.secret)
    }

    /// Argon2id PHC hash of the slug-bound secret.
    pub fn hash(&self) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(self.hashed_material().as_bytes(), &salt)
            .map_err(|e| Error::Config(format!("failed to hash token: {e}")))?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| Error::Config(format!("invalid hash format: {e}")))?;

        match Argon2::default().verify_password(self.hashed_material().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Config(format!("failed to verify token: {e}"))),
        }
    }

    fn hashed_material(&self) -> String {
        format!("{}:{}", self.slug, self.secret)
    }
}
