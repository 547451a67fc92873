use std::fmt::{Debug, Formatter};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Argon2 PHC string of a user's password. The plain password never leaves `hash`/`verify`.
#[derive(Clone, PartialEq, Eq, Fromln, AsRefln)]
pub struct UserPassword(String);

impl UserPassword {
    /// Wraps a hash that was already produced by [`UserPassword::hash`], e.g. one read back from storage.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn hash(raw: &str) -> error_stack::Result<Self, KernelError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|error| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Failed to hash password: {error}"))
            })
    }

    pub fn verify(&self, raw: &str) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(raw.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Debug for UserPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserPassword(..)")
    }
}
