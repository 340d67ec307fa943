use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveValue::Set, entity::prelude::*};

use crate::error::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
}

impl Model {
    /// Verify `password` against the stored Argon2 hash. A hash that cannot be
    /// parsed never matches.
    pub fn check_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl ActiveModel {
    /// Hash `password` with a fresh salt and stage it for saving.
    pub fn set_password(&mut self, password: &str) -> AppResult<()> {
        self.password_hash = Set(hash_password(password)?);
        Ok(())
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> Model {
        Model {
            id: 1,
            username: "clerk".into(),
            password_hash: hash_password(password).unwrap(),
        }
    }

    #[test]
    fn same_password_verifies() {
        let user = user_with_password("s3cret-pass");
        assert!(user.check_password("s3cret-pass"));
    }

    #[test]
    fn different_password_is_rejected() {
        let user = user_with_password("s3cret-pass");
        assert!(!user.check_password("s3cret-pasS"));
        assert!(!user.check_password(""));
    }

    #[test]
    fn hash_never_contains_plaintext_and_is_salted() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert!(!a.contains("hunter22"));
        assert!(a.starts_with("$argon2"));
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_never_matches() {
        let user = Model {
            id: 1,
            username: "clerk".into(),
            password_hash: "not-a-phc-string".into(),
        };
        assert!(!user.check_password("not-a-phc-string"));
    }

    #[test]
    fn set_password_stages_hash() {
        let mut active = ActiveModel {
            username: Set("clerk".into()),
            ..Default::default()
        };
        active.set_password("pa55word").unwrap();
        let staged = active.password_hash.clone().unwrap();
        let user = Model {
            id: 1,
            username: "clerk".into(),
            password_hash: staged,
        };
        assert!(user.check_password("pa55word"));
    }
}
