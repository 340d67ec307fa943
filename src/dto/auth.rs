use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn into_credentials(self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password,
        }
    }
}

impl RegisterForm {
    pub fn validate(self) -> AppResult<Credentials> {
        let username = self.username.trim().to_string();
        if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Username must be 1 to {USERNAME_MAX_LEN} characters"
            )));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {PASSWORD_MIN_LEN} characters"
            )));
        }
        if self
            .confirm_password
            .as_deref()
            .is_some_and(|confirm| confirm != self.password)
        {
            return Err(AppError::Validation("Passwords do not match".into()));
        }
        Ok(Credentials {
            username,
            password: self.password,
        })
    }
}
