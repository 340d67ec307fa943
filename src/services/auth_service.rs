use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    dto::auth::Credentials,
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    models::User,
    state::AppState,
};

pub async fn register_user(state: &AppState, credentials: Credentials) -> AppResult<User> {
    let Credentials { username, password } = credentials;

    let mut active = UserActive {
        id: NotSet,
        username: Set(username.clone()),
        password_hash: NotSet,
    };
    active.set_password(&password)?;

    let write = state.write_guard().await;
    let exist = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let user = active.insert(&state.orm).await?;
    drop(write);

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(User::from(user))
}

/// Look up `username` and verify the password. Unknown users and wrong
/// passwords produce the same error.
pub async fn authenticate(state: &AppState, credentials: Credentials) -> AppResult<User> {
    let user = Users::find()
        .filter(UserCol::Username.eq(credentials.username.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) if u.check_password(&credentials.password) => u,
        _ => {
            tracing::info!(username = %credentials.username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }
    };

    tracing::info!(user_id = user.id, "user logged in");
    Ok(User::from(user))
}
