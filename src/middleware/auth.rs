use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    error::{AppError, AppResult},
    middleware::session::session_keys,
    models::User,
};

pub const LOGIN_PATH: &str = "/auth/login";

/// Identity stored in the session after a successful login. Extracting it
/// requires an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
        }
    }
}

/// Pages redirect to the login form; `/api` requests get a bare 401.
pub enum AuthRejection {
    RedirectToLogin,
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => AppError::Unauthorized.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers see a stripped path; the original one tells API
        // calls apart from page requests.
        let is_api = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(parts.uri.path(), |original| original.path())
            .starts_with("/api/");
        let rejection = || {
            if is_api {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            }
        };

        let session = parts.extensions.get::<Session>().ok_or_else(rejection)?;

        session
            .get::<AuthUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(rejection)
    }
}

/// The logged-in user, if any. Never rejects.
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<AuthUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };
        Ok(Self(user))
    }
}

/// Start an authenticated session, rotating the session id.
pub async fn login(session: &Session, user: AuthUser) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await?;
    Ok(())
}

pub async fn logout(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}
