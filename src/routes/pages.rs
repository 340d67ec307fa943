use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;

use crate::{
    error::{AppError, AppResult},
    middleware::{
        auth::{AuthUser, MaybeAuthUser},
        session::{Flash, FlashLevel, push_flash, take_flashes},
    },
};

/// Error wrapper for HTML handlers: renders an error page instead of the
/// JSON envelope used by the API.
#[derive(Debug)]
pub struct PageError(pub AppError);

pub type PageResult<T> = Result<T, PageError>;

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    current_user: Option<AuthUser>,
    flashes: Vec<Flash>,
    status: u16,
    message: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = if status.is_server_error() {
            tracing::error!(error = ?self.0, "page request failed");
            "Something went wrong. Please try again.".to_string()
        } else {
            self.0.to_string()
        };

        let template = ErrorTemplate {
            current_user: None,
            flashes: Vec::new(),
            status: status.as_u16(),
            message,
        };
        match template.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "error page render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

/// Turn a domain error into a flash message. Infrastructure errors are
/// handed back to the caller.
pub async fn recover(session: &Session, err: AppError) -> AppResult<()> {
    if err.is_recoverable() {
        push_flash(session, FlashLevel::Error, format!("Error: {err}")).await
    } else {
        Err(err)
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub current_user: Option<AuthUser>,
    pub flashes: Vec<Flash>,
}

pub async fn home(MaybeAuthUser(user): MaybeAuthUser, session: Session) -> PageResult<Html<String>> {
    let template = HomeTemplate {
        current_user: user,
        flashes: take_flashes(&session).await?,
    };
    Ok(render(&template)?)
}
