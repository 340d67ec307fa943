use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use tower_sessions::Session;

use crate::{
    dto::auth::{LoginForm, RegisterForm},
    middleware::{
        auth::{self as session_auth, AuthUser, LOGIN_PATH, MaybeAuthUser},
        session::{Flash, FlashLevel, push_flash, take_flashes},
    },
    routes::pages::{PageResult, recover, render},
    services::auth_service::{authenticate, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<AuthUser>,
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<AuthUser>,
    pub flashes: Vec<Flash>,
}

pub async fn login_form(
    MaybeAuthUser(user): MaybeAuthUser,
    session: Session,
) -> PageResult<Html<String>> {
    let template = LoginTemplate {
        current_user: user,
        flashes: take_flashes(&session).await?,
    };
    Ok(render(&template)?)
}

pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> PageResult<Redirect> {
    match authenticate(&state, form.into_credentials()).await {
        Ok(user) => {
            let username = user.username.clone();
            session_auth::login(&session, AuthUser::from(user)).await?;
            push_flash(&session, FlashLevel::Success, format!("Welcome, {username}!")).await?;
            Ok(Redirect::to("/inventory"))
        }
        Err(err) => {
            recover(&session, err).await?;
            Ok(Redirect::to(LOGIN_PATH))
        }
    }
}

pub async fn register_form(
    MaybeAuthUser(user): MaybeAuthUser,
    session: Session,
) -> PageResult<Html<String>> {
    let template = RegisterTemplate {
        current_user: user,
        flashes: take_flashes(&session).await?,
    };
    Ok(render(&template)?)
}

pub async fn register(
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> PageResult<Redirect> {
    let registered = match form.validate() {
        Ok(credentials) => register_user(&state, credentials).await,
        Err(err) => Err(err),
    };

    match registered {
        Ok(_) => {
            push_flash(
                &session,
                FlashLevel::Success,
                "Account created. Please log in.",
            )
            .await?;
            Ok(Redirect::to(LOGIN_PATH))
        }
        Err(err) => {
            recover(&session, err).await?;
            Ok(Redirect::to("/auth/register"))
        }
    }
}

pub async fn logout(session: Session) -> PageResult<Redirect> {
    session_auth::logout(&session).await?;
    push_flash(&session, FlashLevel::Success, "You have been logged out.").await?;
    Ok(Redirect::to("/"))
}
