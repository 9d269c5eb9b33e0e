use axum::{
    extract::{FromRef, State},
    routing::post,
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, TokenResponse},
        jwt::JwtKeys,
        password::verify_password,
    },
    error::ApiError,
    state::AppState,
    users::repo::User,
};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Password login. Unknown email and wrong password produce the same
/// `InvalidCredentials` outcome so accounts cannot be enumerated.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &form.username)
        .await?
        .ok_or_else(|| {
            warn!(email = %form.username, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&form.password, &user.password)? {
        warn!(email = %form.username, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.issue(&user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(TokenResponse::bearer(access_token)))
}
