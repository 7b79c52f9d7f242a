use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{AuthResponse, JwtKeys, LoginRequest, PublicProfile, RefreshRequest},
        jwt::AuthUser,
        password::{is_valid_email, verify_password},
        repo::Accounts,
        repo_types::User,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = match state.store.find_user_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let response = issue_tokens(&state, user).await?;
    info!(user_id = %response.user.id, "user logged in");
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, format!("{}", e)))?;

    let user = load_user(&state, claims.sub).await?;
    Ok(Json(issue_tokens(&state, user).await?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicProfile>, (StatusCode, String)> {
    let user = load_user(&state, user_id).await?;
    Ok(Json(public_profile(&state, user).await?))
}

async fn load_user(state: &AppState, user_id: Uuid) -> Result<User, (StatusCode, String)> {
    match state.store.find_user(user_id).await {
        Ok(Some(u)) => Ok(u),
        Ok(None) => {
            warn!(user_id = %user_id, "user not found");
            Err((StatusCode::UNAUTHORIZED, "User not found".into()))
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_user failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

async fn public_profile(
    state: &AppState,
    user: User,
) -> Result<PublicProfile, (StatusCode, String)> {
    let profile = state
        .store
        .find_profile(user.id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(PublicProfile {
        id: user.id,
        email: user.email,
        role: profile.as_ref().map(|p| p.role),
        full_name: profile.and_then(|p| p.full_name),
    })
}

async fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(user.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let refresh_token = keys.sign_refresh(user.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: public_profile(state, user).await?,
    })
}
