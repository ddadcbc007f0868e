use crate::{AppState, LoginRequest};

use ms_auth::{AuthError, IssuedToken};
use ms_web::{ApiError, ApiResult};

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use metrics::counter;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<IssuedToken>> {
    let Json(request) = payload?;
    request.validate()?;

    match state.issuer.login(request.username.trim(), &request.password).await {
        Ok(issued) => {
            counter!("ms_auth_logins_total", "outcome" => "success").increment(1);
            Ok(Json(issued))
        }
        Err(e @ AuthError::AuthenticationFailed { .. }) => {
            counter!("ms_auth_logins_total", "outcome" => "failure").increment(1);
            Err(ApiError::from(e))
        }
        Err(e) => {
            counter!("ms_auth_logins_total", "outcome" => "error").increment(1);
            Err(ApiError::from(e))
        }
    }
}
