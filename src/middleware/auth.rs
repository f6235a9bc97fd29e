use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Resolved request identity, inserted as a request extension so handlers
/// receive it explicitly instead of reading ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> crate::error::Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| crate::error::Error::Unauthorized("Malformed subject claim".to_string()))
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn decode_bearer(req: &Request) -> Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(unauthorized("missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(unauthorized("bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized("unsupported_scheme"));
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized("invalid_token"))
}

async fn require_roles(mut req: Request, next: Next, allowed: &[&str]) -> Response {
    let claims = match decode_bearer(&req) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };

    let role = claims.role.clone().unwrap_or_default();
    if !allowed.iter().any(|r| r.eq_ignore_ascii_case(&role)) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" }))).into_response();
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}

pub async fn require_hr_or_admin(req: Request, next: Next) -> Response {
    require_roles(req, next, &["superadmin", "hr"]).await
}

/// Interviewers may record evaluations but cannot manage invites or jobs.
pub async fn require_staff(req: Request, next: Next) -> Response {
    require_roles(req, next, &["superadmin", "hr", "interviewer"]).await
}
