//! Cookie-based session auth. Sessions are items in the same table as the
//! domain data; the authenticated user is threaded through handlers as an
//! explicit [`AuthContext`] rather than ambient global state.

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Deserialize;

use salvay_atoms::error::StoreError;
use salvay_atoms::users::model::User;
use salvay_atoms::users::{password, service as users_service};

pub const SESSION_COOKIE: &str = "salvay_session";
const SESSION_TTL_SECONDS: i64 = 43_200; // 12 h

/// The authenticated caller plus any cookies the response must set.
pub struct AuthContext {
    pub user: User,
    pub set_cookies: Vec<String>,
}

#[derive(Deserialize)]
struct LoginPayload {
    user_name: String,
    password: String,
}

fn new_session_token() -> String {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn cookie_value(cookie_header: Option<&str>, name: &str) -> Option<String> {
    cookie_header?
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

pub fn build_cookie(name: &str, value: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Secure; SameSite=None; Max-Age={}",
        name, value, SESSION_TTL_SECONDS
    )
}

pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; Secure; SameSite=None; Max-Age=0", name)
}

fn session_expired(expires_at: &str, now: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(expires_at) {
        Ok(t) => t < now,
        // An unreadable expiry fails closed.
        Err(_) => true,
    }
}

fn unauthorized(message: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("unauthorized")))
}

async fn put_session(
    client: &DynamoClient,
    table_name: &str,
    token: &str,
    user_id: &str,
) -> Result<(), StoreError> {
    let expires_at = (Utc::now() + chrono::Duration::seconds(SESSION_TTL_SECONDS)).to_rfc3339();
    client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(format!("SESSION#{}", token)))
        .item("SK", AttributeValue::S(format!("SESSION#{}", token)))
        .item("user_id", AttributeValue::S(user_id.to_string()))
        .item("expires_at", AttributeValue::S(expires_at))
        .send()
        .await
        .map_err(StoreError::store)?;
    Ok(())
}

async fn delete_session(client: &DynamoClient, table_name: &str, token: &str) {
    let result = client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(format!("SESSION#{}", token)))
        .key("SK", AttributeValue::S(format!("SESSION#{}", token)))
        .send()
        .await;
    if let Err(e) = result {
        tracing::warn!("failed to delete session: {}", e);
    }
}

/// Resolve the session cookie to a user. On any failure the caller gets a
/// ready-made 401 response to return as-is.
pub async fn authenticate_request(
    client: &DynamoClient,
    table_name: &str,
    cookie_header: Option<&str>,
) -> Result<AuthContext, Response<Body>> {
    let Some(token) = cookie_value(cookie_header, SESSION_COOKIE) else {
        return Err(unauthorized("usuario no autenticado"));
    };

    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(format!("SESSION#{}", token)))
        .key("SK", AttributeValue::S(format!("SESSION#{}", token)))
        .send()
        .await
        .map_err(|e| {
            tracing::error!("session lookup failed: {}", e);
            unauthorized("usuario no autenticado")
        })?;

    let Some(item) = result.item() else {
        return Err(unauthorized("sesión expirada"));
    };
    let expires_at = item
        .get("expires_at")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();
    if session_expired(&expires_at, Utc::now()) {
        delete_session(client, table_name, &token).await;
        return Err(unauthorized("sesión expirada"));
    }
    let Some(user_id) = item
        .get("user_id")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
    else {
        return Err(unauthorized("sesión expirada"));
    };

    let user = users_service::get_user(client, table_name, &user_id)
        .await
        .map_err(|e| {
            tracing::error!("session user lookup failed: {}", e);
            unauthorized("usuario no autenticado")
        })?;

    Ok(AuthContext {
        user,
        set_cookies: vec![],
    })
}

/// POST /login - verify credentials and open a session.
pub async fn login(
    client: &DynamoClient,
    table_name: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: LoginPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(_) => {
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .body(
                    serde_json::json!({"error": "invalid request body"})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
    };

    let credentials =
        users_service::find_credentials(client, table_name, &payload.user_name).await;
    let (user, stored_hash) = match credentials {
        Ok(Some(pair)) => pair,
        Ok(None) => return Ok(unauthorized("usuario o contraseña incorrectos")),
        Err(e) => {
            tracing::error!("credential lookup failed: {}", e);
            return Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(serde_json::json!({"error": e.to_string()}).to_string().into())
                .map_err(Box::new)?);
        }
    };

    if !password::verify_password(&payload.password, &stored_hash) {
        return Ok(unauthorized("usuario o contraseña incorrectos"));
    }

    let token = new_session_token();
    if let Err(e) = put_session(client, table_name, &token, &user.user_id).await {
        tracing::error!("session creation failed: {}", e);
        return Ok(Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header("Content-Type", "application/json")
            .body(serde_json::json!({"error": e.to_string()}).to_string().into())
            .map_err(Box::new)?);
    }

    tracing::info!(user_id = %user.user_id, "user signed in");
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Set-Cookie", build_cookie(SESSION_COOKIE, &token))
        .body(serde_json::to_string(&user)?.into())
        .map_err(Box::new)?)
}

/// POST /logout - drop the session and clear the cookie.
pub async fn logout(
    client: &DynamoClient,
    table_name: &str,
    cookie_header: Option<&str>,
) -> Result<Response<Body>, Error> {
    if let Some(token) = cookie_value(cookie_header, SESSION_COOKIE) {
        delete_session(client, table_name, &token).await;
    }

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Set-Cookie", clear_cookie(SESSION_COOKIE))
        .body(serde_json::json!({"message": "ok"}).to_string().into())
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_the_named_cookie() {
        let header = Some("theme=dark; salvay_session=abc123; other=1");
        assert_eq!(
            cookie_value(header, SESSION_COOKIE),
            Some("abc123".to_string())
        );
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value(None, SESSION_COOKIE), None);
    }

    #[test]
    fn build_and_clear_cookie_shape() {
        let cookie = build_cookie(SESSION_COOKIE, "tok");
        assert!(cookie.starts_with("salvay_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        let cleared = clear_cookie(SESSION_COOKIE);
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn expiry_check_fails_closed_on_garbage() {
        let now = Utc::now();
        assert!(session_expired("not-a-date", now));
        assert!(session_expired("2020-01-01T00:00:00Z", now));
        let future = (now + chrono::Duration::hours(1)).to_rfc3339();
        assert!(!session_expired(&future, now));
    }

    #[test]
    fn session_tokens_are_unique_and_url_safe() {
        let a = new_session_token();
        let b = new_session_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
