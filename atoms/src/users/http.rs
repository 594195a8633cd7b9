use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::{CreateUserPayload, Role, User};
use super::service;
use crate::authz;
use crate::error::{auth_response, bad_request, store_response};
use crate::http::json_response;

/// POST /users - admin creates a staff or admin account.
pub async fn create_user_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    let payload: CreateUserPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };
    if payload.user_name.trim().is_empty() {
        return bad_request("el nombre de usuario es requerido");
    }
    if payload.password.len() < 6 {
        return bad_request("la contraseña debe tener al menos 6 caracteres");
    }

    match service::create_user(client, table_name, payload).await {
        Ok(user) => {
            tracing::info!(user_id = %user.user_id, "user created");
            json_response(StatusCode::CREATED, &user)
        }
        Err(e) => store_response(&e),
    }
}

/// GET /users/me
pub async fn get_me_handler(current_user: &User) -> Result<Response<Body>, Error> {
    json_response(StatusCode::OK, current_user)
}

/// GET /users - admin-only listing for the administración page.
pub async fn list_users_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }
    match service::list_users(client, table_name).await {
        Ok(users) => json_response(StatusCode::OK, &users),
        Err(e) => store_response(&e),
    }
}
