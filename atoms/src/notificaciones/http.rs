use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::UpdateNotificationSettingsPayload;
use super::service;
use crate::authz;
use crate::error::{auth_response, bad_request, store_response};
use crate::http::json_response;
use crate::users::model::{Role, User};

/// GET /notificaciones - admin-only.
pub async fn get_settings_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }
    match service::get_settings(client, table_name).await {
        Ok(settings) => json_response(StatusCode::OK, &settings),
        Err(e) => store_response(&e),
    }
}

/// PUT /notificaciones - admin-only upsert.
pub async fn update_settings_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    let payload: UpdateNotificationSettingsPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };
    if payload.is_active {
        let valid_email = payload
            .notification_email
            .as_deref()
            .is_some_and(|e| e.contains('@'));
        if !valid_email {
            return bad_request("se requiere un email válido para activar las notificaciones");
        }
    }

    match service::upsert_settings(client, table_name, payload).await {
        Ok(settings) => json_response(StatusCode::OK, &settings),
        Err(e) => store_response(&e),
    }
}
