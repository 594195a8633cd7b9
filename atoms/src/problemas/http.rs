use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use std::collections::HashMap;

use super::model::CreateProblemaPayload;
use super::service;
use crate::authz;
use crate::error::{auth_response, bad_request, store_response};
use crate::http::{json_response, no_content};
use crate::users::model::{Role, User};
use crate::users::service as users_service;

/// GET /problemas - admin-only; biochemist rows joined in for the table.
pub async fn list_problemas_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    let (problemas_result, users_result) = tokio::join!(
        service::list_problemas(client, table_name),
        users_service::list_users(client, table_name)
    );

    let mut problemas = match problemas_result {
        Ok(p) => p,
        Err(e) => return store_response(&e),
    };
    let users = match users_result {
        Ok(u) => u,
        Err(e) => return store_response(&e),
    };

    let by_id: HashMap<&str, &User> = users.iter().map(|u| (u.user_id.as_str(), u)).collect();
    for problema in &mut problemas {
        problema.biochemist = problema
            .biochemist_id
            .as_deref()
            .and_then(|id| by_id.get(id))
            .map(|u| (*u).clone());
    }

    json_response(StatusCode::OK, &problemas)
}

/// POST /problemas - admin-only.
pub async fn create_problema_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    let payload: CreateProblemaPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };
    if payload.descripcion.trim().is_empty() {
        return bad_request("la descripción es requerida");
    }

    match service::create_problema(client, table_name, &current_user.user_id, payload).await {
        Ok(problema) => {
            tracing::info!(problema_id = %problema.id, "problema reported");
            json_response(StatusCode::CREATED, &problema)
        }
        Err(e) => store_response(&e),
    }
}

/// DELETE /problemas/{id} - admin-only.
pub async fn delete_problema_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    id: &str,
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    match service::delete_problema(client, table_name, id).await {
        Ok(()) => no_content(),
        Err(e) => store_response(&e),
    }
}
