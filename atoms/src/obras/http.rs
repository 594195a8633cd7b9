use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::CreateObraSocialPayload;
use super::service;
use crate::authz;
use crate::error::{auth_response, bad_request, store_response};
use crate::http::json_response;
use crate::users::model::{Role, User};

/// GET /obras-sociales - provider select for the NBU form.
pub async fn list_obras_handler(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Response<Body>, Error> {
    match service::list_obras_sociales(client, table_name).await {
        Ok(obras) => json_response(StatusCode::OK, &obras),
        Err(e) => store_response(&e),
    }
}

/// POST /obras-sociales - admin-only.
pub async fn create_obra_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    let payload: CreateObraSocialPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };
    if payload.nameprovider.trim().is_empty() {
        return bad_request("el nombre del proveedor es requerido");
    }

    match service::create_obra_social(client, table_name, payload).await {
        Ok(obra) => json_response(StatusCode::CREATED, &obra),
        Err(e) => store_response(&e),
    }
}
