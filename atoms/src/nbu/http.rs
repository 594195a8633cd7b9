use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::{validate_value, CreateNbuPayload};
use super::service;
use crate::authz;
use crate::error::{auth_response, bad_request, store_response, validation_response};
use crate::http::json_response;
use crate::users::model::{Role, User};

/// POST /nbu - admin publishes a new base value for a provider.
pub async fn create_nbu_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    if let Err(e) = authz::require_role(Some(current_user), Role::Admin) {
        return auth_response(&e);
    }

    let payload: CreateNbuPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };
    if let Err(e) = validate_value(payload.value) {
        return validation_response(&e);
    }

    match service::create_nbu(client, table_name, payload).await {
        Ok(nbu) => {
            tracing::info!(id_obrasocial = nbu.id_obrasocial, "nbu value published");
            json_response(StatusCode::CREATED, &nbu)
        }
        Err(e) => store_response(&e),
    }
}

/// GET /nbu/{id_obrasocial}/history
pub async fn nbu_history_handler(
    client: &DynamoClient,
    table_name: &str,
    id_obrasocial: i64,
) -> Result<Response<Body>, Error> {
    match service::list_nbu_history(client, table_name, id_obrasocial).await {
        Ok(history) => json_response(StatusCode::OK, &history),
        Err(e) => store_response(&e),
    }
}
