use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use std::collections::HashMap;

use super::model::{CreateRecesoPayload, Receso, UpdateRecesoPayload};
use super::service;
use super::validate::validate_leave_request;
use crate::authz::{self, Action};
use crate::error::{auth_response, bad_request, store_response, validation_response, AuthError};
use crate::http::{json_response, no_content};
use crate::users::model::User;
use crate::users::service as users_service;

/// GET /recesos - admins see every request, staff only their own. The
/// owner row is joined in for the admin table.
pub async fn list_recesos_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
) -> Result<Response<Body>, Error> {
    let (recesos_result, users_result) = tokio::join!(
        service::list_recesos(client, table_name),
        users_service::list_users(client, table_name)
    );

    let mut recesos = match recesos_result {
        Ok(r) => r,
        Err(e) => return store_response(&e),
    };
    recesos.retain(|r| authz::can_view(current_user, &r.user_id));
    let users = match users_result {
        Ok(u) => u,
        Err(e) => return store_response(&e),
    };

    let by_id: HashMap<&str, &User> = users.iter().map(|u| (u.user_id.as_str(), u)).collect();
    for receso in &mut recesos {
        receso.user = by_id.get(receso.user_id.as_str()).map(|u| (*u).clone());
    }

    json_response(StatusCode::OK, &recesos)
}

/// POST /recesos - staff request leave for themselves; the interval is
/// validated against the configured business-day cap first.
pub async fn create_receso_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    max_business_days: i64,
    body: &[u8],
) -> Result<(Response<Body>, Option<Receso>), Error> {
    let payload: CreateRecesoPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return Ok((bad_request(&format!("invalid request body: {}", e))?, None)),
    };

    if !authz::can_mutate(current_user, &current_user.user_id, Action::Create) {
        return Ok((auth_response(&AuthError::Forbidden)?, None));
    }

    let calendar_days =
        match validate_leave_request(payload.start_date, payload.end_date, max_business_days) {
            Ok(days) => days,
            Err(e) => return Ok((validation_response(&e)?, None)),
        };

    match service::create_receso(
        client,
        table_name,
        &current_user.user_id,
        payload.start_date,
        payload.end_date,
        payload.comments,
    )
    .await
    {
        Ok(receso) => {
            tracing::info!(
                receso_id = %receso.id,
                user_id = %receso.user_id,
                calendar_days,
                "receso created"
            );
            let resp = json_response(StatusCode::CREATED, &receso)?;
            Ok((resp, Some(receso)))
        }
        Err(e) => Ok((store_response(&e)?, None)),
    }
}

/// PATCH /recesos/{id} - admin-only. The merged interval is re-validated
/// with the same cap as creation.
pub async fn update_receso_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    id: &str,
    max_business_days: i64,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: UpdateRecesoPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };

    let existing = match service::get_receso(client, table_name, id).await {
        Ok(r) => r,
        Err(e) => return store_response(&e),
    };
    if !authz::can_mutate(current_user, &existing.user_id, Action::Update) {
        return auth_response(&AuthError::Forbidden);
    }

    let start = payload.start_date.unwrap_or(existing.start_date);
    let end = payload.end_date.unwrap_or(existing.end_date);
    if let Err(e) = validate_leave_request(start, end, max_business_days) {
        return validation_response(&e);
    }

    match service::update_receso(client, table_name, id, &payload).await {
        Ok(receso) => json_response(StatusCode::OK, &receso),
        Err(e) => store_response(&e),
    }
}

/// DELETE /recesos/{id} - admin-only.
pub async fn delete_receso_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    id: &str,
) -> Result<Response<Body>, Error> {
    let existing = match service::get_receso(client, table_name, id).await {
        Ok(r) => r,
        Err(e) => return store_response(&e),
    };
    if !authz::can_mutate(current_user, &existing.user_id, Action::Delete) {
        return auth_response(&AuthError::Forbidden);
    }

    match service::delete_receso(client, table_name, id).await {
        Ok(()) => no_content(),
        Err(e) => store_response(&e),
    }
}
