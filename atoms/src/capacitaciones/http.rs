use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use std::collections::HashMap;

use super::model::{validate_fields, CreateCapacitacionPayload, UpdateCapacitacionPayload};
use super::service;
use crate::authz::{self, Action};
use crate::error::{auth_response, bad_request, store_response, validation_response, AuthError};
use crate::http::{json_response, no_content};
use crate::users::model::User;
use crate::users::service as users_service;

/// GET /capacitaciones - admin sees all records, staff their own.
pub async fn list_capacitaciones_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
) -> Result<Response<Body>, Error> {
    let (capacitaciones_result, users_result) = tokio::join!(
        service::list_capacitaciones(client, table_name, None),
        users_service::list_users(client, table_name)
    );

    let mut capacitaciones = match capacitaciones_result {
        Ok(c) => c,
        Err(e) => return store_response(&e),
    };
    capacitaciones.retain(|c| authz::can_view(current_user, &c.user_id));
    let users = match users_result {
        Ok(u) => u,
        Err(e) => return store_response(&e),
    };

    let by_id: HashMap<&str, &User> = users.iter().map(|u| (u.user_id.as_str(), u)).collect();
    for capacitacion in &mut capacitaciones {
        capacitacion.user = by_id
            .get(capacitacion.user_id.as_str())
            .map(|u| (*u).clone());
    }

    json_response(StatusCode::OK, &capacitaciones)
}

/// POST /capacitaciones - a professional records their own training; an
/// admin may record it on behalf of another user via `user_id`.
pub async fn create_capacitacion_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: CreateCapacitacionPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };

    let owner_user_id = payload
        .user_id
        .clone()
        .unwrap_or_else(|| current_user.user_id.clone());
    if !authz::can_mutate(current_user, &owner_user_id, Action::Create) {
        return auth_response(&AuthError::Forbidden);
    }

    if payload.nombre_curso.trim().is_empty() {
        return bad_request("el nombre del curso es requerido");
    }
    if payload.entidad.trim().is_empty() {
        return bad_request("la entidad es requerida");
    }
    if payload.nombre_profesional.trim().is_empty() {
        return bad_request("el nombre del profesional es requerido");
    }
    if let Err(e) = validate_fields(
        payload.fecha_inicio,
        payload.fecha_conclusion,
        payload.cantidad_horas,
        payload.costo,
    ) {
        return validation_response(&e);
    }

    match service::create_capacitacion(client, table_name, &owner_user_id, payload).await {
        Ok(capacitacion) => {
            tracing::info!(capacitacion_id = %capacitacion.id, "capacitacion created");
            json_response(StatusCode::CREATED, &capacitacion)
        }
        Err(e) => store_response(&e),
    }
}

/// PATCH /capacitaciones/{id} - admin-only.
pub async fn update_capacitacion_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: UpdateCapacitacionPayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => return bad_request(&format!("invalid request body: {}", e)),
    };

    let existing = match service::get_capacitacion(client, table_name, id).await {
        Ok(c) => c,
        Err(e) => return store_response(&e),
    };
    if !authz::can_mutate(current_user, &existing.user_id, Action::Update) {
        return auth_response(&AuthError::Forbidden);
    }

    let fecha_inicio = payload.fecha_inicio.unwrap_or(existing.fecha_inicio);
    let fecha_conclusion = payload.fecha_conclusion.or(existing.fecha_conclusion);
    let cantidad_horas = payload.cantidad_horas.or(existing.cantidad_horas);
    let costo = payload.costo.or(existing.costo);
    if let Err(e) = validate_fields(fecha_inicio, fecha_conclusion, cantidad_horas, costo) {
        return validation_response(&e);
    }

    match service::update_capacitacion(client, table_name, id, &payload).await {
        Ok(capacitacion) => json_response(StatusCode::OK, &capacitacion),
        Err(e) => store_response(&e),
    }
}

/// DELETE /capacitaciones/{id} - admin-only.
pub async fn delete_capacitacion_handler(
    client: &DynamoClient,
    table_name: &str,
    current_user: &User,
    id: &str,
) -> Result<Response<Body>, Error> {
    let existing = match service::get_capacitacion(client, table_name, id).await {
        Ok(c) => c,
        Err(e) => return store_response(&e),
    };
    if !authz::can_mutate(current_user, &existing.user_id, Action::Delete) {
        return auth_response(&AuthError::Forbidden);
    }

    match service::delete_capacitacion(client, table_name, id).await {
        Ok(()) => no_content(),
        Err(e) => store_response(&e),
    }
}
