use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::model::{Capacitacion, CapacitacionEstado, CreateCapacitacionPayload, UpdateCapacitacionPayload};
use crate::error::StoreError;

fn parse_capacitacion(item: &HashMap<String, AttributeValue>) -> Option<Capacitacion> {
    let id = item
        .get("SK")
        .and_then(|v| v.as_s().ok())
        .and_then(|sk| sk.strip_prefix("CAPACITACION#"))?
        .to_string();
    let fecha_inicio = item
        .get("fecha_inicio")
        .and_then(|v| v.as_s().ok())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())?;
    let estado = item
        .get("estado")
        .and_then(|v| v.as_s().ok())
        .and_then(|s| CapacitacionEstado::parse(s))
        .unwrap_or(CapacitacionEstado::Pendiente);
    Some(Capacitacion {
        id,
        user_id: item
            .get("user_id")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        nombre_curso: item
            .get("nombre_curso")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        programa: item
            .get("programa")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        entidad: item
            .get("entidad")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        nombre_profesional: item
            .get("nombre_profesional")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        fecha_inicio,
        fecha_conclusion: item
            .get("fecha_conclusion")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        cantidad_horas: item
            .get("cantidad_horas")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok()),
        costo: item
            .get("costo")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok()),
        estado,
        documentacion_impacto: item
            .get("documentacion_impacto")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        created_at: item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        user: None,
    })
}

pub async fn list_capacitaciones(
    client: &DynamoClient,
    table_name: &str,
    owner_filter: Option<&str>,
) -> Result<Vec<Capacitacion>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S("CAPACITACION".to_string()))
        .expression_attribute_values(
            ":sk_prefix",
            AttributeValue::S("CAPACITACION#".to_string()),
        )
        .send()
        .await
        .map_err(StoreError::store)?;

    let mut capacitaciones: Vec<Capacitacion> = result
        .items()
        .iter()
        .filter_map(parse_capacitacion)
        .filter(|c| owner_filter.map_or(true, |owner| c.user_id == owner))
        .collect();
    capacitaciones.sort_by(|a, b| b.fecha_inicio.cmp(&a.fecha_inicio));
    Ok(capacitaciones)
}

pub async fn get_capacitacion(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
) -> Result<Capacitacion, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("CAPACITACION".to_string()))
        .key("SK", AttributeValue::S(format!("CAPACITACION#{}", id)))
        .send()
        .await
        .map_err(StoreError::store)?;

    result
        .item()
        .and_then(parse_capacitacion)
        .ok_or(StoreError::NotFound)
}

pub async fn create_capacitacion(
    client: &DynamoClient,
    table_name: &str,
    owner_user_id: &str,
    payload: CreateCapacitacionPayload,
) -> Result<Capacitacion, StoreError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let mut builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S("CAPACITACION".to_string()))
        .item("SK", AttributeValue::S(format!("CAPACITACION#{}", id)))
        .item("user_id", AttributeValue::S(owner_user_id.to_string()))
        .item("nombre_curso", AttributeValue::S(payload.nombre_curso.clone()))
        .item("entidad", AttributeValue::S(payload.entidad.clone()))
        .item(
            "nombre_profesional",
            AttributeValue::S(payload.nombre_profesional.clone()),
        )
        .item(
            "fecha_inicio",
            AttributeValue::S(payload.fecha_inicio.to_string()),
        )
        .item(
            "estado",
            AttributeValue::S(payload.estado.as_str().to_string()),
        )
        .item("created_at", AttributeValue::S(now.clone()));

    if let Some(programa) = &payload.programa {
        builder = builder.item("programa", AttributeValue::S(programa.clone()));
    }
    if let Some(conclusion) = payload.fecha_conclusion {
        builder = builder.item("fecha_conclusion", AttributeValue::S(conclusion.to_string()));
    }
    if let Some(horas) = payload.cantidad_horas {
        builder = builder.item("cantidad_horas", AttributeValue::N(horas.to_string()));
    }
    if let Some(costo) = payload.costo {
        builder = builder.item("costo", AttributeValue::N(costo.to_string()));
    }
    if let Some(impacto) = &payload.documentacion_impacto {
        builder = builder.item("documentacion_impacto", AttributeValue::S(impacto.clone()));
    }

    builder.send().await.map_err(StoreError::store)?;

    Ok(Capacitacion {
        id,
        user_id: owner_user_id.to_string(),
        nombre_curso: payload.nombre_curso,
        programa: payload.programa,
        entidad: payload.entidad,
        nombre_profesional: payload.nombre_profesional,
        fecha_inicio: payload.fecha_inicio,
        fecha_conclusion: payload.fecha_conclusion,
        cantidad_horas: payload.cantidad_horas,
        costo: payload.costo,
        estado: payload.estado,
        documentacion_impacto: payload.documentacion_impacto,
        created_at: now,
        user: None,
    })
}

pub async fn update_capacitacion(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
    payload: &UpdateCapacitacionPayload,
) -> Result<Capacitacion, StoreError> {
    let mut update_expr = vec![];
    let mut expr_names = HashMap::new();
    let mut expr_values = HashMap::new();

    if let Some(nombre) = &payload.nombre_curso {
        update_expr.push("nombre_curso = :nombre_curso");
        expr_values.insert(":nombre_curso".to_string(), AttributeValue::S(nombre.clone()));
    }
    if let Some(programa) = &payload.programa {
        update_expr.push("programa = :programa");
        expr_values.insert(":programa".to_string(), AttributeValue::S(programa.clone()));
    }
    if let Some(entidad) = &payload.entidad {
        update_expr.push("entidad = :entidad");
        expr_values.insert(":entidad".to_string(), AttributeValue::S(entidad.clone()));
    }
    if let Some(profesional) = &payload.nombre_profesional {
        update_expr.push("nombre_profesional = :nombre_profesional");
        expr_values.insert(
            ":nombre_profesional".to_string(),
            AttributeValue::S(profesional.clone()),
        );
    }
    if let Some(inicio) = payload.fecha_inicio {
        update_expr.push("fecha_inicio = :fecha_inicio");
        expr_values.insert(":fecha_inicio".to_string(), AttributeValue::S(inicio.to_string()));
    }
    if let Some(conclusion) = payload.fecha_conclusion {
        update_expr.push("fecha_conclusion = :fecha_conclusion");
        expr_values.insert(
            ":fecha_conclusion".to_string(),
            AttributeValue::S(conclusion.to_string()),
        );
    }
    if let Some(horas) = payload.cantidad_horas {
        update_expr.push("cantidad_horas = :cantidad_horas");
        expr_values.insert(":cantidad_horas".to_string(), AttributeValue::N(horas.to_string()));
    }
    if let Some(costo) = payload.costo {
        update_expr.push("costo = :costo");
        expr_values.insert(":costo".to_string(), AttributeValue::N(costo.to_string()));
    }
    if let Some(estado) = payload.estado {
        update_expr.push("#estado = :estado");
        expr_names.insert("#estado".to_string(), "estado".to_string());
        expr_values.insert(
            ":estado".to_string(),
            AttributeValue::S(estado.as_str().to_string()),
        );
    }
    if let Some(impacto) = &payload.documentacion_impacto {
        update_expr.push("documentacion_impacto = :documentacion_impacto");
        expr_values.insert(
            ":documentacion_impacto".to_string(),
            AttributeValue::S(impacto.clone()),
        );
    }

    if !update_expr.is_empty() {
        let mut builder = client
            .update_item()
            .table_name(table_name)
            .key("PK", AttributeValue::S("CAPACITACION".to_string()))
            .key("SK", AttributeValue::S(format!("CAPACITACION#{}", id)))
            .condition_expression("attribute_exists(PK)")
            .update_expression(format!("SET {}", update_expr.join(", ")));
        for (k, v) in expr_names {
            builder = builder.expression_attribute_names(k, v);
        }
        for (k, v) in expr_values {
            builder = builder.expression_attribute_values(k, v);
        }
        if let Err(e) = builder.send().await {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                return Err(StoreError::NotFound);
            }
            return Err(StoreError::store(service_err));
        }
    }

    get_capacitacion(client, table_name, id).await
}

pub async fn delete_capacitacion(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
) -> Result<(), StoreError> {
    client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("CAPACITACION".to_string()))
        .key("SK", AttributeValue::S(format!("CAPACITACION#{}", id)))
        .send()
        .await
        .map_err(StoreError::store)?;
    Ok(())
}
