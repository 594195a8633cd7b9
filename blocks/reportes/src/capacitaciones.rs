use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use salvay_atoms::capacitaciones::model::{Capacitacion, CapacitacionEstado};
use salvay_atoms::capacitaciones::service as capacitaciones_service;

use crate::types::{CapacitacionesReport, EstadoBreakdown};

const ESTADOS: [CapacitacionEstado; 4] = [
    CapacitacionEstado::Pendiente,
    CapacitacionEstado::EnCurso,
    CapacitacionEstado::Concluido,
    CapacitacionEstado::Cancelado,
];

/// Count, hours and cost grouped by estado, in the fixed chart order.
pub fn breakdown_by_estado(capacitaciones: &[Capacitacion]) -> Vec<EstadoBreakdown> {
    ESTADOS
        .iter()
        .map(|estado| {
            let matching = capacitaciones.iter().filter(|c| c.estado == *estado);
            let mut cantidad = 0;
            let mut total_horas = 0.0;
            let mut total_costo = 0.0;
            for c in matching {
                cantidad += 1;
                total_horas += c.cantidad_horas.unwrap_or(0.0);
                total_costo += c.costo.unwrap_or(0.0);
            }
            EstadoBreakdown {
                estado: estado.as_str().to_string(),
                cantidad,
                total_horas,
                total_costo,
            }
        })
        .collect()
}

/// GET /capacitaciones/reporte - chart data for the capacitaciones page.
pub async fn capacitaciones_report(
    client: &DynamoClient,
    table_name: &str,
    owner_filter: Option<&str>,
) -> Result<Response<Body>, Error> {
    let capacitaciones =
        capacitaciones_service::list_capacitaciones(client, table_name, owner_filter)
            .await
            .map_err(|e| Error::from(e.to_string()))?;

    let report = CapacitacionesReport {
        total: capacitaciones.len(),
        por_estado: breakdown_by_estado(&capacitaciones),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(&report)?.into())
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn capacitacion(estado: CapacitacionEstado, horas: Option<f64>, costo: Option<f64>) -> Capacitacion {
        Capacitacion {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            nombre_curso: "curso".to_string(),
            programa: None,
            entidad: "entidad".to_string(),
            nombre_profesional: "prof".to_string(),
            fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            fecha_conclusion: None,
            cantidad_horas: horas,
            costo,
            estado,
            documentacion_impacto: None,
            created_at: String::new(),
            user: None,
        }
    }

    #[test]
    fn groups_hours_and_cost_by_estado() {
        let rows = vec![
            capacitacion(CapacitacionEstado::Concluido, Some(10.0), Some(100.0)),
            capacitacion(CapacitacionEstado::Concluido, Some(5.0), None),
            capacitacion(CapacitacionEstado::Pendiente, None, Some(50.0)),
        ];

        let breakdown = breakdown_by_estado(&rows);
        assert_eq!(breakdown.len(), 4);
        let concluido = breakdown.iter().find(|b| b.estado == "Concluido").unwrap();
        assert_eq!(concluido.cantidad, 2);
        assert_eq!(concluido.total_horas, 15.0);
        assert_eq!(concluido.total_costo, 100.0);
        let cancelado = breakdown.iter().find(|b| b.estado == "Cancelado").unwrap();
        assert_eq!(cancelado.cantidad, 0);
    }
}
