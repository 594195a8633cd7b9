use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::users::model::User;

/// Unordered status set; any value is settable by an authorised caller,
/// no transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacitacionEstado {
    Pendiente,
    #[serde(rename = "En curso")]
    EnCurso,
    Concluido,
    Cancelado,
}

impl CapacitacionEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacitacionEstado::Pendiente => "Pendiente",
            CapacitacionEstado::EnCurso => "En curso",
            CapacitacionEstado::Concluido => "Concluido",
            CapacitacionEstado::Cancelado => "Cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<CapacitacionEstado> {
        match s {
            "Pendiente" => Some(CapacitacionEstado::Pendiente),
            "En curso" => Some(CapacitacionEstado::EnCurso),
            "Concluido" => Some(CapacitacionEstado::Concluido),
            "Cancelado" => Some(CapacitacionEstado::Cancelado),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Capacitacion {
    pub id: String,
    pub user_id: String,
    pub nombre_curso: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programa: Option<String>,
    pub entidad: String,
    pub nombre_profesional: String,
    pub fecha_inicio: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_conclusion: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad_horas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costo: Option<f64>,
    pub estado: CapacitacionEstado,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentacion_impacto: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCapacitacionPayload {
    /// Admins may create on behalf of another professional; absent means
    /// the caller owns the record.
    pub user_id: Option<String>,
    pub nombre_curso: String,
    pub programa: Option<String>,
    pub entidad: String,
    pub nombre_profesional: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_conclusion: Option<NaiveDate>,
    pub cantidad_horas: Option<f64>,
    pub costo: Option<f64>,
    pub estado: CapacitacionEstado,
    pub documentacion_impacto: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCapacitacionPayload {
    pub nombre_curso: Option<String>,
    pub programa: Option<String>,
    pub entidad: Option<String>,
    pub nombre_profesional: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_conclusion: Option<NaiveDate>,
    pub cantidad_horas: Option<f64>,
    pub costo: Option<f64>,
    pub estado: Option<CapacitacionEstado>,
    pub documentacion_impacto: Option<String>,
}

pub const MAX_HORAS: f64 = 9999.0;
pub const MAX_COSTO: f64 = 999_999.99;

/// Field validation shared by create and update: conclusion date must not
/// precede the start date, hours and cost stay inside the upstream bounds.
pub fn validate_fields(
    fecha_inicio: NaiveDate,
    fecha_conclusion: Option<NaiveDate>,
    cantidad_horas: Option<f64>,
    costo: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(conclusion) = fecha_conclusion {
        if conclusion < fecha_inicio {
            return Err(ValidationError::EndBeforeStart);
        }
    }
    if let Some(horas) = cantidad_horas {
        if !(0.0..=MAX_HORAS).contains(&horas) {
            return Err(ValidationError::OutOfRange {
                field: "cantidad_horas",
                min: 0.0,
                max: MAX_HORAS,
            });
        }
    }
    if let Some(costo) = costo {
        if !(0.0..=MAX_COSTO).contains(&costo) {
            return Err(ValidationError::OutOfRange {
                field: "costo",
                min: 0.0,
                max: MAX_COSTO,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn estado_serde_matches_table_strings() {
        let json = serde_json::to_string(&CapacitacionEstado::EnCurso).unwrap();
        assert_eq!(json, "\"En curso\"");
        let estado: CapacitacionEstado = serde_json::from_str("\"Pendiente\"").unwrap();
        assert_eq!(estado, CapacitacionEstado::Pendiente);
        assert_eq!(CapacitacionEstado::parse("Concluido"), Some(CapacitacionEstado::Concluido));
        assert_eq!(CapacitacionEstado::parse("archived"), None);
    }

    #[test]
    fn conclusion_before_start_rejected() {
        let result = validate_fields(d(2024, 3, 10), Some(d(2024, 3, 1)), None, None);
        assert_eq!(result, Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn open_ended_course_is_valid() {
        assert_eq!(validate_fields(d(2024, 3, 10), None, Some(40.0), Some(1500.0)), Ok(()));
    }

    #[test]
    fn hours_and_cost_bounds_enforced() {
        let result = validate_fields(d(2024, 3, 1), None, Some(10_000.0), None);
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { field: "cantidad_horas", .. })
        ));
        let result = validate_fields(d(2024, 3, 1), None, None, Some(-1.0));
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { field: "costo", .. })
        ));
    }
}
