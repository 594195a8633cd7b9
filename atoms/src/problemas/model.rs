use serde::{Deserialize, Serialize};

use crate::users::model::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemaCategoria {
    #[serde(rename = "autorizacion")]
    Autorizacion,
    #[serde(rename = "paciente")]
    Paciente,
    #[serde(rename = "reactivos")]
    Reactivos,
}

impl ProblemaCategoria {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemaCategoria::Autorizacion => "autorizacion",
            ProblemaCategoria::Paciente => "paciente",
            ProblemaCategoria::Reactivos => "reactivos",
        }
    }

    pub fn parse(s: &str) -> Option<ProblemaCategoria> {
        match s {
            "autorizacion" => Some(ProblemaCategoria::Autorizacion),
            "paciente" => Some(ProblemaCategoria::Paciente),
            "reactivos" => Some(ProblemaCategoria::Reactivos),
            _ => None,
        }
    }
}

/// Unordered status set, no enforced transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemaEstado {
    #[serde(rename = "resuelto")]
    Resuelto,
    #[serde(rename = "pendiente")]
    Pendiente,
    #[serde(rename = "impacto aceptado")]
    ImpactoAceptado,
}

impl ProblemaEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemaEstado::Resuelto => "resuelto",
            ProblemaEstado::Pendiente => "pendiente",
            ProblemaEstado::ImpactoAceptado => "impacto aceptado",
        }
    }

    pub fn parse(s: &str) -> Option<ProblemaEstado> {
        match s {
            "resuelto" => Some(ProblemaEstado::Resuelto),
            "pendiente" => Some(ProblemaEstado::Pendiente),
            "impacto aceptado" => Some(ProblemaEstado::ImpactoAceptado),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Problema {
    pub id: String,
    /// Reporting admin.
    pub user_id: String,
    /// Biochemist the report concerns, when one was singled out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biochemist_id: Option<String>,
    pub categoria: ProblemaCategoria,
    pub descripcion: String,
    pub estado: ProblemaEstado,
    pub archivos_urls: Vec<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biochemist: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProblemaPayload {
    pub biochemist_id: Option<String>,
    pub categoria: ProblemaCategoria,
    pub descripcion: String,
    pub estado: ProblemaEstado,
    #[serde(default)]
    pub archivos_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categoria_rejects_unknown_values_at_the_boundary() {
        assert!(serde_json::from_str::<ProblemaCategoria>("\"reactivos\"").is_ok());
        assert!(serde_json::from_str::<ProblemaCategoria>("\"otros\"").is_err());
    }

    #[test]
    fn estado_round_trips_the_spaced_variant() {
        let json = serde_json::to_string(&ProblemaEstado::ImpactoAceptado).unwrap();
        assert_eq!(json, "\"impacto aceptado\"");
        assert_eq!(
            ProblemaEstado::parse("impacto aceptado"),
            Some(ProblemaEstado::ImpactoAceptado)
        );
    }
}
