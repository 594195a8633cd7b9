use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserLeaveDays {
    pub user_id: String,
    pub user_name: String,
    pub total_recesos: usize,
    /// Inclusive calendar days, the count the dashboard charts.
    pub total_dias: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_usuarios: usize,
    pub total_recesos: usize,
    pub total_capacitaciones: usize,
    pub dias_por_usuario: Vec<UserLeaveDays>,
}

#[derive(Debug, Serialize)]
pub struct EstadoBreakdown {
    pub estado: String,
    pub cantidad: usize,
    pub total_horas: f64,
    pub total_costo: f64,
}

#[derive(Debug, Serialize)]
pub struct CapacitacionesReport {
    pub total: usize,
    pub por_estado: Vec<EstadoBreakdown>,
}

#[derive(Debug, Serialize)]
pub struct CurrentNbu {
    pub id_obrasocial: i64,
    pub nameprovider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}
