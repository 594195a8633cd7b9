// Composite read models: joins and aggregates over the atom entities,
// consumed by the dashboard, the capacitaciones chart and the NBU table.

pub mod capacitaciones;
pub mod dashboard;
pub mod nbu;
pub mod types;
