pub mod http;
pub mod model;
pub mod service;

pub use model::{
    Capacitacion, CapacitacionEstado, CreateCapacitacionPayload, UpdateCapacitacionPayload,
};
pub use service::*;
