pub mod http;
pub mod model;
pub mod service;

pub use model::{CreateObraSocialPayload, ObraSocial};
pub use service::*;
