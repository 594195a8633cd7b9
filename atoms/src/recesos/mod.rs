pub mod http;
pub mod model;
pub mod service;
pub mod validate;

pub use model::{CreateRecesoPayload, Receso, UpdateRecesoPayload};
pub use service::*;
