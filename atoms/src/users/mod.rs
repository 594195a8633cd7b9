pub mod http;
pub mod model;
pub mod password;
pub mod service;

pub use model::{CreateUserPayload, Role, User};
pub use service::*;
