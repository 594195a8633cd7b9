pub mod http;
pub mod model;
pub mod service;

pub use model::{CreateProblemaPayload, Problema, ProblemaCategoria, ProblemaEstado};
pub use service::*;
