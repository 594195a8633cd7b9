// Leaf domain crate: entity models, DynamoDB access and the validation /
// authorization core. Must not depend on salvay-shared.

pub mod authz;
pub mod http;
pub mod capacitaciones;
pub mod error;
pub mod nbu;
pub mod notificaciones;
pub mod obras;
pub mod problemas;
pub mod recesos;
pub mod users;

pub use error::{AuthError, StoreError, ValidationError};
