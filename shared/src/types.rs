// ========== USER ==========
pub use salvay_atoms::users::model::{CreateUserPayload, Role, User};

// ========== RECESO ==========
pub use salvay_atoms::recesos::model::{CreateRecesoPayload, Receso, UpdateRecesoPayload};

// ========== CAPACITACION ==========
pub use salvay_atoms::capacitaciones::model::{
    Capacitacion, CapacitacionEstado, CreateCapacitacionPayload, UpdateCapacitacionPayload,
};

// ========== NBU / OBRA SOCIAL ==========
pub use salvay_atoms::nbu::model::{CreateNbuPayload, Nbu};
pub use salvay_atoms::obras::model::{CreateObraSocialPayload, ObraSocial};

// ========== PROBLEMA ==========
pub use salvay_atoms::problemas::model::{
    CreateProblemaPayload, Problema, ProblemaCategoria, ProblemaEstado,
};

// ========== NOTIFICATIONS ==========
pub use salvay_atoms::notificaciones::model::{
    NotificationSettings, UpdateNotificationSettingsPayload,
};
