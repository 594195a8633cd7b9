use serde::{Deserialize, Serialize};

/// Health-insurance provider ("obra social"). Upstream keeps numeric ids
/// for these, unlike the uuid-keyed entities.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ObraSocial {
    pub id: i64,
    pub nameprovider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contactprovider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startdateprovider: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateObraSocialPayload {
    pub nameprovider: String,
    pub contactprovider: Option<String>,
    pub startdateprovider: Option<String>,
}
