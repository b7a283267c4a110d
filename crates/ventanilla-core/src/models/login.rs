use serde::{Deserialize, Serialize};

/// Login request body. The counterparty requires these exact field
/// names, including the accented `Contraseña` — the server rejects the
/// call if the casing drifts.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "Usuario")]
    pub username: &'a str,
    #[serde(rename = "Contraseña")]
    pub password: &'a str,
}

/// Login response body. The token location varies between deployments,
/// so every candidate field is optional and resolution happens in the
/// auth client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub jwt: Option<String>,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    #[serde(rename = "estatusEjecucion")]
    pub execution_status: Option<i32>,
    #[serde(rename = "mensajeCiudadano")]
    pub citizen_message: Option<String>,
    #[serde(rename = "mensajeTecnico")]
    pub technical_message: Option<String>,
    #[serde(rename = "mensaje")]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Whether the body claims logical success (`estatusEjecucion == 1`).
    pub fn is_success(&self) -> bool {
        self.execution_status == Some(1)
    }

    /// Best available explanation for a rejected login: the
    /// citizen-facing message, then the bare message, then a generic
    /// fallback.
    pub fn rejection_message(&self) -> String {
        self.citizen_message
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| self.message.clone().filter(|m| !m.is_empty()))
            .unwrap_or_else(|| "login rejected by the server".to_string())
    }
}
