use serde::{Deserialize, Serialize};

/// Response shape shared by the payroll and lodging endpoints. The
/// server signals success in-band through `estatusEjecucion` (1 on
/// success, 0 or -1 on failure) rather than through HTTP status codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    #[serde(rename = "estatusEjecucion", default)]
    pub execution_status: i32,
    #[serde(rename = "mensajeCiudadano", default)]
    pub citizen_message: String,
    #[serde(rename = "mensajeTecnico", default)]
    pub technical_message: String,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.execution_status == 1
    }

    /// Message to surface to the user: citizen-facing text first, the
    /// technical text as a fallback.
    pub fn display_message(&self) -> &str {
        if !self.citizen_message.is_empty() {
            &self.citizen_message
        } else if !self.technical_message.is_empty() {
            &self.technical_message
        } else {
            "unknown error"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_report() {
        let json = r#"{
            "estatusEjecucion": 1,
            "mensajeCiudadano": "Su recibo de nómina está disponible",
            "mensajeTecnico": "OK"
        }"#;
        let report: ExecutionReport = serde_json::from_str(json).unwrap();
        assert!(report.is_success());
        assert_eq!(report.display_message(), "Su recibo de nómina está disponible");
    }

    #[test]
    fn test_failure_report_uses_technical_fallback() {
        let report: ExecutionReport = serde_json::from_str(
            r#"{"estatusEjecucion": 0, "mensajeCiudadano": "", "mensajeTecnico": "timeout en BD"}"#,
        )
        .unwrap();
        assert!(!report.is_success());
        assert_eq!(report.display_message(), "timeout en BD");
    }

    #[test]
    fn test_missing_fields_tolerated() {
        let report: ExecutionReport = serde_json::from_str("{}").unwrap();
        assert!(!report.is_success());
        assert_eq!(report.display_message(), "unknown error");

        let negative: ExecutionReport =
            serde_json::from_str(r#"{"estatusEjecucion": -1}"#).unwrap();
        assert!(!negative.is_success());
    }
}
