use serde::{Deserialize, Serialize};

/// One row of an RFC lookup result. Numeric and string fields default
/// when absent — registry rows are not uniformly populated across the
/// systems that feed this endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxpayerRecord {
    #[serde(rename = "idProceso", default)]
    pub process_id: i64,
    #[serde(default)]
    pub rfc: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "nombreComercial")]
    pub trade_name: Option<String>,
    #[serde(rename = "controlPersona", default)]
    pub person_control: i64,
    #[serde(rename = "controlMateria", default)]
    pub matter_control: i64,
    #[serde(rename = "sistema", default)]
    pub system: String,
    #[serde(rename = "tipoSucursal", default)]
    pub branch_type: String,
    #[serde(rename = "situacion", default)]
    pub status: String,
    #[serde(rename = "mensajeTecnico")]
    pub technical_message: Option<String>,
}

impl TaxpayerRecord {
    /// Whether the registration is currently active (`situacion` of
    /// `ACTIVA`, compared case-insensitively).
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("ACTIVA")
    }
}

/// Normalize an RFC for the query string: surrounding whitespace
/// stripped, letters uppercased. No format validation is applied — the
/// server is the authority on what constitutes a valid RFC.
pub fn normalize_rfc(rfc: &str) -> String {
    rfc.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_taxpayer_record() {
        let json = r#"{
            "idProceso": 4521,
            "rfc": "GOMC800101AB1",
            "nombre": "CARLOS GOMEZ MARTINEZ",
            "nombreComercial": "ABARROTES GOMEZ",
            "controlPersona": 12,
            "controlMateria": 3,
            "sistema": "PADRON",
            "tipoSucursal": "MATRIZ",
            "situacion": "ACTIVA",
            "mensajeTecnico": null
        }"#;
        let record: TaxpayerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.process_id, 4521);
        assert_eq!(record.rfc, "GOMC800101AB1");
        assert_eq!(record.name, "CARLOS GOMEZ MARTINEZ");
        assert_eq!(record.trade_name.as_deref(), Some("ABARROTES GOMEZ"));
        assert!(record.is_active());
    }

    #[test]
    fn test_sparse_record_tolerated() {
        let record: TaxpayerRecord =
            serde_json::from_str(r#"{"rfc": "XAXX010101000", "situacion": "SUSPENDIDA"}"#).unwrap();
        assert_eq!(record.process_id, 0);
        assert!(record.trade_name.is_none());
        assert!(!record.is_active());
    }

    #[test]
    fn test_normalize_rfc() {
        assert_eq!(normalize_rfc("  gomc800101ab1 "), "GOMC800101AB1");
        assert_eq!(normalize_rfc("ñarc750302xy9"), "ÑARC750302XY9");
        assert_eq!(normalize_rfc("ABCD123456XYZ"), "ABCD123456XYZ");
        assert_eq!(normalize_rfc("   "), "");
    }
}
