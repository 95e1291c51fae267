//! Raw SunCar backend wire models
//!
//! These mirror the backend's JSON responses and are mapped to the public
//! shapes in the mapper module. Identifier-ish fields that the backend emits
//! inconsistently as strings or numbers are modeled as raw values and coerced
//! with [`codigo_texto`].

use serde::Deserialize;
use serde_json::Value;

/// Lifecycle state that makes an offer publicly visible
pub const ESTADO_APROBADA: &str = "aprobada_para_enviar";
/// Offer type tag for generic (non-custom) kits
pub const TIPO_GENERICA: &str = "generica";

/// Generic backend response wrapper
#[derive(Debug, Deserialize)]
pub struct BackendEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Assembled-kit offer record ("confección")
#[derive(Debug, Clone, Deserialize)]
pub struct Confeccion {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_oferta: Option<Value>,
    #[serde(default)]
    pub nombre_completo: Option<String>,
    #[serde(default)]
    pub nombre_corto: Option<String>,
    #[serde(default)]
    pub precio_final: f64,
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(default)]
    pub foto_portada: Option<String>,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub tipo_oferta: String,
    #[serde(default)]
    pub elementos: Vec<ElementoConfeccion>,
    #[serde(default)]
    pub descuento: Option<f64>,
}

impl Confeccion {
    /// An offer is publicly active iff it is a generic kit approved for
    /// sending. Computed, never stored.
    pub fn es_activa(&self) -> bool {
        self.tipo_oferta == TIPO_GENERICA && self.estado == ESTADO_APROBADA
    }

    /// Internal identifier, `_id` falling back to `id`
    pub fn id_interno(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }

    /// Offer number as text, when present
    pub fn numero_texto(&self) -> Option<String> {
        self.numero_oferta.as_ref().and_then(codigo_texto)
    }

    /// Exact-match an identifier against `_id`/`id`
    pub fn coincide_id(&self, buscado: &str) -> bool {
        self.id_interno() == Some(buscado)
    }
}

/// Line item contained in a Confeccion
#[derive(Debug, Clone, Deserialize)]
pub struct ElementoConfeccion {
    /// Material code, foreign key into the materials catalog
    #[serde(default)]
    pub codigo: Option<Value>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub cantidad: Option<f64>,
    #[serde(default)]
    pub precio_unitario: Option<f64>,
    #[serde(default)]
    pub foto: Option<String>,
}

/// Materials catalog record, keyed by code
#[derive(Debug, Clone, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub codigo: Option<Value>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
}

/// Active terms-and-conditions document
#[derive(Debug, Deserialize)]
pub struct TerminosActivos {
    #[serde(default)]
    pub texto: Option<String>,
}

/// Per-municipality installed-kW statistic (passthrough)
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct EstadisticaMunicipio {
    #[serde(default)]
    pub provincia: String,
    #[serde(default)]
    pub municipio: String,
    #[serde(default)]
    pub kw_instalados: f64,
    #[serde(default)]
    pub total_servicios: Option<u64>,
}

/// Sellable store article from the backend catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ArticuloCatalogo {
    #[serde(default)]
    pub codigo: Option<Value>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub marca_id: Option<Value>,
}

/// Chatbot backend reply
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct RespuestaChat {
    #[serde(alias = "respuesta")]
    pub response: String,
    #[serde(default)]
    pub model_used: Option<String>,
}

/// Brand catalog record
#[derive(Debug, Clone, Deserialize)]
pub struct Marca {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub nombre: String,
}

impl Marca {
    pub fn id_texto(&self) -> Option<String> {
        self.mongo_id
            .clone()
            .or_else(|| self.id.as_ref().and_then(codigo_texto))
    }
}

/// Coerce a backend identifier value (string or number) to trimmed text.
/// Returns `None` for empty strings and non-scalar values.
pub fn codigo_texto(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confeccion(tipo: &str, estado: &str) -> Confeccion {
        serde_json::from_value(serde_json::json!({
            "_id": "of-1",
            "tipo_oferta": tipo,
            "estado": estado,
        }))
        .unwrap()
    }

    #[test]
    fn test_es_activa_all_combinations() {
        assert!(confeccion("generica", "aprobada_para_enviar").es_activa());
        assert!(!confeccion("generica", "borrador").es_activa());
        assert!(!confeccion("personalizada", "aprobada_para_enviar").es_activa());
        assert!(!confeccion("personalizada", "borrador").es_activa());
    }

    #[test]
    fn test_id_interno_prefers_mongo_id() {
        let c: Confeccion = serde_json::from_value(serde_json::json!({
            "_id": "abc",
            "id": "def"
        }))
        .unwrap();
        assert_eq!(c.id_interno(), Some("abc"));

        let c: Confeccion =
            serde_json::from_value(serde_json::json!({ "id": "def" })).unwrap();
        assert_eq!(c.id_interno(), Some("def"));
    }

    #[test]
    fn test_codigo_texto_coercion() {
        assert_eq!(
            codigo_texto(&serde_json::json!(" MAT-001 ")),
            Some("MAT-001".to_string())
        );
        assert_eq!(codigo_texto(&serde_json::json!(4120)), Some("4120".to_string()));
        assert_eq!(codigo_texto(&serde_json::json!("   ")), None);
        assert_eq!(codigo_texto(&serde_json::json!(null)), None);
        assert_eq!(codigo_texto(&serde_json::json!(["x"])), None);
    }

    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let env: BackendEnvelope<Vec<Material>> =
            serde_json::from_str("{\"success\": true}").unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
        assert!(env.message.is_none());
    }
}
