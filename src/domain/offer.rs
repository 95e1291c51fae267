//! Public offer shapes served to the storefront
//!
//! These are the normalized projections the frontend consumes. They are also
//! deserializable because the recommender may return already-expanded offers
//! in this shape, with optional fields default-filled.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Normalized offer as served to the storefront.
///
/// `garantias` and `elementos` are only populated on the detail view;
/// list and recommender views omit them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfertaPublica {
    pub id: String,
    pub descripcion: String,
    #[serde(default)]
    pub descripcion_detallada: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub precio: f64,
    /// Tiered/VIP pricing has no source in this system; kept nullable and
    /// unpopulated until one is identified.
    #[serde(default)]
    pub precio_cliente: Option<f64>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default = "default_moneda")]
    pub moneda: String,
    #[serde(default = "default_true")]
    pub financiamiento: bool,
    #[serde(default)]
    pub descuentos: Option<f64>,
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garantias: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elementos: Option<Vec<ElementoPublico>>,
}

/// Normalized line item on an offer detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ElementoPublico {
    #[serde(default)]
    pub codigo: Option<String>,
    pub descripcion: String,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub cantidad: Option<f64>,
    #[serde(default)]
    pub foto: Option<String>,
}

fn default_moneda() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_offer_default_fills() {
        // A recommender-expanded offer may omit optional fields entirely
        let oferta: OfertaPublica = serde_json::from_value(serde_json::json!({
            "id": "of-1",
            "descripcion": "Kit solar 3kW",
            "precio": 2450.0
        }))
        .unwrap();

        assert_eq!(oferta.moneda, "USD");
        assert!(oferta.financiamiento);
        assert!(oferta.is_active);
        assert!(oferta.precio_cliente.is_none());
        assert!(oferta.garantias.is_none());
    }

    #[test]
    fn test_detail_only_fields_skipped_when_absent() {
        let oferta = OfertaPublica {
            id: "of-1".to_string(),
            descripcion: "Kit".to_string(),
            descripcion_detallada: None,
            marca: None,
            precio: 100.0,
            precio_cliente: None,
            imagen: None,
            moneda: "USD".to_string(),
            financiamiento: true,
            descuentos: None,
            pdf: None,
            is_active: true,
            garantias: None,
            elementos: None,
        };

        let value = serde_json::to_value(&oferta).unwrap();
        assert!(value.get("garantias").is_none());
        assert!(value.get("elementos").is_none());
        // Always-present nullables still serialize
        assert!(value.get("precio_cliente").is_some());
    }
}
