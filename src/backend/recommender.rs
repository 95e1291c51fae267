//! Recommendation reconciler
//!
//! The recommender backend ranks candidate offers against a free-text query.
//! Its reply is polymorphic: `data.ofertas` is either an ordered list of
//! offer IDs or an ordered list of already-expanded offer objects. That
//! polymorphism is modeled as an explicit tagged union at the boundary and
//! reconciled back into the normalized public shape, preserving the
//! recommender's ordering since it is the ranking signal.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use utoipa::ToSchema;

use crate::backend::mapper::{descripcion_detallada, oferta_publica};
use crate::backend::models::Confeccion;
use crate::backend::{BackendError, BackendResult, SuncarBackend};
use crate::domain::OfertaPublica;

/// Reconciled recommendation result served to the storefront
#[derive(Debug, Serialize, ToSchema)]
pub struct Recomendacion {
    /// Echo of the customer's query
    pub texto: String,
    /// Recommended offers in the recommender's ranking order
    pub ofertas: Vec<OfertaPublica>,
}

/// The two documented shapes of the recommender's `ofertas` array
#[derive(Debug)]
pub enum ListaRecomendada {
    /// Ordered offer IDs to be resolved against the fetched candidates
    Ids(Vec<String>),
    /// Already-expanded offer objects, passed through with default fills
    Expandidas(Vec<OfertaPublica>),
}

/// Run the full recommendation flow for a customer query.
///
/// The candidate fetch fails fast: when it errors the recommender is never
/// called.
pub async fn recomendar(
    backend: &SuncarBackend,
    texto: &str,
) -> BackendResult<Recomendacion> {
    let candidatas = backend.confecciones_activas().await?;
    info!(candidatas = candidatas.len(), "forwarding query to recommender");

    let solicitud = solicitud_recomendador(texto, &candidatas);
    let data = backend.recomendar(&solicitud).await?;

    let lista = interpretar_ofertas(&data)?;
    let ofertas = reconciliar(lista, &candidatas);

    Ok(Recomendacion {
        texto: texto.to_string(),
        ofertas,
    })
}

/// Build the recommender request: the query plus every candidate rendered
/// with its id, detailed description and normalized fields.
pub fn solicitud_recomendador(texto: &str, candidatas: &[Confeccion]) -> Value {
    let ofertas: Vec<Value> = candidatas
        .iter()
        .map(|c| {
            let mut oferta = oferta_publica(c);
            oferta.descripcion_detallada = Some(descripcion_detallada(c));
            serde_json::to_value(oferta).unwrap_or(Value::Null)
        })
        .collect();

    json!({ "texto": texto, "ofertas": ofertas })
}

/// Classify the recommender's `data.ofertas` by inspecting the first element.
///
/// A missing, non-array or empty array is a hard invalid-format error; the
/// recommender is expected to always return at least one ranked entry.
pub fn interpretar_ofertas(data: &Value) -> BackendResult<ListaRecomendada> {
    let ofertas = data
        .get("ofertas")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            BackendError::InvalidFormat(
                "el recomendador no devolvió una lista de ofertas".to_string(),
            )
        })?;

    if ofertas.is_empty() {
        return Err(BackendError::InvalidFormat(
            "el recomendador devolvió una lista de ofertas vacía".to_string(),
        ));
    }

    if ofertas[0].is_string() {
        let ids = ofertas
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        return Ok(ListaRecomendada::Ids(ids));
    }

    let expandidas: Vec<OfertaPublica> =
        serde_json::from_value(Value::Array(ofertas.clone())).map_err(|e| {
            BackendError::InvalidFormat(format!(
                "ofertas expandidas con forma inesperada: {}",
                e
            ))
        })?;
    Ok(ListaRecomendada::Expandidas(expandidas))
}

/// Resolve the recommender's reply against the originally-fetched candidates.
///
/// IDs with no exact match are silently dropped; zero survivors is a valid
/// empty result, distinct from the invalid-format case above.
pub fn reconciliar(lista: ListaRecomendada, candidatas: &[Confeccion]) -> Vec<OfertaPublica> {
    match lista {
        ListaRecomendada::Ids(ids) => ids
            .iter()
            .filter_map(|id| candidatas.iter().find(|c| c.coincide_id(id)))
            .map(oferta_publica)
            .collect(),
        ListaRecomendada::Expandidas(ofertas) => ofertas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidatas() -> Vec<Confeccion> {
        serde_json::from_value(serde_json::json!([
            { "_id": "id1", "nombre_completo": "Kit 3kW", "precio_final": 2450.0,
              "tipo_oferta": "generica", "estado": "aprobada_para_enviar" },
            { "_id": "id2", "nombre_completo": "Kit 5kW", "precio_final": 3900.0,
              "tipo_oferta": "generica", "estado": "aprobada_para_enviar" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_id_list_reconciliation_drops_unknown_ids_in_order() {
        let lista = interpretar_ofertas(&serde_json::json!({
            "ofertas": ["id1", "id3"]
        }))
        .unwrap();

        let ofertas = reconciliar(lista, &candidatas());
        assert_eq!(ofertas.len(), 1);
        assert_eq!(ofertas[0].id, "id1");
        assert_eq!(ofertas[0].descripcion, "Kit 3kW");
    }

    #[test]
    fn test_id_list_preserves_recommender_ordering() {
        let lista = interpretar_ofertas(&serde_json::json!({
            "ofertas": ["id2", "id1"]
        }))
        .unwrap();

        let ofertas = reconciliar(lista, &candidatas());
        assert_eq!(ofertas.len(), 2);
        assert_eq!(ofertas[0].id, "id2");
        assert_eq!(ofertas[1].id, "id1");
    }

    #[test]
    fn test_expanded_offers_pass_through_with_defaults() {
        let lista = interpretar_ofertas(&serde_json::json!({
            "ofertas": [
                { "id": "id9", "descripcion": "Kit recomendado", "precio": 1800.0 }
            ]
        }))
        .unwrap();

        let ofertas = reconciliar(lista, &candidatas());
        assert_eq!(ofertas.len(), 1);
        assert_eq!(ofertas[0].id, "id9");
        assert_eq!(ofertas[0].moneda, "USD");
        assert!(ofertas[0].financiamiento);
        assert!(ofertas[0].is_active);
    }

    #[test]
    fn test_empty_list_is_invalid_format() {
        let err = interpretar_ofertas(&serde_json::json!({ "ofertas": [] })).unwrap_err();
        assert!(matches!(err, BackendError::InvalidFormat(_)));
    }

    #[test]
    fn test_non_array_is_invalid_format() {
        for data in [
            serde_json::json!({ "ofertas": "id1" }),
            serde_json::json!({ "ofertas": null }),
            serde_json::json!({}),
        ] {
            assert!(matches!(
                interpretar_ofertas(&data),
                Err(BackendError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_solicitud_carries_detailed_descriptions() {
        let solicitud = solicitud_recomendador("kit para casa pequeña", &candidatas());
        assert_eq!(solicitud["texto"], "kit para casa pequeña");

        let ofertas = solicitud["ofertas"].as_array().unwrap();
        assert_eq!(ofertas.len(), 2);
        assert_eq!(ofertas[0]["id"], "id1");
        assert!(ofertas[0]["descripcion_detallada"].is_string());
    }
}
