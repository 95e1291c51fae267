//! Materials photo lookup
//!
//! Offer line items often arrive without photos; the materials catalog is
//! fetched once per request and indexed by code to backfill them. This is a
//! best-effort lookup: any failure degrades to an empty map instead of
//! failing the parent request.

use std::collections::HashMap;
use tracing::warn;

use crate::backend::mapper::foto_absoluta;
use crate::backend::models::{codigo_texto, Material};
use crate::backend::SuncarBackend;

/// Fetch the materials catalog and build a code → absolute photo URL map.
/// Never fails; an unreachable catalog just means no photos get backfilled.
pub async fn mapa_fotos_materiales(backend: &SuncarBackend) -> HashMap<String, String> {
    let base = match backend.base() {
        Ok(b) => b.to_string(),
        Err(_) => return HashMap::new(),
    };

    match backend.materiales().await {
        Ok(materiales) => indexar_fotos(&materiales, &base),
        Err(e) => {
            warn!(error = %e, "materials catalog unavailable, photos will not be backfilled");
            HashMap::new()
        }
    }
}

fn indexar_fotos(materiales: &[Material], base: &str) -> HashMap<String, String> {
    let mut mapa = HashMap::new();
    for material in materiales {
        let Some(codigo) = material.codigo.as_ref().and_then(codigo_texto) else {
            continue;
        };
        let Some(foto) = material.foto.as_deref() else {
            continue;
        };
        mapa.insert(codigo, foto_absoluta(base, foto));
    }
    mapa
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(value: serde_json::Value) -> Material {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_index_normalizes_relative_photos() {
        let materiales = vec![
            material(serde_json::json!({ "codigo": "MAT-1", "foto": "/img/x.jpg" })),
            material(serde_json::json!({ "codigo": 42, "foto": "http://cdn.test/y.jpg" })),
            material(serde_json::json!({ "codigo": "MAT-3" })),
            material(serde_json::json!({ "foto": "/huerfana.jpg" })),
        ];

        let mapa = indexar_fotos(&materiales, "http://api.test");
        assert_eq!(mapa.len(), 2);
        assert_eq!(mapa["MAT-1"], "http://api.test/img/x.jpg");
        assert_eq!(mapa["42"], "http://cdn.test/y.jpg");
    }
}
