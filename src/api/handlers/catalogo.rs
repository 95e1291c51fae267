//! Store catalog endpoint
//!
//! Flattens the backend's sellable articles with the brands catalog joined
//! in by id. Brands are a best-effort side lookup: when unavailable the
//! articles are served without brand names.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::api::envelope;
use crate::backend::mapper::foto_absoluta;
use crate::backend::models::{codigo_texto, ArticuloCatalogo, Marca};
use crate::AppState;

/// Sellable article as served to the store front-end
#[derive(Debug, Serialize)]
pub struct ArticuloTienda {
    pub codigo: Option<String>,
    pub descripcion: String,
    pub categoria: Option<String>,
    pub precio: Option<f64>,
    pub moneda: String,
    pub foto: Option<String>,
    pub marca: Option<String>,
}

/// GET /api/productos-catalogo
pub async fn productos_catalogo(state: web::Data<AppState>) -> HttpResponse {
    // Articles and brands are independent; fetch them concurrently. Only the
    // articles fetch is load-bearing.
    let (articulos, marcas) = futures::join!(
        state.backend.articulos_tienda(),
        state.backend.marcas()
    );

    let articulos = match articulos {
        Ok(a) => a,
        Err(e) => return envelope::desde_error(&e),
    };

    let marcas = marcas.unwrap_or_else(|e| {
        warn!(error = %e, "brands catalog unavailable, serving articles without brand names");
        Vec::new()
    });

    let base = match state.backend.base() {
        Ok(b) => b.to_string(),
        Err(e) => return envelope::desde_error(&e),
    };

    let data = aplanar(&articulos, &marcas, &base);
    envelope::exito(data, "Catálogo obtenido correctamente")
}

fn aplanar(articulos: &[ArticuloCatalogo], marcas: &[Marca], base: &str) -> Vec<ArticuloTienda> {
    let nombres_marca: HashMap<String, &str> = marcas
        .iter()
        .filter_map(|m| m.id_texto().map(|id| (id, m.nombre.as_str())))
        .collect();

    articulos
        .iter()
        .map(|a| ArticuloTienda {
            codigo: a.codigo.as_ref().and_then(codigo_texto),
            descripcion: a.descripcion.clone().unwrap_or_default(),
            categoria: a.categoria.clone(),
            precio: a.precio,
            moneda: a.moneda.clone().unwrap_or_else(|| "USD".to_string()),
            foto: a.foto.as_deref().map(|f| foto_absoluta(base, f)),
            marca: a
                .marca_id
                .as_ref()
                .and_then(codigo_texto)
                .and_then(|id| nombres_marca.get(&id).map(|n| n.to_string())),
        })
        .collect()
}
