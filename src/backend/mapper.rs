//! Confección to public offer mapper
//!
//! Maps raw backend offer records into the normalized shapes the storefront
//! consumes. The two views intentionally disagree on id preference: the
//! simplified list historically served `numero_oferta` first while the detail
//! and recommender views serve the internal `_id`/`id`. Downstream consumers
//! may depend on either, so the divergence is kept and documented rather
//! than silently unified.

use std::collections::HashMap;

use crate::backend::models::{codigo_texto, Confeccion, ElementoConfeccion};
use crate::domain::brand::extraer_marca;
use crate::domain::{ElementoPublico, OfertaPublica};

/// Fallback description when the backend record carries no name at all
const SIN_NOMBRE: &str = "Oferta sin nombre";

/// Line-item category holding the inverter, compared case-insensitively
const CATEGORIA_INVERSORES: &str = "INVERSORES";

/// Make a stored photo path absolute against the backend base URL.
/// Already-absolute URLs pass through unchanged.
pub fn foto_absoluta(base: &str, foto: &str) -> String {
    if foto.starts_with("http://") || foto.starts_with("https://") {
        foto.to_string()
    } else if foto.starts_with('/') {
        format!("{}{}", base, foto)
    } else {
        format!("{}/{}", base, foto)
    }
}

/// Display name with the documented fallback chain
fn descripcion_de(confeccion: &Confeccion) -> String {
    confeccion
        .nombre_completo
        .clone()
        .or_else(|| confeccion.nombre_corto.clone())
        .unwrap_or_else(|| SIN_NOMBRE.to_string())
}

/// Brand guess from the first inverter line item
fn marca_de(elementos: &[ElementoConfeccion]) -> Option<String> {
    let inversor = elementos.iter().find(|e| {
        e.categoria
            .as_deref()
            .map_or(false, |c| c.eq_ignore_ascii_case(CATEGORIA_INVERSORES))
    })?;
    extraer_marca(inversor.descripcion.as_deref()?)
}

fn base_publica(confeccion: &Confeccion, id: String) -> OfertaPublica {
    OfertaPublica {
        id,
        descripcion: descripcion_de(confeccion),
        descripcion_detallada: None,
        marca: marca_de(&confeccion.elementos),
        precio: confeccion.precio_final,
        precio_cliente: None,
        imagen: confeccion.foto_portada.clone(),
        moneda: confeccion
            .moneda
            .clone()
            .unwrap_or_else(|| "USD".to_string()),
        financiamiento: true,
        // The wire record carries a raw `descuento`, but the public shape
        // serves discounts as null until the storefront consumes them
        descuentos: None,
        pdf: None,
        is_active: confeccion.es_activa(),
        garantias: None,
        elementos: None,
    }
}

/// List-view normalization: id prefers `numero_oferta` over the internal id
pub fn oferta_resumen(confeccion: &Confeccion) -> OfertaPublica {
    let id = confeccion
        .numero_texto()
        .or_else(|| confeccion.id_interno().map(str::to_string))
        .unwrap_or_default();
    base_publica(confeccion, id)
}

/// Detail/recommender normalization: id prefers the internal `_id`/`id`
pub fn oferta_publica(confeccion: &Confeccion) -> OfertaPublica {
    let id = confeccion
        .id_interno()
        .map(str::to_string)
        .or_else(|| confeccion.numero_texto())
        .unwrap_or_default();
    base_publica(confeccion, id)
}

/// Detail-view normalization with warranties and resolved line items
pub fn oferta_detalle(
    confeccion: &Confeccion,
    garantias: Vec<String>,
    fotos_materiales: &HashMap<String, String>,
    base_url: &str,
) -> OfertaPublica {
    let elementos = confeccion
        .elementos
        .iter()
        .map(|e| elemento_publico(e, fotos_materiales, base_url))
        .collect();

    let mut oferta = oferta_publica(confeccion);
    oferta.descripcion_detallada = Some(descripcion_detallada(confeccion));
    oferta.garantias = Some(garantias);
    oferta.elementos = Some(elementos);
    oferta
}

/// Resolve a line item's photo: materials catalog first, then the item's own
/// photo made absolute, else none.
fn elemento_publico(
    elemento: &ElementoConfeccion,
    fotos_materiales: &HashMap<String, String>,
    base_url: &str,
) -> ElementoPublico {
    let codigo = elemento.codigo.as_ref().and_then(codigo_texto);
    let foto = codigo
        .as_ref()
        .and_then(|c| fotos_materiales.get(c).cloned())
        .or_else(|| {
            elemento
                .foto
                .as_deref()
                .map(|f| foto_absoluta(base_url, f))
        });

    ElementoPublico {
        codigo,
        descripcion: elemento.descripcion.clone().unwrap_or_default(),
        categoria: elemento.categoria.clone(),
        cantidad: elemento.cantidad,
        foto,
    }
}

/// Name plus a flattened rendering of the line items, used as the detailed
/// description and as the recommender's per-offer text.
pub fn descripcion_detallada(confeccion: &Confeccion) -> String {
    let items = confeccion
        .elementos
        .iter()
        .map(|e| {
            format!(
                "{}x [{}] {}",
                e.cantidad.unwrap_or(1.0),
                e.categoria.as_deref().unwrap_or(""),
                e.descripcion.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    if items.is_empty() {
        descripcion_de(confeccion)
    } else {
        format!("{}. Incluye: {}", descripcion_de(confeccion), items)
    }
}
