//! Web gallery endpoint
//!
//! Folder names are constrained to a fixed allow-list so the path segment
//! can never be used to probe arbitrary backend routes.

use actix_web::{web, HttpResponse};

use crate::api::envelope;
use crate::AppState;

/// The only gallery folders the storefront exposes
const CARPETAS_PERMITIDAS: [&str; 3] = ["instalaciones", "productos", "eventos"];

/// GET /api/galeriaweb/{carpeta}
pub async fn fotos_carpeta(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let carpeta = path.into_inner();
    if !CARPETAS_PERMITIDAS.contains(&carpeta.as_str()) {
        return envelope::invalido("Carpeta de galería no permitida");
    }

    match state.backend.galeria(&carpeta).await {
        Ok(fotos) => envelope::exito(fotos, "Galería obtenida correctamente"),
        Err(e) => envelope::desde_error(&e),
    }
}
