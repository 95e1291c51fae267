//! Warranty terms fetcher
//!
//! The active terms-and-conditions document is a plain-text blob; the detail
//! view shows it as a list of warranty lines. Best-effort: any failure
//! degrades to an empty list without blocking the parent request.

use tracing::warn;

use crate::backend::SuncarBackend;

/// Fetch the active terms document and split it into trimmed, non-empty lines
pub async fn garantias_activas(backend: &SuncarBackend) -> Vec<String> {
    match backend.terminos_activos().await {
        Ok(terminos) => match terminos.texto {
            Some(texto) => lineas_de(&texto),
            None => {
                warn!("active terms document has no text body");
                Vec::new()
            }
        },
        Err(e) => {
            warn!(error = %e, "terms document unavailable, serving empty warranties");
            Vec::new()
        }
    }
}

fn lineas_de(texto: &str) -> Vec<String> {
    texto
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_trims_and_drops_empty_lines() {
        let texto = "  Garantía de 5 años en inversores  \n\n Garantía de 10 años en paneles\n   \n";
        assert_eq!(
            lineas_de(texto),
            vec![
                "Garantía de 5 años en inversores".to_string(),
                "Garantía de 10 años en paneles".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_document_yields_empty_list() {
        assert!(lineas_de("").is_empty());
        assert!(lineas_de("\n\n  \n").is_empty());
    }
}
