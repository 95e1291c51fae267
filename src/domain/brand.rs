//! Brand extraction heuristic
//!
//! Inverter line items carry the manufacturer in their free-text description
//! (e.g. "Inversor 5kW Felicity Solar"). The backend has no structured brand
//! field, so the storefront guesses one from the tokens. This is best-effort
//! by design: lowercase model codes are dropped and `None` is returned on
//! ambiguous input rather than guessing wrong.

/// Bare unit symbols that never belong to a brand name
const UNIT_SYMBOLS: [&str; 5] = ["kw", "w", "v", "a", "kwh"];

/// Guess a manufacturer brand from an inverter description.
///
/// Tokenizes on whitespace, then drops: the first token when it is
/// "inversor"/"inversores" (any case), any token starting with a digit, and
/// any bare unit symbol. Of the survivors, only tokens starting with an
/// uppercase letter are kept. Returns `None` when nothing survives.
pub fn extraer_marca(descripcion: &str) -> Option<String> {
    let mut kept: Vec<&str> = Vec::new();

    for (i, token) in descripcion.split_whitespace().enumerate() {
        if i == 0
            && (token.eq_ignore_ascii_case("inversor")
                || token.eq_ignore_ascii_case("inversores"))
        {
            continue;
        }
        let Some(first) = token.chars().next() else {
            continue;
        };
        if first.is_ascii_digit() {
            continue;
        }
        if UNIT_SYMBOLS.iter().any(|u| token.eq_ignore_ascii_case(u)) {
            continue;
        }
        if first.is_uppercase() {
            kept.push(token);
        }
    }

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_brand_after_power_rating() {
        assert_eq!(
            extraer_marca("Inversor 5kW Felicity Solar"),
            Some("Felicity Solar".to_string())
        );
    }

    #[test]
    fn test_single_word_description_yields_none() {
        assert_eq!(extraer_marca("Inversor"), None);
        assert_eq!(extraer_marca("INVERSORES"), None);
    }

    #[test]
    fn test_drops_bare_unit_symbols() {
        assert_eq!(
            extraer_marca("Inversor Growatt 5 KW"),
            Some("Growatt".to_string())
        );
    }

    #[test]
    fn test_lowercase_tokens_are_dropped() {
        // Lowercase model codes fail the uppercase-initial filter
        assert_eq!(extraer_marca("Inversor hibrido 3kW"), None);
    }

    #[test]
    fn test_unit_word_only_in_first_position_is_filtered() {
        // "inversor" is only special as the first token
        assert_eq!(
            extraer_marca("Equipo Inversor Deye"),
            Some("Equipo Inversor Deye".to_string())
        );
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(extraer_marca(""), None);
        assert_eq!(extraer_marca("   "), None);
    }
}
