//! Property tests for identifier normalization.

use proptest::prelude::*;
use vr_common::normalize_name;

const HEADER_CHARS: &str = "[A-Za-zÀ-ÖØ-öø-ÿ0-9 _.()$-]{0,40}";

proptest! {
    #[test]
    fn normalize_is_idempotent(input in HEADER_CHARS) {
        let once = normalize_name(&input);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalize_has_no_spaces_underscores_or_uppercase(input in HEADER_CHARS) {
        let normalized = normalize_name(&input);
        prop_assert!(!normalized.contains(' '));
        prop_assert!(!normalized.contains('_'));
        prop_assert_eq!(normalized.to_lowercase(), normalized.clone());
    }

    #[test]
    fn normalize_removes_latin_diacritics(input in "[áàâãäéèêëíìîïóòôõöúùûüçñÁÀÂÃÉÊÍÓÔÕÚÇ]{1,20}") {
        let normalized = normalize_name(&input);
        prop_assert!(normalized.is_ascii(), "left non-ascii in {:?}", normalized);
    }
}

#[test]
fn scenario_file_stems() {
    assert_eq!(normalize_name("Ativos"), "ativos");
    assert_eq!(normalize_name("Férias"), "ferias");
    assert_eq!(normalize_name("ADMISSÃO ABRIL"), "admissaoabril");
}
