//! Name normalization for table and column identifiers.
//!
//! HR exports name the same thing many ways (`Matrícula`, `MATRICULA`,
//! `matricula_`, `Admissão Abril`). Every identifier goes through
//! [`normalize_name`] before it is used as a lookup key.

use std::fmt::Display;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalizes an identifier: no diacritics, lowercase, no whitespace or underscores.
///
/// Lowercasing runs before the canonical decomposition so that marks produced
/// by case mapping are removed as well, which keeps the function idempotent.
///
/// # Examples
///
/// ```
/// use vr_common::normalize_name;
///
/// assert_eq!(normalize_name("Matrícula"), "matricula");
/// assert_eq!(normalize_name("ADMISSÃO ABRIL"), "admissaoabril");
/// assert_eq!(normalize_name("data_de_demissão"), "datadedemissao");
/// ```
pub fn normalize_name(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .filter(|ch| !ch.is_whitespace() && *ch != '_')
        .collect()
}

/// Normalizes any displayable value by coercing it to text first.
pub fn normalize_value<T: Display + ?Sized>(value: &T) -> String {
    normalize_name(&value.to_string())
}

/// Returns `name` unchanged if unused, otherwise the first free `name.N` variant.
///
/// Used wherever two headers collapse onto the same identifier so that every
/// column keeps a unique name.
pub fn dedupe_name(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(name) {
        return name.to_string();
    }
    let mut counter = 1usize;
    loop {
        let candidate = format!("{name}.{counter}");
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
