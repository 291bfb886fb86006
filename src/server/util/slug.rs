//! Identifier helpers for documents and stored blobs.

use rand::{distr::Alphanumeric, Rng};

/// Length of identifiers generated for documents without a derived id.
pub const GENERATED_ID_LEN: usize = 20;

/// Lowercase ASCII slug of `input`.
///
/// Spanish accents are folded (`Sarchí` → `sarchi`, `Año` → `ano`) and every run of other
/// characters collapses into a single `-`. Leading and trailing separators are dropped, so
/// the result may be empty.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Random alphanumeric identifier of `len` characters.
pub fn random_id(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
