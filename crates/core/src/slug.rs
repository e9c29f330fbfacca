//! Note slug transliteration, generation and validation.
//!
//! A note's slug is either supplied by the client or derived from its title.
//! Derivation transliterates Cyrillic to Latin and then slugifies, so
//! `"заголовок заметки"` becomes `"zagolovok-zametki"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::forms::FieldError;

/// Maximum stored slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Appended to the colliding slug in the field error.
pub const SLUG_TAKEN_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Field error for a slug that does not match the allowed alphabet.
pub const INVALID_SLUG_MESSAGE: &str =
    "Enter a valid slug consisting of letters, numbers, underscores or hyphens.";

static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-\s]+").expect("static regex is valid")
});

// ---------------------------------------------------------------------------
// Transliteration
// ---------------------------------------------------------------------------

/// Latin replacement for a lowercase Cyrillic letter, or `None` if `c` is not
/// in the table.
fn cyrillic_to_latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // Ukrainian
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

/// Transliterate lowercase Cyrillic letters; everything else passes through.
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match cyrillic_to_latin(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Slug generation
// ---------------------------------------------------------------------------

/// Derive a URL-safe slug from a title.
///
/// Lowercases, spells `&` as `and`, turns whitespace and dash runs into a
/// single hyphen, transliterates, then keeps only `[a-z0-9_-]`. Hyphens left
/// behind by dropped symbols are kept as they are, so `"a ! b"` becomes
/// `"a--b"` and `"-x-"` stays `"-x-"`. The result is truncated to
/// [`MAX_SLUG_LENGTH`].
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace('&', " and ");
    let dashed = DASH_RUNS.replace_all(&lowered, "-");
    let latin = transliterate(&dashed);

    latin
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .take(MAX_SLUG_LENGTH)
        .collect()
}

/// The slug a note will be stored under: the requested one when non-empty,
/// otherwise one derived from `title`.
pub fn candidate_slug(title: &str, requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(title),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an explicitly supplied slug: letters, digits, `_` and `-` only.
pub fn validate_slug_format(slug: &str) -> Result<(), FieldError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(FieldError::new("slug", INVALID_SLUG_MESSAGE))
    }
}

/// The field error reported when `slug` belongs to another note.
pub fn duplicate_slug_error(slug: &str) -> FieldError {
    FieldError::new("slug", format!("{slug}{SLUG_TAKEN_WARNING}"))
}

/// Resolve the final slug for a note.
///
/// `is_taken` reports whether a *different* note already uses the slug. The
/// derived path is checked the same way as an explicit slug.
pub fn assign_slug(
    title: &str,
    requested: Option<&str>,
    is_taken: impl FnOnce(&str) -> bool,
) -> Result<String, FieldError> {
    let slug = candidate_slug(title, requested);
    if slug.is_empty() {
        return Err(FieldError::new("slug", INVALID_SLUG_MESSAGE));
    }
    if is_taken(&slug) {
        return Err(duplicate_slug_error(&slug));
    }
    Ok(slug)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
