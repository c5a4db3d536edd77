//! Obituary reference code generation
//!
//! A reference is an 8-character code: a 4-letter prefix derived from the
//! surname, followed by a 4-digit zero-padded counter scoped to that prefix
//! (`ERIC0001`, `ERIC0002`, ...). The counter continues from the highest
//! suffix currently in use for the prefix, ignoring gaps left by deletions.

use crate::error::ReferenceError;

/// Prefix length in characters. Surnames shorter than this are padded.
pub const PREFIX_LEN: usize = 4;

/// Suffix width in digits. The counter never wraps; see [`generate_reference`].
pub const SUFFIX_LEN: usize = 4;

const MAX_SUFFIX: u32 = 9999;

/// Pad character for surnames shorter than [`PREFIX_LEN`].
///
/// The original data entry flow sliced the surname without padding, which
/// produced variable-width codes for 2-3 letter surnames and broke the
/// fixed-width `reference[0..8]` lookups in the image upload flow. Padding
/// keeps every reference exactly 8 characters.
const PREFIX_PAD: char = 'X';

/// Derive the 4-character prefix from a surname.
pub fn surname_prefix(surname: &str) -> Result<String, ReferenceError> {
    let mut prefix: String = surname
        .trim()
        .chars()
        .flat_map(|c| c.to_uppercase())
        .take(PREFIX_LEN)
        .collect();

    if prefix.is_empty() {
        return Err(ReferenceError::EmptySurname);
    }

    while prefix.chars().count() < PREFIX_LEN {
        prefix.push(PREFIX_PAD);
    }

    Ok(prefix)
}

/// Generate the next available reference code for a surname.
///
/// Scans `existing_references` for codes sharing the surname's prefix and
/// returns `prefix + (max suffix + 1)`, or `prefix + "0001"` when the prefix
/// is unused. Entries whose trailing 4 characters are not ASCII digits are
/// ignored rather than treated as zero.
///
/// This is a pure function over a snapshot of the existing codes. Two
/// concurrent callers that read the same snapshot can be handed the same
/// code; the store's uniqueness check on insert is the backstop. Callers
/// must query the snapshot immediately before use and persist promptly.
///
/// A prefix whose counter has reached 9999 is exhausted and yields
/// [`ReferenceError::PrefixExhausted`] instead of widening or wrapping.
pub fn generate_reference<I, S>(
    surname: &str,
    existing_references: I,
) -> Result<String, ReferenceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = surname_prefix(surname)?;

    let max_suffix = existing_references
        .into_iter()
        .filter_map(|r| parse_suffix(r.as_ref(), &prefix))
        .max()
        .unwrap_or(0);

    if max_suffix >= MAX_SUFFIX {
        return Err(ReferenceError::PrefixExhausted(prefix));
    }

    Ok(format!(
        "{prefix}{:0width$}",
        max_suffix + 1,
        width = SUFFIX_LEN
    ))
}

/// Extract the numeric suffix of a reference if it matches `prefix`.
fn parse_suffix(reference: &str, prefix: &str) -> Option<u32> {
    let rest = reference.strip_prefix(prefix)?;
    if rest.len() != SUFFIX_LEN || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_first_four_letters_uppercased() {
        assert_eq!(surname_prefix("Ericksen").unwrap(), "ERIC");
        assert_eq!(surname_prefix("smith").unwrap(), "SMIT");
        assert_eq!(surname_prefix("O'Brien").unwrap(), "O'BR");
    }

    #[test]
    fn short_surname_is_padded() {
        assert_eq!(surname_prefix("Ng").unwrap(), "NGXX");
        assert_eq!(surname_prefix("Lee").unwrap(), "LEEX");
    }

    #[test]
    fn empty_surname_is_rejected() {
        assert!(matches!(
            surname_prefix("   "),
            Err(ReferenceError::EmptySurname)
        ));
    }

    #[test]
    fn first_reference_for_a_prefix_starts_at_0001() {
        let refs: Vec<String> = Vec::new();
        assert_eq!(generate_reference("Smith", &refs).unwrap(), "SMIT0001");
    }

    #[test]
    fn suffix_is_max_plus_one_ignoring_gaps() {
        let refs = ["ERIC0001", "ERIC0003", "SMIT0010"];
        assert_eq!(generate_reference("Ericksen", refs).unwrap(), "ERIC0004");
    }

    #[test]
    fn other_prefixes_do_not_affect_the_counter() {
        let refs = ["SMIT0010", "SMIT0002"];
        assert_eq!(generate_reference("Smithers", refs).unwrap(), "SMIT0011");
        assert_eq!(generate_reference("Ericksen", refs).unwrap(), "ERIC0001");
    }

    #[test]
    fn suffix_is_zero_padded() {
        let refs = ["ERIC0006"];
        assert_eq!(generate_reference("Ericksen", refs).unwrap(), "ERIC0007");
    }

    #[test]
    fn malformed_suffixes_are_ignored() {
        let refs = ["ERIC00AB", "ERIC123", "ERIC0002"];
        assert_eq!(generate_reference("Ericksen", refs).unwrap(), "ERIC0003");
    }

    #[test]
    fn exhausted_prefix_is_an_error() {
        let refs = ["ERIC9999"];
        assert!(matches!(
            generate_reference("Ericksen", refs),
            Err(ReferenceError::PrefixExhausted(p)) if p == "ERIC"
        ));
    }
}
