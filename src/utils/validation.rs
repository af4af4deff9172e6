//! Centralized validation and identifier helpers.

/// Maximum number of top-level records allowed in a single document (DOS protection)
pub const MAX_RECORDS: usize = 100_000;

/// Suffix carried by sequence record identifiers (`A_sequence` -> part `A`)
pub const PART_SEQUENCE_SUFFIX: &str = "_sequence";

/// Positional suffix length on sub-component identifiers (`A01` -> part `A`)
pub const SUBCOMPONENT_SUFFIX_LEN: usize = 2;

/// Identifier validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Identifier '{identifier}' is too short to strip a {suffix_len}-character suffix")]
    TooShort {
        identifier: String,
        suffix_len: usize,
    },
    #[error("Identifier '{identifier}' is empty once suffix '{suffix}' is removed")]
    EmptyKey { identifier: String, suffix: String },
}

/// Derive a part key from a sequence record identifier.
///
/// The suffix is removed only when the identifier ends with it; other
/// identifiers are used unchanged.
///
/// # Examples
///
/// ```
/// use sbol_plan::utils::validation::part_key;
///
/// assert_eq!(part_key("pTet_sequence", "_sequence").unwrap(), "pTet");
/// assert_eq!(part_key("pTet", "_sequence").unwrap(), "pTet");
/// assert!(part_key("_sequence", "_sequence").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyKey` if nothing is left after stripping.
pub fn part_key<'a>(identifier: &'a str, suffix: &str) -> Result<&'a str, ValidationError> {
    let key = identifier.strip_suffix(suffix).unwrap_or(identifier);
    if key.is_empty() {
        return Err(ValidationError::EmptyKey {
            identifier: identifier.to_string(),
            suffix: suffix.to_string(),
        });
    }
    Ok(key)
}

/// Drop the last `suffix_len` characters of a sub-component identifier.
///
/// Counts characters, not bytes. The remainder must be non-empty.
///
/// # Examples
///
/// ```
/// use sbol_plan::utils::validation::strip_positional_suffix;
///
/// assert_eq!(strip_positional_suffix("B0034_1", 2).unwrap(), "B0034");
/// assert!(strip_positional_suffix("A", 2).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::TooShort` if the identifier has `suffix_len`
/// characters or fewer.
pub fn strip_positional_suffix(
    identifier: &str,
    suffix_len: usize,
) -> Result<&str, ValidationError> {
    let too_short = || ValidationError::TooShort {
        identifier: identifier.to_string(),
        suffix_len,
    };

    if suffix_len == 0 {
        return if identifier.is_empty() {
            Err(too_short())
        } else {
            Ok(identifier)
        };
    }

    // Byte offset of the char `suffix_len` positions from the end
    let cut = identifier
        .char_indices()
        .rev()
        .nth(suffix_len - 1)
        .map(|(idx, _)| idx)
        .ok_or_else(too_short)?;

    if cut == 0 {
        return Err(too_short());
    }
    Ok(&identifier[..cut])
}

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_key() {
        assert_eq!(part_key("A_sequence", PART_SEQUENCE_SUFFIX).unwrap(), "A");
        // Only a trailing suffix is removed
        assert_eq!(
            part_key("A_sequence_v2", PART_SEQUENCE_SUFFIX).unwrap(),
            "A_sequence_v2"
        );
        assert_eq!(
            part_key("_sequence", PART_SEQUENCE_SUFFIX),
            Err(ValidationError::EmptyKey {
                identifier: "_sequence".to_string(),
                suffix: "_sequence".to_string(),
            })
        );
        assert!(part_key("", PART_SEQUENCE_SUFFIX).is_err());
    }

    #[test]
    fn test_strip_positional_suffix() {
        assert_eq!(strip_positional_suffix("A01", 2).unwrap(), "A");
        assert_eq!(strip_positional_suffix("pTet_1", 2).unwrap(), "pTet");
        assert_eq!(strip_positional_suffix("ABC", 0).unwrap(), "ABC");
    }

    #[test]
    fn test_strip_positional_suffix_too_short() {
        for id in ["", "A", "AB"] {
            assert_eq!(
                strip_positional_suffix(id, 2),
                Err(ValidationError::TooShort {
                    identifier: id.to_string(),
                    suffix_len: 2,
                }),
                "'{id}' should be rejected"
            );
        }
        assert!(strip_positional_suffix("", 0).is_err());
    }

    #[test]
    fn test_strip_positional_suffix_counts_chars() {
        // Multi-byte characters in the suffix must not split a code point
        assert_eq!(strip_positional_suffix("Aβ1", 2).unwrap(), "A");
        assert_eq!(strip_positional_suffix("Δ701", 2).unwrap(), "Δ7");
    }

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }
}
