//! The fixed input alphabet and the character classes defined over it.
//!
//! Every pattern is interpreted over Σ: the 95 printable ASCII characters
//! plus the five whitespace controls (tab, newline, vertical tab, form
//! feed, carriage return).  Negated classes (`[^...]`, `\D`, `\S`, `\W`)
//! are resolved against Σ at parse time, so the automata only ever carry
//! plain character edges.

/// The full alphabet Σ, sorted by code point.
///
/// Tables here must stay sorted and free of duplicates; [`complement`]
/// relies on binary search.
pub const SIGMA: &[char] = &[
    '\t', '\n', '\x0B', '\x0C', '\r', ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+',
    ',', '-', '.', '/', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>',
    '?', '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q',
    'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_', '`', 'a', 'b', 'c', 'd',
    'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
    'x', 'y', 'z', '{', '|', '}', '~',
];

/// `\d` — ASCII digits.
pub const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// `\s` — whitespace (the five controls and the space character).
pub const WHITESPACE: &[char] = &['\t', '\n', '\x0B', '\x0C', '\r', ' '];

/// `\w` — word characters: digits, letters and underscore.
pub const WORD: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '_', 'a',
    'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't',
    'u', 'v', 'w', 'x', 'y', 'z',
];

/// Σ minus `elements`.  The input must be sorted by code point; the result
/// is sorted by code point.
pub fn complement(elements: &[char]) -> Vec<char> {
    SIGMA
        .iter()
        .copied()
        .filter(|c| elements.binary_search(c).is_err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted_dedup(table: &[char]) -> bool {
        table.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(SIGMA.len(), 100);
        assert_eq!(DIGITS.len(), 10);
        assert_eq!(WHITESPACE.len(), 6);
        assert_eq!(WORD.len(), 63);
    }

    #[test]
    fn test_tables_sorted_without_duplicates() {
        assert!(is_sorted_dedup(SIGMA));
        assert!(is_sorted_dedup(DIGITS));
        assert!(is_sorted_dedup(WHITESPACE));
        assert!(is_sorted_dedup(WORD));
    }

    #[test]
    fn test_classes_are_subsets_of_sigma() {
        for table in [DIGITS, WHITESPACE, WORD] {
            assert!(table.iter().all(|c| SIGMA.binary_search(c).is_ok()));
        }
    }

    #[test]
    fn test_complement_of_empty_is_sigma() {
        assert_eq!(complement(&[]), SIGMA.to_vec());
    }

    #[test]
    fn test_complement_of_sigma_is_empty() {
        assert!(complement(SIGMA).is_empty());
    }

    #[test]
    fn test_complement_partitions_sigma() {
        let not_digits = complement(DIGITS);
        assert_eq!(not_digits.len(), SIGMA.len() - DIGITS.len());
        assert!(not_digits.iter().all(|c| !c.is_ascii_digit()));

        let not_words = complement(WORD);
        assert_eq!(not_words.len() + WORD.len(), SIGMA.len());
        assert!(is_sorted_dedup(&not_words));
    }
}
