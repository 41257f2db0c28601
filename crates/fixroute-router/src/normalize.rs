// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collapses free-form provider output into the closed [`Label`] set.

use fixroute_core::Label;

/// Maps provider output to a label by containment, not equality.
///
/// The whole trimmed text is checked, so extra words around a label are
/// tolerated. `QUOTE` wins over `BOND`; anything else, including a literal
/// `GENERAL`, is [`Label::General`].
pub fn normalize_output(raw: &str) -> Label {
    let cleaned = raw.trim().to_uppercase();
    if cleaned.contains("QUOTE") {
        Label::QuoteRequest
    } else if cleaned.contains("BOND") {
        Label::BondRequest
    } else {
        Label::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_tolerates_extra_words() {
        assert_eq!(normalize_output("The answer is QuoteRequest."), Label::QuoteRequest);
        assert_eq!(normalize_output("  BondRequest\n"), Label::BondRequest);
    }

    #[test]
    fn any_case_is_accepted() {
        assert_eq!(normalize_output("bondrequest"), Label::BondRequest);
        assert_eq!(normalize_output("BONDREQUEST"), Label::BondRequest);
        assert_eq!(normalize_output("quoterequest"), Label::QuoteRequest);
    }

    #[test]
    fn unmatched_output_is_general() {
        assert_eq!(normalize_output("I don't know"), Label::General);
        assert_eq!(normalize_output("GENERAL"), Label::General);
        assert_eq!(normalize_output(""), Label::General);
    }

    #[test]
    fn quote_wins_when_both_present() {
        assert_eq!(normalize_output("BondRequest or QuoteRequest"), Label::QuoteRequest);
    }

    #[test]
    fn surrounding_words_do_not_hide_the_label() {
        assert_eq!(normalize_output("BondRequest (Output: see above)"), Label::BondRequest);
        assert_eq!(normalize_output("Output: QuoteRequest"), Label::QuoteRequest);
    }
}
