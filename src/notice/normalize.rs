use unicode_general_category::{get_general_category, GeneralCategory};

use crate::models::NormalizedKey;

/// Tokens dropped wherever they appear as a whole word.
const STOPWORDS: &[&str] = &[
    "copyright",
    "c",
    "by",
    "corp",
    "corporation",
    "inc",
    "affiliates",
    "all",
    "rights",
    "reserved",
    "and",
    "the",
    "team",
    "authors",
    "license",
];

/// Standalone tokens accepted between the two years of a range.
///
/// `-` is listed for completeness but punctuation is mapped to spaces before
/// tokenizing, so only `to` can actually separate a range. En and em dashes
/// are punctuation too and are never recognised as separators.
const RANGE_SEPARATORS: &[&str] = &["-", "to"];

/// Widest span, in years, still treated as a year range.
const MAX_RANGE_SPAN: u32 = 100;

/// Compute the comparison key for a notice.
///
/// Lowercases, turns punctuation and symbols into spaces, then drops
/// stopwords, bare four-digit years and `YYYY to YYYY` ranges.
pub fn normalize(s: &str) -> NormalizedKey {
    let mapped: String = s
        .to_lowercase()
        .chars()
        .map(|c| if is_punct_or_symbol(c) { ' ' } else { c })
        .collect();

    let tokens: Vec<&str> = mapped.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        if let Some(start) = as_year(token) {
            let range_end = match (tokens.get(i + 1), tokens.get(i + 2)) {
                (Some(sep), Some(end)) if RANGE_SEPARATORS.contains(sep) => as_year(end),
                _ => None,
            };
            match range_end {
                Some(end) if end > start && end - start <= MAX_RANGE_SPAN => i += 3,
                _ => i += 1,
            }
            continue;
        }

        if !STOPWORDS.contains(&token) {
            kept.push(token);
        }
        i += 1;
    }

    NormalizedKey::new(kept.join(" "))
}

/// Unicode punctuation (P*) or symbol (S*) categories. Marks, format and
/// private-use characters stay part of their token.
fn is_punct_or_symbol(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
            | GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}

fn as_year(token: &str) -> Option<u32> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(s: &str) -> String {
        normalize(s).to_string()
    }

    #[test]
    fn test_equivalent_notices_share_a_key() {
        assert_eq!(key("Copyright (c) 2020 Acme Corp."), "acme");
        assert_eq!(
            normalize("Copyright (c) 2020 Acme Corp."),
            normalize("copyright 2020 ACME CORP")
        );
    }

    #[test]
    fn test_stopwords_only_match_whole_tokens() {
        assert_eq!(key("Copyright The Chromium Authors"), "chromium");
        assert_eq!(key("Corpus Inclusive"), "corpus inclusive");
    }

    #[test]
    fn test_symbols_become_separators() {
        assert_eq!(key("© 2021 Foo-Bar, Inc."), "foo bar");
        assert_eq!(key("Jane <jane@example.org>"), "jane jane example org");
    }

    #[test]
    fn test_combining_marks_stay_in_token() {
        assert_ne!(
            normalize("Copyright 2020 Rene\u{301} Dupont"),
            normalize("Copyright 2020 Rene Dupont")
        );
        assert_eq!(key("Copyright 2020 Rene\u{301} Dupont"), "rene\u{301} dupont");
        assert_eq!(key("Ann\u{200d}Lee Ltd"), "ann\u{200d}lee ltd");
    }

    #[test]
    fn test_bare_years_dropped() {
        assert_eq!(key("Copyright 2019, 2020, 2021 Example"), "example");
        assert_eq!(key("Copyright 2019-2021 Example"), "example");
    }

    #[test]
    fn test_year_range_with_to_dropped_as_unit() {
        assert_eq!(key("Copyright 2019 to 2021 Example"), "example");
    }

    #[test]
    fn test_implausible_range_keeps_separator() {
        // Span over 100 years or descending: each year goes, `to` stays.
        assert_eq!(key("2019 to 2150 Example"), "to example");
        assert_eq!(key("2021 to 2019 Example"), "to example");
        assert_eq!(key("copy to clipboard"), "copy to clipboard");
    }

    #[test]
    fn test_non_year_numbers_kept() {
        assert_eq!(key("Version 12345 build 42"), "version 12345 build 42");
        assert_eq!(key("Acme 202a"), "acme 202a");
    }

    #[test]
    fn test_empty_and_all_stopwords() {
        assert_eq!(key(""), "");
        assert_eq!(key("Copyright (C) All Rights Reserved."), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Copyright (c) 2020 Acme Corp.",
            "// Copyright 2019 to 2021 The Example Authors",
            "© 1999-2004 Foo & Bar, Inc. <foo@bar.com>",
            "Portions copyright 2001 to 2150 Someone",
            "ÉCOLE Polytechnique — all rights reserved",
            "to to 2020 to",
        ];
        for s in samples {
            let once = normalize(s);
            let twice = normalize(&once.to_string());
            assert_eq!(once, twice, "not idempotent for {:?}", s);
        }
    }

    proptest! {
        /// Property: normalizing a key again yields the same key
        #[test]
        fn normalize_is_idempotent_for_any_input(input in any::<String>()) {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once.to_string()), once);
        }

        /// Property: years, separators and stopwords never change a key
        #[test]
        fn years_and_stopwords_do_not_affect_key(
            holder in "[a-z]{1,8}( [a-z]{1,8}){0,3}",
            start in 1900u32..2000,
            span in 1u32..=100,
        ) {
            let plain = normalize(&holder);
            let decorated = normalize(&format!(
                "Copyright (c) {} to {}, {} {} Inc. All rights reserved.",
                start,
                start + span,
                holder,
                start
            ));
            prop_assert_eq!(decorated, plain);
        }
    }
}
