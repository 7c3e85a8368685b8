//! Display casing for service and sub-service labels.
//!
//! The matrix stores labels upper-cased. On the printed document they are
//! title-cased, except that domain acronyms (tax forms, regulatory bodies)
//! must stay upper case and a handful of labels have an exact rename.

use std::collections::BTreeSet;

use crate::assembly::rules::RuleSet;
use crate::models::normalize_label;

/// Renders a normalized label for the document.
///
/// An exact override wins outright; otherwise the label is title-cased and
/// acronym tokens are restored to upper case.
pub fn display_case(
    label: &str,
    rules: &RuleSet,
) -> String {
    let normalized = normalize_label(label);
    if let Some(exact) = rules.display_overrides.get(&normalized) {
        return exact.clone();
    }
    title_case_with_acronyms(&normalized, &rules.acronyms)
}

/// Title-cases a label segment by segment. Segments are maximal runs of
/// alphanumerics; separators (spaces, hyphens, slashes, parentheses) pass
/// through unchanged, so "GSTR-1 FILING" keeps its hyphen.
fn title_case_with_acronyms(
    label: &str,
    acronyms: &BTreeSet<String>,
) -> String {
    let mut out = String::with_capacity(label.len());
    let mut segment = String::new();

    for ch in label.chars() {
        if ch.is_alphanumeric() {
            segment.push(ch);
        } else {
            flush_segment(&mut out, &mut segment, acronyms);
            out.push(ch);
        }
    }
    flush_segment(&mut out, &mut segment, acronyms);

    out
}

fn flush_segment(
    out: &mut String,
    segment: &mut String,
    acronyms: &BTreeSet<String>,
) {
    if segment.is_empty() {
        return;
    }
    let upper = segment.to_uppercase();
    if acronyms.contains(&upper) {
        out.push_str(&upper);
    } else {
        let mut seen_alpha = false;
        for ch in segment.chars() {
            if !ch.is_alphabetic() {
                out.push(ch);
            } else if seen_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
                seen_alpha = true;
            }
        }
    }
    segment.clear();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rules() -> RuleSet {
        RuleSet::default()
    }

    #[test]
    fn plain_labels_are_title_cased() {
        assert_eq!(display_case("ANNUAL ACCOUNTING", &rules()), "Annual Accounting");
        assert_eq!(display_case("STATUTORY AUDIT", &rules()), "Statutory Audit");
    }

    #[test]
    fn acronym_tokens_stay_upper_case() {
        assert_eq!(display_case("GST RETURNS", &rules()), "GST Returns");
        assert_eq!(display_case("GSTR-1 FILING", &rules()), "GSTR-1 Filing");
        assert_eq!(display_case("TDS/TCS RETURNS", &rules()), "TDS/TCS Returns");
        assert_eq!(display_case("ROC ANNUAL FILING", &rules()), "ROC Annual Filing");
    }

    #[test]
    fn hyphenated_form_numbers_keep_their_shape() {
        assert_eq!(display_case("AOC-4 FILING", &rules()), "AOC-4 Filing");
        assert_eq!(display_case("DIR-3 KYC", &rules()), "DIR-3 KYC");
    }

    #[test]
    fn exact_overrides_beat_the_acronym_rule() {
        assert_eq!(display_case("E-WAY BILL", &rules()), "e-Way Bill");
        assert_eq!(display_case("FORM 26QB", &rules()), "Form 26QB");
    }

    #[test]
    fn input_casing_does_not_matter() {
        assert_eq!(display_case("  gst returns ", &rules()), "GST Returns");
    }

    #[test]
    fn empty_sub_service_renders_empty() {
        assert_eq!(display_case("", &rules()), "");
    }
}
