use serde::{Deserialize, Serialize};

use crate::models::matrix::normalize_label;

/// The ten client constitutions the firm quotes for.
///
/// `as_str` yields the spelling used in the matrix spreadsheet (normalized
/// form); `display_name` yields the form printed on documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClientType {
    PrivateLimited,
    Proprietorship,
    Individual,
    Llp,
    Huf,
    Society,
    PartnershipFirm,
    ForeignEntity,
    AopBoi,
    Trust,
}

impl ClientType {
    pub const ALL: [ClientType; 10] = [
        Self::PrivateLimited,
        Self::Proprietorship,
        Self::Individual,
        Self::Llp,
        Self::Huf,
        Self::Society,
        Self::PartnershipFirm,
        Self::ForeignEntity,
        Self::AopBoi,
        Self::Trust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateLimited => "PRIVATE LIMITED",
            Self::Proprietorship => "PROPRIETORSHIP",
            Self::Individual => "INDIVIDUAL",
            Self::Llp => "LLP",
            Self::Huf => "HUF",
            Self::Society => "SOCIETY",
            Self::PartnershipFirm => "PARTNERSHIP FIRM",
            Self::ForeignEntity => "FOREIGN ENTITY",
            Self::AopBoi => "AOP/ BOI",
            Self::Trust => "TRUST",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PrivateLimited => "Private Limited",
            Self::Proprietorship => "Proprietorship",
            Self::Individual => "Individual",
            Self::Llp => "LLP",
            Self::Huf => "HUF",
            Self::Society => "Society",
            Self::PartnershipFirm => "Partnership Firm",
            Self::ForeignEntity => "Foreign Entity",
            Self::AopBoi => "AOP/ BOI",
            Self::Trust => "Trust",
        }
    }

    /// Parses any spelling that normalizes (trim + upper-case) to one of the
    /// matrix labels.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = normalize_label(s);
        Self::ALL
            .iter()
            .copied()
            .find(|ct| ct.as_str() == normalized)
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_matrix_spelling() {
        assert_eq!(ClientType::parse("LLP"), Some(ClientType::Llp));
        assert_eq!(
            ClientType::parse("PARTNERSHIP FIRM"),
            Some(ClientType::PartnershipFirm)
        );
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(
            ClientType::parse("  private limited "),
            Some(ClientType::PrivateLimited)
        );
        assert_eq!(ClientType::parse("aop/ boi"), Some(ClientType::AopBoi));
    }

    #[test]
    fn parse_rejects_unknown_constitution() {
        assert_eq!(ClientType::parse("SOLE TRADER"), None);
    }

    #[test]
    fn round_trips_through_as_str() {
        for ct in ClientType::ALL {
            assert_eq!(ClientType::parse(ct.as_str()), Some(ct));
        }
    }
}
