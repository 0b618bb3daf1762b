mod rules;

pub use rules::{LEAVE_STATUS_RULES, QUEUE_TYPE_RULES, ROLE_CATEGORY_RULES};

use crate::roster::domain::columns;

/// One ordered rule: any keyword found in the value selects the label.
#[derive(Debug)]
pub struct KeywordRule<L: 'static> {
    pub keywords: &'static [&'static str],
    pub label: L,
}

/// First-match-wins classifier for one derived column.
///
/// Values are trimmed and lower-cased before matching. Blank values (and the
/// listed `blank_values`) map to `blank_label`; values no rule matches map to
/// `fallback`, so every input yields exactly one label.
#[derive(Debug)]
pub struct RuleSet<L: 'static> {
    pub column: &'static str,
    pub source_keywords: &'static [&'static str],
    pub blank_values: &'static [&'static str],
    pub blank_label: L,
    pub rules: &'static [KeywordRule<L>],
    pub fallback: L,
}

impl<L: Copy> RuleSet<L> {
    pub fn classify(&self, raw: &str) -> L {
        let value = raw.trim().to_lowercase();
        if value.is_empty() || self.blank_values.contains(&value.as_str()) {
            return self.blank_label;
        }

        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| value.contains(keyword)))
            .map(|rule| rule.label)
            .unwrap_or(self.fallback)
    }

    /// Picks the first column, in header order, whose canonical name contains
    /// one of the source keywords. Derived columns are never candidates.
    pub fn source_column<'a, S: AsRef<str>>(&self, columns: &'a [S]) -> Option<&'a str> {
        columns
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !columns::is_derived(name))
            .find(|name| {
                let lowered = name.to_lowercase();
                self.source_keywords
                    .iter()
                    .any(|keyword| lowered.contains(keyword))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::{LeaveStatus, QueueType, RoleCategory};

    #[test]
    fn queue_type_rules_follow_priority_order() {
        let rules = &QUEUE_TYPE_RULES;
        assert_eq!(rules.classify(""), QueueType::NotAssigned);
        assert_eq!(rules.classify("  Not Assigned "), QueueType::NotAssigned);
        assert_eq!(rules.classify("Pro Support English"), QueueType::Voice);
        assert_eq!(rules.classify("Enterprise Chat"), QueueType::Voice);
        assert_eq!(rules.classify("Chat - Tier 1"), QueueType::NonVoice);
        assert_eq!(rules.classify("Email Escalation"), QueueType::NonVoice);
        assert_eq!(rules.classify("Knowledge Base"), QueueType::NonVoice);
        assert_eq!(rules.classify("Billing"), QueueType::Voice);
    }

    #[test]
    fn leave_status_rules_cover_documented_scenarios() {
        let rules = &LEAVE_STATUS_RULES;
        assert_eq!(rules.classify("On Leave of Absence"), LeaveStatus::Loa);
        assert_eq!(rules.classify("LOA - Medical"), LeaveStatus::Loa);
        assert_eq!(rules.classify("Normal"), LeaveStatus::Active);
        assert_eq!(rules.classify("ACTIVE"), LeaveStatus::Active);
        assert_eq!(
            rules.classify("Work From Home - Approved"),
            LeaveStatus::WorkFromHome
        );
        assert_eq!(rules.classify("Special Project"), LeaveStatus::Project);
        assert_eq!(rules.classify("Suspended"), LeaveStatus::Other);
        assert_eq!(rules.classify(""), LeaveStatus::Active);
    }

    #[test]
    fn role_rules_cover_documented_scenarios() {
        let rules = &ROLE_CATEGORY_RULES;
        assert_eq!(rules.classify("Senior Manager, Support"), RoleCategory::Manager);
        assert_eq!(rules.classify("Team Lead"), RoleCategory::TeamLeader);
        assert_eq!(rules.classify(""), RoleCategory::Unknown);
        assert_eq!(rules.classify("Director of Operations"), RoleCategory::Director);
        assert_eq!(rules.classify("Technical Lead"), RoleCategory::TeamLeader);
        assert_eq!(
            rules.classify("Support Specialist"),
            RoleCategory::IndividualContributor
        );
        assert_eq!(rules.classify("Agent"), RoleCategory::IndividualContributor);
    }

    #[test]
    fn director_outranks_manager_keyword() {
        assert_eq!(
            ROLE_CATEGORY_RULES.classify("Director, Program Manager Office"),
            RoleCategory::Director
        );
    }

    #[test]
    fn classifiers_only_emit_enumerated_labels() {
        let samples = [
            "", " ", "nan", "Voice", "chat", "12345", "Ωmega", "LOA", "tl", "???",
        ];
        for sample in samples {
            assert!(QueueType::ordered().contains(&QUEUE_TYPE_RULES.classify(sample)));
            assert!(LeaveStatus::ordered().contains(&LEAVE_STATUS_RULES.classify(sample)));
            assert!(RoleCategory::ordered().contains(&ROLE_CATEGORY_RULES.classify(sample)));
        }
    }

    #[test]
    fn source_column_uses_first_match_in_header_order() {
        let headers = ["employee_id", "channel", "queue", "status", "position"];
        assert_eq!(QUEUE_TYPE_RULES.source_column(&headers), Some("channel"));
        assert_eq!(LEAVE_STATUS_RULES.source_column(&headers), Some("status"));
        assert_eq!(ROLE_CATEGORY_RULES.source_column(&headers), Some("position"));
    }

    #[test]
    fn source_column_skips_derived_outputs() {
        let headers = ["employee_name", "queue_type", "loa_status", "role_category"];
        assert_eq!(QUEUE_TYPE_RULES.source_column(&headers), None);
        assert_eq!(LEAVE_STATUS_RULES.source_column(&headers), None);
        assert_eq!(ROLE_CATEGORY_RULES.source_column(&headers), None);
    }
}
