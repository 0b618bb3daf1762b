use super::{KeywordRule, RuleSet};
use crate::roster::domain::{columns, LeaveStatus, QueueType, RoleCategory};

/// Voice vs Non-Voice queue split. Unmatched queues default to Voice.
pub static QUEUE_TYPE_RULES: RuleSet<QueueType> = RuleSet {
    column: columns::QUEUE_TYPE,
    source_keywords: &["queue", "phone_queue", "channel", "subqueue"],
    blank_values: &["not assigned"],
    blank_label: QueueType::NotAssigned,
    rules: &[
        KeywordRule {
            keywords: &[
                "support",
                "commercial",
                "enterprise",
                "server",
                "english",
                "pro support",
            ],
            label: QueueType::Voice,
        },
        KeywordRule {
            keywords: &[
                "chat",
                "email",
                "ticket",
                "knowledge",
                "operations",
                "escalation",
            ],
            label: QueueType::NonVoice,
        },
    ],
    fallback: QueueType::Voice,
};

pub static LEAVE_STATUS_RULES: RuleSet<LeaveStatus> = RuleSet {
    column: columns::LOA_STATUS,
    source_keywords: &["status", "queuestatus", "loa", "leave", "absence"],
    blank_values: &[],
    blank_label: LeaveStatus::Active,
    rules: &[
        KeywordRule {
            keywords: &["leave of absence", "loa"],
            label: LeaveStatus::Loa,
        },
        KeywordRule {
            keywords: &["normal", "active"],
            label: LeaveStatus::Active,
        },
        KeywordRule {
            keywords: &["work from home"],
            label: LeaveStatus::WorkFromHome,
        },
        KeywordRule {
            keywords: &["project"],
            label: LeaveStatus::Project,
        },
    ],
    fallback: LeaveStatus::Other,
};

pub static ROLE_CATEGORY_RULES: RuleSet<RoleCategory> = RuleSet {
    column: columns::ROLE_CATEGORY,
    source_keywords: &["position", "role", "title", "designation"],
    blank_values: &[],
    blank_label: RoleCategory::Unknown,
    rules: &[
        KeywordRule {
            keywords: &["director"],
            label: RoleCategory::Director,
        },
        KeywordRule {
            keywords: &["manager", "support manager"],
            label: RoleCategory::Manager,
        },
        KeywordRule {
            keywords: &["lead", "technical lead", "team lead", "tl"],
            label: RoleCategory::TeamLeader,
        },
        KeywordRule {
            keywords: &["specialist", "expert", "analyst", "engineer", "technician"],
            label: RoleCategory::IndividualContributor,
        },
    ],
    fallback: RoleCategory::IndividualContributor,
};
