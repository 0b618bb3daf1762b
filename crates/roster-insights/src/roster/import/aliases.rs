use crate::roster::domain::columns;
use std::collections::HashMap;
use std::sync::OnceLock;

static HEADER_ALIAS_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

pub(crate) fn canonical_alias(slug: &str) -> Option<&'static str> {
    header_alias_map().get(slug).copied()
}

fn header_alias_map() -> &'static HashMap<&'static str, &'static str> {
    HEADER_ALIAS_MAP.get_or_init(|| {
        const SLUG_TO_COLUMN: &[(&str, &str)] = &[
            // Identity
            ("badge", columns::EMPLOYEE_ID),
            ("name", columns::EMPLOYEE_NAME),
            ("full_name", columns::EMPLOYEE_NAME),
            // Line of business
            ("lob", columns::DEPARTMENT),
            ("business_unit", columns::DEPARTMENT),
            // Vertical
            ("phone_queue", columns::QUEUE),
            // Title
            ("title", columns::POSITION),
            ("role", columns::POSITION),
            ("job_title", columns::POSITION),
            // Status
            ("queuestatus", columns::STATUS),
        ];

        SLUG_TO_COLUMN.iter().copied().collect()
    })
}
