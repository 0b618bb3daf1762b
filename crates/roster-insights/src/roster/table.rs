use super::domain::{columns, LeaveStatus, QueueType, RawTable, RoleCategory, Scalar};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A canonical column together with the upload header it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRef {
    pub name: String,
    pub source_header: String,
}

/// Which source column fed each classifier, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifierSources {
    pub queue_type: Option<String>,
    pub loa_status: Option<String>,
    pub role_category: Option<String>,
}

/// One roster row after header normalization and classification. Cell values
/// are kept in column order and serialize as one flat object in that order,
/// followed by whichever derived labels were computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRecord {
    pub(crate) values: Vec<(String, String)>,
    pub queue_type: Option<QueueType>,
    pub loa_status: Option<LeaveStatus>,
    pub role_category: Option<RoleCategory>,
}

impl CanonicalRecord {
    /// Reads any column by canonical name, derived labels included.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            columns::QUEUE_TYPE => self.queue_type.map(QueueType::label),
            columns::LOA_STATUS => self.loa_status.map(LeaveStatus::label),
            columns::ROLE_CATEGORY => self.role_category.map(RoleCategory::label),
            _ => self
                .values
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.as_str()),
        }
    }

    /// Cell values in column order, derived labels excluded.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn employee_id(&self) -> Option<&str> {
        self.get(columns::EMPLOYEE_ID)
    }

    pub fn employee_name(&self) -> Option<&str> {
        self.get(columns::EMPLOYEE_NAME)
    }

    pub fn department(&self) -> Option<&str> {
        self.get(columns::DEPARTMENT)
    }

    pub fn queue(&self) -> Option<&str> {
        self.get(columns::QUEUE)
    }

    pub fn position(&self) -> Option<&str> {
        self.get(columns::POSITION)
    }

    pub fn status(&self) -> Option<&str> {
        self.get(columns::STATUS)
    }

    pub fn is_loa(&self) -> bool {
        self.loa_status == Some(LeaveStatus::Loa)
    }

    pub fn is_voice(&self) -> bool {
        self.queue_type == Some(QueueType::Voice)
    }

    pub fn is_management(&self) -> bool {
        self.role_category.is_some_and(RoleCategory::is_management)
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        if let Some(queue_type) = self.queue_type {
            map.serialize_entry(columns::QUEUE_TYPE, &queue_type)?;
        }
        if let Some(loa_status) = self.loa_status {
            map.serialize_entry(columns::LOA_STATUS, &loa_status)?;
        }
        if let Some(role_category) = self.role_category {
            map.serialize_entry(columns::ROLE_CATEGORY, &role_category)?;
        }
        map.end()
    }
}

/// Roster after cleaning: canonical columns in header order, derived columns
/// after the source columns they were computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalTable {
    pub(crate) columns: Vec<ColumnRef>,
    pub(crate) records: Vec<CanonicalRecord>,
    pub(crate) sources: ClassifierSources,
}

impl CanonicalTable {
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn sources(&self) -> &ClassifierSources {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose `department` equals `department` exactly.
    pub fn department_records<'a>(
        &'a self,
        department: &'a str,
    ) -> impl Iterator<Item = &'a CanonicalRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.department() == Some(department))
    }

    /// Same columns, only the records of one department and optionally one of
    /// its queues.
    pub fn scoped(&self, department: &str, queue: Option<&str>) -> CanonicalTable {
        let records = self
            .department_records(department)
            .filter(|record| queue.is_none() || record.queue() == queue)
            .cloned()
            .collect();

        CanonicalTable {
            columns: self.columns.clone(),
            records,
            sources: self.sources.clone(),
        }
    }

    /// Converts back into an uploadable table, keeping column order. Present
    /// but blank cells stay text so no row turns fully empty on re-cleaning.
    pub fn to_raw(&self) -> RawTable {
        let headers = self
            .columns
            .iter()
            .map(|column| column.name.clone())
            .collect();
        let rows = self
            .records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| match record.get(&column.name) {
                        Some(value) => Scalar::Text(value.to_string()),
                        None => Scalar::Empty,
                    })
                    .collect()
            })
            .collect();

        RawTable::new(headers, rows)
    }
}
