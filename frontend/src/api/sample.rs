use chrono::NaiveDate;

use crate::{
    api::types::{EmployeeRecord, EmployeeStatus},
    config,
};

/// What `list_employees` does when the backend is unreachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SampleFallback {
    /// Serve the built-in sample set only if the runtime config enables it.
    #[default]
    FromConfig,
    Disabled,
    Enabled(Vec<EmployeeRecord>),
}

impl SampleFallback {
    pub fn builtin() -> Self {
        SampleFallback::Enabled(sample_employees())
    }

    pub fn records(&self) -> Option<Vec<EmployeeRecord>> {
        match self {
            SampleFallback::Disabled => None,
            SampleFallback::Enabled(records) => Some(records.clone()),
            SampleFallback::FromConfig => config::current()
                .sample_fallback_enabled()
                .then(sample_employees),
        }
    }
}

pub fn sample_employees() -> Vec<EmployeeRecord> {
    vec![
        EmployeeRecord {
            id: 1,
            employee_code: "EMP001".into(),
            user_id: None,
            name: "John Smith".into(),
            email: "john.smith@company.com".into(),
            phone: Some("+1 (555) 123-4567".into()),
            department: "Engineering".into(),
            position: Some("Senior Software Engineer".into()),
            hire_date: NaiveDate::from_ymd_opt(2022, 3, 15),
            salary: Some(125000.0),
            status: EmployeeStatus::Active,
        },
        EmployeeRecord {
            id: 2,
            employee_code: "EMP002".into(),
            user_id: None,
            name: "Sarah Johnson".into(),
            email: "sarah.j@company.com".into(),
            phone: Some("+1 (555) 234-5678".into()),
            department: "Marketing".into(),
            position: Some("Marketing Director".into()),
            hire_date: NaiveDate::from_ymd_opt(2020, 8, 22),
            salary: Some(95000.0),
            status: EmployeeStatus::Active,
        },
    ]
}
