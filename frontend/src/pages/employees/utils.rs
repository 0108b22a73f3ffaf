use std::collections::BTreeMap;

use crate::{
    api::{EmployeePayload, EmployeeRecord, EmployeeStatus},
    utils::{format::percentage, time::parse_iso_date},
};

pub const DEPARTMENT_OPTIONS: &[(&str, &str)] = &[
    ("engineering", "Engineering"),
    ("marketing", "Marketing"),
    ("sales", "Sales"),
    ("hr", "Human Resources"),
    ("finance", "Finance"),
    ("operations", "Operations"),
    ("cse", "CSE"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployeeForm {
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub hire_date: String,
    pub salary: String,
    pub status: EmployeeStatus,
}

impl Default for NewEmployeeForm {
    fn default() -> Self {
        Self {
            employee_code: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: String::new(),
            position: String::new(),
            hire_date: String::new(),
            salary: String::new(),
            status: EmployeeStatus::Active,
        }
    }
}

impl NewEmployeeForm {
    pub fn is_valid(&self) -> bool {
        !(self.employee_code.trim().is_empty()
            || self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.department.trim().is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Unparseable salaries are reported rather than silently dropped.
    pub fn to_payload(&self) -> Result<EmployeePayload, String> {
        let salary = match self.salary.trim() {
            "" => None,
            raw => Some(
                raw.replace(',', "")
                    .parse::<f64>()
                    .map_err(|_| format!("Salary must be a number, got '{}'", raw))?,
            ),
        };
        let hire_date = match self.hire_date.trim() {
            "" => None,
            raw => Some(parse_iso_date(raw).ok_or_else(|| format!("Invalid hire date '{}'", raw))?),
        };
        Ok(EmployeePayload {
            employee_id: self.employee_code.trim().to_string(),
            full_name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
            phone: optional(&self.phone),
            position: optional(&self.position),
            hire_date,
            salary,
            status: Some(self.status),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }
}

/// Headline numbers for the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub active_share: String,
    pub average_salary: f64,
    pub departments: Vec<(String, usize)>,
}

impl EmployeeStats {
    pub fn from_records(records: &[EmployeeRecord]) -> Self {
        let total = records.len();
        let active = records.iter().filter(|r| r.is_active()).count();
        let average_salary = if total == 0 {
            0.0
        } else {
            records.iter().map(EmployeeRecord::salary_or_zero).sum::<f64>() / total as f64
        };
        let mut departments = BTreeMap::<String, usize>::new();
        for record in records {
            *departments.entry(record.department.clone()).or_default() += 1;
        }
        Self {
            total,
            active,
            inactive: total - active,
            active_share: percentage(active, total),
            average_salary,
            departments: departments.into_iter().collect(),
        }
    }
}

pub fn status_badge_class(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => {
            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium bg-status-success-bg text-status-success-text"
        }
        EmployeeStatus::Inactive => {
            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium bg-surface-muted text-fg-muted"
        }
    }
}

pub fn department_label(value: &str) -> String {
    DEPARTMENT_OPTIONS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(value))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}
