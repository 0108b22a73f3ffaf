use chrono::NaiveDate;
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(EmployeeStatus::Active),
            "inactive" => Some(EmployeeStatus::Inactive),
            _ => None,
        }
    }
}

/// Employee object as the backend serializes it. The list, search and create
/// endpoints share this shape; only the mapping rules differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEmployee {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
}

/// Local employee shape used by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub employee_code: String,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
}

impl EmployeeRecord {
    /// Maps objects returned by the list and update endpoints.
    pub fn from_listing(api: ApiEmployee) -> Self {
        Self {
            id: api.id,
            employee_code: api.employee_id,
            user_id: None,
            name: api.full_name,
            email: api.email,
            phone: non_blank(api.phone),
            department: api.department,
            position: non_blank(api.position),
            hire_date: api.hire_date,
            salary: api.salary,
            status: api.status.unwrap_or_default(),
        }
    }

    /// Maps objects returned by the search and create endpoints. A blank
    /// `employee_id` falls back to the numeric id.
    pub fn from_search(api: ApiEmployee) -> Self {
        let employee_code = if api.employee_id.trim().is_empty() {
            api.id.to_string()
        } else {
            api.employee_id
        };
        Self {
            id: api.id,
            employee_code,
            user_id: api.user,
            name: api.full_name,
            email: api.email,
            phone: non_blank(api.phone),
            department: api.department,
            position: non_blank(api.position),
            hire_date: api.hire_date,
            salary: api.salary,
            status: api.status.unwrap_or_default(),
        }
    }

    pub fn salary_or_zero(&self) -> f64 {
        self.salary.unwrap_or(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Employees returned by a listing call. `sample_reason` is set when the
/// backend could not be reached and the built-in sample set was served.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListing {
    pub records: Vec<EmployeeRecord>,
    pub sample_reason: Option<String>,
}

impl EmployeeListing {
    pub fn from_backend(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records,
            sample_reason: None,
        }
    }

    pub fn from_sample(records: Vec<EmployeeRecord>, reason: impl Into<String>) -> Self {
        Self {
            records,
            sample_reason: Some(reason.into()),
        }
    }

    pub fn is_sample(&self) -> bool {
        self.sample_reason.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body for `POST /employee/employees/add/` and `PUT /employee/employees/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl EmployeePayload {
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.employee_id.trim().is_empty() {
            missing.push("employee_id");
        }
        if self.full_name.trim().is_empty() {
            missing.push("full_name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.department.trim().is_empty() {
            missing.push("department");
        }
        missing
    }
}

impl From<&EmployeeRecord> for EmployeePayload {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            employee_id: record.employee_code.clone(),
            full_name: record.name.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
            phone: record.phone.clone(),
            position: record.position.clone(),
            hire_date: record.hire_date,
            salary: record.salary,
            status: Some(record.status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

/// Weak reference from an attendance record to an employee. The backend
/// reports numeric ids, while marking sends the employee code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeRef {
    Id(i64),
    Code(String),
}

impl EmployeeRef {
    pub fn matches(&self, employee: &EmployeeRecord) -> bool {
        match self {
            EmployeeRef::Id(id) => *id == employee.id,
            EmployeeRef::Code(code) => {
                code == &employee.employee_code || code.parse::<i64>().ok() == Some(employee.id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee: EmployeeRef,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

/// Body for `POST /employee/attendance/mark/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(rename = "employee")]
    pub employee_code: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

pub const CODE_REQUEST_FAILED: &str = "REQUEST_FAILED";
pub const CODE_HTTP_ERROR: &str = "HTTP_ERROR";
pub const CODE_PARSE_ERROR: &str = "PARSE_ERROR";
pub const CODE_VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_VALIDATION_ERROR)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_UNKNOWN)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_REQUEST_FAILED)
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_PARSE_ERROR)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_NOT_FOUND)
    }

    pub fn http_status(status: u16, msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::with_code(msg, CODE_HTTP_ERROR)
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_validation(&self) -> bool {
        self.code == CODE_VALIDATION_ERROR
    }
}
