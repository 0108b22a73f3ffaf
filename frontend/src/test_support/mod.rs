#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiClient, EmployeeRecord, EmployeeStatus};
    use chrono::NaiveDate;
    use leptos::*;

    pub fn employee(id: i64, code: &str, name: &str, department: &str) -> EmployeeRecord {
        EmployeeRecord {
            id,
            employee_code: code.into(),
            user_id: None,
            name: name.into(),
            email: format!("{}@company.com", code.to_lowercase()),
            phone: None,
            department: department.into(),
            position: None,
            hire_date: NaiveDate::from_ymd_opt(2022, 3, 15),
            salary: Some(100000.0),
            status: EmployeeStatus::Active,
        }
    }

    /// Points every page in the current runtime at `base_url` with the
    /// sample fallback off.
    pub fn provide_api(base_url: &str) {
        provide_context(ApiClient::new_with_base_url(base_url));
    }
}
