use chrono::NaiveDate;
use std::rc::Rc;

use crate::api::{ApiClient, ApiError, AttendanceRecord};

#[derive(Clone)]
pub struct AttendanceRepository {
    client: Rc<ApiClient>,
}

impl Default for AttendanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Gateway handed to the marking and daily-load drivers.
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    pub async fn fetch_employee_history(
        &self,
        employee_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.client
            .get_employee_attendance(employee_id, from, to)
            .await
    }
}
