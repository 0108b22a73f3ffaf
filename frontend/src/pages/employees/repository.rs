use crate::api::{ApiClient, ApiError, EmployeeListing, EmployeePayload, EmployeeRecord};
use std::rc::Rc;

#[derive(Clone)]
pub struct EmployeesRepository {
    client: Rc<ApiClient>,
}

impl Default for EmployeesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeesRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Gateway handed to the list state drivers.
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    pub async fn fetch_listing(&self) -> Result<EmployeeListing, ApiError> {
        self.client.employee_listing().await
    }

    pub async fn create_employee(
        &self,
        payload: EmployeePayload,
    ) -> Result<EmployeeRecord, ApiError> {
        self.client.create_employee(&payload).await
    }
}
