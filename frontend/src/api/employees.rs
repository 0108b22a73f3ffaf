use log::{info, warn};

use super::{
    client::ApiClient,
    types::{ApiEmployee, ApiError, EmployeeListing, EmployeePayload, EmployeeRecord},
};

pub const SAMPLE_DATA_NOTICE: &str = "Using sample data - API unavailable";

impl ApiClient {
    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, ApiError> {
        self.employee_listing().await.map(|listing| listing.records)
    }

    /// Like [`ApiClient::list_employees`], but reports whether the records
    /// came from the backend or from the sample fallback.
    pub async fn employee_listing(&self) -> Result<EmployeeListing, ApiError> {
        match self.fetch_listing().await {
            Ok(records) => Ok(EmployeeListing::from_backend(records)),
            Err(error) => match self.sample_fallback().records() {
                Some(samples) => {
                    warn!("Using sample employees, backend unavailable: {}", error);
                    Ok(EmployeeListing::from_sample(
                        samples,
                        format!("{} ({})", SAMPLE_DATA_NOTICE, error.error),
                    ))
                }
                None => Err(error),
            },
        }
    }

    async fn fetch_listing(&self) -> Result<Vec<EmployeeRecord>, ApiError> {
        let url = self.endpoint("/employee/employees/").await;
        let response = self
            .execute(self.http_client().get(&url), "Failed to fetch employees")
            .await?;
        let employees: Vec<ApiEmployee> =
            Self::read_json(response, "Failed to fetch employees").await?;
        Ok(employees.into_iter().map(EmployeeRecord::from_listing).collect())
    }

    /// Blank queries are answered with the full listing and never reach the
    /// search endpoint.
    pub async fn search_employees(&self, query: &str) -> Result<Vec<EmployeeRecord>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_employees().await;
        }
        let url = self.endpoint("/employee/employees/search/").await;
        let response = self
            .execute(
                self.http_client().get(&url).query(&[("search", query)]),
                "Search failed",
            )
            .await?;
        let employees: Vec<ApiEmployee> = Self::read_json(response, "Search failed").await?;
        Ok(employees.into_iter().map(EmployeeRecord::from_search).collect())
    }

    pub async fn get_employee(&self, employee_code: &str) -> Result<EmployeeRecord, ApiError> {
        let code = employee_code.trim();
        if code.is_empty() {
            return Err(ApiError::validation("Employee ID is required"));
        }
        let url = self.endpoint("/employee/employees/search/").await;
        let response = self
            .execute(
                self.http_client().get(&url).query(&[("search", code)]),
                "Failed to fetch employee",
            )
            .await?;
        let employees: Vec<ApiEmployee> =
            Self::read_json(response, "Failed to fetch employee").await?;
        employees
            .into_iter()
            .find(|employee| employee.employee_id == code)
            .map(EmployeeRecord::from_search)
            .ok_or_else(|| ApiError::not_found(format!("Employee with ID {} not found", code)))
    }

    pub async fn create_employee(
        &self,
        payload: &EmployeePayload,
    ) -> Result<EmployeeRecord, ApiError> {
        let missing = payload.missing_required_fields();
        if !missing.is_empty() {
            return Err(ApiError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        let url = self.endpoint("/employee/employees/add/").await;
        let response = self
            .execute(
                self.http_client().post(&url).json(payload),
                "Failed to create employee",
            )
            .await?;
        let employee: ApiEmployee = Self::read_json(response, "Failed to create employee").await?;
        info!("Created employee {}", employee.employee_id);
        Ok(EmployeeRecord::from_search(employee))
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: &EmployeePayload,
    ) -> Result<EmployeeRecord, ApiError> {
        let url = self.endpoint(&format!("/employee/employees/{}/", id)).await;
        let response = self
            .execute(
                self.http_client().put(&url).json(payload),
                "Failed to update employee",
            )
            .await?;
        let employee: ApiEmployee = Self::read_json(response, "Failed to update employee").await?;
        Ok(EmployeeRecord::from_listing(employee))
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), ApiError> {
        let url = self
            .endpoint(&format!("/employee/employees/delete/{}/", id))
            .await;
        self.execute(self.http_client().delete(&url), "Failed to delete employee")
            .await?;
        info!("Deleted employee {}", id);
        Ok(())
    }
}
