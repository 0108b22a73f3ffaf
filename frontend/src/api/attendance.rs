use chrono::NaiveDate;
use log::info;

use super::{
    client::{encode_segment, ApiClient},
    types::{ApiError, AttendanceRecord, MarkAttendanceRequest},
};

impl ApiClient {
    pub async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, ApiError> {
        if request.employee_code.trim().is_empty() {
            return Err(ApiError::validation("No employee selected"));
        }
        let url = self.endpoint("/employee/attendance/mark/").await;
        let response = self
            .execute(
                self.http_client().post(&url).json(request),
                "Failed to mark attendance",
            )
            .await?;
        let record: AttendanceRecord =
            Self::read_json(response, "Failed to mark attendance").await?;
        info!(
            "Marked {} {} on {}",
            request.employee_code,
            request.status.as_str(),
            request.date
        );
        Ok(record)
    }

    /// `None` lets the backend pick the day (today in practice).
    pub async fn get_attendance_by_date(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let url = self.endpoint("/employee/attendance/").await;
        let mut request = self.http_client().get(&url);
        if let Some(date) = date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        let response = self
            .execute(request, "Failed to fetch attendance records")
            .await?;
        Self::read_json(response, "Failed to fetch attendance records").await
    }

    pub async fn get_employee_attendance(
        &self,
        employee_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let url = self
            .endpoint(&format!(
                "/employee/attendance/employee/{}/",
                encode_segment(employee_id.trim())
            ))
            .await;
        let mut query_params = Vec::new();
        if let Some(start) = start_date {
            query_params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end_date {
            query_params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        let mut request = self.http_client().get(&url);
        if !query_params.is_empty() {
            request = request.query(&query_params);
        }
        let response = self
            .execute(request, "Failed to fetch employee attendance")
            .await?;
        Self::read_json(response, "Failed to fetch employee attendance").await
    }
}
