use chrono::NaiveDate;
use leptos::*;
use log::debug;

use crate::{
    api::{
        ApiClient, ApiError, AttendanceRecord, AttendanceStatus, EmployeeRecord,
        MarkAttendanceRequest,
    },
    state::fetch::{FetchPhase, FetchToken, RequestGeneration},
    utils::{format::percentage, time::today_local},
};

/// How long the success message stays up before the flow asks its host to close.
pub const CLOSE_DELAY_MS: u32 = 1500;

pub const SUCCESS_MESSAGE: &str = "Attendance marked successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
}

/// Form state for marking one employee on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkAttendanceState {
    pub employee_code: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub submitting: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub closed: bool,
}

impl MarkAttendanceState {
    pub fn new(
        employee_code: impl Into<String>,
        employee_name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            employee_code: employee_code.into(),
            employee_name: employee_name.into(),
            date,
            status: AttendanceStatus::Present,
            submitting: false,
            error: None,
            success: None,
            closed: false,
        }
    }

    /// Defaults to today when no day is given.
    pub fn for_employee(employee: &EmployeeRecord, date: Option<NaiveDate>) -> Self {
        Self::new(
            employee.employee_code.clone(),
            employee.name.clone(),
            date.unwrap_or_else(today_local),
        )
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && self.success.is_none() && !self.closed
    }

    pub fn select_status(&mut self, status: AttendanceStatus) {
        if self.can_submit() {
            self.status = status;
        }
    }

    /// Returns the request to send, or `None` while a submission is pending,
    /// after success, or when no employee is attached.
    pub fn begin_submit(&mut self) -> Option<MarkAttendanceRequest> {
        if !self.can_submit() {
            return None;
        }
        if self.employee_code.trim().is_empty() {
            self.error = Some("No employee selected".to_string());
            return None;
        }
        self.submitting = true;
        self.error = None;
        self.success = None;
        Some(MarkAttendanceRequest {
            employee_code: self.employee_code.clone(),
            date: self.date,
            status: self.status,
        })
    }

    pub fn finish_submit(&mut self, result: Result<AttendanceRecord, ApiError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(_) => {
                self.success = Some(SUCCESS_MESSAGE.to_string());
                self.error = None;
                SubmitOutcome::Succeeded
            }
            Err(error) => {
                self.error = Some(error.error);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

/// Sends the flow's request and folds the answer back in. Returns `None`
/// when nothing was sent or the flow was replaced or disposed meanwhile.
pub async fn submit_attendance(
    api: &ApiClient,
    flow: RwSignal<Option<MarkAttendanceState>>,
) -> Option<SubmitOutcome> {
    let request = flow
        .try_update(|f| f.as_mut().and_then(MarkAttendanceState::begin_submit))
        .flatten()?;
    let result = api.mark_attendance(&request).await;
    flow.try_update(|f| match f.as_mut() {
        Some(state) if state.submitting && state.employee_code == request.employee_code => {
            Some(state.finish_submit(result))
        }
        _ => {
            debug!("Attendance flow replaced before response arrived");
            None
        }
    })
    .flatten()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyStatus {
    Present,
    Absent,
    NotMarked,
}

impl DailyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DailyStatus::Present => "Present",
            DailyStatus::Absent => "Absent",
            DailyStatus::NotMarked => "Not Marked",
        }
    }
}

impl From<AttendanceStatus> for DailyStatus {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => DailyStatus::Present,
            AttendanceStatus::Absent => DailyStatus::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total_employees: usize,
    pub present: usize,
    pub absent: usize,
    pub marked: usize,
    pub pending: usize,
    pub attendance_rate: String,
}

impl AttendanceSummary {
    pub fn compute(records: &[AttendanceRecord], total_employees: usize) -> Self {
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let absent = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count();
        let marked = present + absent;
        Self {
            total_employees,
            present,
            absent,
            marked,
            pending: total_employees.saturating_sub(marked),
            attendance_rate: percentage(present, total_employees),
        }
    }
}

/// Records for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAttendanceState {
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecord>,
    pub phase: FetchPhase,
    generation: RequestGeneration,
}

impl DailyAttendanceState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
            phase: FetchPhase::Idle,
            generation: RequestGeneration::default(),
        }
    }

    pub fn begin_load(&mut self, date: NaiveDate) -> FetchToken {
        if self.date != date {
            self.records.clear();
        }
        self.date = date;
        self.phase = FetchPhase::Loading;
        self.generation.next()
    }

    pub fn finish_load(
        &mut self,
        token: FetchToken,
        result: Result<Vec<AttendanceRecord>, ApiError>,
    ) -> bool {
        if !self.generation.is_current(token) {
            debug!("Discarding stale attendance for {}", self.date);
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.phase = FetchPhase::Loaded;
            }
            Err(error) => self.phase = FetchPhase::Error(error.error),
        }
        true
    }

    /// First matching record wins; duplicates are the backend's concern.
    pub fn status_for(&self, employee: &EmployeeRecord) -> DailyStatus {
        self.records
            .iter()
            .find(|r| r.employee.matches(employee))
            .map(|r| DailyStatus::from(r.status))
            .unwrap_or(DailyStatus::NotMarked)
    }

    pub fn summary(&self, total_employees: usize) -> AttendanceSummary {
        AttendanceSummary::compute(&self.records, total_employees)
    }
}

pub async fn load_daily_attendance(
    api: &ApiClient,
    state: RwSignal<DailyAttendanceState>,
    date: NaiveDate,
) -> Result<(), ApiError> {
    let Some(token) = state.try_update(|s| s.begin_load(date)) else {
        return Ok(());
    };
    let result = api.get_attendance_by_date(Some(date)).await;
    let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
    state.try_update(|s| s.finish_load(token, result));
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EmployeeRef, EmployeeStatus};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn record(id: i64, employee: EmployeeRef, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee,
            date: day(),
            status,
            employee_name: None,
        }
    }

    fn employee(id: i64, code: &str) -> EmployeeRecord {
        EmployeeRecord {
            id,
            employee_code: code.into(),
            user_id: None,
            name: format!("Employee {}", id),
            email: format!("{}@company.com", code),
            phone: None,
            department: "Engineering".into(),
            position: None,
            hire_date: None,
            salary: None,
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn new_flow_defaults_to_present_and_idle() {
        let flow = MarkAttendanceState::new("EMP001", "John Smith", day());
        assert_eq!(flow.status, AttendanceStatus::Present);
        assert!(!flow.submitting);
        assert!(flow.is_open());
        assert!(flow.can_submit());
    }

    #[test]
    fn submitting_blocks_resubmission() {
        let mut flow = MarkAttendanceState::new("EMP001", "John Smith", day());
        flow.select_status(AttendanceStatus::Absent);
        let request = flow.begin_submit().unwrap();
        assert_eq!(request.status, AttendanceStatus::Absent);
        assert_eq!(request.date, day());
        assert!(flow.submitting);
        assert!(flow.begin_submit().is_none());
        flow.select_status(AttendanceStatus::Present);
        assert_eq!(flow.status, AttendanceStatus::Absent);
    }

    #[test]
    fn failure_reopens_for_retry() {
        let mut flow = MarkAttendanceState::new("EMP001", "John Smith", day());
        flow.begin_submit().unwrap();
        let outcome = flow.finish_submit(Err(ApiError::request_failed("offline")));
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(flow.error.as_deref(), Some("offline"));
        assert!(!flow.submitting);
        assert!(flow.is_open());
        assert!(flow.begin_submit().is_some());
        assert!(flow.error.is_none());
    }

    #[test]
    fn missing_employee_is_reported_without_submitting() {
        let mut flow = MarkAttendanceState::new("  ", "", day());
        assert!(flow.begin_submit().is_none());
        assert_eq!(flow.error.as_deref(), Some("No employee selected"));
        assert!(!flow.submitting);
    }

    #[test]
    fn success_then_close() {
        let mut flow = MarkAttendanceState::new("EMP001", "John Smith", day());
        flow.begin_submit().unwrap();
        let outcome = flow.finish_submit(Ok(record(
            9,
            EmployeeRef::Id(1),
            AttendanceStatus::Present,
        )));
        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(flow.success.as_deref(), Some(SUCCESS_MESSAGE));
        assert!(flow.begin_submit().is_none());
        flow.close();
        assert!(!flow.is_open());
    }

    #[test]
    fn status_lookup_matches_id_or_code() {
        let mut state = DailyAttendanceState::new(day());
        let token = state.begin_load(day());
        state.finish_load(
            token,
            Ok(vec![
                record(1, EmployeeRef::Id(1), AttendanceStatus::Present),
                record(2, EmployeeRef::Code("EMP002".into()), AttendanceStatus::Absent),
            ]),
        );
        assert_eq!(state.status_for(&employee(1, "EMP001")), DailyStatus::Present);
        assert_eq!(state.status_for(&employee(2, "EMP002")), DailyStatus::Absent);
        assert_eq!(state.status_for(&employee(3, "EMP003")), DailyStatus::NotMarked);
    }

    #[test]
    fn summary_counts_and_rate() {
        let records = vec![
            record(1, EmployeeRef::Id(1), AttendanceStatus::Present),
            record(2, EmployeeRef::Id(2), AttendanceStatus::Absent),
            record(3, EmployeeRef::Id(3), AttendanceStatus::Present),
        ];
        let summary = AttendanceSummary::compute(&records, 4);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.marked, 3);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.attendance_rate, "50.0%");

        let empty = AttendanceSummary::compute(&records, 0);
        assert_eq!(empty.pending, 0);
        assert_eq!(empty.attendance_rate, "0%");
    }

    #[test]
    fn stale_day_load_is_discarded() {
        let mut state = DailyAttendanceState::new(day());
        let first = state.begin_load(day());
        let next_day = day().succ_opt().unwrap();
        let second = state.begin_load(next_day);
        assert!(!state.finish_load(
            first,
            Ok(vec![record(1, EmployeeRef::Id(1), AttendanceStatus::Present)])
        ));
        assert!(state.finish_load(second, Ok(Vec::new())));
        assert_eq!(state.date, next_day);
        assert!(state.records.is_empty());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new_with_base_url(server.url("/api"))
    }

    fn march_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn marking_succeeds_and_waits_for_close() {
        let server = MockServer::start_async().await;
        let mark = server.mock(|when, then| {
            when.method(POST)
                .path("/api/employee/attendance/mark/")
                .json_body(json!({"employee": "EMP001", "date": "2024-03-01", "status": "present"}));
            then.status(201).json_body(json!({
                "id": 9, "employee": 1, "date": "2024-03-01", "status": "present"
            }));
        });

        let runtime = create_runtime();
        let flow = create_rw_signal(Some(MarkAttendanceState::new(
            "EMP001",
            "John Smith",
            march_first(),
        )));
        let outcome = submit_attendance(&client(&server), flow).await;
        assert_eq!(outcome, Some(SubmitOutcome::Succeeded));

        let snapshot = flow.get_untracked().unwrap();
        assert_eq!(snapshot.success.as_deref(), Some(SUCCESS_MESSAGE));
        assert!(!snapshot.submitting);
        assert!(snapshot.is_open());
        assert!(!snapshot.can_submit());
        mark.assert_hits(1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn field_error_is_surfaced_and_flow_stays_open() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/employee/attendance/mark/");
            then.status(400)
                .json_body(json!({"employee": ["This field is required."]}));
        });

        let runtime = create_runtime();
        let flow = create_rw_signal(Some(MarkAttendanceState::new(
            "EMP001",
            "John Smith",
            march_first(),
        )));
        let outcome = submit_attendance(&client(&server), flow).await;
        assert_eq!(outcome, Some(SubmitOutcome::Failed));

        let snapshot = flow.get_untracked().unwrap();
        assert_eq!(
            snapshot.error.as_deref(),
            Some("employee: This field is required.")
        );
        assert!(!snapshot.submitting);
        assert!(snapshot.success.is_none());
        assert!(snapshot.is_open());
        runtime.dispose();
    }

    #[tokio::test]
    async fn replaced_flow_ignores_late_response() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/employee/attendance/mark/");
            then.status(201).json_body(json!({
                "id": 9, "employee": 1, "date": "2024-03-01", "status": "present"
            }));
        });

        let runtime = create_runtime();
        let flow = create_rw_signal(Some(MarkAttendanceState::new(
            "EMP001",
            "John Smith",
            march_first(),
        )));
        let api = client(&server);
        let (outcome, _) = futures::join!(submit_attendance(&api, flow), async {
            flow.set(Some(MarkAttendanceState::new(
                "EMP002",
                "Sarah Johnson",
                march_first(),
            )));
        });
        assert_eq!(outcome, None);
        let snapshot = flow.get_untracked().unwrap();
        assert_eq!(snapshot.employee_code, "EMP002");
        assert!(snapshot.success.is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn daily_load_applies_records_for_date() {
        let server = MockServer::start_async().await;
        let by_date = server.mock(|when, then| {
            when.method(GET)
                .path("/api/employee/attendance/")
                .query_param("date", "2024-03-01");
            then.status(200).json_body(json!([
                {"id": 1, "employee": 1, "date": "2024-03-01", "status": "present"}
            ]));
        });

        let runtime = create_runtime();
        let state = create_rw_signal(DailyAttendanceState::new(march_first()));
        load_daily_attendance(&client(&server), state, march_first())
            .await
            .unwrap();
        let snapshot = state.get_untracked();
        assert_eq!(snapshot.phase, FetchPhase::Loaded);
        assert_eq!(snapshot.records.len(), 1);
        by_date.assert_hits(1);
        runtime.dispose();
    }
}
