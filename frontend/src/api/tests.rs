#![cfg(not(coverage))]

use super::*;
use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;

fn employee_json(id: i64, code: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": 40 + id,
        "employee_id": code,
        "full_name": name,
        "email": format!("{}@company.com", code.to_lowercase()),
        "department": "Engineering",
        "phone": "+1 (555) 123-4567",
        "position": "Engineer",
        "hire_date": "2022-03-15",
        "salary": 125000.0,
        "status": "active"
    })
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api"))
}

fn payload(code: &str) -> EmployeePayload {
    EmployeePayload {
        employee_id: code.into(),
        full_name: "Ada Lovelace".into(),
        email: "ada@company.com".into(),
        department: "engineering".into(),
        phone: None,
        position: None,
        hire_date: None,
        salary: Some(120000.0),
        status: Some(EmployeeStatus::Active),
    }
}

fn march_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[tokio::test]
async fn list_maps_listing_shape() {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/");
        then.status(200).json_body(json!([
            employee_json(1, "EMP001", "John Smith"),
            {
                "id": 2,
                "employee_id": "EMP002",
                "full_name": "Sarah Johnson",
                "email": "sarah@company.com",
                "department": "Marketing"
            }
        ]));
    });

    let records = client(&server).list_employees().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].employee_code, "EMP001");
    assert_eq!(records[0].name, "John Smith");
    assert_eq!(records[0].user_id, None);
    assert_eq!(records[0].salary, Some(125000.0));
    assert_eq!(records[1].hire_date, None);
    assert_eq!(records[1].status, EmployeeStatus::Active);
    list.assert_hits(1);
}

#[tokio::test]
async fn listing_twice_yields_same_records() {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/");
        then.status(200)
            .json_body(json!([employee_json(1, "EMP001", "John Smith")]));
    });

    let api = client(&server);
    let first = api.list_employees().await.unwrap();
    let second = api.list_employees().await.unwrap();
    assert_eq!(first, second);
    list.assert_hits(2);
}

#[tokio::test]
async fn blank_search_is_served_by_listing() {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/");
        then.status(200)
            .json_body(json!([employee_json(1, "EMP001", "John Smith")]));
    });
    let search = server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/search/");
        then.status(200).json_body(json!([]));
    });

    let records = client(&server).search_employees("   ").await.unwrap();
    assert_eq!(records.len(), 1);
    list.assert_hits(1);
    search.assert_hits(0);
}

#[tokio::test]
async fn search_maps_search_shape() {
    let server = MockServer::start_async().await;
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/api/employee/employees/search/")
            .query_param("search", "john");
        then.status(200).json_body(json!([
            employee_json(1, "EMP001", "John Smith"),
            {
                "id": 7,
                "user": 12,
                "employee_id": "",
                "full_name": "Johnny Blank",
                "email": "johnny@company.com",
                "department": "Sales"
            }
        ]));
    });

    let records = client(&server).search_employees(" john ").await.unwrap();
    assert_eq!(records[0].user_id, Some(41));
    assert_eq!(records[1].employee_code, "7");
    assert_eq!(records[1].user_id, Some(12));
    search.assert_hits(1);
}

#[tokio::test]
async fn get_employee_requires_exact_code() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/employee/employees/search/")
            .query_param("search", "EMP00");
        then.status(200).json_body(json!([
            employee_json(1, "EMP001", "John Smith"),
            employee_json(2, "EMP002", "Sarah Johnson")
        ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/employee/employees/search/")
            .query_param("search", "EMP002");
        then.status(200)
            .json_body(json!([employee_json(2, "EMP002", "Sarah Johnson")]));
    });

    let api = client(&server);
    let err = api.get_employee("EMP00").await.unwrap_err();
    assert_eq!(err.code, CODE_NOT_FOUND);

    let found = api.get_employee("EMP002").await.unwrap();
    assert_eq!(found.name, "Sarah Johnson");
}

#[tokio::test]
async fn create_checks_required_fields_before_sending() {
    let server = MockServer::start_async().await;
    let add = server.mock(|when, then| {
        when.method(POST).path("/api/employee/employees/add/");
        then.status(201)
            .json_body(employee_json(3, "EMP003", "Ada Lovelace"));
    });

    let api = client(&server);
    let mut incomplete = payload("EMP003");
    incomplete.email = "  ".into();
    let err = api.create_employee(&incomplete).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.error.contains("email"));
    add.assert_hits(0);

    let created = api.create_employee(&payload("EMP003")).await.unwrap();
    assert_eq!(created.employee_code, "EMP003");
    assert_eq!(created.user_id, Some(43));
    add.assert_hits(1);
}

#[tokio::test]
async fn create_surfaces_field_errors() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/employee/employees/add/");
        then.status(400)
            .json_body(json!({"email": ["Enter a valid email address."]}));
    });

    let err = client(&server)
        .create_employee(&payload("EMP003"))
        .await
        .unwrap_err();
    assert_eq!(err.error, "email: Enter a valid email address.");
    assert_eq!(err.code, CODE_VALIDATION_ERROR);
    assert_eq!(err.status, Some(400));
    assert!(err.details.is_some());
}

#[tokio::test]
async fn update_puts_to_numeric_id() {
    let server = MockServer::start_async().await;
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/employee/employees/1/")
            .json_body_partial(r#"{"status": "inactive"}"#);
        then.status(200).json_body(json!({
            "id": 1,
            "user": 41,
            "employee_id": "EMP001",
            "full_name": "John Smith",
            "email": "emp001@company.com",
            "department": "Engineering",
            "status": "inactive"
        }));
    });

    let mut body = payload("EMP001");
    body.status = Some(EmployeeStatus::Inactive);
    let updated = client(&server).update_employee(1, &body).await.unwrap();
    assert_eq!(updated.status, EmployeeStatus::Inactive);
    assert_eq!(updated.user_id, None);
    update.assert_hits(1);
}

#[tokio::test]
async fn delete_reports_http_failure() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(DELETE).path("/api/employee/employees/delete/2/");
        then.status(204);
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/employee/employees/delete/3/");
        then.status(500).body("boom");
    });

    let api = client(&server);
    api.delete_employee(2).await.unwrap();

    let err = api.delete_employee(3).await.unwrap_err();
    assert_eq!(err.code, CODE_HTTP_ERROR);
    assert_eq!(err.status, Some(500));
    assert!(err.error.starts_with("Failed to delete employee: 500"));
}

#[tokio::test]
async fn mark_attendance_sends_employee_code() {
    let server = MockServer::start_async().await;
    let mark = server.mock(|when, then| {
        when.method(POST)
            .path("/api/employee/attendance/mark/")
            .json_body(json!({"employee": "EMP001", "date": "2024-03-01", "status": "present"}));
        then.status(201).json_body(json!({
            "id": 9, "employee": 1, "date": "2024-03-01", "status": "present"
        }));
    });

    let record = client(&server)
        .mark_attendance(&MarkAttendanceRequest {
            employee_code: "EMP001".into(),
            date: march_first(),
            status: AttendanceStatus::Present,
        })
        .await
        .unwrap();
    assert_eq!(record.id, 9);
    assert_eq!(record.employee, EmployeeRef::Id(1));
    mark.assert_hits(1);
}

#[tokio::test]
async fn mark_attendance_field_error_message() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/employee/attendance/mark/");
        then.status(400)
            .json_body(json!({"employee": ["This field is required."]}));
    });

    let err = client(&server)
        .mark_attendance(&MarkAttendanceRequest {
            employee_code: "EMP001".into(),
            date: march_first(),
            status: AttendanceStatus::Absent,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error, "employee: This field is required.");
}

#[tokio::test]
async fn mark_attendance_without_employee_never_sends() {
    let server = MockServer::start_async().await;
    let mark = server.mock(|when, then| {
        when.method(POST).path("/api/employee/attendance/mark/");
        then.status(201);
    });

    let err = client(&server)
        .mark_attendance(&MarkAttendanceRequest {
            employee_code: " ".into(),
            date: march_first(),
            status: AttendanceStatus::Present,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error, "No employee selected");
    mark.assert_hits(0);
}

#[tokio::test]
async fn attendance_by_date_passes_date_query() {
    let server = MockServer::start_async().await;
    let by_date = server.mock(|when, then| {
        when.method(GET)
            .path("/api/employee/attendance/")
            .query_param("date", "2024-03-01");
        then.status(200).json_body(json!([
            {"id": 1, "employee": 1, "date": "2024-03-01", "status": "present"},
            {"id": 2, "employee": "EMP002", "date": "2024-03-01", "status": "absent",
             "employee_name": "Sarah Johnson"}
        ]));
    });

    let records = client(&server)
        .get_attendance_by_date(Some(march_first()))
        .await
        .unwrap();
    assert_eq!(records[1].employee, EmployeeRef::Code("EMP002".into()));
    assert_eq!(records[1].employee_name.as_deref(), Some("Sarah Johnson"));
    by_date.assert_hits(1);
}

#[tokio::test]
async fn attendance_without_date_leaves_day_to_backend() {
    let server = MockServer::start_async().await;
    let dated = server.mock(|when, then| {
        when.method(GET)
            .path("/api/employee/attendance/")
            .query_param_exists("date");
        then.status(400).json_body(json!({"detail": "unexpected date"}));
    });
    let today = server.mock(|when, then| {
        when.method(GET).path("/api/employee/attendance/");
        then.status(200).json_body(json!([
            {"id": 3, "employee": "EMP001", "date": "2024-03-01", "status": "absent"}
        ]));
    });

    let records = client(&server).get_attendance_by_date(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee, EmployeeRef::Code("EMP001".into()));
    assert_eq!(records[0].status, AttendanceStatus::Absent);
    assert_eq!(records[0].date, march_first());
    dated.assert_hits(0);
    today.assert_hits(1);
}

#[tokio::test]
async fn listing_reports_sample_source() {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/");
        then.status(200)
            .json_body(json!([employee_json(1, "EMP001", "John Smith")]));
    });

    let live = client(&server).employee_listing().await.unwrap();
    assert!(!live.is_sample());
    assert_eq!(live.records.len(), 1);
    list.assert_hits(1);

    let offline = ApiClient::new_with_base_url("http://127.0.0.1:9")
        .with_sample_fallback(SampleFallback::builtin())
        .employee_listing()
        .await
        .unwrap();
    assert!(offline.is_sample());
    assert!(offline
        .sample_reason
        .as_deref()
        .is_some_and(|reason| reason.starts_with(SAMPLE_DATA_NOTICE)));
    assert_eq!(offline.records, sample_employees());
}

#[tokio::test]
async fn employee_history_uses_range_params() {
    let server = MockServer::start_async().await;
    let history = server.mock(|when, then| {
        when.method(GET)
            .path("/api/employee/attendance/employee/EMP001/")
            .query_param("start_date", "2024-03-01")
            .query_param("end_date", "2024-03-31");
        then.status(200).json_body(json!([
            {"id": 5, "employee": 1, "date": "2024-03-04", "status": "present"}
        ]));
    });

    let records = client(&server)
        .get_employee_attendance(
            "EMP001",
            Some(march_first()),
            NaiveDate::from_ymd_opt(2024, 3, 31),
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    history.assert_hits(1);
}

#[tokio::test]
async fn unparseable_body_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/");
        then.status(200).body("<html>not json</html>");
    });

    let err = client(&server).list_employees().await.unwrap_err();
    assert_eq!(err.code, CODE_PARSE_ERROR);
}

#[tokio::test]
async fn unreachable_backend_is_a_request_failure() {
    let err = ApiClient::new_with_base_url("http://127.0.0.1:9")
        .list_employees()
        .await
        .unwrap_err();
    assert_eq!(err.code, CODE_REQUEST_FAILED);
    assert!(err.error.starts_with("Failed to fetch employees"));
}

#[tokio::test]
async fn sample_fallback_only_when_enabled() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/employee/employees/");
        then.status(503).json_body(json!({"detail": "Service unavailable"}));
    });

    let err = client(&server).list_employees().await.unwrap_err();
    assert_eq!(err.error, "Service unavailable");
    assert_eq!(err.status, Some(503));

    let records = client(&server)
        .with_sample_fallback(SampleFallback::builtin())
        .list_employees()
        .await
        .unwrap();
    assert_eq!(records, sample_employees());
}
