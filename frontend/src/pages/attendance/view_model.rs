use crate::api::{
    ApiClient, ApiError, AttendanceRecord, AttendanceStatus, EmployeeListing, EmployeeRecord,
};
use crate::pages::{
    attendance::{
        repository::AttendanceRepository,
        utils::{recent_range, HistoryRangeForm},
    },
    employees::repository::EmployeesRepository,
};
use crate::state::attendance::{
    load_daily_attendance, submit_attendance, DailyAttendanceState, MarkAttendanceState,
    SubmitOutcome, CLOSE_DELAY_MS,
};
use crate::utils::time::today_local;
use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use leptos::*;
use log::{info, warn};
use std::rc::Rc;

fn repositories() -> (AttendanceRepository, EmployeesRepository) {
    let api = Rc::new(use_context::<ApiClient>().unwrap_or_else(ApiClient::new));
    (
        AttendanceRepository::new_with_client(api.clone()),
        EmployeesRepository::new_with_client(api),
    )
}

/// Drives one mark-attendance dialog. Lives as long as the dialog does.
#[derive(Clone, Copy)]
pub struct MarkAttendanceController {
    pub flow: RwSignal<Option<MarkAttendanceState>>,
    repository: StoredValue<AttendanceRepository>,
    // Dropping the pending timeout cancels it.
    close_timer: StoredValue<Option<Timeout>>,
    on_done: Callback<bool>,
}

/// `on_done(true)` fires after a successful mark once the close delay has
/// elapsed; `on_done(false)` when the user dismisses the dialog.
pub fn use_mark_attendance(
    employee: &EmployeeRecord,
    date: Option<NaiveDate>,
    on_done: Callback<bool>,
) -> MarkAttendanceController {
    let (repository, _) = repositories();
    MarkAttendanceController {
        flow: create_rw_signal(Some(MarkAttendanceState::for_employee(employee, date))),
        repository: store_value(repository),
        close_timer: store_value(None),
        on_done,
    }
}

impl MarkAttendanceController {
    pub fn select_status(&self, status: AttendanceStatus) {
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                flow.select_status(status);
            }
        });
    }

    pub fn submit(&self) {
        let repo = self.repository.get_value();
        let controller = *self;
        spawn_local(async move {
            if submit_attendance(repo.api(), controller.flow).await == Some(SubmitOutcome::Succeeded)
            {
                controller.schedule_close();
            }
        });
    }

    /// Arms the close delay, replacing any pending one.
    pub fn schedule_close(&self) {
        let controller = *self;
        let timeout = Timeout::new(CLOSE_DELAY_MS, move || {
            controller.close_after_success();
        });
        self.close_timer
            .try_update_value(|slot| *slot = Some(timeout));
    }

    /// Closes a flow that is showing its success message and fires
    /// `on_done(true)`. Dismissed, failed or disposed flows are left alone
    /// and `false` is returned.
    pub fn close_after_success(&self) -> bool {
        let closed = self
            .flow
            .try_update(|flow| match flow.as_mut() {
                Some(state) if state.is_open() && state.success.is_some() => {
                    state.close();
                    true
                }
                _ => false,
            })
            .unwrap_or(false);
        if closed {
            self.on_done.call(true);
        }
        closed
    }

    pub fn dismiss(&self) {
        let blocked = self
            .flow
            .try_with_untracked(|flow| flow.as_ref().is_some_and(|f| f.submitting))
            .unwrap_or(true);
        if blocked {
            return;
        }
        self.close_timer.update_value(|slot| {
            slot.take();
        });
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                flow.close();
            }
        });
        self.on_done.call(false);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub employee_code: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub token: u32,
}

impl HistoryQuery {
    pub fn new(employee_code: impl Into<String>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            employee_code: employee_code.into(),
            from,
            to,
            token: 0,
        }
    }

    pub fn with_range(self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            token: self.token.wrapping_add(1),
            ..self
        }
    }
}

#[derive(Clone, Copy)]
pub struct AttendanceViewModel {
    pub selected_date: RwSignal<NaiveDate>,
    pub daily: RwSignal<DailyAttendanceState>,
    pub employees_resource: Resource<u32, Result<EmployeeListing, ApiError>>,
    pub employees_reload: RwSignal<u32>,
    pub attendance_target: RwSignal<Option<EmployeeRecord>>,
    pub history_query: RwSignal<Option<HistoryQuery>>,
    pub history_form: HistoryRangeForm,
    pub history_error: RwSignal<Option<String>>,
    pub history_resource: Resource<Option<HistoryQuery>, Result<Vec<AttendanceRecord>, ApiError>>,
    attendance_repository: StoredValue<AttendanceRepository>,
}

pub fn use_attendance_view_model() -> AttendanceViewModel {
    let (attendance_repository, employees_repository) = repositories();
    let today = today_local();

    let employees_reload = create_rw_signal(0u32);
    let employees_resource = create_resource(
        move || employees_reload.get(),
        move |_reload| {
            let repo = employees_repository.clone();
            async move { repo.fetch_listing().await }
        },
    );

    let history_query = create_rw_signal(None::<HistoryQuery>);
    let repo_for_history = attendance_repository.clone();
    let history_resource = create_resource(
        move || history_query.get(),
        move |query| {
            let repo = repo_for_history.clone();
            async move {
                match query {
                    Some(query) => {
                        repo.fetch_employee_history(&query.employee_code, query.from, query.to)
                            .await
                    }
                    None => Ok(Vec::new()),
                }
            }
        },
    );

    let vm = AttendanceViewModel {
        selected_date: create_rw_signal(today),
        daily: create_rw_signal(DailyAttendanceState::new(today)),
        employees_resource,
        employees_reload,
        attendance_target: create_rw_signal(None),
        history_query,
        history_form: HistoryRangeForm::new(),
        history_error: create_rw_signal(None),
        history_resource,
        attendance_repository: store_value(attendance_repository),
    };

    create_effect(move |_| {
        let date = vm.selected_date.get();
        vm.load_day(date);
    });

    vm
}

impl AttendanceViewModel {
    pub fn load_day(&self, date: NaiveDate) {
        let repo = self.attendance_repository.get_value();
        let daily = self.daily;
        spawn_local(async move {
            if let Err(err) = load_daily_attendance(repo.api(), daily, date).await {
                warn!("Attendance for {} failed to load: {}", date, err);
            }
        });
    }

    pub fn refresh(&self) {
        self.load_day(self.selected_date.get_untracked());
        self.employees_reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn open_mark(&self, employee: EmployeeRecord) {
        self.attendance_target.set(Some(employee));
    }

    /// Called by the dialog; a recorded mark refreshes the day.
    pub fn finish_mark(&self, recorded: bool) {
        self.attendance_target.set(None);
        if recorded {
            info!("Attendance recorded, refreshing {}", self.selected_date.get_untracked());
            self.load_day(self.selected_date.get_untracked());
        }
    }

    pub fn show_history(&self, employee: &EmployeeRecord) {
        let (from, to) = recent_range(today_local());
        self.history_form.set_range(from, to);
        self.history_error.set(None);
        self.history_query.set(Some(HistoryQuery::new(
            employee.employee_code.clone(),
            Some(from),
            Some(to),
        )));
    }

    pub fn apply_history_range(&self) {
        match self.history_form.to_range() {
            Ok((from, to)) => {
                self.history_error.set(None);
                self.history_query
                    .update(|query| *query = query.take().map(|q| q.with_range(from, to)));
            }
            Err(message) => self.history_error.set(Some(message)),
        }
    }

    pub fn close_history(&self) {
        self.history_query.set(None);
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::api::EmployeeRef;
    use crate::test_support::helpers::employee;
    use gloo_timers::future::TimeoutFuture;
    use std::{cell::RefCell, rc::Rc};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn controller_with_success() -> (MarkAttendanceController, Rc<RefCell<Vec<bool>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let controller = use_mark_attendance(
            &employee(1, "EMP001", "John Smith", "Engineering"),
            NaiveDate::from_ymd_opt(2024, 3, 1),
            Callback::new(move |recorded| sink.borrow_mut().push(recorded)),
        );
        controller.flow.update(|flow| {
            let flow = flow.as_mut().unwrap();
            let request = flow.begin_submit().unwrap();
            flow.finish_submit(Ok(AttendanceRecord {
                id: 9,
                employee: EmployeeRef::Id(1),
                date: request.date,
                status: request.status,
                employee_name: None,
            }));
        });
        (controller, calls)
    }

    #[wasm_bindgen_test]
    async fn success_closes_after_delay() {
        let (controller, calls) = controller_with_success();
        controller.schedule_close();

        TimeoutFuture::new(CLOSE_DELAY_MS / 2).await;
        assert!(calls.borrow().is_empty());
        assert!(controller
            .flow
            .with_untracked(|flow| flow.as_ref().is_some_and(MarkAttendanceState::is_open)));

        TimeoutFuture::new(CLOSE_DELAY_MS).await;
        assert_eq!(*calls.borrow(), vec![true]);
        assert!(controller
            .flow
            .with_untracked(|flow| flow.as_ref().is_some_and(|f| !f.is_open())));
    }

    #[wasm_bindgen_test]
    async fn dismiss_cancels_pending_close() {
        let (controller, calls) = controller_with_success();
        controller.schedule_close();
        controller.dismiss();

        TimeoutFuture::new(CLOSE_DELAY_MS + 200).await;
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[wasm_bindgen_test]
    async fn disposed_flow_ignores_pending_close() {
        let (controller, calls) = controller_with_success();
        controller.schedule_close();
        controller.flow.dispose();

        TimeoutFuture::new(CLOSE_DELAY_MS + 200).await;
        assert!(calls.borrow().is_empty());
    }
}
