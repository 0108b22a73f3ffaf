use super::{
    repository::EmployeesRepository,
    utils::{MessageState, NewEmployeeForm},
};
use crate::{
    api::{ApiClient, ApiError, EmployeePayload, EmployeeRecord, EmployeeStatus},
    state::employees::{
        delete_employee, load_employees, search_employees, update_employee, EmployeeListState,
        SortField,
    },
};
use leptos::*;
use log::{error, warn};
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct EmployeesViewModel {
    pub list: RwSignal<EmployeeListState>,
    pub search_input: RwSignal<String>,
    pub add_form: RwSignal<NewEmployeeForm>,
    pub add_form_open: RwSignal<bool>,
    pub form_messages: RwSignal<MessageState>,
    pub list_messages: RwSignal<MessageState>,
    pub pending_delete: RwSignal<Option<EmployeeRecord>>,
    pub attendance_target: RwSignal<Option<EmployeeRecord>>,
    pub create_action: Action<EmployeePayload, Result<EmployeeRecord, ApiError>>,
    repository: StoredValue<EmployeesRepository>,
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(EmployeesRepository::new_with_client(Rc::new(api)));

    let list = create_rw_signal(EmployeeListState::default());
    let add_form = create_rw_signal(NewEmployeeForm::default());
    let form_messages = create_rw_signal(MessageState::default());

    let create_action = create_action(move |payload: &EmployeePayload| {
        let repo = repository.get_value();
        let payload = payload.clone();
        async move { repo.create_employee(payload).await }
    });

    let vm = EmployeesViewModel {
        list,
        search_input: create_rw_signal(String::new()),
        add_form,
        add_form_open: create_rw_signal(false),
        form_messages,
        list_messages: create_rw_signal(MessageState::default()),
        pending_delete: create_rw_signal(None),
        attendance_target: create_rw_signal(None),
        create_action,
        repository,
    };

    // Effects
    create_effect(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(record) => {
                    form_messages.update(|state| {
                        state.set_success(format!("Employee '{}' added.", record.name));
                    });
                    add_form.update(|form| form.reset());
                    vm.reload();
                }
                Err(err) => {
                    warn!("Creating employee failed: {}", err);
                    form_messages.update(|state| state.clear());
                }
            }
        }
    });

    create_effect(move |_| vm.reload());

    vm
}

impl EmployeesViewModel {
    pub fn reload(&self) {
        let repo = self.repository.get_value();
        let list = self.list;
        spawn_local(async move {
            if let Err(err) = load_employees(repo.api(), list).await {
                warn!("Employee list load failed: {}", err);
            }
        });
    }

    pub fn search(&self, query: String) {
        self.search_input.set(query.clone());
        let repo = self.repository.get_value();
        let list = self.list;
        spawn_local(async move {
            if let Err(err) = search_employees(repo.api(), list, query).await {
                warn!("Employee search failed: {}", err);
            }
        });
    }

    pub fn clear_search(&self) {
        self.search_input.set(String::new());
        self.list.update(|state| state.clear_query());
    }

    pub fn sort_by(&self, field: SortField) {
        self.list.update(|state| state.select_sort(field));
    }

    pub fn toggle_row(&self, id: i64) {
        self.list.update(|state| {
            state.toggle_expanded(id);
        });
    }

    pub fn request_delete(&self, record: EmployeeRecord) {
        self.pending_delete.set(Some(record));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        let Some(record) = self.pending_delete.get_untracked() else {
            return;
        };
        self.pending_delete.set(None);
        let repo = self.repository.get_value();
        let list = self.list;
        let messages = self.list_messages;
        spawn_local(async move {
            match delete_employee(repo.api(), list, record.id).await {
                Ok(()) => {
                    let _ = messages.try_update(|state| {
                        state.set_success(format!("Employee '{}' deleted.", record.name));
                    });
                }
                Err(err) => {
                    error!("Deleting employee {} failed: {}", record.employee_code, err);
                    alert(&format!("Failed to delete employee: {}", err.error));
                }
            }
        });
    }

    pub fn toggle_status(&self, record: EmployeeRecord) {
        let mut payload = EmployeePayload::from(&record);
        payload.status = Some(match record.status {
            EmployeeStatus::Active => EmployeeStatus::Inactive,
            EmployeeStatus::Inactive => EmployeeStatus::Active,
        });
        let repo = self.repository.get_value();
        let list = self.list;
        let messages = self.list_messages;
        spawn_local(async move {
            let result = update_employee(repo.api(), list, record.id, payload).await;
            let _ = messages.try_update(|state| match result {
                Ok(updated) => state.set_success(format!(
                    "{} is now {}.",
                    updated.name,
                    updated.status.label().to_lowercase()
                )),
                Err(err) => state.set_error(err.error),
            });
        });
    }

    pub fn open_attendance(&self, record: EmployeeRecord) {
        self.attendance_target.set(Some(record));
    }

    pub fn close_attendance(&self) {
        self.attendance_target.set(None);
    }

    pub fn submit_form(&self) {
        let form = self.add_form.get_untracked();
        if !form.is_valid() {
            self.form_messages
                .update(|state| state.set_error("Please fill in all required fields."));
            return;
        }
        match form.to_payload() {
            Ok(payload) => {
                self.form_messages.update(|state| state.clear());
                self.create_action.dispatch(payload);
            }
            Err(message) => self.form_messages.update(|state| state.set_error(message)),
        }
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
