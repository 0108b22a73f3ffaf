use crate::{
    api::EmployeeRecord,
    components::{
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
    },
    state::attendance::{DailyAttendanceState, DailyStatus},
    utils::format::initials,
};
use leptos::*;

fn badge_class(status: DailyStatus) -> &'static str {
    match status {
        DailyStatus::Present => {
            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium bg-status-success-bg text-status-success-text"
        }
        DailyStatus::Absent => {
            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium bg-status-error-bg text-status-error-text"
        }
        DailyStatus::NotMarked => {
            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium bg-surface-muted text-fg-muted"
        }
    }
}

#[component]
pub fn DailyAttendanceList(
    employees: Signal<Vec<EmployeeRecord>>,
    daily: RwSignal<DailyAttendanceState>,
    employees_error: Signal<Option<String>>,
    on_mark: Callback<EmployeeRecord>,
    on_history: Callback<EmployeeRecord>,
) -> impl IntoView {
    let loading = Signal::derive(move || daily.with(|state| state.phase.is_loading()));
    let daily_error = Signal::derive(move || daily.with(|state| state.phase.error().map(str::to_string)));

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
            <Show when=move || employees_error.get().is_some()>
                <ErrorMessage message={employees_error.get().unwrap_or_default()} />
            </Show>
            <Show when=move || daily_error.get().is_some()>
                <ErrorMessage message={daily_error.get().unwrap_or_default()} />
            </Show>
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            <Show when=move || employees.get().is_empty() && employees_error.get().is_none()>
                <EmptyState title="No employees to mark" />
            </Show>
            <ul class="divide-y divide-border">
                {move || {
                    employees
                        .get()
                        .into_iter()
                        .map(|employee| {
                            let status = daily.with(|state| state.status_for(&employee));
                            let for_mark = employee.clone();
                            let for_history = employee.clone();
                            view! {
                                <li class="flex items-center justify-between py-3">
                                    <div class="flex items-center gap-3">
                                        <span class="h-8 w-8 rounded-full bg-action-primary-bg text-action-primary-text text-xs font-semibold flex items-center justify-center">
                                            {initials(&employee.name)}
                                        </span>
                                        <div>
                                            <p class="text-sm font-medium text-fg">{employee.name.clone()}</p>
                                            <p class="text-xs text-fg-muted">
                                                {employee.employee_code.clone()}
                                                {" · "}
                                                {employee.department.clone()}
                                            </p>
                                        </div>
                                    </div>
                                    <div class="flex items-center gap-3">
                                        <span class=badge_class(status)>{status.label()}</span>
                                        <button
                                            type="button"
                                            class="text-sm text-fg-muted hover:underline"
                                            on:click=move |_| on_history.call(for_history.clone())
                                        >
                                            {"History"}
                                        </button>
                                        <button
                                            type="button"
                                            class="text-sm text-action-primary-bg hover:underline"
                                            on:click=move |_| on_mark.call(for_mark.clone())
                                        >
                                            {"Mark"}
                                        </button>
                                    </div>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
