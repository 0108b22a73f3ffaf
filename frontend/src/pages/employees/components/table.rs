use crate::{
    api::{EmployeeRecord, EmployeeStatus},
    components::{empty_state::EmptyState, layout::ErrorMessage, layout::LoadingSpinner},
    pages::employees::{
        utils::{department_label, status_badge_class},
        view_model::EmployeesViewModel,
    },
    state::employees::{SortDirection, SortField},
    utils::{
        format::{format_currency, initials},
        time::long_date,
    },
};
use leptos::*;

const SORTABLE_COLUMNS: &[SortField] = &[
    SortField::Name,
    SortField::Email,
    SortField::Department,
    SortField::HireDate,
    SortField::Salary,
];

#[component]
pub fn EmployeeTable(vm: EmployeesViewModel) -> impl IntoView {
    let list = vm.list;
    let rows = Signal::derive(move || list.with(|state| state.visible()));
    let loading = Signal::derive(move || list.with(|state| state.is_loading()));
    let fetch_error = Signal::derive(move || list.with(|state| state.error().map(str::to_string)));
    let searching = Signal::derive(move || list.with(|state| state.has_query()));

    view! {
        <div class="bg-surface-elevated shadow rounded-lg overflow-hidden">
            <Show when=move || fetch_error.get().is_some()>
                <div class="p-4">
                    <ErrorMessage message={fetch_error.get().unwrap_or_default()} />
                </div>
            </Show>
            <Show when=move || loading.get() && rows.get().is_empty()>
                <LoadingSpinner />
            </Show>
            <Show when=move || !loading.get() && rows.get().is_empty() && fetch_error.get().is_none()>
                <div class="p-6">
                    {move || if searching.get() {
                        view! {
                            <EmptyState
                                title="No matching employees"
                                description="Try a different name, email or employee ID."
                            />
                        }
                        .into_view()
                    } else {
                        view! {
                            <EmptyState
                                title="No employees yet"
                                description="Add your first employee to get started."
                            />
                        }
                        .into_view()
                    }}
                </div>
            </Show>
            <Show when=move || !rows.get().is_empty()>
                <table class="min-w-full divide-y divide-border">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class="w-8"></th>
                            {SORTABLE_COLUMNS
                                .iter()
                                .map(|field| {
                                    let field = *field;
                                    view! { <SortHeader vm=vm field=field /> }
                                })
                                .collect_view()}
                            <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase">
                                {"Status"}
                            </th>
                            <th class="px-4 py-3 text-right text-xs font-medium text-fg-muted uppercase">
                                {"Actions"}
                            </th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|record| view! { <EmployeeRow vm=vm record=record /> })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
fn SortHeader(vm: EmployeesViewModel, field: SortField) -> impl IntoView {
    let indicator = move || {
        vm.list.with(|state| {
            if state.sort.field != field {
                ""
            } else if state.sort.direction == SortDirection::Ascending {
                " ▲"
            } else {
                " ▼"
            }
        })
    };
    view! {
        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase">
            <button type="button" class="hover:text-fg" on:click=move |_| vm.sort_by(field)>
                {field.label()}
                {indicator}
            </button>
        </th>
    }
}

#[component]
fn EmployeeRow(vm: EmployeesViewModel, record: EmployeeRecord) -> impl IntoView {
    let id = record.id;
    let expanded = Signal::derive(move || vm.list.with(|state| state.is_expanded(id)));
    let deleting = Signal::derive(move || vm.list.with(|state| state.is_deleting(id)));

    let status_label = if record.status == EmployeeStatus::Active {
        "Deactivate"
    } else {
        "Activate"
    };
    let hire_date = record
        .hire_date
        .map(long_date)
        .unwrap_or_else(|| "N/A".to_string());
    let salary = record
        .salary
        .map(format_currency)
        .unwrap_or_else(|| "N/A".to_string());
    let details = record.clone();
    let for_attendance = record.clone();
    let for_status = record.clone();
    let for_delete = record.clone();

    view! {
        <tr class="hover:bg-surface-muted">
            <td class="px-2 py-3">
                <button
                    type="button"
                    aria-label="Toggle details"
                    class="text-fg-muted hover:text-fg"
                    on:click=move |_| vm.toggle_row(id)
                >
                    {move || if expanded.get() { "▾" } else { "▸" }}
                </button>
            </td>
            <td class="px-4 py-3">
                <div class="flex items-center gap-3">
                    <span class="h-8 w-8 rounded-full bg-action-primary-bg text-action-primary-text text-xs font-semibold flex items-center justify-center">
                        {initials(&record.name)}
                    </span>
                    <div>
                        <p class="text-sm font-medium text-fg">{record.name.clone()}</p>
                        <p class="text-xs text-fg-muted">{record.employee_code.clone()}</p>
                    </div>
                </div>
            </td>
            <td class="px-4 py-3 text-sm text-fg">{record.email.clone()}</td>
            <td class="px-4 py-3 text-sm text-fg">{department_label(&record.department)}</td>
            <td class="px-4 py-3 text-sm text-fg">{hire_date}</td>
            <td class="px-4 py-3 text-sm text-fg">{salary}</td>
            <td class="px-4 py-3">
                <span class=status_badge_class(record.status)>{record.status.label()}</span>
            </td>
            <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                <button
                    type="button"
                    class="text-sm text-action-primary-bg hover:underline"
                    on:click=move |_| vm.open_attendance(for_attendance.clone())
                >
                    {"Mark attendance"}
                </button>
                <button
                    type="button"
                    class="text-sm text-fg-muted hover:underline"
                    on:click=move |_| vm.toggle_status(for_status.clone())
                >
                    {status_label}
                </button>
                <button
                    type="button"
                    class="text-sm text-action-danger-bg hover:underline disabled:opacity-50"
                    disabled=move || deleting.get()
                    on:click=move |_| vm.request_delete(for_delete.clone())
                >
                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                </button>
            </td>
        </tr>
        <Show when=move || expanded.get()>
            <EmployeeDetails record=details.clone() />
        </Show>
    }
}

#[component]
fn EmployeeDetails(record: EmployeeRecord) -> impl IntoView {
    let field = |label: &'static str, value: Option<String>| {
        view! {
            <div>
                <p class="text-xs text-fg-muted">{label}</p>
                <p class="text-sm text-fg">{value.unwrap_or_else(|| "N/A".to_string())}</p>
            </div>
        }
    };
    view! {
        <tr class="bg-surface-muted">
            <td></td>
            <td colspan="7" class="px-4 py-3">
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {field("Employee ID", Some(record.employee_code.clone()))}
                    {field("Phone", record.phone.clone())}
                    {field("Position", record.position.clone())}
                    {field("User account", record.user_id.map(|id| id.to_string()))}
                </div>
            </td>
        </tr>
    }
}
