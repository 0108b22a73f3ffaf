use crate::components::{
    confirm_dialog::ConfirmDialog,
    layout::{ErrorMessage, Layout, SampleDataBanner, SuccessMessage},
};
use crate::pages::attendance::components::mark_modal::MarkAttendanceModal;
use leptos::*;

use super::{
    components::{
        add_form::AddEmployeeForm, search_bar::EmployeeSearchBar, stats::EmployeeStatsCards,
        table::EmployeeTable,
    },
    view_model::use_employees_view_model,
};

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let vm = use_employees_view_model();
    let messages = vm.list_messages;
    let sample_reason = Signal::derive(move || vm.list.with(|state| state.sample_reason.clone()));

    let delete_open = Signal::derive(move || vm.pending_delete.get().is_some());
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .get()
            .map(|record| {
                format!(
                    "Delete {} ({})? This cannot be undone.",
                    record.name, record.employee_code
                )
            })
            .unwrap_or_default()
    });
    let on_confirm_delete = Callback::new(move |_| vm.confirm_delete());
    let on_cancel_delete = Callback::new(move |_| vm.cancel_delete());
    let on_attendance_done = Callback::new(move |_recorded: bool| vm.close_attendance());

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex flex-col gap-3 md:flex-row md:items-center md:justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">{"Employees"}</h1>
                        <p class="mt-1 text-sm text-fg-muted">
                            {"Manage your team members and their information."}
                        </p>
                    </div>
                    <button
                        type="button"
                        class="px-4 py-2 rounded bg-action-primary-bg text-action-primary-text"
                        on:click=move |_| vm.add_form_open.update(|open| *open = !*open)
                    >
                        {"Add Employee"}
                    </button>
                </div>
                <SampleDataBanner reason=sample_reason />
                <EmployeeStatsCards vm=vm />
                <Show when=move || vm.add_form_open.get()>
                    <AddEmployeeForm vm=vm />
                </Show>
                <Show when=move || messages.get().error.is_some()>
                    <ErrorMessage message={messages.get().error.unwrap_or_default()} />
                </Show>
                <Show when=move || messages.get().success.is_some()>
                    <SuccessMessage message={messages.get().success.unwrap_or_default()} />
                </Show>
                <EmployeeSearchBar vm=vm />
                <EmployeeTable vm=vm />
            </div>
            <ConfirmDialog
                is_open=delete_open
                title="Delete employee"
                message=delete_message
                on_confirm=on_confirm_delete
                on_cancel=on_cancel_delete
                confirm_label="Delete"
                destructive=true
            />
            {move || {
                vm.attendance_target.get().map(|employee| {
                    view! { <MarkAttendanceModal employee=employee on_done=on_attendance_done /> }
                })
            }}
        </Layout>
    }
}
