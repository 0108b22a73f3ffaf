use crate::{
    api::EmployeeRecord,
    components::layout::{Layout, SampleDataBanner},
    state::attendance::AttendanceSummary,
    utils::time::{iso_date, long_date, parse_iso_date},
};
use leptos::*;

use super::{
    components::{
        daily_list::DailyAttendanceList, history::EmployeeHistoryPanel,
        mark_modal::MarkAttendanceModal, summary::AttendanceSummaryCards,
    },
    view_model::use_attendance_view_model,
};

#[component]
pub fn AttendancePage() -> impl IntoView {
    let vm = use_attendance_view_model();

    let employees = Signal::derive(move || {
        vm.employees_resource
            .get()
            .and_then(|result| result.ok())
            .map(|listing| listing.records)
            .unwrap_or_default()
    });
    let sample_reason = Signal::derive(move || {
        vm.employees_resource
            .get()
            .and_then(|result| result.ok())
            .and_then(|listing| listing.sample_reason)
    });
    let employees_error = Signal::derive(move || {
        vm.employees_resource
            .get()
            .and_then(|result| result.err())
            .map(|err| err.error)
    });
    let summary = Signal::derive(move || {
        let total = employees.with(Vec::len);
        vm.daily.with(|state| AttendanceSummary::compute(&state.records, total))
    });

    let on_mark = Callback::new(move |employee: EmployeeRecord| vm.open_mark(employee));
    let on_history = Callback::new(move |employee: EmployeeRecord| vm.show_history(&employee));
    let on_done = Callback::new(move |recorded: bool| vm.finish_mark(recorded));

    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex flex-col gap-3 md:flex-row md:items-end md:justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">{"Daily Attendance"}</h1>
                        <p class="mt-1 text-sm text-fg-muted">
                            {move || long_date(vm.selected_date.get())}
                        </p>
                    </div>
                    <div class="flex items-center gap-2">
                        <input
                            type="date"
                            class="border border-border rounded px-2 py-1"
                            prop:value=move || iso_date(vm.selected_date.get())
                            on:change=move |ev| {
                                if let Some(date) = parse_iso_date(&event_target_value(&ev)) {
                                    vm.selected_date.set(date);
                                }
                            }
                        />
                        <button
                            type="button"
                            class="px-3 py-1 rounded bg-surface-muted text-fg text-sm"
                            on:click=move |_| vm.refresh()
                        >
                            {"Refresh"}
                        </button>
                    </div>
                </div>
                <SampleDataBanner reason=sample_reason />
                <AttendanceSummaryCards summary=summary />
                <DailyAttendanceList
                    employees=employees
                    daily=vm.daily
                    employees_error=employees_error
                    on_mark=on_mark
                    on_history=on_history
                />
                <EmployeeHistoryPanel vm=vm />
            </div>
            {move || {
                vm.attendance_target.get().map(|employee| {
                    view! {
                        <MarkAttendanceModal
                            employee=employee
                            date=vm.selected_date.get_untracked()
                            on_done=on_done
                        />
                    }
                })
            }}
        </Layout>
    }
}
