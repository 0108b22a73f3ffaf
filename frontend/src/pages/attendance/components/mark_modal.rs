use crate::{
    api::{AttendanceStatus, EmployeeRecord},
    components::layout::{ErrorMessage, SuccessMessage},
    pages::attendance::view_model::use_mark_attendance,
    utils::time::long_date,
};
use chrono::NaiveDate;
use leptos::ev::KeyboardEvent;
use leptos::*;

const STATUS_CHOICES: &[AttendanceStatus] = &[AttendanceStatus::Present, AttendanceStatus::Absent];

/// Dialog for marking one employee. Render it only while an employee is
/// targeted; unmounting it cancels any pending close.
#[component]
pub fn MarkAttendanceModal(
    employee: EmployeeRecord,
    #[prop(optional)] date: Option<NaiveDate>,
    on_done: Callback<bool>,
) -> impl IntoView {
    let controller = use_mark_attendance(&employee, date, on_done);
    let flow = controller.flow;

    let date_label = move || flow.with(|f| f.as_ref().map(|f| long_date(f.date)).unwrap_or_default());
    let submitting = move || flow.with(|f| f.as_ref().is_some_and(|f| f.submitting));
    let locked = move || flow.with(|f| f.as_ref().map_or(true, |f| !f.can_submit()));
    let error = move || flow.with(|f| f.as_ref().and_then(|f| f.error.clone()));
    let success = move || flow.with(|f| f.as_ref().and_then(|f| f.success.clone()));
    let selected = move |status: AttendanceStatus| {
        flow.with(|f| f.as_ref().is_some_and(|f| f.status == status))
    };

    view! {
        <Show when=move || flow.with(|f| f.as_ref().is_some_and(|f| f.is_open()))>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| controller.dismiss()
                ></button>
                <div
                    class="relative z-[61] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            controller.dismiss();
                        }
                    }
                >
                    <div>
                        <h2 class="text-lg font-semibold text-fg">{"Mark Attendance"}</h2>
                        <p class="text-sm text-fg-muted">
                            {employee.name.clone()}
                            {" · "}
                            {employee.employee_code.clone()}
                        </p>
                        <p class="text-sm text-fg-muted">{date_label}</p>
                    </div>

                    <Show when=move || error().is_some()>
                        <ErrorMessage message={error().unwrap_or_default()} />
                    </Show>
                    <Show when=move || success().is_some()>
                        <SuccessMessage message={success().unwrap_or_default()} />
                    </Show>

                    <div class="grid grid-cols-2 gap-3">
                        {STATUS_CHOICES
                            .iter()
                            .map(|status| {
                                let status = *status;
                                view! {
                                    <button
                                        type="button"
                                        class="rounded-md border px-4 py-3 text-sm font-medium disabled:opacity-50"
                                        class:border-action-primary-bg=move || selected(status)
                                        class:border-border=move || !selected(status)
                                        aria-pressed=move || selected(status).to_string()
                                        disabled=locked
                                        on:click=move |_| controller.select_status(status)
                                    >
                                        {status.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>

                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg disabled:opacity-50"
                            disabled=submitting
                            on:click=move |_| controller.dismiss()
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                            disabled=locked
                            on:click=move |_| controller.submit()
                        >
                            {move || if submitting() { "Saving..." } else { "Mark Attendance" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::employee, ssr::render_to_string};

    #[test]
    fn modal_renders_employee_and_date() {
        let html = render_to_string(move || {
            view! {
                <MarkAttendanceModal
                    employee=employee(1, "EMP001", "John Smith", "Engineering")
                    date=NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
                    on_done=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("John Smith"));
        assert!(html.contains("EMP001"));
        assert!(html.contains("March 01, 2024"));
        assert!(html.contains("Present"));
        assert!(html.contains("Absent"));
    }
}
