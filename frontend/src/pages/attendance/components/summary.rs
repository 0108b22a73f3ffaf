use crate::state::attendance::AttendanceSummary;
use leptos::*;

#[component]
pub fn AttendanceSummaryCards(summary: Signal<AttendanceSummary>) -> impl IntoView {
    let card = |label: &'static str, value: Signal<String>| {
        view! {
            <div class="bg-surface-elevated shadow rounded-lg p-4">
                <p class="text-xs text-fg-muted uppercase">{label}</p>
                <p class="mt-1 text-2xl font-semibold text-fg">{move || value.get()}</p>
            </div>
        }
    };
    view! {
        <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
            {card("Total Employees", Signal::derive(move || summary.get().total_employees.to_string()))}
            {card("Present", Signal::derive(move || summary.get().present.to_string()))}
            {card("Absent", Signal::derive(move || summary.get().absent.to_string()))}
            {card("Not Marked", Signal::derive(move || summary.get().pending.to_string()))}
            {card("Attendance Rate", Signal::derive(move || summary.get().attendance_rate))}
        </div>
    }
}
