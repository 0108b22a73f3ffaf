use crate::{
    pages::employees::{utils::EmployeeStats, view_model::EmployeesViewModel},
    utils::format::format_currency,
};
use leptos::*;

#[component]
pub fn EmployeeStatsCards(vm: EmployeesViewModel) -> impl IntoView {
    let stats = Signal::derive(move || vm.list.with(|state| EmployeeStats::from_records(&state.visible())));

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard label="Total Employees" value=Signal::derive(move || stats.get().total.to_string()) />
            <StatCard
                label="Active"
                value=Signal::derive(move || {
                    let stats = stats.get();
                    format!("{} ({})", stats.active, stats.active_share)
                })
            />
            <StatCard label="Inactive" value=Signal::derive(move || stats.get().inactive.to_string()) />
            <StatCard
                label="Average Salary"
                value=Signal::derive(move || format_currency(stats.get().average_salary))
            />
        </div>
        <Show when=move || !stats.get().departments.is_empty()>
            <div class="bg-surface-elevated shadow rounded-lg p-4">
                <h3 class="text-sm font-medium text-fg mb-2">{"By Department"}</h3>
                <ul class="space-y-1">
                    {move || {
                        stats
                            .get()
                            .departments
                            .into_iter()
                            .map(|(department, count)| {
                                view! {
                                    <li class="flex justify-between text-sm">
                                        <span class="text-fg">{department}</span>
                                        <span class="text-fg-muted">{count}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </div>
        </Show>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <p class="text-xs text-fg-muted uppercase">{label}</p>
            <p class="mt-1 text-2xl font-semibold text-fg">{move || value.get()}</p>
        </div>
    }
}
