use crate::{
    api::{ApiError, AttendanceRecord},
    components::layout::{ErrorMessage, LoadingSpinner},
    pages::attendance::view_model::{AttendanceViewModel, HistoryQuery},
    utils::time::short_date,
};
use leptos::*;

#[component]
pub fn EmployeeHistoryPanel(vm: AttendanceViewModel) -> impl IntoView {
    let resource: Resource<Option<HistoryQuery>, Result<Vec<AttendanceRecord>, ApiError>> =
        vm.history_resource;
    let loading = resource.loading();
    let records = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });
    let fetch_error = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.err())
            .map(|err| err.error)
            .or_else(|| vm.history_error.get())
    });
    let from = vm.history_form.start_date_signal();
    let to = vm.history_form.end_date_signal();
    let title = move || {
        vm.history_query
            .get()
            .map(|query| format!("History for {}", query.employee_code))
            .unwrap_or_default()
    };

    view! {
        <Show when=move || vm.history_query.get().is_some()>
            <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
                <div class="flex items-center justify-between">
                    <h3 class="text-lg font-medium text-fg">{title}</h3>
                    <button
                        type="button"
                        aria-label="Close"
                        class="text-fg-muted hover:text-fg"
                        on:click=move |_| vm.close_history()
                    >
                        {"✕"}
                    </button>
                </div>
                <div class="flex flex-wrap items-end gap-2">
                    <label class="text-sm text-fg">
                        {"From"}
                        <input
                            type="date"
                            class="ml-2 border border-border rounded px-2 py-1"
                            prop:value=move || from.get()
                            on:input=move |ev| from.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="text-sm text-fg">
                        {"To"}
                        <input
                            type="date"
                            class="ml-2 border border-border rounded px-2 py-1"
                            prop:value=move || to.get()
                            on:input=move |ev| to.set(event_target_value(&ev))
                        />
                    </label>
                    <button
                        type="button"
                        class="px-3 py-1 rounded bg-action-primary-bg text-action-primary-text text-sm"
                        on:click=move |_| vm.apply_history_range()
                    >
                        {"Apply"}
                    </button>
                </div>
                <Show when=move || fetch_error.get().is_some()>
                    <ErrorMessage message={fetch_error.get().unwrap_or_default()} />
                </Show>
                <Show when=move || loading.get()>
                    <LoadingSpinner />
                </Show>
                <Show when=move || !loading.get() && records.get().is_empty() && fetch_error.get().is_none()>
                    <p class="text-sm text-fg-muted">{"No attendance recorded in this period."}</p>
                </Show>
                <ul class="divide-y divide-border">
                    <For
                        each=move || records.get()
                        key=|record| record.id
                        children=move |record: AttendanceRecord| {
                            view! {
                                <li class="flex justify-between py-2 text-sm">
                                    <span class="text-fg">{short_date(record.date)}</span>
                                    <span class="text-fg-muted">{record.status.label()}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </Show>
    }
}
