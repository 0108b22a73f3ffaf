use crate::pages::employees::view_model::EmployeesViewModel;
use leptos::*;

#[component]
pub fn EmployeeSearchBar(vm: EmployeesViewModel) -> impl IntoView {
    let searching = Signal::derive(move || vm.list.with(|state| state.search_phase.is_loading()));

    view! {
        <div class="flex items-center gap-2">
            <input
                type="search"
                class="w-full md:w-80 rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg"
                placeholder="Search by name, email or employee ID"
                prop:value=move || vm.search_input.get()
                on:input=move |ev| vm.search(event_target_value(&ev))
            />
            <Show when=move || !vm.search_input.get().is_empty()>
                <button
                    type="button"
                    class="text-sm text-fg-muted hover:text-fg"
                    on:click=move |_| vm.clear_search()
                >
                    {"Clear"}
                </button>
            </Show>
            <Show when=move || searching.get()>
                <span class="text-xs text-fg-muted">{"Searching..."}</span>
            </Show>
        </div>
    }
}
