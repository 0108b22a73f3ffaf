use crate::{
    api::EmployeeStatus,
    components::{
        error::InlineErrorMessage,
        layout::{ErrorMessage, SuccessMessage},
    },
    pages::employees::{
        utils::{NewEmployeeForm, DEPARTMENT_OPTIONS},
        view_model::EmployeesViewModel,
    },
};
use leptos::{ev, *};

#[component]
pub fn AddEmployeeForm(vm: EmployeesViewModel) -> impl IntoView {
    let form_state = vm.add_form;
    let messages = vm.form_messages;
    let pending = vm.create_action.pending();
    let create_error = Signal::derive(move || {
        vm.create_action
            .value()
            .get()
            .and_then(|result| result.err())
    });
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit_form();
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-medium text-fg">{"Add Employee"}</h2>
                <button
                    type="button"
                    aria-label="Close"
                    class="text-fg-muted hover:text-fg"
                    on:click=move |_| vm.add_form_open.set(false)
                >
                    {"✕"}
                </button>
            </div>

            <Show when=move || messages.get().error.is_some()>
                <ErrorMessage message={messages.get().error.unwrap_or_default()} />
            </Show>
            <InlineErrorMessage error=create_error />
            <Show when=move || messages.get().success.is_some()>
                <SuccessMessage message={messages.get().success.unwrap_or_default()} />
            </Show>

            <form class="grid grid-cols-1 md:grid-cols-2 gap-4" on:submit=on_submit>
                <TextField
                    label="Employee ID *"
                    placeholder="EMP003"
                    form_state=form_state
                    read=|form| form.employee_code.clone()
                    write=|form, value| form.employee_code = value
                />
                <TextField
                    label="Full Name *"
                    placeholder="Jane Doe"
                    form_state=form_state
                    read=|form| form.name.clone()
                    write=|form, value| form.name = value
                />
                <TextField
                    label="Email *"
                    placeholder="jane@company.com"
                    form_state=form_state
                    read=|form| form.email.clone()
                    write=|form, value| form.email = value
                />
                <TextField
                    label="Phone"
                    placeholder="+1 (555) 123-4567"
                    form_state=form_state
                    read=|form| form.phone.clone()
                    write=|form, value| form.phone = value
                />
                <div>
                    <label class="block text-sm font-medium text-fg">{"Department *"}</label>
                    <select
                        class="mt-1 w-full border border-border rounded px-2 py-1"
                        prop:value=move || form_state.get().department
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form_state.update(|state| state.department = value);
                        }
                    >
                        <option value="">{"Select department"}</option>
                        {DEPARTMENT_OPTIONS
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                </div>
                <TextField
                    label="Position"
                    placeholder="Software Engineer"
                    form_state=form_state
                    read=|form| form.position.clone()
                    write=|form, value| form.position = value
                />
                <div>
                    <label class="block text-sm font-medium text-fg">{"Hire Date"}</label>
                    <input
                        type="date"
                        class="mt-1 w-full border border-border rounded px-2 py-1"
                        prop:value=move || form_state.get().hire_date
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form_state.update(|state| state.hire_date = value);
                        }
                    />
                </div>
                <TextField
                    label="Salary"
                    placeholder="75000"
                    form_state=form_state
                    read=|form| form.salary.clone()
                    write=|form, value| form.salary = value
                />
                <div>
                    <label class="block text-sm font-medium text-fg">{"Status"}</label>
                    <select
                        class="mt-1 w-full border border-border rounded px-2 py-1"
                        prop:value=move || form_state.get().status.as_str()
                        on:change=move |ev| {
                            if let Some(status) = EmployeeStatus::parse(&event_target_value(&ev)) {
                                form_state.update(|state| state.status = status);
                            }
                        }
                    >
                        <option value="active">{"Active"}</option>
                        <option value="inactive">{"Inactive"}</option>
                    </select>
                </div>
                <div class="md:col-span-2 flex justify-end gap-2">
                    <button
                        type="button"
                        class="px-4 py-2 rounded bg-surface-muted text-fg"
                        on:click=move |_| {
                            form_state.update(NewEmployeeForm::reset);
                            messages.update(|state| state.clear());
                        }
                    >
                        {"Reset"}
                    </button>
                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    >
                        {move || if pending.get() { "Adding..." } else { "Add Employee" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    placeholder: &'static str,
    form_state: RwSignal<NewEmployeeForm>,
    read: fn(&NewEmployeeForm) -> String,
    write: fn(&mut NewEmployeeForm, String),
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-fg">{label}</label>
            <input
                class="mt-1 w-full border border-border rounded px-2 py-1"
                placeholder=placeholder
                prop:value=move || form_state.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form_state.update(|state| write(state, value));
                }
            />
        </div>
    }
}
