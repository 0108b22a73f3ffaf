use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::pages::{attendance::AttendancePage, employees::EmployeesPage};

pub const ROUTE_PATHS: &[&str] = &["/", "/employees", "/attendance"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(crate::api::ApiClient::new());
    view! {
        <Title text="Staffdesk" />
        <Router>
            <Routes>
                <Route path="/" view=EmployeesPage/>
                <Route path="/employees" view=EmployeesPage/>
                <Route path="/attendance" view=AttendancePage/>
            </Routes>
        </Router>
    }
}
