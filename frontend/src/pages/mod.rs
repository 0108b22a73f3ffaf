pub mod attendance;
pub mod employees;

pub use attendance::AttendancePage;
pub use employees::EmployeesPage;
