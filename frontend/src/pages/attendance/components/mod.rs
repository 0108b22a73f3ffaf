pub mod daily_list;
pub mod history;
pub mod mark_modal;
pub mod summary;
