pub mod add_form;
pub mod search_bar;
pub mod stats;
pub mod table;
