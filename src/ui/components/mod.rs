pub mod progress_bar;
pub mod question;
pub mod summary;
pub mod wrong_list;
