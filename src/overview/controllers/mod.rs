pub mod app_controller;
pub mod user_command;

pub use app_controller::{detail_page_url, AppController};
pub use user_command::UserCommand;
