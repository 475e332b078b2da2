pub mod handler;

pub use handler::{handle_alert_key, handle_confirm_key, handle_key, handle_prompt_key};
