pub mod room_name_prompt;
pub mod room_selector;
