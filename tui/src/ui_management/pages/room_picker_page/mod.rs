pub use self::room_picker_page::RoomPickerPage;

mod components;
#[allow(clippy::module_inception)]
mod room_picker_page;
mod section;
