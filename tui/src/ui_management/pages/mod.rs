pub use self::room_picker_page::RoomPickerPage;

mod room_picker_page;
