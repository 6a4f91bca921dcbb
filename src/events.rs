use crate::controls::Action;
use crate::ScreenSize;

pub enum Event {
    /// Run a control action, as if its button was pressed
    Control(Action),

    AppEvent(AppEvent),
}

pub enum AppEvent {
    /// The viewport changed size
    Resize {
        width: ScreenSize,
        height: ScreenSize,
    },

    /// Exit the application
    Exit,
}
