use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tracing::trace;

use crate::controls::Action;
use crate::events::AppEvent;
use crate::events::Event;
use crate::input::Pointer;
use crate::ScreenOffset;

/// Folds terminal mouse events into one [`Pointer`] per frame.
///
/// Terminals report presses and releases as events rather than a button level, so the level is
/// rebuilt here. A press that is released before the frame ends is latched and still reported as
/// down for that frame, so quick clicks are not lost. A release followed by a new press within a
/// frame that started down is split over two frames: up now, down on the next one.
#[derive(Debug, Default)]
pub struct PointerTracker {
    x: ScreenOffset,
    y: ScreenOffset,
    down: bool,

    /// A press arrived since the last frame
    latched: bool,

    /// A release arrived since the last frame
    released: bool,

    /// A press held back to be reported on the next frame
    pending: bool,

    /// Level reported by the last frame
    reported: bool,
}

impl PointerTracker {
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        self.x = event.column as ScreenOffset;
        self.y = event.row as ScreenOffset;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.down = true;
                self.latched = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.down = false;
                self.released = true;
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.down = true;
            }
            _ => {}
        }
    }

    /// Pointer state for the frame that is ending. Clears the press and release latches.
    pub fn frame(&mut self) -> Pointer {
        let down = if self.pending {
            self.pending = false;
            true
        } else if self.reported && self.released && self.latched {
            // report the release now so the new press is seen as a fresh one
            self.pending = true;
            false
        } else {
            self.down || self.latched
        };

        self.latched = false;
        self.released = false;
        self.reported = down;

        Pointer {
            x: self.x,
            y: self.y,
            down,
        }
    }
}

/// Converts a crossterm event into a life event. Mouse events only update `pointer`.
pub fn convert_event(event: CrossTermEvent, pointer: &mut PointerTracker) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }

            trace!(?key_event, "key");

            match key_event {
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => Some(Event::AppEvent(AppEvent::Exit)),
                KeyEvent {
                    code: KeyCode::Char(' '),
                    ..
                } => Some(Event::Control(Action::StartPause)),
                KeyEvent {
                    code: KeyCode::Char('r'),
                    ..
                } => Some(Event::Control(Action::Reset)),
                KeyEvent {
                    code: KeyCode::Char('n'),
                    ..
                } => Some(Event::Control(Action::Randomize)),
                _ => None,
            }
        }
        CrossTermEvent::Mouse(mouse_event) => {
            pointer.handle_mouse(mouse_event);
            None
        }
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize {
            width: cols as u32,
            height: rows as u32,
        })),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::convert_event;
    use super::PointerTracker;
    use crate::controls::Action;
    use crate::controls::Button;
    use crate::events::AppEvent;
    use crate::events::Event;
    use crate::input::InteractionController;
    use crate::input::Pointer;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrossTermEvent {
        CrossTermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn click_within_one_frame_is_latched() {
        let mut tracker = PointerTracker::default();

        convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2), &mut tracker);
        convert_event(mouse(MouseEventKind::Up(MouseButton::Left), 4, 2), &mut tracker);

        assert_eq!(tracker.frame(), Pointer::down(4, 2));
        assert_eq!(tracker.frame(), Pointer::up(4, 2));
    }

    #[test]
    fn release_and_repress_in_one_frame_is_split() {
        let mut tracker = PointerTracker::default();
        let mut ctl = InteractionController::default();
        let buttons = [Button::new("Start", 0, 0, 14, 1, Action::StartPause)];

        convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 0), &mut tracker);
        let first = tracker.frame();
        assert_eq!(first, Pointer::down(2, 0));
        assert_eq!(ctl.update(first, 1, &buttons).actions, [Action::StartPause]);

        convert_event(mouse(MouseEventKind::Up(MouseButton::Left), 2, 0), &mut tracker);
        convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 0), &mut tracker);

        let released = tracker.frame();
        assert_eq!(released, Pointer::up(2, 0));
        assert!(ctl.update(released, 1, &buttons).actions.is_empty());

        let second = tracker.frame();
        assert_eq!(second, Pointer::down(2, 0));
        assert_eq!(ctl.update(second, 1, &buttons).actions, [Action::StartPause]);

        // still held afterwards
        assert_eq!(tracker.frame(), Pointer::down(2, 0));
    }

    #[test]
    fn drag_keeps_button_down() {
        let mut tracker = PointerTracker::default();

        convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1), &mut tracker);
        assert_eq!(tracker.frame(), Pointer::down(1, 1));

        convert_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 3), &mut tracker);
        assert_eq!(tracker.frame(), Pointer::down(5, 3));

        // no new events, still held
        assert_eq!(tracker.frame(), Pointer::down(5, 3));

        convert_event(mouse(MouseEventKind::Moved, 6, 3), &mut tracker);
        convert_event(mouse(MouseEventKind::Up(MouseButton::Left), 6, 3), &mut tracker);
        assert_eq!(tracker.frame(), Pointer::up(6, 3));
    }

    #[test]
    fn right_button_is_ignored() {
        let mut tracker = PointerTracker::default();

        convert_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), &mut tracker);

        assert!(!tracker.frame().down);
    }

    #[test]
    fn keys() {
        let mut tracker = PointerTracker::default();
        let mut convert = |event| convert_event(event, &mut tracker);

        assert!(matches!(
            convert(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Event::AppEvent(AppEvent::Exit))
        ));
        assert!(matches!(
            convert(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::AppEvent(AppEvent::Exit))
        ));
        assert!(matches!(
            convert(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Event::Control(Action::StartPause))
        ));
        assert!(matches!(
            convert(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Event::Control(Action::Reset))
        ));
        assert!(matches!(
            convert(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Event::Control(Action::Randomize))
        ));
        assert!(convert(key(KeyCode::Char('x'), KeyModifiers::NONE)).is_none());
    }

    #[test]
    fn resize() {
        let mut tracker = PointerTracker::default();

        let event = convert_event(CrossTermEvent::Resize(100, 40), &mut tracker);

        assert!(matches!(
            event,
            Some(Event::AppEvent(AppEvent::Resize {
                width: 100,
                height: 40
            }))
        ));
    }
}
