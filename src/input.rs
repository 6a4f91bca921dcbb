use std::str::FromStr;

use thiserror::Error;

use crate::controls::Action;
use crate::controls::Button;
use crate::ScreenOffset;
use crate::ScreenSize;

/// Pointer state for one frame, as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pointer {
    pub x: ScreenOffset,
    pub y: ScreenOffset,

    /// Whether the primary button is held down this frame
    pub down: bool,
}

impl Pointer {
    pub fn up(x: ScreenOffset, y: ScreenOffset) -> Self {
        Self { x, y, down: false }
    }

    pub fn down(x: ScreenOffset, y: ScreenOffset) -> Self {
        Self { x, y, down: true }
    }

    /// Grid cell `(row, col)` under the pointer. Positions left of or above the viewport have no
    /// cell; positions past the right or bottom edge may still need a bounds check.
    pub fn cell(&self, cell_size: ScreenSize) -> Option<(usize, usize)> {
        let cell_size = cell_size.max(1) as ScreenOffset;

        let row = usize::try_from(self.y.div_euclid(cell_size)).ok()?;
        let col = usize::try_from(self.x.div_euclid(cell_size)).ok()?;

        Some((row, col))
    }
}

/// When a held pointer toggles the cell under it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleMode {
    /// Toggle on every frame the button is held. A held, unmoving pointer makes the cell flicker.
    #[default]
    EveryFrame,

    /// Toggle once per press, like the buttons
    RisingEdge,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown toggle mode {0:?}, expected \"frame\" or \"edge\"")]
pub struct UnknownToggleMode(String);

impl FromStr for ToggleMode {
    type Err = UnknownToggleMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frame" | "every-frame" => Ok(Self::EveryFrame),
            "edge" | "rising-edge" => Ok(Self::RisingEdge),
            _ => Err(UnknownToggleMode(s.to_string())),
        }
    }
}

/// What a frame of pointer input asks for
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    /// Cell to toggle, not yet bounds checked against the grid
    pub toggle: Option<(usize, usize)>,

    /// Actions of every button hit by a fresh press, in registration order
    pub actions: Vec<Action>,
}

/// Turns raw per-frame pointer state into cell edits and button presses.
///
/// Holds the only state needed for that: whether the button was down on the previous frame.
#[derive(Debug, Default)]
pub struct InteractionController {
    was_down: bool,
    mode: ToggleMode,
}

impl InteractionController {
    pub fn new(mode: ToggleMode) -> Self {
        Self {
            was_down: false,
            mode,
        }
    }

    pub fn mode(&self) -> ToggleMode {
        self.mode
    }

    pub fn was_down(&self) -> bool {
        self.was_down
    }

    /// Interpret one frame of pointer input.
    pub fn update(
        &mut self,
        pointer: Pointer,
        cell_size: ScreenSize,
        buttons: &[Button],
    ) -> Interaction {
        let pressed = pointer.down && !self.was_down;
        self.was_down = pointer.down;

        let paint = match self.mode {
            ToggleMode::EveryFrame => pointer.down,
            ToggleMode::RisingEdge => pressed,
        };

        let toggle = if paint { pointer.cell(cell_size) } else { None };

        let actions = if pressed {
            buttons
                .iter()
                .filter(|b| b.contains(pointer.x, pointer.y))
                .map(|b| b.action)
                .collect()
        } else {
            Vec::new()
        };

        Interaction { toggle, actions }
    }
}
