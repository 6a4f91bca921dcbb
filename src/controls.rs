use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::ButtonLayout;
use crate::simulation::Simulation;
use crate::ScreenOffset;
use crate::ScreenSize;

pub const LABEL_START: &str = "Start";
pub const LABEL_PAUSE: &str = "Pause";
pub const LABEL_RESET: &str = "Reset";
pub const LABEL_RANDOMIZE: &str = "Random Seed";

/// Commands a button, or a key, can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Toggle between running and paused
    StartPause,

    /// Kill every cell and restart the generation count
    Reset,

    /// Fill the grid with random cells
    Randomize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub x: ScreenOffset,
    pub y: ScreenOffset,
    pub width: ScreenSize,
    pub height: ScreenSize,
    pub action: Action,
}

impl Button {
    pub fn new(
        label: &str,
        x: ScreenOffset,
        y: ScreenOffset,
        width: ScreenSize,
        height: ScreenSize,
        action: Action,
    ) -> Self {
        Self {
            label: label.to_string(),
            x,
            y,
            width,
            height,
            action,
        }
    }

    /// Hit test. Both edges are part of the button, so the hit box is one pixel wider and taller
    /// than `width` and `height`.
    pub fn contains(&self, x: ScreenOffset, y: ScreenOffset) -> bool {
        let (x, y) = (x as i64, y as i64);
        let (left, top) = (self.x as i64, self.y as i64);
        let (right, bottom) = (left + self.width as i64, top + self.height as i64);

        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }
}

/// The ordered list of buttons and the handler that runs their actions.
#[derive(Debug, Clone)]
pub struct ControlSurface {
    buttons: Vec<Button>,

    /// Probability of a cell being alive after [`Action::Randomize`]
    density: f64,
}

impl ControlSurface {
    pub fn new(buttons: Vec<Button>, density: f64) -> Self {
        Self { buttons, density }
    }

    /// The Start, Reset and Random Seed buttons side by side, centered horizontally and
    /// `layout.bottom_margin` pixels above the bottom of a `width` by `height` viewport.
    pub fn with_layout(
        width: ScreenSize,
        height: ScreenSize,
        layout: ButtonLayout,
        density: f64,
    ) -> Self {
        let w = layout.width as ScreenOffset;
        let left = width as ScreenOffset / 2 - (3 * w) / 2;
        let y = height as ScreenOffset - layout.bottom_margin as ScreenOffset;

        let buttons = [
            (LABEL_START, Action::StartPause),
            (LABEL_RESET, Action::Reset),
            (LABEL_RANDOMIZE, Action::Randomize),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (label, action))| {
            let x = left + i as ScreenOffset * w;
            Button::new(label, x, y, layout.width, layout.height, action)
        })
        .collect();

        Self::new(buttons, density)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Run `action` against the simulation.
    ///
    /// Randomize draws from a freshly seeded generator on every call.
    pub fn dispatch(&mut self, action: Action, sim: &mut Simulation) {
        info!(?action, "dispatching");

        match action {
            Action::StartPause => {
                sim.toggle_running();

                let label = if sim.is_running() { LABEL_PAUSE } else { LABEL_START };
                for button in &mut self.buttons {
                    if button.action == Action::StartPause {
                        button.label = label.to_string();
                    }
                }
            }
            Action::Reset => sim.reset(),
            Action::Randomize => {
                let mut rng = StdRng::from_entropy();
                sim.randomize(self.density, &mut rng);
            }
        }
    }
}
