use crate::config::Config;
use crate::controls::Action;
use crate::controls::Button;
use crate::controls::ControlSurface;
use crate::grid::Grid;
use crate::input::InteractionController;
use crate::input::Pointer;
use crate::simulation::Simulation;
use crate::ScreenSize;

/// Everything a renderer needs to draw one frame. Only valid for that frame.
pub struct FrameView<'a> {
    pub grid: &'a Grid,
    pub generation: u64,
    pub running: bool,
    pub buttons: &'a [Button],
    pub cell_size: ScreenSize,
}

/// The update phase of the frame loop.
///
/// Owns every piece of mutable state. Per frame: pointer edits first, then button actions, then
/// the throttled step, so a step never runs against a grid that is being edited.
pub struct Game {
    sim: Simulation,
    controls: ControlSurface,
    input: InteractionController,
}

impl Game {
    pub fn new(config: &Config) -> Self {
        let sim = Simulation::new(config.width, config.height, config.cell_size)
            .with_rule(config.rule)
            .with_tick_every(config.tick_every);

        let controls = ControlSurface::with_layout(
            config.width,
            config.height,
            config.buttons,
            config.density,
        );

        Self {
            sim,
            controls,
            input: InteractionController::new(config.toggle_mode),
        }
    }

    pub fn from_parts(
        sim: Simulation,
        controls: ControlSurface,
        input: InteractionController,
    ) -> Self {
        Self {
            sim,
            controls,
            input,
        }
    }

    /// Run one frame of the update phase.
    pub fn update(&mut self, pointer: Pointer) {
        let interaction = self
            .input
            .update(pointer, self.sim.cell_size(), self.controls.buttons());

        if let Some((row, col)) = interaction.toggle {
            self.sim.toggle(row, col);
        }

        for action in interaction.actions {
            self.controls.dispatch(action, &mut self.sim);
        }

        self.sim.tick();
    }

    /// Run `action` outside of the pointer path, e.g. from a keyboard shortcut.
    pub fn dispatch(&mut self, action: Action) {
        self.controls.dispatch(action, &mut self.sim);
    }

    /// Follow a viewport resize. Returns whether the grid was rebuilt.
    pub fn resize(&mut self, width: ScreenSize, height: ScreenSize) -> bool {
        self.sim.resize(width, height)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn buttons(&self) -> &[Button] {
        self.controls.buttons()
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            grid: self.sim.grid(),
            generation: self.sim.generation(),
            running: self.sim.is_running(),
            buttons: self.controls.buttons(),
            cell_size: self.sim.cell_size(),
        }
    }
}
