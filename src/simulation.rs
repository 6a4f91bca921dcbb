use rand::Rng;
use tracing::debug;
use tracing::trace;

use crate::grid::Dimensions;
use crate::grid::Grid;
use crate::rule_set::RuleSet;
use crate::ScreenSize;

/// Counters of the simulation that live next to the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationState {
    /// Number of steps applied since startup or the last reset
    pub generation: u64,

    /// `false` while paused
    pub running: bool,

    /// Running frames seen so far, used to throttle steps against the frame rate
    pub ticks: u64,
}

pub struct Simulation {
    /// Current generation. Replaced wholesale on every step.
    grid: Grid,

    state: SimulationState,

    rule: RuleSet,

    /// Steps happen once every `tick_every` running frames
    tick_every: u32,

    /// Cell edge length in pixels, used to derive [`Dimensions`] from the viewport
    cell_size: ScreenSize,
}

impl Simulation {
    /// Create a paused simulation with an empty grid filling a `width` by `height` viewport.
    pub fn new(width: ScreenSize, height: ScreenSize, cell_size: ScreenSize) -> Self {
        let dims = Dimensions::from_viewport(width, height, cell_size);

        Self::with_grid(Grid::new(dims), cell_size)
    }

    /// Create a paused simulation starting from `grid`.
    pub fn with_grid(grid: Grid, cell_size: ScreenSize) -> Self {
        Self {
            grid,
            state: SimulationState::default(),
            rule: RuleSet::default(),
            tick_every: 1,
            cell_size: cell_size.max(1),
        }
    }

    pub fn with_rule(mut self, rule: RuleSet) -> Self {
        self.rule = rule;
        self
    }

    /// Set the tick throttle. Values below `1` are treated as `1`.
    pub fn with_tick_every(mut self, tick_every: u32) -> Self {
        self.tick_every = tick_every.max(1);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn cell_size(&self) -> ScreenSize {
        self.cell_size
    }

    pub fn tick_every(&self) -> u32 {
        self.tick_every
    }

    /// Flip a single cell. Out of bounds positions are ignored.
    pub fn toggle(&mut self, row: usize, col: usize) {
        self.grid.toggle(row, col);
    }

    pub fn toggle_running(&mut self) {
        self.state.running = !self.state.running;

        debug!(
            running = self.state.running,
            generation = self.state.generation,
            "toggled simulation"
        );
    }

    /// Kill every cell and restart the generation count. Running state is kept.
    pub fn reset(&mut self) {
        self.grid = self.grid.clone_empty();
        self.state.generation = 0;

        debug!("reset grid");
    }

    /// Replace the grid with a random one of the same size. Generation and running state are kept.
    pub fn randomize<R: Rng>(&mut self, density: f64, rng: &mut R) {
        self.grid = Grid::random(self.grid.dimensions(), density, rng);

        debug!(density, population = self.grid.population(), "randomized grid");
    }

    /// Follow a viewport resize. If the cell dimensions change, the grid is rebuilt empty; the
    /// previous pattern is not carried over.
    ///
    /// Returns whether the grid was rebuilt.
    pub fn resize(&mut self, width: ScreenSize, height: ScreenSize) -> bool {
        let dims = Dimensions::from_viewport(width, height, self.cell_size);

        if dims == self.grid.dimensions() {
            return false;
        }

        debug!(
            from = ?self.grid.dimensions(),
            to = ?dims,
            "viewport resized, rebuilding grid"
        );

        self.grid = Grid::new(dims);

        true
    }

    /// Advance one frame. While running, a step is applied every `tick_every` frames.
    ///
    /// Returns whether a step was applied.
    pub fn tick(&mut self) -> bool {
        if !self.state.running {
            return false;
        }

        self.state.ticks += 1;
        if self.state.ticks % self.tick_every as u64 != 0 {
            return false;
        }

        self.step();

        true
    }

    /// Apply the rule once to every cell, regardless of running state.
    pub fn step(&mut self) {
        self.grid = next_generation(&self.grid, self.rule);
        self.state.generation += 1;

        trace!(
            generation = self.state.generation,
            population = self.grid.population(),
            "step"
        );
    }
}

/// Compute the generation that follows `grid`.
///
/// Only `grid` is read; the result is written into a separate buffer, so no cell ever sees a
/// neighbour that was already updated.
pub fn next_generation(grid: &Grid, rule: RuleSet) -> Grid {
    let mut next = grid.clone_empty();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let alive = grid.get(row, col) == Some(true);
            let neighbors = grid.count_neighbors(row, col);

            next.set(row, col, rule.next_state(alive, neighbors));
        }
    }

    next
}
