use toroid_life::config::Config;
use toroid_life::controls::Action;
use toroid_life::game::Game;
use toroid_life::grid::Dimensions;
use toroid_life::input::Pointer;
use toroid_life::input::ToggleMode;

// Inside the Start button of the default layout, over cell (86, 43)
const START: (i32, i32) = (430, 860);

// Inside the Reset button
const RESET: (i32, i32) = (600, 870);

fn paint(game: &mut Game, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        let (x, y) = (col as i32 * 10 + 5, row as i32 * 10 + 5);
        game.update(Pointer::down(x, y));
        game.update(Pointer::up(x, y));
    }
}

#[test]
fn starts_paused_and_empty() {
    let game = Game::new(&Config::default());
    let view = game.view();

    assert_eq!(view.grid.dimensions(), Dimensions::new(90, 120));
    assert!(view.grid.is_empty());
    assert_eq!(view.generation, 0);
    assert!(!view.running);

    let labels: Vec<_> = view.buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["Start", "Reset", "Random Seed"]);
}

#[test]
fn paint_then_run_a_blinker() {
    let mut game = Game::new(&Config::default());

    paint(&mut game, &[(10, 10), (10, 11), (10, 12)]);
    assert_eq!(game.simulation().grid().population(), 3);
    assert_eq!(game.simulation().generation(), 0);

    // pressing Start also toggles the cell under the button, then the first step runs in the
    // same frame and the lonely cell dies
    game.update(Pointer::down(START.0, START.1));
    assert!(game.simulation().is_running());
    assert_eq!(game.simulation().generation(), 1);
    assert_eq!(game.buttons()[0].label, "Pause");

    let grid = game.simulation().grid();
    assert_eq!(grid.population(), 3);
    for row in 9..=11 {
        assert_eq!(grid.get(row, 11), Some(true));
    }

    game.update(Pointer::up(START.0, START.1));
    assert_eq!(game.simulation().generation(), 2);
    assert_eq!(game.simulation().grid().get(10, 10), Some(true));
}

#[test]
fn held_press_fires_button_once_but_flickers_cell() {
    let mut game = Game::new(&Config::default());

    for frame in 1..=4 {
        game.update(Pointer::down(RESET.0, RESET.1));

        // the first frame toggles the cell and then resets, later frames only flip the cell
        assert_eq!(game.simulation().grid().get(87, 60), Some(frame % 2 == 0));
        assert!(!game.simulation().is_running());
    }

    game.dispatch(Action::StartPause);
    game.update(Pointer::up(0, 0));
    assert_eq!(game.simulation().generation(), 1);

    // a fresh press on Reset clears the grid and the generation count, keeps running, and the
    // step of that frame runs on the cleared grid
    game.update(Pointer::down(RESET.0, RESET.1));
    assert!(game.simulation().is_running());
    assert!(game.simulation().grid().is_empty());
    assert_eq!(game.simulation().generation(), 1);
}

#[test]
fn rising_edge_mode_toggles_once_per_press() {
    let config = Config {
        toggle_mode: ToggleMode::RisingEdge,
        ..Config::default()
    };
    let mut game = Game::new(&config);

    for _ in 0..5 {
        game.update(Pointer::down(55, 55));
    }

    assert_eq!(game.simulation().grid().get(5, 5), Some(true));
    assert_eq!(game.simulation().grid().population(), 1);
}

#[test]
fn tick_throttle() {
    let config = Config {
        tick_every: 4,
        ..Config::default()
    };
    let mut game = Game::new(&config);
    game.dispatch(Action::StartPause);

    for _ in 0..12 {
        game.update(Pointer::up(-10, -10));
    }

    assert_eq!(game.simulation().generation(), 3);
}

#[test]
fn reset_after_randomize() {
    let config = Config {
        density: 1.0,
        ..Config::default()
    };
    let mut game = Game::new(&config);

    game.dispatch(Action::Randomize);
    assert_eq!(game.simulation().grid().population(), 90 * 120);

    game.dispatch(Action::StartPause);
    game.update(Pointer::up(0, 0));
    assert_eq!(game.simulation().generation(), 1);

    game.dispatch(Action::Reset);
    assert!(game.simulation().grid().is_empty());
    assert_eq!(game.simulation().generation(), 0);
    assert!(game.simulation().is_running());
}

#[test]
fn resize_rebuilds_grid() {
    let mut game = Game::new(&Config::default());
    paint(&mut game, &[(1, 1)]);

    assert!(!game.resize(1200, 900));
    assert_eq!(game.simulation().grid().population(), 1);

    assert!(game.resize(640, 480));
    assert_eq!(game.simulation().dimensions(), Dimensions::new(48, 64));
    assert!(game.simulation().grid().is_empty());

    // buttons keep their startup position
    assert_eq!((game.buttons()[0].x, game.buttons()[0].y), (420, 850));
}
