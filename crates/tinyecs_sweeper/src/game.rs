//! One game: the scene, the board, and the per-turn systems.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tinyecs_scene::{Entity, Scene};
use tinyecs_system::SystemList;
use tracing::{debug, info};

use crate::board::{Board, Label};
use crate::config::SweeperConfig;
use crate::systems::{Outcome, label_system, outcome_group};

pub struct Game {
    scene: Scene,
    board: Board,
    systems: SystemList,
    state: Entity,
}

impl Game {
    /// Generate a board from `config`, seeded from `config.seed` when set.
    pub fn new(config: &SweeperConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut scene = Scene::new();
        let board = Board::generate(
            &mut scene,
            config.width,
            config.height,
            config.mines,
            &mut rng,
        );
        Self::with_board(scene, board)
    }

    /// Wrap an already populated scene and its board.
    pub fn with_board(mut scene: Scene, board: Board) -> Result<Self> {
        let state = scene.add_entity((Outcome::Playing,));
        let mut systems = SystemList::new();
        systems.add(label_system);
        systems.add_group(outcome_group(state, board.safe_cells())?);

        let mut game = Self {
            scene,
            board,
            systems,
            state,
        };
        game.update();
        Ok(game)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Run one tick of the per-turn systems.
    pub fn update(&mut self) {
        self.systems.tick(&mut self.scene);
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.scene
            .get_component::<Outcome>(self.state)
            .copied()
            .unwrap_or_default()
    }

    /// Reveal `(x, y)` and advance the game by one turn. Returns `false`
    /// without changing anything if the coordinates are off the board.
    pub fn reveal(&mut self, x: usize, y: usize) -> Result<bool> {
        if !self.board.contains(x, y) {
            return Ok(false);
        }
        let opened = self
            .board
            .reveal(&mut self.scene, x, y)
            .with_context(|| format!("failed to reveal ({x}, {y})"))?;
        debug!(x, y, opened, "cell revealed");
        self.update();
        Ok(true)
    }

    /// Printable snapshot of the board labels.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView { game: self }
    }
}

/// Board labels laid out with column and row headers.
pub struct BoardView<'a> {
    game: &'a Game,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = &self.game.board;
        let scene = &self.game.scene;
        let pad = board.width().max(board.height()).saturating_sub(1).to_string().len();

        write!(f, "{:>pad$} X", "")?;
        for x in 0..board.width() {
            write!(f, " {x:>pad$}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:>pad$}Y", "")?;

        for y in 0..board.height() {
            write!(f, "{y:>pad$}  ")?;
            for x in 0..board.width() {
                let label = board
                    .entity_at(x, y)
                    .and_then(|entity| scene.get_component::<Label>(entity).ok())
                    .copied()
                    .unwrap_or(Label::HIDDEN);
                write!(f, " {:>pad$}", label.0)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Read one coordinate, re-prompting until it parses and lies below `limit`.
/// Returns `None` at end of input.
fn read_coordinate<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    axis: char,
    limit: usize,
) -> Result<Option<usize>> {
    let mut line = String::new();
    loop {
        write!(output, "{axis}: ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(value) if value < limit => return Ok(Some(value)),
            _ => writeln!(output, "Enter a number between 0 and {}", limit - 1)?,
        }
    }
}

/// Play `game` to completion, reading coordinates from `input`.
///
/// Returns [`Outcome::Playing`] if input ends before the game does.
pub fn play<R: BufRead, W: Write>(game: &mut Game, input: &mut R, output: &mut W) -> Result<Outcome> {
    let (width, height) = (game.board().width(), game.board().height());
    info!(width, height, mines = game.board().mines(), "game started");

    while game.outcome() == Outcome::Playing {
        write!(output, "{}", game.view())?;
        let Some(x) = read_coordinate(input, output, 'X', width)? else {
            return Ok(Outcome::Playing);
        };
        let Some(y) = read_coordinate(input, output, 'Y', height)? else {
            return Ok(Outcome::Playing);
        };
        game.reveal(x, y)?;
    }

    write!(output, "{}", game.view())?;
    match game.outcome() {
        Outcome::Won => writeln!(output, "You win!")?,
        Outcome::Lost => writeln!(output, "Game Over!")?,
        Outcome::Playing => {}
    }
    Ok(game.outcome())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    // * 1
    // 1 1
    fn small_game() -> Game {
        let mut scene = Scene::new();
        let board = Board::from_layout(&mut scene, 2, 2, &[true, false, false, false]);
        Game::with_board(scene, board).unwrap()
    }

    fn run(input: &str) -> (Outcome, String) {
        let mut game = small_game();
        let mut output = Vec::new();
        let outcome = play(&mut game, &mut Cursor::new(input), &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_new_game_is_fully_hidden() {
        let game = small_game();
        assert_eq!(game.outcome(), Outcome::Playing);
        assert_eq!(game.scene().component_count::<Label>(), 4);
        assert!(
            game.scene()
                .get_components::<Label>()
                .iter()
                .all(|label| *label == Label::HIDDEN)
        );
        assert_eq!(game.view().to_string(), "  X 0 1\n Y\n0   # #\n1   # #\n");
    }

    #[test]
    fn test_new_game_from_config() {
        let config = SweeperConfig {
            width: 5,
            height: 4,
            mines: 3,
            seed: Some(11),
        };
        let game = Game::new(&config).unwrap();
        assert_eq!(game.board().safe_cells(), 17);
        assert_eq!(game.outcome(), Outcome::Playing);
    }

    #[test]
    fn test_reveal_off_board_is_rejected() {
        let mut game = small_game();
        assert!(!game.reveal(2, 0).unwrap());
        assert!(game.reveal(1, 1).unwrap());
        assert_eq!(game.outcome(), Outcome::Playing);
    }

    #[test]
    fn test_view_layout() {
        let mut game = small_game();
        game.reveal(1, 0).unwrap();
        assert_eq!(game.view().to_string(), "  X 0 1\n Y\n0   # 1\n1   # #\n");
    }

    #[test]
    fn test_play_until_win() {
        let (outcome, output) = run("1\n0\n0\n1\n1\n1\n");
        assert_eq!(outcome, Outcome::Won);
        assert!(output.ends_with("You win!\n"));
    }

    #[test]
    fn test_play_until_loss() {
        let (outcome, output) = run("0\n0\n");
        assert_eq!(outcome, Outcome::Lost);
        assert!(output.contains('*'));
        assert!(output.ends_with("Game Over!\n"));
    }

    #[test]
    fn test_invalid_coordinates_repeat_prompt() {
        let (outcome, output) = run("7\nx\n0\n0\n");
        assert_eq!(outcome, Outcome::Lost);
        assert_eq!(output.matches("Enter a number between 0 and 1").count(), 2);
    }

    #[test]
    fn test_end_of_input_leaves_game_running() {
        let (outcome, output) = run("1\n");
        assert_eq!(outcome, Outcome::Playing);
        assert!(!output.contains("You win!"));
    }
}
