//! Command line configuration.

use anyhow::{Result, bail, ensure};
use clap::Parser;

/// Board dimensions and RNG seed for one game.
#[derive(Debug, Clone, Parser)]
#[command(name = "tinyecs_sweeper", about = "Reveal every safe cell without touching a mine")]
pub struct SweeperConfig {
    /// Number of columns
    #[arg(long, default_value_t = 9)]
    pub width: usize,

    /// Number of rows
    #[arg(long, default_value_t = 9)]
    pub height: usize,

    /// Number of mines hidden on the board
    #[arg(short, long, default_value_t = 9)]
    pub mines: usize,

    /// Seed for mine placement; random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl SweeperConfig {
    /// Reject boards that cannot be played.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero, the cell count overflows, or the
    /// mines fill the whole board.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "board must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        let Some(cells) = self.width.checked_mul(self.height) else {
            bail!("a {}x{} board is too large", self.width, self.height);
        };
        ensure!(
            self.mines < cells,
            "{} mines do not leave a safe cell on a {cells}-cell board",
            self.mines
        );
        Ok(())
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 9,
            seed: None,
        }
    }
}
