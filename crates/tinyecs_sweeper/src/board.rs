//! Board components and the grid of cell entities.
//!
//! Every cell is one entity carrying a [`Cell`] position and a [`MineCount`].
//! Revealing a cell binds the [`Revealed`] tag to it; the label system later
//! derives a [`Label`] from those two.

use rand::Rng;
use rand::seq::SliceRandom;
use tinyecs_scene::{Entity, Scene, SceneError};

/// Number of mines around a cell, or [`MineCount::MINE`] for a mine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineCount(pub i8);

impl MineCount {
    pub const MINE: MineCount = MineCount(-1);

    #[must_use]
    pub fn is_mine(self) -> bool {
        self == Self::MINE
    }
}

/// Grid position of a cell entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

/// Tag bound to cells the player has uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revealed;

/// Character drawn for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(pub char);

impl Label {
    pub const HIDDEN: Label = Label('#');
    pub const MINE: Label = Label('*');
    pub const EMPTY: Label = Label(' ');

    /// Label of an uncovered cell.
    #[must_use]
    pub fn revealed(count: MineCount) -> Self {
        match count.0 {
            c if c < 0 => Self::MINE,
            0 => Self::EMPTY,
            c => Label(char::from(b'0' + c.unsigned_abs())),
        }
    }
}

/// Row-major grid of cell entities.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    mines: usize,
    cells: Vec<Entity>,
}

impl Board {
    /// Scatter `mines` mines over a `width x height` board and spawn its cells.
    pub fn generate<R: Rng + ?Sized>(
        scene: &mut Scene,
        width: usize,
        height: usize,
        mines: usize,
        rng: &mut R,
    ) -> Self {
        let mut layout = vec![false; width * height];
        for slot in layout.iter_mut().take(mines) {
            *slot = true;
        }
        layout.shuffle(rng);
        Self::from_layout(scene, width, height, &layout)
    }

    /// Spawn cells for a fixed layout. `layout[y * width + x]` is `true` for a
    /// mine.
    pub fn from_layout(scene: &mut Scene, width: usize, height: usize, layout: &[bool]) -> Self {
        debug_assert_eq!(layout.len(), width * height);
        let mut board = Self {
            width,
            height,
            mines: layout.iter().filter(|mine| **mine).count(),
            cells: Vec::with_capacity(width * height),
        };

        for y in 0..height {
            for x in 0..width {
                let count = if layout[y * width + x] {
                    MineCount::MINE
                } else {
                    let around = board
                        .neighbours(x, y)
                        .filter(|(ax, ay)| layout[ay * width + ax])
                        .count();
                    MineCount(around as i8)
                };
                board.cells.push(scene.add_entity((Cell { x, y }, count)));
            }
        }
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn mines(&self) -> usize {
        self.mines
    }

    /// Cells that must be revealed to win.
    #[must_use]
    pub fn safe_cells(&self) -> usize {
        self.width * self.height - self.mines
    }

    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[must_use]
    pub fn entity_at(&self, x: usize, y: usize) -> Option<Entity> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// The up to eight in-bounds cells around `(x, y)`.
    pub fn neighbours(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let xs = x.saturating_sub(1)..=(x + 1).min(self.width.saturating_sub(1));
        let ys = y.saturating_sub(1)..=(y + 1).min(self.height.saturating_sub(1));
        xs.flat_map(move |ax| ys.clone().map(move |ay| (ax, ay)))
            .filter(move |&cell| cell != (x, y))
    }

    /// Uncover `(x, y)`, flooding outwards through cells with no mines around
    /// them. Already revealed cells stop the flood. Returns how many cells
    /// were newly revealed.
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] if a cell entity lost its
    /// [`MineCount`].
    pub fn reveal(&self, scene: &mut Scene, x: usize, y: usize) -> Result<usize, SceneError> {
        let mut pending = vec![(x, y)];
        let mut revealed = 0;

        while let Some((x, y)) = pending.pop() {
            let Some(entity) = self.entity_at(x, y) else {
                continue;
            };
            if scene.has_component::<Revealed>(entity) {
                continue;
            }
            if *scene.get_component::<MineCount>(entity)? == MineCount(0) {
                pending.extend(self.neighbours(x, y));
            }
            scene.add_component(entity, Revealed);
            revealed += 1;
        }
        Ok(revealed)
    }
}
