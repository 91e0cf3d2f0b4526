//! Systems that derive board state once per turn.

use tinyecs_scene::{ComponentTypeId, Entity, SceneError};
use tinyecs_system::{SystemGroup, TickContext};
use tracing::{debug, warn};

use crate::board::{Cell, Label, MineCount, Revealed};

/// State of a game after the most recent turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Write a [`Label`] onto every cell: hidden cells are the difference between
/// all cells and the revealed ones.
pub fn label_system(ctx: &mut TickContext<'_>) {
    let scene = &mut *ctx.scene;
    let cells = scene.match_entities(&[ComponentTypeId::of::<Cell>()]);
    let revealed = scene.match_rows::<(MineCount, Revealed)>();
    let (cells, revealed) = match (cells, revealed) {
        (Ok(cells), Ok(revealed)) => (cells, revealed),
        (Err(err), _) | (_, Err(err)) => {
            warn!(%err, "label pass skipped");
            return;
        }
    };

    let mut hidden = cells;
    for (entity, (count, _)) in &revealed {
        hidden.remove(entity);
        scene.add_component(*entity, Label::revealed(*count));
    }
    for entity in hidden {
        scene.add_component(entity, Label::HIDDEN);
    }
}

/// Group that records the game [`Outcome`] on `state` after every run.
///
/// # Errors
///
/// Propagates [`SceneError::InvalidQuery`] from subscribing, which cannot
/// happen for the fixed signature used here.
pub fn outcome_group(state: Entity, safe_cells: usize) -> Result<SystemGroup, SceneError> {
    let mut group = SystemGroup::new();
    group.add::<(MineCount, Revealed), _>(move |scene, rows| {
        let outcome = if rows.iter().any(|(_, (count, _))| count.is_mine()) {
            Outcome::Lost
        } else if rows.len() >= safe_cells {
            Outcome::Won
        } else {
            Outcome::Playing
        };
        if scene.add_component(state, outcome) != Some(outcome) {
            debug!(?outcome, revealed = rows.len(), safe_cells, "outcome changed");
        }
    })?;
    Ok(group)
}

#[cfg(test)]
mod tests {
    use tinyecs_scene::Scene;
    use tinyecs_system::SystemList;

    use super::*;
    use crate::board::Board;

    // * 1
    // 1 1
    fn small(scene: &mut Scene) -> Board {
        Board::from_layout(scene, 2, 2, &[true, false, false, false])
    }

    fn label_at(scene: &Scene, board: &Board, x: usize, y: usize) -> Label {
        let entity = board.entity_at(x, y).unwrap();
        *scene.get_component::<Label>(entity).unwrap()
    }

    #[test]
    fn test_labels_hidden_and_revealed_cells() {
        let mut scene = Scene::new();
        let board = small(&mut scene);
        board.reveal(&mut scene, 1, 1).unwrap();

        let mut systems = SystemList::new();
        systems.add(label_system);
        systems.tick(&mut scene);

        assert_eq!(label_at(&scene, &board, 1, 1), Label('1'));
        assert_eq!(label_at(&scene, &board, 0, 0), Label::HIDDEN);
        assert_eq!(label_at(&scene, &board, 1, 0), Label::HIDDEN);
        assert_eq!(scene.component_count::<Label>(), 4);

        board.reveal(&mut scene, 0, 0).unwrap();
        systems.tick(&mut scene);
        assert_eq!(label_at(&scene, &board, 0, 0), Label::MINE);
    }

    #[test]
    fn test_label_for_empty_cell() {
        let mut scene = Scene::new();
        let board = Board::from_layout(&mut scene, 3, 1, &[false, false, true]);
        board.reveal(&mut scene, 0, 0).unwrap();

        let mut systems = SystemList::new();
        systems.add(label_system);
        systems.tick(&mut scene);

        assert_eq!(label_at(&scene, &board, 0, 0), Label::EMPTY);
        assert_eq!(label_at(&scene, &board, 1, 0), Label('1'));
        assert_eq!(label_at(&scene, &board, 2, 0), Label::HIDDEN);
    }

    #[test]
    fn test_outcome_tracks_reveals() {
        let mut scene = Scene::new();
        let board = small(&mut scene);
        let state = scene.add_entity((Outcome::Playing,));
        let mut group = outcome_group(state, board.safe_cells()).unwrap();

        group.run(&mut scene);
        assert_eq!(scene.get_component::<Outcome>(state), Ok(&Outcome::Playing));

        for (x, y) in [(1, 0), (0, 1)] {
            board.reveal(&mut scene, x, y).unwrap();
        }
        group.run(&mut scene);
        assert_eq!(scene.get_component::<Outcome>(state), Ok(&Outcome::Playing));

        board.reveal(&mut scene, 1, 1).unwrap();
        group.run(&mut scene);
        assert_eq!(scene.get_component::<Outcome>(state), Ok(&Outcome::Won));
    }

    #[test]
    fn test_revealing_a_mine_loses() {
        let mut scene = Scene::new();
        let board = small(&mut scene);
        let state = scene.add_entity((Outcome::Playing,));
        let mut group = outcome_group(state, board.safe_cells()).unwrap();

        board.reveal(&mut scene, 0, 0).unwrap();
        group.run(&mut scene);
        assert_eq!(scene.get_component::<Outcome>(state), Ok(&Outcome::Lost));
    }
}
