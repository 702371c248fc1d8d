//! Jigsaw board: piece layout, drag handling and group merging
//!
//! Every piece is rendered from a full-size texture masked to its cell, so a
//! correctly assembled group has all of its pieces at the *same* screen
//! position. Two grid neighbours belong together once their positions are
//! within the snap tolerance of each other.

use glam::{UVec2, Vec2};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::disjoint_set::DisjointSet;
use crate::consts::{PIECE_COUNT, PUZZLE_COLUMNS};
use crate::tuning::PuzzleTuning;

/// One jigsaw piece
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    pub id: usize,
    /// Column/row in the finished image (immutable)
    pub grid: UVec2,
    /// Current screen position (mutated by dragging)
    pub pos: Vec2,
}

impl Piece {
    pub fn new(id: usize, pos: Vec2) -> Self {
        Self {
            id,
            grid: grid_of(id),
            pos,
        }
    }

    /// Adjacent in the finished image (shares an edge)
    pub fn is_grid_neighbour(&self, other: &Piece) -> bool {
        let dx = self.grid.x.abs_diff(other.grid.x);
        let dy = self.grid.y.abs_diff(other.grid.y);
        dx + dy == 1
    }

    /// Screen positions close enough to snap
    pub fn is_near(&self, other: &Piece, tolerance: f32) -> bool {
        let d = (self.pos - other.pos).abs();
        d.x + d.y < tolerance
    }
}

/// Grid cell of piece `id` in the finished image
pub fn grid_of(id: usize) -> UVec2 {
    UVec2::new((id % PUZZLE_COLUMNS) as u32, (id / PUZZLE_COLUMNS) as u32)
}

/// A group merge caused by a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// Piece in the dragged group that matched
    pub piece: usize,
    /// Neighbour it snapped to
    pub target: usize,
    /// Representative of the merged group
    pub representative: usize,
}

/// What a drop did to the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropOutcome {
    pub merges: Vec<Merge>,
    /// A single group now holds every piece
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    groups: DisjointSet,
    tolerance: f32,
}

impl Board {
    /// Scatter the pieces over shuffled slots
    pub fn new<R: Rng>(rng: &mut R, tuning: &PuzzleTuning) -> Self {
        let mut slots: Vec<usize> = (0..PIECE_COUNT).collect();
        slots.shuffle(rng);
        let positions = slots
            .iter()
            .enumerate()
            .map(|(id, &slot)| scatter_position(id, slot, tuning))
            .collect();
        Self::from_positions(positions, tuning.snap_tolerance)
    }

    /// Board with explicit starting positions (one per piece)
    pub fn from_positions(positions: Vec<Vec2>, tolerance: f32) -> Self {
        let pieces: Vec<Piece> = positions
            .into_iter()
            .enumerate()
            .map(|(id, pos)| Piece::new(id, pos))
            .collect();
        let groups = DisjointSet::new(pieces.len());
        Self {
            pieces,
            groups,
            tolerance,
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: usize) -> Option<&Piece> {
        self.pieces.get(id)
    }

    /// Representative id of the group holding `piece`
    pub fn group_of(&self, piece: usize) -> usize {
        self.groups.root(piece)
    }

    /// Pieces attached to `piece` (including itself)
    pub fn group_members(&self, piece: usize) -> Vec<usize> {
        self.groups.members(piece)
    }

    pub fn group_count(&self) -> usize {
        self.groups.group_count()
    }

    pub fn is_complete(&self) -> bool {
        !self.pieces.is_empty() && self.groups.size_of(0) == self.pieces.len()
    }

    /// Move the whole group holding `piece` to `pos`
    pub fn drag(&mut self, piece: usize, pos: Vec2) {
        if piece >= self.pieces.len() {
            log::warn!("Ignoring drag of unknown piece {}", piece);
            return;
        }
        self.move_group(piece, pos);
    }

    /// Drop the group holding `piece`: snap and merge with every grid
    /// neighbour that lies within tolerance, until nothing else matches.
    pub fn drop_piece(&mut self, piece: usize) -> DropOutcome {
        let mut outcome = DropOutcome::default();
        if piece >= self.pieces.len() {
            log::warn!("Ignoring drop of unknown piece {}", piece);
            return outcome;
        }

        while let Some((member, target)) = self.find_match(piece) {
            let snap_to = self.pieces[target].pos;
            self.move_group(piece, snap_to);
            if let Some(representative) = self.groups.union(member, target) {
                log::debug!(
                    "Piece {} joined {} (group {}, {} pieces)",
                    member,
                    target,
                    representative,
                    self.groups.size_of(representative)
                );
                outcome.merges.push(Merge {
                    piece: member,
                    target,
                    representative,
                });
            }
        }

        outcome.complete = self.is_complete();
        outcome
    }

    /// First (member, outsider) pair that belongs together
    fn find_match(&self, piece: usize) -> Option<(usize, usize)> {
        let members = self.groups.members(piece);
        members.iter().find_map(|&m| {
            let member = &self.pieces[m];
            self.pieces
                .iter()
                .filter(|other| !self.groups.same_set(m, other.id))
                .find(|other| {
                    member.is_grid_neighbour(other) && member.is_near(other, self.tolerance)
                })
                .map(|other| (m, other.id))
        })
    }

    fn move_group(&mut self, piece: usize, pos: Vec2) {
        for m in self.groups.members(piece) {
            self.pieces[m].pos = pos;
        }
    }
}

/// Starting position for piece `id` placed in scatter `slot`.
///
/// Slots fill columns top to bottom. The grid offset is subtracted so that the
/// visible cell, not the texture origin, lands in the slot.
pub fn scatter_position(id: usize, slot: usize, tuning: &PuzzleTuning) -> Vec2 {
    let grid = grid_of(id).as_vec2();
    let per_column = tuning.slots_per_column.max(1);
    let column = (slot / per_column) as f32;
    let row = (slot % per_column) as f32;
    let size = tuning.piece_size;
    Vec2::new(
        (tuning.start.x - size + tuning.slot_gap) + tuning.column_spacing * column - grid.x * size,
        tuning.start.y + (size + tuning.slot_gap) * row - grid.y * size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Pieces spread far apart so nothing snaps by accident
    fn spread_board() -> Board {
        let positions = (0..PIECE_COUNT)
            .map(|i| Vec2::new(i as f32 * 100.0, i as f32 * 100.0))
            .collect();
        Board::from_positions(positions, 10.0)
    }

    #[test]
    fn test_grid_layout() {
        assert_eq!(grid_of(0), UVec2::new(0, 0));
        assert_eq!(grid_of(4), UVec2::new(1, 1));
        assert_eq!(grid_of(11), UVec2::new(2, 3));
    }

    #[test]
    fn test_neighbours() {
        let board = spread_board();
        let p = |i: usize| &board.pieces()[i];
        assert!(p(0).is_grid_neighbour(p(1)));
        assert!(p(0).is_grid_neighbour(p(3)));
        assert!(!p(0).is_grid_neighbour(p(4)), "diagonal");
        assert!(!p(2).is_grid_neighbour(p(3)), "row wrap");
        assert!(!p(0).is_grid_neighbour(p(0)));
    }

    #[test]
    fn test_drop_onto_neighbour_merges() {
        let mut board = spread_board();
        let target = board.pieces()[1].pos;
        board.drag(0, target + Vec2::new(4.0, 3.0));
        let outcome = board.drop_piece(0);

        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(board.group_of(0), 1);
        assert_eq!(board.group_of(1), 1);
        // Snapped exactly onto the target
        assert_eq!(board.pieces()[0].pos, target);
        assert!(!outcome.complete);
    }

    #[test]
    fn test_drop_outside_tolerance_does_nothing() {
        let mut board = spread_board();
        let target = board.pieces()[1].pos;
        board.drag(0, target + Vec2::new(6.0, 4.0));
        let outcome = board.drop_piece(0);
        assert!(outcome.merges.is_empty());
        assert_eq!(board.group_count(), PIECE_COUNT);
    }

    #[test]
    fn test_non_neighbour_never_merges() {
        let mut board = spread_board();
        let target = board.pieces()[4].pos;
        board.drag(0, target);
        assert!(board.drop_piece(0).merges.is_empty());
    }

    #[test]
    fn test_group_moves_together() {
        let mut board = spread_board();
        let target = board.pieces()[1].pos;
        board.drag(0, target);
        board.drop_piece(0);

        let dest = Vec2::new(42.0, 24.0);
        board.drag(1, dest);
        assert_eq!(board.pieces()[0].pos, dest);
        assert_eq!(board.pieces()[1].pos, dest);
        assert_ne!(board.pieces()[2].pos, dest);
    }

    #[test]
    fn test_drop_chains_merges() {
        let mut board = spread_board();
        // 1 and 2 already sit together; dropping 0 on 1 also picks up 2
        let spot = Vec2::new(500.0, -500.0);
        board.drag(1, spot);
        board.drag(2, spot);
        board.drop_piece(2);
        assert_eq!(board.group_members(1), vec![1, 2]);

        board.drag(0, spot);
        let outcome = board.drop_piece(0);
        assert_eq!(board.group_members(0), vec![0, 1, 2]);
        assert_eq!(outcome.merges.len(), 1);
    }

    #[test]
    fn test_complete_when_all_joined() {
        let mut board = spread_board();
        let spot = board.pieces()[4].pos;
        for i in 0..PIECE_COUNT {
            board.drag(i, spot);
        }
        let outcome = board.drop_piece(4);
        assert!(outcome.complete);
        assert!(board.is_complete());
        assert_eq!(board.group_count(), 1);
    }

    #[test]
    fn test_unknown_piece_ignored() {
        let mut board = spread_board();
        board.drag(99, Vec2::ZERO);
        assert_eq!(board.drop_piece(99), DropOutcome::default());
    }

    #[test]
    fn test_scatter_is_separated() {
        let tuning = PuzzleTuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let board = Board::new(&mut rng, &tuning);
        assert_eq!(board.pieces().len(), PIECE_COUNT);
        assert_eq!(board.group_count(), PIECE_COUNT);

        // No neighbours start close enough to snap
        for a in board.pieces() {
            for b in board.pieces() {
                if a.is_grid_neighbour(b) {
                    assert!(!a.is_near(b, tuning.snap_tolerance));
                }
            }
        }
    }

    #[test]
    fn test_scatter_position_slot_zero() {
        let tuning = PuzzleTuning::default();
        // Piece 0 has no grid offset
        assert_eq!(scatter_position(0, 0, &tuning), Vec2::new(113.0, 170.0));
        // Piece 4 (col 1, row 1) in the second column, third row
        assert_eq!(
            scatter_position(4, 8, &tuning),
            Vec2::new(113.0 + 200.0 - 67.0, 170.0 + 97.0 * 2.0 - 67.0)
        );
    }

    /// Every grid edge (a, b)
    fn grid_edges() -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for a in 0..PIECE_COUNT {
            for b in 0..PIECE_COUNT {
                let (ga, gb) = (grid_of(a), grid_of(b));
                if a < b && ga.x.abs_diff(gb.x) + ga.y.abs_diff(gb.y) == 1 {
                    edges.push((a, b));
                }
            }
        }
        edges
    }

    proptest! {
        #[test]
        fn merge_order_does_not_matter(
            edges in Just(grid_edges()).prop_shuffle(),
            flip in any::<bool>()
        ) {
            let mut board = spread_board();
            for (a, b) in edges {
                let (dragged, target) = if flip { (b, a) } else { (a, b) };
                let pos = board.pieces()[target].pos;
                board.drag(dragged, pos);
                board.drop_piece(dragged);
            }
            prop_assert!(board.is_complete());
            prop_assert_eq!(board.group_count(), 1);
            let first = board.pieces()[0].pos;
            prop_assert!(board.pieces().iter().all(|p| p.pos == first));
        }
    }
}
