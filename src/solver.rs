use std::time::Instant;

use crate::config::PuzzleConfig;
use crate::error::ConfigError;
use crate::skyline::Skyline;
use crate::types::{Outcome, Placement, Rect, SearchStats, Solution, millis};

pub struct Solver {
    config: PuzzleConfig,
}

impl Solver {
    pub fn new(config: PuzzleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn solve(&self) -> Solution {
        let board = self.config.board();
        let pieces = self.sorted_pieces();
        let piece_area = self.config.total_piece_area();
        tracing::info!(
            board = %board,
            pieces = pieces.len(),
            piece_area,
            "starting search"
        );

        let start = Instant::now();
        let mut stats = SearchStats::default();
        let outcome = if piece_area != board.area() {
            tracing::debug!(
                piece_area,
                board_area = board.area(),
                "piece area does not match board, skipping search"
            );
            Outcome::Unsolvable
        } else {
            let mut placements = Vec::with_capacity(pieces.len());
            if self.search(&pieces, &Skyline::new(board), &mut placements, &mut stats) {
                Outcome::Solved { placements }
            } else {
                Outcome::Unsolvable
            }
        };
        let elapsed = start.elapsed();

        tracing::info!(
            solved = matches!(outcome, Outcome::Solved { .. }),
            elapsed_ms = millis(elapsed),
            attempts = stats.attempts,
            backtracks = stats.backtracks,
            "search finished"
        );

        Solution {
            board,
            outcome,
            elapsed,
            stats,
        }
    }

    fn sorted_pieces(&self) -> Vec<Rect> {
        let mut pieces = self.config.pieces.clone();
        // Largest first prunes earlier; stable so equal areas keep input order
        pieces.sort_by(|a, b| b.area().cmp(&a.area()));
        pieces
    }

    /// Depth-first search over which remaining piece, in which orientation,
    /// goes on the skyline's lowest edge next.
    ///
    /// Returns with `placements` at its entry length whenever it returns false.
    fn search(
        &self,
        remaining: &[Rect],
        skyline: &Skyline,
        placements: &mut Vec<Placement>,
        stats: &mut SearchStats,
    ) -> bool {
        if remaining.is_empty() {
            debug_assert!(skyline.is_full(), "all pieces placed below the top");
            return true;
        }

        for (idx, piece) in remaining.iter().enumerate() {
            for (turn, oriented) in piece.orientations().into_iter().enumerate() {
                stats.attempts += 1;
                let mut next = skyline.clone();
                let Some(mut placement) = next.try_place(oriented) else {
                    continue;
                };
                debug_assert!(next.covers_board(), "skyline lost a column");
                placement.rotated = turn == 1;
                placements.push(placement);
                stats.placed += 1;

                let rest: Vec<Rect> = remaining[..idx]
                    .iter()
                    .chain(&remaining[idx + 1..])
                    .copied()
                    .collect();
                if self.search(&rest, &next, placements, stats) {
                    return true;
                }

                placements.pop();
                stats.backtracks += 1;
                tracing::trace!(depth = placements.len(), piece = %oriented, "backtrack");
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates a solved tiling:
    /// 1. Every placement lies on the board
    /// 2. No two placements overlap
    /// 3. Placed area equals board area, so the pieces cover it
    /// 4. Every input piece is used exactly once, in one of its orientations
    fn assert_tiling_valid(sol: &Solution, pieces: &[Rect]) {
        let board = sol.board;
        let placements = sol.placements();
        assert!(sol.is_solved(), "expected a solution");

        for (i, p) in placements.iter().enumerate() {
            assert!(
                p.right() <= board.w && p.top() <= board.h,
                "piece {i} ({} @ ({},{})) leaves the {board} board",
                p.rect, p.x, p.y
            );
        }

        for i in 0..placements.len() {
            for j in (i + 1)..placements.len() {
                let (a, b) = (&placements[i], &placements[j]);
                assert!(
                    !a.overlaps(b),
                    "piece {i} ({} @ ({},{})) overlaps piece {j} ({} @ ({},{}))",
                    a.rect, a.x, a.y, b.rect, b.x, b.y
                );
            }
        }

        let covered: u64 = placements.iter().map(|p| p.rect.area()).sum();
        assert_eq!(covered, board.area(), "board not fully covered");

        let mut unused: Vec<Rect> = pieces.to_vec();
        for p in placements {
            let as_input = if p.rotated { p.rect.rotated() } else { p.rect };
            let pos = unused
                .iter()
                .position(|&r| r == as_input)
                .unwrap_or_else(|| panic!("placement {} is not an unused input piece", p.rect));
            unused.swap_remove(pos);
        }
        assert!(unused.is_empty(), "pieces never placed: {unused:?}");
    }

    fn solve(width: u32, height: u32, pieces: Vec<Rect>) -> Solution {
        Solver::new(PuzzleConfig::new(width, height, pieces))
            .unwrap()
            .solve()
    }

    #[test]
    fn test_trivial_exact_fit() {
        let sol = solve(10, 10, vec![Rect::new(10, 10)]);
        assert_tiling_valid(&sol, &[Rect::new(10, 10)]);
        let p = sol.placements()[0];
        assert_eq!((p.x, p.y, p.rect.w, p.rect.h), (0, 0, 10, 10));
    }

    #[test]
    fn test_simple_split() {
        let pieces = vec![Rect::new(10, 2), Rect::new(10, 3)];
        let sol = solve(10, 5, pieces.clone());
        assert_tiling_valid(&sol, &pieces);
        let mut ys: Vec<u32> = sol.placements().iter().map(|p| p.y).collect();
        ys.sort();
        assert!(ys == [0, 2] || ys == [0, 3], "unexpected stacking {ys:?}");
    }

    #[test]
    fn test_largest_piece_goes_first() {
        let sol = solve(10, 5, vec![Rect::new(10, 2), Rect::new(10, 3)]);
        assert_eq!(sol.placements()[0].rect, Rect::new(10, 3));
        assert_eq!((sol.placements()[1].x, sol.placements()[1].y), (0, 3));
    }

    #[test]
    fn test_impossible_configuration() {
        let sol = solve(5, 5, vec![Rect::new(3, 3), Rect::new(3, 3)]);
        assert!(!sol.is_solved());
        assert!(sol.placements().is_empty());
    }

    #[test]
    fn test_area_matches_but_shapes_do_not() {
        // 3x4 from three 2x2: areas agree, but a 1-wide column is always left.
        let sol = solve(3, 4, vec![Rect::new(2, 2), Rect::new(2, 2), Rect::new(2, 2)]);
        assert!(!sol.is_solved());
        assert!(sol.stats.attempts > 0, "expected an actual search");
    }

    #[test]
    fn test_rotation_is_used() {
        // 4x2 board, single 2x4 piece only fits turned.
        let sol = solve(4, 2, vec![Rect::new(2, 4)]);
        assert_tiling_valid(&sol, &[Rect::new(2, 4)]);
        assert!(sol.placements()[0].rotated);
        assert_eq!(sol.placements()[0].rect, Rect::new(4, 2));
    }

    #[test]
    fn test_piece_larger_than_board() {
        let sol = solve(4, 4, vec![Rect::new(8, 2)]);
        assert!(!sol.is_solved());
    }

    #[test]
    fn test_backtrack_restores_placements() {
        let solver = Solver::new(PuzzleConfig::new(3, 4, vec![Rect::new(2, 2); 3])).unwrap();
        let skyline = Skyline::new(Rect::new(3, 4));
        let before_edges = skyline.edges();
        let sentinel = Placement { x: 9, y: 9, rect: Rect::new(1, 1), rotated: false };
        let mut placements = vec![sentinel];
        let mut stats = SearchStats::default();

        let found = solver.search(&[Rect::new(2, 2); 3], &skyline, &mut placements, &mut stats);

        assert!(!found);
        assert_eq!(placements, vec![sentinel]);
        assert_eq!(skyline.edges(), before_edges);
        assert!(stats.backtracks > 0);
        assert_eq!(stats.placed, stats.backtracks);
    }

    #[test]
    fn test_deterministic() {
        let a = Solver::new(PuzzleConfig::calibron12()).unwrap().solve();
        let b = Solver::new(PuzzleConfig::calibron12()).unwrap().solve();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_calibron12() {
        let config = PuzzleConfig::calibron12();
        let sol = Solver::new(config.clone()).unwrap().solve();
        assert_tiling_valid(&sol, &config.pieces);
        assert_eq!(sol.placements().len(), 12);
        assert_eq!(sol.stats.placed - sol.stats.backtracks, 12);
    }

    #[test]
    fn test_fills_around_a_square() {
        let mut pieces = vec![Rect::new(2, 2)];
        pieces.extend([Rect::new(1, 1); 5]);
        let sol = solve(3, 3, pieces.clone());
        assert_tiling_valid(&sol, &pieces);
        assert_eq!(sol.placements()[0].rect, Rect::new(2, 2));
    }

    #[test]
    fn test_many_duplicates() {
        // 6x4 board from eight 3x1 strips.
        let pieces = vec![Rect::new(3, 1); 8];
        let sol = solve(6, 4, pieces.clone());
        assert_tiling_valid(&sol, &pieces);
    }

    #[test]
    fn test_pinwheel() {
        // Four 3x2 pieces turning around a 1x1 hole in a 5x5 board.
        let mut pieces = vec![Rect::new(3, 2); 4];
        pieces.push(Rect::new(1, 1));
        let sol = solve(5, 5, pieces.clone());
        assert_tiling_valid(&sol, &pieces);
        let hole = sol.placements().iter().find(|p| p.rect == Rect::new(1, 1)).unwrap();
        assert_eq!((hole.x, hole.y), (2, 2));
        assert!(sol.placements().iter().any(|p| p.rotated && p.rect == Rect::new(2, 3)));
    }

    #[test]
    fn test_full_width_pieces_at_u32_max() {
        let pieces = vec![Rect::new(u32::MAX, 1), Rect::new(1, u32::MAX)];
        let sol = solve(u32::MAX, 2, pieces.clone());
        assert_tiling_valid(&sol, &pieces);
        let second = sol.placements()[1];
        assert!(second.rotated);
        assert_eq!((second.x, second.y, second.rect), (0, 1, Rect::new(u32::MAX, 1)));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(Solver::new(PuzzleConfig::new(5, 5, vec![])).is_err());
        assert!(Solver::new(PuzzleConfig::new(5, 0, vec![Rect::new(1, 1)])).is_err());
    }
}
