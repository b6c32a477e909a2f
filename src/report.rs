use crate::types::{Outcome, Solution, millis};

/// Human-readable summary of a finished search.
pub fn format_report(solution: &Solution) -> String {
    let ms = millis(solution.elapsed);
    let mut out = String::new();
    match &solution.outcome {
        Outcome::Solved { placements } => {
            out.push_str(&format!("Solution found in {ms}ms:\n"));
            for p in placements {
                out.push_str(&format!("{} by {} at {}, {}\n", p.rect.w, p.rect.h, p.x, p.y));
            }
        }
        Outcome::Unsolvable => {
            out.push_str(&format!(
                "No solution exists, all possibilities eliminated in {ms}ms\n"
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::{Placement, Rect, SearchStats};

    #[test]
    fn test_solved_report() {
        let sol = Solution {
            board: Rect::new(10, 5),
            outcome: Outcome::Solved {
                placements: vec![
                    Placement { x: 0, y: 0, rect: Rect::new(10, 3), rotated: false },
                    Placement { x: 0, y: 3, rect: Rect::new(10, 2), rotated: false },
                ],
            },
            elapsed: Duration::from_millis(12),
            stats: SearchStats::default(),
        };
        assert_eq!(
            format_report(&sol),
            "Solution found in 12ms:\n10 by 3 at 0, 0\n10 by 2 at 0, 3\n"
        );
    }

    #[test]
    fn test_unsolvable_report() {
        let sol = Solution {
            board: Rect::new(5, 5),
            outcome: Outcome::Unsolvable,
            elapsed: Duration::from_millis(3),
            stats: SearchStats::default(),
        };
        assert_eq!(
            format_report(&sol),
            "No solution exists, all possibilities eliminated in 3ms\n"
        );
    }
}
