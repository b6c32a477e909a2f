use crate::types::{Placement, Rect};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Draws the board as ASCII art with `y = 0` on the bottom row.
pub fn render_board(board: Rect, placements: &[Placement]) -> String {
    // Terminal cells are roughly twice as tall as wide.
    let scale = f64::min(MAX_WIDTH / board.w as f64, MAX_HEIGHT / board.h as f64);
    let cols = (board.w as f64 * scale).round() as usize;
    let rows = (board.h as f64 * scale / 2.0).round() as usize;

    if cols == 0 || rows == 0 {
        return String::new();
    }

    let x_scale = cols as f64 / board.w as f64;
    let y_scale = rows as f64 / board.h as f64;
    let mut grid = vec![vec![' '; cols + 1]; rows + 1];

    draw_rect(&mut grid, 0, 0, cols, rows);

    for p in placements {
        let left = (p.x as f64 * x_scale).round() as usize;
        let right = (p.right() as f64 * x_scale).round() as usize;
        let bottom = (p.y as f64 * y_scale).round() as usize;
        let top = (p.top() as f64 * y_scale).round() as usize;
        if right <= left || top <= bottom {
            continue;
        }

        // Grid row 0 is the top of the board.
        let row = rows.saturating_sub(top);
        let (w, h) = (right - left, top - bottom);
        draw_rect(&mut grid, left, row, w, h);

        let label: Vec<char> = p.rect.to_string().chars().collect();
        if h >= 2 && label.len() < w {
            let cy = row + h / 2;
            let start = left + (w - label.len()) / 2 + 1;
            for (i, &ch) in label.iter().enumerate() {
                if start + i < left + w {
                    grid[cy][start + i] = ch;
                }
            }
        }
    }

    let mut out = String::new();
    for line in &grid {
        let line: String = line.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    for i in x..=x + w {
        mark(grid, i, y, '-');
        mark(grid, i, y + h, '-');
    }
    for j in y..=y + h {
        mark(grid, x, j, '|');
        mark(grid, x + w, j, '|');
    }
    for (cx, cy) in [(x, y), (x + w, y), (x, y + h), (x + w, y + h)] {
        if let Some(cell) = grid.get_mut(cy).and_then(|r| r.get_mut(cx)) {
            *cell = '+';
        }
    }
}

// Crossing border lines become '+'.
fn mark(grid: &mut [Vec<char>], x: usize, y: usize, ch: char) {
    let Some(cell) = grid.get_mut(y).and_then(|r| r.get_mut(x)) else {
        return;
    };
    *cell = match (*cell, ch) {
        (' ', c) => c,
        (old, c) if old == c => c,
        _ => '+',
    };
}
