use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::{Placement, Rect};

/// One constant-height segment of the skyline. Columns `x..x + length` are
/// filled up to `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub x: u32,
    pub y: u32,
    pub length: u32,
}

impl Edge {
    pub fn new(x: u32, y: u32, length: u32) -> Self {
        Self { x, y, length }
    }

    pub fn end(&self) -> u32 {
        self.x + self.length
    }
}

// Greater means placed on first: lowest y, then leftmost x.
impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .y
            .cmp(&self.y)
            .then_with(|| other.x.cmp(&self.x))
            .then_with(|| self.length.cmp(&other.length))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The upper boundary of everything placed so far.
#[derive(Debug, Clone)]
pub struct Skyline {
    board: Rect,
    edges: BinaryHeap<Edge>,
}

impl Skyline {
    pub fn new(board: Rect) -> Self {
        Self {
            board,
            edges: BinaryHeap::from([Edge::new(0, 0, board.w)]),
        }
    }

    /// The edge the next piece goes on.
    pub fn lowest(&self) -> Option<Edge> {
        self.edges.peek().copied()
    }

    /// Edges in placement priority order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = self.edges.clone().into_sorted_vec();
        edges.reverse();
        edges
    }

    /// Tries to put `piece`, as oriented, on the lowest-leftmost edge.
    ///
    /// Edges directly to the right at the same height are merged into the
    /// target first. On failure no piece is recorded; the skyline may be left
    /// with that merge applied, which covers the same columns.
    pub fn try_place(&mut self, piece: Rect) -> Option<Placement> {
        let mut target = self.lowest()?;
        // target.y never exceeds the board height
        if piece.h > self.board.h - target.y {
            return None;
        }
        self.edges.pop();

        while let Some(next) = self.edges.peek().copied() {
            if next.y != target.y || next.x != target.end() {
                break;
            }
            self.edges.pop();
            target.length += next.length;
        }

        if piece.w > target.length {
            self.edges.push(target);
            return None;
        }

        self.edges.push(Edge::new(target.x, target.y + piece.h, piece.w));
        if piece.w < target.length {
            self.edges.push(Edge::new(
                target.x + piece.w,
                target.y,
                target.length - piece.w,
            ));
        }

        Some(Placement {
            x: target.x,
            y: target.y,
            rect: piece,
            rotated: false,
        })
    }

    /// Every column of the board is claimed by exactly one edge.
    pub fn covers_board(&self) -> bool {
        let mut edges: Vec<Edge> = self.edges.iter().copied().collect();
        edges.sort_by_key(|e| e.x);
        let mut cursor = 0;
        for e in &edges {
            if e.x != cursor || e.length == 0 || e.y > self.board.h {
                return false;
            }
            cursor = e.end();
        }
        cursor == self.board.w
    }

    /// True once every edge sits at the board's top.
    pub fn is_full(&self) -> bool {
        self.edges.iter().all(|e| e.y == self.board.h)
    }
}
