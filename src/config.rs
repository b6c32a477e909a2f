use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Rect;

/// Board size plus the multiset of pieces that must tile it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleConfig {
    pub board_width: u32,
    pub board_height: u32,
    pub pieces: Vec<Rect>,
}

impl PuzzleConfig {
    pub fn new(board_width: u32, board_height: u32, pieces: Vec<Rect>) -> Self {
        Self {
            board_width,
            board_height,
            pieces,
        }
    }

    /// The Calibron 12 puzzle: twelve pieces filling a 56x56 square.
    pub fn calibron12() -> Self {
        Self::new(
            56,
            56,
            vec![
                Rect::new(28, 14),
                Rect::new(28, 6),
                Rect::new(21, 18),
                Rect::new(21, 18),
                Rect::new(10, 7),
                Rect::new(14, 4),
                Rect::new(17, 14),
                Rect::new(32, 11),
                Rect::new(32, 10),
                Rect::new(28, 7),
                Rect::new(21, 14),
                Rect::new(21, 14),
            ],
        )
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn board(&self) -> Rect {
        Rect::new(self.board_width, self.board_height)
    }

    pub fn total_piece_area(&self) -> u64 {
        self.pieces.iter().map(Rect::area).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.pieces.is_empty() {
            return Err(ConfigError::NoPieces);
        }
        if let Some(index) = self.pieces.iter().position(|p| p.w == 0 || p.h == 0) {
            return Err(ConfigError::ZeroPiece { index });
        }
        Ok(())
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::calibron12()
    }
}

/// Parses `WxH`, e.g. `56x56`.
pub fn parse_dimensions(s: &str) -> Result<Rect, ConfigError> {
    let invalid = |what: &str| ConfigError::InvalidDimensions(format!("invalid {what} in '{s}'"));

    let (w, h) = s.split_once('x').ok_or_else(|| {
        ConfigError::InvalidDimensions(format!("invalid dimensions '{s}', expected WxH"))
    })?;
    let w = w.parse::<u32>().map_err(|_| invalid("width"))?;
    let h = h.parse::<u32>().map_err(|_| invalid("height"))?;
    if w == 0 || h == 0 {
        return Err(ConfigError::InvalidDimensions(format!(
            "dimensions must be non-zero in '{s}'"
        )));
    }
    Ok(Rect::new(w, h))
}

/// Parses `WxH` or `WxH:qty`, expanding duplicates into separate pieces.
pub fn parse_pieces(s: &str) -> Result<Vec<Rect>, ConfigError> {
    let (dims, qty) = match s.split_once(':') {
        Some((dims, qty)) => {
            let qty = qty.parse::<usize>().map_err(|_| {
                ConfigError::InvalidDimensions(format!("invalid quantity in '{s}'"))
            })?;
            if qty == 0 {
                return Err(ConfigError::InvalidDimensions(format!(
                    "quantity must be non-zero in '{s}'"
                )));
            }
            (dims, qty)
        }
        None => (s, 1),
    };
    let rect = parse_dimensions(dims)?;
    Ok(vec![rect; qty])
}
