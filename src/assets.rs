//! Optional character-art sprites.
//!
//! Each sprite is a plain text file. A missing or unreadable file leaves the
//! slot empty and the renderer draws a solid block of the same size instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PLAYER_FILE: &str = "player.txt";
pub const ENEMY_FILE: &str = "enemy.txt";
pub const ROAD_FILE: &str = "road.txt";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} has no visible characters")]
    Empty { path: PathBuf },
}

/// A rectangular grid of characters. Spaces are transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    /// Build from text. Trailing blank lines are dropped and ragged rows are
    /// padded with spaces. Returns None if nothing visible remains.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|l| l.trim_end_matches('\r').chars().collect())
            .collect();
        while rows
            .last()
            .is_some_and(|r| r.iter().all(|c| c.is_whitespace()))
        {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 || rows.iter().flatten().all(|c| c.is_whitespace()) {
            return None;
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }
        Some(Self { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, col: usize, row: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(' ')
    }

    /// Nearest-neighbour sample at fractional coordinates in [0, 1).
    pub fn sample(&self, u: f64, v: f64) -> char {
        let col = (u.clamp(0.0, 0.999_999) * self.width as f64) as usize;
        let row = (v.clamp(0.0, 0.999_999) * self.height() as f64) as usize;
        self.get(col, row)
    }

    /// Sample with wrap-around, for tiled textures.
    pub fn tile(&self, col: i64, row: i64) -> char {
        let c = col.rem_euclid(self.width as i64) as usize;
        let r = row.rem_euclid(self.height() as i64) as usize;
        self.get(c, r)
    }
}

/// Load one sprite file.
pub fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Sprite::parse(&text).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}

/// Sprites for one run. `None` means draw the shape fallback.
#[derive(Debug, Clone, Default)]
pub struct Sprites {
    pub player: Option<Sprite>,
    pub enemy: Option<Sprite>,
    pub road: Option<Sprite>,
}

impl Sprites {
    /// Load every sprite from `dir`, tolerating any that fail.
    pub fn load(dir: &Path) -> Self {
        Self {
            player: load_or_fallback(&dir.join(PLAYER_FILE)),
            enemy: load_or_fallback(&dir.join(ENEMY_FILE)),
            road: load_or_fallback(&dir.join(ROAD_FILE)),
        }
    }

    pub fn loaded_count(&self) -> usize {
        [&self.player, &self.enemy, &self.road]
            .iter()
            .filter(|s| s.is_some())
            .count()
    }
}

fn load_or_fallback(path: &Path) -> Option<Sprite> {
    match load_sprite(path) {
        Ok(sprite) => {
            log::debug!(
                "loaded {} ({}x{})",
                path.display(),
                sprite.width(),
                sprite.height()
            );
            Some(sprite)
        }
        Err(e) => {
            log::warn!("{}; using shape fallback", e);
            None
        }
    }
}
