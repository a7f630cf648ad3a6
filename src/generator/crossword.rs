/*
crossword.rs

Copyright 2026 Wordwheel contributors

This file is part of Wordwheel.

Wordwheel is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Wordwheel is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Wordwheel. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Lay out the selected words on a crossword grid.
//!
//! The longest word is placed horizontally first.
//! Every other word must cross at least one letter already on the grid, and must not touch the
//! other words anywhere else.
//! Among the valid positions, the positions with the most crossings and the smallest bounding box
//! are preferred, and one of the best [`TOP_PLACEMENTS`] is selected randomly.
//! Words that cannot be placed are dropped.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::rng::Mulberry32;

/// Number of best positions among which the position of a word is randomly selected.
pub const TOP_PLACEMENTS: usize = 3;

/// Points per crossing.
const CROSS_WEIGHT: f64 = 7.0;

/// Penalty per cell of the bounding box.
const AREA_PENALTY: f64 = 0.06;

/// Type of errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LayoutError {
    /// No words to place.
    #[error("no words to lay out")]
    NoWords,

    /// Not enough words could be placed.
    #[error("only {placed} words placed, {required} required")]
    TooFewWords { placed: usize, required: usize },
}

/// Word direction.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl Direction {
    /// Directions in the order they are tried.
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// Coordinate offset between two consecutive letters.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }
}

/// A word on the grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Identifier, in placement order.
    pub id: usize,

    pub text: String,

    /// Coordinates of the first letter.
    pub x: i32,
    pub y: i32,

    pub dir: Direction,
}

impl Placement {
    /// Coordinates and letters of the word cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, char)> + '_ {
        let (dx, dy) = self.dir.step();
        self.text
            .chars()
            .enumerate()
            .map(move |(i, c)| {
                (self.x + dx * i as i32, self.y + dy * i as i32, c)
            })
    }
}

/// A grid cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,

    #[serde(rename = "char")]
    pub letter: char,

    /// Identifiers of the words that use the cell. Crossings have several owners.
    pub owners: Vec<usize>,
}

/// Crossword board.
///
/// The coordinates are normalized: the top-left corner of the bounding box is at `(0, 0)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub words: Vec<Placement>,
    pub cells: Vec<Cell>,
}

impl Board {
    /// Cell at the given coordinates.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.x == x && c.y == y)
    }

    /// Whether every word can be reached from every other word through crossings.
    pub fn is_connected(&self) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.words.len()];
        for cell in &self.cells {
            for &a in &cell.owners {
                for &b in &cell.owners {
                    if a != b && a < adjacency.len() {
                        adjacency[a].push(b);
                    }
                }
            }
        }

        let mut visited: Vec<bool> = vec![false; self.words.len()];
        let mut stack: Vec<usize> = vec![0];
        visited[0] = true;
        while let Some(current) = stack.pop() {
            for &next in &adjacency[current] {
                if next < visited.len() && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        visited.iter().all(|v| *v)
    }
}

impl fmt::Display for Board {
    /// Draw the grid, one row per line, with `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut rows: Vec<Vec<char>> = vec![vec!['.'; self.width]; self.height];
        for cell in &self.cells {
            if let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y))
                && y < self.height
                && x < self.width
            {
                rows[y][x] = cell.letter.to_ascii_uppercase();
            }
        }
        for row in rows {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}

/// Bounding box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Bounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    /// Bounding box of a word.
    fn of_word(len: usize, x: i32, y: i32, dir: Direction) -> Self {
        let (dx, dy) = dir.step();
        let last: i32 = len.saturating_sub(1) as i32;
        Self {
            min_x: x,
            min_y: y,
            max_x: x + dx * last,
            max_y: y + dy * last,
        }
    }

    fn union(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Possible position for a word.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: i32,
    y: i32,
    dir: Direction,
    score: f64,
}

/// Grid under construction.
struct Grid {
    /// Cells in creation order.
    cells: Vec<Cell>,

    /// Index of the cells in [`Grid::cells`] by coordinates.
    index: HashMap<(i32, i32), usize>,

    placements: Vec<Placement>,

    bounds: Option<Bounds>,
}

impl Grid {
    fn new() -> Self {
        Self {
            cells: Vec::new(),
            index: HashMap::new(),
            placements: Vec::new(),
            bounds: None,
        }
    }

    fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index.get(&(x, y)).map(|&i| &self.cells[i])
    }

    fn occupied(&self, x: i32, y: i32) -> bool {
        self.index.contains_key(&(x, y))
    }

    /// Whether the cells on both sides of `(x, y)`, perpendicularly to the direction, are used.
    fn side_neighbors_occupied(&self, x: i32, y: i32, dir: Direction) -> bool {
        match dir {
            Direction::Horizontal => self.occupied(x, y - 1) || self.occupied(x, y + 1),
            Direction::Vertical => self.occupied(x - 1, y) || self.occupied(x + 1, y),
        }
    }

    /// Verify that the word can be placed, and return the number of crossings.
    ///
    /// The word cannot extend another word, cannot overwrite a different letter, and its new
    /// letters cannot touch other words side by side.
    fn check_placement(&self, word: &[char], x: i32, y: i32, dir: Direction) -> Option<usize> {
        let (dx, dy) = dir.step();
        let len: i32 = word.len() as i32;
        if self.occupied(x - dx, y - dy) || self.occupied(x + dx * len, y + dy * len) {
            return None;
        }

        let mut crosses: usize = 0;
        for (i, &c) in word.iter().enumerate() {
            let cx: i32 = x + dx * i as i32;
            let cy: i32 = y + dy * i as i32;
            match self.get(cx, cy) {
                Some(existing) => {
                    if existing.letter != c {
                        return None;
                    }
                    crosses += 1;
                }
                None => {
                    if self.side_neighbors_occupied(cx, cy, dir) {
                        return None;
                    }
                }
            }
        }
        Some(crosses)
    }

    fn place(&mut self, word: &str, x: i32, y: i32, dir: Direction) {
        let placement: Placement = Placement {
            id: self.placements.len(),
            text: word.to_string(),
            x,
            y,
            dir,
        };
        for (cx, cy, letter) in placement.cells() {
            match self.index.get(&(cx, cy)) {
                Some(&i) => self.cells[i].owners.push(placement.id),
                None => {
                    self.index.insert((cx, cy), self.cells.len());
                    self.cells.push(Cell {
                        x: cx,
                        y: cy,
                        letter,
                        owners: vec![placement.id],
                    });
                }
            }
        }

        let word_bounds: Bounds = Bounds::of_word(word.len(), x, y, dir);
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(&word_bounds),
            None => word_bounds,
        });
        self.placements.push(placement);
    }

    /// List the valid positions for the word, best first.
    fn collect_candidates(&self, word: &str, rng: &mut Mulberry32) -> Vec<Candidate> {
        let letters: Vec<char> = word.chars().collect();
        let mut candidates: Vec<Candidate> = Vec::new();

        for cell in &self.cells {
            for (i, &c) in letters.iter().enumerate() {
                if c != cell.letter {
                    continue;
                }
                for dir in Direction::ALL {
                    let (dx, dy) = dir.step();
                    let x: i32 = cell.x - dx * i as i32;
                    let y: i32 = cell.y - dy * i as i32;
                    let crosses: usize = match self.check_placement(&letters, x, y, dir) {
                        Some(n) if n > 0 => n,
                        _ => continue,
                    };

                    let word_bounds: Bounds = Bounds::of_word(letters.len(), x, y, dir);
                    let area: usize = self
                        .bounds
                        .map_or(word_bounds, |b| b.union(&word_bounds))
                        .area();
                    let score: f64 = crosses as f64 * CROSS_WEIGHT
                        - area as f64 * AREA_PENALTY
                        + rng.next_f64();
                    candidates.push(Candidate { x, y, dir, score });
                }
            }
        }

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Shift the coordinates so that the bounding box starts at `(0, 0)`.
    fn normalize(self) -> Board {
        let bounds: Bounds = self.bounds.unwrap_or(Bounds {
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
        });
        let (sx, sy) = (-bounds.min_x, -bounds.min_y);

        Board {
            width: bounds.width(),
            height: bounds.height(),
            words: self
                .placements
                .into_iter()
                .enumerate()
                .map(|(id, p)| Placement {
                    id,
                    x: p.x + sx,
                    y: p.y + sy,
                    ..p
                })
                .collect(),
            cells: self
                .cells
                .into_iter()
                .map(|c| Cell {
                    x: c.x + sx,
                    y: c.y + sy,
                    ..c
                })
                .collect(),
        }
    }
}

/// Lay out the words on a grid.
///
/// # Errors
///
/// The function returns an error if the list is empty, or if less than `min_words` words could be
/// placed.
pub fn build_crossword<S: AsRef<str>>(
    words: &[S],
    min_words: usize,
    rng: &mut Mulberry32,
) -> Result<Board, LayoutError> {
    let mut ordered: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    ordered.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let Some((first, others)) = ordered.split_first() else {
        return Err(LayoutError::NoWords);
    };

    let mut grid: Grid = Grid::new();
    grid.place(first, 0, 0, Direction::Horizontal);

    for word in others {
        let candidates: Vec<Candidate> = grid.collect_candidates(word, rng);
        if candidates.is_empty() {
            debug!("No position for '{word}'");
            continue;
        }
        let top: usize = TOP_PLACEMENTS.min(candidates.len());
        let pick: Candidate = candidates[rng.random_int(0, top - 1)];
        grid.place(word, pick.x, pick.y, pick.dir);
    }

    if grid.placements.len() < min_words {
        return Err(LayoutError::TooFewWords {
            placed: grid.placements.len(),
            required: min_words,
        });
    }

    let board: Board = grid.normalize();
    if log_enabled!(Level::Debug) {
        debug!("Board {}x{}:", board.width, board.height);
        for line in board.to_string().lines() {
            debug!("    {line}");
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_consistent(board: &Board) {
        // Every word letter matches its cell, and every cell has an owner
        for word in &board.words {
            for (x, y, c) in word.cells() {
                let cell: &Cell = board.cell_at(x, y).expect("cell exists");
                assert_eq!(cell.letter, c);
                assert!(cell.owners.contains(&word.id));
            }
        }
        for cell in &board.cells {
            assert!(!cell.owners.is_empty());
            for &owner in &cell.owners {
                let word: &Placement = &board.words[owner];
                assert!(word.cells().any(|(x, y, c)| x == cell.x
                    && y == cell.y
                    && c == cell.letter));
            }
        }
        let coordinates: HashSet<(i32, i32)> = board.cells.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(coordinates.len(), board.cells.len());
        assert_eq!(board.cells.iter().map(|c| c.x).min(), Some(0));
        assert_eq!(board.cells.iter().map(|c| c.y).min(), Some(0));
        assert!(board.cells.iter().all(|c| (c.x as usize) < board.width));
        assert!(board.cells.iter().all(|c| (c.y as usize) < board.height));
        assert!(board.is_connected());
    }

    #[test]
    fn single_word() {
        let mut rng: Mulberry32 = Mulberry32::new(1);
        let board: Board = build_crossword(&["cat"], 1, &mut rng).unwrap();
        assert_eq!(board.width, 3);
        assert_eq!(board.height, 1);
        assert_eq!(board.words[0].dir, Direction::Horizontal);
        assert_eq!(board.to_string(), "CAT\n");
    }

    #[test]
    fn two_words_cross() {
        let mut rng: Mulberry32 = Mulberry32::new(2);
        let board: Board = build_crossword(&["tar", "cats"], 2, &mut rng).unwrap();
        assert_eq!(board.words.len(), 2);
        // Longest word first, horizontally
        assert_eq!(board.words[0].text, "cats");
        assert_eq!(board.words[0].dir, Direction::Horizontal);
        assert_eq!(board.words[1].dir, Direction::Vertical);
        let crossings: usize = board.cells.iter().filter(|c| c.owners.len() > 1).count();
        assert_eq!(crossings, 1);
        assert_consistent(&board);
    }

    #[test]
    fn many_words_stay_consistent() {
        let words: [&str; 8] = ["stone", "notes", "tones", "one", "ten", "net", "sent", "nest"];
        for seed in 0..50u32 {
            let mut rng: Mulberry32 = Mulberry32::new(seed);
            if let Ok(board) = build_crossword(&words, 2, &mut rng) {
                assert_consistent(&board);
            }
        }
    }

    #[test]
    fn words_without_common_letters_cannot_be_placed() {
        let mut rng: Mulberry32 = Mulberry32::new(3);
        assert_eq!(
            build_crossword(&["cat", "dog"], 2, &mut rng),
            Err(LayoutError::TooFewWords {
                placed: 1,
                required: 2
            })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            build_crossword(&empty, 1, &mut rng),
            Err(LayoutError::NoWords)
        );
    }

    #[test]
    fn placement_rejects_touching_words() {
        let mut grid: Grid = Grid::new();
        grid.place("cat", 0, 0, Direction::Horizontal);
        let tar: Vec<char> = "tar".chars().collect();
        // Extends "cat" to the right
        assert_eq!(
            grid.check_placement(&tar, 3, 0, Direction::Horizontal),
            None
        );
        // Crosses the "t"
        assert_eq!(
            grid.check_placement(&tar, 2, 0, Direction::Vertical),
            Some(1)
        );
        // Runs along "cat" one row below
        assert_eq!(
            grid.check_placement(&tar, 0, 1, Direction::Horizontal),
            None
        );
        // Wrong letter on a crossing
        assert_eq!(grid.check_placement(&tar, 0, 0, Direction::Vertical), None);
    }
}
