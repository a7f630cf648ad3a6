/*
rng.rs

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

//! Deterministic random number generator.
//!
//! All the random decisions taken while building a round come from a [`Mulberry32`] object.
//! The same seed always produces the same sequence, so a given
//! `(grade, round index, session salt, attempt)` tuple always produces the same candidate round.
//!
//! [`Mulberry32`] implements [`rand::RngCore`] and [`rand::SeedableRng`], so it can also be used
//! with the helpers from the [`rand`] crate.

use rand::{RngCore, SeedableRng};

/// Offset basis for the FNV-1a string hash.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// Prime for the FNV-1a string hash.
const FNV_PRIME: u32 = 16_777_619;

/// Fixed increment added to the state at each step.
const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;

/// Hash a string seed into a 32-bit unsigned integer (FNV-1a).
///
/// The string is processed as UTF-16 code units.
pub fn hash_string(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Mulberry32 generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    /// Internal 32-bit state.
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a numeric seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a generator from a string seed.
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash_string(seed))
    }

    /// Advance the state and return the next mixed 32-bit value.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let t: u32 = self.state;
        let mut value: u32 = (t ^ (t >> 15)).wrapping_mul(t | 1);
        value ^= value.wrapping_add((value ^ (value >> 7)).wrapping_mul(value | 61));
        value ^ (value >> 14)
    }

    /// Return a float in the `[0, 1)` range.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// Return a uniform integer between `min` and `max_inclusive`.
    pub fn random_int(&mut self, min: usize, max_inclusive: usize) -> usize {
        let span: usize = max_inclusive.saturating_sub(min) + 1;
        min + (self.next_f64() * span as f64).floor() as usize
    }

    /// Return a random element of the list, or `None` if the list is empty.
    pub fn pick_one<'a, T>(&mut self, list: &'a [T]) -> Option<&'a T> {
        if list.is_empty() {
            return None;
        }
        let i: usize = (self.next_f64() * list.len() as f64).floor() as usize;
        list.get(i)
    }

    /// Shuffle the list in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, list: &mut [T]) {
        for i in (1..list.len()).rev() {
            let j: usize = (self.next_f64() * (i + 1) as f64).floor() as usize;
            list.swap(i, j);
        }
    }

    /// Weighted coin: return `true` with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

impl From<&str> for Mulberry32 {
    fn from(seed: &str) -> Self {
        Self::from_seed_str(seed)
    }
}

impl From<u32> for Mulberry32 {
    fn from(seed: u32) -> Self {
        Self::new(seed)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let high: u64 = u64::from(self.step());
        let low: u64 = u64::from(self.step());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes: [u8; 4] = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Create a generator from a string or a numeric seed.
pub fn create_rng<S: Into<Mulberry32>>(seed: S) -> Mulberry32 {
    seed.into()
}

/// Return a uniform integer between `min` and `max_inclusive`.
pub fn random_int(rng: &mut Mulberry32, min: usize, max_inclusive: usize) -> usize {
    rng.random_int(min, max_inclusive)
}

/// Return a random element of the list, or `None` if the list is empty.
pub fn pick_one<'a, T>(rng: &mut Mulberry32, list: &'a [T]) -> Option<&'a T> {
    rng.pick_one(list)
}

/// Shuffle the list in place with the given generator.
pub fn shuffle_in_place<T>(list: &mut [T], rng: &mut Mulberry32) {
    rng.shuffle(list);
}
