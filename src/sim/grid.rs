//! Ground grid generation
//!
//! Blocks sit on a coarse column grid. Each random column goes into the
//! lowest row that doesn't already hold it, so rows never repeat a column and
//! the ground piles up where columns collide.

use glam::Vec2;

use super::rng::GameRng;
use super::state::{GroundBlock, Playfield};

/// Number of block columns across the playfield
pub fn column_count(play_width: f32, block_size: f32) -> u32 {
    if block_size <= 0.0 {
        return 0;
    }
    (play_width / block_size).floor().max(0.0) as u32
}

/// Assign `block_count` random columns to rows (row 0 first)
///
/// Every draw places exactly one block, opening a new row when all existing
/// rows already contain the column, so this always finishes in
/// `block_count` draws.
pub fn assign_rows(rng: &mut GameRng, block_count: usize, columns: u32) -> Vec<Vec<u32>> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    if columns == 0 {
        return rows;
    }

    for _ in 0..block_count {
        let column = rng.between(0, columns - 1);
        match rows.iter_mut().find(|row| !row.contains(&column)) {
            Some(row) => row.push(column),
            None => rows.push(vec![column]),
        }
    }
    rows
}

/// Build the starting ground for a playfield
///
/// `first_id` is the id given to the first block; ids increase from there.
pub fn generate(
    rng: &mut GameRng,
    block_count: usize,
    playfield: &Playfield,
    block_size: f32,
    first_id: u32,
) -> Vec<GroundBlock> {
    let columns = column_count(playfield.width(), block_size);
    let rows = assign_rows(rng, block_count, columns);

    let mut blocks = Vec::with_capacity(block_count);
    let mut id = first_id;
    for (row_index, row) in rows.iter().enumerate() {
        let y = playfield.bottom - block_size / 2.0 - row_index as f32 * (block_size + 1.0);
        for &column in row {
            let x = playfield.left + column as f32 * block_size + block_size / 2.0;
            blocks.push(GroundBlock {
                id,
                column,
                row: row_index as u32,
                pos: Vec2::new(x, y),
                alive: true,
            });
            id += 1;
        }
    }

    log::debug!(
        "Generated {} ground blocks in {} rows over {} columns",
        blocks.len(),
        rows.len(),
        columns
    );
    blocks
}
