//! Randomized selection: a uniformly drawn subset of each over-full bucket wins.
//!
//! The random source is passed in by the caller and advanced by every draw;
//! results are reproducible only for an identical seed and call history.
use rand::Rng;
use tracing::trace;

use crate::assign::BucketAssignment;
use crate::grid::CapacityMask;
use crate::selection::{uniform_below, ChanceDraw, Selection};

/// Keeps `capacity` randomly drawn indices of every over-full bucket.
///
/// Buckets within capacity are kept entirely and consume no random numbers.
pub fn select_by_chance<R: Rng>(
    assignment: &BucketAssignment,
    mask: &CapacityMask,
    draw: ChanceDraw,
    rng: &mut R,
    out: &mut Selection,
) {
    for (cell, indices) in assignment.cells().iter().enumerate() {
        let capacity = mask.capacity(cell) as usize;
        if indices.len() > capacity {
            trace!(
                "Bucket {} holds {} features, drawing {}.",
                cell,
                indices.len(),
                capacity
            );
        }
        select_cell_by_chance(indices, capacity, draw, rng, out);
    }
}

pub fn select_cell_by_chance<R: Rng>(
    indices: &[usize],
    capacity: usize,
    draw: ChanceDraw,
    rng: &mut R,
    out: &mut Selection,
) {
    if indices.len() <= capacity {
        out.selected.extend_from_slice(indices);
        return;
    }

    let chosen = match draw {
        ChanceDraw::Rejection => draw_by_rejection(indices.len(), capacity, rng),
        ChanceDraw::PartialShuffle => draw_by_partial_shuffle(indices.len(), capacity, rng),
    };

    // Output follows encounter order, not draw order.
    for (&index, &keep) in indices.iter().zip(&chosen) {
        if keep {
            out.selected.push(index);
        } else {
            out.rejected.push(index);
        }
    }
}

/// Marks `count` distinct positions out of `n`, redrawing positions already taken.
fn draw_by_rejection(n: usize, count: usize, rng: &mut dyn Rng) -> Vec<bool> {
    let mut chosen = vec![false; n];
    let mut taken = 0;
    while taken < count {
        let pos = uniform_below(rng, n);
        if !chosen[pos] {
            chosen[pos] = true;
            taken += 1;
        }
    }
    chosen
}

fn draw_by_partial_shuffle(n: usize, count: usize, rng: &mut dyn Rng) -> Vec<bool> {
    let mut order: Vec<usize> = (0..n).collect();
    let mut chosen = vec![false; n];
    for i in 0..count {
        let j = i + uniform_below(rng, n - i);
        order.swap(i, j);
        chosen[order[i]] = true;
    }
    chosen
}
