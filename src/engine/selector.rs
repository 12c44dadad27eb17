//! Weighted random selection.

use crate::error::{DropError, Result};
use rand::Rng;

/// Picks one option with probability proportional to its weight.
///
/// Draws a single `r` in `[0, total)` and walks the options in order,
/// subtracting each weight; the option that takes `r` below zero wins.
/// Zero-weight options can never win. Fails when the total weight is not
/// positive or any weight is negative.
pub fn choose_weighted<'a, T, R>(
    options: &'a [T],
    weight: impl Fn(&T) -> i64,
    rng: &mut R,
) -> Result<&'a T>
where
    R: Rng + ?Sized,
{
    let mut total: i64 = 0;
    for option in options {
        let w = weight(option);
        if w < 0 {
            return Err(DropError::NegativeWeight(w));
        }
        total = total.checked_add(w).ok_or(DropError::EmptySelection)?;
    }
    if total <= 0 {
        return Err(DropError::EmptySelection);
    }

    let roll = rng.gen_range(0..total);
    pick_by_roll(options, weight, roll)
}

/// Walks `options` in order, subtracting each weight from `roll`, and returns
/// the first option that takes it below zero.
fn pick_by_roll<'a, T>(
    options: &'a [T],
    weight: impl Fn(&T) -> i64,
    mut roll: i64,
) -> Result<&'a T> {
    options
        .iter()
        .find(|option| {
            roll -= weight(option);
            roll < 0
        })
        .ok_or(DropError::EmptySelection)
}
