//! Slot-range parsing and content-slot derivation.
//!
//! Slot numbering is 0-based everywhere inside the toolkit; the strings
//! humans write in configs are 1-based. The conversion happens here and
//! nowhere else.

use std::collections::BTreeSet;

use crate::error::SlotRangeError;
use crate::gui_creator::{ArrowBarMode, ArrowGap};

/// Upper bound every parsed index is clamped to. This is the historical
/// 9x9 grid limit of the slot grammar, independent of the grid a caller
/// actually renders into.
pub const MAX_LEGACY_SLOT: usize = 9 * 9 - 1;

/// Parse a slot-range string into a sorted set of 0-based indices.
///
/// The grammar is a comma-separated list of 1-based integers and
/// inclusive `start-end` ranges, e.g. `"1-10,12,15-18"`. Values outside
/// the legacy grid are clamped rather than rejected; empty tokens are
/// skipped.
pub fn parse_slots(slot_range: &str) -> Result<BTreeSet<usize>, SlotRangeError> {
    let mut slots = BTreeSet::new();
    for part in slot_range.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            let start = clamp_index(parse_token(start)?);
            let end = clamp_index(parse_token(end)?);
            for slot in start..=end {
                slots.insert(slot);
            }
        } else {
            slots.insert(clamp_index(parse_token(part)?));
        }
    }
    Ok(slots)
}

fn parse_token(token: &str) -> Result<i64, SlotRangeError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| SlotRangeError::BadNumber(token.trim().to_string()))
}

fn clamp_index(one_based: i64) -> usize {
    (one_based - 1).clamp(0, MAX_LEGACY_SLOT as i64) as usize
}

/// Derive the content slots of a scrollable window from grid height and
/// arrow layout: every grid slot except those reserved for the arrow
/// buttons, in row-major order.
#[must_use]
pub fn derive_content_slots(height: u8, _spacing: ArrowGap, arrow_mode: ArrowBarMode) -> Vec<usize> {
    let height = usize::from(height.max(1));
    let total = 9 * height;

    let min_row = 0usize;
    let max_row = height - 1;
    let center_col = 4usize;
    let middle_row = (min_row + max_row) / 2;

    let top_center = min_row * 9 + center_col;
    let bottom_center = max_row * 9 + center_col;
    let left_center = middle_row * 9;
    let right_center = middle_row * 9 + 8;

    let mut reserved = BTreeSet::new();
    match arrow_mode {
        ArrowBarMode::Up => {
            reserved.insert(top_center);
        }
        ArrowBarMode::Down => {
            reserved.insert(bottom_center);
        }
        ArrowBarMode::UpDown => {
            reserved.insert(top_center);
            reserved.insert(bottom_center);
        }
        ArrowBarMode::Left => {
            reserved.insert(left_center);
        }
        ArrowBarMode::Right => {
            reserved.insert(right_center);
        }
        ArrowBarMode::LeftRight => {
            reserved.insert(left_center);
            reserved.insert(right_center);
        }
    }

    (0..total).filter(|slot| !reserved.contains(slot)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_range_is_zero_based() {
        let slots = parse_slots("1-9").unwrap();
        assert_eq!(slots, (0..=8).collect());
    }

    #[test]
    fn mixed_ranges_and_singles() {
        let slots = parse_slots("10-12,19").unwrap();
        assert_eq!(slots, [9, 10, 11, 18].into_iter().collect());
    }

    #[test]
    fn out_of_grid_values_clamp() {
        let slots = parse_slots("0,200").unwrap();
        assert_eq!(slots, [0, MAX_LEGACY_SLOT].into_iter().collect());

        let slots = parse_slots("79-999").unwrap();
        assert!(slots.iter().all(|s| *s <= MAX_LEGACY_SLOT));
        assert!(slots.contains(&78));
        assert!(slots.contains(&MAX_LEGACY_SLOT));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_slots("1,two"),
            Err(SlotRangeError::BadNumber("two".to_string()))
        );
    }

    #[test]
    fn empty_tokens_are_skipped() {
        assert!(parse_slots("").unwrap().is_empty());
        assert_eq!(parse_slots("5,,6").unwrap(), [4, 5].into_iter().collect());
    }

    #[test]
    fn derived_slots_exclude_arrows() {
        let slots = derive_content_slots(3, ArrowGap::Small, ArrowBarMode::UpDown);
        assert_eq!(slots.len(), 27 - 2);
        assert!(!slots.contains(&4)); // top center
        assert!(!slots.contains(&22)); // bottom center
        // Row-major order.
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn derived_slots_left_right() {
        let slots = derive_content_slots(3, ArrowGap::Medium, ArrowBarMode::LeftRight);
        assert!(!slots.contains(&9)); // left center of middle row
        assert!(!slots.contains(&17)); // right center of middle row
        assert_eq!(slots.len(), 27 - 2);
    }
}
