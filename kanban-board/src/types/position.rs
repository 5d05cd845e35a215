//! Dense position bookkeeping shared by the client store and the server commands.
//!
//! Tasks within a column and columns within a board carry a zero-based `position`.
//! After every completed mutation the positions of one list are exactly `0..n`.
//! Moves are described as a [`MovePlan`]: the sibling [`Shift`]s plus the moved
//! item's own destination. The SQL layer executes a plan as range updates and the
//! in-memory store applies the same plan to its map, so both sides agree.

use super::ids::ColumnId;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Anything that occupies a slot in a dense, zero-based list
pub trait Positioned {
    fn position(&self) -> usize;
    fn set_position(&mut self, position: usize);
}

/// True iff `positions` is exactly `{0, 1, ..., n-1}` (in any order)
pub fn is_dense<I>(positions: I) -> bool
where
    I: IntoIterator<Item = usize>,
{
    let mut positions: Vec<usize> = positions.into_iter().collect();
    positions.sort_unstable();
    positions.iter().enumerate().all(|(i, &p)| i == p)
}

/// Largest valid destination index.
///
/// `destination_count` is the number of items currently in the destination list.
/// Within the same list the moved item is already counted, so the last slot is `n - 1`.
/// Across lists the item may also be appended, so the last slot is `n`.
pub fn max_destination(same_list: bool, destination_count: usize) -> usize {
    if same_list {
        destination_count.saturating_sub(1)
    } else {
        destination_count
    }
}

/// The inclusive range of valid destination indexes
pub fn valid_destination(same_list: bool, destination_count: usize) -> RangeInclusive<usize> {
    0..=max_destination(same_list, destination_count)
}

/// Clamp `requested` into [`valid_destination`]
pub fn clamp_destination(same_list: bool, destination_count: usize, requested: usize) -> usize {
    requested.min(max_destination(same_list, destination_count))
}

/// Reject `requested` when it falls outside [`valid_destination`]
pub fn check_destination(
    entity: &str,
    same_list: bool,
    destination_count: usize,
    requested: usize,
) -> Result<usize> {
    let max = max_destination(same_list, destination_count);
    if requested > max {
        return Err(KanbanError::PositionOutOfRange {
            entity: entity.to_string(),
            position: requested,
            max,
        });
    }
    Ok(requested)
}

/// Direction of a sibling shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    /// position + 1, opens a slot
    Up,
    /// position - 1, closes a gap
    Down,
}

/// Every sibling in `column` whose position lies in `from..=through` moves one slot.
///
/// `through == None` means "to the end of the column".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub column: ColumnId,
    pub from: usize,
    pub through: Option<usize>,
    pub direction: ShiftDirection,
}

impl Shift {
    /// Whether a sibling at `position` falls in this shift's range
    pub fn contains(&self, position: usize) -> bool {
        position >= self.from && self.through.is_none_or(|end| position <= end)
    }

    /// Signed offset applied to each sibling in range
    pub fn delta(&self) -> i64 {
        match self.direction {
            ShiftDirection::Up => 1,
            ShiftDirection::Down => -1,
        }
    }

    /// The new position of a sibling currently at `position` in `column`
    pub fn apply(&self, column: &ColumnId, position: usize) -> usize {
        if &self.column != column || !self.contains(position) {
            return position;
        }
        match self.direction {
            ShiftDirection::Up => position + 1,
            ShiftDirection::Down => position.saturating_sub(1),
        }
    }
}

/// The full set of position changes for moving one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlan {
    pub source: ColumnId,
    pub source_position: usize,
    pub destination: ColumnId,
    pub destination_position: usize,
    /// Sibling updates, applied before the moved task is written
    pub shifts: Vec<Shift>,
}

impl MovePlan {
    /// Whether the move leaves every position untouched
    pub fn is_noop(&self) -> bool {
        self.source == self.destination && self.source_position == self.destination_position
    }

    /// Whether the task changes column
    pub fn is_cross_column(&self) -> bool {
        self.source != self.destination
    }

    /// Where a sibling (not the moved task) at `(column, position)` ends up
    pub fn sibling_position(&self, column: &ColumnId, position: usize) -> usize {
        self.shifts
            .iter()
            .fold(position, |pos, shift| shift.apply(column, pos))
    }
}

/// Siblings displaced when an item moves from `from` to `to` within one list.
///
/// Returns the inclusive range `(first, last)` and which way those siblings move,
/// or `None` when the item stays put.
pub fn displaced_range(from: usize, to: usize) -> Option<(usize, usize, ShiftDirection)> {
    match from.cmp(&to) {
        Ordering::Less => Some((from + 1, to, ShiftDirection::Down)),
        Ordering::Greater => Some((to, from - 1, ShiftDirection::Up)),
        Ordering::Equal => None,
    }
}

/// Plan the sibling shifts for moving a task from `(source, source_position)` to
/// `(destination, destination_position)`.
///
/// The caller validates `destination_position` first (see [`check_destination`]).
pub fn plan_move(
    source: &ColumnId,
    source_position: usize,
    destination: &ColumnId,
    destination_position: usize,
) -> MovePlan {
    let mut shifts = Vec::new();

    if source == destination {
        if let Some((from, through, direction)) = displaced_range(source_position, destination_position) {
            shifts.push(Shift {
                column: source.clone(),
                from,
                through: Some(through),
                direction,
            });
        }
    } else {
        shifts.push(Shift {
            column: source.clone(),
            from: source_position + 1,
            through: None,
            direction: ShiftDirection::Down,
        });
        shifts.push(Shift {
            column: destination.clone(),
            from: destination_position,
            through: None,
            direction: ShiftDirection::Up,
        });
    }

    MovePlan {
        source: source.clone(),
        source_position,
        destination: destination.clone(),
        destination_position,
        shifts,
    }
}

/// Move the element at `from` so it ends up at index `to` (clamped to the end)
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

/// Assign each item its index as position
pub fn renumber<T: Positioned>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index);
    }
}

/// Sort by position, then renumber densely
pub fn compact<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
    renumber(items);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Slot(usize);

    impl Positioned for Slot {
        fn position(&self) -> usize {
            self.0
        }

        fn set_position(&mut self, position: usize) {
            self.0 = position;
        }
    }

    fn col(id: &str) -> ColumnId {
        ColumnId::from_string(id)
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense(Vec::<usize>::new()));
        assert!(is_dense([2, 0, 1]));
        assert!(!is_dense([0, 2]));
        assert!(!is_dense([0, 0, 1]));
        assert!(!is_dense([1]));
    }

    #[test]
    fn test_valid_destination_bounds() {
        assert_eq!(valid_destination(true, 3), 0..=2);
        assert_eq!(valid_destination(false, 3), 0..=3);
        assert_eq!(valid_destination(false, 0), 0..=0);
        assert_eq!(clamp_destination(true, 3, 10), 2);
        assert_eq!(clamp_destination(false, 3, 10), 3);
    }

    #[test]
    fn test_check_destination_rejects_out_of_range() {
        let err = check_destination("task", true, 3, 3).unwrap_err();
        assert!(matches!(
            err,
            KanbanError::PositionOutOfRange { position: 3, max: 2, .. }
        ));
        assert_eq!(check_destination("task", false, 3, 3).unwrap(), 3);
    }

    #[test]
    fn test_plan_same_column_move_earlier() {
        // T1:0 T2:1 T3:2, move T3 to 0
        let plan = plan_move(&col("todo"), 2, &col("todo"), 0);
        assert_eq!(plan.shifts.len(), 1);
        assert_eq!(plan.sibling_position(&col("todo"), 0), 1);
        assert_eq!(plan.sibling_position(&col("todo"), 1), 2);
    }

    #[test]
    fn test_plan_same_column_move_later() {
        let plan = plan_move(&col("todo"), 0, &col("todo"), 2);
        assert_eq!(plan.sibling_position(&col("todo"), 1), 0);
        assert_eq!(plan.sibling_position(&col("todo"), 2), 1);
        assert_eq!(plan.sibling_position(&col("todo"), 3), 3);
    }

    #[test]
    fn test_displaced_range() {
        assert_eq!(displaced_range(0, 2), Some((1, 2, ShiftDirection::Down)));
        assert_eq!(displaced_range(3, 1), Some((1, 2, ShiftDirection::Up)));
        assert_eq!(displaced_range(1, 1), None);
    }

    #[test]
    fn test_plan_noop() {
        let plan = plan_move(&col("todo"), 1, &col("todo"), 1);
        assert!(plan.is_noop());
        assert!(plan.shifts.is_empty());
    }

    #[test]
    fn test_plan_cross_column() {
        let plan = plan_move(&col("a"), 1, &col("b"), 1);
        assert!(plan.is_cross_column());
        // source closes the gap
        assert_eq!(plan.sibling_position(&col("a"), 0), 0);
        assert_eq!(plan.sibling_position(&col("a"), 2), 1);
        // destination opens a slot
        assert_eq!(plan.sibling_position(&col("b"), 0), 0);
        assert_eq!(plan.sibling_position(&col("b"), 1), 2);
        // unrelated columns untouched
        assert_eq!(plan.sibling_position(&col("c"), 5), 5);
    }

    #[test]
    fn test_reorder_and_renumber() {
        let mut items = vec![Slot(0), Slot(1), Slot(2)];
        items[2].0 = 99;
        reorder(&mut items, 2, 0);
        renumber(&mut items);
        assert_eq!(items.iter().map(|s| s.0).collect::<Vec<_>>(), vec![0, 1, 2]);

        let mut names = vec!["a", "b", "c"];
        reorder(&mut names, 0, 10);
        assert_eq!(names, vec!["b", "c", "a"]);
        reorder(&mut names, 7, 0);
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_compact_closes_gaps() {
        let mut items = vec![Slot(5), Slot(0), Slot(2)];
        compact(&mut items);
        assert!(is_dense(items.iter().map(|s| s.0)));
    }
}
