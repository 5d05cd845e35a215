//! The pure transition function behind [`super::BoardStore`]
//!
//! Every action either applies completely or leaves the state untouched. Unknown ids
//! are reported through [`StoreOutcome`] rather than as errors, and every exposed
//! transition keeps positions dense as long as the input state was dense.

use super::action::BoardAction;
use super::state::BoardState;
use crate::notify::BoardEvent;
use crate::types::position::{clamp_destination, plan_move, renumber, reorder, Positioned};
use crate::types::{Column, ColumnId, Task, TaskId};
use serde::Serialize;

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StoreOutcome {
    Applied,
    /// Applied, but at `applied` instead of the out-of-range `requested` index
    Clamped { requested: usize, applied: usize },
    /// Nothing to do, the state is identical
    Unchanged,
    NotFound { entity: &'static str, id: String },
    /// Refused, the state is identical
    Rejected { reason: String },
}

impl StoreOutcome {
    /// Whether the state changed
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Applied | Self::Clamped { .. })
    }

    fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    fn placed(requested: usize, applied: usize) -> Self {
        if requested == applied {
            Self::Applied
        } else {
            Self::Clamped { requested, applied }
        }
    }
}

/// Compute the state after `action`
pub fn reduce(state: &BoardState, action: BoardAction) -> (BoardState, StoreOutcome) {
    let mut next = state.clone();
    let outcome = apply(&mut next, action);
    if outcome.is_change() {
        (next, outcome)
    } else {
        (state.clone(), outcome)
    }
}

fn apply(state: &mut BoardState, action: BoardAction) -> StoreOutcome {
    match action {
        BoardAction::SetBoards { boards } => {
            state.boards = boards;
            StoreOutcome::Applied
        }
        BoardAction::SetCurrentBoard { board } => {
            state.current_board = board;
            StoreOutcome::Applied
        }
        BoardAction::AddBoard { board } => {
            if state.boards.iter().any(|b| b.id == board.id) {
                return StoreOutcome::Rejected {
                    reason: format!("board {} already exists", board.id),
                };
            }
            state.boards.push(board);
            StoreOutcome::Applied
        }
        BoardAction::UpdateBoard { board_id, patch } => {
            let mut found = false;
            for board in state.boards.iter_mut().filter(|b| b.id == board_id) {
                patch.apply(board);
                found = true;
            }
            if let Some(current) = state.current_board.as_mut().filter(|b| b.id == board_id) {
                patch.apply(current);
                found = true;
            }
            match (found, patch.is_empty()) {
                (false, _) => StoreOutcome::not_found("board", board_id),
                (true, true) => StoreOutcome::Unchanged,
                (true, false) => StoreOutcome::Applied,
            }
        }
        BoardAction::DeleteBoard { board_id } => {
            let before = state.boards.len();
            state.boards.retain(|b| b.id != board_id);
            let was_current = state.current_board_id() == Some(&board_id);
            if was_current {
                state.current_board = None;
            }
            if before == state.boards.len() && !was_current {
                return StoreOutcome::not_found("board", board_id);
            }
            StoreOutcome::Applied
        }

        BoardAction::SetColumns { mut columns } => {
            columns.sort_by_key(|column| column.position);
            state.columns = columns;
            StoreOutcome::Applied
        }
        BoardAction::AddColumn { column } => add_column(state, column),
        BoardAction::UpdateColumn { column_id, patch } => {
            let Some(column) = state.columns.iter_mut().find(|c| c.id == column_id) else {
                return StoreOutcome::not_found("column", column_id);
            };
            if patch.is_empty() {
                return StoreOutcome::Unchanged;
            }
            patch.apply(column);
            StoreOutcome::Applied
        }
        BoardAction::DeleteColumn { column_id } => delete_column(state, &column_id),
        BoardAction::MoveColumn {
            column_id,
            position,
        } => move_column(state, &column_id, position),

        BoardAction::SetTasks { tasks } => {
            state.tasks = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
            StoreOutcome::Applied
        }
        BoardAction::AddTask { task } => add_task(state, task),
        BoardAction::UpdateTask { task_id, patch } => {
            let Some(task) = state.tasks.get_mut(&task_id) else {
                return StoreOutcome::not_found("task", task_id);
            };
            if patch.is_empty() {
                return StoreOutcome::Unchanged;
            }
            patch.apply(task);
            StoreOutcome::Applied
        }
        BoardAction::DeleteTask { task_id } => delete_task(state, &task_id),
        BoardAction::MoveTask {
            task_id,
            destination_column_id,
            destination_position,
        } => move_task(state, &task_id, &destination_column_id, destination_position),
        BoardAction::MoveMultipleTasks {
            task_ids,
            destination_column_id,
            start_position,
        } => move_multiple(state, &task_ids, &destination_column_id, start_position),

        BoardAction::SetLabels { labels } => {
            state.labels = labels;
            StoreOutcome::Applied
        }
        BoardAction::AddLabel { label } => {
            if state.labels.iter().any(|l| l.id == label.id) {
                return StoreOutcome::Rejected {
                    reason: format!("label {} already exists", label.id),
                };
            }
            state.labels.push(label);
            StoreOutcome::Applied
        }
        BoardAction::UpdateLabel { label_id, patch } => {
            let Some(label) = state.labels.iter_mut().find(|l| l.id == label_id) else {
                return StoreOutcome::not_found("label", label_id);
            };
            let before = label.clone();
            patch.apply(label);
            if *label == before {
                StoreOutcome::Unchanged
            } else {
                StoreOutcome::Applied
            }
        }
        BoardAction::DeleteLabel { label_id } => {
            let before = state.labels.len();
            state.labels.retain(|l| l.id != label_id);
            if state.labels.len() == before {
                return StoreOutcome::not_found("label", label_id);
            }
            StoreOutcome::Applied
        }

        BoardAction::ToggleTaskSelection { task_id } => {
            if !state.selected_tasks.remove(&task_id) {
                state.selected_tasks.insert(task_id);
            }
            StoreOutcome::Applied
        }
        BoardAction::SelectMultipleTasks { task_ids } => {
            state.selected_tasks = task_ids.into_iter().collect();
            StoreOutcome::Applied
        }
        BoardAction::ClearSelection => {
            if state.selected_tasks.is_empty() {
                return StoreOutcome::Unchanged;
            }
            state.selected_tasks.clear();
            StoreOutcome::Applied
        }

        BoardAction::SetLoading { loading } => {
            state.is_loading = loading;
            StoreOutcome::Applied
        }
        BoardAction::SetError { error } => {
            state.error = error;
            StoreOutcome::Applied
        }
        BoardAction::Reset => {
            *state = BoardState::default();
            StoreOutcome::Applied
        }

        BoardAction::ApplyEvent { event } => apply_event(state, event),
        BoardAction::ReconcileTask { task } => reconcile_task(state, task),
    }
}

/// Write `order` back as `column`'s dense positions
fn write_order(state: &mut BoardState, column: &ColumnId, order: &[TaskId]) {
    for (position, id) in order.iter().enumerate() {
        if let Some(task) = state.tasks.get_mut(id) {
            task.column_id = column.clone();
            task.position = position;
        }
    }
}

fn add_task(state: &mut BoardState, task: Task) -> StoreOutcome {
    if state.tasks.contains_key(&task.id) {
        return StoreOutcome::Rejected {
            reason: format!("task {} already exists", task.id),
        };
    }
    if state.column(&task.column_id).is_none() {
        return StoreOutcome::not_found("column", &task.column_id);
    }

    let mut order = state.task_order(&task.column_id);
    let requested = task.position;
    let applied = clamp_destination(false, order.len(), requested);
    order.insert(applied, task.id.clone());

    let column = task.column_id.clone();
    state.tasks.insert(task.id.clone(), task);
    write_order(state, &column, &order);
    StoreOutcome::placed(requested, applied)
}

fn delete_task(state: &mut BoardState, task_id: &TaskId) -> StoreOutcome {
    let Some(task) = state.tasks.remove(task_id) else {
        return StoreOutcome::not_found("task", task_id);
    };
    state.selected_tasks.remove(task_id);
    let order = state.task_order(&task.column_id);
    write_order(state, &task.column_id, &order);
    StoreOutcome::Applied
}

fn move_task(
    state: &mut BoardState,
    task_id: &TaskId,
    destination: &ColumnId,
    requested: usize,
) -> StoreOutcome {
    let Some(task) = state.tasks.get(task_id) else {
        return StoreOutcome::not_found("task", task_id);
    };
    if state.column(destination).is_none() {
        return StoreOutcome::not_found("column", destination);
    }

    let source = task.column_id.clone();
    let stored_position = task.position;
    let source_order = state.task_order(&source);
    let source_index = source_order
        .iter()
        .position(|id| id == task_id)
        .unwrap_or(stored_position);

    let same_column = &source == destination;
    let destination_order = if same_column {
        source_order.clone()
    } else {
        state.task_order(destination)
    };
    let applied = clamp_destination(same_column, destination_order.len(), requested);

    let plan = plan_move(&source, source_index, destination, applied);
    if plan.is_noop() && stored_position == applied {
        return match StoreOutcome::placed(requested, applied) {
            StoreOutcome::Applied => StoreOutcome::Unchanged,
            clamped => clamped,
        };
    }

    // Siblings take their sorted index through the plan, which also heals any gap.
    for (column, order) in [(&source, &source_order), (destination, &destination_order)] {
        for (index, id) in order.iter().enumerate() {
            if id == task_id {
                continue;
            }
            if let Some(sibling) = state.tasks.get_mut(id) {
                sibling.set_position(plan.sibling_position(column, index));
            }
        }
        if same_column {
            break;
        }
    }
    if let Some(task) = state.tasks.get_mut(task_id) {
        task.column_id = destination.clone();
        task.position = applied;
    }
    StoreOutcome::placed(requested, applied)
}

fn move_multiple(
    state: &mut BoardState,
    task_ids: &[TaskId],
    destination: &ColumnId,
    requested: usize,
) -> StoreOutcome {
    if state.column(destination).is_none() {
        return StoreOutcome::not_found("column", destination);
    }
    let mut block: Vec<TaskId> = Vec::new();
    for id in task_ids {
        if state.tasks.contains_key(id) && !block.contains(id) {
            block.push(id.clone());
        }
    }
    if block.is_empty() {
        return match task_ids.first() {
            Some(id) => StoreOutcome::not_found("task", id),
            None => StoreOutcome::Unchanged,
        };
    }

    let mut sources: Vec<ColumnId> = block
        .iter()
        .filter_map(|id| state.tasks.get(id).map(|t| t.column_id.clone()))
        .filter(|column| column != destination)
        .collect();
    sources.sort();
    sources.dedup();

    for column in &sources {
        let order: Vec<TaskId> = state
            .task_order(column)
            .into_iter()
            .filter(|id| !block.contains(id))
            .collect();
        write_order(state, column, &order);
    }

    let mut order: Vec<TaskId> = state
        .task_order(destination)
        .into_iter()
        .filter(|id| !block.contains(id))
        .collect();
    let applied = clamp_destination(false, order.len(), requested);
    order.splice(applied..applied, block);
    write_order(state, destination, &order);
    StoreOutcome::placed(requested, applied)
}

fn add_column(state: &mut BoardState, column: Column) -> StoreOutcome {
    if state.column(&column.id).is_some() {
        return StoreOutcome::Rejected {
            reason: format!("column {} already exists", column.id),
        };
    }
    let requested = column.position;
    let applied = clamp_destination(false, state.columns.len(), requested);
    state.columns.insert(applied, column);
    renumber(&mut state.columns);
    StoreOutcome::placed(requested, applied)
}

fn move_column(state: &mut BoardState, column_id: &ColumnId, requested: usize) -> StoreOutcome {
    let Some(from) = state.columns.iter().position(|c| &c.id == column_id) else {
        return StoreOutcome::not_found("column", column_id);
    };
    let applied = clamp_destination(true, state.columns.len(), requested);
    if from == applied && state.columns[from].position == applied {
        return match StoreOutcome::placed(requested, applied) {
            StoreOutcome::Applied => StoreOutcome::Unchanged,
            clamped => clamped,
        };
    }
    reorder(&mut state.columns, from, applied);
    renumber(&mut state.columns);
    StoreOutcome::placed(requested, applied)
}

fn delete_column(state: &mut BoardState, column_id: &ColumnId) -> StoreOutcome {
    let Some(index) = state.columns.iter().position(|c| &c.id == column_id) else {
        return StoreOutcome::not_found("column", column_id);
    };
    if state.columns.len() == 1 {
        return StoreOutcome::Rejected {
            reason: format!("column {column_id} is the board's last column"),
        };
    }
    let orphans = state.task_order(column_id);
    state.columns.remove(index);
    renumber(&mut state.columns);

    if let Some(target) = state.columns.first().map(|c| c.id.clone()) {
        let mut order = state.task_order(&target);
        order.extend(orphans);
        write_order(state, &target, &order);
    }
    StoreOutcome::Applied
}

/// Put the server's copy of a task in place, moving it when its slot differs
fn reconcile_task(state: &mut BoardState, task: Task) -> StoreOutcome {
    if !state.tasks.contains_key(&task.id) {
        return add_task(state, task);
    }
    let Some(local) = state.tasks.get(&task.id) else {
        return StoreOutcome::not_found("task", &task.id);
    };
    if *local == task {
        return StoreOutcome::Unchanged;
    }

    let slot = (task.column_id.clone(), task.position);
    let moved = local.column_id != slot.0 || local.position != slot.1;
    if moved {
        let outcome = move_task(state, &task.id, &slot.0, slot.1);
        if matches!(outcome, StoreOutcome::NotFound { .. }) {
            return outcome;
        }
    }
    if let Some(local) = state.tasks.get_mut(&task.id) {
        let (column, position) = (local.column_id.clone(), local.position);
        *local = task;
        local.column_id = column;
        local.position = position;
    }
    StoreOutcome::Applied
}

fn apply_event(state: &mut BoardState, event: BoardEvent) -> StoreOutcome {
    if let Some(current) = state.current_board_id() {
        if current != event.board_id() {
            return StoreOutcome::Unchanged;
        }
    }

    match event {
        BoardEvent::TaskCreated { task } | BoardEvent::TaskUpdated { task } => {
            reconcile_task(state, task)
        }
        BoardEvent::TaskMoved {
            task_id,
            destination_column_id,
            destination_position,
            ..
        } => move_task(state, &task_id, &destination_column_id, destination_position),
        BoardEvent::TaskDeleted { task_id, .. } => delete_task(state, &task_id),
        BoardEvent::ColumnCreated { column } | BoardEvent::ColumnUpdated { column } => {
            replace_column(state, column)
        }
        BoardEvent::ColumnMoved {
            column_id,
            position,
            ..
        } => move_column(state, &column_id, position),
        BoardEvent::ColumnDeleted { column_id, .. } => delete_column(state, &column_id),
    }
}

fn replace_column(state: &mut BoardState, column: Column) -> StoreOutcome {
    if state.column(&column.id).is_none() {
        return add_column(state, column);
    }
    let Some(local) = state.columns.iter_mut().find(|c| c.id == column.id) else {
        return StoreOutcome::not_found("column", &column.id);
    };
    if *local == column {
        return StoreOutcome::Unchanged;
    }
    let position = column.position;
    let id = column.id.clone();
    let local_position = local.position;
    *local = column;
    local.position = local_position;
    if position != local_position {
        move_column(state, &id, position);
    }
    StoreOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, TaskPatch};

    fn column(id: &str, position: usize) -> Column {
        let mut column = Column::new("b1", id, position);
        column.id = ColumnId::from_string(id);
        column
    }

    fn task(id: &str, column: &str, position: usize) -> Task {
        let mut task = Task::new("b1", column, id, position);
        task.id = TaskId::from_string(id);
        task
    }

    /// todo: a b c, doing: d e, done: empty
    fn board() -> BoardState {
        let mut state = BoardState::new();
        state.columns = vec![column("todo", 0), column("doing", 1), column("done", 2)];
        for t in [
            task("a", "todo", 0),
            task("b", "todo", 1),
            task("c", "todo", 2),
            task("d", "doing", 0),
            task("e", "doing", 1),
        ] {
            state.tasks.insert(t.id.clone(), t);
        }
        state
    }

    fn ids(state: &BoardState, column: &str) -> Vec<String> {
        state
            .tasks_in_column(&ColumnId::from_string(column))
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[test]
    fn test_move_within_column() {
        let (state, outcome) = reduce(&board(), BoardAction::move_task("c", "todo", 0));
        assert_eq!(outcome, StoreOutcome::Applied);
        assert_eq!(ids(&state, "todo"), vec!["c", "a", "b"]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_move_across_columns_compacts_source() {
        let (state, outcome) = reduce(&board(), BoardAction::move_task("a", "doing", 1));
        assert_eq!(outcome, StoreOutcome::Applied);
        assert_eq!(ids(&state, "todo"), vec!["b", "c"]);
        assert_eq!(ids(&state, "doing"), vec!["d", "a", "e"]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_move_clamps_destination() {
        let (state, outcome) = reduce(&board(), BoardAction::move_task("a", "done", 7));
        assert_eq!(
            outcome,
            StoreOutcome::Clamped {
                requested: 7,
                applied: 0
            }
        );
        assert_eq!(ids(&state, "done"), vec!["a"]);

        let (state, outcome) = reduce(&board(), BoardAction::move_task("a", "todo", 9));
        assert_eq!(
            outcome,
            StoreOutcome::Clamped {
                requested: 9,
                applied: 2
            }
        );
        assert_eq!(ids(&state, "todo"), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_unknown_ids_fail_soft() {
        let initial = board();
        let (state, outcome) = reduce(&initial, BoardAction::move_task("zz", "todo", 0));
        assert!(matches!(outcome, StoreOutcome::NotFound { entity: "task", .. }));
        assert_eq!(state, initial);

        let (state, outcome) = reduce(&initial, BoardAction::move_task("a", "nowhere", 0));
        assert!(matches!(outcome, StoreOutcome::NotFound { entity: "column", .. }));
        assert_eq!(state, initial);

        let (_, outcome) = reduce(
            &initial,
            BoardAction::UpdateTask {
                task_id: "zz".into(),
                patch: TaskPatch::default().with_title("x"),
            },
        );
        assert!(matches!(outcome, StoreOutcome::NotFound { .. }));
    }

    #[test]
    fn test_move_to_same_slot_is_unchanged() {
        let initial = board();
        let (state, outcome) = reduce(&initial, BoardAction::move_task("b", "todo", 1));
        assert_eq!(outcome, StoreOutcome::Unchanged);
        assert_eq!(state, initial);
    }

    #[test]
    fn test_delete_task_compacts() {
        let (state, _) = reduce(&board(), BoardAction::DeleteTask { task_id: "a".into() });
        assert_eq!(ids(&state, "todo"), vec!["b", "c"]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_add_task_with_colliding_position_shifts() {
        let (state, outcome) = reduce(
            &board(),
            BoardAction::AddTask {
                task: task("n", "todo", 1),
            },
        );
        assert_eq!(outcome, StoreOutcome::Applied);
        assert_eq!(ids(&state, "todo"), vec!["a", "n", "b", "c"]);

        let (state, outcome) = reduce(
            &state,
            BoardAction::AddTask {
                task: task("m", "done", 5),
            },
        );
        assert_eq!(
            outcome,
            StoreOutcome::Clamped {
                requested: 5,
                applied: 0
            }
        );
        assert!(state.is_consistent());
    }

    #[test]
    fn test_update_task_keeps_slot() {
        let (state, _) = reduce(
            &board(),
            BoardAction::UpdateTask {
                task_id: "a".into(),
                patch: TaskPatch::default().with_title("Renamed"),
            },
        );
        let a = state.task(&"a".into()).unwrap();
        assert_eq!(a.title, "Renamed");
        assert_eq!(a.position, 0);
    }

    #[test]
    fn test_move_multiple_inserts_block() {
        let (state, outcome) = reduce(
            &board(),
            BoardAction::MoveMultipleTasks {
                task_ids: vec!["c".into(), "a".into(), "ghost".into()],
                destination_column_id: "doing".into(),
                start_position: 1,
            },
        );
        assert_eq!(outcome, StoreOutcome::Applied);
        assert_eq!(ids(&state, "todo"), vec!["b"]);
        assert_eq!(ids(&state, "doing"), vec!["d", "c", "a", "e"]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_move_multiple_within_destination() {
        let (state, _) = reduce(
            &board(),
            BoardAction::MoveMultipleTasks {
                task_ids: vec!["c".into(), "b".into()],
                destination_column_id: "todo".into(),
                start_position: 0,
            },
        );
        assert_eq!(ids(&state, "todo"), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_move_column_renumbers() {
        let (state, outcome) = reduce(
            &board(),
            BoardAction::MoveColumn {
                column_id: "done".into(),
                position: 0,
            },
        );
        assert_eq!(outcome, StoreOutcome::Applied);
        let names: Vec<_> = state.columns.iter().map(|c| (c.id.to_string(), c.position)).collect();
        assert_eq!(
            names,
            vec![("done".into(), 0), ("todo".into(), 1), ("doing".into(), 2)]
        );
    }

    #[test]
    fn test_delete_column_reowns_tasks() {
        let (state, _) = reduce(
            &board(),
            BoardAction::DeleteColumn {
                column_id: "todo".into(),
            },
        );
        assert_eq!(state.columns.len(), 2);
        assert_eq!(state.columns[0].id, "doing");
        assert_eq!(ids(&state, "doing"), vec!["d", "e", "a", "b", "c"]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_delete_last_column_is_rejected() {
        let mut initial = BoardState::new();
        initial.columns = vec![column("only", 0)];
        let only = task("a", "only", 0);
        initial.tasks.insert(only.id.clone(), only);

        let (state, outcome) = reduce(
            &initial,
            BoardAction::DeleteColumn {
                column_id: "only".into(),
            },
        );
        assert!(matches!(outcome, StoreOutcome::Rejected { .. }));
        assert_eq!(state, initial);
    }

    #[test]
    fn test_clamp_onto_current_slot_is_reported() {
        let initial = board();
        let (state, outcome) = reduce(&initial, BoardAction::move_task("c", "todo", 5));
        assert_eq!(
            outcome,
            StoreOutcome::Clamped {
                requested: 5,
                applied: 2
            }
        );
        assert_eq!(state, initial);

        let (state, outcome) = reduce(
            &initial,
            BoardAction::MoveColumn {
                column_id: "done".into(),
                position: 4,
            },
        );
        assert_eq!(
            outcome,
            StoreOutcome::Clamped {
                requested: 4,
                applied: 2
            }
        );
        assert_eq!(state, initial);

        let (_, outcome) = reduce(&initial, BoardAction::move_task("c", "todo", 2));
        assert_eq!(outcome, StoreOutcome::Unchanged);
    }

    #[test]
    fn test_selection() {
        let (state, _) = reduce(&board(), BoardAction::ToggleTaskSelection { task_id: "a".into() });
        assert!(state.selected_tasks.contains(&TaskId::from("a")));
        let (state, _) = reduce(&state, BoardAction::ToggleTaskSelection { task_id: "a".into() });
        assert!(state.selected_tasks.is_empty());

        let (state, _) = reduce(
            &state,
            BoardAction::SelectMultipleTasks {
                task_ids: vec!["a".into(), "b".into()],
            },
        );
        assert_eq!(state.selected_tasks.len(), 2);
        let (state, _) = reduce(&state, BoardAction::DeleteTask { task_id: "a".into() });
        assert_eq!(state.selected_tasks.len(), 1);
        let (state, outcome) = reduce(&state, BoardAction::ClearSelection);
        assert_eq!(outcome, StoreOutcome::Applied);
        assert!(state.selected_tasks.is_empty());
    }

    #[test]
    fn test_board_actions() {
        let board_a = Board::new("A", "u1");
        let (state, _) = reduce(
            &BoardState::new(),
            BoardAction::SetBoards {
                boards: vec![board_a.clone()],
            },
        );
        let (state, _) = reduce(
            &state,
            BoardAction::SetCurrentBoard {
                board: Some(board_a.clone()),
            },
        );
        let (state, _) = reduce(
            &state,
            BoardAction::UpdateBoard {
                board_id: board_a.id.clone(),
                patch: crate::types::BoardPatch {
                    name: Some("Renamed".into()),
                    ..Default::default()
                },
            },
        );
        assert_eq!(state.boards[0].name, "Renamed");
        assert_eq!(state.current_board.as_ref().unwrap().name, "Renamed");

        let (state, _) = reduce(
            &state,
            BoardAction::DeleteBoard {
                board_id: board_a.id.clone(),
            },
        );
        assert!(state.boards.is_empty());
        assert!(state.current_board.is_none());
    }

    #[test]
    fn test_events_for_other_boards_are_ignored() {
        let mut initial = board();
        initial.current_board = Some({
            let mut b = Board::new("Mine", "u1");
            b.id = "b1".into();
            b
        });
        let (state, outcome) = reduce(
            &initial,
            BoardAction::ApplyEvent {
                event: BoardEvent::TaskDeleted {
                    task_id: "a".into(),
                    column_id: "todo".into(),
                    board_id: "other".into(),
                },
            },
        );
        assert_eq!(outcome, StoreOutcome::Unchanged);
        assert_eq!(state, initial);

        let (state, outcome) = reduce(
            &initial,
            BoardAction::ApplyEvent {
                event: BoardEvent::TaskMoved {
                    task_id: "a".into(),
                    source_column_id: "todo".into(),
                    destination_column_id: "done".into(),
                    destination_position: 0,
                    board_id: "b1".into(),
                },
            },
        );
        assert_eq!(outcome, StoreOutcome::Applied);
        assert_eq!(ids(&state, "done"), vec!["a"]);
    }

    #[test]
    fn test_reconcile_task_moves_and_replaces() {
        let mut server = task("a", "doing", 0);
        server.title = "From server".into();
        let (state, outcome) = reduce(&board(), BoardAction::ReconcileTask { task: server.clone() });
        assert_eq!(outcome, StoreOutcome::Applied);
        assert_eq!(ids(&state, "doing"), vec!["a", "d", "e"]);
        assert_eq!(state.task(&"a".into()).unwrap().title, "From server");
        assert!(state.is_consistent());

        let (_, outcome) = reduce(&state, BoardAction::ReconcileTask { task: state.task(&"a".into()).unwrap().clone() });
        assert_eq!(outcome, StoreOutcome::Unchanged);
    }

    #[test]
    fn test_reset() {
        let (state, _) = reduce(&board(), BoardAction::Reset);
        assert_eq!(state, BoardState::default());
    }
}
