//! Property tests: the client store and the server agree on every valid move.
//!
//! Each case seeds a board, loads it into a [`BoardStore`], then replays the same
//! random moves against both and compares the resulting column orders.

use kanban_board::{
    board::CreateBoard,
    column::ListColumns,
    task::{AddTask, ListTasks, MoveTask},
    types::position::max_destination,
    BoardAction, BoardStore, Column, ColumnId, Execute, KanbanContext, StoreOutcome, Task,
};
use proptest::prelude::*;

struct Seeded {
    ctx: KanbanContext,
    board: String,
    columns: Vec<ColumnId>,
}

async fn seed(counts: &[usize]) -> Seeded {
    let ctx = KanbanContext::in_memory().unwrap();
    let board = CreateBoard::new("Prop").execute(&ctx).await.into_result().unwrap();
    let board_id = board["id"].as_str().unwrap().to_string();
    let columns: Vec<ColumnId> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| ColumnId::from(c["id"].as_str().unwrap()))
        .collect();
    for (column, count) in columns.iter().zip(counts) {
        for i in 0..*count {
            AddTask::new(board_id.as_str(), column.clone(), format!("{column}-{i}"))
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
    }
    Seeded {
        ctx,
        board: board_id,
        columns,
    }
}

async fn server_tasks(seeded: &Seeded) -> Vec<Task> {
    let result = ListTasks::new(seeded.board.as_str())
        .with_archived(true)
        .execute(&seeded.ctx)
        .await
        .into_result()
        .unwrap();
    serde_json::from_value(result["tasks"].clone()).unwrap()
}

async fn load_store(seeded: &Seeded) -> BoardStore {
    let columns = ListColumns::new(seeded.board.as_str())
        .execute(&seeded.ctx)
        .await
        .into_result()
        .unwrap();
    let columns: Vec<Column> = serde_json::from_value(columns["columns"].clone()).unwrap();
    let store = BoardStore::new();
    store.dispatch(BoardAction::SetColumns { columns });
    store.dispatch(BoardAction::SetTasks {
        tasks: server_tasks(seeded).await,
    });
    store
}

/// (column, ids in position order) for every column
fn order_of(tasks: &[Task], columns: &[ColumnId]) -> Vec<Vec<String>> {
    columns
        .iter()
        .map(|column| {
            let mut in_column: Vec<&Task> = tasks.iter().filter(|t| &t.column_id == column).collect();
            in_column.sort_by_key(|t| t.position);
            in_column.iter().map(|t| t.id.to_string()).collect()
        })
        .collect()
}

fn store_order(store: &BoardStore, columns: &[ColumnId]) -> Vec<Vec<String>> {
    columns
        .iter()
        .map(|column| {
            store
                .tasks_in_column(column)
                .into_iter()
                .map(|t| t.id.to_string())
                .collect()
        })
        .collect()
}

fn moves() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..64, 0usize..3, 0usize..8), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_store_matches_server_after_valid_moves(
        counts in prop::collection::vec(0usize..5, 3),
        moves in moves(),
    ) {
        prop_assume!(counts.iter().sum::<usize>() > 0);
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let seeded = seed(&counts).await;
            let store = load_store(&seeded).await;

            for (pick, column, position) in moves {
                let tasks = server_tasks(&seeded).await;
                let task = &tasks[pick % tasks.len()];
                let destination = seeded.columns[column].clone();
                let same = task.column_id == destination;
                let count = tasks.iter().filter(|t| t.column_id == destination).count();
                let position = position % (max_destination(same, count) + 1);

                MoveTask::new(task.id.clone(), destination.clone(), position)
                    .execute(&seeded.ctx)
                    .await
                    .into_result()
                    .unwrap();
                let outcome = store.dispatch(BoardAction::move_task(task.id.clone(), destination, position));
                let clamped_or_missing = matches!(
                    outcome,
                    StoreOutcome::Clamped { .. } | StoreOutcome::NotFound { .. }
                );
                prop_assert!(!clamped_or_missing, "store disagreed on a valid move: {:?}", outcome);

                let server = order_of(&server_tasks(&seeded).await, &seeded.columns);
                prop_assert_eq!(store_order(&store, &seeded.columns), server);
                prop_assert!(store.snapshot().is_consistent());
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn prop_out_of_range_moves_clamp_without_breaking_density(
        counts in prop::collection::vec(1usize..5, 3),
        column in 0usize..3,
        overshoot in 1usize..10,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let seeded = seed(&counts).await;
            let store = load_store(&seeded).await;
            let snapshot = store.snapshot();
            let task = snapshot.tasks_in_column(&seeded.columns[0])[0].clone();
            let destination = seeded.columns[column].clone();
            let same = column == 0;
            let max = max_destination(same, counts[column]);

            let outcome = store.dispatch(BoardAction::move_task(task.id.clone(), destination.clone(), max + overshoot));
            prop_assert_eq!(outcome, StoreOutcome::Clamped { requested: max + overshoot, applied: max });
            prop_assert!(store.snapshot().is_consistent());

            // the server refuses the same request outright
            let result = MoveTask::new(task.id, destination, max + overshoot)
                .execute(&seeded.ctx)
                .await
                .into_result();
            prop_assert!(result.is_err());
            Ok::<(), TestCaseError>(())
        })?;
    }
}
