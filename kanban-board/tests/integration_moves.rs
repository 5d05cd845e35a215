//! End-to-end move tests against a file-backed database

use kanban_board::{
    board::CreateBoard,
    column::{DeleteColumn, MoveColumn},
    task::{AddTask, DeleteTask, ListTasks, MoveTask},
    types::position::is_dense,
    BoardEvent, ColumnId, Execute, KanbanContext, KanbanError, TaskId,
};
use serde_json::Value;
use std::collections::HashMap;
use tempfile::TempDir;

struct Board {
    ctx: KanbanContext,
    id: String,
    columns: Vec<String>,
}

async fn setup(temp: &TempDir) -> Board {
    let ctx = KanbanContext::open(temp.path().join("kanban.db")).unwrap();
    let board = CreateBoard::new("Release").execute(&ctx).await.into_result().unwrap();
    let columns = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    Board {
        id: board["id"].as_str().unwrap().to_string(),
        columns,
        ctx,
    }
}

async fn add(board: &Board, column: usize, title: &str) -> String {
    let task = AddTask::new(board.id.as_str(), board.columns[column].as_str(), title)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    task["id"].as_str().unwrap().to_string()
}

/// Column id -> titles in position order
async fn layout(board: &Board) -> HashMap<String, Vec<String>> {
    let result = ListTasks::new(board.id.as_str())
        .with_archived(true)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    let mut by_column: HashMap<String, Vec<(usize, String)>> = HashMap::new();
    for task in result["tasks"].as_array().unwrap() {
        by_column
            .entry(task["columnId"].as_str().unwrap().to_string())
            .or_default()
            .push((
                task["position"].as_u64().unwrap() as usize,
                task["title"].as_str().unwrap().to_string(),
            ));
    }
    by_column
        .into_iter()
        .map(|(column, mut tasks)| {
            assert!(is_dense(tasks.iter().map(|(p, _)| *p)), "gap in {column}: {tasks:?}");
            tasks.sort();
            (column, tasks.into_iter().map(|(_, t)| t).collect())
        })
        .collect()
}

fn titles(layout: &HashMap<String, Vec<String>>, column: &str) -> Vec<String> {
    layout.get(column).cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_cross_column_move_keeps_both_columns_dense() {
    let temp = TempDir::new().unwrap();
    let board = setup(&temp).await;
    let (todo, doing) = (board.columns[0].clone(), board.columns[1].clone());

    let mut ids = Vec::new();
    for title in ["T1", "T2", "T3", "T4"] {
        ids.push(add(&board, 0, title).await);
    }
    add(&board, 1, "D1").await;

    MoveTask::new(ids[1].as_str(), doing.as_str(), 0)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    MoveTask::new(ids[3].as_str(), doing.as_str(), 2)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();

    let layout = layout(&board).await;
    assert_eq!(titles(&layout, &todo), vec!["T1", "T3"]);
    assert_eq!(titles(&layout, &doing), vec!["T2", "D1", "T4"]);
}

#[tokio::test]
async fn test_rejected_move_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let board = setup(&temp).await;
    let id = add(&board, 0, "Only").await;
    add(&board, 1, "Other").await;
    let before = layout(&board).await;

    // [0, n] across columns: n = 1 is fine, 2 is not
    let result = MoveTask::new(id.as_str(), board.columns[1].as_str(), 2)
        .execute(&board.ctx)
        .await
        .into_result();
    assert!(matches!(
        result,
        Err(KanbanError::PositionOutOfRange { position: 2, max: 1, .. })
    ));
    assert_eq!(layout(&board).await, before);
}

#[tokio::test]
async fn test_stale_revision_is_reported() {
    let temp = TempDir::new().unwrap();
    let board = setup(&temp).await;
    let a = add(&board, 0, "A").await;
    let b = add(&board, 0, "B").await;
    let done = board.columns[2].as_str();

    let moved = MoveTask::new(a.as_str(), done, 0)
        .with_expected_revision(0)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    assert_eq!(moved["columnId"], done);

    // the first move bumped the destination's revision
    let result = MoveTask::new(b.as_str(), done, 0)
        .with_expected_revision(0)
        .execute(&board.ctx)
        .await
        .into_result();
    assert!(matches!(result, Err(KanbanError::StaleRevision { actual: 1, .. })));
}

#[tokio::test]
async fn test_moves_publish_events_after_commit() {
    let temp = TempDir::new().unwrap();
    let board = setup(&temp).await;
    let id = add(&board, 0, "Evented").await;
    let mut events = board.ctx.subscribe();

    MoveTask::new(id.as_str(), board.columns[1].as_str(), 0)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    // moving onto its own slot publishes nothing
    MoveTask::new(id.as_str(), board.columns[1].as_str(), 0)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    DeleteTask::new(id.as_str())
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();

    match events.recv().await.unwrap() {
        BoardEvent::TaskMoved {
            task_id,
            source_column_id,
            destination_column_id,
            destination_position,
            ..
        } => {
            assert_eq!(task_id, TaskId::from(id.as_str()));
            assert_eq!(source_column_id, ColumnId::from(board.columns[0].as_str()));
            assert_eq!(destination_column_id, ColumnId::from(board.columns[1].as_str()));
            assert_eq!(destination_position, 0);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(events.recv().await.unwrap(), BoardEvent::TaskDeleted { .. }));
}

#[tokio::test]
async fn test_delete_column_appends_tasks_to_first_column() {
    let temp = TempDir::new().unwrap();
    let board = setup(&temp).await;
    add(&board, 0, "Todo").await;
    add(&board, 1, "Doing 1").await;
    add(&board, 1, "Doing 2").await;

    // put Done first so it becomes the target
    MoveColumn::new(board.columns[2].as_str(), 0)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    let result: Value = DeleteColumn::new(board.columns[1].as_str())
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    assert_eq!(result["targetColumnId"], board.columns[2].as_str());
    assert_eq!(result["movedTasks"], 2);

    let layout = layout(&board).await;
    assert_eq!(titles(&layout, &board.columns[2]), vec!["Doing 1", "Doing 2"]);
    assert_eq!(titles(&layout, &board.columns[0]), vec!["Todo"]);
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let board = setup(&temp).await;
    let a = add(&board, 0, "A").await;
    add(&board, 0, "B").await;
    MoveTask::new(a.as_str(), board.columns[0].as_str(), 1)
        .execute(&board.ctx)
        .await
        .into_result()
        .unwrap();
    let before = layout(&board).await;
    drop(board.ctx);

    let ctx = KanbanContext::open(temp.path().join("kanban.db")).unwrap();
    let reopened = Board {
        ctx,
        id: board.id,
        columns: board.columns,
    };
    assert_eq!(layout(&reopened).await, before);
    assert_eq!(titles(&before, &reopened.columns[0]), vec!["B", "A"]);
}
