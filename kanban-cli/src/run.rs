//! Turn parsed arguments into kanban operations

use crate::cli::{ActivityCommand, BoardCommand, Cli, ColumnCommand, Noun, TaskCommand, UserCommand};
use anyhow::Context;
use kanban_board::{
    activity::ListActivity,
    board::{CreateBoard, DeleteBoard, GetBoard, ListBoards, UpdateBoard},
    column::{AddColumn, DeleteColumn, GetColumn, ListColumns, MoveColumn, UpdateColumn},
    task::{AddTask, AssignTask, DeleteTask, GetTask, ListTasks, MoveTask, UnassignTask, UpdateTask},
    types::{BoardPatch, ColumnPatch},
    user::{AddUser, GetUser, ListUsers},
    KanbanConfig, KanbanContext, KanbanOperationProcessor, OperationProcessor, Priority, TaskPatch,
};
use serde_json::Value;
use tracing::debug;

/// Open the configured database and execute the command
pub async fn run(cli: Cli) -> anyhow::Result<Value> {
    let mut config =
        KanbanConfig::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    if let Some(actor) = cli.actor {
        config.actor = actor;
    }
    debug!(database = %config.database.display(), actor = %config.actor, "opening board database");

    let ctx = KanbanContext::open_with_config(&config)
        .with_context(|| format!("failed to open {}", config.database.display()))?;
    let processor = KanbanOperationProcessor::new();

    let value = match cli.command {
        Noun::User(command) => user(command, &processor, &ctx).await?,
        Noun::Board(command) => board(command, &processor, &ctx).await?,
        Noun::Column(command) => column(command, &processor, &ctx).await?,
        Noun::Task(command) => task(command, &processor, &ctx).await?,
        Noun::Activity(ActivityCommand::List { board, task, limit }) => {
            let mut op = ListActivity::new(board);
            op.task_id = task.map(Into::into);
            op.limit = limit;
            processor.process(&op, &ctx).await?
        }
    };
    Ok(value)
}

fn priority(value: Option<String>) -> anyhow::Result<Option<Priority>> {
    value
        .map(|p| p.parse::<Priority>())
        .transpose()
        .context("invalid priority")
}

async fn user(
    command: UserCommand,
    processor: &KanbanOperationProcessor,
    ctx: &KanbanContext,
) -> anyhow::Result<Value> {
    let value = match command {
        UserCommand::Add { email, name, id } => {
            let mut op = AddUser::new(email);
            if let Some(name) = name {
                op = op.with_name(name);
            }
            if let Some(id) = id {
                op = op.with_id(id);
            }
            processor.process(&op, ctx).await?
        }
        UserCommand::Get { id } => processor.process(&GetUser::new(id), ctx).await?,
        UserCommand::List => processor.process(&ListUsers::new(), ctx).await?,
    };
    Ok(value)
}

async fn board(
    command: BoardCommand,
    processor: &KanbanOperationProcessor,
    ctx: &KanbanContext,
) -> anyhow::Result<Value> {
    let value = match command {
        BoardCommand::Create { name, description } => {
            let mut op = CreateBoard::new(name);
            if let Some(description) = description {
                op = op.with_description(description);
            }
            processor.process(&op, ctx).await?
        }
        BoardCommand::Get { id } => processor.process(&GetBoard::new(id), ctx).await?,
        BoardCommand::List { archived } => {
            processor
                .process(&ListBoards::new().with_archived(archived), ctx)
                .await?
        }
        BoardCommand::Update {
            id,
            name,
            description,
            archived,
        } => {
            let patch = BoardPatch {
                name,
                description: description.map(Some),
                is_archived: archived,
                ..BoardPatch::default()
            };
            processor.process(&UpdateBoard::new(id, patch), ctx).await?
        }
        BoardCommand::Delete { id } => processor.process(&DeleteBoard::new(id), ctx).await?,
    };
    Ok(value)
}

async fn column(
    command: ColumnCommand,
    processor: &KanbanOperationProcessor,
    ctx: &KanbanContext,
) -> anyhow::Result<Value> {
    let value = match command {
        ColumnCommand::Add {
            board,
            name,
            color,
            wip_limit,
        } => {
            let mut op = AddColumn::new(board, name);
            if let Some(color) = color {
                op = op.with_color(color);
            }
            if let Some(limit) = wip_limit {
                op = op.with_wip_limit(limit);
            }
            processor.process(&op, ctx).await?
        }
        ColumnCommand::List { board } => processor.process(&ListColumns::new(board), ctx).await?,
        ColumnCommand::Get { id } => processor.process(&GetColumn::new(id), ctx).await?,
        ColumnCommand::Update {
            id,
            name,
            color,
            wip_limit,
            hidden,
        } => {
            let patch = ColumnPatch {
                name,
                color: color.map(Some),
                wip_limit: wip_limit.map(Some),
                is_hidden: hidden,
            };
            processor.process(&UpdateColumn::new(id, patch), ctx).await?
        }
        ColumnCommand::Move { id, position } => {
            processor.process(&MoveColumn::new(id, position), ctx).await?
        }
        ColumnCommand::Delete { id } => processor.process(&DeleteColumn::new(id), ctx).await?,
    };
    Ok(value)
}

async fn task(
    command: TaskCommand,
    processor: &KanbanOperationProcessor,
    ctx: &KanbanContext,
) -> anyhow::Result<Value> {
    let value = match command {
        TaskCommand::Add {
            board,
            title,
            column,
            description,
            priority: level,
            position,
        } => {
            let mut op = AddTask::new(board, column, title);
            if let Some(description) = description {
                op = op.with_description(description);
            }
            if let Some(level) = priority(level)? {
                op = op.with_priority(level);
            }
            if let Some(position) = position {
                op = op.at_position(position);
            }
            processor.process(&op, ctx).await?
        }
        TaskCommand::Get { id } => processor.process(&GetTask::new(id), ctx).await?,
        TaskCommand::List {
            board,
            column,
            archived,
        } => {
            let mut op = ListTasks::new(board).with_archived(archived);
            if let Some(column) = column {
                op = op.in_column(column);
            }
            processor.process(&op, ctx).await?
        }
        TaskCommand::Update {
            id,
            title,
            description,
            priority: level,
            archived,
        } => {
            let patch = TaskPatch {
                title,
                description: description.map(Some),
                priority: priority(level)?,
                is_archived: archived,
                ..TaskPatch::default()
            };
            processor.process(&UpdateTask::new(id, patch), ctx).await?
        }
        TaskCommand::Move {
            id,
            column,
            position,
            expected_revision,
        } => {
            let mut op = MoveTask::new(id, column, position);
            if let Some(revision) = expected_revision {
                op = op.with_expected_revision(revision);
            }
            processor.process(&op, ctx).await?
        }
        TaskCommand::Delete { id } => processor.process(&DeleteTask::new(id), ctx).await?,
        TaskCommand::Assign { id, user } => {
            processor.process(&AssignTask::new(id, user), ctx).await?
        }
        TaskCommand::Unassign { id, user } => {
            processor.process(&UnassignTask::new(id, user), ctx).await?
        }
    };
    Ok(value)
}
