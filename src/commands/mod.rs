//! CLI command definitions and dispatch.

pub mod folder;
pub mod lesson_material;
pub mod migrate;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use lessonhub_core::config::{AppConfig, DatabaseBackend};
use lessonhub_core::error::AppError;
use lessonhub_core::types::UserId;
use lessonhub_database::{DatabasePool, MemoryStore, Repositories};
use lessonhub_service::{LessonHubServices, LifecycleError, RequestContext};

/// LessonHub: folder and lesson material lifecycle
#[derive(Debug, Parser)]
#[command(name = "lessonhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/{env}.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Archive an active personal folder
    Archive(folder::FolderTargetArgs),
    /// Restore an archived personal folder
    Restore(folder::FolderTargetArgs),
    /// Delete an archived folder
    Delete(folder::FolderTargetArgs),
    /// Delete archived personal folders (all of them when no --folder is given)
    BulkDelete(folder::BulkDeleteArgs),
    /// Restore deleted lesson materials into a personal folder
    RestoreMaterials(lesson_material::RestoreMaterialsArgs),
    /// Rename a folder
    Rename(folder::RenameArgs),
    /// Move a folder among its siblings
    Reorder(folder::ReorderArgs),
    /// Create a personal or class folder
    CreateFolder(folder::CreateFolderArgs),
    /// Apply database migrations
    Migrate,
}

/// The acting user, shared by every lifecycle command.
#[derive(Debug, Clone, Args)]
pub struct ActorArgs {
    /// Acting user ID
    #[arg(long)]
    pub actor: UserId,
}

impl ActorArgs {
    /// Request context for this actor.
    pub fn context(&self) -> RequestContext {
        RequestContext::new(self.actor)
    }
}

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A lifecycle handler rejected or failed the request.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// Configuration, connection or migration failure.
    #[error(transparent)]
    App(#[from] AppError),
}

impl CommandError {
    /// Stable code printed before the message.
    pub fn code(&self) -> String {
        match self {
            Self::Lifecycle(e) => e.code().to_string(),
            Self::App(e) => e.kind.to_string(),
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), CommandError> {
        if matches!(self.command, Commands::Migrate) {
            return migrate::execute(config).await;
        }

        let (repos, pool) = open_repositories(config).await?;
        let services = LessonHubServices::new(&repos);

        let result = match &self.command {
            Commands::Archive(args) => folder::archive(&services, args).await,
            Commands::Restore(args) => folder::restore(&services, args).await,
            Commands::Delete(args) => folder::delete(&services, args).await,
            Commands::BulkDelete(args) => folder::bulk_delete(&services, args).await,
            Commands::RestoreMaterials(args) => lesson_material::restore(&services, args).await,
            Commands::Rename(args) => folder::rename(&services, args).await,
            Commands::Reorder(args) => folder::reorder(&services, args).await,
            Commands::CreateFolder(args) => folder::create(&services, args).await,
            Commands::Migrate => Ok(()),
        };

        if let Some(pool) = pool {
            pool.close().await;
        }
        result
    }
}

/// Helper: build repositories for the configured backend
pub async fn open_repositories(
    config: &AppConfig,
) -> Result<(Repositories, Option<DatabasePool>), AppError> {
    match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            Ok((Repositories::postgres(&pool), Some(pool)))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory backend; changes are discarded on exit");
            Ok((Repositories::memory(MemoryStore::new()), None))
        }
    }
}
