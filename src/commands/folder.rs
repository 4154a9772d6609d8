//! Folder lifecycle CLI commands.

use clap::Args;

use lessonhub_core::types::{ClassroomId, FolderId};
use lessonhub_service::{
    CreateFolderRequest, LessonHubServices, RenameFolderRequest, ReorderFolderRequest,
};

use super::{ActorArgs, CommandError};
use crate::output;

/// A single folder acted on by one user.
#[derive(Debug, Args)]
pub struct FolderTargetArgs {
    #[command(flatten)]
    pub actor: ActorArgs,
    /// Folder ID
    #[arg(long)]
    pub folder: FolderId,
}

/// Arguments for `bulk-delete`.
#[derive(Debug, Args)]
pub struct BulkDeleteArgs {
    #[command(flatten)]
    pub actor: ActorArgs,
    /// Folder IDs (repeatable); omit to select every archived personal folder
    #[arg(long = "folder")]
    pub folders: Vec<FolderId>,
}

/// Arguments for `rename`.
#[derive(Debug, Args)]
pub struct RenameArgs {
    #[command(flatten)]
    pub actor: ActorArgs,
    /// Folder ID
    #[arg(long)]
    pub folder: FolderId,
    /// New name
    #[arg(long)]
    pub name: String,
}

/// Arguments for `reorder`.
#[derive(Debug, Args)]
pub struct ReorderArgs {
    #[command(flatten)]
    pub actor: ActorArgs,
    /// Folder ID
    #[arg(long)]
    pub folder: FolderId,
    /// Target position among active siblings, starting at 0
    #[arg(long, allow_hyphen_values = true)]
    pub order: i32,
}

/// Arguments for `create-folder`.
#[derive(Debug, Args)]
pub struct CreateFolderArgs {
    #[command(flatten)]
    pub actor: ActorArgs,
    /// Folder name
    #[arg(long)]
    pub name: String,
    /// Classroom owning the folder (omit for a personal folder)
    #[arg(long = "class")]
    pub classroom: Option<ClassroomId>,
    /// Parent folder ID
    #[arg(long)]
    pub parent: Option<FolderId>,
}

pub async fn archive(
    services: &LessonHubServices,
    args: &FolderTargetArgs,
) -> Result<(), CommandError> {
    let outcome = services
        .lifecycle
        .archive(&args.actor.context(), args.folder)
        .await?;
    output::print_json(&outcome);
    Ok(())
}

pub async fn restore(
    services: &LessonHubServices,
    args: &FolderTargetArgs,
) -> Result<(), CommandError> {
    let outcome = services
        .lifecycle
        .restore(&args.actor.context(), args.folder)
        .await?;
    output::print_json(&outcome);
    Ok(())
}

pub async fn delete(
    services: &LessonHubServices,
    args: &FolderTargetArgs,
) -> Result<(), CommandError> {
    let outcome = services
        .lifecycle
        .delete(&args.actor.context(), args.folder)
        .await?;
    output::print_json(&outcome);
    Ok(())
}

pub async fn bulk_delete(
    services: &LessonHubServices,
    args: &BulkDeleteArgs,
) -> Result<(), CommandError> {
    let outcome = services
        .lifecycle
        .bulk_delete_personal(&args.actor.context(), &args.folders)
        .await?;
    output::print_json(&outcome);
    Ok(())
}

pub async fn rename(services: &LessonHubServices, args: &RenameArgs) -> Result<(), CommandError> {
    let folder = services
        .folders
        .rename(
            &args.actor.context(),
            args.folder,
            RenameFolderRequest {
                name: args.name.clone(),
            },
        )
        .await?;
    output::print_json(&folder);
    Ok(())
}

pub async fn reorder(services: &LessonHubServices, args: &ReorderArgs) -> Result<(), CommandError> {
    let siblings = services
        .folders
        .reorder(
            &args.actor.context(),
            args.folder,
            ReorderFolderRequest { order: args.order },
        )
        .await?;
    output::print_json(&siblings);
    Ok(())
}

pub async fn create(
    services: &LessonHubServices,
    args: &CreateFolderArgs,
) -> Result<(), CommandError> {
    let ctx = args.actor.context();
    let req = CreateFolderRequest {
        name: args.name.clone(),
        parent_id: args.parent,
    };
    let folder = match args.classroom {
        Some(classroom_id) => services.folders.create_class(&ctx, classroom_id, req).await?,
        None => services.folders.create_personal(&ctx, req).await?,
    };
    output::print_json(&folder);
    Ok(())
}
