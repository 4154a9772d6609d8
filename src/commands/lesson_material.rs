//! Lesson material CLI commands.

use clap::Args;

use lessonhub_core::types::{FolderId, LessonMaterialId};
use lessonhub_service::LessonHubServices;

use super::{ActorArgs, CommandError};
use crate::output;

/// Arguments for `restore-materials`.
#[derive(Debug, Args)]
pub struct RestoreMaterialsArgs {
    #[command(flatten)]
    pub actor: ActorArgs,
    /// Target personal folder
    #[arg(long)]
    pub folder: FolderId,
    /// Lesson material IDs (repeatable)
    #[arg(long = "material", required = true)]
    pub materials: Vec<LessonMaterialId>,
}

pub async fn restore(
    services: &LessonHubServices,
    args: &RestoreMaterialsArgs,
) -> Result<(), CommandError> {
    let outcome = services
        .lesson_materials
        .restore(&args.actor.context(), args.folder, &args.materials)
        .await?;
    output::print_json(&outcome);
    Ok(())
}
