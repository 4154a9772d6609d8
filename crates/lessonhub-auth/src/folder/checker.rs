//! Repository-backed folder permission checks.

use std::sync::Arc;

use tracing::debug;

use lessonhub_core::result::AppResult;
use lessonhub_core::types::UserId;
use lessonhub_database::{ClassroomRepository, UserRepository};
use lessonhub_entity::folder::{Folder, FolderOwner};
use lessonhub_entity::user::{Actor, RoleSet, UserRole};

use super::access::{FolderAccess, evaluate_folder_access};

/// Loads the actor and, for class folders, the owning classroom, then
/// evaluates [`evaluate_folder_access`].
#[derive(Clone)]
pub struct FolderPermissionChecker {
    users: Arc<dyn UserRepository>,
    classrooms: Arc<dyn ClassroomRepository>,
}

impl std::fmt::Debug for FolderPermissionChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderPermissionChecker").finish()
    }
}

impl FolderPermissionChecker {
    /// Creates a new folder permission checker.
    pub fn new(users: Arc<dyn UserRepository>, classrooms: Arc<dyn ClassroomRepository>) -> Self {
        Self { users, classrooms }
    }

    /// Load a user and parse their role names.
    ///
    /// Role names that do not match a known role are ignored.
    pub async fn load_actor(&self, actor_id: UserId) -> AppResult<Option<Actor>> {
        let Some(user) = self.users.find_by_id(actor_id).await? else {
            return Ok(None);
        };

        let roles: RoleSet = self
            .users
            .roles_for_user(actor_id)
            .await?
            .iter()
            .filter_map(|name| match name.parse::<UserRole>() {
                Ok(role) => Some(role),
                Err(_) => {
                    debug!(user_id = %actor_id, role = %name, "Ignoring unknown role");
                    None
                }
            })
            .collect();

        Ok(Some(Actor::new(user, roles)))
    }

    /// Resolve access for an actor that is already loaded.
    pub async fn resolve_for_actor(&self, folder: &Folder, actor: &Actor) -> AppResult<FolderAccess> {
        let classroom = match folder.owner() {
            FolderOwner::Class(classroom_id) if !actor.is_system_admin() => {
                self.classrooms.find_by_id(classroom_id).await?
            }
            _ => None,
        };
        Ok(evaluate_folder_access(folder, actor, classroom.as_ref()))
    }

    /// Resolve access by actor id. Unknown actors are denied.
    pub async fn resolve(&self, folder: &Folder, actor_id: UserId) -> AppResult<FolderAccess> {
        match self.load_actor(actor_id).await? {
            Some(actor) => self.resolve_for_actor(folder, &actor).await,
            None => Ok(FolderAccess::Denied),
        }
    }

    /// Whether `actor_id` may change the folder's status or metadata.
    pub async fn has_permission_to_update_folder(
        &self,
        folder: &Folder,
        actor_id: UserId,
    ) -> AppResult<bool> {
        let access = self.resolve(folder, actor_id).await?;
        debug!(
            folder_id = %folder.id,
            actor_id = %actor_id,
            access = ?access,
            "Resolved folder access"
        );
        Ok(access.is_granted())
    }
}
