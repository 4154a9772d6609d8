//! Pure folder access evaluation.
//!
//! Resolution order:
//! 1. Admin bypass: system administrators may update any folder.
//! 2. Personal folders: only the owner.
//! 3. Class folders: the class teacher (as `Teacher` or
//!    `ContentModerator`), or a `SchoolAdmin` of the classroom's school.

use serde::{Deserialize, Serialize};

use lessonhub_entity::classroom::Classroom;
use lessonhub_entity::folder::{Folder, FolderOwner};
use lessonhub_entity::user::{Actor, UserRole};

/// Why access to a folder was granted, or that it was not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderAccess {
    /// Actor is a system administrator.
    AdminBypass,
    /// Actor owns the personal folder.
    Owner,
    /// Actor teaches the owning classroom.
    ClassTeacher,
    /// Actor administers the owning classroom's school.
    SchoolAdmin,
    /// No rule grants access.
    Denied,
}

impl FolderAccess {
    /// Whether the actor may update the folder.
    pub fn is_granted(&self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// Evaluate access for an already-loaded actor.
///
/// `classroom` is the classroom owning a class folder and is ignored for
/// personal folders. A class folder whose classroom cannot be found is
/// denied to everyone except system administrators.
pub fn evaluate_folder_access(
    folder: &Folder,
    actor: &Actor,
    classroom: Option<&Classroom>,
) -> FolderAccess {
    if actor.is_system_admin() {
        return FolderAccess::AdminBypass;
    }

    match folder.owner() {
        FolderOwner::Personal(owner_id) => {
            if owner_id == actor.id() {
                FolderAccess::Owner
            } else {
                FolderAccess::Denied
            }
        }
        FolderOwner::Class(_) => {
            let Some(classroom) = classroom else {
                return FolderAccess::Denied;
            };

            let teaches = actor.has_role(UserRole::Teacher)
                || actor.has_role(UserRole::ContentModerator);
            if teaches && classroom.teacher_id == actor.id() {
                return FolderAccess::ClassTeacher;
            }

            if actor.has_role(UserRole::SchoolAdmin)
                && actor.school_id() == Some(classroom.school_id)
            {
                return FolderAccess::SchoolAdmin;
            }

            FolderAccess::Denied
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use lessonhub_core::types::{ClassroomId, SchoolId, UserId};
    use lessonhub_entity::classroom::ClassroomStatus;
    use lessonhub_entity::user::{ApplicationUser, RoleSet};

    use super::*;

    fn actor(id: UserId, school: Option<SchoolId>, roles: &[UserRole]) -> Actor {
        Actor::new(
            ApplicationUser {
                id,
                display_name: "actor".into(),
                email: None,
                school_id: school,
                created_at: Utc::now(),
            },
            roles.iter().copied().collect::<RoleSet>(),
        )
    }

    fn classroom(teacher_id: UserId, school_id: SchoolId) -> Classroom {
        Classroom {
            id: ClassroomId::new(),
            name: "7B".into(),
            teacher_id,
            school_id,
            status: ClassroomStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn class_folder(classroom: &Classroom) -> Folder {
        Folder::new(FolderOwner::Class(classroom.id), "Unit 1".into(), None, 0)
    }

    #[test]
    fn test_system_admin_bypasses_everything() {
        let admin = actor(UserId::new(), None, &[UserRole::SystemAdmin]);
        let personal = Folder::new(FolderOwner::Personal(UserId::new()), "x".into(), None, 0);
        assert_eq!(
            evaluate_folder_access(&personal, &admin, None),
            FolderAccess::AdminBypass
        );

        let room = classroom(UserId::new(), SchoolId::new());
        let folder = class_folder(&room);
        assert_eq!(
            evaluate_folder_access(&folder, &admin, None),
            FolderAccess::AdminBypass
        );
    }

    #[test]
    fn test_personal_folder_owner_only() {
        let owner_id = UserId::new();
        let folder = Folder::new(FolderOwner::Personal(owner_id), "mine".into(), None, 0);

        let owner = actor(owner_id, None, &[UserRole::Student]);
        assert_eq!(evaluate_folder_access(&folder, &owner, None), FolderAccess::Owner);

        // Roles other than SystemAdmin never reach someone else's personal folder.
        for role in UserRole::ALL {
            if role == UserRole::SystemAdmin {
                continue;
            }
            let other = actor(UserId::new(), None, &[role]);
            assert_eq!(
                evaluate_folder_access(&folder, &other, None),
                FolderAccess::Denied,
                "{role}"
            );
        }
    }

    #[test]
    fn test_owner_without_roles_is_allowed() {
        let owner_id = UserId::new();
        let folder = Folder::new(FolderOwner::Personal(owner_id), "mine".into(), None, 0);
        let owner = actor(owner_id, None, &[]);
        assert!(evaluate_folder_access(&folder, &owner, None).is_granted());
    }

    #[test]
    fn test_class_folder_matrix() {
        let school = SchoolId::new();
        let teacher_id = UserId::new();
        let room = classroom(teacher_id, school);
        let folder = class_folder(&room);

        let cases: Vec<(Actor, FolderAccess)> = vec![
            (
                actor(teacher_id, Some(school), &[UserRole::Teacher]),
                FolderAccess::ClassTeacher,
            ),
            (
                actor(teacher_id, Some(school), &[UserRole::ContentModerator]),
                FolderAccess::ClassTeacher,
            ),
            (
                actor(teacher_id, Some(school), &[UserRole::Student]),
                FolderAccess::Denied,
            ),
            (
                actor(UserId::new(), Some(school), &[UserRole::Teacher]),
                FolderAccess::Denied,
            ),
            (
                actor(UserId::new(), Some(school), &[UserRole::SchoolAdmin]),
                FolderAccess::SchoolAdmin,
            ),
            (
                actor(UserId::new(), Some(SchoolId::new()), &[UserRole::SchoolAdmin]),
                FolderAccess::Denied,
            ),
            (
                actor(UserId::new(), None, &[UserRole::SchoolAdmin]),
                FolderAccess::Denied,
            ),
            (
                actor(UserId::new(), Some(school), &[UserRole::ContentModerator]),
                FolderAccess::Denied,
            ),
            (
                actor(UserId::new(), Some(school), &[UserRole::Student]),
                FolderAccess::Denied,
            ),
        ];

        for (actor, expected) in cases {
            assert_eq!(
                evaluate_folder_access(&folder, &actor, Some(&room)),
                expected,
                "roles {:?}",
                actor.roles
            );
        }
    }

    #[test]
    fn test_class_folder_without_classroom_is_denied() {
        let teacher_id = UserId::new();
        let room = classroom(teacher_id, SchoolId::new());
        let folder = class_folder(&room);
        let teacher = actor(teacher_id, None, &[UserRole::Teacher]);
        assert_eq!(
            evaluate_folder_access(&folder, &teacher, None),
            FolderAccess::Denied
        );
    }

    #[test]
    fn test_teacher_who_is_also_school_admin_of_other_school() {
        let room = classroom(UserId::new(), SchoolId::new());
        let folder = class_folder(&room);
        let mixed = actor(
            UserId::new(),
            Some(SchoolId::new()),
            &[UserRole::Teacher, UserRole::SchoolAdmin],
        );
        assert!(!evaluate_folder_access(&folder, &mixed, Some(&room)).is_granted());
    }
}
