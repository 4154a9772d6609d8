//! Folder authorization matrix over every role, owner type and relationship.

mod helpers;

use lessonhub_auth::FolderPermissionChecker;
use lessonhub_core::types::SchoolId;
use lessonhub_database::Repositories;
use lessonhub_entity::folder::{FolderOwner, FolderStatus};
use lessonhub_entity::user::UserRole;

use helpers::TestApp;

#[derive(Debug, Clone, Copy)]
enum Relationship {
    /// Owns the personal folder.
    Owner,
    /// Some other user.
    Stranger,
    /// Teacher of record of the owning classroom.
    ClassTeacher,
    /// Same school as the classroom, not its teacher.
    SameSchool,
    /// Different school.
    OtherSchool,
}

fn expected(role: UserRole, relationship: Relationship) -> bool {
    if role == UserRole::SystemAdmin {
        return true;
    }
    match relationship {
        Relationship::Owner => true,
        Relationship::Stranger | Relationship::OtherSchool => false,
        Relationship::ClassTeacher => matches!(
            role,
            UserRole::Teacher | UserRole::ContentModerator | UserRole::SchoolAdmin
        ),
        Relationship::SameSchool => role == UserRole::SchoolAdmin,
    }
}

#[tokio::test]
async fn test_authorization_matrix() {
    let app = TestApp::new();
    let repos = Repositories::memory(app.store.clone());
    let checker = FolderPermissionChecker::new(repos.users, repos.classrooms);

    for role in UserRole::ALL {
        let role_name = role.as_str();

        // Personal folders.
        for relationship in [Relationship::Owner, Relationship::Stranger] {
            let actor = app.create_user(&[role_name], None).await;
            let owner = match relationship {
                Relationship::Owner => actor,
                _ => app.create_user(&["Teacher"], None).await,
            };
            let folder_id = app
                .create_folder(FolderOwner::Personal(owner), FolderStatus::Active)
                .await;
            let folder = app.store.folder(folder_id).await.unwrap();

            let allowed = checker
                .has_permission_to_update_folder(&folder, actor)
                .await
                .unwrap();
            assert_eq!(allowed, expected(role, relationship), "{role} {relationship:?}");
        }

        // Class folders.
        for relationship in [
            Relationship::ClassTeacher,
            Relationship::SameSchool,
            Relationship::OtherSchool,
        ] {
            let school = SchoolId::new();
            let actor_school = match relationship {
                Relationship::OtherSchool => SchoolId::new(),
                _ => school,
            };
            let actor = app.create_user(&[role_name], Some(actor_school)).await;
            let teacher = match relationship {
                Relationship::ClassTeacher => actor,
                _ => app.create_user(&["Teacher"], Some(school)).await,
            };
            let classroom = app.create_classroom(teacher, school).await;
            let folder_id = app
                .create_folder(FolderOwner::Class(classroom), FolderStatus::Active)
                .await;
            let folder = app.store.folder(folder_id).await.unwrap();

            let allowed = checker
                .has_permission_to_update_folder(&folder, actor)
                .await
                .unwrap();
            assert_eq!(allowed, expected(role, relationship), "{role} {relationship:?}");
        }
    }
}
