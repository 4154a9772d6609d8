//! Lesson material restore authorization.

use lessonhub_entity::lesson_material::LessonMaterial;
use lessonhub_entity::user::Actor;

/// A deleted lesson material may be restored by its creator or by a
/// system administrator.
pub fn can_restore_lesson_material(actor: &Actor, material: &LessonMaterial) -> bool {
    actor.is_system_admin() || material.created_by_user_id == actor.id()
}
