//! Teacher entity - A person who teaches at most one course.
//!
//! `course_id` is the single-valued side of the teacher↔course relationship.
//! Students taught by the teacher live in the `student_teachers` join table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teacher database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    /// Unique identifier for the teacher
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Middle name or patronymic
    pub middle_name: String,
    /// Age in years
    pub age: i32,
    /// The course this teacher teaches, None if unassigned
    pub course_id: Option<i64>,
}

/// Defines relationships between Teacher and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each teacher belongs to at most one course
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Course,
    /// One teacher has many student links
    #[sea_orm(has_many = "super::student_teacher::Entity")]
    StudentTeachers,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::student_teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
