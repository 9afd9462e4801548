//! Course entity - A named course taught by teachers and attended by students.
//!
//! The teacher side of the relationship lives on [`super::teacher::Model::course_id`];
//! enrolments live in the `student_courses` join table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Course database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    /// Unique identifier for the course
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Course title (e.g., "Math")
    #[sea_orm(column_name = "course_name")]
    pub name: String,
}

/// Defines relationships between Course and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One course has many teachers
    #[sea_orm(has_many = "super::teacher::Entity")]
    Teachers,
    /// One course has many enrolment rows
    #[sea_orm(has_many = "super::student_course::Entity")]
    StudentCourses,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teachers.def()
    }
}

impl Related<super::student_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
