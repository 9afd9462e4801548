//! Student entity - A person enrolled in any number of courses and taught by any
//! number of teachers. Both collections are stored in join tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique identifier for the student
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
}

/// Defines relationships between Student and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One student has many enrolment rows
    #[sea_orm(has_many = "super::student_course::Entity")]
    StudentCourses,
    /// One student has many teacher links
    #[sea_orm(has_many = "super::student_teacher::Entity")]
    StudentTeachers,
}

impl Related<super::student_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourses.def()
    }
}

impl Related<super::student_teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
