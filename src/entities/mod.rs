//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod course;
pub mod student;
pub mod student_course;
pub mod student_teacher;
pub mod teacher;

// Re-export specific types to avoid conflicts
pub use course::{Column as CourseColumn, Entity as Course, Model as CourseModel};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};
pub use student_course::{
    Column as StudentCourseColumn, Entity as StudentCourse, Model as StudentCourseModel,
};
pub use student_teacher::{
    Column as StudentTeacherColumn, Entity as StudentTeacher, Model as StudentTeacherModel,
};
pub use teacher::{Column as TeacherColumn, Entity as Teacher, Model as TeacherModel};
