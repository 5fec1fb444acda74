pub mod aggregate;
pub mod catalog;
pub mod draft;
pub mod enrollment;
pub mod lesson;
pub mod review;

pub use aggregate::{Category, Course, CourseStatus, DifficultyLevel, TeacherRef};
