pub mod catalog;
pub mod details;
pub mod featured;
pub mod form;
pub mod learn;
pub mod lessons;
pub mod my_courses;
pub mod reviews;
pub mod teacher_list;
