pub mod course_card;
pub mod error_banner;
pub mod form_field;
pub mod spinner;
pub mod stat_card;
