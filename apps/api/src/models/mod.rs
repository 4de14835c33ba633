pub mod faculty;
pub mod resume;
pub mod user;
