pub mod blog;
pub mod note;
pub mod person;
