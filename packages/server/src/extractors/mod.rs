pub mod id;
pub mod json;
pub mod token;
