//! Input validation helpers shared by every form of the application.

pub mod custom_validator;
pub mod input_validation;
