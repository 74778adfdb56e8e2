//! Database row mappings.

pub mod course;
pub mod registration;
pub mod user;

pub use course::CourseEntity;
pub use registration::{AttendanceEntity, RegistrationEntity};
pub use user::UserEntity;
