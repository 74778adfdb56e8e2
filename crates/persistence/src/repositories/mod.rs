//! Repositories for database operations.

pub mod course;
pub mod registration;
pub mod user;

pub use course::{CourseChanges, CourseRepository, DeleteCourseError, NewCourse};
pub use registration::{CreateRegistrationError, NewRegistration, RegistrationRepository};
pub use user::UserRepository;
