pub mod auth;
pub mod categories;
pub mod exercises;
pub mod trainings;
pub mod users;
