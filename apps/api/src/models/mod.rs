pub mod job;
pub mod profile;
