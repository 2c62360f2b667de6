// Jobs API: score postings against the profile, persist them, list them back.

pub mod handlers;
pub mod service;
pub mod store;
