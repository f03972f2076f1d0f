pub mod appointment;
pub mod auth;
pub mod car;
pub mod evaluation;
pub mod garage;
pub mod service;
