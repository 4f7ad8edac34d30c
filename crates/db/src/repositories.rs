pub mod appointment;
pub mod master;
pub mod service;
pub mod user;
