pub mod screens;
pub mod services;
