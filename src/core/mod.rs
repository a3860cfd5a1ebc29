pub mod agent_service;
pub mod app;
pub mod config;
pub mod message;
pub mod panes;
pub mod registry;
pub mod simulation;
