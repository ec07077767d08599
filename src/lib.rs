pub mod alert;
pub mod audio;
pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod narrator;
pub mod sequencer;
pub mod session;
pub mod ui;
