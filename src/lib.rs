//! tmux-learn - discover tmux keybindings that fit the habits already in your config
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod data;
pub mod integrations;
pub mod parser;
pub mod style;
pub mod suggest;
pub mod util;
