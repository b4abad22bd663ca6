//! Mahjong solitaire (workspace facade crate).
//!
//! The rules engine and the terminal front-end live in dedicated crates under
//! `crates/`; this package re-exports them as `mahjong_tui::{core,input,term,types}`
//! and hosts the glue the binary needs: environment configuration and the
//! front-end state machine that turns input commands into session calls.

pub mod app;
pub mod config;

pub use mahjong_core as core;
pub use mahjong_input as input;
pub use mahjong_term as term;
pub use mahjong_types as types;

pub use app::App;
pub use config::AppConfig;
