//! Shared types, error model, and configuration for SliceVote.
//!
//! This crate is the foundation depended on by all other SliceVote crates.
//! It provides:
//! - [`SliceVoteError`] — the unified error type
//! - Domain types ([`Team`], [`Ingredient`], [`VoteMode`], order settings)
//! - Configuration ([`AppConfig`], [`ApiConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, ApiSection, AppConfig, admin_token, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, SliceVoteError};
pub use types::{
    FreezeState, Ingredient, OrderKind, OrderSize, OrderType, Pork, SelfLinked, Team, Template,
    Vegetarian, Verb, VoteMode, VoteModeKind,
};
