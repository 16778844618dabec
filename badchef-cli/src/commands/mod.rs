//! CLI subcommands.

pub mod auth;
pub mod fav;
pub mod rate;
pub mod recipe;
