#![deny(unexpected_cfgs)]
//
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
//
// https://github.com/rust-lang/rust-clippy/issues/16440
#![allow(clippy::multiple_crate_versions)]

mod json_util;

pub mod bot;
pub mod calendar;
pub mod command;
pub mod etu;
pub mod format;
pub mod query;
pub mod resolve;

pub use bot::ScheduleBot;
pub use etu::{EtuClient, ScheduleSource};
