#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod cli;
pub mod error;
pub mod web;

mod cache;
mod entities;
mod mock;
mod render;
mod score;
mod sources;
mod transform;
mod utils;
