pub mod commands;
pub mod pipeline;
#[macro_use]
extern crate log;
