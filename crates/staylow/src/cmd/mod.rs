//! Command implementations for the staylow CLI

pub mod history;
pub mod prices;
pub mod run;
