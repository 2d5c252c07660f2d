// crates/cargocoin-cli/src/commands/mod.rs
//
// Command module declarations for the CargoCoin CLI.

pub mod events;
pub mod init;
pub mod run;
pub mod show;
