//! CLI command definitions and their implementations.
//!
//! Commands write their output to any `std::io::Write` so they can be driven
//! from tests without a terminal.

mod id;
mod user;

use clap::Subcommand;

pub use id::{run_id, IdArgs};
pub use user::{run_user, UserCommand};

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print freshly generated identifiers
    Id(IdArgs),

    /// Manage users
    #[command(subcommand)]
    User(UserCommand),
}
