use std::io::Write;

use clap::Args;

use keel_core::id;

use crate::error::CommandError;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct IdArgs {
    /// Tag to prefix identifiers with (at most 4 characters are kept).
    /// Without a tag, untagged 32-character identifiers are printed.
    #[arg(conflicts_with = "uuid")]
    pub tag: Option<String>,

    /// Print untagged 32-character identifiers
    #[arg(long)]
    pub uuid: bool,

    /// Number of identifiers to print
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,
}

/// Prints `args.count` identifiers, one per line.
pub fn run_id(args: &IdArgs, out: &mut impl Write) -> Result<(), CommandError> {
    for _ in 0..args.count {
        let value = match (&args.tag, args.uuid) {
            (Some(tag), false) => id::generate(tag),
            _ => id::generate_uuid(),
        };
        writeln!(out, "{value}")?;
    }
    Ok(())
}
