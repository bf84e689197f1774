mod commands;

pub use commands::{Cli, Command, HelpArgs, OutputFormat};
