//! CLI tests: argument parsing per mode, and the command handlers run
//! against a fake store.

use super::{Cli, Mode};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}
