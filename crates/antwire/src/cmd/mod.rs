use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod ids;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode hex-encoded frames.
    Decode(DecodeArgs),
    /// Compose a frame from a JSON command.
    Encode(EncodeArgs),
    /// List registered message codecs.
    Ids(IdsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Ids(args) => ids::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frames as hex (spaces, ':' and 0x prefixes allowed). Read one per line from stdin if omitted.
    pub frames: Vec<String>,
    /// Accept bytes after the checksum and report them instead of rejecting the frame.
    #[arg(long)]
    pub capture_trailing: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Command as JSON, e.g. {"message":"open_channel","channel":0}. Use - to read stdin.
    pub json: String,
}

#[derive(Args, Debug, Default)]
pub struct IdsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
