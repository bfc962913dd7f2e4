use std::io::Read;

use antwire_frame::{to_hex, MessageId};
use antwire_message::Command;
use serde::Serialize;
use tracing::debug;

use crate::cmd::EncodeArgs;
use crate::exit::{io_error, json_error, message_error, CliResult, SUCCESS};
use crate::output::{new_table, print_json, print_json_pretty, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    id: MessageId,
    length: usize,
    frame: String,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let json = if args.json == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| io_error("read stdin", err))?;
        buf
    } else {
        args.json
    };

    let out = encode(&json)?;
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Pretty => print_json_pretty(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["ID", "LENGTH", "FRAME"]);
            table.add_row(vec![
                out.id.to_string(),
                out.length.to_string(),
                out.frame.clone(),
            ]);
            println!("{table}");
        }
    }

    Ok(SUCCESS)
}

fn encode(json: &str) -> CliResult<EncodeOutput> {
    let command: Command =
        serde_json::from_str(json).map_err(|err| json_error("parse command", err))?;
    let wire = command
        .to_bytes()
        .map_err(|err| message_error("compose frame", err))?;
    debug!(id = %command.id(), bytes = wire.len(), "composed frame");

    Ok(EncodeOutput {
        id: command.id(),
        length: wire.len().saturating_sub(antwire_frame::FRAME_OVERHEAD),
        frame: to_hex(&wire),
    })
}
