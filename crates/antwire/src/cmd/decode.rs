use std::io::BufRead;

use antwire_frame::{decompose_with_config, FrameConfig, FrameView, TrailingBytes};
use antwire_message::{MessageError, MessageTypeRegistry, Record};
use serde::Serialize;
use tracing::debug;

use crate::cmd::DecodeArgs;
use crate::exit::{
    frame_error, io_error, message_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE,
};
use crate::output::{cell, hex_byte, new_table, print_json, print_json_pretty, OutputFormat};

#[derive(Serialize)]
struct DecodeOutput {
    frame: FrameView,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<Record>,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = FrameConfig {
        trailing: if args.capture_trailing {
            TrailingBytes::Capture
        } else {
            TrailingBytes::Reject
        },
        ..FrameConfig::default()
    };

    let inputs = if args.frames.is_empty() {
        read_stdin_lines()?
    } else {
        args.frames
    };
    if inputs.is_empty() {
        return Err(CliError::new(USAGE, "no frames to decode"));
    }

    let registry = MessageTypeRegistry::global();
    let mut failed = 0usize;
    for input in &inputs {
        match decode_one(input, &config, registry) {
            Ok(out) => print_decoded(&out, format),
            Err(err) => {
                eprintln!("error: {err}");
                failed = failed.saturating_add(1);
            }
        }
    }

    if failed == 0 {
        Ok(SUCCESS)
    } else {
        Err(CliError::new(
            DATA_INVALID,
            format!("{failed} of {} frames failed to decode", inputs.len()),
        ))
    }
}

fn read_stdin_lines() -> CliResult<Vec<String>> {
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.map_err(|err| io_error("read stdin", err))?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn decode_one(
    input: &str,
    config: &FrameConfig,
    registry: &MessageTypeRegistry,
) -> CliResult<DecodeOutput> {
    let raw = parse_hex(input)?;
    let frame = decompose_with_config(&raw, config).map_err(|err| frame_error(input, err))?;
    let view = frame.view().map_err(|err| frame_error(input, err))?;

    let record = match registry.decode_frame(&frame) {
        Ok(record) => Some(record),
        Err(MessageError::NoCodec(id) | MessageError::NotDecodable(id)) => {
            debug!(id = %id, "no decoder registered");
            None
        }
        Err(err) => return Err(message_error(input, err)),
    };

    Ok(DecodeOutput {
        frame: view,
        record,
    })
}

/// Parse hex text, ignoring whitespace, `:` separators and `0x` prefixes.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let mut digits = String::with_capacity(input.len());
    for token in input.split(|c: char| c.is_whitespace() || c == ':' || c == ',') {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        digits.push_str(token);
    }

    hex::decode(&digits).map_err(|err| CliError::new(DATA_INVALID, format!("{input}: {err}")))
}

fn print_decoded(out: &DecodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Pretty => print_json_pretty(out),
        OutputFormat::Table => {
            let frame = &out.frame;
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            table.add_row(vec!["id".to_string(), frame.id.to_string()]);
            table.add_row(vec!["length".to_string(), frame.length.to_string()]);
            table.add_row(vec!["channel".to_string(), cell(frame.channel)]);
            table.add_row(vec!["page".to_string(), cell(frame.page_number)]);
            if let Some(sequence) = frame.sequence_number {
                table.add_row(vec!["sequence".to_string(), sequence.to_string()]);
            }
            table.add_row(vec!["payload".to_string(), frame.payload.clone()]);
            table.add_row(vec!["checksum".to_string(), hex_byte(frame.checksum)]);
            if !frame.rest.is_empty() {
                table.add_row(vec!["trailing".to_string(), frame.rest.clone()]);
            }
            if let Some(flag) = frame.flag {
                table.add_row(vec!["flag".to_string(), hex_byte(flag)]);
            }
            if let Some(extended) = &frame.parsed_extended_data {
                table.add_row(vec![
                    "extended".to_string(),
                    serde_json::to_string(extended).unwrap_or_default(),
                ]);
            }
            if let Some(record) = &out.record {
                table.add_row(vec![
                    "record".to_string(),
                    serde_json::to_string(record).unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
    }
}
