use antwire_message::{Direction, Field, MessageTypeRegistry};
use serde::Serialize;

use crate::cmd::IdsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{hex_byte, new_table, print_json, print_json_pretty, OutputFormat};

#[derive(Serialize)]
struct CodecOutput {
    id: u8,
    name: &'static str,
    direction: Direction,
    fields: &'static [Field],
}

pub fn run(_args: IdsArgs, format: OutputFormat) -> CliResult<i32> {
    let codecs: Vec<CodecOutput> = MessageTypeRegistry::global()
        .codecs()
        .into_iter()
        .map(|codec| CodecOutput {
            id: codec.id().into(),
            name: codec.name(),
            direction: codec.direction(),
            fields: codec.layout(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&codecs),
        OutputFormat::Pretty => print_json_pretty(&codecs),
        OutputFormat::Table => {
            let mut table = new_table(vec!["ID", "NAME", "DIRECTION", "FIELDS"]);
            for codec in &codecs {
                table.add_row(vec![
                    hex_byte(codec.id),
                    codec.name.to_string(),
                    direction_label(codec.direction).to_string(),
                    layout_summary(codec.fields),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(SUCCESS)
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Send => "send",
        Direction::Receive => "receive",
        Direction::Both => "both",
    }
}

fn layout_summary(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| format!("{}:{}", field.name, kind_label(field)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn kind_label(field: &Field) -> &'static str {
    use antwire_message::FieldKind;

    match field.kind {
        FieldKind::U8 => "u8",
        FieldKind::U16 => "u16",
        FieldKind::U64 => "u64",
        FieldKind::Bitfield => "bits",
        FieldKind::Text => "text",
    }
}
