#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn antwire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_antwire"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("antwire should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let text = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(text.trim()).expect("stdout should be a single JSON document")
}

#[test]
fn decode_prints_frame_and_record() {
    let output = antwire(&["--format", "json", "decode", "A4 01 6F 20 EA"]);
    assert!(output.status.success(), "{output:?}");

    let json = stdout_json(&output);
    assert_eq!(json["frame"]["id"], "StartUp");
    assert_eq!(json["frame"]["length"], 1);
    assert_eq!(json["record"]["type"], "COMMAND_RESET");
}

#[test]
fn decode_bad_checksum_exits_with_data_invalid() {
    let output = antwire(&["--format", "json", "decode", "A4016F20EB"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("checksum"));
}

#[test]
fn decode_reads_frames_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_antwire"))
        .args(["--format", "json", "decode"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("antwire should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"A4014B00EE\n\nA4 02 54 08 01 FB\n")
        .expect("stdin should accept frames");
    let output = child.wait_with_output().expect("antwire should exit");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["frame"]["id"], "OpenChannel");
    assert!(lines[0].get("record").is_none());
    assert_eq!(lines[1]["record"]["max_channels"], 8);
    assert_eq!(lines[1]["record"]["max_networks"], 1);
}

#[test]
fn encode_prints_frame_hex() {
    let output = antwire(&[
        "--format",
        "json",
        "encode",
        r#"{"message":"channel_id","channel":0,"device_number":12345,"device_type_id":120,"transmission_type":5}"#,
    ]);
    assert!(output.status.success(), "{output:?}");

    let json = stdout_json(&output);
    assert_eq!(json["id"], "ChannelId");
    assert_eq!(json["length"], 5);
    assert_eq!(json["frame"], "A40551003930780584");
}

#[test]
fn encode_rejects_unknown_command() {
    let output = antwire(&["encode", r#"{"message":"capabilities"}"#]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn ids_lists_registry() {
    let output = antwire(&["--format", "json", "ids"]);
    assert!(output.status.success(), "{output:?}");

    let json = stdout_json(&output);
    let codecs = json.as_array().expect("ids should print an array");
    assert_eq!(codecs.len(), 19);
    let channel_id = codecs
        .iter()
        .find(|codec| codec["id"] == 0x51)
        .expect("ChannelID should be registered");
    assert_eq!(channel_id["name"], "ChannelID");
    assert_eq!(channel_id["direction"], "both");
    assert_eq!(channel_id["fields"][1]["kind"], "u16");
}

#[test]
fn version_prints_crate_version() {
    let output = antwire(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("antwire {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn extended_version_reports_build_facts() {
    let output = antwire(&["version", "--extended"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("version: {}", env!("CARGO_PKG_VERSION"))));
    assert!(stdout.contains(&format!("target_os: {}", std::env::consts::OS)));
    assert!(stdout.contains("registry: 19 codecs"));
    assert!(!stdout.contains("unknown"), "{stdout}");
}

#[test]
fn log_env_overrides_level_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_antwire"))
        .args(["--log-level", "error", "decode", "A4 01 6F 20 EB"])
        .env("ANTWIRE_LOG", "antwire_frame=warn")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frame checksum mismatch"));

    let quiet = antwire(&["decode", "A4 01 6F 20 EB"]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("frame checksum mismatch"));
}
