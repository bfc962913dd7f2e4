use antwire_frame::{compose, decompose, FrameReader, FrameWriter, MessageId};
use antwire_message::{
    resolve_codec, Capabilities, ChannelId, ChannelResponse, Command, Decodable, Direction,
    Encodable, MessageError, MessageTypeRegistry, Record, ResponseCode, StartupReason,
};

#[test]
fn channel_id_round_trip_through_registry() {
    let sent = ChannelId {
        channel: 0,
        device_number: 12345,
        device_type_id: 120,
        transmission_type: 5,
    };
    let wire = sent.to_bytes().unwrap();

    assert_eq!(ChannelId::from_bytes(&wire).unwrap(), sent);
    assert_eq!(
        MessageTypeRegistry::global().decode(&wire).unwrap(),
        Record::ChannelId(sent)
    );
}

#[test]
fn dongle_session_transcript() {
    let mut writer = FrameWriter::new(std::io::Cursor::new(Vec::<u8>::new()));
    writer.send(MessageId::StartUp, &[0x00]).unwrap();
    writer
        .send(MessageId::ChannelResponse, &[0x00, 0x46, 0x00])
        .unwrap();
    writer
        .send(MessageId::Capabilities, &[8, 3, 0x00, 0xBA, 0x36, 0x00])
        .unwrap();
    writer
        .send(MessageId::AntVersion, b"AJK1.04RAF\0")
        .unwrap();
    writer.send(MessageId::ChannelResponse, &[0x00, 0x01, 0x07]).unwrap();

    let mut reader = FrameReader::new(std::io::Cursor::new(writer.into_inner().into_inner()));
    let registry = MessageTypeRegistry::new();
    let mut records = Vec::new();
    for _ in 0..5 {
        let frame = reader.read_frame().unwrap();
        records.push(registry.decode_frame(&frame).unwrap());
    }

    assert!(matches!(
        records[0],
        Record::StartUp(ref msg) if msg.reason == StartupReason::PowerOnReset
    ));
    assert_eq!(
        records[1],
        Record::ChannelResponse(ChannelResponse {
            channel: 0,
            id: MessageId::SetNetworkKey,
            code: ResponseCode::ResponseNoError,
        })
    );
    let Record::Capabilities(caps) = &records[2] else {
        panic!("expected capabilities, got {:?}", records[2]);
    };
    assert_eq!(caps.max_channels, Some(8));
    assert_eq!(caps.max_sensrcore_channels, Some(0));
    let Record::AntVersion(version) = &records[3] else {
        panic!("expected version, got {:?}", records[3]);
    };
    assert_eq!(version.version, "AJK1.04RAF");
    let Record::ChannelResponse(event) = &records[4] else {
        panic!("expected channel event, got {:?}", records[4]);
    };
    assert!(event.is_event());
    assert_eq!(event.code, ResponseCode::EventChannelClosed);
}

#[test]
fn record_json_is_tagged() {
    let wire = compose(MessageId::Capabilities, &[8, 1]).unwrap();
    let record = MessageTypeRegistry::global().decode(&wire).unwrap();

    assert_eq!(record.id(), MessageId::Capabilities);
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        serde_json::json!({"message": "capabilities", "max_channels": 8, "max_networks": 1})
    );
}

#[test]
fn typed_decoder_rejects_other_ids() {
    let wire = compose(MessageId::StartUp, &[0x00]).unwrap();
    let err = Capabilities::from_bytes(&wire).unwrap_err();
    assert!(matches!(
        err,
        MessageError::WrongMessageId {
            received: MessageId::StartUp,
            expected: MessageId::Capabilities,
        }
    ));
    assert!(err.is_invalid_data());
}

#[test]
fn commands_from_json_compose_valid_frames() {
    let inputs = [
        r#"{"message":"reset_system"}"#,
        r#"{"message":"set_network_key","network":0}"#,
        r#"{"message":"assign_channel","channel":0,"channel_type":"receive","network":0}"#,
        r#"{"message":"channel_id","channel":0,"device_number":0,"device_type_id":120,"transmission_type":0}"#,
        r#"{"message":"channel_period","channel":0,"period":8070}"#,
        r#"{"message":"channel_rf_frequency","channel":0,"frequency":57}"#,
        r#"{"message":"lib_config","rssi":true}"#,
        r#"{"message":"open_channel","channel":0}"#,
        r#"{"message":"request_message","requested":"Capabilities"}"#,
    ];

    for input in inputs {
        let command: Command = serde_json::from_str(input).unwrap();
        let wire = command.to_bytes().unwrap();
        let frame = decompose(&wire).unwrap();
        assert_eq!(frame.id, command.id(), "{input}");

        let codec = resolve_codec(frame.id).unwrap();
        assert_ne!(codec.direction(), Direction::Receive);
        assert_eq!(
            Some(usize::from(frame.length)),
            antwire_message::layout_width(codec.layout()),
            "{input}"
        );
    }
}

#[test]
fn every_registered_id_round_trips_through_resolve() {
    let registry = MessageTypeRegistry::global();
    for codec in registry.codecs() {
        let resolved = resolve_codec(codec.id()).unwrap();
        assert_eq!(resolved.id(), codec.id());
        assert_eq!(resolved.direction(), codec.direction());
    }
}
