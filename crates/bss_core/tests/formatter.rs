//! Integration tests for the segment data formatter.

use std::fs;
use std::io::Read;

use apache_avro::types::Value;
use apache_avro::Reader;
use bss_core::{
    BssError, ConfigError, DataFormat, Domain, EncodeError, FormatConfig, LineFormat,
    OutputConfig, Segment, SegmentDataFormatter, SegmentField, SegmentList, UserRecord,
};
use bss_testkit::{config_vectors, line_vectors, sample_users, users_from_csv, FailingWriter};

/// Shows formatter logs with `RUST_LOG=bss_core=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn text(users: &[UserRecord], format: LineFormat) -> String {
    init_tracing();
    let mut formatter = SegmentDataFormatter::text(Vec::new(), format);
    formatter.append(users).unwrap();
    String::from_utf8(formatter.close().unwrap()).unwrap()
}

#[test]
fn vectors_through_formatter() {
    init_tracing();
    for v in line_vectors() {
        let mut formatter = SegmentDataFormatter::text(Vec::new(), v.format());
        let result = formatter.append(std::slice::from_ref(&v.user));
        let out = String::from_utf8(formatter.close().unwrap()).unwrap();

        match (v.expected_line, v.expected_error) {
            (Some(line), None) => {
                result.unwrap();
                assert_eq!(out, format!("{line}\n"), "{}", v.id);
            }
            (None, Some(error)) => {
                let err = result.unwrap_err();
                assert_eq!(err.as_encode().unwrap().to_string(), error, "{}", v.id);
                assert!(out.is_empty(), "{} produced output", v.id);
            }
            _ => panic!("vector {} must expect a line or an error", v.id),
        }
    }
}

#[test]
fn config_vectors_through_output_config() {
    for v in config_vectors() {
        let config = OutputConfig::text(v.config);
        let result = SegmentDataFormatter::from_config(Vec::new(), &config);
        match v.expected_error {
            None => assert!(result.is_ok(), "{}", v.id),
            Some(error) => match result {
                Err(BssError::Config(e)) => assert_eq!(e.to_string(), error, "{}", v.id),
                Err(e) => panic!("{}: unexpected error {e}", v.id),
                Ok(_) => panic!("{}: expected config error", v.id),
            },
        }
    }
}

#[test]
fn both_identifiers_never_build_a_formatter() {
    let config = OutputConfig::text(FormatConfig::new().with_fields(vec![
        SegmentField::SegId,
        SegmentField::SegCode,
        SegmentField::MemberId,
    ]));
    assert!(matches!(
        SegmentDataFormatter::from_config(Vec::new(), &config),
        Err(BssError::Config(ConfigError::ConflictingIdentifiers))
    ));
}

#[test]
fn csv_batch_with_custom_separators() {
    let users = users_from_csv(
        "
        UID,SegID
        12345,100
        12346,102
        ",
    );
    let format = FormatConfig::new()
        .with_separators([":", ";", ",", "#", "^"])
        .validate()
        .unwrap();
    assert_eq!(text(&users, format), "12345:100\n12346:102\n");
}

#[test]
fn csv_batch_full() {
    let users = users_from_csv(
        "
        UID,SegID,Expiration,Value
        12345,100,1440,123
        12346,101,1440,123
        ",
    );
    assert_eq!(
        text(&users, LineFormat::FULL),
        "12345:100:1440:123:0\n12346:101:1440:123:0\n"
    );
}

#[test]
fn batches_append_in_order() {
    let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::MINIMAL);
    formatter.append(&sample_users(2, &[1])).unwrap();
    formatter
        .append(&[UserRecord::new("9", vec![Segment::with_id(2)])])
        .unwrap();
    assert_eq!(formatter.records_written(), 3);
    let out = String::from_utf8(formatter.close().unwrap()).unwrap();
    assert_eq!(out, "100000:1\n100001:1\n9:2\n");
}

#[test]
fn error_keeps_earlier_lines_of_batch() {
    let users = vec![
        UserRecord::new("1", vec![Segment::with_code("a", 5)]),
        UserRecord::new("2", vec![Segment::with_code("", 5)]),
        UserRecord::new("3", vec![Segment::with_code("c", 5)]),
    ];
    let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::FULL_EXTERNAL);
    let err = formatter.append(&users).unwrap_err();
    assert!(matches!(
        err,
        BssError::Encode(EncodeError::EmptyCode {
            index: 0,
            list: SegmentList::Additions
        })
    ));

    // The caller may skip the bad record and continue.
    formatter.append(&users[2..]).unwrap();
    let out = String::from_utf8(formatter.close().unwrap()).unwrap();
    assert_eq!(out, "1:a:5:0:0:0\n3:c:5:0:0:0\n");
}

#[test]
fn text_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("segments.txt");
    let file = fs::File::create(&path).unwrap();

    let mut formatter = SegmentDataFormatter::text(file, LineFormat::FULL);
    formatter
        .append(&[UserRecord::new(
            "6d92078a-8246-4ba4-ae5b-76104861e7dc",
            vec![Segment::with_id(7).expiration(60)],
        )
        .with_domain(Domain::Aaid)])
        .unwrap();
    formatter.close().unwrap();

    let mut contents = String::new();
    fs::File::open(&path)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "6d92078a-8246-4ba4-ae5b-76104861e7dc:7:60:0:0^8\n");
}

#[test]
fn sink_errors_are_propagated() {
    let users = sample_users(1000, &[1, 2, 3]);
    let mut formatter = SegmentDataFormatter::text(FailingWriter::new(64), LineFormat::MINIMAL);
    // BufWriter may hold the failure until it flushes.
    let appended = formatter.append(&users);
    let closed = formatter.close();
    let err = appended.err().or(closed.err()).expect("sink failure surfaced");
    assert!(matches!(err, BssError::Io(_)), "unexpected error {err}");
}

#[test]
fn container_output_reads_back() {
    init_tracing();
    let users = users_from_csv(
        "
        UID,SegID,Expiration,Value
        12345,100,1440,123
        12346,101,1440,123
        ",
    );
    let mut formatter = SegmentDataFormatter::new(Vec::new(), DataFormat::Container, None).unwrap();
    formatter.append(&users).unwrap();
    let bytes = formatter.close().unwrap();

    let values: Vec<Value> = Reader::new(&bytes[..])
        .unwrap()
        .map(|v| v.unwrap())
        .collect();
    assert_eq!(values.len(), 2);

    let expected_first = Value::Record(vec![
        (
            "uid".to_string(),
            Value::Union(0, Box::new(Value::Long(12345))),
        ),
        (
            "segments".to_string(),
            Value::Array(vec![Value::Record(vec![
                ("id".to_string(), Value::Int(100)),
                ("code".to_string(), Value::String(String::new())),
                ("member_id".to_string(), Value::Int(0)),
                ("expiration".to_string(), Value::Int(1440)),
                ("timestamp".to_string(), Value::Long(0)),
                ("value".to_string(), Value::Int(123)),
            ])]),
        ),
    ]);
    assert_eq!(values[0], expected_first);
}

#[test]
fn container_rejects_bad_uid() {
    let mut formatter = SegmentDataFormatter::container(Vec::new()).unwrap();
    let err = formatter
        .append(&[UserRecord::new("0000-1111", vec![Segment::with_id(1)]).with_domain(Domain::Idfa)])
        .unwrap_err();
    assert!(matches!(
        err.as_encode(),
        Some(EncodeError::InvalidUid { .. })
    ));
}

#[test]
fn container_from_config() {
    let config: OutputConfig = serde_json::from_str(r#"{"format":"container"}"#).unwrap();
    let formatter = SegmentDataFormatter::from_config(Vec::new(), &config).unwrap();
    assert_eq!(formatter.format(), DataFormat::Container);
}
