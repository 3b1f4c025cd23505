// dbf - a library for reading and writing dBase database files.
// Copyright (C) 2026 The dbf authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! End-to-end tests over real files in temporary directories.

use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use futures::TryStreamExt;
use tempfile::TempDir;

use dbf::{
    CreateOptions, DbfFile, EncodingConfig, Error, FieldDescriptor, FieldType, FileVersion,
    ReadMode, ReaderOptions, Record, Value, Warning,
};

fn workdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn staff_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("AFCLPD", FieldType::Character, 2),
        FieldDescriptor::new("AFHRPW", FieldType::Numeric, 9).with_decimal_places(5),
        FieldDescriptor::new("AFLVCL", FieldType::Numeric, 2),
        FieldDescriptor::new("AFCRDA", FieldType::Date, 8),
        FieldDescriptor::new("AFPSDS", FieldType::Character, 10),
    ]
}

fn staff_record(code: &str, rate: f64, class: f64, created: NaiveDate) -> Record {
    Record::from_iter([
        ("AFCLPD", Value::from(code)),
        ("AFHRPW", Value::Number(rate)),
        ("AFLVCL", Value::Number(class)),
        ("AFCRDA", Value::Date(created)),
        ("AFPSDS", Value::Text(String::new())),
    ])
}

/// Builds a DBF byte image by hand, for shapes `create` refuses to make
/// (memo fields, odd versions).
fn raw_dbf(version: u8, fields: &[(&str, u8, u8)], records: &[Vec<u8>]) -> Vec<u8> {
    let record_length = 1 + fields.iter().map(|f| u16::from(f.2)).sum::<u16>();
    let header_length = 34 + 32 * fields.len() as u16;
    let mut bytes = vec![version, 114, 4, 14];
    bytes.extend_from_slice(&(records.len() as i32).to_le_bytes());
    bytes.extend_from_slice(&header_length.to_le_bytes());
    bytes.extend_from_slice(&record_length.to_le_bytes());
    bytes.extend_from_slice(&[0; 20]);
    for (name, type_code, size) in fields {
        let mut slot = [0u8; 11];
        slot[..name.len()].copy_from_slice(name.as_bytes());
        bytes.extend_from_slice(&slot);
        bytes.push(*type_code);
        bytes.extend_from_slice(&[0; 4]);
        bytes.push(*size);
        bytes.push(0);
        bytes.extend_from_slice(&[0; 14]);
    }
    bytes.push(0x0D);
    bytes.push(0);
    for record in records {
        assert_eq!(record.len(), record_length as usize);
        bytes.extend_from_slice(record);
    }
    bytes.push(0x1A);
    bytes
}

#[tokio::test]
async fn created_file_geometry() {
    let dir = workdir();
    let path = dir.path().join("staff.dbf");
    let file = DbfFile::create(&path, staff_fields()).await.unwrap();
    assert_eq!(file.record_count(), 0);
    assert_eq!(file.fields(), staff_fields());

    // header_length = 34 + 32·|fields|, then the EOF marker.
    let on_disk = fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), 34 + 32 * 5 + 1);
    assert_eq!(on_disk[0], 0x03);
    assert_eq!(*on_disk.last().unwrap(), 0x1A);
    let record_length = u16::from_le_bytes([on_disk[10], on_disk[11]]);
    assert_eq!(record_length, 1 + 2 + 9 + 2 + 8 + 10);
}

#[tokio::test]
async fn create_refuses_existing_file() {
    let dir = workdir();
    let path = dir.path().join("staff.dbf");
    DbfFile::create(&path, staff_fields()).await.unwrap();
    match DbfFile::create(&path, staff_fields()).await {
        Err(Error::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn create_refuses_memo_fields() {
    let dir = workdir();
    let fields = vec![
        FieldDescriptor::new("NAME", FieldType::Character, 10),
        FieldDescriptor::new("DESC", FieldType::Memo, 10),
    ];
    let err = DbfFile::create(dir.path().join("memo.dbf"), fields)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Writing to files with memo fields is not supported."
    );
}

#[tokio::test]
async fn append_and_read_back() {
    let dir = workdir();
    let path = dir.path().join("staff.dbf");
    let mut file = DbfFile::create(&path, staff_fields()).await.unwrap();
    let first_day = NaiveDate::from_ymd_opt(1999, 3, 25).unwrap();
    let records = vec![
        staff_record("W", 2.92308, 0.0, first_day),
        staff_record("W", 0.0, 3.0, NaiveDate::from_ymd_opt(1991, 4, 15).unwrap()),
    ];
    file.append_records(&records).await.unwrap();
    assert_eq!(file.record_count(), 2);

    // A fresh handle sees the updated header and the same data.
    let mut reopened = DbfFile::open(&path).await.unwrap();
    assert_eq!(reopened.record_count(), 2);
    assert_eq!(reopened.fields(), file.fields());
    let read = reopened.read_all_records().await.unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(read[0].text("AFCLPD"), Some("W"));
    assert_eq!(read[0].number("AFHRPW"), Some(2.92308));
    assert_eq!(read[0].number("AFLVCL"), Some(0.0));
    assert_eq!(read[0].date("AFCRDA"), Some(first_day));
    assert_eq!(read[0].text("AFPSDS"), Some(""));
    assert_eq!(read[1].number("AFHRPW"), Some(0.0));
    assert!(!read[0].is_deleted());

    // Appending again extends rather than clobbers.
    reopened
        .append_records(&[staff_record("X", 1.5, 1.0, first_day)])
        .await
        .unwrap();
    let mut third = DbfFile::open(&path).await.unwrap();
    assert_eq!(third.record_count(), 3);
    let all = third.read_all_records().await.unwrap();
    assert_eq!(all[2].text("AFCLPD"), Some("X"));
    let on_disk = fs::read(&path).unwrap();
    assert_eq!(*on_disk.last().unwrap(), 0x1A);
}

#[tokio::test]
async fn added_integer_field_round_trips() {
    let dir = workdir();
    let path = dir.path().join("copy.dbf");
    let mut fields = staff_fields();
    fields.push(FieldDescriptor::new("NO", FieldType::Integer, 4));
    let mut file = DbfFile::create(&path, fields).await.unwrap();
    let day = NaiveDate::from_ymd_opt(1999, 3, 25).unwrap();
    let records: Vec<Record> = (0..5)
        .map(|i| {
            let mut record = staff_record("W", 2.92308, 0.0, day);
            record.insert("NO", i);
            record
        })
        .collect();
    file.append_records(&records).await.unwrap();

    let mut reopened = DbfFile::open(&path).await.unwrap();
    let read = reopened.read_all_records().await.unwrap();
    assert_eq!(read.len(), 5);
    assert_eq!(read[0].integer("NO"), Some(0));
    assert_eq!(read[4].integer("NO"), Some(4));
    assert_eq!(read[0].text("AFCLPD"), Some("W"));
}

#[tokio::test]
async fn cursor_returns_disjoint_contiguous_slices() {
    let dir = workdir();
    let path = dir.path().join("cursor.dbf");
    let fields = vec![FieldDescriptor::new("NO", FieldType::Integer, 4)];
    let mut file = DbfFile::create(&path, fields).await.unwrap();
    let records: Vec<Record> = (0..10)
        .map(|i| Record::from_iter([("NO", Value::Integer(i))]))
        .collect();
    file.append_records(&records).await.unwrap();

    let mut reader = DbfFile::open(&path).await.unwrap();
    let first = reader.read_records(3).await.unwrap();
    let second = reader.read_records(4).await.unwrap();
    let rest = reader.read_all_records().await.unwrap();
    let numbers: Vec<i32> = first
        .iter()
        .chain(&second)
        .chain(&rest)
        .map(|r| r.integer("NO").unwrap())
        .collect();
    assert_eq!(numbers, (0..10).collect::<Vec<i32>>());
    assert!(reader.read_records(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn streaming_matches_batch_reads() {
    let dir = workdir();
    let path = dir.path().join("stream.dbf");
    let fields = vec![FieldDescriptor::new("NO", FieldType::Integer, 4)];
    let mut file = DbfFile::create(&path, fields).await.unwrap();
    let records: Vec<Record> = (0..250)
        .map(|i| Record::from_iter([("NO", Value::Integer(i))]))
        .collect();
    file.append_records(&records).await.unwrap();

    let mut reader = DbfFile::open(&path).await.unwrap();
    let streamed: Vec<Record> = reader.records().try_collect().await.unwrap();
    assert_eq!(streamed.len(), 250);
    assert_eq!(streamed[249].integer("NO"), Some(249));
}

#[tokio::test]
async fn deleted_records_are_filtered_or_flagged() {
    let dir = workdir();
    let path = dir.path().join("del.dbf");
    let fields = vec![FieldDescriptor::new("NO", FieldType::Integer, 4)];
    let mut file = DbfFile::create(&path, fields).await.unwrap();
    let records: Vec<Record> = (0..3)
        .map(|i| Record::from_iter([("NO", Value::Integer(i))]))
        .collect();
    file.append_records(&records).await.unwrap();

    // Flag the middle record deleted, directly in the file.
    let header_length = 34 + 32;
    let record_length = 5;
    let mut bytes = fs::read(&path).unwrap();
    bytes[header_length + record_length] = 0x2A;
    fs::write(&path, bytes).unwrap();

    let mut live_only = DbfFile::open(&path).await.unwrap();
    assert_eq!(live_only.record_count(), 3);
    let live = live_only.read_all_records().await.unwrap();
    assert_eq!(live.len(), 2);
    assert_eq!(live[1].integer("NO"), Some(2));

    let mut with_deleted = ReaderOptions::new()
        .with_include_deleted(true)
        .open(&path)
        .await
        .unwrap();
    let all = with_deleted.read_all_records().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[1].is_deleted());
    assert!(!all[0].is_deleted());
}

#[tokio::test]
async fn unknown_version_strict_and_loose() {
    let dir = workdir();
    let path = dir.path().join("dbase_31.dbf");
    let record = {
        let mut frame = vec![0x20];
        frame.extend_from_slice(&1i32.to_le_bytes());
        frame.extend_from_slice(b"Chai");
        frame.resize(frame.len() + 36, b' ');
        frame.extend_from_slice(b"   10");
        frame.push(b'F');
        frame
    };
    let bytes = raw_dbf(
        0x31,
        &[
            ("PRODUCTID", b'I', 4),
            ("PRODUCTNAM", b'C', 40),
            ("REORDERLEV", b'N', 5),
            ("DISCONTINU", b'L', 1),
        ],
        &[record],
    );
    fs::write(&path, bytes).unwrap();

    match DbfFile::open(&path).await {
        Err(Error::UnsupportedVersion(0x31)) => (),
        other => panic!("unexpected result: {other:?}"),
    }

    let mut warnings = Vec::new();
    let mut file = ReaderOptions::new()
        .with_read_mode(ReadMode::Loose)
        .open_with_warnings(&path, |w| warnings.push(w))
        .await
        .unwrap();
    assert!(matches!(warnings.as_slice(), [Warning::UnknownVersion(0x31)]));
    assert_eq!(file.record_count(), 1);
    assert_eq!(file.file_version(), FileVersion::Unknown(0x31));
    let records = file.read_all_records().await.unwrap();
    assert_eq!(records[0].integer("PRODUCTID"), Some(1));
    assert_eq!(records[0].text("PRODUCTNAM"), Some("Chai"));
    assert_eq!(records[0].number("REORDERLEV"), Some(10.0));
    assert_eq!(records[0].boolean("DISCONTINU"), Some(false));
}

#[tokio::test]
async fn duplicate_field_names_are_fatal() {
    let dir = workdir();
    let path = dir.path().join("dbase_03.dbf");
    let bytes = raw_dbf(
        0x03,
        &[("Point_ID", b'C', 12), ("Point_ID", b'C', 12)],
        &[],
    );
    fs::write(&path, bytes).unwrap();
    let err = DbfFile::open(&path).await.unwrap_err();
    assert_eq!(err.to_string(), "Duplicate field name: 'Point_ID'");
}

fn petits_fours_text() -> String {
    let mut text = String::new();
    for _ in 0..40 {
        text.push_str("Petits fours, mille-feuille,\r\nmacarons et madeleines.\r\n");
    }
    text
}

/// A `0x83` main file with one record pointing at memo block 1, plus the
/// matching `.dbt` built from `text`.
fn dbase3_memo_pair(text: &str) -> (Vec<u8>, Vec<u8>) {
    let mut record = vec![0x20];
    record.extend_from_slice(b"pastry    ");
    record.extend_from_slice(b"         1");
    let main = raw_dbf(0x83, &[("NAME", b'C', 10), ("DESC", b'M', 10)], &[record]);

    let mut memo = vec![0; 512];
    memo.extend_from_slice(text.as_bytes());
    memo.push(0x1A);
    let padded = memo.len().div_ceil(512) * 512;
    memo.resize(padded, 0);
    (main, memo)
}

#[tokio::test]
async fn dbase3_memo_spans_blocks() {
    let dir = workdir();
    let path = dir.path().join("dbase_83.dbf");
    let text = petits_fours_text();
    assert!(text.len() > 1024);
    let (main, memo) = dbase3_memo_pair(&text);
    fs::write(&path, main).unwrap();
    fs::write(dir.path().join("dbase_83.dbt"), memo).unwrap();

    let mut file = DbfFile::open(&path).await.unwrap();
    let records = file.read_all_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text("NAME"), Some("pastry"));
    assert_eq!(records[0].text("DESC"), Some(text.as_str()));
}

#[tokio::test]
async fn missing_memo_file_strict_and_loose() {
    let dir = workdir();
    let path = dir.path().join("orphan.dbf");
    let (main, _memo) = dbase3_memo_pair("never written");
    fs::write(&path, main).unwrap();

    match DbfFile::open(&path).await {
        Err(Error::MissingMemoFile(memo_path)) => {
            assert_eq!(memo_path, dir.path().join("orphan.dbt"))
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let mut warnings = Vec::new();
    let mut file = ReaderOptions::new()
        .with_read_mode(ReadMode::Loose)
        .open_with_warnings(&path, |w| warnings.push(w))
        .await
        .unwrap();
    assert!(matches!(warnings.as_slice(), [Warning::MissingMemoFile(_)]));
    let records = file.read_all_records().await.unwrap();
    assert_eq!(records[0].get("DESC"), Some(&Value::Null));
}

#[tokio::test]
async fn uppercase_memo_extension_is_found() {
    let dir = workdir();
    let path = dir.path().join("upper.dbf");
    let text = "shouting";
    let (main, memo) = dbase3_memo_pair(text);
    fs::write(&path, main).unwrap();
    fs::write(dir.path().join("upper.DBT"), memo).unwrap();

    // Only meaningful on case-sensitive filesystems, but harmless anywhere.
    if !dir.path().join("upper.dbt").exists() {
        let mut file = DbfFile::open(&path).await.unwrap();
        let records = file.read_all_records().await.unwrap();
        assert_eq!(records[0].text("DESC"), Some(text));
    }
}

#[tokio::test]
async fn dbase4_memo_length_framing() {
    let dir = workdir();
    let path = dir.path().join("dbase_8b.dbf");
    let mut record = vec![0x20];
    record.extend_from_slice(b"         1");
    let main = raw_dbf(0x8B, &[("NOTES", b'M', 10)], &[record]);
    fs::write(&path, main).unwrap();

    let text = "y".repeat(200);
    let mut memo = vec![0; 128];
    memo[4..8].copy_from_slice(&128i32.to_le_bytes());
    memo.extend_from_slice(&[0xFF, 0xFF, 0x08, 0x00]);
    memo.extend_from_slice(&(8 + text.len() as u32).to_le_bytes());
    memo.extend_from_slice(text.as_bytes());
    // Trailing garbage past the declared length must not leak in.
    memo.extend_from_slice(b"GARBAGE");
    let padded = memo.len().div_ceil(128) * 128;
    memo.resize(padded, 0);
    fs::write(dir.path().join("dbase_8b.dbt"), memo).unwrap();

    let mut file = DbfFile::open(&path).await.unwrap();
    let records = file.read_all_records().await.unwrap();
    assert_eq!(records[0].text("NOTES"), Some(text.as_str()));
}

#[tokio::test]
async fn vfp9_memo_and_scalars() {
    let dir = workdir();
    let path = dir.path().join("vfp9_30.dbf");
    let datetime = Utc.with_ymd_and_hms(2013, 12, 12, 8, 30, 0).unwrap();
    let mut record = vec![0x20];
    record.extend_from_slice(&1i32.to_le_bytes());
    record.extend_from_slice(&2_456_639i32.to_le_bytes());
    record.extend_from_slice(&30_600_000i32.to_le_bytes());
    record.extend_from_slice(b"         17000000000");
    record.extend_from_slice(&2500.55f64.to_le_bytes());
    record.push(b'T');
    let main = raw_dbf(
        0x30,
        &[
            ("FIELD2", b'M', 4),
            ("FIELD3", b'T', 8),
            ("FIELD4", b'N', 20),
            ("FIELD5", b'B', 8),
            ("FIELD6", b'L', 1),
        ],
        &[record],
    );
    fs::write(&path, main).unwrap();

    let text = "memo held in an fpt";
    let mut memo = vec![0; 64];
    memo[6..8].copy_from_slice(&64u16.to_be_bytes());
    memo.extend_from_slice(&1u32.to_be_bytes());
    memo.extend_from_slice(&(text.len() as u32).to_be_bytes());
    memo.extend_from_slice(text.as_bytes());
    let padded = memo.len().div_ceil(64) * 64;
    memo.resize(padded, 0);
    fs::write(dir.path().join("vfp9_30.fpt"), memo).unwrap();

    let mut file = DbfFile::open(&path).await.unwrap();
    assert_eq!(file.file_version(), FileVersion::VisualFoxPro9);
    let records = file.read_all_records().await.unwrap();
    assert_eq!(records[0].text("FIELD2"), Some(text));
    assert_eq!(records[0].datetime("FIELD3"), Some(datetime));
    // Too wide for an I field; it lives in an N field as a number.
    assert_eq!(records[0].number("FIELD4"), Some(17_000_000_000.0));
    assert_eq!(records[0].get("FIELD5"), Some(&Value::Double(2500.55)));
    assert_eq!(records[0].boolean("FIELD6"), Some(true));
}

#[tokio::test]
async fn vfp_datetime_written_on_disk_as_julian_pair() {
    let dir = workdir();
    let path = dir.path().join("stamps.dbf");
    let fields = vec![FieldDescriptor::new("STAMP", FieldType::DateTime, 8)];
    let mut file = CreateOptions::new()
        .with_file_version(FileVersion::VisualFoxPro9)
        .create(&path, fields)
        .await
        .unwrap();
    let datetime = Utc.with_ymd_and_hms(2013, 12, 12, 8, 30, 0).unwrap();
    file.append_records(&[Record::from_iter([("STAMP", Value::DateTime(datetime))])])
        .await
        .unwrap();

    let on_disk = fs::read(&path).unwrap();
    let record_start = 34 + 32;
    assert_eq!(
        &on_disk[record_start + 1..record_start + 5],
        2_456_639i32.to_le_bytes()
    );
    assert_eq!(
        &on_disk[record_start + 5..record_start + 9],
        30_600_000i32.to_le_bytes()
    );

    let mut reopened = ReaderOptions::new()
        .with_read_mode(ReadMode::Loose)
        .open(&path)
        .await
        .unwrap();
    let records = reopened.read_all_records().await.unwrap();
    assert_eq!(records[0].datetime("STAMP"), Some(datetime));
}

#[tokio::test]
async fn per_field_encoding_round_trip() {
    let dir = workdir();
    let path = dir.path().join("wspmst.dbf");
    let encoding = EncodingConfig::new("tis-620").with_field("PNAME", "latin1");
    let fields = vec![
        FieldDescriptor::new("DISPNAME", FieldType::Character, 40),
        FieldDescriptor::new("PNAME", FieldType::Character, 20),
    ];
    let mut file = CreateOptions::new()
        .with_encoding(encoding.clone())
        .create(&path, fields)
        .await
        .unwrap();
    let record = Record::from_iter([
        ("DISPNAME", Value::from("รองเท้าบุรุษ")),
        ("PNAME", Value::from("ÃÍ§à·éÒ CASUAL")),
    ]);
    file.append_records(&[record]).await.unwrap();

    let mut reopened = ReaderOptions::new()
        .with_encoding(encoding)
        .open(&path)
        .await
        .unwrap();
    let records = reopened.read_all_records().await.unwrap();
    assert_eq!(records[0].text("DISPNAME"), Some("รองเท้าบุรุษ"));
    assert_eq!(records[0].text("PNAME"), Some("ÃÍ§à·éÒ CASUAL"));

    // The Thai field really is single-byte TIS-620 on disk.
    let on_disk = fs::read(&path).unwrap();
    let record_start = 34 + 32 * 2;
    assert_eq!(on_disk[record_start + 1], 0xC3);
}

#[tokio::test]
async fn append_reports_offending_field_names() {
    let dir = workdir();
    let path = dir.path().join("staff.dbf");
    let mut file = DbfFile::create(&path, staff_fields()).await.unwrap();

    let bad_text = Record::from_iter([("AFCLPD", Value::Number(1.0))]);
    let err = file.append_records(&[bad_text]).await.unwrap_err();
    assert_eq!(err.to_string(), "AFCLPD: expected a string");

    let bad_number = Record::from_iter([("AFHRPW", Value::from("fast"))]);
    let err = file.append_records(&[bad_number]).await.unwrap_err();
    assert_eq!(err.to_string(), "AFHRPW: expected a number");

    let bad_date = Record::from_iter([("AFCRDA", Value::Boolean(true))]);
    let err = file.append_records(&[bad_date]).await.unwrap_err();
    assert_eq!(err.to_string(), "AFCRDA: expected a date");

    // Nothing was appended by the failed calls.
    assert_eq!(file.record_count(), 0);
    let mut reopened = DbfFile::open(&path).await.unwrap();
    assert_eq!(reopened.record_count(), 0);
    assert!(reopened.read_all_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn open_is_idempotent() {
    let dir = workdir();
    let path = dir.path().join("staff.dbf");
    let mut file = DbfFile::create(&path, staff_fields()).await.unwrap();
    file.append_records(&[staff_record(
        "W",
        1.0,
        0.0,
        NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
    )])
    .await
    .unwrap();

    let first = DbfFile::open(&path).await.unwrap();
    let second = DbfFile::open(&path).await.unwrap();
    assert_eq!(first.fields(), second.fields());
    assert_eq!(first.record_count(), second.record_count());
    assert_eq!(first.date_of_last_update(), second.date_of_last_update());
    assert_eq!(first.path(), path);
}

#[tokio::test]
async fn nulls_round_trip_as_blank_forms() {
    let dir = workdir();
    let path = dir.path().join("blanks.dbf");
    let fields = vec![
        FieldDescriptor::new("C1", FieldType::Character, 4),
        FieldDescriptor::new("N1", FieldType::Numeric, 6),
        FieldDescriptor::new("L1", FieldType::Logical, 1),
        FieldDescriptor::new("D1", FieldType::Date, 8),
    ];
    let mut file = DbfFile::create(&path, fields).await.unwrap();
    // An entirely empty record encodes every field as its blank form.
    file.append_records(&[Record::new()]).await.unwrap();

    let mut reopened = DbfFile::open(&path).await.unwrap();
    let records = reopened.read_all_records().await.unwrap();
    assert_eq!(records[0].text("C1"), Some(""));
    assert_eq!(records[0].get("N1"), Some(&Value::Null));
    assert_eq!(records[0].get("L1"), Some(&Value::Null));
    assert_eq!(records[0].get("D1"), Some(&Value::Null));
}
