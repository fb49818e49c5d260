//! Domain layer tests
//!
//! Entities, the archive writer, checksums, the CSV/JSON transcoders and
//! the raster planning rules.

use proptest::prelude::*;
use rstest::*;
use serde_json::{Map, Value, json};
use std::io::{Cursor, Read};
use zip4::domain::entities::{
    FormatClass, InputFile, OutputFormat, RasterFormat, TargetCeiling,
};
use zip4::domain::services::archive::LOCAL_HEADER_SIGNATURE;
use zip4::domain::services::catalog::ceilings_for_size;
use zip4::domain::services::classifier::classify_parts;
use zip4::domain::services::crc32::Crc32;
use zip4::domain::services::{
    TranscodeError, base_name, build_archive, checksum_hex, crc32, csv_from_json, fit_within,
    json_from_csv, json_minify, json_pretty, output_file_name, text_encode,
};

const MIB: u64 = 1024 * 1024;

// ============================================================================
// Classifier Tests
// ============================================================================

#[rstest]
#[case("photo.png", "image/png", FormatClass::Image)]
#[case("photo", "image/jpeg", FormatClass::Image)]
#[case("scan.TIFF", "", FormatClass::Image)]
#[case("vector.svg", "application/octet-stream", FormatClass::Image)]
#[case("data.json", "application/json", FormatClass::Json)]
#[case("data.json", "", FormatClass::Json)]
#[case("table.csv", "text/csv; charset=utf-8", FormatClass::Csv)]
#[case("table.CSV", "", FormatClass::Csv)]
#[case("notes.md", "", FormatClass::Text)]
#[case("server.log", "", FormatClass::Text)]
#[case("anything", "text/html", FormatClass::Text)]
#[case("report.pdf", "application/pdf", FormatClass::Generic)]
#[case("blob", "", FormatClass::Generic)]
fn test_classify(#[case] name: &str, #[case] media_type: &str, #[case] expected: FormatClass) {
    assert_eq!(classify_parts(name, media_type), expected);
}

#[rstest]
fn test_image_takes_precedence_over_suffix() {
    assert_eq!(classify_parts("data.json", "image/png"), FormatClass::Image);
    assert_eq!(classify_parts("table.csv", "application/json"), FormatClass::Json);
}

#[rstest]
#[case(FormatClass::Json, true)]
#[case(FormatClass::Csv, true)]
#[case(FormatClass::Text, true)]
#[case(FormatClass::Image, false)]
#[case(FormatClass::Generic, false)]
fn test_text_eligibility(#[case] class: FormatClass, #[case] eligible: bool) {
    assert_eq!(class.is_text_eligible(), eligible);
}

// ============================================================================
// OutputFormat / TargetCeiling Tests
// ============================================================================

#[rstest]
#[case("zip", OutputFormat::Archive)]
#[case("application/zip", OutputFormat::Archive)]
#[case("SHA256", OutputFormat::Checksum)]
#[case("base64", OutputFormat::TextEncoding)]
#[case("jpg", OutputFormat::Raster(RasterFormat::Jpeg))]
#[case("image/webp", OutputFormat::Raster(RasterFormat::WebP))]
#[case("tif", OutputFormat::Raster(RasterFormat::Tiff))]
#[case("json-pretty", OutputFormat::JsonPretty)]
#[case("csv", OutputFormat::CsvFromJson)]
#[case("json", OutputFormat::JsonFromCsv)]
fn test_output_format_parse(#[case] input: &str, #[case] expected: OutputFormat) {
    assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
}

#[rstest]
fn test_output_format_id_roundtrip() {
    let all = [
        OutputFormat::Archive,
        OutputFormat::TextEncoding,
        OutputFormat::Checksum,
        OutputFormat::PlainText,
        OutputFormat::JsonPretty,
        OutputFormat::JsonMinify,
        OutputFormat::CsvFromJson,
        OutputFormat::JsonFromCsv,
    ]
    .into_iter()
    .chain(RasterFormat::ALL.into_iter().map(OutputFormat::Raster));

    for format in all {
        assert_eq!(format.id().parse::<OutputFormat>().unwrap(), format);
    }
}

#[rstest]
fn test_unknown_format_rejected() {
    assert!("docx".parse::<OutputFormat>().is_err());
}

#[rstest]
#[case("≤2MB", TargetCeiling::Mb2)]
#[case("<=5MB", TargetCeiling::Mb5)]
#[case("7mb", TargetCeiling::Mb7)]
#[case("2", TargetCeiling::Mb2)]
fn test_ceiling_parse(#[case] input: &str, #[case] expected: TargetCeiling) {
    assert_eq!(input.parse::<TargetCeiling>().unwrap(), expected);
}

#[rstest]
#[case(TargetCeiling::Mb2, 2 * MIB, "≤2MB")]
#[case(TargetCeiling::Mb5, 5 * MIB, "≤5MB")]
#[case(TargetCeiling::Mb7, 7 * MIB, "≤7MB")]
fn test_ceiling_bytes(#[case] ceiling: TargetCeiling, #[case] bytes: u64, #[case] label: &str) {
    assert_eq!(ceiling.bytes(), bytes);
    assert_eq!(ceiling.label(), label);
}

// ============================================================================
// Ceiling Menu Tests
// ============================================================================

#[rstest]
#[case(12 * MIB, vec![TargetCeiling::Mb7, TargetCeiling::Mb5])]
#[case(6 * MIB, vec![TargetCeiling::Mb2])]
#[case(MIB, vec![])]
fn test_ceiling_menu(#[case] size: u64, #[case] expected: Vec<TargetCeiling>) {
    for lossy in [RasterFormat::Jpeg, RasterFormat::WebP, RasterFormat::Avif] {
        assert_eq!(ceilings_for_size(size, OutputFormat::Raster(lossy)), expected);
    }
}

#[rstest]
#[case(OutputFormat::Raster(RasterFormat::Png))]
#[case(OutputFormat::Raster(RasterFormat::Gif))]
#[case(OutputFormat::Archive)]
#[case(OutputFormat::JsonPretty)]
fn test_no_ceilings_for_lossless(#[case] format: OutputFormat) {
    assert!(ceilings_for_size(12 * MIB, format).is_empty());
}

// ============================================================================
// Naming Tests
// ============================================================================

#[rstest]
#[case("holiday.jpeg", OutputFormat::Archive, "holiday.zip")]
#[case("holiday.jpeg", OutputFormat::Checksum, "holiday.sha256.txt")]
#[case("holiday.jpeg", OutputFormat::TextEncoding, "holiday.base64.txt")]
#[case("holiday.png", OutputFormat::Raster(RasterFormat::Jpeg), "holiday.jpg")]
#[case("scan.bmp", OutputFormat::Raster(RasterFormat::Tiff), "scan.tiff")]
#[case("data.json", OutputFormat::JsonPretty, "data.pretty.json")]
#[case("data.json", OutputFormat::JsonMinify, "data.min.json")]
#[case("data.json", OutputFormat::CsvFromJson, "data.csv")]
#[case("table.csv", OutputFormat::JsonFromCsv, "table.json")]
#[case("Makefile", OutputFormat::Archive, "Makefile.zip")]
#[case(".bashrc", OutputFormat::Checksum, ".bashrc.sha256.txt")]
fn test_output_file_name(
    #[case] input: &str,
    #[case] format: OutputFormat,
    #[case] expected: &str,
) {
    assert_eq!(output_file_name(input, format), expected);
}

#[rstest]
fn test_base_name_keeps_dotted_directories() {
    assert_eq!(base_name("release.v2/notes"), "release.v2/notes");
    assert_eq!(base_name("trailing."), "trailing.");
}

// ============================================================================
// InputFile Tests
// ============================================================================

#[rstest]
#[case(0, "0 bytes")]
#[case(1023, "1023 bytes")]
#[case(1024, "1.00 KB")]
#[case(1024 * 1024 * 3 / 2, "1.50 MB")]
fn test_input_size_human(#[case] size: usize, #[case] expected: &str) {
    let file = InputFile::from_bytes("x.bin", "", vec![0u8; size]);
    assert_eq!(file.size() as usize, size);
    assert_eq!(file.size_human(), expected);
}

// ============================================================================
// CRC-32 Tests
// ============================================================================

#[rstest]
#[case(b"", 0x0000_0000)]
#[case(b"a", 0xE8B7_BE43)]
#[case(b"123456789", 0xCBF4_3926)]
#[case(b"The quick brown fox jumps over the lazy dog", 0x414F_A339)]
fn test_crc32_known_values(#[case] data: &[u8], #[case] expected: u32) {
    assert_eq!(crc32(data), expected);
}

#[rstest]
fn test_crc32_incremental_matches_one_shot() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 251) as u8).collect();
    let mut crc = Crc32::new();
    for piece in data.chunks(777) {
        crc.update(piece);
    }
    assert_eq!(crc.finalize(), crc32(&data));
}

// ============================================================================
// Archive Tests
// ============================================================================

fn read_single_entry(archive: &[u8]) -> (String, Vec<u8>, zip::CompressionMethod, u32) {
    let mut reader = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(reader.len(), 1);
    let mut entry = reader.by_index(0).unwrap();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    (
        entry.name().to_string(),
        content,
        entry.compression(),
        entry.crc32(),
    )
}

#[rstest]
fn test_archive_starts_with_local_signature() {
    let archive = build_archive("notes.txt", b"hello").unwrap();
    assert_eq!(&archive[..4], b"PK\x03\x04");
    assert_eq!(
        u32::from_le_bytes(archive[..4].try_into().unwrap()),
        LOCAL_HEADER_SIGNATURE
    );
}

#[rstest]
fn test_archive_readable_by_zip_reader() {
    let archive = build_archive("notes.txt", b"hello world").unwrap();
    let (name, content, method, crc) = read_single_entry(&archive);
    assert_eq!(name, "notes.txt");
    assert_eq!(content, b"hello world");
    assert_eq!(method, zip::CompressionMethod::Stored);
    assert_eq!(crc, crc32fast::hash(b"hello world"));
}

#[rstest]
fn test_archive_of_empty_content() {
    let archive = build_archive("empty.bin", b"").unwrap();
    let (name, content, _, crc) = read_single_entry(&archive);
    assert_eq!(name, "empty.bin");
    assert!(content.is_empty());
    assert_eq!(crc, 0);
}

#[rstest]
fn test_archive_rejects_empty_name() {
    assert!(build_archive("", b"data").is_err());
}

// ============================================================================
// Digest Tests
// ============================================================================

#[rstest]
fn test_checksum_is_lowercase_hex() {
    let hex = checksum_hex(b"abc");
    assert_eq!(
        hex,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hex.len(), 64);
}

#[rstest]
#[case(b"", "")]
#[case(b"f", "Zg==")]
#[case(b"fo", "Zm8=")]
#[case(b"foo", "Zm9v")]
#[case(b"foobar", "Zm9vYmFy")]
fn test_text_encode_vectors(#[case] data: &[u8], #[case] expected: &str) {
    assert_eq!(text_encode(data, 3), expected);
    assert_eq!(text_encode(data, 48 * 1024), expected);
}

// ============================================================================
// Structured Text Tests
// ============================================================================

#[rstest]
fn test_csv_to_json_scenario() {
    let out = json_from_csv(b"name,age\nAnn,30\nBo,\"25,5\"").unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        json!([{"name": "Ann", "age": "30"}, {"name": "Bo", "age": "25,5"}])
    );
}

#[rstest]
fn test_csv_to_json_preserves_header_order() {
    let out = json_from_csv(b"z,a\n1,2\n").unwrap();
    assert!(out.find("\"z\"").unwrap() < out.find("\"a\"").unwrap());
}

#[rstest]
fn test_csv_ragged_rows() {
    let out = json_from_csv(b"a,b,c\n1\n1,2,3,4\n").unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        json!([{"a": "1", "b": "", "c": ""}, {"a": "1", "b": "2", "c": "3"}])
    );
}

#[rstest]
fn test_csv_crlf_and_bom() {
    let out = json_from_csv("\u{FEFF}id,name\r\n1,\"x\r\ny\"\r\n".as_bytes()).unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value, json!([{"id": "1", "name": "x\r\ny"}]));
}

#[rstest]
fn test_csv_empty_input() {
    assert_eq!(json_from_csv(b"").unwrap(), "[]");
}

#[rstest]
fn test_json_to_csv_key_union() {
    let out = csv_from_json(br#"[{"a":1,"b":"x"},{"c":null,"a":true}]"#).unwrap();
    assert_eq!(out, "a,b,c\n1,x,\ntrue,,\n");
}

#[rstest]
fn test_json_to_csv_escapes_cells() {
    let out = csv_from_json(br#"[{"text":"say \"hi\", then\nleave","n":[1,2]}]"#).unwrap();
    assert_eq!(out, "text,n\n\"say \"\"hi\"\", then\nleave\",\"[1,2]\"\n");
}

#[rstest]
fn test_json_to_csv_single_object() {
    assert_eq!(csv_from_json(br#"{"k":"v"}"#).unwrap(), "k\nv\n");
}

#[rstest]
#[case(br#"[1,2]"#.as_slice())]
#[case(br#""text""#.as_slice())]
#[case(b"{not json".as_slice())]
fn test_json_to_csv_rejects_non_objects(#[case] input: &[u8]) {
    assert!(csv_from_json(input).is_err());
}

#[rstest]
fn test_json_pretty_and_minify() {
    let input = br#"{ "b" : [1, 2], "a": {"c": null} }"#;
    assert_eq!(json_minify(input).unwrap(), r#"{"b":[1,2],"a":{"c":null}}"#);
    assert_eq!(
        json_pretty(input).unwrap(),
        "{\n  \"b\": [\n    1,\n    2\n  ],\n  \"a\": {\n    \"c\": null\n  }\n}"
    );
    assert!(json_pretty(b"[1,").is_err());
}

#[rstest]
#[case::pretty(json_pretty, "{\n  \"k\": \"v\"\n}")]
#[case::minify(json_minify, r#"{"k":"v"}"#)]
#[case::to_csv(csv_from_json, "k\nv\n")]
fn test_json_with_bom(
    #[case] transcode: fn(&[u8]) -> Result<String, TranscodeError>,
    #[case] expected: &str,
) {
    let input = "\u{FEFF}{ \"k\": \"v\" }";
    assert_eq!(transcode(input.as_bytes()).unwrap(), expected);
}

// ============================================================================
// Raster Planning Tests
// ============================================================================

#[rstest]
#[case(4000, 3000, Some(1000), (1000, 750))]
#[case(3000, 4000, Some(1000), (750, 1000))]
#[case(800, 600, Some(1000), (800, 600))]
#[case(800, 600, None, (800, 600))]
#[case(10_000, 1, Some(100), (100, 1))]
#[case(1001, 1000, Some(1000), (1000, 999))]
fn test_fit_within(
    #[case] width: u32,
    #[case] height: u32,
    #[case] max: Option<u32>,
    #[case] expected: (u32, u32),
) {
    assert_eq!(fit_within(width, height, max), expected);
}

// ============================================================================
// Property Tests
// ============================================================================

fn cell() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(','),
            Just('"'),
            Just('\n'),
            Just('\r'),
            Just(' '),
            prop::char::range('a', 'z'),
            prop::char::range('0', '9'),
            Just('é'),
        ],
        0..8,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn records() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    prop::collection::btree_set("[a-z]{1,6}", 1..5).prop_flat_map(|keys| {
        let keys: Vec<String> = keys.into_iter().collect();
        let width = keys.len();
        (
            Just(keys),
            prop::collection::vec(prop::collection::vec(cell(), width), 1..6),
        )
    })
}

proptest! {
    #[test]
    fn prop_crc32_matches_reference(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(crc32(&data), crc32fast::hash(&data));
    }

    #[test]
    fn prop_archive_roundtrip(
        name in "[A-Za-z0-9_]{1,24}\\.[a-z]{1,4}",
        content in prop::collection::vec(any::<u8>(), 0..8192),
    ) {
        let archive = build_archive(&name, &content).unwrap();
        let (read_name, read_content, method, crc) = read_single_entry(&archive);
        prop_assert_eq!(read_name, name);
        prop_assert_eq!(read_content, content.clone());
        prop_assert_eq!(method, zip::CompressionMethod::Stored);
        prop_assert_eq!(crc, crc32fast::hash(&content));
    }

    #[test]
    fn prop_text_encode_chunking_is_invisible(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        chunk in 1usize..300,
    ) {
        prop_assert_eq!(text_encode(&data, chunk), text_encode(&data, usize::MAX - 2));
    }

    #[test]
    fn prop_json_csv_json_roundtrip((keys, rows) in records()) {
        let objects: Vec<Value> = rows
            .iter()
            .map(|row| {
                let map: Map<String, Value> = keys
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(Value::String))
                    .collect();
                Value::Object(map)
            })
            .collect();
        let input = serde_json::to_vec(&Value::Array(objects.clone())).unwrap();

        let csv = csv_from_json(&input).unwrap();
        let back: Value = serde_json::from_str(&json_from_csv(csv.as_bytes()).unwrap()).unwrap();
        prop_assert_eq!(back, Value::Array(objects));
    }

    #[test]
    fn prop_fit_within_never_upscales(
        width in 1u32..20_000,
        height in 1u32..20_000,
        max in 1u32..8_000,
    ) {
        let (w, h) = fit_within(width, height, Some(max));
        prop_assert!(w >= 1 && h >= 1);
        prop_assert!(w <= width && h <= height);
        prop_assert!(w.max(h) <= max.max(1) || width.max(height) <= max);
        if width.max(height) > max {
            prop_assert_eq!(w.max(h), max);
        } else {
            prop_assert_eq!((w, h), (width, height));
        }
    }
}
