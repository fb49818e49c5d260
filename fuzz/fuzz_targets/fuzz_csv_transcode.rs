#![no_main]

use libfuzzer_sys::fuzz_target;

use zip4::domain::services::json_from_csv;
use zip4::domain::services::structured_text::parse_csv;

// CSV parsing never fails, and its JSON output always parses back as an
// array with one object per data row.
fuzz_target!(|data: &[u8]| {
    let json = json_from_csv(data).expect("csv transcoding is infallible");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output is valid JSON");
    let rows = value.as_array().expect("output is an array");

    let text = String::from_utf8_lossy(data);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    let parsed = parse_csv(text);
    assert_eq!(rows.len(), parsed.len().saturating_sub(1));
});
