#![no_main]

use libfuzzer_sys::fuzz_target;

use zip4::domain::services::{csv_from_json, json_minify, json_pretty};

// Arbitrary input must yield a value or an error, never a panic. Pretty and
// minified forms of the same document must parse to the same value.
fuzz_target!(|data: &[u8]| {
    let _ = csv_from_json(data);

    if let (Ok(pretty), Ok(minified)) = (json_pretty(data), json_minify(data)) {
        let a: serde_json::Value = serde_json::from_str(&pretty).expect("pretty output parses");
        let b: serde_json::Value = serde_json::from_str(&minified).expect("minified output parses");
        assert_eq!(a, b);
    }
});
