#![no_main]

//! Fuzz target for the injection directive grammar
//!
//! Any accepted directive must start with the keyword and produce a
//! non-empty type name.

use libfuzzer_sys::fuzz_target;
use named_injector::annotation::parse;

fuzz_target!(|input: (&str, &str)| {
    let (member, directive) = input;

    if let Some(request) = parse(member, directive) {
        assert!(directive.starts_with("inject"));
        assert!(!request.type_name.is_empty() || member.is_empty());
        if let Some(name) = &request.name {
            assert!(!name.is_empty());
            assert!(!name.contains('"'));
        }
    }
});
