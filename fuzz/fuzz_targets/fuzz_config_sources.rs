#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Must not panic on any config content
    let (sources, remaining) = parafmt::config::extract_sources(data);
    for source in &sources {
        assert!(!source.is_empty());
    }
    let _ = parafmt::Config::from_toml(&remaining);
});
