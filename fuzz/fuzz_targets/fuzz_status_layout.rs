#![no_main]
use libfuzzer_sys::fuzz_target;
use parafmt::fmt::{LayoutValues, StatusLayout};

fuzz_target!(|data: &str| {
    // Must not panic on any layout string
    let layout = StatusLayout::parse(data);
    let _ = layout.render(&LayoutValues {
        timestamp: "2025-01-01T00:00:00.000+0000",
        level: "INFO ",
        scope: "FUZZ",
        msg: "test",
    });
});
