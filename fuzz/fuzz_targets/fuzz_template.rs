#![no_main]
use libfuzzer_sys::fuzz_target;
use parafmt::fmt::{self, Placeholders};
use parafmt::{Arg, Message, ReusableMessage};

fuzz_target!(|data: &str| {
    // Must not panic on any template string
    let mut placeholders = Placeholders::new();
    let scan = placeholders.rescan(data);
    assert_eq!(scan.count, fmt::count_placeholders(data));

    // Unique markers show exactly how many arguments substitution consumed
    let args: Vec<Arg> = (0..scan.count + 1)
        .map(|i| Arg::from(format!("\u{1}{i}\u{2}")))
        .collect();
    let indexed = fmt::format(data, &args);
    let mut generic = String::new();
    fmt::render_to(&mut generic, data, &args, scan.count, None);
    assert_eq!(indexed, generic);
    if !data.contains('\u{1}') {
        assert_eq!(indexed.matches('\u{1}').count(), scan.count);
    }

    let mut holder = ReusableMessage::new();
    holder.set_slice(data.to_owned(), &args);
    assert_eq!(holder.formatted_message(), indexed);
});
