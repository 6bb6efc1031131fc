//! Engine settings are process-wide, so this runs in its own test binary.

use parafmt::config::EngineConfig;
use parafmt::{Message, args, pool};

#[test]
fn disabled_pooling_allocates_per_acquire() {
    let config = EngineConfig {
        thread_local_pooling: false,
        ..EngineConfig::default()
    };
    assert!(pool::configure(&config));
    assert!(!pool::configure(&EngineConfig::default()));
    assert!(!pool::settings().thread_local_pooling);

    pool::reset_stats();
    let first = pool::message("{}", args![1]);
    assert!(!first.is_pooled());
    assert_eq!(first.formatted_message(), "1");
    drop(first);

    let second = pool::acquire();
    assert!(!second.is_pooled());
    let stats = pool::stats();
    assert_eq!(stats.acquired, 2);
    assert_eq!(stats.unpooled, 2);
    assert_eq!(stats.reused, 0);
}
