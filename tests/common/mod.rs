use std::sync::{LazyLock, Mutex};

use flexi_logger::{Logger, LoggerHandle};
use scopeguard::{OnUnwind, ScopeGuard};
use treap_rk::{Compare, TreapRk};

pub mod slow_set;

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Logs the tree if the test panics while holding it.
#[allow(dead_code)]
pub fn guard<T: std::fmt::Debug>(t: T) -> ScopeGuard<T, impl FnOnce(T), OnUnwind> {
    scopeguard::guard_on_unwind(t, |t| log::error!("Crash with {t:?}"))
}

#[allow(dead_code)]
pub fn keys<K: Clone, C>(t: &TreapRk<K, C>) -> Vec<K> {
    t.iter().cloned().collect()
}

/// Checks the structural invariants and that the tree holds exactly `expected`, in order.
#[allow(dead_code)]
pub fn assert_keys<C: Compare<i32>>(t: &TreapRk<i32, C>, expected: &[i32]) {
    assert!(t.verify(), "invariants broken: {t:?}");
    assert_eq!(t.len(), expected.len(), "{t:?}");
    assert_eq!(keys(t), expected, "{t:?}");
    for (i, k) in expected.iter().enumerate() {
        assert_eq!(t.select(i), Ok(k), "select({i}) in {t:?}");
    }
}

#[allow(dead_code)]
pub fn build(seed: u64, keys: impl IntoIterator<Item = i32>) -> TreapRk<i32> {
    let mut t = TreapRk::with_seed(seed);
    t.extend(keys);
    t
}
