use crate::iterate::Iterate;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")))
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Values of one full traversal, in order
pub fn values<'a, K: 'a, V: Clone + 'a>(iter: &Iterate<'a, K, V>) -> Vec<V> {
    let mut values = Vec::new();
    iter.each(|value, _, _| values.push(value.clone())).unwrap();
    values
}
