use env_logger::Env;

/// Logs go to stderr; stdout is reserved for emitted events.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
