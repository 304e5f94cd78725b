use std::sync::Once;

use log::Level;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

static LOGGER_INIT: Once = Once::new();

/// Routes the `log` macros to the browser console. Later calls only change the
/// level.
pub fn init_logging(level: Level) {
    LOGGER_INIT.call_once(|| {
        if let Err(err) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&format!("Logger already set: {}", err).into());
        }
    });
    log::set_max_level(level.to_level_filter());
}
