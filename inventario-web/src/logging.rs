//! Console logging and panic reporting.

use log::LevelFilter;

/// Level handed to the console logger, `None` when logging is off.
fn console_level(filter: LevelFilter) -> Option<log::Level> {
    filter.to_level()
}

/// Route `log` records to the browser console. `LevelFilter::Off` installs
/// nothing.
pub fn init(filter: LevelFilter) {
    if let Some(level) = console_level(filter) {
        wasm_logger::init(wasm_logger::Config::new(level));
    }
}

/// Print panics with their stack to the console.
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}
