//! Console logging
//!
//! On wasm32 these forward to the browser console. Native builds (tests,
//! tooling) have no console import available, so the message is formatted and
//! dropped.

#[doc(hidden)]
pub fn console_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[doc(hidden)]
pub fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// `log!("pipes: {}", n)` - info line in the browser console
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::core::log::console_log(&format!($($arg)*))
    };
}

/// `warn!("...")` - warning line in the browser console
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::core::log::console_warn(&format!($($arg)*))
    };
}
