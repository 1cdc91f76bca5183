//! Logging abstraction layer for reinhardt-dom
//!
//! The listener bridge is the only code that logs. Each macro maps to one
//! stage of a bridge's life, writes to `console` on WASM and to stderr
//! natively, and expands to nothing without `debug_assertions`.
//!
//! | Macro | Bridge event | Extra gate | WASM | Non-WASM |
//! |-------|--------------|------------|------|----------|
//! | `debug_log!` | registered, released, dropped | `debug-hooks` | `console.debug` | `eprintln!` |
//! | `warn_log!` | forgotten, removed under other arguments | None | `console.warn` | `eprintln!` |
//! | `error_log!` | leaked while unwinding | None | `console.error` | `eprintln!` |

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub use web_sys::console as __console;

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::logging::__console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		eprintln!("[DEBUG] {}", format!($($arg)*));
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::logging::__console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		eprintln!("[WARN] {}", format!($($arg)*));
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::logging::__console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		eprintln!("[ERROR] {}", format!($($arg)*));
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use crate::{debug_log, error_log, warn_log};

	#[rstest]
	#[case::click("click", false)]
	#[case::focus_capture("focus", true)]
	fn test_bridge_lifecycle_messages(#[case] event: &str, #[case] use_capture: bool) {
		debug_log!("registered '{}' listener (capture: {})", event, use_capture);
		warn_log!(
			"removing '{}' listener (capture: {}) requested as '{}' (capture: {})",
			event,
			use_capture,
			event,
			!use_capture
		);
		debug_log!("releasing '{}' listener (capture: {})", event, use_capture);
	}

	#[rstest]
	fn test_leak_messages_accept_owned_names() {
		let event = String::from("input");

		warn_log!("leaking '{}' listener bridge", event);
		error_log!("leaking '{}' listener bridge while unwinding", event);
		// Still usable: the macros only borrow their arguments.
		assert_eq!(event, "input");
	}
}
