//! Event listener lifecycle
//!
//! [`ListenerHandle`] owns the bridge callback created by
//! [`EventTarget::add_event_listener`](crate::EventTarget::add_event_listener).
//! Releasing the handle first asks the host to `removeEventListener` the
//! bridge and only then frees the closure, so the host never holds a
//! registration pointing at a released function.
//!
//! ## Example
//!
//! ```ignore
//! let handle = button.add_event_listener("click", false, |event| {
//!     event.prevent_default();
//! });
//!
//! // Later, through the target...
//! button.remove_event_listener("click", false, handle);
//! // ...or by letting the handle go out of scope.
//! ```

use crate::host::{HostCallback, HostValue};
use crate::{debug_log, error_log, warn_log};

/// A live event listener registration.
///
/// The handle is in the `Registered` state for as long as it exists.
/// Consuming it (through [`EventTarget::remove_event_listener`](crate::EventTarget::remove_event_listener),
/// dropping it, or [`forget`](Self::forget)) is the one-way transition out of
/// that state, so releasing twice cannot be expressed.
#[must_use = "dropping the handle removes the listener immediately"]
pub struct ListenerHandle<V: HostValue> {
	target: V,
	event: String,
	use_capture: bool,
	bridge: Option<V::Callback>,
}

impl<V: HostValue> ListenerHandle<V> {
	/// Builds the bridge and registers it on `target`.
	pub(crate) fn register<F>(target: &V, event: &str, use_capture: bool, bridge: F) -> Self
	where
		F: FnMut(V) + 'static,
	{
		let bridge = V::callback(bridge);
		target.call(
			"addEventListener",
			&[V::from(event), bridge.as_value(), V::from(use_capture)],
		);
		debug_log!("registered '{}' listener (capture: {})", event, use_capture);

		Self {
			target: target.clone(),
			event: event.to_owned(),
			use_capture,
			bridge: Some(bridge),
		}
	}

	/// Returns the event name this handle was registered for.
	pub fn event(&self) -> &str {
		&self.event
	}

	/// Returns the capture flag this handle was registered with.
	pub fn use_capture(&self) -> bool {
		self.use_capture
	}

	/// Returns the host function the target invokes.
	pub fn bridge(&self) -> Option<V> {
		self.bridge.as_ref().map(HostCallback::as_value)
	}

	/// Keeps the listener registered for the lifetime of the host object.
	///
	/// The bridge is leaked and can no longer be removed.
	pub fn forget(mut self) {
		if let Some(bridge) = self.bridge.take() {
			warn_log!("leaking '{}' listener bridge", self.event);
			bridge.forget();
		}
	}

	/// Unregisters the recorded registration, then releases the bridge.
	///
	/// `event` and `use_capture` are what the caller asked to remove; the
	/// host is always told the values the bridge was registered with, so a
	/// mismatch can never leave it pointing at a released closure.
	pub(crate) fn release(mut self, event: &str, use_capture: bool) {
		let Some(bridge) = self.bridge.take() else {
			return;
		};
		if event != self.event || use_capture != self.use_capture {
			warn_log!(
				"removing '{}' listener (capture: {}) requested as '{}' (capture: {})",
				self.event,
				self.use_capture,
				event,
				use_capture
			);
		}
		debug_log!("releasing '{}' listener (capture: {})", self.event, self.use_capture);
		unregister(&self.target, &self.event, self.use_capture, bridge);
	}
}

impl<V: HostValue> Drop for ListenerHandle<V> {
	fn drop(&mut self) {
		let Some(bridge) = self.bridge.take() else {
			return;
		};
		// No host calls while unwinding; a second fault would abort.
		if std::thread::panicking() {
			error_log!("leaking '{}' listener bridge while unwinding", self.event);
			bridge.forget();
			return;
		}
		debug_log!("dropping '{}' listener", self.event);
		unregister(&self.target, &self.event, self.use_capture, bridge);
	}
}

impl<V: HostValue> std::fmt::Debug for ListenerHandle<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ListenerHandle")
			.field("event", &self.event)
			.field("use_capture", &self.use_capture)
			.field("bridge", &"<function>")
			.finish()
	}
}

fn unregister<V: HostValue>(target: &V, event: &str, use_capture: bool, bridge: V::Callback) {
	target.call(
		"removeEventListener",
		&[V::from(event), bridge.as_value(), V::from(use_capture)],
	);
	bridge.release();
}
