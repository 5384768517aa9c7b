use std::time::Duration;

use leptos::prelude::*;
use log::warn;

/// The latest value waiting to be committed. A new value replaces the old one.
#[derive(Debug)]
pub struct PendingCommit<T> {
	value: Option<T>,
}

impl<T> Default for PendingCommit<T> {
	fn default() -> Self {
		Self { value: None }
	}
}

impl<T> PendingCommit<T> {
	pub fn schedule(&mut self, value: T) {
		self.value = Some(value);
	}

	pub fn take(&mut self) -> Option<T> {
		self.value.take()
	}

	pub fn is_pending(&self) -> bool {
		self.value.is_some()
	}
}

/// Delays commits of free-text edits; each keystroke restarts the timer and the last value
/// wins. Pending values are flushed on blur and when the owning component is disposed.
pub struct Debouncer<T: Send + Sync + 'static> {
	pending: StoredValue<PendingCommit<T>>,
	timer: StoredValue<Option<TimeoutHandle>>,
	delay: Duration,
	commit: Callback<T>,
}

impl<T: Send + Sync + 'static> Clone for Debouncer<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: Send + Sync + 'static> Copy for Debouncer<T> {}

impl<T: Send + Sync + 'static> Debouncer<T> {
	pub fn new(delay_ms: u64, commit: Callback<T>) -> Self {
		let debouncer = Self {
			pending: StoredValue::new(PendingCommit::default()),
			timer: StoredValue::new(None),
			delay: Duration::from_millis(delay_ms),
			commit,
		};
		on_cleanup(move || debouncer.flush());
		debouncer
	}

	pub fn is_pending(&self) -> bool {
		self.pending
			.try_with_value(PendingCommit::is_pending)
			.unwrap_or(false)
	}

	pub fn schedule(&self, value: T) {
		self.pending.update_value(|p| p.schedule(value));
		self.clear_timer();
		let this = *self;
		match set_timeout_with_handle(move || this.flush(), self.delay) {
			Ok(handle) => self.timer.set_value(Some(handle)),
			Err(err) => {
				warn!("debounce timer unavailable: {err:?}");
				self.flush();
			}
		}
	}

	pub fn flush(&self) {
		self.clear_timer();
		if let Some(value) = self.pending.try_update_value(PendingCommit::take).flatten() {
			self.commit.run(value);
		}
	}

	fn clear_timer(&self) {
		if let Some(handle) = self.timer.try_update_value(Option::take).flatten() {
			handle.clear();
		}
	}
}
