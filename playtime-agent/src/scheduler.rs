//! Decides when the page has to be scraped again.
//!
//! The host is a single page application, so the overlay has to be re-rendered whenever the host
//! navigates or re-renders its content. Time is passed in explicitly as reference time, the
//! [`Scheduler`] itself never waits for anything.

use crate::configuration::SchedulerConfiguration;
use crate::host::HostSignal;
use crate::host::address::is_playlist_relevant;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
	Idle,
	/// A run was requested by navigation (or startup) and fires at `fire_at`.
	PendingDebounce { fire_at: Duration },
	/// Content changed, the run waits for both stages to pass.
	PendingSettle { stage: SettleStage, fire_at: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleStage {
	Debounce,
	Settle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollMode {
	Fast,
	Slow,
}

/// The fallback poll that re-runs whenever the overlay went missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicPoll {
	pub next_tick: Duration,
	pub checks: u32,
	pub mode: PollMode,
}

#[must_use = "a wakeup may request a run that has to be performed"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wakeup {
	Nothing,
	Run(RunReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunReason {
	Navigation,
	ContentSettled,
	FallbackPoll,
}

pub struct Scheduler {
	configuration: SchedulerConfiguration,
	last_address: Option<String>,
	state: SchedulerState,
	poll: Option<PeriodicPoll>,
	/// Set by navigation (and startup), the next run restarts the poll even if a content change
	/// replaced the navigation debounce in the meantime.
	poll_restart_pending: bool,
}

impl Scheduler {
	/// Starts out waiting for the startup delay, the poll starts with the first run.
	pub fn new(configuration: SchedulerConfiguration, initial_address: Option<String>, now: Duration) -> Self {
		let fire_at = now + configuration.startup_delay;
		Self {
			configuration,
			last_address: initial_address,
			state: SchedulerState::PendingDebounce { fire_at },
			poll: None,
			poll_restart_pending: true,
		}
	}

	pub fn state(&self) -> SchedulerState {
		self.state
	}

	pub fn poll(&self) -> Option<PeriodicPoll> {
		self.poll
	}

	pub fn handle_signal(&mut self, signal: HostSignal, now: Duration) {
		match signal {
			HostSignal::Navigated { address } => self.navigate(address, now),
			HostSignal::ContentChanged { address } => {
				if self.last_address.as_deref() != Some(address.as_str()) {
					self.navigate(address, now);
					return;
				}

				if !is_playlist_relevant(&address) {
					trace!("Ignoring content change on '{address}'.");
					return;
				}

				self.state = SchedulerState::PendingSettle {
					stage: SettleStage::Debounce,
					fire_at: now + self.configuration.mutation_delay,
				};
			}
		}
	}

	fn navigate(&mut self, address: String, now: Duration) {
		debug!("Navigated to '{address}'.");
		self.last_address = Some(address);
		self.poll_restart_pending = true;
		self.state = SchedulerState::PendingDebounce {
			fire_at: now + self.configuration.navigation_delay,
		};
	}

	/// Deadline of the pending debounce or settle run, ignoring the poll.
	pub fn pending_run_deadline(&self) -> Option<Duration> {
		match self.state {
			SchedulerState::Idle => None,
			SchedulerState::PendingDebounce { fire_at } | SchedulerState::PendingSettle { fire_at, .. } => Some(fire_at),
		}
	}

	/// The earliest point in time at which [`Scheduler::fire_due`] has something to do.
	pub fn next_deadline(&self) -> Option<Duration> {
		let poll_tick = self.poll.map(|poll| poll.next_tick);
		[self.pending_run_deadline(), poll_tick].into_iter().flatten().min()
	}

	/// Processes every timer that is due at `now`. Timers that are due together result in a
	/// single run.
	pub fn fire_due(&mut self, now: Duration, result_present: bool) -> Wakeup {
		let wakeup = self.advance_pending(now);
		let poll_reason = self.tick_poll(now, result_present);

		match (wakeup, poll_reason) {
			(Wakeup::Nothing, Some(reason)) => Wakeup::Run(reason),
			(wakeup, _) => wakeup,
		}
	}

	fn advance_pending(&mut self, now: Duration) -> Wakeup {
		loop {
			match self.state {
				SchedulerState::PendingDebounce { fire_at } if fire_at <= now => {
					self.state = SchedulerState::Idle;
					self.restart_poll(now);
					return Wakeup::Run(RunReason::Navigation);
				}
				SchedulerState::PendingSettle {
					stage: SettleStage::Debounce,
					fire_at,
				} if fire_at <= now => {
					self.state = SchedulerState::PendingSettle {
						stage: SettleStage::Settle,
						fire_at: fire_at + self.configuration.settle_delay,
					};
				}
				SchedulerState::PendingSettle {
					stage: SettleStage::Settle,
					fire_at,
				} if fire_at <= now => {
					self.state = SchedulerState::Idle;
					if self.poll_restart_pending {
						self.restart_poll(now);
					}
					return Wakeup::Run(RunReason::ContentSettled);
				}
				_ => return Wakeup::Nothing,
			}
		}
	}

	fn restart_poll(&mut self, now: Duration) {
		self.poll_restart_pending = false;
		let relevant = self.last_address.as_deref().is_some_and(is_playlist_relevant);
		self.poll = relevant.then(|| PeriodicPoll {
			next_tick: now + self.configuration.fast_poll_interval,
			checks: 0,
			mode: PollMode::Fast,
		});
	}

	fn tick_poll(&mut self, now: Duration, result_present: bool) -> Option<RunReason> {
		let configuration = &self.configuration;
		let poll = self.poll.as_mut()?;
		if poll.next_tick > now {
			return None;
		}

		poll.checks = poll.checks.saturating_add(1);
		if poll.mode == PollMode::Fast && (result_present || poll.checks >= configuration.fast_poll_limit) {
			debug!("Slowing down the fallback poll after {} checks.", poll.checks);
			poll.mode = PollMode::Slow;
		}
		poll.next_tick = now
			+ match poll.mode {
				PollMode::Fast => configuration.fast_poll_interval,
				PollMode::Slow => configuration.slow_poll_interval,
			};

		(!result_present).then_some(RunReason::FallbackPoll)
	}
}
