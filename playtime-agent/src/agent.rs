use crate::configuration::SchedulerConfiguration;
use crate::extraction::{Extraction, extract_snapshot};
use crate::host::{HostError, HostPage, HostSignal};
use crate::overlay::{RenderOutcome, has_result_element, render};
use crate::playlist::progress::ProgressResult;
use crate::reference_time::ReferenceTimer;
use crate::scheduler::{Scheduler, Wakeup};
use futures_util::{Stream, StreamExt};
use std::future::pending;
use std::pin::pin;
use tokio::time::sleep_until;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
	NotPlaylistPage,
	NoData,
	Rendered {
		progress: ProgressResult,
		render: RenderOutcome,
	},
}

/// Scrapes the page once and replaces the overlay.
pub fn run_once<Page: HostPage + ?Sized>(page: &mut Page) -> Result<RunOutcome, HostError> {
	let snapshot = match extract_snapshot(&*page)? {
		Extraction::NotPlaylistPage => return Ok(RunOutcome::NotPlaylistPage),
		Extraction::NoData(_) => return Ok(RunOutcome::NoData),
		Extraction::Snapshot(snapshot) => snapshot,
	};

	let progress = snapshot.progress();
	let render = render(page, &snapshot)?;
	Ok(RunOutcome::Rendered { progress, render })
}

/// Keeps the overlay of a host page up to date while the host navigates around.
pub struct Agent<Page> {
	page: Page,
	scheduler: Scheduler,
	reference_timer: ReferenceTimer,
}

impl<Page: HostPage> Agent<Page> {
	pub fn new(page: Page, configuration: SchedulerConfiguration, reference_timer: ReferenceTimer) -> Self {
		let initial_address = match page.address() {
			Ok(address) => Some(address),
			Err(error) => {
				warn!("Failed to read the initial address: {error}");
				None
			}
		};
		let scheduler = Scheduler::new(configuration, initial_address, reference_timer.reference_time());

		Self {
			page,
			scheduler,
			reference_timer,
		}
	}

	/// Runs until `signals` ends. Runs that are still pending at that point are performed before the
	/// page is handed back.
	pub async fn run(mut self, signals: impl Stream<Item = HostSignal>) -> Page {
		let mut signals = pin!(signals);

		loop {
			let wake_at = self
				.scheduler
				.next_deadline()
				.map(|deadline| self.reference_timer.instant_at(deadline));
			let timer = async move {
				match wake_at {
					Some(instant) => sleep_until(instant).await,
					None => pending().await,
				}
			};

			tokio::select! {
				signal = signals.next() => match signal {
					Some(signal) => self.handle_signal(signal),
					None => break,
				},
				() = timer => self.wake(),
			}
		}

		while let Some(deadline) = self.scheduler.pending_run_deadline() {
			sleep_until(self.reference_timer.instant_at(deadline)).await;
			self.wake();
		}

		info!("Host signals ended, agent stopped.");
		self.page
	}

	fn handle_signal(&mut self, signal: HostSignal) {
		debug!("Received {signal:?}.");
		self.page.apply_signal(&signal);
		self.scheduler
			.handle_signal(signal, self.reference_timer.reference_time());
	}

	fn wake(&mut self) {
		let now = self.reference_timer.reference_time();
		let result_present = has_result_element(&self.page);

		if let Wakeup::Run(reason) = self.scheduler.fire_due(now, result_present) {
			debug!("Running because of {reason:?}.");
			// A failing run must not keep the scheduler from arming further timers
			match run_once(&mut self.page) {
				Ok(outcome) => debug!("Run finished: {outcome:?}"),
				Err(error) => warn!("Run failed: {error}"),
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::host::snapshot_page::SnapshotPage;
	use crate::host::{AnchorCandidate, InjectedElement, ListingItem, PanelItem, Placement};
	use crate::overlay::LISTING_ELEMENT_ID;
	use crate::playlist::PageKind;
	use crate::playlist::duration::Seconds;
	use futures_channel::mpsc;
	use std::cell::Cell;
	use std::time::Duration;
	use tokio::time::sleep;

	const PLAYLIST_PAGE_PATH: &str = "test/files/playlist-page.json";

	fn playlist_page() -> SnapshotPage {
		SnapshotPage::from_file(PLAYLIST_PAGE_PATH).expect("Failed to load page")
	}

	fn agent<Page: HostPage>(page: Page) -> Agent<Page> {
		Agent::new(page, SchedulerConfiguration::default(), ReferenceTimer::default())
	}

	fn content_changed(page: &SnapshotPage) -> HostSignal {
		HostSignal::ContentChanged {
			address: page.address.clone(),
		}
	}

	#[test]
	fn run_once_should_render_the_listing() {
		let mut page = playlist_page();

		let outcome = run_once(&mut page).expect("Run failed");

		let RunOutcome::Rendered { progress, render } = outcome else {
			panic!("Expected a rendered outcome, got {outcome:?}");
		};
		assert_eq!(Seconds::new(5400), progress.total);
		assert_eq!(Seconds::new(1800), progress.watched);
		assert_eq!(Seconds::new(3600), progress.remaining);
		assert!(matches!(render, RenderOutcome::Injected { .. }));
	}

	#[test]
	fn run_once_should_be_idempotent() {
		let mut page = playlist_page();

		let first_outcome = run_once(&mut page).expect("First run failed");
		let first_texts = page.injected_elements().map(|element| element.text.clone()).collect::<Vec<_>>();
		let second_outcome = run_once(&mut page).expect("Second run failed");
		let second_texts = page.injected_elements().map(|element| element.text.clone()).collect::<Vec<_>>();

		assert_eq!(first_outcome, second_outcome);
		assert_eq!(1, second_texts.len());
		assert_eq!(first_texts, second_texts);
	}

	#[test]
	fn run_once_should_report_pages_without_playlist() {
		let mut page = SnapshotPage::new("https://www.youtube.com/");

		assert_eq!(RunOutcome::NotPlaylistPage, run_once(&mut page).expect("Run failed"));
	}

	#[tokio::test(start_paused = true)]
	async fn should_render_after_the_startup_delay() {
		let (sender, receiver) = mpsc::unbounded();
		let agent = agent(playlist_page());

		let script = async move {
			sleep(Duration::from_millis(2500)).await;
			drop(sender);
		};
		let ((), page) = tokio::join!(script, agent.run(receiver));

		assert_eq!(1, page.insertions());
		assert!(page.contains_element(LISTING_ELEMENT_ID));
	}

	#[tokio::test(start_paused = true)]
	async fn three_content_changes_should_render_once() {
		let (sender, receiver) = mpsc::unbounded();
		let page = playlist_page();
		let signal = content_changed(&page);
		let agent = agent(page);

		let script = async move {
			// let the startup run happen first
			sleep(Duration::from_millis(3000)).await;
			for _ in 0..3 {
				sender.unbounded_send(signal.clone()).expect("Failed to send signal");
				sleep(Duration::from_millis(300)).await;
			}
			sleep(Duration::from_secs(5)).await;
		};
		let ((), page) = tokio::join!(script, agent.run(receiver));

		// one run at startup, one for all three content changes
		assert_eq!(2, page.insertions());
		assert_eq!(1, page.injected_elements().count());
	}

	#[tokio::test(start_paused = true)]
	async fn should_flush_pending_runs_when_signals_end() {
		let (sender, receiver) = mpsc::unbounded();
		let page = playlist_page();
		let signal = content_changed(&page);
		let agent = agent(page);

		let script = async move {
			sleep(Duration::from_millis(2500)).await;
			sender.unbounded_send(signal).expect("Failed to send signal");
		};
		let ((), page) = tokio::join!(script, agent.run(receiver));

		assert_eq!(2, page.insertions());
	}

	#[tokio::test(start_paused = true)]
	async fn navigation_should_render_the_new_page() {
		let (sender, receiver) = mpsc::unbounded();
		let mut page = playlist_page();
		let watch_page = SnapshotPage::from_file("test/files/watch-page.json").expect("Failed to load page");
		let watch_address = watch_page.address.clone();
		page.panel = watch_page.panel;
		let agent = agent(page);

		let script = async move {
			sleep(Duration::from_millis(2500)).await;
			sender
				.unbounded_send(HostSignal::Navigated { address: watch_address })
				.expect("Failed to send signal");
		};
		let ((), page) = tokio::join!(script, agent.run(receiver));

		let texts = page.injected_elements().map(|element| element.text.clone()).collect::<Vec<_>>();
		assert_eq!(vec!["🕒 1:35:40"], texts);
	}

	/// Delegates to a [`SnapshotPage`] but fails the first few reads of the address.
	struct FlakyPage {
		page: SnapshotPage,
		failures_left: Cell<usize>,
	}

	impl HostPage for FlakyPage {
		fn address(&self) -> Result<String, HostError> {
			let failures_left = self.failures_left.get();
			if failures_left > 0 {
				self.failures_left.set(failures_left - 1);
				return Err(HostError::PropertyAccess {
					property: "location",
					message: "Host threw".to_string(),
				});
			}
			self.page.address()
		}

		fn document_language(&self) -> Option<String> {
			self.page.document_language()
		}

		fn has_playlist_panel(&self) -> Result<bool, HostError> {
			self.page.has_playlist_panel()
		}

		fn badge_texts(&self, kind: PageKind) -> Result<Vec<String>, HostError> {
			self.page.badge_texts(kind)
		}

		fn listing_items(&self) -> Result<Vec<ListingItem>, HostError> {
			self.page.listing_items()
		}

		fn panel_items(&self) -> Result<Vec<PanelItem>, HostError> {
			self.page.panel_items()
		}

		fn anchor_candidates(&self, kind: PageKind) -> Result<Vec<AnchorCandidate>, HostError> {
			self.page.anchor_candidates(kind)
		}

		fn has_listing_header(&self) -> Result<bool, HostError> {
			self.page.has_listing_header()
		}

		fn contains_element(&self, id: &str) -> bool {
			self.page.contains_element(id)
		}

		fn remove_element(&mut self, id: &str) {
			self.page.remove_element(id);
		}

		fn insert_element(&mut self, placement: Placement, element: InjectedElement) -> Result<(), HostError> {
			self.page.insert_element(placement, element)
		}
	}

	#[tokio::test(start_paused = true)]
	async fn failed_runs_should_not_stop_the_fallback_poll() {
		let (sender, receiver) = mpsc::unbounded::<HostSignal>();
		let page = FlakyPage {
			page: playlist_page(),
			failures_left: Cell::new(0),
		};
		let agent = agent(page);
		// the startup run and the first fallback poll fail
		agent.page.failures_left.set(2);

		let script = async move {
			sleep(Duration::from_millis(4500)).await;
			drop(sender);
		};
		let ((), page) = tokio::join!(script, agent.run(receiver));

		assert_eq!(0, page.failures_left.get());
		assert_eq!(1, page.page.insertions());
		assert!(page.contains_element(LISTING_ELEMENT_ID));
	}

	#[tokio::test(start_paused = true)]
	async fn content_changes_during_startup_should_not_prevent_the_fallback_poll() {
		let (sender, receiver) = mpsc::unbounded();
		let page = FlakyPage {
			page: playlist_page(),
			failures_left: Cell::new(0),
		};
		let signal = content_changed(&page.page);
		let agent = agent(page);
		// the settled run replacing the startup run fails
		agent.page.failures_left.set(1);

		let script = async move {
			sleep(Duration::from_millis(500)).await;
			sender.unbounded_send(signal).expect("Failed to send signal");
			sleep(Duration::from_millis(3000)).await;
		};
		let ((), page) = tokio::join!(script, agent.run(receiver));

		assert_eq!(0, page.failures_left.get());
		assert_eq!(1, page.page.insertions());
		assert!(page.contains_element(LISTING_ELEMENT_ID));
	}
}
