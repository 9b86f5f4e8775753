// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` owns the pending queue and the single visible slot. It
//! decides what the presenter shows next, runs the auto-hide timer and
//! fires every completion handler exactly once.

use super::auto_hide_delay::AutoHideDelay;
use super::presenter::{Presenter, Removal};
use super::timer::{AutoHideTimer, Clock, SystemClock};
use super::toast::{CompletionHandler, Dismissal, Priority, ToastId, ToastValue};
use std::collections::VecDeque;
use std::time::Instant;

/// Signals that drive the manager besides `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Hide the visible toast.
    Hide,
    /// The user tapped the toast with this ID.
    Tapped(ToastId),
    /// The presenter finished hiding the toast with this ID.
    FinishedHiding(ToastId),
    /// Check the auto-hide timer.
    Tick,
}

/// The toast on screen, with the timer scoped to it.
#[derive(Debug)]
struct Active {
    toast: ToastValue,
    timer: Option<AutoHideTimer>,
    /// `hide()` asked the presenter to remove the view and is waiting for
    /// `finished_hiding`.
    hiding: bool,
}

/// Manages the toast queue and the visible toast.
pub struct Manager<P> {
    presenter: P,
    clock: Box<dyn Clock>,
    delay: AutoHideDelay,
    /// Currently visible toast.
    active: Option<Active>,
    /// Queued toasts waiting to be displayed.
    queue: VecDeque<ToastValue>,
}

impl<P: Presenter> Manager<P> {
    /// Creates a manager using the wall clock and the default delay.
    #[must_use]
    pub fn new(presenter: P) -> Self {
        Self::with_clock(presenter, SystemClock)
    }

    /// Creates a manager reading time from `clock`.
    #[must_use]
    pub fn with_clock(presenter: P, clock: impl Clock + 'static) -> Self {
        Self {
            presenter,
            clock: Box::new(clock),
            delay: AutoHideDelay::default(),
            active: None,
            queue: VecDeque::new(),
        }
    }

    /// Sets the auto-hide delay used for toasts activated from now on.
    #[must_use]
    pub fn with_delay(mut self, delay: AutoHideDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Shows a toast.
    ///
    /// With an empty slot the toast is presented at once. Otherwise a
    /// `Normal` toast waits at the back of the queue, while a `High` toast
    /// jumps to the front and evicts the visible one, which resolves as
    /// [`Dismissal::Preempted`].
    pub fn show(
        &mut self,
        text: impl Into<String>,
        auto_hide: bool,
        priority: Priority,
        completion: Option<CompletionHandler>,
    ) -> ToastId {
        self.push(
            ToastValue::new(text)
                .auto_hide(auto_hide)
                .priority(priority)
                .with_completion(completion),
        )
    }

    /// Shows an auto-hiding toast with normal priority.
    pub fn show_text(
        &mut self,
        text: impl Into<String>,
        completion: Option<CompletionHandler>,
    ) -> ToastId {
        self.show(text, true, Priority::Normal, completion)
    }

    /// Shows a prebuilt toast. See [`Manager::show`].
    pub fn push(&mut self, toast: ToastValue) -> ToastId {
        let id = toast.id();
        if self.active.is_none() {
            self.activate(toast);
            return id;
        }

        match toast.priority_level() {
            Priority::Normal => {
                tracing::debug!(%id, pending = self.queue.len() + 1, "toast queued");
                self.queue.push_back(toast);
            }
            Priority::High => {
                tracing::debug!(%id, "high priority toast preempts the visible one");
                self.queue.push_front(toast);
                self.preempt();
            }
        }
        id
    }

    /// Hides the visible toast.
    ///
    /// Does nothing when no toast is visible or a hide is already under way.
    /// Works the same for auto-hiding toasts.
    pub fn hide(&mut self) {
        let Some(active) = self.active.as_mut() else {
            tracing::trace!("hide ignored, no toast visible");
            return;
        };
        if active.hiding {
            tracing::trace!(id = %active.toast.id(), "hide ignored, already hiding");
            return;
        }

        active.timer = None;
        active.hiding = true;
        if self.presenter.remove(&active.toast) == Removal::Done {
            self.finish(Dismissal::Hidden);
        }
    }

    /// Handles a tap on the toast with `id`.
    ///
    /// Taps on a toast that is no longer visible, or that is already
    /// hiding, are ignored.
    pub fn tapped(&mut self, id: ToastId) {
        match &self.active {
            Some(active) if active.toast.id() == id && !active.hiding => {}
            _ => {
                tracing::trace!(%id, "stale tap ignored");
                return;
            }
        }
        if let Some(active) = self.active.take() {
            self.presenter.remove(&active.toast);
            self.release(active, Dismissal::Tapped);
        }
    }

    /// Handles the presenter reporting that the view of `id` is gone.
    ///
    /// Completes a pending `hide()`, or resolves a toast that disappeared
    /// on its own.
    pub fn finished_hiding(&mut self, id: ToastId) {
        let dismissal = match &self.active {
            Some(active) if active.toast.id() == id => {
                if active.hiding {
                    Dismissal::Hidden
                } else {
                    Dismissal::Disappeared
                }
            }
            _ => {
                tracing::trace!(%id, "stale finished_hiding ignored");
                return;
            }
        };
        self.finish(dismissal);
    }

    /// Dismisses the visible toast if its auto-hide delay has elapsed.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let due = self
            .active
            .as_ref()
            .and_then(|active| active.timer.as_ref())
            .is_some_and(|timer| timer.is_due(now));

        if due {
            if let Some(active) = self.active.take() {
                self.presenter.remove(&active.toast);
                self.release(active, Dismissal::AutoHidden);
            }
        }
    }

    /// Handles a manager message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Hide => self.hide(),
            Message::Tapped(id) => self.tapped(*id),
            Message::FinishedHiding(id) => self.finished_hiding(*id),
            Message::Tick => self.tick(),
        }
    }

    /// Returns whether a toast occupies the visible slot.
    #[must_use]
    pub fn is_toast_visible(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the visible toast.
    #[must_use]
    pub fn active(&self) -> Option<&ToastValue> {
        self.active.as_ref().map(|active| &active.toast)
    }

    /// Returns the queued toasts, next first.
    pub fn pending(&self) -> impl Iterator<Item = &ToastValue> {
        self.queue.iter()
    }

    /// Returns the number of queued toasts.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns when the visible toast will auto-hide, if it will.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active
            .as_ref()
            .and_then(|active| active.timer.as_ref())
            .map(AutoHideTimer::deadline)
    }

    /// Evicts the visible toast so the queue head can take its place.
    fn preempt(&mut self) {
        if let Some(active) = self.active.take() {
            if !active.hiding {
                self.presenter.remove(&active.toast);
            }
            self.release(active, Dismissal::Preempted);
        }
    }

    fn finish(&mut self, dismissal: Dismissal) {
        if let Some(active) = self.active.take() {
            self.release(active, dismissal);
        }
    }

    /// Resolves a toast that has already left the slot and promotes the next.
    fn release(&mut self, active: Active, dismissal: Dismissal) {
        let Active { toast, timer, .. } = active;
        drop(timer);
        toast.resolve(dismissal);
        self.advance();
    }

    fn advance(&mut self) {
        match self.queue.pop_front() {
            Some(next) => self.activate(next),
            None => tracing::debug!("toast queue drained"),
        }
    }

    fn activate(&mut self, toast: ToastValue) {
        debug_assert!(self.active.is_none(), "visible slot already occupied");
        tracing::debug!(id = %toast.id(), text = toast.text(), "toast presented");

        self.presenter.present(&toast);
        let timer = toast
            .is_auto_hide()
            .then(|| AutoHideTimer::arm(toast.id(), self.clock.now(), self.delay.as_duration()));
        self.active = Some(Active {
            toast,
            timer,
            hiding: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ManualClock, Outcomes, PresenterCall, RecordingPresenter};
    use std::time::Duration;

    fn manager() -> (Manager<RecordingPresenter>, RecordingPresenter, ManualClock) {
        let presenter = RecordingPresenter::new();
        let clock = ManualClock::new();
        let manager = Manager::with_clock(presenter.clone(), clock.clone());
        (manager, presenter, clock)
    }

    fn animated_manager() -> (Manager<RecordingPresenter>, RecordingPresenter) {
        let presenter = RecordingPresenter::animated();
        let manager = Manager::with_clock(presenter.clone(), ManualClock::new());
        (manager, presenter)
    }

    #[test]
    fn new_manager_is_empty() {
        let (manager, _, _) = manager();
        assert!(!manager.is_toast_visible());
        assert_eq!(manager.queued_count(), 0);
        assert!(manager.next_deadline().is_none());
    }

    #[test]
    fn show_presents_immediately_when_slot_is_free() {
        let (mut manager, presenter, _) = manager();
        let id = manager.show_text("hello", None);

        assert!(manager.is_toast_visible());
        assert_eq!(manager.active().map(ToastValue::id), Some(id));
        assert_eq!(
            presenter.calls(),
            vec![PresenterCall::Present {
                id,
                text: "hello".to_string()
            }]
        );
    }

    #[test]
    fn normal_toasts_queue_in_submission_order() {
        let (mut manager, presenter, _) = manager();
        manager.show("A", false, Priority::Normal, None);
        manager.show("B", false, Priority::Normal, None);
        manager.show("C", false, Priority::Normal, None);

        let pending: Vec<&str> = manager.pending().map(ToastValue::text).collect();
        assert_eq!(pending, ["B", "C"]);

        manager.hide();
        manager.hide();
        assert_eq!(presenter.presented(), ["A", "B", "C"]);
    }

    #[test]
    fn high_priority_preempts_and_jumps_the_queue() {
        let (mut manager, presenter, _) = manager();
        let outcomes = Outcomes::new();
        manager.show("A", false, Priority::Normal, Some(outcomes.handler()));
        manager.show("B", false, Priority::Normal, Some(outcomes.handler()));
        manager.show("H", false, Priority::High, Some(outcomes.handler()));

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Preempted)]);
        assert_eq!(manager.active().map(ToastValue::text), Some("H"));
        assert_eq!(manager.queued_count(), 1);
        assert_eq!(presenter.presented(), ["A", "H"]);
    }

    #[test]
    fn high_priority_on_empty_slot_just_shows() {
        let (mut manager, _, _) = manager();
        let outcomes = Outcomes::new();
        manager.show("H", false, Priority::High, Some(outcomes.handler()));

        assert!(manager.is_toast_visible());
        assert!(outcomes.fired().is_empty());
    }

    #[test]
    fn hide_on_empty_slot_is_ignored() {
        let (mut manager, presenter, _) = manager();
        manager.hide();
        assert!(presenter.calls().is_empty());
    }

    #[test]
    fn hide_resolves_and_advances() {
        let (mut manager, presenter, _) = manager();
        let outcomes = Outcomes::new();
        let a = manager.show("A", false, Priority::Normal, Some(outcomes.handler()));
        manager.show("B", true, Priority::Normal, Some(outcomes.handler()));

        manager.hide();

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Hidden)]);
        assert_eq!(presenter.removed(), [a]);
        assert_eq!(manager.active().map(ToastValue::text), Some("B"));
    }

    #[test]
    fn tap_resolves_as_tapped_and_promotes_next() {
        let (mut manager, presenter, _) = manager();
        let outcomes = Outcomes::new();
        let a = manager.show_text("A", Some(outcomes.handler()));
        manager.show_text("B", Some(outcomes.handler()));

        manager.tapped(a);

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Tapped)]);
        assert_eq!(presenter.removed(), [a]);
        assert_eq!(manager.active().map(ToastValue::text), Some("B"));
    }

    #[test]
    fn stale_tap_is_ignored() {
        let (mut manager, _, _) = manager();
        let outcomes = Outcomes::new();
        let a = manager.show_text("A", Some(outcomes.handler()));
        manager.hide();
        manager.show_text("B", Some(outcomes.handler()));

        manager.tapped(a);

        assert_eq!(outcomes.count("A"), 1);
        assert_eq!(outcomes.count("B"), 0);
        assert!(manager.is_toast_visible());
    }

    #[test]
    fn tick_auto_hides_after_delay() {
        let (mut manager, _, clock) = manager();
        let outcomes = Outcomes::new();
        manager.show_text("A", Some(outcomes.handler()));

        clock.advance(Duration::from_millis(1_999));
        manager.tick();
        assert!(manager.is_toast_visible());

        clock.advance(Duration::from_millis(1));
        manager.tick();
        assert!(!manager.is_toast_visible());
        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::AutoHidden)]);
    }

    #[test]
    fn manual_toast_never_auto_hides() {
        let (mut manager, _, clock) = manager();
        let outcomes = Outcomes::new();
        manager.show("A", false, Priority::Normal, Some(outcomes.handler()));

        clock.advance(Duration::from_secs(600));
        manager.tick();

        assert!(manager.is_toast_visible());
        assert!(manager.next_deadline().is_none());
        assert!(outcomes.fired().is_empty());
    }

    #[test]
    fn custom_delay_is_used() {
        let (manager, _, clock) = manager();
        let mut manager = manager.with_delay(AutoHideDelay::from_millis(5_000));
        manager.show_text("A", None);

        clock.advance(Duration::from_secs(3));
        manager.tick();
        assert!(manager.is_toast_visible());

        clock.advance(Duration::from_secs(2));
        manager.tick();
        assert!(!manager.is_toast_visible());
    }

    #[test]
    fn promoted_toast_gets_a_fresh_timer() {
        let (mut manager, _, clock) = manager();
        manager.show("A", false, Priority::Normal, None);
        manager.show_text("B", None);

        clock.advance(Duration::from_secs(10));
        manager.hide();

        let deadline = manager.next_deadline().expect("B should have a timer");
        assert_eq!(deadline, clock.now() + Duration::from_secs(2));
    }

    #[test]
    fn preemption_cancels_the_evicted_timer() {
        let (mut manager, _, clock) = manager();
        let outcomes = Outcomes::new();
        manager.show_text("A", Some(outcomes.handler()));
        clock.advance(Duration::from_millis(1_500));
        manager.show("H", false, Priority::High, Some(outcomes.handler()));

        clock.advance(Duration::from_secs(5));
        manager.tick();

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Preempted)]);
        assert_eq!(manager.active().map(ToastValue::text), Some("H"));
    }

    #[test]
    fn animated_hide_waits_for_presenter() {
        let (mut manager, _) = animated_manager();
        let outcomes = Outcomes::new();
        let a = manager.show("A", false, Priority::Normal, Some(outcomes.handler()));
        manager.show_text("B", Some(outcomes.handler()));

        manager.hide();
        assert!(outcomes.fired().is_empty());
        assert_eq!(manager.active().map(ToastValue::id), Some(a));

        manager.finished_hiding(a);
        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Hidden)]);
        assert_eq!(manager.active().map(ToastValue::text), Some("B"));
    }

    #[test]
    fn repeated_hide_while_animating_removes_once() {
        let (mut manager, presenter) = animated_manager();
        let outcomes = Outcomes::new();
        let a = manager.show_text("A", Some(outcomes.handler()));

        manager.hide();
        manager.hide();
        manager.finished_hiding(a);
        manager.finished_hiding(a);
        manager.hide();

        assert_eq!(presenter.removed(), [a]);
        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Hidden)]);
    }

    #[test]
    fn hide_cancels_the_auto_hide_timer() {
        let (mut manager, _) = animated_manager();
        let a = manager.show_text("A", None);

        manager.hide();
        assert!(manager.next_deadline().is_none());
        assert_eq!(manager.active().map(ToastValue::id), Some(a));
    }

    #[test]
    fn tap_while_hiding_is_ignored() {
        let (mut manager, _) = animated_manager();
        let outcomes = Outcomes::new();
        let a = manager.show_text("A", Some(outcomes.handler()));

        manager.hide();
        manager.tapped(a);
        manager.finished_hiding(a);

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Hidden)]);
    }

    #[test]
    fn natural_disappearance_resolves_without_tap() {
        let (mut manager, _, _) = manager();
        let outcomes = Outcomes::new();
        let a = manager.show("A", false, Priority::Normal, Some(outcomes.handler()));

        manager.finished_hiding(a);
        manager.hide();

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Disappeared)]);
        assert!(!manager.is_toast_visible());
    }

    #[test]
    fn high_priority_during_animated_hide_resolves_once() {
        let (mut manager, presenter) = animated_manager();
        let outcomes = Outcomes::new();
        let a = manager.show_text("A", Some(outcomes.handler()));

        manager.hide();
        manager.show("H", false, Priority::High, Some(outcomes.handler()));
        manager.finished_hiding(a);

        assert_eq!(outcomes.fired(), [("A".to_string(), Dismissal::Preempted)]);
        assert_eq!(presenter.removed(), [a]);
        assert_eq!(manager.active().map(ToastValue::text), Some("H"));
    }

    #[test]
    fn handle_message_dispatches() {
        let (mut manager, _, clock) = manager();
        let outcomes = Outcomes::new();
        let a = manager.show_text("A", Some(outcomes.handler()));
        manager.show_text("B", Some(outcomes.handler()));
        manager.show("C", false, Priority::Normal, Some(outcomes.handler()));

        manager.handle_message(&Message::Tapped(a));
        clock.advance(Duration::from_secs(2));
        manager.handle_message(&Message::Tick);
        manager.handle_message(&Message::Hide);

        assert_eq!(
            outcomes.fired(),
            [
                ("A".to_string(), Dismissal::Tapped),
                ("B".to_string(), Dismissal::AutoHidden),
                ("C".to_string(), Dismissal::Hidden),
            ]
        );
        assert!(!manager.is_toast_visible());
    }
}
