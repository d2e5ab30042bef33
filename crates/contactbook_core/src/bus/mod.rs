//! Synchronous in-process event bus.
//!
//! # Responsibility
//! - Decouple the record store and commands from observers such as the
//!   presentation layer and the persistence adapter.
//! - Deliver each posted event to every matching handler before `post`
//!   returns.
//!
//! # Invariants
//! - Handlers run in registration order on the posting thread.
//! - A failing or panicking handler never stops delivery to the others.
//! - Unsubscribing while a dispatch is running takes effect once the
//!   outermost dispatch finishes; the removed handler still sees the event
//!   being dispatched.
//! - Handlers subscribed during a dispatch only see later posts.
//!
//! The bus is an explicit handle shared through `Rc`; clone it into every
//! component that needs to publish or subscribe.

mod events;

pub use events::{AppEvent, EventCategory, EventKind, RecordChange, StoreChanged};

use crate::logging::panic_payload_summary;
use log::{debug, error, warn};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

pub type HandlerResult = Result<(), HandlerError>;

/// Error reported by an event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HandlerError {}

/// Which events a handler wants.
///
/// `All` is wider than `Category`, which is wider than `Kinds`; a handler
/// registered for a wider filter receives every event of the narrower ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    All,
    Category(EventCategory),
    Kinds(Vec<EventKind>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => event.category() == *category,
            Self::Kinds(kinds) => kinds.contains(&event.kind()),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Outcome of one `post`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub failed: usize,
}

type Handler = dyn Fn(&AppEvent) -> HandlerResult;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Box<Handler>,
}

#[derive(Default)]
struct BusState {
    subscriptions: Vec<Rc<Subscription>>,
    next_id: u64,
    dispatch_depth: usize,
    pending_removals: Vec<SubscriptionId>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    state: Rc<RefCell<BusState>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events matching `filter`.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) -> HandlerResult + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.subscriptions.push(Rc::new(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        }));
        debug!("event=bus_subscribe module=bus status=ok subscription_id={}", id.0);
        id
    }

    /// Removes a subscription. Returns `false` for unknown ids.
    ///
    /// Called during a dispatch, the removal is queued and applied when the
    /// outermost dispatch completes.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let known = state
            .subscriptions
            .iter()
            .any(|subscription| subscription.id == id);
        if !known || state.pending_removals.contains(&id) {
            return false;
        }

        if state.dispatch_depth > 0 {
            state.pending_removals.push(id);
            debug!(
                "event=bus_unsubscribe module=bus status=deferred subscription_id={}",
                id.0
            );
        } else {
            state
                .subscriptions
                .retain(|subscription| subscription.id != id);
            debug!(
                "event=bus_unsubscribe module=bus status=ok subscription_id={}",
                id.0
            );
        }
        true
    }

    /// Number of live subscriptions, counting ones pending removal.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscriptions.len()
    }

    /// Delivers `event` to every matching handler and returns once all ran.
    pub fn post(&self, event: &AppEvent) -> DispatchSummary {
        let kind = event.kind();
        let targets: Vec<Rc<Subscription>> = {
            let mut state = self.state.borrow_mut();
            state.dispatch_depth += 1;
            state
                .subscriptions
                .iter()
                .filter(|subscription| subscription.filter.matches(event))
                .cloned()
                .collect()
        };

        let mut summary = DispatchSummary::default();
        for subscription in targets {
            match catch_unwind(AssertUnwindSafe(|| (subscription.handler)(event))) {
                Ok(Ok(())) => summary.delivered += 1,
                Ok(Err(err)) => {
                    summary.failed += 1;
                    warn!(
                        "event=bus_handler module=bus status=error kind={} subscription_id={} error={}",
                        kind.as_str(),
                        subscription.id.0,
                        err
                    );
                }
                Err(payload) => {
                    summary.failed += 1;
                    error!(
                        "event=bus_handler module=bus status=panic kind={} subscription_id={} payload={}",
                        kind.as_str(),
                        subscription.id.0,
                        panic_payload_summary(payload.as_ref())
                    );
                }
            }
        }

        self.finish_dispatch();
        debug!(
            "event=bus_post module=bus status=ok kind={} delivered={} failed={}",
            kind.as_str(),
            summary.delivered,
            summary.failed
        );
        summary
    }

    fn finish_dispatch(&self) {
        let mut state = self.state.borrow_mut();
        state.dispatch_depth -= 1;
        if state.dispatch_depth > 0 || state.pending_removals.is_empty() {
            return;
        }
        let removals = std::mem::take(&mut state.pending_removals);
        state
            .subscriptions
            .retain(|subscription| !removals.contains(&subscription.id));
    }
}

#[cfg(test)]
mod tests {
    use super::{AppEvent, EventBus, EventCategory, EventFilter, EventKind, HandlerError};
    use crate::model::fields::EventDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, EventBus) {
        (Rc::new(RefCell::new(Vec::new())), EventBus::new())
    }

    #[test]
    fn delivers_in_registration_order() {
        let (log, bus) = recorder();
        for label in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            bus.subscribe(EventFilter::All, move |_| {
                log.borrow_mut().push(label.to_string());
                Ok(())
            });
        }

        let summary = bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(summary.delivered, 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn category_filter_receives_every_kind_in_category() {
        let (log, bus) = recorder();
        let ui_log = Rc::clone(&log);
        bus.subscribe(EventFilter::Category(EventCategory::Ui), move |event| {
            ui_log.borrow_mut().push(event.kind().as_str().to_string());
            Ok(())
        });
        let help_log = Rc::clone(&log);
        bus.subscribe(
            EventFilter::Kinds(vec![EventKind::ShowHelpRequest]),
            move |_| {
                help_log.borrow_mut().push("help-only".to_string());
                Ok(())
            },
        );

        bus.post(&AppEvent::ExitAppRequest);
        bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(
            *log.borrow(),
            vec!["exit_app_request", "show_help_request", "help-only"]
        );
    }

    #[test]
    fn failing_and_panicking_handlers_do_not_block_others() {
        let (log, bus) = recorder();
        bus.subscribe(EventFilter::All, |_| Err(HandlerError::new("refused")));
        bus.subscribe(EventFilter::All, |_| panic!("observer bug"));
        let tail_log = Rc::clone(&log);
        bus.subscribe(EventFilter::All, move |_| {
            tail_log.borrow_mut().push("tail".to_string());
            Ok(())
        });

        let summary = bus.post(&AppEvent::ExitAppRequest);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.delivered, 1);
        assert_eq!(*log.borrow(), vec!["tail"]);
    }

    #[test]
    fn calendar_selection_reaches_ui_subscribers_only() {
        let (log, bus) = recorder();
        let ui_log = Rc::clone(&log);
        bus.subscribe(EventFilter::Category(EventCategory::Ui), move |event| {
            if let AppEvent::CalendarDateSelected { date } = event {
                ui_log.borrow_mut().push(date.to_string());
            }
            Ok(())
        });
        let store_log = Rc::clone(&log);
        bus.subscribe(EventFilter::Category(EventCategory::Store), move |_| {
            store_log.borrow_mut().push("store".to_string());
            Ok(())
        });

        let date = EventDate::parse("12/12/2018").expect("valid date");
        let summary = bus.post(&AppEvent::CalendarDateSelected { date });
        assert_eq!(summary.delivered, 1);
        assert_eq!(*log.borrow(), vec!["12/12/2018"]);
    }

    #[test]
    fn subscribe_during_dispatch_sees_only_later_posts() {
        let (log, bus) = recorder();
        let registered = Rc::new(std::cell::Cell::new(false));

        let inner_bus = bus.clone();
        let late_log = Rc::clone(&log);
        bus.subscribe(EventFilter::All, move |_| {
            if !registered.replace(true) {
                let late_log = Rc::clone(&late_log);
                inner_bus.subscribe(EventFilter::All, move |_| {
                    late_log.borrow_mut().push("late".to_string());
                    Ok(())
                });
            }
            Ok(())
        });

        let first = bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(first.delivered, 1);
        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count(), 2);

        bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn unsubscribe_during_dispatch_is_deferred() {
        let (log, bus) = recorder();
        let victim_slot = Rc::new(RefCell::new(None));

        let remover_bus = bus.clone();
        let remover_slot = Rc::clone(&victim_slot);
        bus.subscribe(EventFilter::All, move |_| {
            if let Some(id) = remover_slot.borrow_mut().take() {
                assert!(remover_bus.unsubscribe(id));
            }
            Ok(())
        });
        let victim_log = Rc::clone(&log);
        let victim = bus.subscribe(EventFilter::All, move |_| {
            victim_log.borrow_mut().push("victim".to_string());
            Ok(())
        });
        *victim_slot.borrow_mut() = Some(victim);

        bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(*log.borrow(), vec!["victim"]);
        assert_eq!(bus.subscriber_count(), 1);

        bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn nested_post_from_handler_is_delivered_synchronously() {
        let (log, bus) = recorder();
        let inner_bus = bus.clone();
        bus.subscribe(
            EventFilter::Kinds(vec![EventKind::ShowHelpRequest]),
            move |_| {
                inner_bus.post(&AppEvent::ExitAppRequest);
                Ok(())
            },
        );
        let exit_log = Rc::clone(&log);
        bus.subscribe(
            EventFilter::Kinds(vec![EventKind::ExitAppRequest]),
            move |_| {
                exit_log.borrow_mut().push("exit".to_string());
                Ok(())
            },
        );

        bus.post(&AppEvent::ShowHelpRequest);
        assert_eq!(*log.borrow(), vec!["exit"]);
    }

    #[test]
    fn unsubscribe_unknown_id_returns_false() {
        let bus = EventBus::new();
        let id = bus.subscribe(EventFilter::All, |_| Ok(()));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
