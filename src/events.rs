//! UI input events and a synchronous subscription bus.
//!
//! The front end (egui sliders, a browser bridge, a test) turns widget activity
//! into [`UiEvent`]s and hands them to an [`EventBus`]. Handlers are plain
//! closures registered per widget and [`EventKind`]; on dispatch they receive
//! `&mut` access to the target (normally a visualizer), so the bus never needs
//! shared ownership or interior mutability.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing which kind of widget activity an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// Continuous slider movement ("input" in the DOM).
    pub const INPUT: Self = Self(1 << 0);
    /// Slider released / value committed ("change").
    pub const CHANGE: Self = Self(1 << 1);
    /// Button press ("click").
    pub const CLICK: Self = Self(1 << 2);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    /// Map a DOM-style event name to its kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input" => Some(Self::INPUT),
            "change" => Some(Self::CHANGE),
            "click" => Some(Self::CLICK),
            _ => None,
        }
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }
        let pairs: &[(EventKind, &str)] = &[
            (EventKind::INPUT, "input"),
            (EventKind::CHANGE, "change"),
            (EventKind::CLICK, "click"),
        ];
        let mut names = Vec::new();
        let mut known = 0u32;
        for (kind, name) in pairs {
            known |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UiEvent
// ─────────────────────────────────────────────────────────────────────────────

/// Value carried by an event. Browser sliders report text, native ones numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Number(f64),
    Text(String),
}

impl Payload {
    /// The payload as a finite number, if it is one (text is trimmed and parsed).
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            Payload::None => return None,
            Payload::Number(v) => *v,
            Payload::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

/// A single input event from a named widget.
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    pub widget: String,
    pub kind: EventKind,
    pub payload: Payload,
}

impl UiEvent {
    pub fn new(widget: impl Into<String>, kind: EventKind, payload: Payload) -> Self {
        Self {
            widget: widget.into(),
            kind,
            payload,
        }
    }

    pub fn input(widget: impl Into<String>, value: f64) -> Self {
        Self::new(widget, EventKind::INPUT, Payload::Number(value))
    }

    pub fn change(widget: impl Into<String>, value: f64) -> Self {
        Self::new(widget, EventKind::CHANGE, Payload::Number(value))
    }

    pub fn click(widget: impl Into<String>) -> Self {
        Self::new(widget, EventKind::CLICK, Payload::None)
    }

    /// Numeric payload, logging and returning `None` for anything else.
    pub fn numeric(&self) -> Option<f64> {
        let v = self.payload.as_number();
        if v.is_none() {
            log::debug!(
                "ignoring {} on {:?}: non-numeric payload {:?}",
                self.kind,
                self.widget,
                self.payload
            );
        }
        v
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// Selects the events a subscription receives: one widget id and a kind mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub widget: String,
    pub mask: EventKind,
}

impl EventFilter {
    pub fn new(widget: impl Into<String>, mask: EventKind) -> Self {
        Self {
            widget: widget.into(),
            mask,
        }
    }

    #[inline]
    pub fn matches(&self, event: &UiEvent) -> bool {
        self.widget == event.widget && event.kind.intersects(self.mask)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventBus
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque id returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

pub type Handler<T> = Box<dyn FnMut(&mut T, &UiEvent)>;

struct Subscription<T> {
    id: u64,
    filter: EventFilter,
    handler: Handler<T>,
}

/// Synchronous event bus; handlers run in subscription order on the caller's thread.
pub struct EventBus<T> {
    subscriptions: Vec<Subscription<T>>,
    next_id: u64,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind` coming from `widget`.
    pub fn subscribe<F>(&mut self, widget: &str, kind: EventKind, handler: F) -> SubscriptionHandle
    where
        F: FnMut(&mut T, &UiEvent) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter: EventFilter::new(widget, kind),
            handler: Box::new(handler),
        });
        SubscriptionHandle(id)
    }

    /// Like [`subscribe`](Self::subscribe) with a DOM event name; unknown names are refused.
    pub fn subscribe_named<F>(
        &mut self,
        widget: &str,
        event_name: &str,
        handler: F,
    ) -> Option<SubscriptionHandle>
    where
        F: FnMut(&mut T, &UiEvent) + 'static,
    {
        let kind = EventKind::from_name(event_name)?;
        Some(self.subscribe(widget, kind, handler))
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != handle.0);
        self.subscriptions.len() != before
    }

    /// Run every matching handler against `target`. Returns how many ran.
    pub fn dispatch(&mut self, target: &mut T, event: &UiEvent) -> usize {
        let mut ran = 0;
        for sub in self.subscriptions.iter_mut() {
            if sub.filter.matches(event) {
                (sub.handler)(target, event);
                ran += 1;
            }
        }
        log::trace!("{} on {:?} -> {} handler(s)", event.kind, event.widget, ran);
        ran
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_from_name_and_display() {
        assert_eq!(EventKind::from_name("input"), Some(EventKind::INPUT));
        assert_eq!(EventKind::from_name("change"), Some(EventKind::CHANGE));
        assert_eq!(EventKind::from_name("click"), Some(EventKind::CLICK));
        assert_eq!(EventKind::from_name("keydown"), None);
        assert_eq!(format!("{}", EventKind::INPUT | EventKind::CHANGE), "input|change");
        assert_eq!(format!("{}", EventKind::ALL), "ALL");
        assert!(format!("{}", EventKind(1 << 31)).starts_with("0x"));
    }

    #[test]
    fn payload_parsing_rejects_non_numbers() {
        assert_eq!(Payload::Text(" 42 ".into()).as_number(), Some(42.0));
        assert_eq!(Payload::Text("abc".into()).as_number(), None);
        assert_eq!(Payload::Text("NaN".into()).as_number(), None);
        assert_eq!(Payload::Number(f64::INFINITY).as_number(), None);
        assert_eq!(Payload::None.as_number(), None);
    }

    #[test]
    fn dispatch_reaches_only_matching_subscriptions() {
        let mut bus: EventBus<Vec<String>> = EventBus::new();
        bus.subscribe("slider", EventKind::INPUT, |log, e| log.push(format!("in {:?}", e.payload)));
        bus.subscribe("slider", EventKind::CHANGE, |log, _| log.push("change".into()));
        bus.subscribe("button", EventKind::CLICK, |log, _| log.push("click".into()));

        let mut log = Vec::new();
        assert_eq!(bus.dispatch(&mut log, &UiEvent::input("slider", 1.0)), 1);
        assert_eq!(bus.dispatch(&mut log, &UiEvent::click("slider")), 0);
        assert_eq!(bus.dispatch(&mut log, &UiEvent::click("button")), 1);
        assert_eq!(log, vec!["in Number(1.0)".to_string(), "click".to_string()]);
    }

    #[test]
    fn unsubscribe_removes_handler_once() {
        let mut bus: EventBus<u32> = EventBus::new();
        let h = bus.subscribe("b", EventKind::CLICK, |n, _| *n += 1);
        let mut n = 0;
        bus.dispatch(&mut n, &UiEvent::click("b"));
        assert!(bus.unsubscribe(h));
        assert!(!bus.unsubscribe(h));
        bus.dispatch(&mut n, &UiEvent::click("b"));
        assert_eq!(n, 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn subscribe_named_refuses_unknown_event() {
        let mut bus: EventBus<()> = EventBus::new();
        assert!(bus.subscribe_named("w", "hover", |_, _| {}).is_none());
        assert!(bus.subscribe_named("w", "click", |_, _| {}).is_some());
        assert_eq!(bus.len(), 1);
    }
}
