//! Event plumbing between a plotting toolkit and the selection controller.
//!
//! Two directions are covered here:
//!
//! - **Inbound** UI events ([`UiEvent`]) produced by a toolkit adapter. The
//!   adapter implements [`UiEventSource`] so listeners can be attached and
//!   detached per [`EventKind`]; the controller implements
//!   [`UiEventHandler`] to react to them.
//! - **Outbound** notifications ([`SelectionEvent`]) that non-UI code can
//!   receive through an [`EventController`] subscription.
//!
//! Both use the same bitflag [`EventKind`] so a single filter type works for
//! either side.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::data::geometry::Point;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    // ── Inbound (toolkit → controller) ──────────────────────────────────
    /// Pointer entered the plot area.
    pub const POINTER_ENTER: Self = Self(1 << 0);
    /// Pointer left the plot area.
    pub const POINTER_EXIT: Self = Self(1 << 1);
    /// A key went down.
    pub const KEY_DOWN: Self = Self(1 << 2);
    /// A key was released.
    pub const KEY_UP: Self = Self(1 << 3);
    /// A click or lasso gesture finished.
    pub const GESTURE: Self = Self(1 << 4);
    /// A HUD button was clicked.
    pub const BUTTON_CLICK: Self = Self(1 << 5);
    /// The host plot is closing.
    pub const CLOSE: Self = Self(1 << 6);

    // ── Outbound (controller → subscribers) ─────────────────────────────
    /// A user gesture changed the selection.
    pub const SELECTION_CHANGED: Self = Self(1 << 16);
    /// The selection was replaced programmatically.
    pub const SELECTION_SET: Self = Self(1 << 17);
    /// The HUD became visible.
    pub const HUD_SHOWN: Self = Self(1 << 18);
    /// The HUD was hidden.
    pub const HUD_HIDDEN: Self = Self(1 << 19);
    /// A HUD button callback ran.
    pub const BUTTON_CLICKED: Self = Self(1 << 20);
    /// Listeners were attached.
    pub const CONNECTED: Self = Self(1 << 21);
    /// Listeners were detached.
    pub const DISCONNECTED: Self = Self(1 << 22);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u64::MAX);

    /// Inbound kinds that only reach the controller while it is connected.
    pub const INTERACTION: Self = Self(
        Self::POINTER_ENTER.0
            | Self::POINTER_EXIT.0
            | Self::KEY_DOWN.0
            | Self::KEY_UP.0
            | Self::GESTURE.0
            | Self::BUTTON_CLICK.0,
    );

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
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

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
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
            (EventKind::POINTER_ENTER, "POINTER_ENTER"),
            (EventKind::POINTER_EXIT, "POINTER_EXIT"),
            (EventKind::KEY_DOWN, "KEY_DOWN"),
            (EventKind::KEY_UP, "KEY_UP"),
            (EventKind::GESTURE, "GESTURE"),
            (EventKind::BUTTON_CLICK, "BUTTON_CLICK"),
            (EventKind::CLOSE, "CLOSE"),
            (EventKind::SELECTION_CHANGED, "SELECTION_CHANGED"),
            (EventKind::SELECTION_SET, "SELECTION_SET"),
            (EventKind::HUD_SHOWN, "HUD_SHOWN"),
            (EventKind::HUD_HIDDEN, "HUD_HIDDEN"),
            (EventKind::BUTTON_CLICKED, "BUTTON_CLICKED"),
            (EventKind::CONNECTED, "CONNECTED"),
            (EventKind::DISCONNECTED, "DISCONNECTED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

/// A key as reported by the toolkit adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Shift,
    Ctrl,
    Alt,
    Other(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Shift => write!(f, "Shift"),
            Key::Ctrl => write!(f, "Ctrl"),
            Key::Alt => write!(f, "Alt"),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Key {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty key".to_string());
        }
        Ok(match s.to_lowercase().as_str() {
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" | "option" => Key::Alt,
            _ => Key::Other(s.to_string()),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inbound UI events
// ─────────────────────────────────────────────────────────────────────────────

/// A raw event delivered by a toolkit adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerEnter,
    PointerExit,
    KeyDown(Key),
    KeyUp(Key),
    /// Plot-space vertices from pointer press to release.
    GestureComplete(Vec<Point>),
    /// Index of the HUD button that was clicked.
    ButtonClick(usize),
    Close,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::PointerEnter => EventKind::POINTER_ENTER,
            UiEvent::PointerExit => EventKind::POINTER_EXIT,
            UiEvent::KeyDown(_) => EventKind::KEY_DOWN,
            UiEvent::KeyUp(_) => EventKind::KEY_UP,
            UiEvent::GestureComplete(_) => EventKind::GESTURE,
            UiEvent::ButtonClick(_) => EventKind::BUTTON_CLICK,
            UiEvent::Close => EventKind::CLOSE,
        }
    }
}

/// Handle returned when a listener is attached to a [`UiEventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Toolkit capability for attaching and detaching event listeners.
pub trait UiEventSource {
    /// Start delivering events of `kind`.
    fn subscribe(&mut self, kind: EventKind) -> ListenerId;
    /// Stop delivering events for a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);
}

/// Reactions to inbound UI events.
pub trait UiEventHandler {
    fn on_pointer_enter(&mut self);
    fn on_pointer_exit(&mut self);
    fn on_key_down(&mut self, key: &Key);
    fn on_key_up(&mut self, key: &Key);
    fn on_gesture_complete(&mut self, vertices: &[Point]);
    fn on_button_click(&mut self, index: usize);
    fn on_close(&mut self);

    /// Route an event to the matching `on_*` hook.
    fn dispatch(&mut self, event: &UiEvent) {
        match event {
            UiEvent::PointerEnter => self.on_pointer_enter(),
            UiEvent::PointerExit => self.on_pointer_exit(),
            UiEvent::KeyDown(k) => self.on_key_down(k),
            UiEvent::KeyUp(k) => self.on_key_up(k),
            UiEvent::GestureComplete(v) => self.on_gesture_complete(v),
            UiEvent::ButtonClick(i) => self.on_button_click(*i),
            UiEvent::Close => self.on_close(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Outbound notifications
// ─────────────────────────────────────────────────────────────────────────────

/// Notification emitted by the controller.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,
    /// Selection after the change, for selection events.
    pub selection: Option<Vec<usize>>,
    /// Label of the clicked button, for button events.
    pub button: Option<String>,
}

impl SelectionEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            selection: None,
            button: None,
        }
    }

    pub fn with_selection(mut self, inds: &[usize]) -> Self {
        self.selection = Some(inds.to_vec());
        self
    }

    pub fn with_button(mut self, label: &str) -> Self {
        self.button = Some(label.to_string());
        self
    }
}

/// OR-mask over [`EventKind`] selecting what a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &SelectionEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

struct Subscriber {
    filter: EventFilter,
    sender: Sender<SelectionEvent>,
}

/// Fan-out of [`SelectionEvent`]s to `mpsc` subscribers.
///
/// Cloning shares the subscriber list, so a clone can be kept by the
/// embedding code while another is handed to the controller.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events whose kinds intersect `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<SelectionEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        if let Ok(mut inner) = self.inner.lock() {
            inner.subscribers.push(Subscriber { filter, sender: tx });
        }
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<SelectionEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to matching subscribers, pruning closed channels.
    pub fn emit(&self, mut event: SelectionEvent) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|i| i.subscribers.len()).unwrap_or(0)
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventController")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
