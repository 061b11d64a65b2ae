//! Process-wide table of calendar engines.
//!
//! The table is filled once, either by an explicit [`init`] at startup or
//! lazily by the first lookup, and is read-only afterwards. Engines are
//! stateless, so the shared references can be used from any thread.

use crate::calendar::{CalendarSystem, FrenchRepublican, Gregorian, Islamic, Julian, Persian};
use crate::hebrew::Hebrew;
use crate::types::CalendarKind;
use std::sync::OnceLock;
use tracing::debug;

static GREGORIAN: Gregorian = Gregorian;
static JULIAN: Julian = Julian;
static HEBREW: Hebrew = Hebrew;
static FRENCH_REPUBLICAN: FrenchRepublican = FrenchRepublican;
static PERSIAN: Persian = Persian;
static ISLAMIC: Islamic = Islamic;

/// One registered calendar.
#[derive(Debug, Clone, Copy)]
pub struct CalendarEntry {
    pub kind:   CalendarKind,
    /// Canonical name, e.g. `"French Republican"`
    pub name:   &'static str,
    pub system: &'static dyn CalendarSystem,
}

/// Table of calendar engines, indexed by calendar code.
#[derive(Debug)]
pub struct CalendarRegistry {
    entries: [CalendarEntry; CalendarKind::ALL.len()],
}

impl CalendarRegistry {
    fn new() -> Self {
        Self {
            entries: CalendarKind::ALL.map(|kind| CalendarEntry {
                kind,
                name: calendar_name(kind),
                system: engine(kind),
            }),
        }
    }

    /// All registered calendars in code order
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every kind has an entry, at the index of its code.
    pub fn lookup(&self, kind: CalendarKind) -> &CalendarEntry {
        &self.entries[usize::from(kind.code())]
    }

    /// Finds a calendar by its canonical name, ignoring case and surrounding
    /// whitespace.
    pub fn lookup_name(&self, name: &str) -> Option<CalendarKind> {
        let wanted = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(wanted))
            .map(|entry| entry.kind)
    }
}

fn engine(kind: CalendarKind) -> &'static dyn CalendarSystem {
    match kind {
        CalendarKind::Gregorian => &GREGORIAN,
        CalendarKind::Julian => &JULIAN,
        CalendarKind::Hebrew => &HEBREW,
        CalendarKind::FrenchRepublican => &FRENCH_REPUBLICAN,
        CalendarKind::Persian => &PERSIAN,
        CalendarKind::Islamic => &ISLAMIC,
    }
}

fn calendar_name(kind: CalendarKind) -> &'static str {
    match kind {
        CalendarKind::Gregorian => "Gregorian",
        CalendarKind::Julian => "Julian",
        CalendarKind::Hebrew => "Hebrew",
        CalendarKind::FrenchRepublican => "French Republican",
        CalendarKind::Persian => "Persian",
        CalendarKind::Islamic => "Islamic",
    }
}

static REGISTRY: OnceLock<CalendarRegistry> = OnceLock::new();

/// Fills the registry. Calling it again returns the existing table.
pub fn init() -> &'static CalendarRegistry {
    REGISTRY.get_or_init(|| {
        let registry = CalendarRegistry::new();
        debug!(calendars = registry.len(), "calendar registry initialised");
        registry
    })
}

/// The registry, initialised on first use
pub fn registry() -> &'static CalendarRegistry {
    init()
}

/// Engine for `kind`.
pub fn get(kind: CalendarKind) -> &'static dyn CalendarSystem {
    registry().lookup(kind).system
}
