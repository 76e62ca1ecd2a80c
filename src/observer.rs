//! Hooks for watching a traversal step by step.
//!
//! Observers only see events; they cannot change the outcome of a run.

use log::trace;

use crate::grid::{Coord, Elevation};

/// The frontier an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queue {
    Open,
    Pit,
}

/// Receives traversal events. All methods default to doing nothing.
pub trait FloodObserver<T> {
    /// A border cell was closed and put on `Open`.
    fn seeded(&mut self, _cell: Coord, _elevation: T) {}

    /// A cell was taken off a frontier for expansion.
    fn popped(&mut self, _cell: Coord, _elevation: T, _from: Queue) {}

    /// A neighbour at or below the expanded cell was lifted to its level.
    fn raised(&mut self, _cell: Coord, _from: T, _to: T) {}

    /// A newly closed neighbour was put on a frontier.
    fn enqueued(&mut self, _cell: Coord, _elevation: T, _onto: Queue) {}
}

impl<T, O: FloodObserver<T> + ?Sized> FloodObserver<T> for &mut O {
    fn seeded(&mut self, cell: Coord, elevation: T) {
        (**self).seeded(cell, elevation)
    }

    fn popped(&mut self, cell: Coord, elevation: T, from: Queue) {
        (**self).popped(cell, elevation, from)
    }

    fn raised(&mut self, cell: Coord, from: T, to: T) {
        (**self).raised(cell, from, to)
    }

    fn enqueued(&mut self, cell: Coord, elevation: T, onto: Queue) {
        (**self).enqueued(cell, elevation, onto)
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl<T> FloodObserver<T> for Silent {}

/// Narrates every event at `trace` level.
#[derive(Debug, Clone, Default)]
pub struct LogObserver {
    label: String,
}

impl LogObserver {
    /// `label` prefixes every line, e.g. the band being filled.
    pub fn new(label: impl Into<String>) -> Self {
        LogObserver {
            label: label.into(),
        }
    }
}

impl<T: Elevation> FloodObserver<T> for LogObserver {
    fn seeded(&mut self, cell: Coord, elevation: T) {
        trace!("{}seed {:?} at {}", prefix(&self.label), cell, elevation);
    }

    fn popped(&mut self, cell: Coord, elevation: T, from: Queue) {
        trace!("{}expand {:?} at {} from {:?}", prefix(&self.label), cell, elevation, from);
    }

    fn raised(&mut self, cell: Coord, from: T, to: T) {
        trace!("{}raise {:?} from {} to {}", prefix(&self.label), cell, from, to);
    }

    fn enqueued(&mut self, cell: Coord, elevation: T, onto: Queue) {
        trace!("{}push {:?} at {} onto {:?}", prefix(&self.label), cell, elevation, onto);
    }
}

fn prefix(label: &str) -> String {
    if label.is_empty() {
        String::new()
    } else {
        format!("[{}] ", label)
    }
}
