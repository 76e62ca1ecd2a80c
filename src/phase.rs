//! Named phase timestamps and a report of the time spent between them.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use log::info;

#[derive(Debug, Clone)]
struct Mark {
    name: String,
    at: Instant,
}

/// One interval between consecutive marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval<'a> {
    pub index: usize,
    pub from: &'a str,
    pub to: &'a str,
    pub elapsed: Duration,
}

/// Records named points in time, in order.
///
/// ```
/// use priority_flood::Phases;
///
/// let mut phases = Phases::new();
/// phases.mark("start");
/// phases.mark("read");
/// phases.mark("fill");
/// assert_eq!(phases.intervals().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Phases {
    marks: Vec<Mark>,
}

impl Phases {
    pub fn new() -> Self {
        Phases::default()
    }

    pub fn mark(&mut self, name: impl Into<String>) {
        self.marks.push(Mark {
            name: name.into(),
            at: Instant::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Index of the first mark called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.marks.iter().position(|m| m.name == name)
    }

    /// Time from the first mark to the last.
    pub fn total(&self) -> Duration {
        match (self.marks.first(), self.marks.last()) {
            (Some(first), Some(last)) => last.at.duration_since(first.at),
            _ => Duration::ZERO,
        }
    }

    pub fn intervals(&self) -> impl Iterator<Item = Interval<'_>> {
        self.marks.windows(2).enumerate().map(|(index, pair)| Interval {
            index,
            from: &pair[0].name,
            to: &pair[1].name,
            elapsed: pair[1].at.duration_since(pair[0].at),
        })
    }

    /// The interval that took longest; the earliest one wins ties.
    pub fn longest(&self) -> Option<Interval<'_>> {
        self.intervals()
            .reduce(|best, i| if i.elapsed > best.elapsed { i } else { best })
    }

    fn lines(&self) -> Vec<String> {
        let total = self.total().as_secs_f64();
        let width = self.marks.iter().map(|m| m.name.len()).max().unwrap_or(0);
        let digits = self.marks.len().to_string().len();
        let mut lines: Vec<String> = self
            .intervals()
            .map(|i| {
                format!(
                    "From phase {:>d$} ({:>w$}) to phase {:>d$} ({:>w$}), {:>10.6}s elapsed ({:.2}%)",
                    i.index,
                    i.from,
                    i.index + 1,
                    i.to,
                    i.elapsed.as_secs_f64(),
                    share(i.elapsed.as_secs_f64(), total),
                    d = digits,
                    w = width,
                )
            })
            .collect();
        if let Some(l) = self.longest() {
            lines.push(format!(
                "The longest phase was phase {} (\"{}\"), taking {:.6}s of {:.6}s ({:.2}%)",
                l.index,
                l.from,
                l.elapsed.as_secs_f64(),
                total,
                share(l.elapsed.as_secs_f64(), total),
            ));
        }
        lines
    }

    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    pub fn log_report(&self) {
        for line in self.lines() {
            info!("{}", line);
        }
    }
}

fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}
