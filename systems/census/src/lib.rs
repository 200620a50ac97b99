#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Population census over the grid, refreshed after ticks and paint strokes.

use std::fmt;

use planet_sandbox_core::{CellView, Element, Event, StructureKind};
use tracing::trace;

/// Snapshot of how many cells of each element the grid holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CensusReport {
    tick: u64,
    counts: [usize; Element::ALL.len()],
    houses_built: u64,
    domes_built: u64,
    agents_perished: u64,
}

impl CensusReport {
    /// Tick index the report was taken at.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of cells currently holding `element`.
    #[must_use]
    pub const fn count(&self, element: Element) -> usize {
        self.counts[element.ordinal()]
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.counts.iter().sum::<usize>() - self.count(Element::Empty)
    }

    /// Structures of `kind` built since the census started observing.
    #[must_use]
    pub const fn structures_built(&self, kind: StructureKind) -> u64 {
        match kind {
            StructureKind::HumanHouse => self.houses_built,
            StructureKind::AlienDome => self.domes_built,
        }
    }

    /// Agents burned since the census started observing.
    #[must_use]
    pub const fn agents_perished(&self) -> u64 {
        self.agents_perished
    }

    /// Iterates over the elements present on the grid, Empty excluded.
    pub fn present(&self) -> impl Iterator<Item = (Element, usize)> + '_ {
        Element::ALL
            .into_iter()
            .zip(self.counts.iter().copied())
            .filter(|(element, count)| *element != Element::Empty && *count > 0)
    }
}

impl fmt::Display for CensusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for (element, count) in self.present() {
            write!(f, "{separator}{element}={count}")?;
            separator = " ";
        }
        if separator.is_empty() {
            f.write_str("barren")?;
        }
        Ok(())
    }
}

/// Pure census system that recounts the grid when the world changed.
#[derive(Debug, Default)]
pub struct Census {
    last_report: Option<CensusReport>,
    tick: u64,
    houses_built: u64,
    domes_built: u64,
    agents_perished: u64,
}

impl Census {
    /// Creates a census that has not observed any events yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent report, if any recount has happened.
    #[must_use]
    pub fn last_report(&self) -> Option<&CensusReport> {
        self.last_report.as_ref()
    }

    /// Consumes world events and recounts `cells` when a tick or paint stroke
    /// was observed.
    ///
    /// Structure and death totals accumulate from every batch of events,
    /// recount or not.
    pub fn handle(&mut self, events: &[Event], cells: CellView<'_>) {
        let mut changed = false;

        for event in events {
            match event {
                Event::TimeAdvanced { tick } => {
                    self.tick = *tick;
                    changed = true;
                }
                Event::CellsPainted { .. } => changed = true,
                Event::StructureBuilt { kind, .. } => match kind {
                    StructureKind::HumanHouse => self.houses_built += 1,
                    StructureKind::AlienDome => self.domes_built += 1,
                },
                Event::AgentPerished { .. } => self.agents_perished += 1,
            }
        }

        if !changed {
            return;
        }

        let mut counts = [0; Element::ALL.len()];
        for cell in cells.iter() {
            counts[cell.element().ordinal()] += 1;
        }
        let report = CensusReport {
            tick: self.tick,
            counts,
            houses_built: self.houses_built,
            domes_built: self.domes_built,
            agents_perished: self.agents_perished,
        };
        trace!(tick = report.tick, occupied = report.occupied(), "census taken");
        self.last_report = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_reads_barren() {
        assert_eq!(CensusReport::default().to_string(), "barren");
    }

    #[test]
    fn display_lists_present_elements_in_order() {
        let mut report = CensusReport::default();
        report.counts[Element::Water.ordinal()] = 3;
        report.counts[Element::Sand.ordinal()] = 2;
        report.counts[Element::Empty.ordinal()] = 10;
        assert_eq!(report.to_string(), "sand=2 water=3");
        assert_eq!(report.occupied(), 5);
    }
}
