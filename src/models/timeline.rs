//! Visualization timeline model.
//!
//! A timeline maps every tick of a simulation, from 0 to the last active
//! tick, to the ordered list of state transitions that happened during it.
//! Ticks without transitions are present with an empty list so a client
//! can animate time uniformly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ProcessState;

/// A single state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Process that changed state.
    pub pid: String,
    /// Previous state. `None` only for the initial `NEW` announcement.
    pub from: Option<ProcessState>,
    /// New state.
    pub to: ProcessState,
}

impl TransitionEvent {
    /// Creates an event.
    pub fn new(pid: impl Into<String>, from: Option<ProcessState>, to: ProcessState) -> Self {
        Self {
            pid: pid.into(),
            from,
            to,
        }
    }
}

/// Per-tick transition log.
///
/// Serialized as a JSON object keyed by tick number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<i64, Vec<TransitionEvent>>",
    try_from = "BTreeMap<i64, Vec<TransitionEvent>>"
)]
pub struct Timeline {
    ticks: Vec<Vec<TransitionEvent>>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the next tick and returns its number.
    pub fn begin_tick(&mut self) -> i64 {
        self.ticks.push(Vec::new());
        self.ticks.len() as i64 - 1
    }

    /// Records a transition in the current tick.
    ///
    /// Opens tick 0 if no tick is open yet.
    pub fn record(&mut self, pid: &str, from: Option<ProcessState>, to: ProcessState) {
        if self.ticks.is_empty() {
            self.ticks.push(Vec::new());
        }
        if let Some(current) = self.ticks.last_mut() {
            current.push(TransitionEvent::new(pid, from, to));
        }
    }

    /// Events recorded at `tick`.
    pub fn events_at(&self, tick: i64) -> &[TransitionEvent] {
        usize::try_from(tick)
            .ok()
            .and_then(|i| self.ticks.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ticks at which `pid` made a transition, with the transition.
    pub fn events_for<'a>(
        &'a self,
        pid: &'a str,
    ) -> impl Iterator<Item = (i64, &'a TransitionEvent)> + 'a {
        self.iter()
            .flat_map(|(tick, events)| events.iter().map(move |e| (tick, e)))
            .filter(move |(_, e)| e.pid == pid)
    }

    /// First tick at which `pid` entered `to`.
    pub fn first_tick(&self, pid: &str, to: ProcessState) -> Option<i64> {
        self.events_for(pid)
            .find(|(_, e)| e.to == to)
            .map(|(tick, _)| tick)
    }

    /// `(tick, events)` pairs in tick order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[TransitionEvent])> {
        self.ticks
            .iter()
            .enumerate()
            .map(|(i, events)| (i as i64, events.as_slice()))
    }

    /// Number of ticks covered.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether no tick was recorded.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Last tick covered, if any.
    pub fn last_tick(&self) -> Option<i64> {
        self.ticks.len().checked_sub(1).map(|t| t as i64)
    }
}

impl From<Timeline> for BTreeMap<i64, Vec<TransitionEvent>> {
    fn from(timeline: Timeline) -> Self {
        timeline
            .ticks
            .into_iter()
            .enumerate()
            .map(|(i, events)| (i as i64, events))
            .collect()
    }
}

impl TryFrom<BTreeMap<i64, Vec<TransitionEvent>>> for Timeline {
    type Error = String;

    fn try_from(map: BTreeMap<i64, Vec<TransitionEvent>>) -> Result<Self, Self::Error> {
        let mut ticks = Vec::with_capacity(map.len());
        for (expected, (tick, events)) in map.into_iter().enumerate() {
            if tick != expected as i64 {
                return Err(format!("timeline tick {expected} is missing"));
            }
            ticks.push(events);
        }
        Ok(Self { ticks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_record() {
        let mut tl = Timeline::new();
        assert_eq!(tl.begin_tick(), 0);
        tl.record("A", None, ProcessState::New);
        tl.record("A", Some(ProcessState::New), ProcessState::Ready);
        assert_eq!(tl.begin_tick(), 1);
        assert_eq!(tl.begin_tick(), 2);
        tl.record("A", Some(ProcessState::Ready), ProcessState::Running);

        assert_eq!(tl.len(), 3);
        assert_eq!(tl.last_tick(), Some(2));
        assert_eq!(tl.events_at(0).len(), 2);
        assert!(tl.events_at(1).is_empty());
        assert!(tl.events_at(99).is_empty());
        assert_eq!(tl.first_tick("A", ProcessState::Running), Some(2));
        assert_eq!(tl.first_tick("A", ProcessState::Completed), None);
    }

    #[test]
    fn test_serialize_keyed_by_tick() {
        let mut tl = Timeline::new();
        tl.begin_tick();
        tl.record("A", None, ProcessState::New);
        tl.begin_tick();

        let json = serde_json::to_value(&tl).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "0": [{"pid": "A", "from": null, "to": "NEW"}],
                "1": []
            })
        );
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let json = r#"{"0": [{"pid": "A", "from": "NEW", "to": "READY"}], "1": []}"#;
        let tl: Timeline = serde_json::from_str(json).unwrap();
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.events_at(0)[0].to, ProcessState::Ready);
    }

    #[test]
    fn test_deserialize_rejects_gaps() {
        let json = r#"{"0": [], "2": []}"#;
        assert!(serde_json::from_str::<Timeline>(json).is_err());
    }
}
