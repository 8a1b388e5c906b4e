//! Expansion traces.
//!
//! Searches report every State they expand, in order, and how they ended. This
//! is all a renderer needs to replay a search. Sinks are write-only, searches
//! never read back from them, and they must not block.

use std::sync::mpsc::Sender;
use std::sync::mpsc::SyncSender;

use crate::error::SearchError;
use crate::path::Path;
use crate::space::State;

/// Something that happened during a search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceEvent<St>
where
    St: State,
{
    /// `state` was marked visited, as the `order`-th expansion (0-based).
    Expanded { state: St, order: usize },
    /// The search ended, finding `path` or proving there's none.
    Finished { path: Option<Path<St>> },
    /// The search hit a malformed input and stopped.
    Aborted { error: SearchError<St> },
}

/// Receives search events.
pub trait TraceSink<St>
where
    St: State,
{
    fn expanded(&mut self, state: &St, order: usize);
    fn finished(&mut self, path: Option<&Path<St>>);
    fn aborted(&mut self, _error: &SearchError<St>) {}
}

/// No tracing.
impl<St> TraceSink<St> for ()
where
    St: State,
{
    #[inline(always)]
    fn expanded(&mut self, _state: &St, _order: usize) {}
    #[inline(always)]
    fn finished(&mut self, _path: Option<&Path<St>>) {}
}

impl<St, T> TraceSink<St> for &mut T
where
    St: State,
    T: TraceSink<St>,
{
    fn expanded(&mut self, state: &St, order: usize) {
        (**self).expanded(state, order);
    }
    fn finished(&mut self, path: Option<&Path<St>>) {
        (**self).finished(path);
    }
    fn aborted(&mut self, error: &SearchError<St>) {
        (**self).aborted(error);
    }
}

/// Forwards events through an unbounded channel.
///
/// A dropped receiver is ignored, the search doesn't depend on its consumer.
impl<St> TraceSink<St> for Sender<TraceEvent<St>>
where
    St: State,
{
    fn expanded(&mut self, state: &St, order: usize) {
        let _ = self.send(TraceEvent::Expanded {
            state: state.clone(),
            order,
        });
    }
    fn finished(&mut self, path: Option<&Path<St>>) {
        let _ = self.send(TraceEvent::Finished {
            path: path.cloned(),
        });
    }
    fn aborted(&mut self, error: &SearchError<St>) {
        let _ = self.send(TraceEvent::Aborted {
            error: error.clone(),
        });
    }
}

/// Forwards events through a bounded channel, dropping them when it's full.
impl<St> TraceSink<St> for SyncSender<TraceEvent<St>>
where
    St: State,
{
    fn expanded(&mut self, state: &St, order: usize) {
        if self
            .try_send(TraceEvent::Expanded {
                state: state.clone(),
                order,
            })
            .is_err()
        {
            log::trace!("Dropped expansion event #{order}");
        }
    }
    fn finished(&mut self, path: Option<&Path<St>>) {
        if self
            .try_send(TraceEvent::Finished {
                path: path.cloned(),
            })
            .is_err()
        {
            log::debug!("Dropped search completion event");
        }
    }
    fn aborted(&mut self, error: &SearchError<St>) {
        if self
            .try_send(TraceEvent::Aborted {
                error: error.clone(),
            })
            .is_err()
        {
            log::debug!("Dropped search abort event");
        }
    }
}

/// Records a whole search in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace<St>
where
    St: State,
{
    expansions: Vec<St>,
    outcome: Option<TraceEvent<St>>,
}

impl<St> Trace<St>
where
    St: State,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            expansions: vec![],
            outcome: None,
        }
    }

    /// Expanded States in expansion order.
    pub fn expansions(&self) -> &[St] {
        &self.expansions
    }

    /// The final `Finished` or `Aborted` event, if the search ended.
    pub fn outcome(&self) -> Option<&TraceEvent<St>> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Replays the recorded search as events.
    pub fn events(&self) -> impl Iterator<Item = TraceEvent<St>> + '_ {
        self.expansions
            .iter()
            .enumerate()
            .map(|(order, state)| TraceEvent::Expanded {
                state: state.clone(),
                order,
            })
            .chain(self.outcome.iter().cloned())
    }
}

impl<St> Default for Trace<St>
where
    St: State,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St> TraceSink<St> for Trace<St>
where
    St: State,
{
    fn expanded(&mut self, state: &St, order: usize) {
        debug_assert_eq!(order, self.expansions.len());
        self.expansions.push(state.clone());
    }
    fn finished(&mut self, path: Option<&Path<St>>) {
        debug_assert!(self.outcome.is_none());
        self.outcome = Some(TraceEvent::Finished {
            path: path.cloned(),
        });
    }
    fn aborted(&mut self, error: &SearchError<St>) {
        debug_assert!(self.outcome.is_none());
        self.outcome = Some(TraceEvent::Aborted {
            error: error.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::sync::mpsc::sync_channel;

    use super::*;

    #[test]
    fn trace_records_in_order() {
        let mut trace = Trace::new();
        trace.expanded(&'A', 0);
        trace.expanded(&'B', 1);
        assert!(!trace.is_finished());
        trace.finished(None);

        assert_eq!(trace.expansions(), &['A', 'B']);
        assert_eq!(trace.outcome(), Some(&TraceEvent::Finished { path: None }));
        assert_eq!(
            trace.events().collect::<Vec<_>>(),
            vec![
                TraceEvent::Expanded {
                    state: 'A',
                    order: 0
                },
                TraceEvent::Expanded {
                    state: 'B',
                    order: 1
                },
                TraceEvent::Finished { path: None },
            ]
        );
    }

    #[test]
    fn unbounded_channel_survives_dropped_receiver() {
        let (mut tx, rx) = channel::<TraceEvent<u32>>();
        tx.expanded(&1, 0);
        assert_eq!(rx.recv(), Ok(TraceEvent::Expanded { state: 1, order: 0 }));

        drop(rx);
        tx.expanded(&2, 1);
        tx.finished(None);
    }

    #[test]
    fn bounded_channel_drops_when_full() {
        let (mut tx, rx) = sync_channel::<TraceEvent<u32>>(1);
        tx.expanded(&1, 0);
        tx.expanded(&2, 1);
        tx.finished(None);

        assert_eq!(rx.try_recv(), Ok(TraceEvent::Expanded { state: 1, order: 0 }));
        assert!(rx.try_recv().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn events_as_json() {
        let event = TraceEvent::Expanded {
            state: 'A',
            order: 0,
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"Expanded":{"state":"A","order":0}}"#
        );

        let event = TraceEvent::Finished {
            path: Some(Path::new(vec!['A', 'B'])),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Finished":{"path":["A","B"]}}"#);
        assert_eq!(serde_json::from_str::<TraceEvent<char>>(&json).unwrap(), event);

        let none = serde_json::from_str::<TraceEvent<char>>(r#"{"Finished":{"path":null}}"#);
        assert_eq!(none.unwrap(), TraceEvent::Finished { path: None });
        assert!(serde_json::from_str::<TraceEvent<char>>(r#"{"Finished":{"path":[]}}"#).is_err());
    }
}
