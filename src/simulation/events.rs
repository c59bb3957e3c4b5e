use std::sync::mpsc;

use log::debug;

use crate::game::Player;

/// Discrete facts emitted by a match for the statistics aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchEvent {
    PlayerWon(Player),
    Draw,
    BlockedMove(Player),
    CentralColumnPlayed(Player),
}

/// Anything that consumes match events.
pub trait EventSink {
    fn record(&mut self, event: MatchEvent);
}

impl EventSink for Vec<MatchEvent> {
    fn record(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

/// Forwards events to a single aggregating receiver. Events sent after the
/// receiver hangs up are logged and dropped.
impl EventSink for mpsc::Sender<MatchEvent> {
    fn record(&mut self, event: MatchEvent) {
        if let Err(mpsc::SendError(event)) = self.send(event) {
            debug!("receiver closed, dropping {event:?}");
        }
    }
}
