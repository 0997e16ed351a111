//! A running game.
//!
//! `GameSession` owns the current snapshot and is the single writer: every
//! intent goes through `submit`, which takes `&mut self`, so intents are
//! applied strictly one after another. Readers borrow the snapshot or clone
//! it cheaply.
//!
//! Accepted intents are recorded and their events logged through `tracing`.
//! Rejected intents leave the snapshot as it was and are logged at debug
//! level.

use im::Vector;
use tracing::{debug, info};

use crate::core::{GameState, Intent, IntentRecord, PlayerId};
use crate::events::GameEvent;
use crate::rules::{IntentError, PatchworkRules};

/// Rules, the current snapshot and the intent history.
#[derive(Clone, Debug)]
pub struct GameSession {
    rules: PatchworkRules,
    state: GameState,
    history: Vector<IntentRecord>,
}

impl GameSession {
    /// Start a new game with the rules' configured seed.
    #[must_use]
    pub fn new(rules: PatchworkRules) -> Self {
        let state = rules.new_game();
        Self::from_state(rules, state)
    }

    /// Continue from an existing snapshot.
    #[must_use]
    pub fn from_state(rules: PatchworkRules, state: GameState) -> Self {
        info!(
            offer = state.offer().len(),
            window = state.offer_window().len(),
            "session.started"
        );
        Self {
            rules,
            state,
            history: Vector::new(),
        }
    }

    /// Rebuild a session by resubmitting recorded intents from a new game.
    pub fn replay<'a>(
        rules: PatchworkRules,
        records: impl IntoIterator<Item = &'a IntentRecord>,
    ) -> Result<Self, IntentError> {
        let mut session = Self::new(rules);
        for record in records {
            session.submit(record.intent)?;
        }
        Ok(session)
    }

    #[must_use]
    pub fn rules(&self) -> &PatchworkRules {
        &self.rules
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Accepted intents, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<IntentRecord> {
        &self.history
    }

    /// Apply an intent from the active player.
    ///
    /// On success the snapshot is replaced and the events are returned. On
    /// failure the snapshot is unchanged.
    pub fn submit(&mut self, intent: Intent) -> Result<Vec<GameEvent>, IntentError> {
        let player = self.state.active_player();
        let transition = match self.rules.apply(&self.state, &intent) {
            Ok(transition) => transition,
            Err(err) => {
                debug!(%player, ?intent, error = %err, "intent.rejected");
                return Err(err);
            }
        };

        let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.history.push_back(IntentRecord::new(player, intent, sequence));
        self.state = transition.state;

        for event in &transition.events {
            log_event(event);
        }
        if intent.advances_time() {
            debug!(
                %player,
                time_position = self.state.player(player).time_position(),
                next = %self.state.active_player(),
                "turn.advanced"
            );
        }

        Ok(transition.events)
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PatchSelected {
            player,
            patch,
            track_index,
        } => info!(%player, %patch, track_index, "patch.selected"),
        GameEvent::SelectionCancelled { player, patch } => info!(%player, %patch, "selection.cancelled"),
        GameEvent::PatchPlaced {
            player,
            patch,
            row,
            col,
            cost,
            income,
            time_position,
        } => info!(%player, %patch, row, col, cost, income, time_position, "patch.placed"),
        GameEvent::TurnSkipped {
            player,
            buttons_gained,
            time_position,
        } => info!(%player, buttons_gained, time_position, "turn.skipped"),
        GameEvent::ButtonsPaidOut {
            player,
            amount,
            checkpoint,
        } => info!(%player, amount, checkpoint, "buttons.paid_out"),
        GameEvent::BonusPatchGranted {
            player,
            patch,
            checkpoint,
        } => info!(%player, %patch, checkpoint, "bonus_patch.granted"),
        GameEvent::GameEnded { scores } => info!(
            player_one = scores[PlayerId::One],
            player_two = scores[PlayerId::Two],
            "game.ended"
        ),
    }
}
