//! The rules engine: intents in, snapshots and events out.
//!
//! Every transition is a pure function of the input snapshot. The input is
//! never modified; an accepted intent yields a new `GameState` together with
//! the events it caused, a rejected one yields the reason.
//!
//! The plain intent methods (`select_patch`, `place_patch`, `skip_turn`,
//! `cancel_placement`) treat a rejection as a no-op and hand back an
//! unchanged copy of the snapshot. The `try_*` variants and `apply` expose
//! the rejection reason and the emitted events.
//!
//! ## Example
//!
//! ```
//! use patchwork_engine::core::{GameConfig, PlayerId};
//! use patchwork_engine::rules::PatchworkRules;
//!
//! let rules = PatchworkRules::new(GameConfig::default()).unwrap();
//! let state = rules.new_game();
//!
//! let state = rules.skip_turn(&state);
//! assert_eq!(state.player(PlayerId::One).time_position(), 1);
//! assert_eq!(state.player(PlayerId::One).buttons(), 6);
//! assert_eq!(state.active_player(), PlayerId::Two);
//! ```

use std::sync::Arc;

use thiserror::Error;

use super::rewards::{RewardSchedule, Rewards};
use super::scoring::{is_game_over, ScoringPolicy};
use crate::core::{ConfigError, GameConfig, GamePhase, GameRng, GameState, Intent, PlacedPatch, PlayerId, Selection};
use crate::events::GameEvent;
use crate::patches::{CatalogError, PatchCatalog};

/// Why an intent was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("the game has ended")]
    GameEnded,
    #[error("track index {track_index} is not in the purchase window")]
    OutsideOfferWindow { track_index: usize },
    #[error("{player} has {available} buttons but the patch costs {cost}")]
    InsufficientButtons {
        player: PlayerId,
        cost: i32,
        available: i32,
    },
    #[error("no patch is selected")]
    NoSelection,
    #[error("the selected patch belongs to {0}, who is not the active player")]
    SelectionNotActive(PlayerId),
    #[error("the selected patch does not fit at ({row}, {col})")]
    IllegalPlacement { row: usize, col: usize },
}

/// The outcome of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The new snapshot.
    pub state: GameState,
    /// Events caused by the intent, in order.
    pub events: Vec<GameEvent>,
}

/// Patchwork rules for one configuration.
#[derive(Clone, Debug)]
pub struct PatchworkRules {
    config: GameConfig,
    schedule: RewardSchedule,
    scoring: Arc<dyn ScoringPolicy>,
    catalog: PatchCatalog,
}

impl PatchworkRules {
    /// Validate `config` and build its patch catalog.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = PatchCatalog::build(&config.catalog, config.board_size, &GameRng::new(config.seed))?;
        Ok(Self {
            schedule: RewardSchedule::from_config(&config),
            scoring: Arc::new(config.scoring),
            catalog,
            config,
        })
    }

    /// Replace the configured scoring rule with a custom policy.
    #[must_use]
    pub fn with_scoring(mut self, policy: impl ScoringPolicy + 'static) -> Self {
        self.scoring = Arc::new(policy);
        self
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn schedule(&self) -> &RewardSchedule {
        &self.schedule
    }

    /// The catalog new games start from.
    #[must_use]
    pub fn catalog(&self) -> &PatchCatalog {
        &self.catalog
    }

    /// A new game using the configured seed.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new(
            self.config.board_size,
            self.config.initial_buttons,
            self.catalog.patches().iter().cloned().collect(),
            self.config.window_size,
        )
    }

    /// A new game whose random or shuffled catalog is drawn from `seed`.
    pub fn new_game_seeded(&self, seed: u64) -> Result<GameState, CatalogError> {
        let catalog = PatchCatalog::build(&self.config.catalog, self.config.board_size, &GameRng::new(seed))?;
        Ok(GameState::new(
            self.config.board_size,
            self.config.initial_buttons,
            catalog.into_patches().into_iter().collect(),
            self.config.window_size,
        ))
    }

    // === Intents ===

    /// Apply any intent.
    pub fn apply(&self, state: &GameState, intent: &Intent) -> Result<Transition, IntentError> {
        match *intent {
            Intent::SelectPatch { track_index } => self.try_select_patch(state, track_index),
            Intent::PlacePatch { row, col } => self.try_place_patch(state, row, col),
            Intent::SkipTurn => self.try_skip_turn(state),
            Intent::CancelPlacement => self.try_cancel_placement(state),
        }
    }

    /// Select the patch at `track_index` for placement; no-op if illegal.
    #[must_use]
    pub fn select_patch(&self, state: &GameState, track_index: usize) -> GameState {
        unchanged_on_reject(state, self.try_select_patch(state, track_index))
    }

    /// Place the selected patch at `(row, col)`; no-op if illegal.
    #[must_use]
    pub fn place_patch(&self, state: &GameState, row: usize, col: usize) -> GameState {
        unchanged_on_reject(state, self.try_place_patch(state, row, col))
    }

    /// Skip ahead of the opponent and collect buttons; no-op once ended.
    #[must_use]
    pub fn skip_turn(&self, state: &GameState) -> GameState {
        unchanged_on_reject(state, self.try_skip_turn(state))
    }

    /// Drop the pending selection; no-op if there is none.
    #[must_use]
    pub fn cancel_placement(&self, state: &GameState) -> GameState {
        unchanged_on_reject(state, self.try_cancel_placement(state))
    }

    pub fn try_select_patch(&self, state: &GameState, track_index: usize) -> Result<Transition, IntentError> {
        ensure_playing(state)?;
        let player = state.active_player();

        let patch = state
            .offer
            .get(track_index)
            .filter(|_| state.offer.in_window(track_index, state.window_size))
            .ok_or(IntentError::OutsideOfferWindow { track_index })?;

        let available = state.players[player].buttons;
        if available < patch.cost {
            return Err(IntentError::InsufficientButtons {
                player,
                cost: patch.cost,
                available,
            });
        }

        let mut next = state.clone();
        next.selection = Some(Selection {
            player,
            track_index,
            patch: patch.clone(),
        });

        Ok(Transition {
            state: next,
            events: vec![GameEvent::PatchSelected {
                player,
                patch: patch.id,
                track_index,
            }],
        })
    }

    pub fn try_place_patch(&self, state: &GameState, row: usize, col: usize) -> Result<Transition, IntentError> {
        ensure_playing(state)?;
        let selection = state.selection.as_ref().ok_or(IntentError::NoSelection)?;
        let player = state.active_player();
        if selection.player != player {
            return Err(IntentError::SelectionNotActive(selection.player));
        }

        let patch = &selection.patch;
        let current = &state.players[player];
        let opponent = &state.players[player.opponent()];

        let board = current
            .board
            .with_patch(patch.id, &patch.shape, row, col)
            .ok_or(IntentError::IllegalPlacement { row, col })?;
        let time = self.advance(current.time_position, patch.time);
        let rewards = self.schedule.evaluate(current, opponent, time);

        let mut next = state.clone();
        let placer = &mut next.players[player];
        placer.empty_cells = board.empty_cells();
        placer.board = board;
        placer.time_position = time;
        placer.buttons = placer
            .buttons
            .saturating_sub(patch.cost)
            .saturating_add(patch.income)
            .saturating_add(rewards.buttons);
        placer.accumulated_buttons = if rewards.paid_out() {
            0
        } else {
            placer.accumulated_buttons.saturating_add(patch.income)
        };
        if rewards.bonus.is_some() {
            placer.independent_patches += 1;
        }
        placer.placed.push_back(PlacedPatch {
            patch: patch.clone(),
            row,
            col,
        });

        next.offer = state.offer.acquire(patch.id, selection.track_index, rewards.bonus.clone());
        next.selection = None;
        next.current_player = player;

        let mut events = vec![GameEvent::PatchPlaced {
            player,
            patch: patch.id,
            row,
            col,
            cost: patch.cost,
            income: patch.income,
            time_position: time,
        }];
        push_reward_events(&mut events, player, time, &rewards);
        self.finish_if_over(&mut next, &mut events);

        Ok(Transition { state: next, events })
    }

    pub fn try_skip_turn(&self, state: &GameState) -> Result<Transition, IntentError> {
        ensure_playing(state)?;
        let player = state.active_player();
        let current = &state.players[player];
        let opponent = &state.players[player.opponent()];

        let time_diff = i32::try_from(opponent.time_position.saturating_sub(current.time_position))
            .unwrap_or(i32::MAX)
            .max(1);
        // Lands one step past the opponent; the active player is never ahead.
        let time = self
            .advance(opponent.time_position, 1)
            .max(current.time_position);
        let rewards = self.schedule.evaluate(current, opponent, time);

        let mut next = state.clone();
        let skipper = &mut next.players[player];
        skipper.time_position = time;
        let gained = time_diff.saturating_add(rewards.buttons);
        skipper.buttons = skipper.buttons.saturating_add(gained);
        if rewards.paid_out() {
            skipper.accumulated_buttons = 0;
        }
        if let Some(bonus) = &rewards.bonus {
            skipper.independent_patches += 1;
            next.offer = state.offer.append(bonus.clone());
        }
        next.current_player = player;

        let mut events = Vec::new();
        if let Some(dropped) = next.selection.take() {
            events.push(GameEvent::SelectionCancelled {
                player: dropped.player,
                patch: dropped.patch.id,
            });
        }
        events.push(GameEvent::TurnSkipped {
            player,
            buttons_gained: gained,
            time_position: time,
        });
        push_reward_events(&mut events, player, time, &rewards);
        self.finish_if_over(&mut next, &mut events);

        Ok(Transition { state: next, events })
    }

    pub fn try_cancel_placement(&self, state: &GameState) -> Result<Transition, IntentError> {
        let selection = state.selection.as_ref().ok_or(IntentError::NoSelection)?;

        let mut next = state.clone();
        next.selection = None;

        Ok(Transition {
            state: next,
            events: vec![GameEvent::SelectionCancelled {
                player: selection.player,
                patch: selection.patch.id,
            }],
        })
    }

    // === Queries ===

    /// Every intent the engine would currently accept.
    ///
    /// Lets a presentation layer disable unaffordable patches and highlight
    /// legal anchor cells. The engine still re-validates whatever it is
    /// given.
    #[must_use]
    pub fn legal_intents(&self, state: &GameState) -> Vec<Intent> {
        if state.is_ended() {
            return Vec::new();
        }

        let mut intents: Vec<Intent> = state
            .offer_window()
            .iter()
            .filter(|slot| self.can_afford(state, slot.track_index))
            .map(|slot| Intent::SelectPatch {
                track_index: slot.track_index,
            })
            .collect();

        if let Some(selection) = state.selection() {
            if selection.player == state.active_player() {
                let board = state.board(selection.player);
                intents.extend(
                    board
                        .cells()
                        .filter(|&((row, col), _)| board.can_place(&selection.patch.shape, row, col))
                        .map(|((row, col), _)| Intent::PlacePatch { row, col }),
                );
            }
            intents.push(Intent::CancelPlacement);
        }

        intents.push(Intent::SkipTurn);
        intents
    }

    /// Whether the active player could buy the patch at `track_index`.
    #[must_use]
    pub fn can_afford(&self, state: &GameState, track_index: usize) -> bool {
        state
            .offer
            .get(track_index)
            .is_some_and(|patch| state.players[state.active_player()].buttons >= patch.cost)
    }

    // === Internals ===

    fn advance(&self, from: u32, steps: u32) -> u32 {
        from.saturating_add(steps).min(self.config.track_length)
    }

    fn finish_if_over(&self, next: &mut GameState, events: &mut Vec<GameEvent>) {
        let one = next.players[PlayerId::One].time_position;
        let two = next.players[PlayerId::Two].time_position;
        if next.phase == GamePhase::Ended || !is_game_over(one, two, self.config.track_length) {
            return;
        }

        next.phase = GamePhase::Ended;
        next.selection = None;
        for player in PlayerId::all() {
            let score = self.scoring.final_score(&next.players[player]);
            next.players[player].score = Some(score);
        }
        if let Some(scores) = next.scores() {
            events.push(GameEvent::GameEnded { scores });
        }
    }
}

fn ensure_playing(state: &GameState) -> Result<(), IntentError> {
    if state.is_ended() {
        Err(IntentError::GameEnded)
    } else {
        Ok(())
    }
}

fn unchanged_on_reject(state: &GameState, result: Result<Transition, IntentError>) -> GameState {
    result.map_or_else(|_| state.clone(), |transition| transition.state)
}

fn push_reward_events(events: &mut Vec<GameEvent>, player: PlayerId, checkpoint: u32, rewards: &Rewards) {
    if rewards.paid_out() {
        events.push(GameEvent::ButtonsPaidOut {
            player,
            amount: rewards.buttons,
            checkpoint,
        });
    }
    if let Some(bonus) = &rewards.bonus {
        events.push(GameEvent::BonusPatchGranted {
            player,
            patch: bonus.id,
            checkpoint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patches::{CatalogSource, PatchId, PatchSpec};

    fn custom(id: u32, shape: Vec<Vec<u8>>, cost: i32, time: u32, income: i32) -> PatchSpec {
        PatchSpec {
            id,
            shape,
            cost,
            time,
            income,
            color: None,
        }
    }

    /// Eight single-cell patches; patch `n` costs `n - 1` and takes `n` steps.
    fn rules() -> PatchworkRules {
        let patches = (1..=8).map(|n| custom(n, vec![vec![1]], n as i32 - 1, n, 1)).collect();
        PatchworkRules::new(GameConfig::default().with_catalog(CatalogSource::Custom { patches })).unwrap()
    }

    fn at(rules: &PatchworkRules, one: u32, two: u32) -> GameState {
        let mut state = rules.new_game();
        state.players[PlayerId::One].time_position = one;
        state.players[PlayerId::Two].time_position = two;
        state
    }

    #[test]
    fn test_new_game() {
        let rules = rules();
        let state = rules.new_game();

        assert_eq!(state.offer().len(), 8);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.active_player(), PlayerId::One);
        assert_eq!(state.player(PlayerId::Two).buttons(), 5);
    }

    #[test]
    fn test_select_patch_in_window() {
        let rules = rules();
        let state = rules.new_game();

        let transition = rules.try_select_patch(&state, 1).unwrap();
        let selection = transition.state.selection().unwrap();
        assert_eq!(selection.patch.id, PatchId::new(2));
        assert_eq!(selection.player, PlayerId::One);
        assert!(transition.state.placement_mode());
        assert_eq!(
            transition.events,
            vec![GameEvent::PatchSelected {
                player: PlayerId::One,
                patch: PatchId::new(2),
                track_index: 1
            }]
        );
        // Input untouched
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_select_outside_window_rejected() {
        let rules = rules();
        let state = rules.new_game();

        assert_eq!(
            rules.try_select_patch(&state, 0),
            Err(IntentError::OutsideOfferWindow { track_index: 0 })
        );
        assert_eq!(
            rules.try_select_patch(&state, 4),
            Err(IntentError::OutsideOfferWindow { track_index: 4 })
        );
        assert_eq!(
            rules.try_select_patch(&state, 99),
            Err(IntentError::OutsideOfferWindow { track_index: 99 })
        );
        assert_eq!(rules.select_patch(&state, 0), state);
    }

    #[test]
    fn test_select_unaffordable_rejected() {
        let rules = rules();
        let mut state = rules.new_game();
        state.players[PlayerId::One].buttons = 2;

        // Patch 4 costs 3
        assert_eq!(
            rules.try_select_patch(&state, 3),
            Err(IntentError::InsufficientButtons {
                player: PlayerId::One,
                cost: 3,
                available: 2
            })
        );
        assert!(rules.try_select_patch(&state, 2).is_ok());
    }

    #[test]
    fn test_place_patch_updates_economy() {
        let rules = rules();
        let state = rules.new_game();

        // Patch 3: cost 2, time 3, income 1
        let state = rules.select_patch(&state, 2);
        let transition = rules.try_place_patch(&state, 4, 4).unwrap();
        let next = transition.state;
        let one = next.player(PlayerId::One);

        assert_eq!(one.board().get(4, 4), Some(PatchId::new(3)));
        assert_eq!(one.empty_cells(), 80);
        assert_eq!(one.time_position(), 3);
        assert_eq!(one.buttons(), 5 - 2 + 1);
        assert_eq!(one.accumulated_buttons(), 1);
        assert_eq!(next.offer().len(), 7);
        assert_eq!(next.offer().marker(), 2);
        assert!(next.selection().is_none());
        assert_eq!(next.current_player(), PlayerId::One);
        assert_eq!(next.active_player(), PlayerId::Two);
        assert_eq!(next.patch_at(PlayerId::One, 4, 4).map(|p| p.id), Some(PatchId::new(3)));
    }

    #[test]
    fn test_place_without_selection_rejected() {
        let rules = rules();
        let state = rules.new_game();

        assert_eq!(rules.try_place_patch(&state, 0, 0), Err(IntentError::NoSelection));
        assert_eq!(rules.place_patch(&state, 0, 0), state);
    }

    #[test]
    fn test_illegal_placement_rejected() {
        let rules = rules();
        let state = rules.select_patch(&rules.new_game(), 1);

        assert_eq!(
            rules.try_place_patch(&state, 9, 0),
            Err(IntentError::IllegalPlacement { row: 9, col: 0 })
        );
        let unchanged = rules.place_patch(&state, 0, 9);
        assert_eq!(unchanged, state);
        assert!(unchanged.placement_mode());
    }

    #[test]
    fn test_button_payout_on_exact_landing() {
        let rules = rules();
        let mut state = at(&rules, 2, 20);
        state.players[PlayerId::One].accumulated_buttons = 4;

        // Patch 3 takes 3 steps: 2 -> 5
        let state = rules.select_patch(&state, 2);
        let transition = rules.try_place_patch(&state, 0, 0).unwrap();
        let one = transition.state.player(PlayerId::One);

        assert_eq!(one.time_position(), 5);
        assert_eq!(one.buttons(), 5 - 2 + 1 + 4);
        assert_eq!(one.accumulated_buttons(), 0);
        assert!(transition.events.contains(&GameEvent::ButtonsPaidOut {
            player: PlayerId::One,
            amount: 4,
            checkpoint: 5
        }));
    }

    #[test]
    fn test_no_payout_when_passing_over() {
        let rules = rules();
        let mut state = at(&rules, 3, 20);
        state.players[PlayerId::One].accumulated_buttons = 4;

        // Patch 4 takes 4 steps: 3 -> 7, over checkpoint 5
        let state = rules.select_patch(&state, 3);
        let next = rules.place_patch(&state, 0, 0);
        let one = next.player(PlayerId::One);

        assert_eq!(one.time_position(), 7);
        assert_eq!(one.buttons(), 5 - 3 + 1);
        assert_eq!(one.accumulated_buttons(), 5);
    }

    #[test]
    fn test_time_clamped_to_track_end() {
        let rules = rules();
        let state = at(&rules, 50, 52);

        let state = rules.select_patch(&state, 3);
        let next = rules.place_patch(&state, 0, 0);

        assert_eq!(next.player(PlayerId::One).time_position(), 52);
        assert!(next.is_ended());
    }

    #[test]
    fn test_bonus_patch_on_placement() {
        let rules = rules();
        let state = at(&rules, 23, 10);

        // Player Two is behind, so move them past One first.
        let state = rules.skip_turn(&state);
        assert_eq!(state.player(PlayerId::Two).time_position(), 24);

        // Patch 3 takes 3 steps: 23 -> 26
        let state = rules.select_patch(&state, 2);
        let transition = rules.try_place_patch(&state, 0, 0).unwrap();
        let next = &transition.state;

        assert_eq!(next.player(PlayerId::One).independent_patches(), 1);
        assert_eq!(next.offer().len(), 8);
        assert_eq!(
            next.offer().iter().last().map(|p| p.id),
            Some(PatchId::reward(26))
        );
        assert!(transition.events.contains(&GameEvent::BonusPatchGranted {
            player: PlayerId::One,
            patch: PatchId::reward(26),
            checkpoint: 26
        }));
    }

    #[test]
    fn test_skip_turn_formula() {
        let rules = rules();
        let state = at(&rules, 4, 9);

        let transition = rules.try_skip_turn(&state).unwrap();
        let one = transition.state.player(PlayerId::One);

        assert_eq!(one.time_position(), 10);
        assert_eq!(one.buttons(), 5 + 5);
        assert_eq!(transition.state.active_player(), PlayerId::Two);
        assert_eq!(
            transition.events,
            vec![GameEvent::TurnSkipped {
                player: PlayerId::One,
                buttons_gained: 5,
                time_position: 10
            }]
        );
    }

    #[test]
    fn test_skip_turn_pays_checkpoint_and_grants_bonus() {
        let rules = rules();
        let mut state = at(&rules, 20, 25);
        state.players[PlayerId::One].accumulated_buttons = 3;

        // 20 -> 26: bonus checkpoint, Two is at 25 < 26
        let next = rules.skip_turn(&state);
        let one = next.player(PlayerId::One);
        assert_eq!(one.time_position(), 26);
        assert_eq!(one.independent_patches(), 1);
        assert_eq!(one.accumulated_buttons(), 3);
        assert_eq!(next.offer().len(), 9);
        assert_eq!(next.offer().marker(), state.offer().marker());

        // 16 -> 17 is a button checkpoint
        let mut state = at(&rules, 10, 16);
        state.players[PlayerId::One].accumulated_buttons = 3;
        let next = rules.skip_turn(&state);
        let one = next.player(PlayerId::One);
        assert_eq!(one.buttons(), 5 + 6 + 3);
        assert_eq!(one.accumulated_buttons(), 0);
    }

    #[test]
    fn test_skip_clears_pending_selection() {
        let rules = rules();
        let state = rules.select_patch(&rules.new_game(), 1);

        let transition = rules.try_skip_turn(&state).unwrap();
        assert!(transition.state.selection().is_none());
        assert_eq!(
            transition.events[0],
            GameEvent::SelectionCancelled {
                player: PlayerId::One,
                patch: PatchId::new(2)
            }
        );
    }

    #[test]
    fn test_cancel_placement() {
        let rules = rules();
        let selected = rules.select_patch(&rules.new_game(), 1);

        let cancelled = rules.cancel_placement(&selected);
        assert!(cancelled.selection().is_none());
        assert_eq!(cancelled.player(PlayerId::One), selected.player(PlayerId::One));
        assert_eq!(cancelled.offer(), selected.offer());

        assert_eq!(rules.try_cancel_placement(&cancelled), Err(IntentError::NoSelection));
    }

    #[test]
    fn test_tie_keeps_mover_active() {
        let rules = rules();
        let state = at(&rules, 3, 5);

        // Patch 2 takes 2 steps: One lands on Two's space.
        let state = rules.select_patch(&state, 1);
        let next = rules.place_patch(&state, 0, 0);

        assert_eq!(next.player(PlayerId::One).time_position(), 5);
        assert_eq!(next.active_player(), PlayerId::One);
    }

    #[test]
    fn test_game_end_scores_once() {
        let rules = rules();
        let state = at(&rules, 51, 52);

        let transition = rules.try_skip_turn(&state).unwrap();
        let ended = transition.state;

        assert!(ended.is_ended());
        let scores = ended.scores().unwrap();
        assert_eq!(scores[PlayerId::One], ended.player(PlayerId::One).buttons() - 81 * 2);
        assert_eq!(scores[PlayerId::Two], 5 - 81 * 2);
        assert!(matches!(transition.events.last(), Some(GameEvent::GameEnded { .. })));

        assert_eq!(rules.try_skip_turn(&ended), Err(IntentError::GameEnded));
        assert_eq!(rules.try_select_patch(&ended, 1), Err(IntentError::GameEnded));
        assert_eq!(rules.try_place_patch(&ended, 0, 0), Err(IntentError::GameEnded));
        assert_eq!(rules.skip_turn(&ended), ended);
        assert!(rules.legal_intents(&ended).is_empty());
    }

    #[test]
    fn test_custom_scoring_policy() {
        #[derive(Debug)]
        struct ButtonsOnly;

        impl ScoringPolicy for ButtonsOnly {
            fn final_score(&self, player: &crate::core::PlayerState) -> i32 {
                player.buttons()
            }
        }

        let rules = rules().with_scoring(ButtonsOnly);
        let ended = rules.skip_turn(&at(&rules, 51, 52));

        assert_eq!(ended.player(PlayerId::Two).score(), Some(5));
    }

    #[test]
    fn test_legal_intents() {
        let rules = rules();
        let mut state = rules.new_game();
        state.players[PlayerId::One].buttons = 1;

        // Window holds patches 2, 3, 4 costing 1, 2, 3.
        let intents = rules.legal_intents(&state);
        assert_eq!(intents, vec![Intent::SelectPatch { track_index: 1 }, Intent::SkipTurn]);

        let selected = rules.select_patch(&state, 1);
        let intents = rules.legal_intents(&selected);
        let placements = intents
            .iter()
            .filter(|i| matches!(i, Intent::PlacePatch { .. }))
            .count();
        assert_eq!(placements, 81);
        assert!(intents.contains(&Intent::CancelPlacement));
    }

    #[test]
    fn test_huge_economy_saturates() {
        let patches = vec![
            custom(1, vec![vec![1]], 0, 1, 0),
            custom(2, vec![vec![1]], 0, 1, i32::MAX),
            custom(3, vec![vec![1]], 0, 1, i32::MAX),
            custom(4, vec![vec![1]], 0, 1, 0),
        ];
        let rules = PatchworkRules::new(GameConfig::default().with_catalog(CatalogSource::Custom { patches })).unwrap();
        let mut state = at(&rules, 0, 4);

        state = rules.place_patch(&rules.select_patch(&state, 1), 0, 0);
        state = rules.place_patch(&rules.select_patch(&state, 1), 0, 1);
        let one = state.player(PlayerId::One);
        assert_eq!(one.time_position(), 2);
        assert_eq!(one.buttons(), i32::MAX);
        assert_eq!(one.accumulated_buttons(), i32::MAX);

        // 2 -> 5 pays out the saturated bank on top of a full purse.
        let next = rules.skip_turn(&state);
        let one = next.player(PlayerId::One);
        assert_eq!(one.time_position(), 5);
        assert_eq!(one.buttons(), i32::MAX);
        assert_eq!(one.accumulated_buttons(), 0);
    }

    #[test]
    fn test_new_game_seeded() {
        let rules = PatchworkRules::new(GameConfig::default()).unwrap();

        let a = rules.new_game_seeded(11).unwrap();
        let b = rules.new_game_seeded(11).unwrap();
        let c = rules.new_game_seeded(12).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.offer(), c.offer());
        assert_eq!(rules.new_game(), rules.new_game_seeded(0).unwrap());
    }

    #[test]
    fn test_invalid_custom_catalog_rejected() {
        let config = GameConfig::default().with_catalog(CatalogSource::Custom {
            patches: vec![custom(1, vec![vec![1]], 0, 1, 0), custom(1, vec![vec![1]], 0, 1, 0)],
        });

        assert!(matches!(
            PatchworkRules::new(config),
            Err(ConfigError::Catalog(CatalogError::DuplicateId(_)))
        ));
    }
}
