use super::*;
use crate::*;
use log::{info, warn};

impl Battle {
    /// Builds the deck, shuffles it and deals the opening hand. A side that
    /// starts with no HP ends the battle on the spot.
    pub fn new(
        config: BattleConfig,
        session: Session,
        seed: u64,
        events: &mut EventBus,
    ) -> Result<Self, BattleError> {
        config.validate()?;
        let tables = ScoreTables::from_config(&config);
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::new(config.hand_capacity, config.auto_reshuffle);
        deck.initialize(events);
        deck.shuffle(&mut rng, events);
        let countdown_reset = if session.encounter.turn > 0 {
            session.encounter.turn
        } else {
            config.enemy_turn_countdown
        };
        let hero = session.hero.to_combatant();
        let enemy = session.encounter.to_combatant();
        info!(
            "battle start: {} ({} hp) vs {} ({} hp), enemy acts every {countdown_reset} turns",
            hero.name, hero.hp, enemy.name, enemy.hp
        );
        let mut battle = Self {
            selection: Selection::new(config.max_selection),
            config,
            tables,
            rng,
            deck,
            turn: TurnState::new(countdown_reset),
            countdown_reset,
            hero: Some(hero),
            enemy,
            session,
            stats: BattleStats::default(),
            stats_sink: None,
        };
        battle.deck.refill_hand(&mut battle.rng, events);
        events.push(Event::PhaseChanged {
            phase: battle.turn.phase,
        });
        let hero_down = battle.hero.as_ref().is_some_and(|hero| !hero.is_alive());
        if hero_down {
            warn!("hero starts the battle with no hp");
            battle.set_phase(Phase::BattleLost, events);
        } else if !battle.enemy.is_alive() {
            warn!("enemy starts the battle with no hp");
            battle.set_phase(Phase::BattleWon, events);
        }
        Ok(battle)
    }

    pub fn set_stats_sink(&mut self, sink: Option<Box<dyn StatsSink>>) {
        self.stats_sink = sink;
    }

    pub fn stats_sink(&self) -> Option<&dyn StatsSink> {
        self.stats_sink.as_deref()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self) -> &[Card] {
        self.deck.hand()
    }

    pub fn draw_count(&self) -> usize {
        self.deck.draw_count()
    }

    pub fn discard_count(&self) -> usize {
        self.deck.discard_count()
    }

    pub fn removed_count(&self) -> usize {
        self.deck.removed_count()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_cards(&self) -> Vec<Card> {
        self.selection.cards_in(self.deck.hand())
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    pub fn hero(&self) -> Option<&Combatant> {
        self.hero.as_ref()
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn stats(&self) -> BattleStats {
        self.stats
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.turn.phase {
            Phase::BattleWon => Some(BattleOutcome::Won),
            Phase::BattleLost => Some(BattleOutcome::Lost),
            _ => None,
        }
    }

    /// Combo and score the current selection would produce. Pure.
    pub fn preview(&self) -> Option<ScoreBreakdown> {
        score_selection(
            &self.selected_cards(),
            &self.tables,
            self.config.hand_multiplier,
        )
    }

    /// Puts a living hero in the acting slot. Only between plays.
    pub fn designate_hero(&mut self, hero: Combatant) -> Result<(), BattleError> {
        self.ensure_unlocked()?;
        if hero.kind != CombatantKind::Hero || !hero.is_alive() {
            return Err(BattleError::UnfitHero(hero.id));
        }
        self.hero = Some(hero);
        Ok(())
    }

    pub fn clear_hero(&mut self) -> Result<Option<Combatant>, BattleError> {
        self.ensure_unlocked()?;
        Ok(self.hero.take())
    }

    /// Ends the battle and hands the session back with the hero's HP and
    /// attack written onto it. A hero designated in place of the session's
    /// own leaves the record untouched.
    pub fn finish(self) -> BattleSummary {
        let outcome = self.outcome();
        let mut session = self.session;
        match &self.hero {
            Some(hero) if hero.id == session.hero.id => session.hero.write_back(hero),
            Some(hero) => info!("{} was standing in, session hero not updated", hero.name),
            None => {}
        }
        info!("battle finished: {outcome:?}");
        BattleSummary {
            session,
            outcome,
            stats: self.stats,
        }
    }

    pub(super) fn ensure_unlocked(&self) -> Result<(), BattleError> {
        if self.turn.accepts_play() {
            return Ok(());
        }
        warn!(
            "command rejected while {:?} (can play: {})",
            self.turn.phase, self.turn.can_play_cards
        );
        Err(BattleError::ActionWhileLocked {
            phase: self.turn.phase,
        })
    }

    pub(super) fn set_phase(&mut self, phase: Phase, events: &mut EventBus) {
        if self.turn.phase == phase {
            return;
        }
        info!("phase {:?} -> {phase:?}", self.turn.phase);
        self.turn.phase = phase;
        events.push(Event::PhaseChanged { phase });
        match phase {
            Phase::BattleWon => events.push(Event::BattleWon),
            Phase::BattleLost => events.push(Event::BattleLost),
            _ => {}
        }
    }

    pub(super) fn record_dealt(&mut self, damage: i64) {
        let sink = match self.stats_sink.as_mut() {
            Some(sink) => Some(sink.as_mut() as &mut dyn StatsSink),
            None => None,
        };
        self.stats.record_dealt(damage, sink);
    }

    pub(super) fn record_taken(&mut self, damage: i64) {
        let sink = match self.stats_sink.as_mut() {
            Some(sink) => Some(sink.as_mut() as &mut dyn StatsSink),
            None => None,
        };
        self.stats.record_taken(damage, sink);
    }
}
