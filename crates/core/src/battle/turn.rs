use super::*;
use crate::*;
use log::{debug, info};

impl Battle {
    /// Scores the selected cards and charges the hero's attack. Runs to
    /// completion once accepted and leaves the battle in `HeroAttack` with
    /// card play locked; [`Battle::advance`] carries out the strike.
    pub fn play_score(&mut self, events: &mut EventBus) -> Result<PlayReport, BattleError> {
        self.ensure_unlocked()?;
        if self.hero.is_none() {
            return Err(BattleError::NoActingHero);
        }
        let count = self.selection.len();
        if count == 0 || count > self.config.max_selection {
            return Err(BattleError::InvalidSelection { count });
        }
        let selected = self.selected_cards();
        let combo = evaluate_combo(&selected, &self.tables)
            .ok_or(BattleError::InvalidSelection { count })?;
        let Some(hero) = self.hero.as_mut() else {
            return Err(BattleError::NoActingHero);
        };

        self.turn.can_play_cards = false;
        let outcome = compute_score(&combo, &selected, self.config.hand_multiplier);
        info!(
            "played {} for {} (x{:.1})",
            combo.kind.id(),
            outcome.final_score,
            outcome.combo_multiplier
        );
        events.push(Event::ComboPlayed {
            combo: combo.kind,
            base_score: combo.base_score,
            scoring: combo.scoring_cards.len(),
        });
        events.push(Event::ScoreCalculated {
            score: outcome.final_score,
            multiplier: outcome.display_multiplier,
        });
        apply_score_to_attack(hero, outcome.final_score);

        let played = self.selection.ids().to_vec();
        self.deck.discard_from_hand(&played, events);
        self.selection.clear();

        let mut rank_bonuses = Vec::with_capacity(combo.scoring_cards.len());
        for card in &combo.scoring_cards {
            let bonus = self.tables.rank_bonus(card.rank);
            let charge = apply_score_to_attack(hero, bonus);
            debug!("{card} adds {bonus}, attack charge {charge}");
            rank_bonuses.push(bonus);
            events.push(Event::CardScored {
                card: card.clone(),
                bonus,
                charge,
            });
        }
        let attack_charge = hero.attack_charge;
        self.set_phase(Phase::HeroAttack, events);

        Ok(PlayReport {
            combo,
            outcome,
            rank_bonuses,
            attack_charge,
        })
    }

    /// Performs the mutation of the phase the battle is in and moves to the
    /// next one. No-op in `HeroTurn` and the terminal phases.
    pub fn advance(&mut self, events: &mut EventBus) -> Phase {
        match self.turn.phase {
            Phase::HeroAttack => self.resolve_hero_attack(events),
            Phase::EnemyCountdown => {
                if self.turn.turns_until_enemy_action <= 0 && self.enemy.is_alive() {
                    self.set_phase(Phase::EnemyTurn, events);
                } else {
                    self.begin_hero_turn(events);
                }
            }
            Phase::EnemyTurn => self.resolve_enemy_turn(events),
            Phase::HeroTurn | Phase::BattleWon | Phase::BattleLost => {}
        }
        self.turn.phase
    }

    /// Advances until the hero can act again or the battle is over.
    pub fn resolve_turn(&mut self, events: &mut EventBus) -> Phase {
        while !matches!(
            self.turn.phase,
            Phase::HeroTurn | Phase::BattleWon | Phase::BattleLost
        ) {
            self.advance(events);
        }
        self.turn.phase
    }

    fn resolve_hero_attack(&mut self, events: &mut EventBus) {
        if let Some(hero) = self.hero.as_mut() {
            let power = strike_power(hero);
            hero.attack_charge = 0;
            let report = apply_damage(&mut self.enemy, power);
            info!(
                "{} strikes {} for {} ({} hp left)",
                hero.name, self.enemy.name, report.dealt, self.enemy.hp
            );
            events.push(Event::Strike {
                attacker: CombatantKind::Hero,
                target: CombatantKind::Enemy,
                damage: report.dealt,
                hp_left: self.enemy.hp,
            });
            self.record_dealt(report.dealt);
            if report.died {
                self.set_phase(Phase::BattleWon, events);
                return;
            }
        }
        self.turn.turns_until_enemy_action -= 1;
        events.push(Event::TurnCountdown {
            remaining: self.turn.turns_until_enemy_action,
        });
        self.set_phase(Phase::EnemyCountdown, events);
    }

    fn resolve_enemy_turn(&mut self, events: &mut EventBus) {
        if let Some(hero) = self.hero.as_mut() {
            let power = strike_power(&self.enemy);
            let report = apply_damage(hero, power);
            info!(
                "{} strikes {} for {} ({} hp left)",
                self.enemy.name, hero.name, report.dealt, hero.hp
            );
            events.push(Event::Strike {
                attacker: CombatantKind::Enemy,
                target: CombatantKind::Hero,
                damage: report.dealt,
                hp_left: hero.hp,
            });
            self.record_taken(report.dealt);
            if report.died {
                self.set_phase(Phase::BattleLost, events);
                return;
            }
        }
        self.turn.turns_until_enemy_action = self.countdown_reset;
        events.push(Event::TurnCountdown {
            remaining: self.turn.turns_until_enemy_action,
        });
        self.begin_hero_turn(events);
    }

    fn begin_hero_turn(&mut self, events: &mut EventBus) {
        self.turn.can_play_cards = true;
        self.deck.refill_hand(&mut self.rng, events);
        self.set_phase(Phase::HeroTurn, events);
    }
}
