use suitstrike_core::{
    Battle, BattleConfig, BattleError, BattleOutcome, CardId, Combatant, CombatantKind, ComboKind,
    DiscardMode, Encounter, EncounterKind, Event, EventBus, HeroRecord, MemoryStats, Phase,
    Session, SortBy, StatsSink, BEST_DAMAGE_DEALT_KEY, DAMAGE_TAKEN_KEY,
};

fn session(hero_hp: i64, enemy_hp: i64, enemy_atk: i64, turn: i32) -> Session {
    Session {
        hero: HeroRecord {
            id: "knight".to_string(),
            name: "Knight".to_string(),
            max_hp: 30,
            hp: hero_hp,
            attack: 4,
            defense: 0,
        },
        encounter: Encounter {
            id: "slime".to_string(),
            name: "Slime".to_string(),
            kind: EncounterKind::MinorEnemy,
            hp: enemy_hp,
            atk: enemy_atk,
            turn,
            stamina: 0,
            gold_reward: 5,
        },
    }
}

fn start(session: Session) -> (Battle, EventBus) {
    let mut events = EventBus::default();
    let battle = Battle::new(BattleConfig::default(), session, 42, &mut events).expect("battle");
    (battle, events)
}

fn first_card(battle: &Battle) -> CardId {
    battle.hand()[0].id()
}

/// Plays the first card in hand alone and resolves the turn.
fn play_single(battle: &mut Battle, events: &mut EventBus) -> i64 {
    let id = first_card(battle);
    battle.select(id).expect("select");
    let report = battle.play_score(events).expect("play");
    battle.resolve_turn(events);
    report.attack_charge
}

#[test]
fn opening_hand_is_full() {
    let (battle, _) = start(session(30, 1000, 5, 0));
    assert_eq!(battle.hand().len(), 8);
    assert_eq!(battle.draw_count(), 44);
    assert_eq!(battle.phase(), Phase::HeroTurn);
    assert_eq!(battle.turn_state().turns_until_enemy_action, 2);
}

#[test]
fn single_card_charge_is_base_plus_rank_bonus() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 0));
    let card = battle.hand()[0].clone();
    battle.select(card.id()).expect("select");
    let preview = battle.preview().expect("preview");
    assert_eq!(preview.combo.kind, ComboKind::HighCard);
    let bonus = battle.tables.rank_bonus(card.rank);
    assert_eq!(preview.total_attack, 10 + bonus);

    let report = battle.play_score(&mut events).expect("play");
    assert_eq!(report.attack_charge, 10 + bonus);
    assert_eq!(battle.phase(), Phase::HeroAttack);
    assert!(battle.selection().is_empty());
    assert_eq!(battle.discard_count(), 1);

    battle.resolve_turn(&mut events);
    assert_eq!(battle.enemy().hp, 1000 - 10 - bonus);
    assert_eq!(battle.hero().map(|hero| hero.attack_charge), Some(0));
    assert_eq!(battle.hand().len(), 8);
}

#[test]
fn enemy_acts_on_the_second_play_with_countdown_two() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 2));

    play_single(&mut battle, &mut events);
    assert_eq!(battle.phase(), Phase::HeroTurn);
    assert_eq!(battle.turn_state().turns_until_enemy_action, 1);
    assert_eq!(battle.hero().map(|hero| hero.hp), Some(30));

    events.drain().for_each(drop);
    play_single(&mut battle, &mut events);
    assert_eq!(battle.phase(), Phase::HeroTurn);
    assert_eq!(battle.hero().map(|hero| hero.hp), Some(25));
    assert_eq!(battle.turn_state().turns_until_enemy_action, 2);
    let enemy_strikes = events
        .pending()
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::Strike {
                    attacker: CombatantKind::Enemy,
                    ..
                }
            )
        })
        .count();
    assert_eq!(enemy_strikes, 1);
}

#[test]
fn step_by_step_phases() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 1));
    battle.select(first_card(&battle)).expect("select");
    battle.play_score(&mut events).expect("play");
    assert_eq!(battle.phase(), Phase::HeroAttack);
    assert_eq!(battle.advance(&mut events), Phase::EnemyCountdown);
    assert_eq!(battle.advance(&mut events), Phase::EnemyTurn);
    assert_eq!(battle.advance(&mut events), Phase::HeroTurn);
    assert_eq!(battle.advance(&mut events), Phase::HeroTurn);
}

#[test]
fn killing_blow_wins_and_locks() {
    let (mut battle, mut events) = start(session(30, 1, 5, 0));
    play_single(&mut battle, &mut events);
    assert_eq!(battle.phase(), Phase::BattleWon);
    assert_eq!(battle.outcome(), Some(BattleOutcome::Won));
    assert!(!battle.enemy().alive);
    assert!(events.pending().iter().any(|event| matches!(event, Event::BattleWon)));

    let id = first_card(&battle);
    assert!(matches!(
        battle.select(id),
        Err(BattleError::ActionWhileLocked { phase: Phase::BattleWon })
    ));
    assert!(battle.play_score(&mut events).is_err());
    assert!(battle.sort_hand(SortBy::Rank, &mut events).is_err());
    assert_eq!(battle.advance(&mut events), Phase::BattleWon);
}

#[test]
fn hero_death_loses() {
    let (mut battle, mut events) = start(session(5, 10_000, 10, 1));
    play_single(&mut battle, &mut events);
    assert_eq!(battle.phase(), Phase::BattleLost);
    assert_eq!(battle.hero().map(|hero| hero.hp), Some(0));

    let summary = battle.finish();
    assert_eq!(summary.outcome, Some(BattleOutcome::Lost));
    assert_eq!(summary.session.hero.hp, 0);
    assert_eq!(summary.stats.damage_taken, 10);
}

#[test]
fn commands_rejected_mid_resolution() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 0));
    battle.select(first_card(&battle)).expect("select");
    battle.play_score(&mut events).expect("play");
    let hand_before = battle.hand().to_vec();

    let other = first_card(&battle);
    assert!(matches!(
        battle.select(other),
        Err(BattleError::ActionWhileLocked { phase: Phase::HeroAttack })
    ));
    assert!(matches!(
        battle.play_score(&mut events),
        Err(BattleError::ActionWhileLocked { .. })
    ));
    assert!(battle.discard(DiscardMode::All, &mut events).is_err());
    assert_eq!(battle.hand(), hand_before.as_slice());
    // sorting is display-only and still allowed
    battle.sort_hand(SortBy::Suit, &mut events).expect("sort");
}

#[test]
fn empty_selection_is_a_no_op() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 0));
    events.drain().for_each(drop);
    let hand_before = battle.hand().to_vec();
    assert!(matches!(
        battle.play_score(&mut events),
        Err(BattleError::InvalidSelection { count: 0 })
    ));
    assert_eq!(battle.phase(), Phase::HeroTurn);
    assert_eq!(battle.hand(), hand_before.as_slice());
    assert!(events.pending().is_empty());
}

#[test]
fn selection_caps_at_five() {
    let (mut battle, _) = start(session(30, 1000, 5, 0));
    let ids: Vec<CardId> = battle.hand().iter().map(|card| card.id()).collect();
    for id in &ids[..5] {
        battle.select(*id).expect("select");
    }
    assert!(matches!(
        battle.select(ids[5]),
        Err(BattleError::SelectionFull(5))
    ));
    assert_eq!(battle.toggle(ids[0]), Ok(false));
    assert_eq!(battle.toggle(ids[5]), Ok(true));
    assert_eq!(battle.selection().len(), 5);
}

#[test]
fn cards_outside_hand_cannot_be_selected() {
    let (mut battle, _) = start(session(30, 1000, 5, 0));
    let outside = battle
        .deck()
        .draw_pile()
        .next()
        .map(|card| card.id())
        .expect("draw pile card");
    assert_eq!(battle.select(outside), Err(BattleError::CardNotInHand(outside)));
}

#[test]
fn discard_refills_hand() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 0));
    let ids: Vec<CardId> = battle.hand().iter().take(3).map(|card| card.id()).collect();
    for id in &ids {
        battle.select(*id).expect("select");
    }
    let moved = battle.discard(DiscardMode::Selected, &mut events).expect("discard");
    assert_eq!(moved.len(), 3);
    assert_eq!(battle.discard_count(), 3);
    assert_eq!(battle.hand().len(), 8);
    assert!(battle.selection().is_empty());
    assert!(ids.iter().all(|id| battle.hand().iter().all(|card| card.id() != *id)));
}

#[test]
fn stats_reach_the_sink() {
    let (mut battle, mut events) = start(session(30, 1000, 7, 1));
    battle.set_stats_sink(Some(Box::new(MemoryStats::new())));
    let charge = play_single(&mut battle, &mut events);

    let sink = battle.stats_sink().expect("sink");
    assert_eq!(sink.get(BEST_DAMAGE_DEALT_KEY), charge);
    assert_eq!(sink.get(DAMAGE_TAKEN_KEY), 7);
    assert_eq!(battle.stats().last_damage_dealt, charge);
}

#[test]
fn no_hero_no_play() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 0));
    battle.select(first_card(&battle)).expect("select");
    let hero = battle.clear_hero().expect("clear").expect("hero");
    assert_eq!(battle.play_score(&mut events), Err(BattleError::NoActingHero));
    battle.designate_hero(hero).expect("designate");
    assert!(battle.play_score(&mut events).is_ok());
}

#[test]
fn finish_writes_hero_back() {
    let (mut battle, mut events) = start(session(30, 1000, 6, 1));
    play_single(&mut battle, &mut events);
    let summary = battle.finish();
    assert_eq!(summary.outcome, None);
    assert_eq!(summary.session.hero.hp, 24);
    assert_eq!(summary.session.encounter.id, "slime");
}

#[test]
fn subscribers_see_events_as_they_happen() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut events = EventBus::default();
    let log = Rc::clone(&seen);
    events.subscribe(move |event| {
        if let Event::ComboPlayed { combo, .. } = event {
            log.borrow_mut().push(*combo);
        }
    });
    let mut battle =
        Battle::new(BattleConfig::default(), session(30, 1000, 5, 0), 42, &mut events)
            .expect("battle");
    play_single(&mut battle, &mut events);
    assert_eq!(seen.borrow().as_slice(), &[ComboKind::HighCard]);
}

#[test]
fn stand_in_hero_leaves_session_record_alone() {
    let (mut battle, mut events) = start(session(30, 1000, 5, 1));
    battle
        .designate_hero(Combatant::hero("mage", "Mage", 40, 9))
        .expect("designate");
    play_single(&mut battle, &mut events);
    assert_eq!(battle.hero().map(|hero| hero.hp), Some(35));

    let summary = battle.finish();
    assert_eq!(summary.session.hero.id, "knight");
    assert_eq!(summary.session.hero.name, "Knight");
    assert_eq!(summary.session.hero.hp, 30);
    assert_eq!(summary.session.hero.max_hp, 30);
}

#[test]
fn defeated_hero_cannot_be_designated() {
    let (mut battle, _) = start(session(30, 1000, 5, 0));
    let mut fallen = Combatant::hero("mage", "Mage", 20, 9);
    fallen.hp = 0;
    fallen.alive = false;
    assert_eq!(
        battle.designate_hero(fallen),
        Err(BattleError::UnfitHero("mage".to_string()))
    );
    let enemy = Combatant::enemy("imp", "Imp", 20, 3, 0);
    assert!(battle.designate_hero(enemy).is_err());
    assert_eq!(battle.hero().map(|hero| hero.id.as_str()), Some("knight"));
}

#[test]
fn hero_at_zero_hp_loses_immediately() {
    let (mut battle, mut events) = start(session(0, 1000, 5, 0));
    assert_eq!(battle.phase(), Phase::BattleLost);
    assert!(events.pending().iter().any(|event| matches!(event, Event::BattleLost)));

    let id = first_card(&battle);
    assert!(matches!(
        battle.select(id),
        Err(BattleError::ActionWhileLocked { phase: Phase::BattleLost })
    ));
    assert!(battle.play_score(&mut events).is_err());
    assert_eq!(battle.resolve_turn(&mut events), Phase::BattleLost);
    assert_eq!(battle.enemy().hp, 1000);

    let summary = battle.finish();
    assert_eq!(summary.outcome, Some(BattleOutcome::Lost));
    assert_eq!(summary.session.hero.hp, 0);
}

#[test]
fn enemy_at_zero_hp_is_already_beaten() {
    let (mut battle, mut events) = start(session(30, 0, 5, 0));
    assert_eq!(battle.phase(), Phase::BattleWon);
    assert_eq!(battle.outcome(), Some(BattleOutcome::Won));
    assert!(battle.play_score(&mut events).is_err());
    assert!(battle.discard(DiscardMode::All, &mut events).is_err());
}

#[test]
fn stamina_softens_the_hero_strike() {
    let mut setup = session(30, 1000, 5, 0);
    setup.encounter.stamina = 50;
    let (mut battle, mut events) = start(setup);
    events.drain().for_each(drop);
    // a x5.1 multiplier keeps the hit large enough to drain stamina
    battle.enhance(first_card(&battle), 40).expect("enhance");

    let charge = play_single(&mut battle, &mut events);
    assert!(charge >= 53);
    let dealt = charge * 7 / 10;
    let strike = events.pending().iter().find_map(|event| match event {
        Event::Strike {
            attacker: CombatantKind::Hero,
            damage,
            ..
        } => Some(*damage),
        _ => None,
    });
    assert_eq!(strike, Some(dealt));
    assert_eq!(battle.enemy().hp, 1000 - dealt);
    assert_eq!(battle.enemy().stamina, 50 - (dealt / 10).min(50));
    assert!(battle.enemy().stamina < 50);
}
