use std::io::{self, Write};
use std::path::PathBuf;
use suitstrike_core::{
    score_selection, Battle, BattleError, Card, CardId, CombatantKind, DiscardMode, Edition, Event,
    EventBus, Phase, ScoreBreakdown, SortBy,
};
use suitstrike_data::load_assets;

const DEFAULT_SEED: u64 = 0xC0FFEE;
const AUTO_TURN_LIMIT: usize = 200;

#[derive(Debug, Clone)]
struct CliOptions {
    auto: bool,
    seed: u64,
    hero: String,
    encounter: String,
    assets: PathBuf,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        auto: false,
        seed: DEFAULT_SEED,
        hero: "knight".to_string(),
        encounter: "slime".to_string(),
        assets: PathBuf::from("assets"),
    };
    let mut idx = 0usize;
    while idx < args.len() {
        let value = args.get(idx + 1);
        match (args[idx].as_str(), value) {
            ("--auto", _) => options.auto = true,
            ("--seed", Some(value)) => {
                if let Ok(seed) = value.parse::<u64>() {
                    options.seed = seed;
                }
                idx += 1;
            }
            ("--hero", Some(value)) => {
                options.hero = value.clone();
                idx += 1;
            }
            ("--encounter" | "--enemy", Some(value)) => {
                options.encounter = value.clone();
                idx += 1;
            }
            ("--assets", Some(value)) => {
                options.assets = PathBuf::from(value);
                idx += 1;
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn main() {
    // Battle flow at info, everything else at warn; RUST_LOG overrides.
    let default = "warn,suitstrike_core=info";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let mut events = EventBus::default();
    let mut battle = match build_battle(&options, &mut events) {
        Ok(battle) => battle,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };
    print_events(&mut events);

    if options.auto {
        run_auto(&mut battle, &mut events);
    } else {
        run_interactive(&mut battle, &mut events);
    }

    let summary = battle.finish();
    println!(
        "result: {:?}, hero hp {}/{}, best hit {}, damage taken {}",
        summary.outcome,
        summary.session.hero.hp,
        summary.session.hero.max_hp,
        summary.stats.best_damage_dealt,
        summary.stats.damage_taken
    );
    match serde_json::to_string_pretty(&summary.session.hero) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("error: {err}"),
    }
}

fn build_battle(options: &CliOptions, events: &mut EventBus) -> anyhow::Result<Battle> {
    let assets = load_assets(&options.assets)?;
    let session = assets.session(&options.hero, &options.encounter)?;
    println!(
        "{} vs {} (seed {})",
        session.hero.name, session.encounter.name, options.seed
    );
    Ok(Battle::new(assets.config, session, options.seed, events)?)
}

/// Plays the best-scoring prefix of the rank-sorted hand every turn.
fn run_auto(battle: &mut Battle, events: &mut EventBus) {
    for _ in 0..AUTO_TURN_LIMIT {
        if battle.phase().is_terminal() {
            break;
        }
        if let Err(err) = auto_play(battle, events) {
            eprintln!("error: {err}");
            break;
        }
        battle.resolve_turn(events);
        print_events(events);
    }
}

fn auto_play(battle: &mut Battle, events: &mut EventBus) -> Result<(), BattleError> {
    battle.sort_hand(SortBy::Rank, events)?;
    let ids: Vec<CardId> = battle.hand().iter().rev().map(Card::id).collect();
    let limit = battle.config.max_selection.min(ids.len());
    let mut best: Option<(i64, usize)> = None;
    for count in 1..=limit {
        let candidate: Vec<Card> = battle.hand().iter().rev().take(count).cloned().collect();
        let total = score_selection(&candidate, &battle.tables, battle.config.hand_multiplier)
            .map(|breakdown| breakdown.total_attack)
            .unwrap_or(0);
        if best.map_or(true, |(score, _)| total > score) {
            best = Some((total, count));
        }
    }
    let count = best.map_or(1, |(_, count)| count);
    for id in &ids[..count] {
        battle.select(*id)?;
    }
    let report = battle.play_score(events)?;
    println!(
        "played {:?} for {} attack",
        report.combo.kind, report.attack_charge
    );
    Ok(())
}

fn run_interactive(battle: &mut Battle, events: &mut EventBus) {
    print_help();
    print_hand(battle);
    loop {
        if battle.phase().is_terminal() {
            break;
        }
        let Some(line) = read_line("> ") else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        match command {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            "hand" | "ls" => print_hand(battle),
            "status" | "st" => print_status(battle),
            "preview" | "pv" => print_preview(battle.preview()),
            "select" | "s" => {
                with_indices(battle, &args, |battle, id| battle.select(id).map(|_| ()));
                print_hand(battle);
            }
            "toggle" | "t" => {
                with_indices(battle, &args, |battle, id| battle.toggle(id).map(|_| ()));
                print_hand(battle);
            }
            "deselect" | "u" => {
                with_indices(battle, &args, |battle, id| battle.deselect(id).map(|_| ()));
                print_hand(battle);
            }
            "play" | "p" => {
                if !args.is_empty() {
                    with_indices(battle, &args, |battle, id| battle.select(id).map(|_| ()));
                }
                match battle.play_score(events) {
                    Ok(report) => {
                        println!(
                            "{:?}: {} x{} = {}, attack {}",
                            report.combo.kind,
                            report.outcome.base_score,
                            report.outcome.display_multiplier,
                            report.outcome.final_score,
                            report.attack_charge
                        );
                        battle.resolve_turn(events);
                    }
                    Err(err) => println!("error: {err}"),
                }
                print_events(events);
                print_hand(battle);
            }
            "discard" | "d" => {
                let mode = if args.first() == Some(&"all") {
                    DiscardMode::All
                } else {
                    if !args.is_empty() {
                        with_indices(battle, &args, |battle, id| battle.select(id).map(|_| ()));
                    }
                    DiscardMode::selected_or_all(battle.selection())
                };
                match battle.discard(mode, events) {
                    Ok(moved) => println!("discarded {}", moved.len()),
                    Err(err) => println!("error: {err}"),
                }
                print_events(events);
                print_hand(battle);
            }
            "sort" => {
                let by = match args.first() {
                    Some(&"suit") => SortBy::Suit,
                    _ => SortBy::Rank,
                };
                if let Err(err) = battle.sort_hand(by, events) {
                    println!("error: {err}");
                }
                print_events(events);
                print_hand(battle);
            }
            _ => println!("unknown command: {command} (try help)"),
        }
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line)
}

/// Resolves hand indices up front so later commands see stable card ids.
fn with_indices(
    battle: &mut Battle,
    args: &[&str],
    mut apply: impl FnMut(&mut Battle, CardId) -> Result<(), BattleError>,
) {
    let indices = match parse_indices_result(args) {
        Ok(indices) => indices,
        Err(err) => {
            println!("error: {err}");
            return;
        }
    };
    let ids: Vec<Option<CardId>> = indices
        .iter()
        .map(|&idx| battle.hand().get(idx).map(Card::id))
        .collect();
    for (idx, id) in indices.into_iter().zip(ids) {
        let Some(id) = id else {
            println!("error: no card at {idx}");
            continue;
        };
        if let Err(err) = apply(battle, id) {
            println!("error: {err}");
        }
    }
}

fn parse_indices_result(args: &[&str]) -> Result<Vec<usize>, String> {
    if args.is_empty() {
        return Err("missing indices".to_string());
    }
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some((start, end)) = part.split_once('-') {
                let start = start
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range start".to_string())?;
                let end = end
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range end".to_string())?;
                if start > end {
                    return Err("range start larger than end".to_string());
                }
                indices.extend(start..=end);
            } else {
                let idx = part
                    .parse::<usize>()
                    .map_err(|_| format!("invalid index {part}"))?;
                indices.push(idx);
            }
        }
    }
    indices.dedup();
    Ok(indices)
}

fn print_help() {
    println!("Commands:");
    println!("  help|h|?                 show help");
    println!("  hand|ls                  show hand and selection");
    println!("  status|st                hero, enemy and turn state");
    println!("  select|s <idx..>         select hand cards");
    println!("  toggle|t <idx..>         flip selection");
    println!("  deselect|u <idx..>       unselect hand cards");
    println!("  preview|pv               score the current selection");
    println!("  play|p [idx..]           play the selection");
    println!("  discard|d [idx..|all]    discard and refill");
    println!("  sort [rank|suit]         reorder the hand");
    println!("  quit|exit|q              leave the battle");
}

fn print_hand(battle: &Battle) {
    println!(
        "== Hand == ({} cards, draw {}, discard {})",
        battle.hand().len(),
        battle.draw_count(),
        battle.discard_count()
    );
    for (idx, card) in battle.hand().iter().enumerate() {
        let marker = if battle.selection().contains(card.id()) {
            "*"
        } else {
            " "
        };
        println!(
            "{:>4} {marker} {:<10} {:>4}",
            idx,
            format_card(card),
            battle.tables.rank_bonus(card.rank)
        );
    }
}

fn print_status(battle: &Battle) {
    let turn = battle.turn_state();
    println!(
        "phase {:?}, enemy acts in {}, can play: {}",
        turn.phase, turn.turns_until_enemy_action, turn.can_play_cards
    );
    match battle.hero() {
        Some(hero) => println!(
            "hero {} {}/{} hp, charge {}",
            hero.name, hero.hp, hero.max_hp, hero.attack_charge
        ),
        None => println!("no acting hero"),
    }
    let enemy = battle.enemy();
    println!(
        "enemy {} {}/{} hp, atk {}, stamina {}/{}",
        enemy.name, enemy.hp, enemy.max_hp, enemy.attack, enemy.stamina, enemy.max_stamina
    );
}

fn print_preview(preview: Option<ScoreBreakdown>) {
    let Some(preview) = preview else {
        println!("nothing selected");
        return;
    };
    let scoring: Vec<String> = preview.combo.scoring_cards.iter().map(format_card).collect();
    println!(
        "{:?} [{}]: {} x{} = {}, with rank bonuses {}",
        preview.combo.kind,
        scoring.join(" "),
        preview.outcome.base_score,
        preview.outcome.display_multiplier,
        preview.outcome.final_score,
        preview.total_attack
    );
}

fn format_card(card: &Card) -> String {
    let mut out = card.id().to_string();
    let mut tags = Vec::new();
    if card.enhanced {
        tags.push(format!("x{}", card.multiplier));
    }
    if card.sealed {
        tags.push("Seal".to_string());
    }
    if card.edition != Edition::Base {
        tags.push(format!("{:?}", card.edition));
    }
    if !tags.is_empty() {
        out.push_str(" [");
        out.push_str(&tags.join(","));
        out.push(']');
    }
    out
}

fn print_events(events: &mut EventBus) {
    for event in events.drain() {
        if let Some(line) = format_event(&event) {
            println!("  {line}");
        }
    }
}

fn format_event(event: &Event) -> Option<String> {
    let line = match event {
        Event::DeckShuffled => "deck shuffled".to_string(),
        Event::HandDealt { cards } => {
            let cards: Vec<String> = cards.iter().map(format_card).collect();
            format!("dealt {}", cards.join(" "))
        }
        Event::HandSorted { by } => format!("hand sorted by {by:?}"),
        Event::ComboPlayed {
            combo, base_score, ..
        } => format!("{combo:?} (base {base_score})"),
        Event::CardScored { card, bonus, charge } => {
            format!("{} +{bonus} (charge {charge})", format_card(card))
        }
        Event::Strike {
            attacker,
            damage,
            hp_left,
            ..
        } => {
            let who = match attacker {
                CombatantKind::Hero => "hero",
                CombatantKind::Enemy => "enemy",
            };
            format!("{who} hits for {damage}, {hp_left} hp left")
        }
        Event::TurnCountdown { remaining } => format!("enemy acts in {remaining}"),
        Event::PhaseChanged { phase } => match phase {
            Phase::HeroTurn => "your turn".to_string(),
            other => format!("phase {other:?}"),
        },
        Event::BattleWon => "victory".to_string(),
        Event::BattleLost => "defeat".to_string(),
        Event::DeckCountChanged { .. }
        | Event::DiscardCountChanged { .. }
        | Event::CardDrawn { .. }
        | Event::ScoreCalculated { .. } => return None,
    };
    Some(line)
}
