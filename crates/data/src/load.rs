use anyhow::{bail, Context};
use log::debug;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use suitstrike_core::{BattleConfig, Encounter, HeroRecord, Session};

const BATTLE_FILE: &str = "battle.json";
const HEROES_FILE: &str = "heroes.json";
const ENCOUNTERS_FILE: &str = "encounters.json";

/// Everything under an assets directory a battle can be started from.
#[derive(Debug, Clone)]
pub struct BattleAssets {
    pub config: BattleConfig,
    pub heroes: Vec<HeroRecord>,
    pub encounters: Vec<Encounter>,
}

impl BattleAssets {
    pub fn hero(&self, id: &str) -> Option<&HeroRecord> {
        self.heroes.iter().find(|hero| hero.id == id)
    }

    pub fn encounter(&self, id: &str) -> Option<&Encounter> {
        self.encounters.iter().find(|encounter| encounter.id == id)
    }

    pub fn session(&self, hero_id: &str, encounter_id: &str) -> anyhow::Result<Session> {
        let Some(hero) = self.hero(hero_id) else {
            bail!("unknown hero {hero_id}");
        };
        let Some(encounter) = self.encounter(encounter_id) else {
            bail!("unknown encounter {encounter_id}");
        };
        Ok(Session {
            hero: hero.clone(),
            encounter: encounter.clone(),
        })
    }
}

pub fn load_assets(dir: &Path) -> anyhow::Result<BattleAssets> {
    Ok(BattleAssets {
        config: load_battle_config(dir)?,
        heroes: load_heroes(dir)?,
        encounters: load_encounters(dir)?,
    })
}

/// Reads `battle.json`. A missing file means the built-in defaults.
pub fn load_battle_config(dir: &Path) -> anyhow::Result<BattleConfig> {
    let path = dir.join(BATTLE_FILE);
    let config: BattleConfig = if path.exists() {
        load_json(&path)?
    } else {
        debug!("{} not found, using default battle config", path.display());
        BattleConfig::default()
    };
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn load_heroes(dir: &Path) -> anyhow::Result<Vec<HeroRecord>> {
    let path = dir.join(HEROES_FILE);
    let heroes: Vec<HeroRecord> = load_json(&path)?;
    validate_heroes(&heroes).with_context(|| format!("validate {}", path.display()))?;
    Ok(heroes)
}

pub fn load_encounters(dir: &Path) -> anyhow::Result<Vec<Encounter>> {
    let path = dir.join(ENCOUNTERS_FILE);
    let encounters: Vec<Encounter> = load_json(&path)?;
    validate_encounters(&encounters).with_context(|| format!("validate {}", path.display()))?;
    Ok(encounters)
}

/// Pairs one hero record with one encounter record by id.
pub fn load_session(dir: &Path, hero_id: &str, encounter_id: &str) -> anyhow::Result<Session> {
    load_assets(dir)?.session(hero_id, encounter_id)
}

fn validate_heroes(heroes: &[HeroRecord]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for hero in heroes {
        if !seen.insert(hero.id.as_str()) {
            bail!("duplicate hero id {}", hero.id);
        }
        if hero.max_hp <= 0 {
            bail!("hero {} has max hp {}", hero.id, hero.max_hp);
        }
        if hero.hp < 0 || hero.hp > hero.max_hp {
            bail!("hero {} hp {} outside 0..={}", hero.id, hero.hp, hero.max_hp);
        }
        if hero.attack < 0 {
            bail!("hero {} has negative attack", hero.id);
        }
    }
    Ok(())
}

fn validate_encounters(encounters: &[Encounter]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for encounter in encounters {
        if !seen.insert(encounter.id.as_str()) {
            bail!("duplicate encounter id {}", encounter.id);
        }
        if encounter.hp <= 0 {
            bail!("encounter {} has hp {}", encounter.id, encounter.hp);
        }
        if encounter.atk < 0 || encounter.stamina < 0 || encounter.turn < 0 {
            bail!("encounter {} has negative stats", encounter.id);
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use suitstrike_core::EncounterKind;

    fn hero(id: &str, hp: i64) -> HeroRecord {
        HeroRecord {
            id: id.to_string(),
            name: id.to_string(),
            max_hp: 30,
            hp,
            attack: 3,
            defense: 0,
        }
    }

    fn encounter(id: &str, hp: i64) -> Encounter {
        Encounter {
            id: id.to_string(),
            name: id.to_string(),
            kind: EncounterKind::MinorEnemy,
            hp,
            atk: 4,
            turn: 0,
            stamina: 0,
            gold_reward: 0,
        }
    }

    #[test]
    fn duplicate_hero_ids_rejected() {
        let err = validate_heroes(&[hero("a", 10), hero("a", 12)]).unwrap_err();
        assert!(err.to_string().contains("duplicate hero id a"));
    }

    #[test]
    fn hero_hp_must_fit_max() {
        assert!(validate_heroes(&[hero("a", 31)]).is_err());
        assert!(validate_heroes(&[hero("a", -1)]).is_err());
        assert!(validate_heroes(&[hero("a", 0), hero("b", 30)]).is_ok());
    }

    #[test]
    fn encounters_need_hp() {
        assert!(validate_encounters(&[encounter("slime", 0)]).is_err());
        assert!(validate_encounters(&[encounter("slime", 5), encounter("slime", 6)]).is_err());
        assert!(validate_encounters(&[encounter("slime", 5)]).is_ok());
    }

    #[test]
    fn hero_defaults_defense() {
        let parsed: HeroRecord = serde_json::from_str(
            r#"{"id":"k","name":"Knight","max_hp":30,"hp":30,"attack":4}"#,
        )
        .expect("parse hero");
        assert_eq!(parsed.defense, 0);
    }

    #[test]
    fn encounter_turn_defaults_to_config() {
        let parsed: Encounter = serde_json::from_str(
            r#"{"id":"s","name":"Slime","kind":"MinorEnemy","hp":40,"atk":3}"#,
        )
        .expect("parse encounter");
        assert_eq!(parsed.turn, 0);
        assert_eq!(parsed.stamina, 0);
    }

    #[test]
    fn unknown_ids_fail_session() {
        let assets = BattleAssets {
            config: BattleConfig::default(),
            heroes: vec![hero("knight", 30)],
            encounters: vec![encounter("slime", 20)],
        };
        assert!(assets.session("knight", "slime").is_ok());
        assert!(assets.session("mage", "slime").is_err());
        assert!(assets.session("knight", "dragon").is_err());
    }
}
