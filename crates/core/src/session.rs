use crate::Combatant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EncounterKind {
    MinorEnemy,
    EliteEnemy,
    Boss,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroRecord {
    pub id: String,
    pub name: String,
    pub max_hp: i64,
    pub hp: i64,
    pub attack: i64,
    #[serde(default)]
    pub defense: i64,
}

impl HeroRecord {
    pub fn to_combatant(&self) -> Combatant {
        let mut hero = Combatant::hero(self.id.clone(), self.name.clone(), self.max_hp, self.attack);
        hero.hp = self.hp.clamp(0, self.max_hp);
        hero.alive = hero.hp > 0;
        hero
    }

    /// Copies what a battle changes back onto the record. The record keeps
    /// its own id and max HP.
    pub fn write_back(&mut self, hero: &Combatant) {
        self.hp = hero.hp.clamp(0, self.max_hp);
        self.attack = hero.attack;
        self.name = hero.name.clone();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Encounter {
    pub id: String,
    pub name: String,
    pub kind: EncounterKind,
    pub hp: i64,
    pub atk: i64,
    /// Hero turns between enemy actions. Zero falls back to the config value.
    #[serde(default)]
    pub turn: i32,
    #[serde(default)]
    pub stamina: i64,
    #[serde(default)]
    pub gold_reward: i64,
}

impl Encounter {
    pub fn to_combatant(&self) -> Combatant {
        Combatant::enemy(
            self.id.clone(),
            self.name.clone(),
            self.hp,
            self.atk,
            self.stamina,
        )
    }
}

/// Everything a battle needs from the surrounding run. Handed to
/// [`crate::Battle::new`] and returned, updated, by [`crate::Battle::finish`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub hero: HeroRecord,
    pub encounter: Encounter,
}
