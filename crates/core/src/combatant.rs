use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CombatantKind {
    Hero,
    Enemy,
}

/// One side of a battle. Hero and enemy share this record; the places where
/// they behave differently match on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combatant {
    pub kind: CombatantKind,
    pub id: String,
    pub name: String,
    pub max_hp: i64,
    pub hp: i64,
    /// Base attack stat.
    pub attack: i64,
    /// Attack accumulated from scoring this turn. Spent by the hero's strike.
    #[serde(default)]
    pub attack_charge: i64,
    #[serde(default)]
    pub stamina: i64,
    #[serde(default)]
    pub max_stamina: i64,
    pub alive: bool,
}

impl Combatant {
    pub fn hero(id: impl Into<String>, name: impl Into<String>, hp: i64, attack: i64) -> Self {
        Self {
            kind: CombatantKind::Hero,
            id: id.into(),
            name: name.into(),
            max_hp: hp,
            hp,
            attack,
            attack_charge: 0,
            stamina: 0,
            max_stamina: 0,
            alive: hp > 0,
        }
    }

    pub fn enemy(
        id: impl Into<String>,
        name: impl Into<String>,
        hp: i64,
        attack: i64,
        stamina: i64,
    ) -> Self {
        Self {
            kind: CombatantKind::Enemy,
            id: id.into(),
            name: name.into(),
            max_hp: hp,
            hp,
            attack,
            attack_charge: 0,
            stamina,
            max_stamina: stamina,
            alive: hp > 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    pub raw: i64,
    pub dealt: i64,
    pub stamina_lost: i64,
    pub died: bool,
}

/// Subtracts `raw` from the target's HP, clamping at zero.
///
/// Enemies with stamina left take 70% (floored) and lose 10% of that reduced
/// amount (floored) from stamina, never dropping below zero.
pub fn apply_damage(target: &mut Combatant, raw: i64) -> DamageReport {
    let raw = raw.max(0);
    if !target.alive {
        return DamageReport {
            raw,
            dealt: 0,
            stamina_lost: 0,
            died: false,
        };
    }
    let (dealt, stamina_lost) = match target.kind {
        CombatantKind::Enemy if target.stamina > 0 => {
            let reduced = raw * 7 / 10;
            let drain = (reduced / 10).min(target.stamina);
            target.stamina -= drain;
            (reduced, drain)
        }
        CombatantKind::Enemy | CombatantKind::Hero => (raw, 0),
    };
    target.hp = (target.hp - dealt).max(0);
    let died = target.hp == 0;
    if died {
        target.alive = false;
    }
    DamageReport {
        raw,
        dealt,
        stamina_lost,
        died,
    }
}

/// The value a combatant strikes with: heroes spend their scoring charge,
/// enemies hit with their attack stat.
pub fn strike_power(attacker: &Combatant) -> i64 {
    match attacker.kind {
        CombatantKind::Hero => attacker.attack_charge,
        CombatantKind::Enemy => attacker.attack,
    }
}
