use std::collections::HashMap;

pub const BEST_DAMAGE_DEALT_KEY: &str = "BestDamageDealt";
pub const DAMAGE_TAKEN_KEY: &str = "DamageTaken";

/// Scalar key-value store the battle reports its stats into.
pub trait StatsSink {
    fn get(&self, key: &str) -> i64;
    fn set(&mut self, key: &str, value: i64);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStats {
    values: HashMap<String, i64>,
}

impl MemoryStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsSink for MemoryStats {
    fn get(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

/// Damage totals for the battle in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleStats {
    pub last_damage_dealt: i64,
    pub best_damage_dealt: i64,
    pub damage_taken: i64,
}

impl BattleStats {
    pub fn record_dealt(&mut self, damage: i64, sink: Option<&mut dyn StatsSink>) {
        self.last_damage_dealt = damage;
        self.best_damage_dealt = self.best_damage_dealt.max(damage);
        if let Some(sink) = sink {
            if damage > sink.get(BEST_DAMAGE_DEALT_KEY) {
                sink.set(BEST_DAMAGE_DEALT_KEY, damage);
            }
        }
    }

    pub fn record_taken(&mut self, damage: i64, sink: Option<&mut dyn StatsSink>) {
        self.damage_taken = self.damage_taken.saturating_add(damage);
        if let Some(sink) = sink {
            sink.set(DAMAGE_TAKEN_KEY, self.damage_taken);
        }
    }
}
