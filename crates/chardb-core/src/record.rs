//! Core record types for representing character data

use serde::{Deserialize, Serialize};

/// A character line as it appears in the database, before form ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Base name shared by every form of the character
    pub name: String,
    pub damage: f64,
    pub defense: f64,
    pub energy_rate: f64,
    pub move_speed: f64,
    pub beast: bool,
}

impl RawRecord {
    /// Arithmetic mean of the four stats
    pub fn average_stats(&self) -> f64 {
        (self.damage + self.defense + self.energy_rate + self.move_speed) / 4.0
    }
}

/// A fully derived character record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Base name shared by every form of the character
    pub name: String,
    /// `name`, or `"{name} (Form {k})"` when the name has several forms
    pub display_name: String,
    pub damage: f64,
    pub defense: f64,
    pub energy_rate: f64,
    pub move_speed: f64,
    pub beast: bool,
    /// Mean of damage, defense, energy rate and move speed
    pub average_stats: f64,
}

impl CharacterRecord {
    /// Build a record from its raw line with the given display label
    pub fn from_raw(raw: RawRecord, display_name: String) -> Self {
        let average_stats = raw.average_stats();
        Self {
            name: raw.name,
            display_name,
            damage: raw.damage,
            defense: raw.defense,
            energy_rate: raw.energy_rate,
            move_speed: raw.move_speed,
            beast: raw.beast,
            average_stats,
        }
    }

    /// Whether this record is one of several forms of its character
    pub fn is_form(&self) -> bool {
        self.display_name != self.name
    }
}
