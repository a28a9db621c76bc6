//! Sorting and filtering over character records
//!
//! View state (beast toggles and the active sort) is an explicit value owned
//! by the caller and passed into the query functions.

use crate::error::{Error, Result};
use crate::record::CharacterRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A sortable record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Damage,
    Defense,
    EnergyRate,
    MoveSpeed,
    AverageStats,
    Beast,
}

impl SortField {
    /// All fields, in export column order
    pub const ALL: [SortField; 7] = [
        SortField::Name,
        SortField::Damage,
        SortField::Defense,
        SortField::EnergyRate,
        SortField::MoveSpeed,
        SortField::AverageStats,
        SortField::Beast,
    ];

    /// Compare two records on this field, ascending
    pub fn compare(self, a: &CharacterRecord, b: &CharacterRecord) -> Ordering {
        match self {
            SortField::Name => compare_names(&a.name, &b.name),
            SortField::Damage => a.damage.total_cmp(&b.damage),
            SortField::Defense => a.defense.total_cmp(&b.defense),
            SortField::EnergyRate => a.energy_rate.total_cmp(&b.energy_rate),
            SortField::MoveSpeed => a.move_speed.total_cmp(&b.move_speed),
            SortField::AverageStats => a.average_stats.total_cmp(&b.average_stats),
            SortField::Beast => a.beast.cmp(&b.beast),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "name" => Ok(SortField::Name),
            "damage" => Ok(SortField::Damage),
            "defense" => Ok(SortField::Defense),
            "energyrate" => Ok(SortField::EnergyRate),
            "movespeed" => Ok(SortField::MoveSpeed),
            "average" | "averagestats" => Ok(SortField::AverageStats),
            "beast" => Ok(SortField::Beast),
            _ => Err(Error::UnknownSortField(s.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Name => "name",
            SortField::Damage => "damage",
            SortField::Defense => "defense",
            SortField::EnergyRate => "energy-rate",
            SortField::MoveSpeed => "move-speed",
            SortField::AverageStats => "average",
            SortField::Beast => "beast",
        };
        write!(f, "{}", name)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Beast filter toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeastFilter {
    pub show_beasts: bool,
    pub only_beasts: bool,
}

impl Default for BeastFilter {
    fn default() -> Self {
        Self {
            show_beasts: true,
            only_beasts: false,
        }
    }
}

impl BeastFilter {
    /// Whether a record passes the filter
    ///
    /// `show_beasts = false` takes precedence over `only_beasts = true`:
    /// the combination yields all non-beasts.
    pub fn accepts(&self, record: &CharacterRecord) -> bool {
        if !self.show_beasts {
            !record.beast
        } else if self.only_beasts {
            record.beast
        } else {
            true
        }
    }
}

/// Caller-owned view state: filter toggles and the active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(flatten)]
    pub filter: BeastFilter,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl ViewState {
    /// Select a sort column: the same column flips direction, a new column
    /// starts ascending
    pub fn toggle_sort(&mut self, field: SortField) -> SortSpec {
        let direction = match self.sort {
            Some(current) if current.field == field => current.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        let spec = SortSpec::new(field, direction);
        self.sort = Some(spec);
        spec
    }

    /// Show or hide beasts; hiding also clears "only beasts"
    pub fn set_show_beasts(&mut self, show: bool) {
        self.filter.show_beasts = show;
        if !show {
            self.filter.only_beasts = false;
        }
    }

    /// Restrict to beasts; enabling also shows beasts
    pub fn set_only_beasts(&mut self, only: bool) {
        self.filter.only_beasts = only;
        if only {
            self.filter.show_beasts = true;
        }
    }
}

/// Stable in-place sort of the full collection
pub fn sort_by(records: &mut [CharacterRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ord = field.compare(a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Records passing the filter, in collection order
pub fn filter<'a>(records: &'a [CharacterRecord], filter: &BeastFilter) -> Vec<&'a CharacterRecord> {
    records.iter().filter(|r| filter.accepts(r)).collect()
}

/// Name ordering that ignores accents and case first
///
/// Names that fold to the same text are ordered accent-sensitively, then by
/// the raw text, so `"Éclair"` sorts between `"eclair"` and `"Zebra"`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold(a, true)
        .cmp(fold(b, true))
        .then_with(|| fold(a, false).cmp(fold(b, false)))
        .then_with(|| a.cmp(b))
}

/// Lowercased characters, with combining accents removed when `strip_accents`
fn fold(s: &str, strip_accents: bool) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(move |&c| !(strip_accents && is_combining_mark(c)))
        .flat_map(char::to_lowercase)
}
