//! Generation / legendary filtering.
//!
//! Two selection controls each offer the synthetic "All" option followed by the distinct
//! values of their column in first-seen order. Filtering always starts from the complete
//! record set, so selections compose from scratch rather than narrowing a previous result.

use std::fmt;

use crate::dataset::Record;

/// Label of the "no filter" option.
pub const ALL: &str = "All";

/// The two filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Generation dropdown.
    Generation,
    /// Legendary dropdown.
    Legendary,
}

impl Control {
    /// Both controls.
    pub const BOTH: [Self; 2] = [Self::Generation, Self::Legendary];

    /// Id of the host element backing this control.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Legendary => "legendary",
        }
    }

    /// The record column this control filters on.
    #[must_use]
    pub fn field(self, record: &Record) -> &str {
        match self {
            Self::Generation => &record.generation,
            Self::Legendary => &record.legendary,
        }
    }
}

/// Current value of one control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No filtering on this column.
    #[default]
    All,
    /// Keep records whose column equals this text.
    Value(String),
}

impl Selection {
    /// Interpret a control's raw value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Value(raw.to_string())
        }
    }

    /// Raw option value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Value(v) => v,
        }
    }

    /// Whether this is the "All" sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of selections currently applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Generation selection.
    pub generation: Selection,
    /// Legendary selection.
    pub legendary: Selection,
}

impl FilterState {
    /// Build a state from raw control values.
    #[must_use]
    pub fn new(generation: &str, legendary: &str) -> Self {
        Self {
            generation: Selection::parse(generation),
            legendary: Selection::parse(legendary),
        }
    }

    /// Whether `record` passes both selections.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match (&self.generation, &self.legendary) {
            (Selection::All, Selection::All) => true,
            (Selection::Value(generation), Selection::Value(legendary)) => {
                record.generation == *generation && record.legendary == *legendary
            }
            (Selection::Value(generation), Selection::All) => record.generation == *generation,
            (Selection::All, Selection::Value(legendary)) => record.legendary == *legendary,
        }
    }
}

/// Records of `records` that pass `state`, in their original order.
#[must_use]
pub fn apply_filter<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    records.iter().filter(|r| state.matches(r)).collect()
}

/// Option lists for both controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    generations: Vec<String>,
    legendary: Vec<String>,
}

impl FilterOptions {
    /// Scan `records` once, collecting distinct values in first-seen order after "All".
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut generations = vec![ALL.to_string()];
        let mut legendary = vec![ALL.to_string()];

        for record in records {
            if !generations.contains(&record.generation) {
                generations.push(record.generation.clone());
            }
            if !legendary.contains(&record.legendary) {
                legendary.push(record.legendary.clone());
            }
        }

        Self {
            generations,
            legendary,
        }
    }

    /// Options for `control`.
    #[must_use]
    pub fn options(&self, control: Control) -> &[String] {
        match control {
            Control::Generation => &self.generations,
            Control::Legendary => &self.legendary,
        }
    }
}
