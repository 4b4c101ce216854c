//! Dataset loading.
//!
//! Reads the row-oriented Pokémon table into immutable [`Record`]s. Numeric stat columns are
//! parsed as numbers; every other column stays a string. Rows whose plotted values are not
//! numeric are rejected here, before they can turn into invalid positions downstream.
//!
//! Loading is the only asynchronous step of the chart: [`Dataset::load`] awaits a
//! [`DataSource`] and everything after it runs against the complete record set.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric stat columns of the Pokémon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Sum of all base stats.
    #[serde(rename = "Total")]
    Total,
    /// Hit points.
    #[serde(rename = "HP")]
    Hp,
    /// Physical attack.
    #[serde(rename = "Attack")]
    Attack,
    /// Physical defense.
    #[serde(rename = "Defense")]
    Defense,
    /// Special attack.
    #[serde(rename = "Sp. Atk")]
    SpAtk,
    /// Special defense.
    #[serde(rename = "Sp. Def")]
    SpDef,
    /// Speed.
    #[serde(rename = "Speed")]
    Speed,
}

impl Stat {
    /// Every stat, in table order.
    pub const ALL: [Self; 7] = [
        Self::Total,
        Self::Hp,
        Self::Attack,
        Self::Defense,
        Self::SpAtk,
        Self::SpDef,
        Self::Speed,
    ];

    /// Header name of the column.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Hp => "HP",
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::SpAtk => "Sp. Atk",
            Self::SpDef => "Sp. Def",
            Self::Speed => "Speed",
        }
    }

    /// Look a stat up by its header name.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.column() == name)
    }
}

/// Which stats are plotted on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    /// Horizontal axis.
    pub x: Stat,
    /// Vertical axis.
    pub y: Stat,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            x: Stat::SpDef,
            y: Stat::Total,
        }
    }
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Display name.
    pub name: String,
    /// Primary type ("Type 1"); drives color and legend.
    pub primary_type: String,
    /// Secondary type ("Type 2"); shown in the tooltip only.
    pub secondary_type: Option<String>,
    /// Generation identifier, kept as text for comparison.
    pub generation: String,
    /// Legendary flag as written in the table ("True"/"False").
    pub legendary: String,
    stats: BTreeMap<Stat, f32>,
}

impl Record {
    /// Start building a record by hand.
    #[must_use]
    pub fn builder(name: &str, primary_type: &str) -> RecordBuilder {
        RecordBuilder {
            record: Self {
                name: name.to_string(),
                primary_type: primary_type.to_string(),
                secondary_type: None,
                generation: "1".to_string(),
                legendary: "False".to_string(),
                stats: BTreeMap::new(),
            },
        }
    }

    /// Value of a numeric column, if the table had it.
    #[must_use]
    pub fn stat(&self, stat: Stat) -> Option<f32> {
        self.stats.get(&stat).copied()
    }
}

/// Builder for [`Record`].
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Set the secondary type.
    #[must_use]
    pub fn secondary(mut self, secondary_type: &str) -> Self {
        self.record.secondary_type = Some(secondary_type.to_string());
        self
    }

    /// Set the generation.
    #[must_use]
    pub fn generation(mut self, generation: &str) -> Self {
        self.record.generation = generation.to_string();
        self
    }

    /// Set the legendary flag.
    #[must_use]
    pub fn legendary(mut self, legendary: &str) -> Self {
        self.record.legendary = legendary.to_string();
        self
    }

    /// Set a stat value.
    #[must_use]
    pub fn stat(mut self, stat: Stat, value: f32) -> Self {
        self.record.stats.insert(stat, value);
        self
    }

    /// Finish the record.
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type 1")]
    primary_type: String,
    #[serde(rename = "Type 2", default)]
    secondary_type: Option<String>,
    #[serde(rename = "Generation")]
    generation: String,
    #[serde(rename = "Legendary")]
    legendary: String,
    #[serde(rename = "Total", default)]
    total: Option<String>,
    #[serde(rename = "HP", default)]
    hp: Option<String>,
    #[serde(rename = "Attack", default)]
    attack: Option<String>,
    #[serde(rename = "Defense", default)]
    defense: Option<String>,
    #[serde(rename = "Sp. Atk", default)]
    sp_atk: Option<String>,
    #[serde(rename = "Sp. Def", default)]
    sp_def: Option<String>,
    #[serde(rename = "Speed", default)]
    speed: Option<String>,
}

impl RawRow {
    fn into_record(self, row: usize, attributes: Attributes) -> Result<Record> {
        let raw_stats = [
            (Stat::Total, self.total),
            (Stat::Hp, self.hp),
            (Stat::Attack, self.attack),
            (Stat::Defense, self.defense),
            (Stat::SpAtk, self.sp_atk),
            (Stat::SpDef, self.sp_def),
            (Stat::Speed, self.speed),
        ];

        let mut stats = BTreeMap::new();
        for (stat, raw) in raw_stats {
            let Some(raw) = raw else { continue };
            let value = raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::InvalidNumber {
                    row,
                    column: stat.column().to_string(),
                    value: raw.clone(),
                })?;
            stats.insert(stat, value);
        }

        for stat in [attributes.x, attributes.y] {
            if !stats.contains_key(&stat) {
                return Err(Error::InvalidNumber {
                    row,
                    column: stat.column().to_string(),
                    value: String::new(),
                });
            }
        }

        Ok(Record {
            name: self.name,
            primary_type: self.primary_type,
            secondary_type: self.secondary_type.filter(|s| !s.trim().is_empty()),
            generation: self.generation.trim().to_string(),
            legendary: self.legendary.trim().to_string(),
            stats,
        })
    }
}

const REQUIRED_COLUMNS: [&str; 4] = ["Name", "Type 1", "Generation", "Legendary"];

/// The loaded record set. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    rejected: usize,
}

impl Dataset {
    /// Fetch `source` and parse it.
    ///
    /// # Errors
    ///
    /// Fails if the resource cannot be fetched, the header lacks a required column, the
    /// table is malformed, or no row survives validation.
    pub async fn load<S: DataSource>(source: &S, attributes: Attributes) -> Result<Self> {
        let text = source.fetch_text().await?;
        let dataset = Self::parse(text.as_bytes(), attributes)?;
        log::info!(
            "loaded {} records from {} ({} rejected)",
            dataset.len(),
            source.locator(),
            dataset.rejected()
        );
        Ok(dataset)
    }

    /// Parse a CSV table with a header row.
    ///
    /// # Errors
    ///
    /// See [`Dataset::load`].
    pub fn parse<R: Read>(reader: R, attributes: Attributes) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let has = |name: &str| headers.iter().any(|h| h == name);
        for column in REQUIRED_COLUMNS
            .into_iter()
            .chain([attributes.x.column(), attributes.y.column()])
        {
            if !has(column) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        let mut rejected = 0;
        for (i, row) in csv_reader.deserialize::<RawRow>().enumerate() {
            match row?.into_record(i + 1, attributes) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("rejecting row: {e}");
                    rejected += 1;
                }
            }
        }

        if records.is_empty() {
            return Err(Error::EmptyData);
        }

        Ok(Self { records, rejected })
    }

    /// All records, in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Take ownership of the records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Number of accepted records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows rejected for non-numeric plotted values.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

/// Where the table comes from.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Human-readable location, for logs.
    fn locator(&self) -> String;

    /// Retrieve the whole table as text.
    async fn fetch_text(&self) -> Result<String>;
}

/// A table on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for FileSource {
    fn locator(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// A table already held in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    /// Wrap `text`, labelled `name` in logs.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl DataSource for TextSource {
    fn locator(&self) -> String {
        self.name.clone()
    }

    async fn fetch_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
