use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// City registry – the fixed set of datasets this tool knows about
// ---------------------------------------------------------------------------

/// One of the three cities with a bundled trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All cities, in registry order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed by the user.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset without its extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset in `format`, relative to the data directory.
    pub fn file_name(self, format: DataFormat) -> String {
        format!("{}.{}", self.file_stem(), format.extension())
    }

    /// Look a city up by its lowercase name.
    pub fn from_name(name: &str) -> Option<City> {
        City::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Registry names in order (the candidate list for suggestions).
    pub fn names() -> Vec<&'static str> {
        City::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(self.name()))
    }
}

// ---------------------------------------------------------------------------
// DataFormat – which export of the city files the data directory holds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Csv,
    Parquet,
}

impl DataFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Parquet => "parquet",
        }
    }
}

/// Capitalise the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
