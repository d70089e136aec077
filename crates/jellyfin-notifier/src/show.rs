use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metadata providers a show can be identified by.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Indexer {
    Tvdb,
    /// Shut down upstream; shows may still reference it.
    Tvrage,
    Tvmaze,
    Tmdb,
    Imdb,
}

impl Indexer {
    pub const ALL: [Indexer; 5] = [
        Indexer::Tvdb,
        Indexer::Tvrage,
        Indexer::Tvmaze,
        Indexer::Tmdb,
        Indexer::Imdb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Indexer::Tvdb => "tvdb",
            Indexer::Tvrage => "tvrage",
            Indexer::Tvmaze => "tvmaze",
            Indexer::Tmdb => "tmdb",
            Indexer::Imdb => "imdb",
        }
    }

    /// Key under which this indexer's id appears in external-id listings
    /// (e.g. `tvdb_id`).
    pub fn external_key(self) -> &'static str {
        match self {
            Indexer::Tvdb => "tvdb_id",
            Indexer::Tvrage => "tvrage_id",
            Indexer::Tvmaze => "tvmaze_id",
            Indexer::Tmdb => "tmdb_id",
            Indexer::Imdb => "imdb_id",
        }
    }
}

impl fmt::Display for Indexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown indexer: {0}")]
pub struct UnknownIndexer(pub String);

impl FromStr for Indexer {
    type Err = UnknownIndexer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Indexer::ALL
            .into_iter()
            .find(|i| i.name() == needle || i.external_key() == needle)
            .ok_or_else(|| UnknownIndexer(s.to_string()))
    }
}

/// The subset of a series the notifier needs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub name: String,
    pub indexer: Indexer,
    pub indexer_id: u64,
    /// Ids of the same series on other indexers.
    #[serde(default)]
    pub externals: HashMap<Indexer, u64>,
}

impl Show {
    pub fn new(name: impl Into<String>, indexer: Indexer, indexer_id: u64) -> Self {
        Self {
            name: name.into(),
            indexer,
            indexer_id,
            externals: HashMap::new(),
        }
    }

    pub fn with_external(mut self, indexer: Indexer, id: u64) -> Self {
        self.externals.insert(indexer, id);
        self
    }

    /// TheTVDB id for this show: the native id when TVDB is the show's
    /// indexer, otherwise whatever the external mapping holds.
    pub fn tvdb_id(&self) -> Option<u64> {
        if self.indexer == Indexer::Tvdb {
            Some(self.indexer_id)
        } else {
            self.externals.get(&Indexer::Tvdb).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tvdb_native_id_wins_over_externals() {
        let show = Show::new("Archer", Indexer::Tvdb, 110381).with_external(Indexer::Tvdb, 1);
        assert_eq!(show.tvdb_id(), Some(110381));
    }

    #[test]
    fn tvdb_id_from_externals() {
        let show = Show::new("Archer", Indexer::Tvmaze, 315).with_external(Indexer::Tvdb, 110381);
        assert_eq!(show.tvdb_id(), Some(110381));
    }

    #[test]
    fn tvdb_id_missing() {
        let show = Show::new("Archer", Indexer::Tmdb, 10283).with_external(Indexer::Imdb, 1486217);
        assert_eq!(show.tvdb_id(), None);
    }

    #[test]
    fn indexer_parses_name_and_external_key() {
        assert_eq!("tvdb".parse::<Indexer>().unwrap(), Indexer::Tvdb);
        assert_eq!("TVMaze".parse::<Indexer>().unwrap(), Indexer::Tvmaze);
        assert_eq!("tmdb_id".parse::<Indexer>().unwrap(), Indexer::Tmdb);
        assert!("anidb".parse::<Indexer>().is_err());
    }

    #[test]
    fn externals_deserialize_with_lowercase_keys() {
        let show: Show = serde_json::from_value(serde_json::json!({
            "name": "Archer",
            "indexer": "tvmaze",
            "indexerId": 315,
            "externals": { "tvdb": 110381 }
        }))
        .unwrap();
        assert_eq!(show.tvdb_id(), Some(110381));
    }
}
