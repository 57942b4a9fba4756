pub mod sampler;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const BUNDLED_BANK: &str = include_str!("../../assets/wordbank.csv");

/// Separator between example words in the `examples` column.
pub const EXAMPLE_SEPARATOR: char = '|';

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read word bank {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed word bank: {0}")]
    Csv(#[from] csv::Error),
    #[error("word bank record on line {line} has an empty pinyin")]
    EmptyPinyin { line: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub character: String,
    pub pinyin: String,
    pub examples: Vec<String>,
}

impl Card {
    /// Example words joined the way the feedback line shows them.
    pub fn examples_text(&self) -> String {
        self.examples.join("、")
    }
}

#[derive(Deserialize)]
struct CardRecord {
    character: String,
    pinyin: String,
    #[serde(default)]
    examples: String,
}

impl CardRecord {
    fn into_card(self, line: u64) -> Result<Card, DataLoadError> {
        if self.pinyin.is_empty() {
            return Err(DataLoadError::EmptyPinyin { line });
        }
        let examples = self
            .examples
            .split(EXAMPLE_SEPARATOR)
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Card {
            character: self.character,
            pinyin: self.pinyin,
            examples,
        })
    }
}

/// Ordered, read-only list of cards. Built once at startup and shared.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
    cards: Vec<Card>,
}

impl WordBank {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank = Self::from_reader(file)?;
        tracing::info!(path = %path.display(), cards = bank.len(), "loaded word bank");
        Ok(bank)
    }

    /// The word bank compiled into the binary.
    pub fn bundled() -> Result<Self, DataLoadError> {
        let bank = Self::from_reader(BUNDLED_BANK.as_bytes())?;
        tracing::info!(cards = bank.len(), "loaded bundled word bank");
        Ok(bank)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut cards = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let raw: CardRecord = record.deserialize(Some(&headers))?;
            cards.push(raw.into_card(line)?);
        }
        Ok(Self { cards })
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Distinct pinyin values across all cards.
    pub fn pinyin_universe(&self) -> BTreeSet<String> {
        self.cards.iter().map(|c| c.pinyin.clone()).collect()
    }

    /// Pinyin of the first card showing `character`.
    pub fn pinyin_of(&self, character: &str) -> Option<&str> {
        self.cards
            .iter()
            .find(|c| c.character == character)
            .map(|c| c.pinyin.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(text: &str) -> Result<WordBank, DataLoadError> {
        WordBank::from_reader(text.as_bytes())
    }

    #[test]
    fn test_parse_splits_examples_in_order() {
        let bank = parse("character,pinyin,examples\n爱,ài,爱心|可爱\n").unwrap();
        assert_eq!(bank.len(), 1);
        let card = bank.get(0).unwrap();
        assert_eq!(card.character, "爱");
        assert_eq!(card.pinyin, "ài");
        assert_eq!(card.examples, vec!["爱心", "可爱"]);
        assert_eq!(card.examples_text(), "爱心、可爱");
    }

    #[test]
    fn test_parse_trims_and_drops_empty_examples() {
        let bank = parse("character,pinyin,examples\n 大 , dà , 大人||大小 \n").unwrap();
        let card = bank.get(0).unwrap();
        assert_eq!(card.character, "大");
        assert_eq!(card.pinyin, "dà");
        assert_eq!(card.examples, vec!["大人", "大小"]);
    }

    #[test]
    fn test_missing_examples_column_is_empty_list() {
        let bank = parse("character,pinyin\n人,rén\n").unwrap();
        assert!(bank.get(0).unwrap().examples.is_empty());
    }

    #[test]
    fn test_missing_pinyin_column_is_error() {
        let err = parse("character,examples\n人,人们\n").unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn test_empty_pinyin_is_error_with_line() {
        let err = parse("character,pinyin,examples\n人,rén,人们\n口,,口水\n").unwrap_err();
        match err {
            DataLoadError::EmptyPinyin { line } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_arity_is_error() {
        let err = parse("character,pinyin,examples\n人,rén,人们,extra\n").unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordBank::load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "character,pinyin,examples").unwrap();
        writeln!(file, "山,shān,高山|山水").unwrap();
        writeln!(file, "水,shuǐ,水果").unwrap();
        let bank = WordBank::load(file.path()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).unwrap().pinyin, "shuǐ");
        assert!(bank.get(2).is_none());
    }

    #[test]
    fn test_pinyin_universe_is_distinct() {
        let bank = parse("character,pinyin,examples\n他,tā,他们\n她,tā,她们\n它,tā,它们\n我,wǒ,我们\n")
            .unwrap();
        let universe = bank.pinyin_universe();
        assert_eq!(universe.len(), 2);
        assert!(universe.contains("tā"));
        assert!(universe.contains("wǒ"));
    }

    #[test]
    fn test_pinyin_of_uses_first_match() {
        let bank = parse("character,pinyin,examples\n长,cháng,长短\n长,zhǎng,长大\n").unwrap();
        assert_eq!(bank.pinyin_of("长"), Some("cháng"));
        assert_eq!(bank.pinyin_of("短"), None);
    }

    #[test]
    fn test_bundled_bank_is_usable() {
        let bank = WordBank::bundled().unwrap();
        assert!(!bank.is_empty());
        assert!(bank.pinyin_universe().len() >= 4);
    }
}
