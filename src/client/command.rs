//! Line parsing for the interactive terminal client.

use crate::domain::item::Barcode;
use std::collections::HashMap;
use thiserror::Error;

pub const HELP: &str = "
Commands:
new <barcode1> <barcode2> ...    - create new items
modify <barcode1> <barcode2> ... - modify items
delete <barcode1> <barcode2> ... - delete items
log <barcode1> <barcode2> ...    - mark items as seen now
see <barcode1> <barcode2> ...    - show items
all                              - show all items
server                           - change server address
quit                             - quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New(Vec<Barcode>),
    Modify(Vec<Barcode>),
    Delete(Vec<Barcode>),
    Log(Vec<Barcode>),
    See(Vec<Barcode>),
    All,
    Server,
    Quit,
    Help,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{0}' is not a numeric barcode")]
    InvalidBarcode(String),

    #[error("'{0}' needs at least one barcode")]
    MissingBarcodes(String),

    #[error("Unknown command '{0}'")]
    Unknown(String),
}

impl Command {
    /// Parses one input line. Barcodes are validated here, before any request is sent.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Help);
        };
        let args: Vec<&str> = words.collect();

        let barcodes = || -> Result<Vec<Barcode>, CommandError> {
            if args.is_empty() {
                return Err(CommandError::MissingBarcodes(verb.to_string()));
            }
            args.iter()
                .map(|a| {
                    a.parse::<Barcode>()
                        .map_err(|_| CommandError::InvalidBarcode(a.to_string()))
                })
                .collect()
        };

        match verb {
            "new" => Ok(Command::New(barcodes()?)),
            "modify" => Ok(Command::Modify(barcodes()?)),
            "delete" => Ok(Command::Delete(barcodes()?)),
            "log" => Ok(Command::Log(barcodes()?)),
            "see" => Ok(Command::See(barcodes()?)),
            "all" => Ok(Command::All),
            "server" => Ok(Command::Server),
            "quit" | "exit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Single-key abbreviations for frequently used locations.
#[derive(Debug, Clone, Default)]
pub struct LocationShortcuts {
    map: HashMap<String, String>,
}

impl LocationShortcuts {
    /// Parses `key=Location,key2=Other`. Malformed entries are skipped.
    pub fn parse(raw: &str) -> Self {
        let map = raw
            .split(',')
            .filter_map(|entry| {
                let (key, location) = entry.split_once('=')?;
                let (key, location) = (key.trim(), location.trim());
                if key.is_empty() || location.is_empty() {
                    return None;
                }
                Some((key.to_string(), location.to_string()))
            })
            .collect();
        Self { map }
    }

    /// Returns the full location for a shortcut, or the trimmed input unchanged.
    pub fn expand(&self, input: &str) -> String {
        let input = input.trim();
        self.map
            .get(input)
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Shortcuts sorted by key, for the prompt hint.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .map
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_barcode_commands() {
        assert_eq!(Command::parse("new 1 2 3"), Ok(Command::New(vec![1, 2, 3])));
        assert_eq!(Command::parse("  log   42 "), Ok(Command::Log(vec![42])));
        assert_eq!(Command::parse("delete 7"), Ok(Command::Delete(vec![7])));
    }

    #[test]
    fn rejects_non_numeric_barcodes() {
        assert_eq!(
            Command::parse("see 12 abc"),
            Err(CommandError::InvalidBarcode("abc".to_string()))
        );
        assert_eq!(
            Command::parse("modify -4"),
            Err(CommandError::InvalidBarcode("-4".to_string()))
        );
    }

    #[test]
    fn barcode_commands_need_arguments() {
        assert_eq!(
            Command::parse("log"),
            Err(CommandError::MissingBarcodes("log".to_string()))
        );
    }

    #[test]
    fn plain_commands_and_blank_lines() {
        assert_eq!(Command::parse("all"), Ok(Command::All));
        assert_eq!(Command::parse("server"), Ok(Command::Server));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse(""), Ok(Command::Help));
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn shortcuts_expand_known_keys_only() {
        let shortcuts = LocationShortcuts::parse("r=Rig, d = Drama Studio Tech Box,broken,=x");
        assert_eq!(shortcuts.expand("r"), "Rig");
        assert_eq!(shortcuts.expand(" d\n"), "Drama Studio Tech Box");
        assert_eq!(shortcuts.expand("Loading bay"), "Loading bay");
        assert_eq!(shortcuts.entries(), vec![("d", "Drama Studio Tech Box"), ("r", "Rig")]);
    }

    #[test]
    fn empty_shortcut_list() {
        let shortcuts = LocationShortcuts::parse("");
        assert!(shortcuts.is_empty());
        assert_eq!(shortcuts.expand("x"), "x");
    }
}
