//! # Parsing Utils
//!
//! Recognises planner commands in raw chat text (`!event verb body`) and splits
//! pipe-delimited bodies into fields.

use crate::domain::config::default_triggers;
use crate::domain::types::Verb;
use regex::Regex;

pub const FIELD_SEPARATOR: char = '|';

/// A message that started with a trigger token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub verb: Verb,
    pub body: &'a str,
}

#[derive(Debug, Clone)]
pub struct CommandParser {
    pattern: Regex,
    primary_trigger: String,
}

impl CommandParser {
    /// Falls back to the default triggers when none are configured.
    pub fn new(triggers: &[String]) -> Result<Self, regex::Error> {
        let mut triggers: Vec<String> = triggers
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if triggers.is_empty() {
            triggers = default_triggers();
        }
        let primary_trigger = triggers[0].clone();

        // Longest first so `!event` wins over `!ev`.
        triggers.sort_by_key(|t| std::cmp::Reverse(t.len()));
        let alternatives = triggers
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"(?s)^\s*(?:{alternatives})(?:\s+(\S+)(?:\s+(.*))?)?\s*$"
        ))?;

        Ok(Self {
            pattern,
            primary_trigger,
        })
    }

    /// Trigger used when pointing users at a command.
    pub fn primary_trigger(&self) -> &str {
        &self.primary_trigger
    }

    /// `None` when the message is not addressed to the planner.
    pub fn parse<'a>(&self, content: &'a str) -> Option<CommandLine<'a>> {
        let caps = self.pattern.captures(content)?;
        let verb = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str().trim());
        Some(CommandLine {
            verb: Verb::parse(verb),
            body,
        })
    }
}

/// Splits a command body on `|`, trimming each field. There is no escape for `|`.
pub fn split_fields(body: &str) -> Vec<&str> {
    body.split(FIELD_SEPARATOR).map(str::trim).collect()
}
