//! Inbound text commands.
//!
//! The parse is total: every input maps to exactly one [`Command`] or to
//! a `MalformedCommand` error whose text is the reply shown to the sender.

use chrono::{NaiveDate, NaiveTime};

use promemo_core::error::{PromemoError, Result};
use promemo_core::types::{DATE_FORMAT, EventDraft, TIME_FORMAT};

/// Reply for the malformed `add` variants.
pub const USAGE: &str =
    "Invalid format. Use: add <subject> <date YYYY-MM-DD> <time HH:MM> <description>";

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <subject> <date> <time> <description...>`
    Add(EventDraft),
    /// `list` (prefix match).
    List,
    /// Anything else; the reply is the fixed help text.
    Unknown,
}

impl Command {
    /// Parse one inbound message. The keyword is case-insensitive;
    /// subject and description case is preserved verbatim.
    pub fn parse(text: &str) -> Result<Command> {
        let trimmed = text.trim();
        let Some((keyword, rest)) = split_field(trimmed) else {
            return Ok(Command::Unknown);
        };

        if keyword.eq_ignore_ascii_case("add") {
            return parse_add(rest);
        }
        if keyword.to_lowercase().starts_with("list") {
            return Ok(Command::List);
        }
        Ok(Command::Unknown)
    }
}

fn parse_add(rest: &str) -> Result<Command> {
    let Some((subject, rest)) = split_field(rest) else {
        return Err(PromemoError::malformed(USAGE));
    };
    let Some((date_s, rest)) = split_field(rest) else {
        return Err(PromemoError::malformed(USAGE));
    };
    let Some((time_s, description)) = split_field(rest) else {
        return Err(PromemoError::malformed(USAGE));
    };
    if description.is_empty() {
        return Err(PromemoError::malformed(USAGE));
    }

    let date = NaiveDate::parse_from_str(date_s, DATE_FORMAT)
        .map_err(|_| PromemoError::malformed(USAGE))?;
    let time = NaiveTime::parse_from_str(time_s, TIME_FORMAT)
        .map_err(|_| PromemoError::malformed(USAGE))?;

    Ok(Command::Add(EventDraft::new(subject, date, time, description)))
}

/// Split off the next whitespace-delimited token; the remainder keeps its
/// internal spacing (only the separator run is consumed).
fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(i) => Some((&s[..i], s[i..].trim_start())),
        None => Some((s, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_fields(cmd: Command) -> EventDraft {
        match cmd {
            Command::Add(draft) => draft,
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_add_happy_path() {
        let cmd = Command::parse("add Math 2025-03-20 09:30 Polynomials test").unwrap();
        let draft = add_fields(cmd);
        assert_eq!(draft.subject, "Math");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(draft.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(draft.description, "Polynomials test");
    }

    #[test]
    fn test_add_keyword_case_insensitive_fields_verbatim() {
        let draft = add_fields(Command::parse("ADD MathS 2025-03-20 09:30 Big Test").unwrap());
        assert_eq!(draft.subject, "MathS");
        assert_eq!(draft.description, "Big Test");
    }

    #[test]
    fn test_add_description_internal_spaces_kept() {
        let draft =
            add_fields(Command::parse("add Math 2025-03-20 09:30 chapters 1,  2 and 3").unwrap());
        assert_eq!(draft.description, "chapters 1,  2 and 3");
    }

    #[test]
    fn test_add_extra_separator_spaces_tolerated() {
        let draft = add_fields(Command::parse("add  Math   2025-03-20  09:30 x").unwrap());
        assert_eq!(draft.subject, "Math");
        assert_eq!(draft.description, "x");
    }

    #[test]
    fn test_add_too_few_tokens() {
        for text in ["add", "add Math", "add Math 2025-03-20", "add Math 2025-03-20 09:30"] {
            match Command::parse(text) {
                Err(PromemoError::MalformedCommand(msg)) => assert_eq!(msg, USAGE),
                other => panic!("{text:?} parsed to {other:?}"),
            }
        }
    }

    #[test]
    fn test_add_bad_date() {
        assert!(matches!(
            Command::parse("add Math notadate 09:30 x"),
            Err(PromemoError::MalformedCommand(_))
        ));
        assert!(matches!(
            Command::parse("add Math 20-03-2025 09:30 x"),
            Err(PromemoError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_add_bad_time() {
        assert!(matches!(
            Command::parse("add Math 2025-03-20 9h30 x"),
            Err(PromemoError::MalformedCommand(_))
        ));
        assert!(matches!(
            Command::parse("add Math 2025-03-20 25:00 x"),
            Err(PromemoError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_list_prefix_match() {
        assert_eq!(Command::parse("list").unwrap(), Command::List);
        assert_eq!(Command::parse("LIST").unwrap(), Command::List);
        assert_eq!(Command::parse("lista per favore").unwrap(), Command::List);
        assert_eq!(Command::parse("  list ").unwrap(), Command::List);
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(Command::parse("hello there").unwrap(), Command::Unknown);
        assert_eq!(Command::parse("").unwrap(), Command::Unknown);
        assert_eq!(Command::parse("   ").unwrap(), Command::Unknown);
        assert_eq!(Command::parse("lis").unwrap(), Command::Unknown);
        assert_eq!(Command::parse("addition next week").unwrap(), Command::Unknown);
    }
}
