//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the event handler can act on. The leading `/` is optional.

use crate::squeezer::CitrusSize;
use thiserror::Error;

pub const MAX_BATCH: u32 = 20;

/// A parsed user command. Indices are 1-based list positions.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    Add { size: CitrusSize, count: u32 },
    Squeeze { index: Option<usize> },
    Remove { index: Option<usize> },
    Reset,
    Stage,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP_LINES: &[&str] = &[
    "/add <small|medium|large> [count]  add lemons",
    "/squeeze [n]                       squeeze lemon n (default: selected)",
    "/remove [n]                        remove lemon n (default: selected)",
    "/reset                             start over",
    "/stage                             toggle stage mode",
    "/quit                              leave",
    "Keys: 1/2/3 add  s squeeze  d remove  r reset  g stage  space step  q quit",
];

/// Parse a command line. Commands and sizes are case-insensitive.
pub fn parse_command(input: &str) -> Result<ParsedCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input);
    let mut parts = input.split_whitespace();
    let cmd = parts.next().ok_or(CommandError::Empty)?.to_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "add" | "a" => {
            const USAGE: &str = "/add <small|medium|large> [count]";
            let size = args
                .first()
                .ok_or(CommandError::Usage(USAGE))?
                .parse::<CitrusSize>()
                .map_err(|_| CommandError::Usage(USAGE))?;
            let count = match args.get(1) {
                Some(n) => n.parse::<u32>().map_err(|_| CommandError::Usage(USAGE))?,
                None => 1,
            };
            if count == 0 || count > MAX_BATCH || args.len() > 2 {
                return Err(CommandError::Usage(USAGE));
            }
            Ok(ParsedCommand::Add { size, count })
        }
        "squeeze" | "sq" => {
            let index = parse_index(&args, "/squeeze [n]")?;
            Ok(ParsedCommand::Squeeze { index })
        }
        "remove" | "rm" => {
            let index = parse_index(&args, "/remove [n]")?;
            Ok(ParsedCommand::Remove { index })
        }
        "reset" => Ok(ParsedCommand::Reset),
        "stage" | "game" => Ok(ParsedCommand::Stage),
        "help" | "h" | "?" => Ok(ParsedCommand::Help),
        "quit" | "exit" | "q" => Ok(ParsedCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_index(args: &[&str], usage: &'static str) -> Result<Option<usize>, CommandError> {
    match args {
        [] => Ok(None),
        [n] => match n.parse::<usize>() {
            Ok(i) if i > 0 => Ok(Some(i)),
            _ => Err(CommandError::Usage(usage)),
        },
        _ => Err(CommandError::Usage(usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(
            parse_command("/add large"),
            Ok(ParsedCommand::Add {
                size: CitrusSize::Large,
                count: 1
            })
        );
        assert_eq!(
            parse_command("ADD s 3"),
            Ok(ParsedCommand::Add {
                size: CitrusSize::Small,
                count: 3
            })
        );
        assert!(matches!(parse_command("/add"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("/add huge"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("/add m 0"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("/add m 21"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_indexed_commands() {
        assert_eq!(parse_command("/squeeze"), Ok(ParsedCommand::Squeeze { index: None }));
        assert_eq!(parse_command("/sq 2"), Ok(ParsedCommand::Squeeze { index: Some(2) }));
        assert_eq!(parse_command("/rm 1"), Ok(ParsedCommand::Remove { index: Some(1) }));
        assert!(matches!(parse_command("/remove 0"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("/squeeze x"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("/squeeze 1 2"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("/reset"), Ok(ParsedCommand::Reset));
        assert_eq!(parse_command("/stage"), Ok(ParsedCommand::Stage));
        assert_eq!(parse_command("/help"), Ok(ParsedCommand::Help));
        assert_eq!(parse_command("/exit"), Ok(ParsedCommand::Quit));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_command("/"), Err(CommandError::Empty));
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("/blend"),
            Err(CommandError::Unknown("blend".to_string()))
        );
        assert_eq!(
            CommandError::Unknown("blend".into()).to_string(),
            "Unknown command: /blend (try /help)"
        );
        assert_eq!(CommandError::Empty.to_string(), "Empty command");
        assert_eq!(
            parse_command("/squeeze 0").unwrap_err().to_string(),
            "Usage: /squeeze [n]"
        );
    }
}
