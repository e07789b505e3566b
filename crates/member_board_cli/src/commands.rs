//! Line-oriented command parsing.
//!
//! List and catalog positions are 1-based on the command line and 0-based
//! once parsed.

use member_board_core::{FormField, TagCategory};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Click(usize),
    Drag { from: usize, to: usize },
    Add,
    Edit,
    Delete,
    Close,
    Set(FormField, String),
    Toggle(usize),
    Submit,
    Cancel,
    Tags,
    TagName(String),
    TagCategory(TagCategory),
    TagColor(String),
    TagEdit(usize),
    TagDelete(usize),
    TagSave,
    TagReset,
    TagsClose,
    Quit,
}

/// Command line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidPosition(String),
    UnknownField(String),
    UnknownCategory(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(name) => write!(f, "unknown command `{name}` (try `help`)"),
            Self::MissingArgument(what) => write!(f, "missing argument: {what}"),
            Self::InvalidPosition(raw) => write!(f, "`{raw}` is not a position (1, 2, ...)"),
            Self::UnknownField(raw) => {
                write!(f, "unknown field `{raw}`; expected name|image|data|intro")
            }
            Self::UnknownCategory(raw) => {
                write!(f, "unknown category `{raw}`; expected position|hobby|other")
            }
        }
    }
}

impl Error for ParseError {}

pub const HELP: &str = "\
commands:
  show                      print the board
  click N                   open member N
  drag FROM TO              move member FROM to position TO
  add | edit | delete       open form / edit selected / delete selected
  close                     close member detail
  set name|image|data|intro VALUE
  toggle N                  toggle catalog tag N in the form
  submit | cancel           save or discard the form
  tags | tags-close         open or close tag management
  tag-name VALUE            set draft name
  tag-category position|hobby|other
  tag-color VALUE           set draft color (#rgb, #rrggbb or empty)
  tag-edit N | tag-delete N edit or delete catalog tag N
  tag-save | tag-reset      save draft or start a new one
  quit";

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "" => Err(ParseError::Empty),
            "help" | "?" => Ok(Self::Help),
            "show" => Ok(Self::Show),
            "click" => Ok(Self::Click(position(rest, "member position")?)),
            "drag" => {
                let (from, to) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ParseError::MissingArgument("FROM TO"))?;
                Ok(Self::Drag {
                    from: position(from, "FROM")?,
                    to: position(to.trim(), "TO")?,
                })
            }
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "close" => Ok(Self::Close),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                let field = match field {
                    "name" => FormField::Name,
                    "image" => FormField::ImageUrl,
                    "data" => FormField::ImageData,
                    "intro" => FormField::Introduction,
                    "" => return Err(ParseError::MissingArgument("field")),
                    other => return Err(ParseError::UnknownField(other.to_string())),
                };
                Ok(Self::Set(field, unescape(value)))
            }
            "toggle" => Ok(Self::Toggle(position(rest, "tag position")?)),
            "submit" => Ok(Self::Submit),
            "cancel" => Ok(Self::Cancel),
            "tags" => Ok(Self::Tags),
            "tag-name" => Ok(Self::TagName(rest.to_string())),
            "tag-category" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument("category"));
                }
                TagCategory::parse(rest)
                    .map(Self::TagCategory)
                    .ok_or_else(|| ParseError::UnknownCategory(rest.to_string()))
            }
            "tag-color" => Ok(Self::TagColor(rest.to_string())),
            "tag-edit" => Ok(Self::TagEdit(position(rest, "tag position")?)),
            "tag-delete" => Ok(Self::TagDelete(position(rest, "tag position")?)),
            "tag-save" => Ok(Self::TagSave),
            "tag-reset" => Ok(Self::TagReset),
            "tags-close" => Ok(Self::TagsClose),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn position(raw: &str, what: &'static str) -> Result<usize, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::MissingArgument(what));
    }
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value - 1),
        _ => Err(ParseError::InvalidPosition(raw.to_string())),
    }
}

/// Multi-line introductions are typed as `\n`.
fn unescape(value: &str) -> String {
    value.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError};
    use member_board_core::{FormField, TagCategory};

    #[test]
    fn positions_are_one_based() {
        assert_eq!(Command::parse("click 1").unwrap(), Command::Click(0));
        assert_eq!(
            Command::parse("drag 3 1").unwrap(),
            Command::Drag { from: 2, to: 0 }
        );
        assert_eq!(
            Command::parse("click 0").unwrap_err(),
            ParseError::InvalidPosition("0".to_string())
        );
        assert_eq!(
            Command::parse("drag 2").unwrap_err(),
            ParseError::MissingArgument("FROM TO")
        );
    }

    #[test]
    fn set_keeps_value_spacing_and_unescapes_newlines() {
        assert_eq!(
            Command::parse("set intro Hello there\\nSecond line").unwrap(),
            Command::Set(
                FormField::Introduction,
                "Hello there\nSecond line".to_string()
            )
        );
        assert_eq!(
            Command::parse("set image").unwrap(),
            Command::Set(FormField::ImageUrl, String::new())
        );
        assert_eq!(
            Command::parse("set age 3").unwrap_err(),
            ParseError::UnknownField("age".to_string())
        );
    }

    #[test]
    fn tag_commands_parse_arguments() {
        assert_eq!(
            Command::parse("tag-category Hobby").unwrap(),
            Command::TagCategory(TagCategory::Hobby)
        );
        assert_eq!(
            Command::parse("tag-name  Tech Lead ").unwrap(),
            Command::TagName("Tech Lead".to_string())
        );
        assert_eq!(Command::parse("tag-color").unwrap(), Command::TagColor(String::new()));
        assert!(matches!(
            Command::parse("tag-category pets"),
            Err(ParseError::UnknownCategory(_))
        ));
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert_eq!(Command::parse("   ").unwrap_err(), ParseError::Empty);
        assert_eq!(
            Command::parse("dance").unwrap_err(),
            ParseError::UnknownCommand("dance".to_string())
        );
    }
}
