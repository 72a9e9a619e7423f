//! Gesture command language.
//!
//! Sessions are driven by one command per line, typed at the prompt or read
//! from a script file. Blank lines and everything after `#` are ignored.
//!
//! | Command | Effect |
//! |---|---|
//! | `press X Y` | start a drag at canvas point (X, Y) |
//! | `move X Y` | report the provisional drag size |
//! | `release X Y` | finish the drag |
//! | `drag X1 Y1 X2 Y2` | press + release in one line |
//! | `zoom` / `cancel-zoom` | arm / disarm zoom for the next drag |
//! | `unzoom` | show the whole image again |
//! | `plus` | merge the last two regions |
//! | `undo` | drop the last region |
//! | `auto` | add the detected content box of the current view |
//! | `bw` | toggle black/white pre-pass for `auto` |
//! | `contour` | toggle the contour preview filter |
//! | `reset` | drop every region and reset the view |
//! | `preview PATH` | write the current canvas to PATH |
//! | `list` | show the regions |
//! | `crops` | export and end the session |
//! | `quit` | end the session without writing anything |

use crate::rect::Point;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Press(Point),
    Move(Point),
    Release(Point),
    Drag(Point, Point),
    Zoom,
    CancelZoom,
    Unzoom,
    Plus,
    Undo,
    Auto,
    Bw,
    Contour,
    Reset,
    Preview(PathBuf),
    List,
    Crops,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid coordinate `{0}`")]
    Coordinate(String),
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: CommandError },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn coordinate(token: &str) -> Result<i32, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::Coordinate(token.to_string()))
}

fn points<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[i32; N], CommandError> {
    let expected = if N == 2 { "X Y" } else { "X1 Y1 X2 Y2" };
    if args.len() != N {
        return Err(CommandError::Arguments { command, expected });
    }
    let mut values = [0; N];
    for (value, token) in values.iter_mut().zip(args) {
        *value = coordinate(token)?;
    }
    Ok(values)
}

fn bare(command: &'static str, args: &[&str], value: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(value)
    } else {
        Err(CommandError::Arguments {
            command,
            expected: "no arguments",
        })
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (keyword, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        match keyword.to_ascii_lowercase().as_str() {
            "press" => points::<2>("press", &args).map(|[x, y]| Command::Press(Point::new(x, y))),
            "move" => points::<2>("move", &args).map(|[x, y]| Command::Move(Point::new(x, y))),
            "release" => {
                points::<2>("release", &args).map(|[x, y]| Command::Release(Point::new(x, y)))
            }
            "drag" => points::<4>("drag", &args)
                .map(|[x1, y1, x2, y2]| Command::Drag(Point::new(x1, y1), Point::new(x2, y2))),
            "zoom" => bare("zoom", &args, Command::Zoom),
            "cancel-zoom" => bare("cancel-zoom", &args, Command::CancelZoom),
            "unzoom" => bare("unzoom", &args, Command::Unzoom),
            "plus" => bare("plus", &args, Command::Plus),
            "undo" => bare("undo", &args, Command::Undo),
            "auto" => bare("auto", &args, Command::Auto),
            "bw" => bare("bw", &args, Command::Bw),
            "contour" => bare("contour", &args, Command::Contour),
            "reset" => bare("reset", &args, Command::Reset),
            "list" => bare("list", &args, Command::List),
            "crops" => bare("crops", &args, Command::Crops),
            "quit" | "exit" => bare("quit", &args, Command::Quit),
            "preview" if !rest.is_empty() => Ok(Command::Preview(PathBuf::from(rest))),
            "preview" => Err(CommandError::Arguments {
                command: "preview",
                expected: "PATH",
            }),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Press(p) => write!(f, "press {} {}", p.x, p.y),
            Command::Move(p) => write!(f, "move {} {}", p.x, p.y),
            Command::Release(p) => write!(f, "release {} {}", p.x, p.y),
            Command::Drag(a, b) => write!(f, "drag {} {} {} {}", a.x, a.y, b.x, b.y),
            Command::Zoom => f.write_str("zoom"),
            Command::CancelZoom => f.write_str("cancel-zoom"),
            Command::Unzoom => f.write_str("unzoom"),
            Command::Plus => f.write_str("plus"),
            Command::Undo => f.write_str("undo"),
            Command::Auto => f.write_str("auto"),
            Command::Bw => f.write_str("bw"),
            Command::Contour => f.write_str("contour"),
            Command::Reset => f.write_str("reset"),
            Command::Preview(path) => write!(f, "preview {}", path.display()),
            Command::List => f.write_str("list"),
            Command::Crops => f.write_str("crops"),
            Command::Quit => f.write_str("quit"),
        }
    }
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let code = line.split_once('#').map_or(line, |(code, _)| code).trim();
    if code.is_empty() {
        return Ok(None);
    }
    code.parse().map(Some)
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(cmd)) => commands.push(cmd),
            Ok(None) => {}
            Err(source) => return Err(ScriptError::Parse { line: i + 1, source }),
        }
    }
    Ok(commands)
}

pub fn load_script(path: &Path) -> Result<Vec<Command>, ScriptError> {
    parse_script(&std::fs::read_to_string(path)?)
}
