#![forbid(unsafe_code)]

//! Replay scripts: a flat list of user and host actions.
//!
//! Tokens are separated by whitespace; `#` starts a comment that runs to
//! the end of the line.
//!
//! | Token            | Meaning                                         |
//! |------------------|-------------------------------------------------|
//! | `open`           | open the tour                                   |
//! | `close`, `exit`  | close button / exit button                      |
//! | `restart`        | replay from the first step                      |
//! | `next`, `prev`   | card buttons                                    |
//! | `goto:N`         | jump to step N (0-based)                        |
//! | `key:[mod+]NAME` | key press, e.g. `key:right`, `key:ctrl+left`    |
//! | `frame[:N]`      | deliver N display frames (default 1)            |
//! | `page:SLUG`      | navigate the app, e.g. `page:pca`               |
//! | `done:FLAG`      | reach a milestone, e.g. `done:data_loaded`      |
//! | `scroll:DY`      | scroll the content area by DY pixels            |
//! | `resize:WxH`     | resize the viewport                             |
//! | `snapshot`       | render the overlay                              |

use std::fmt;

use waypoint_core::app_state::{Page, StateFlag};
use waypoint_core::geometry::Viewport;
use waypoint_core::input::{KeyCode, KeyEvent, Modifiers};

use crate::error::{Result, ShowcaseError};

/// Upper bound for `frame:N` so a typo cannot spin forever.
pub const MAX_FRAMES_PER_ACTION: u32 = 10_000;

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Open,
    Close,
    Exit,
    Restart,
    Next,
    Previous,
    Goto(usize),
    Key(KeyEvent),
    Frame(u32),
    Page(Page),
    Done(StateFlag),
    Scroll(f64),
    Resize(Viewport),
    Snapshot,
}

/// Walks a fresh user through the shell, moving and resizing on the way.
pub const ONBOARDING_SCRIPT: &str = "\
open snapshot
key:right frame snapshot     # sidebar
key:right key:right          # upload, session
resize:1024x768 frame snapshot
key:left key:right
key:right key:right snapshot # assistant
key:enter                    # finish
";

/// Teaching mode across the first three pages.
pub const TUTORIAL_SCRIPT: &str = "\
open snapshot                 # dropzone
done:data_loaded
next next snapshot            # column overview
page:preprocessing snapshot
done:preprocessed
page:pca next next snapshot   # scree plot, waiting for PCA
done:pca_computed snapshot
goto:4 frame snapshot         # loadings, below the fold
scroll:300 frame snapshot
key:esc
";

impl Action {
    /// Parse a single token.
    pub fn parse(token: &str) -> std::result::Result<Self, String> {
        let (head, arg) = match token.split_once(':') {
            Some((head, arg)) => (head, Some(arg)),
            None => (token, None),
        };
        let action = match (head.to_ascii_lowercase().as_str(), arg) {
            ("open", None) => Self::Open,
            ("close", None) => Self::Close,
            ("exit", None) => Self::Exit,
            ("restart", None) => Self::Restart,
            ("next", None) => Self::Next,
            ("prev" | "previous" | "back", None) => Self::Previous,
            ("snapshot", None) => Self::Snapshot,
            ("frame", None) => Self::Frame(1),
            ("frame", Some(n)) => {
                let n: u32 = n.parse().map_err(|_| format!("bad frame count {n:?}"))?;
                if n == 0 || n > MAX_FRAMES_PER_ACTION {
                    return Err(format!("frame count must be 1..={MAX_FRAMES_PER_ACTION}"));
                }
                Self::Frame(n)
            }
            ("goto", Some(n)) => Self::Goto(n.parse().map_err(|_| format!("bad step index {n:?}"))?),
            ("key", Some(chord)) => Self::Key(parse_key(chord)?),
            ("page", Some(slug)) => Self::Page(slug.parse().map_err(|e| format!("{e}"))?),
            ("done", Some(flag)) => Self::Done(flag.parse().map_err(|e| format!("{e}"))?),
            ("scroll", Some(dy)) => {
                let dy: f64 = dy.parse().map_err(|_| format!("bad scroll delta {dy:?}"))?;
                if !dy.is_finite() {
                    return Err("scroll delta must be finite".to_owned());
                }
                Self::Scroll(dy)
            }
            ("resize", Some(size)) => Self::Resize(parse_size(size)?),
            _ => return Err("unknown action".to_owned()),
        };
        Ok(action)
    }

    /// Whether this action drives the host app rather than the tour.
    pub fn is_host_action(&self) -> bool {
        matches!(
            self,
            Self::Frame(_) | Self::Page(_) | Self::Done(_) | Self::Scroll(_) | Self::Resize(_)
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Close => f.write_str("close"),
            Self::Exit => f.write_str("exit"),
            Self::Restart => f.write_str("restart"),
            Self::Next => f.write_str("next"),
            Self::Previous => f.write_str("prev"),
            Self::Goto(index) => write!(f, "goto:{index}"),
            Self::Key(key) => {
                f.write_str("key:")?;
                for (flag, name) in MODIFIER_NAMES {
                    if key.modifiers.contains(*flag) {
                        write!(f, "{name}+")?;
                    }
                }
                match key.code {
                    KeyCode::Char(c) => write!(f, "{c}"),
                    code => f.write_str(key_name(code)),
                }
            }
            Self::Frame(n) => write!(f, "frame:{n}"),
            Self::Page(page) => write!(f, "page:{page}"),
            Self::Done(flag) => write!(f, "done:{flag}"),
            Self::Scroll(dy) => write!(f, "scroll:{dy}"),
            Self::Resize(viewport) => write!(f, "resize:{}x{}", viewport.width, viewport.height),
            Self::Snapshot => f.write_str("snapshot"),
        }
    }
}

const MODIFIER_NAMES: &[(Modifiers, &str)] = &[
    (Modifiers::CTRL, "ctrl"),
    (Modifiers::ALT, "alt"),
    (Modifiers::SHIFT, "shift"),
    (Modifiers::SUPER, "super"),
];

fn key_name(code: KeyCode) -> &'static str {
    match code {
        KeyCode::Char(_) => "char",
        KeyCode::Enter => "enter",
        KeyCode::Escape => "esc",
        KeyCode::Tab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Home => "home",
        KeyCode::End => "end",
    }
}

fn parse_key(chord: &str) -> std::result::Result<KeyEvent, String> {
    let mut modifiers = Modifiers::NONE;
    let mut parts: Vec<&str> = chord.split('+').collect();
    let Some(name) = parts.pop() else {
        return Err("missing key name".to_owned());
    };
    for part in parts {
        let flag = MODIFIER_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(part))
            .map(|(flag, _)| *flag)
            .ok_or_else(|| format!("unknown modifier {part:?}"))?;
        modifiers |= flag;
    }
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Escape,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("unknown key {name:?}")),
            }
        }
    };
    Ok(KeyEvent::new(code).with_modifiers(modifiers))
}

fn parse_size(size: &str) -> std::result::Result<Viewport, String> {
    let (w, h) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {size:?}"))?;
    let width: f64 = w.parse().map_err(|_| format!("bad width {w:?}"))?;
    let height: f64 = h.parse().map_err(|_| format!("bad height {h:?}"))?;
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err("viewport size must be finite and non-negative".to_owned());
    }
    Ok(Viewport::new(width, height))
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<Action>> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .flat_map(str::split_whitespace)
        .enumerate()
        .map(|(index, token)| {
            Action::parse(token)
                .map_err(|reason| ShowcaseError::invalid_script(index, token, reason))
        })
        .collect()
}
