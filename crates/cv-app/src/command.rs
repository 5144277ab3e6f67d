//! Text commands read from stdin

use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use cv_core::{ElementRef, HoverTarget, Intent, RangeBound, SpatialExtent, ViewKind, ViolenceType};

pub const HELP: &str = "\
Commands:
  range <start-year> <end-year> [start|end]   set the year range (bound being moved, default end)
  toggle <1|2|3>                             toggle a violence type
  extent <min-lat> <max-lat> <min-lon> <max-lon> | extent world
  reset                                      restore every default
  conflict <id> | event <id>                 show details
  close                                      close the detail panel
  enter <view> <key> conflict|event <id>     pointer enters an element
  leave <view> <key>                         pointer leaves an element
  wait <ms>                                  let highlight timers run
  show [view]                                describe the rendered views
  status                                     print the filter state
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(Intent),
    Wait(Duration),
    Show(Option<ViewKind>),
    Status,
    Help,
    Quit,
}

fn number<T>(arg: Option<&str>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let arg = arg.ok_or_else(|| anyhow!("missing {}", what))?;
    arg.parse().with_context(|| format!("invalid {} '{}'", what, arg))
}

fn view_kind(arg: Option<&str>) -> Result<ViewKind> {
    let arg = arg.ok_or_else(|| anyhow!("missing view"))?;
    ViewKind::from_str(arg).map_err(anyhow::Error::msg)
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut args = line.split_whitespace();
    let Some(name) = args.next() else {
        return Ok(None);
    };

    let command = match name {
        "range" => {
            let start_year = number(args.next(), "start year")?;
            let end_year = number(args.next(), "end year")?;
            let moved = match args.next() {
                None | Some("end") => RangeBound::End,
                Some("start") => RangeBound::Start,
                Some(other) => bail!("unknown bound '{}'", other),
            };
            Command::Intent(Intent::SetTimeRange { start_year, end_year, moved })
        }
        "toggle" => {
            let code: u8 = number(args.next(), "violence type")?;
            let violence_type = ViolenceType::from_code(code)
                .ok_or_else(|| anyhow!("unknown violence type {}", code))?;
            Command::Intent(Intent::ToggleViolenceType(violence_type))
        }
        "extent" => {
            let extent = if args.clone().next() == Some("world") {
                args.next();
                SpatialExtent::WORLD
            } else {
                SpatialExtent {
                    min_lat: number(args.next(), "min latitude")?,
                    max_lat: number(args.next(), "max latitude")?,
                    min_lon: number(args.next(), "min longitude")?,
                    max_lon: number(args.next(), "max longitude")?,
                }
            };
            Command::Intent(Intent::SetSpatialExtent(extent))
        }
        "reset" => Command::Intent(Intent::Reset),
        "conflict" => Command::Intent(Intent::SelectConflict(number(args.next(), "conflict id")?)),
        "event" => Command::Intent(Intent::SelectEvent(number(args.next(), "event id")?)),
        "close" => Command::Intent(Intent::CloseDetail),
        "enter" => {
            let view = view_kind(args.next())?;
            let element = ElementRef::new(view, number(args.next(), "element key")?);
            let target = match args.next() {
                Some("conflict") => HoverTarget::Conflict(number(args.next(), "conflict id")?),
                Some("event") => HoverTarget::Event(number(args.next(), "event id")?),
                _ => bail!("expected 'conflict <id>' or 'event <id>'"),
            };
            Command::Intent(Intent::HoverEnter { element, target })
        }
        "leave" => {
            let view = view_kind(args.next())?;
            let element = ElementRef::new(view, number(args.next(), "element key")?);
            Command::Intent(Intent::HoverLeave { element })
        }
        "wait" => Command::Wait(Duration::from_millis(number(args.next(), "milliseconds")?)),
        "show" => match args.next() {
            Some(view) => Command::Show(Some(view_kind(Some(view))?)),
            None => Command::Show(None),
        },
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}', try 'help'", other),
    };

    if let Some(extra) = args.next() {
        bail!("unexpected argument '{}'", extra);
    }
    Ok(Some(command))
}
