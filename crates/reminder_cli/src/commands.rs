//! Command dispatch and text/JSON rendering.

use std::error::Error;
use std::fmt::Write as _;

use chrono::TimeZone;
use log::info;
use reminder_core::{
    format_timestamp, header_label, Cook, CookService, EpochMillis, ListItem, ListOrder,
    RecordId, SleepNight, SleepTrackerService, SqliteCookRepository, SqliteSleepNightRepository,
};
use rusqlite::Connection;
use serde::Serialize;

use crate::args::{Command, ListArgs, SleepCommand};

const COOK_VERB: &str = "cooked";
const SLEEP_VERB: &str = "slept";
const EMPTY_COOKS_TEXT: &str = "No dishes yet. Add one with `cook-reminder add <name>`.\n";
const EMPTY_NIGHTS_TEXT: &str = "No nights tracked yet.\n";

/// Per-run context shared by every command.
pub struct RunContext<'a, Tz: TimeZone> {
    pub conn: &'a Connection,
    pub default_order: ListOrder,
    pub now: EpochMillis,
    pub tz: &'a Tz,
}

/// Executes `command` and returns the text to print.
pub fn run<Tz>(ctx: &RunContext<'_, Tz>, command: Command) -> Result<String, Box<dyn Error>>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let cooks = CookService::new(SqliteCookRepository::new(ctx.conn));
    info!("event=cli_command module=cli status=start command={}", command_name(&command));

    let output = match command {
        Command::Add { name } => {
            let cook = cooks.add_cook(&name, ctx.now)?;
            format!("Added #{} {}\n", cook.id, cook.name)
        }
        Command::Cooked { id } => {
            let cook = cooks.mark_cooked(RecordId(id), ctx.now)?;
            format!(
                "Cooked #{} {} at {}\n",
                cook.id,
                cook.name,
                format_timestamp(cook.last_cooked, ctx.tz)
            )
        }
        Command::Rename { id, name } => {
            let cook = cooks.rename_cook(RecordId(id), &name)?;
            format!("Renamed #{} to {}\n", cook.id, cook.name)
        }
        Command::Delete { id } => {
            cooks.delete_cook(RecordId(id))?;
            format!("Deleted #{id}\n")
        }
        Command::Clear => format!("Deleted {} dishes\n", cooks.clear()?),
        Command::List(list) => {
            let items = cooks.cook_list(resolve_order(&list, ctx.default_order))?;
            render_list(&items, &list, COOK_VERB, EMPTY_COOKS_TEXT, |cook| {
                cook_row(cook, ctx.tz)
            })?
        }
        Command::Sleep(sleep) => run_sleep(ctx, sleep)?,
    };

    Ok(output)
}

fn run_sleep<Tz>(ctx: &RunContext<'_, Tz>, command: SleepCommand) -> Result<String, Box<dyn Error>>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let tracker = SleepTrackerService::new(SqliteSleepNightRepository::new(ctx.conn));

    let output = match command {
        SleepCommand::Start => {
            let night = tracker.start_tracking(ctx.now)?;
            format!(
                "Tracking night #{} since {}\n",
                night.id,
                format_timestamp(night.start, ctx.tz)
            )
        }
        SleepCommand::Stop => match tracker.stop_tracking(ctx.now)? {
            Some(night) => format!(
                "Stopped night #{}; rate it with `cook-reminder sleep rate {} <0-5>`\n",
                night.id, night.id
            ),
            None => "No night in progress\n".to_string(),
        },
        SleepCommand::Rate { id, quality } => {
            let night = tracker.rate_night(RecordId(id), quality)?;
            format!("Rated night #{} {}\n", night.id, night.quality.value())
        }
        SleepCommand::List(list) => {
            let items = tracker.night_list(resolve_order(&list, ctx.default_order))?;
            render_list(&items, &list, SLEEP_VERB, EMPTY_NIGHTS_TEXT, |night| {
                night_row(night, ctx.tz)
            })?
        }
        SleepCommand::Clear => format!("Deleted {} nights\n", tracker.clear()?),
    };

    Ok(output)
}

fn resolve_order(list: &ListArgs, default_order: ListOrder) -> ListOrder {
    list.order.map(ListOrder::from).unwrap_or(default_order)
}

fn render_list<T: Serialize>(
    items: &[ListItem<T>],
    list: &ListArgs,
    verb: &str,
    empty_text: &str,
    row: impl Fn(&T) -> String,
) -> Result<String, Box<dyn Error>> {
    if list.json {
        let mut json = serde_json::to_string_pretty(items)?;
        json.push('\n');
        return Ok(json);
    }
    if items.is_empty() {
        return Ok(empty_text.to_string());
    }

    let mut out = String::new();
    for item in items {
        match item {
            ListItem::Header { day_number } => {
                writeln!(out, "{}", header_label(*day_number, verb))?
            }
            ListItem::Record { record } => writeln!(out, "  {}", row(record))?,
        }
    }
    Ok(out)
}

fn cook_row<Tz>(cook: &Cook, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "#{:<4} {:<24} {}",
        cook.id.0,
        cook.name,
        format_timestamp(cook.last_cooked, tz)
    )
}

fn night_row<Tz>(night: &SleepNight, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let start = format_timestamp(night.start, tz);
    if night.is_in_progress() {
        return format!("#{:<4} {start} -> in progress", night.id.0);
    }
    let quality = if night.quality.is_rated() {
        night.quality.value().to_string()
    } else {
        "unrated".to_string()
    };
    format!(
        "#{:<4} {start} -> {}  {}h{:02}m  quality {quality}",
        night.id.0,
        format_timestamp(night.end, tz),
        night.duration_millis() / 3_600_000,
        night.duration_millis() % 3_600_000 / 60_000
    )
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Add { .. } => "add",
        Command::Cooked { .. } => "cooked",
        Command::Rename { .. } => "rename",
        Command::Delete { .. } => "delete",
        Command::Clear => "clear",
        Command::List(_) => "list",
        Command::Sleep(_) => "sleep",
    }
}
