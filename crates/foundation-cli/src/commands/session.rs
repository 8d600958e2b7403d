//! In-memory tracking session driven by line commands on stdin.
//!
//! Each input line is parsed as a session command and answered with one JSON
//! object on stdout. Nothing is written to disk; the habits vanish when the
//! session ends.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use foundation_core::clock::{local_today, parse_date};
use foundation_core::{Config, CoreError, HabitId, PyramidLayout, StreakTracker};
use serde_json::{json, Value};

#[derive(Args)]
pub struct SessionArgs {
    /// Pre-populate the starter habits from the config file
    #[arg(long)]
    seed: bool,
    /// Pin "today" to this date (YYYY-MM-DD) instead of the local clock
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Create a habit
    Create {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Delete a habit
    Delete { id: HabitId },
    /// Check in a habit for today (or --date)
    Checkin {
        id: HabitId,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Expire lapsed streaks as of today (or --date)
    Tick {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List all habits
    List,
    /// Aggregate statistics
    Stats,
    /// Pyramid layout of one habit
    Pyramid { id: HabitId },
    /// Drain pending events
    Events,
}

pub struct Session {
    tracker: StreakTracker,
    pinned_today: Option<NaiveDate>,
    last_tick: Option<NaiveDate>,
    highlight_interval: u32,
}

impl Session {
    pub fn new(tracker: StreakTracker, pinned_today: Option<NaiveDate>, highlight_interval: u32) -> Self {
        Self {
            tracker,
            pinned_today,
            last_tick: None,
            highlight_interval,
        }
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(local_today)
    }

    /// Tick once per calendar day seen, standing in for a midnight timer.
    fn tick_if_new_day(&mut self) {
        let today = self.today();
        if self.last_tick != Some(today) {
            self.tracker.tick_daily_boundary(today);
            self.last_tick = Some(today);
        }
    }

    /// Parse and execute one input line. Blank lines and `#` comments yield `None`.
    pub fn handle_line(&mut self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let response = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => self
                .execute(parsed.command)
                .unwrap_or_else(|e| json!({ "ok": false, "error": e.to_string() })),
            Err(e) => {
                let message = e.to_string();
                let first = message.lines().next().unwrap_or_default().to_string();
                json!({ "ok": false, "error": first })
            }
        };
        Some(response)
    }

    fn execute(&mut self, command: SessionCommand) -> Result<Value, CoreError> {
        self.tick_if_new_day();

        let response = match command {
            SessionCommand::Create { name } => {
                let habit = self.tracker.create(&name.join(" "))?;
                json!({ "ok": true, "habit": habit })
            }
            SessionCommand::Delete { id } => {
                json!({ "ok": true, "deleted": self.tracker.delete(id) })
            }
            SessionCommand::Checkin { id, date } => {
                let today = date.unwrap_or_else(|| self.today());
                match self.tracker.check_in(id, today) {
                    Some(outcome) => json!({
                        "ok": true,
                        "found": true,
                        "applied": outcome.applied,
                        "milestone": outcome.milestone,
                        "habit": outcome.habit,
                    }),
                    None => json!({ "ok": true, "found": false }),
                }
            }
            SessionCommand::Tick { date } => {
                let today = date.unwrap_or_else(|| self.today());
                let expired = self.tracker.tick_daily_boundary(today);
                json!({ "ok": true, "expired": expired })
            }
            SessionCommand::List => {
                json!({ "ok": true, "habits": self.tracker.list_habits() })
            }
            SessionCommand::Stats => {
                json!({ "ok": true, "stats": self.tracker.stats() })
            }
            SessionCommand::Pyramid { id } => match self.tracker.get(id) {
                Some(habit) => {
                    let rows = PyramidLayout::annotate(
                        PyramidLayout::compute(habit.brick_count()),
                        habit.last_brick_added(),
                        self.highlight_interval,
                    );
                    json!({ "ok": true, "found": true, "rows": rows })
                }
                None => json!({ "ok": true, "found": false }),
            },
            SessionCommand::Events => {
                json!({ "ok": true, "events": self.tracker.drain_events() })
            }
        };
        Ok(response)
    }

    /// Answer every line of `input` on `output`, one JSON object per line.
    pub fn run_lines<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        self.tick_if_new_day();
        for line in input.lines() {
            if let Some(response) = self.handle_line(&line?) {
                writeln!(output, "{response}")?;
                output.flush()?;
            }
        }
        Ok(())
    }
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tracker = StreakTracker::from_config(&config, args.seed)?;
    let mut session = Session::new(tracker, args.today, config.layout.highlight_interval);

    tracing::debug!(seed = args.seed, today = ?args.today, "session started");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run_lines(stdin.lock(), stdout.lock())?;
    Ok(())
}
