use std::io::{self, Write};

use super::input::LineSource;
use super::run_cycle;
use crate::core::feed::types::StatusEntry;
use crate::core::format::format_entry;
use crate::core::monitor::{CheckOutcome, StatusMonitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Success,
    Failure,
}

impl From<SessionExit> for std::process::ExitCode {
    fn from(exit: SessionExit) -> Self {
        match exit {
            SessionExit::Success => std::process::ExitCode::SUCCESS,
            SessionExit::Failure => std::process::ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ViewLogs,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ViewLogs),
            "2" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Single check, then the menu. A failed fetch ends the session with
/// `Failure`; an empty feed ends it with `Success` before the menu.
pub async fn run_interactive<I, W>(
    monitor: &StatusMonitor,
    input: I,
    out: &mut W,
) -> io::Result<SessionExit>
where
    I: LineSource,
    W: Write,
{
    let Some(outcome) = run_cycle(monitor, out).await? else {
        return Ok(SessionExit::Failure);
    };
    if outcome == CheckOutcome::NoData {
        return Ok(SessionExit::Success);
    }

    user_menu(outcome.entries(), input, out).await?;
    Ok(SessionExit::Success)
}

async fn user_menu<I, W>(entries: &[StatusEntry], mut input: I, out: &mut W) -> io::Result<()>
where
    I: LineSource,
    W: Write,
{
    loop {
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. View full logs")?;
        writeln!(out, "2. Exit")?;
        write!(out, "Enter choice (1/2): ")?;
        out.flush()?;

        let Some(line) = input.next_line().await? else {
            tracing::debug!("input closed at menu prompt");
            writeln!(out)?;
            return say_goodbye(out);
        };
        match MenuChoice::parse(&line) {
            Some(MenuChoice::ViewLogs) => show_full_logs(entries, out)?,
            Some(MenuChoice::Exit) => return say_goodbye(out),
            None => writeln!(out, "❌ Invalid input. Please enter 1 or 2.")?,
        }
    }
}

fn show_full_logs(entries: &[StatusEntry], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n📜 FULL STATUS LOGS\n")?;
    for entry in entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    writeln!(out, "{}", "—".repeat(40))
}

fn say_goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n👋 Exiting. Monitoring stopped.")?;
    out.flush()
}
