// src/status/reporter.rs

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::cursor::{MoveDown, MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::tty::IsTty;

/// Width of the rendered glyph group, e.g. `[  OK  ]`.
const GLYPH_WIDTH: usize = 8;

/// State of one status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Pending,
    Success,
    Failure,
    Warning,
}

/// Handle to a row created by [`StatusReporter::begin_task`].
///
/// Rows are addressed by their index at creation time; the handle stays
/// valid for the lifetime of the reporter.
#[derive(Debug)]
pub struct TaskHandle {
    index: usize,
}

struct Row {
    label: String,
    state: RowState,
    /// Terminal line this row was printed on, counted from reporter start.
    line: usize,
}

struct Inner {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    rows: Vec<Row>,
    /// Total lines written so far; the cursor sits at the start of line
    /// `total_lines`. Updating row `r` means moving up `total_lines - r.line`.
    total_lines: usize,
}

/// Renders per-task progress rows to a line-based sink.
///
/// In ANSI mode, finalizing a task rewrites its glyph in place using
/// cursor movement. Without a tty (or with `--plain`) the reporter
/// degrades to appending one line per state change. The row table is
/// mutex-guarded so concurrent pipelines could share one reporter; raw
/// output dumps go through the same lock to keep line accounting right.
pub struct StatusReporter {
    inner: Mutex<Inner>,
    status_col: usize,
    ansi: bool,
}

impl StatusReporter {
    /// Reporter over the real stdout/stderr. ANSI updates are used when
    /// stdout is a tty and `force_plain` is false.
    pub fn stdout(width: usize, force_plain: bool) -> Self {
        let ansi = !force_plain && io::stdout().is_tty();
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()), width, ansi)
    }

    /// Reporter over arbitrary sinks; used by tests.
    pub fn with_writers(
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
        width: usize,
        ansi: bool,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                err,
                rows: Vec::new(),
                total_lines: 0,
            }),
            status_col: width.saturating_sub(GLYPH_WIDTH).max(1),
            ansi,
        }
    }

    /// Create a new row showing `label` with a pending glyph and return a
    /// handle to finalize it later.
    pub fn begin_task(&self, label: impl Into<String>) -> TaskHandle {
        let label = label.into();
        let mut inner = self.inner.lock().unwrap();

        let index = inner.rows.len();
        let line = inner.total_lines;
        inner.rows.push(Row {
            label: label.clone(),
            state: RowState::Pending,
            line,
        });

        if self.ansi {
            let padded = pad_label(&label, self.status_col);
            let _ = queue!(
                inner.out,
                Print(padded),
                Print("["),
                PrintStyledContent(glyph(RowState::Pending)),
                Print("]\r\n"),
            );
        } else {
            let _ = writeln!(inner.out, "{label} ...");
        }
        inner.total_lines += 1;
        let _ = inner.out.flush();

        TaskHandle { index }
    }

    /// Finalize a row with its terminal state.
    ///
    /// In ANSI mode this overwrites the row's glyph in place; rows may be
    /// finalized in any order relative to their creation.
    pub fn finish(&self, task: &TaskHandle, state: RowState) {
        let mut inner = self.inner.lock().unwrap();

        inner.rows[task.index].state = state;
        let line = inner.rows[task.index].line;

        if self.ansi {
            // Never zero: the cursor is always at least one line below the row.
            let up = (inner.total_lines - line) as u16;
            let col = self.status_col as u16;
            let _ = queue!(
                inner.out,
                MoveUp(up),
                MoveToColumn(col),
                Print("["),
                PrintStyledContent(glyph(state)),
                Print("]"),
                MoveToColumn(0),
                MoveDown(up),
            );
        } else {
            let label = inner.rows[task.index].label.clone();
            let _ = writeln!(inner.out, "{label}: {}", plain_suffix(state));
            inner.total_lines += 1;
        }
        let _ = inner.out.flush();
    }

    /// Print an empty separator line.
    pub fn blank_line(&self) {
        let mut inner = self.inner.lock().unwrap();
        let _ = writeln!(inner.out);
        inner.total_lines += 1;
        let _ = inner.out.flush();
    }

    /// Dump raw tool output (lint warnings, failed-test output) below the
    /// status rows.
    pub fn dump(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap();
        let mut count = 0;
        for line in text.lines() {
            let _ = writeln!(inner.out, "{line}");
            count += 1;
        }
        inner.total_lines += count;
        let _ = inner.out.flush();
    }

    /// Dump raw tool output to the error stream (compile failures).
    ///
    /// The error stream normally shares the terminal with the standard
    /// one, so its lines still count toward row offsets.
    pub fn dump_err(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap();
        let mut count = 0;
        for line in text.lines() {
            let _ = writeln!(inner.err, "{line}");
            count += 1;
        }
        inner.total_lines += count;
        let _ = inner.err.flush();
    }

    /// Print a highlighted session-level warning line.
    pub fn warn_line(&self, msg: &str) {
        let mut inner = self.inner.lock().unwrap();
        if self.ansi {
            let _ = queue!(
                inner.out,
                PrintStyledContent(msg.to_string().yellow().bold()),
                Print("\r\n"),
            );
        } else {
            let _ = writeln!(inner.out, "{msg}");
        }
        inner.total_lines += 1;
        let _ = inner.out.flush();
    }

    /// Snapshot of all rows (label, state) in creation order.
    pub fn snapshot(&self) -> Vec<(String, RowState)> {
        let inner = self.inner.lock().unwrap();
        inner
            .rows
            .iter()
            .map(|row| (row.label.clone(), row.state))
            .collect()
    }
}

fn glyph(state: RowState) -> crossterm::style::StyledContent<&'static str> {
    match state {
        RowState::Pending => " .... ".dark_grey(),
        RowState::Success => "  OK  ".green().bold(),
        RowState::Failure => " FAIL ".red().bold(),
        RowState::Warning => " WARN ".yellow().bold(),
    }
}

fn plain_suffix(state: RowState) -> &'static str {
    match state {
        RowState::Pending => "...",
        RowState::Success => "OK",
        RowState::Failure => "FAIL",
        RowState::Warning => "WARN",
    }
}

/// Truncate or pad `label` so the glyph lands at the status column.
fn pad_label(label: &str, col: usize) -> String {
    let mut s: String = label.chars().take(col.saturating_sub(1)).collect();
    while s.chars().count() < col {
        s.push(' ');
    }
    s
}
