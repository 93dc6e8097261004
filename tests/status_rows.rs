use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use watchci::status::{RowState, StatusReporter};

/// Write sink that can be inspected after the reporter is done with it.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn ansi_reporter(buf: &SharedBuf) -> StatusReporter {
    StatusReporter::with_writers(Box::new(buf.clone()), Box::new(io::sink()), 80, true)
}

#[test]
fn rows_finalized_out_of_order_keep_their_own_state() {
    let buf = SharedBuf::default();
    let reporter = ansi_reporter(&buf);

    let t1 = reporter.begin_task("Building app");
    let t2 = reporter.begin_task("Linting");
    let t3 = reporter.begin_task("Testing");

    reporter.finish(&t2, RowState::Failure);
    reporter.finish(&t1, RowState::Success);
    reporter.finish(&t3, RowState::Warning);

    let states: Vec<RowState> = reporter.snapshot().into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        states,
        vec![RowState::Success, RowState::Failure, RowState::Warning]
    );
}

#[test]
fn in_place_updates_move_the_cursor_to_the_right_row() {
    let buf = SharedBuf::default();
    let reporter = ansi_reporter(&buf);

    let t1 = reporter.begin_task("Building app");
    let t2 = reporter.begin_task("Linting");
    let t3 = reporter.begin_task("Testing");

    // Three rows printed; the cursor sits below the last one. Finalizing
    // row 2 must move up 2 lines, row 1 up 3, row 3 up 1.
    reporter.finish(&t2, RowState::Failure);
    reporter.finish(&t1, RowState::Success);
    reporter.finish(&t3, RowState::Warning);

    let out = buf.contents();
    assert!(out.contains("\u{1b}[2A"));
    assert!(out.contains("\u{1b}[3A"));
    assert!(out.contains("\u{1b}[1A"));
    assert!(out.contains("  OK  "));
    assert!(out.contains(" FAIL "));
    assert!(out.contains(" WARN "));
}

#[test]
fn pending_rows_right_align_the_glyph_column() {
    let buf = SharedBuf::default();
    let reporter = ansi_reporter(&buf);

    reporter.begin_task("Building app");

    let out = buf.contents();
    let first_line = out.lines().next().unwrap();
    assert!(first_line.starts_with("Building app"));
    // Glyph group starts at width - 8 = column 72.
    assert_eq!(first_line.find('[').unwrap(), 72);
}

#[test]
fn plain_mode_appends_a_line_per_state_change() {
    let buf = SharedBuf::default();
    let reporter =
        StatusReporter::with_writers(Box::new(buf.clone()), Box::new(io::sink()), 80, false);

    let t1 = reporter.begin_task("Building app");
    let t2 = reporter.begin_task("Testing");
    reporter.finish(&t2, RowState::Failure);
    reporter.finish(&t1, RowState::Success);

    let contents = buf.contents();
    let lines: Vec<&str> = contents.lines().map(str::trim_end).collect();
    assert_eq!(
        lines,
        vec![
            "Building app ...",
            "Testing ...",
            "Testing: FAIL",
            "Building app: OK",
        ]
    );
}
