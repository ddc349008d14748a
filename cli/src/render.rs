use std::fmt::Write;

use sapper_core::{BoardEngine, CellView, Outcome};

/// Three-digit counter, clamped to the range the display can show.
pub fn format_for_counter(num: i64) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

pub fn cell(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Blank => '.',
        CellView::Number(count) => char::from(b'0' + count),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
        CellView::Misflagged => 'x',
    }
}

pub fn board(engine: &BoardEngine) -> String {
    let snapshot = engine.snapshot();
    let session = engine.session();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "mines {}  flags {}  left {}  time {}",
        format_for_counter(snapshot.total_mines.into()),
        format_for_counter(snapshot.flag_count.into()),
        format_for_counter(session.mines_left().into()),
        format_for_counter(session.clock_secs() as i64),
    );
    let _ = write!(out, "    ");
    for col in 0..snapshot.cols {
        let _ = write!(out, "{}", col % 10);
    }
    let _ = writeln!(out);
    for (row, cells) in snapshot.cells.iter().enumerate() {
        let _ = write!(out, "{row:>3} ");
        out.extend(cells.iter().copied().map(cell));
        let _ = writeln!(out);
    }
    out
}

pub fn outcome(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::None => None,
        Outcome::Win => Some("All safe cells cleared, you win!"),
        Outcome::Loss => Some("Boom. You stepped on a mine."),
    }
}
