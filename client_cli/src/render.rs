//! Text rendering of the board
use plakoto_store::{Board, Field};

const CELL_WIDTH: usize = 5;

/// Content of a field: `o` checkers of player one, `x` checkers of player two, `*` for a pin
fn cell(board: &Board, field: Field) -> String {
    let point = board.points()[field];
    let mut s = String::new();
    if point.checkers.0 > 0 {
        s.push_str(&format!("o{}", point.checkers.0));
    }
    if point.checkers.1 > 0 {
        s.push_str(&format!("x{}", point.checkers.1));
    }
    if point.is_pinned() {
        s.push('*');
    }
    s
}

fn row<F: Fn(Field) -> String>(fields: &[Field], content: F) -> String {
    let (left, right) = fields.split_at(fields.len() / 2);
    let half = |fields: &[Field]| -> String {
        fields
            .iter()
            .map(|field| format!("{:>width$}", content(*field), width = CELL_WIDTH))
            .collect()
    };
    format!("{} |{}", half(left), half(right))
}

/// Fields 12 to 23 on top, 11 to 0 below, so that each player's mother field sits on the right.
pub fn board_grid(board: &Board) -> String {
    let top: Vec<Field> = (12..24).collect();
    let bottom: Vec<Field> = (0..12).rev().collect();
    let separator = format!("{}-+{}", "-".repeat(6 * CELL_WIDTH), "-".repeat(6 * CELL_WIDTH));

    let mut output = String::new();
    output += &row(&top, |field| field.to_string());
    output += "\n";
    output += &row(&top, |field| cell(board, field));
    output += "\n";
    output += &separator;
    output += "\n";
    output += &row(&bottom, |field| cell(board, field));
    output += "\n";
    output += &row(&bottom, |field| field.to_string());
    output += "\n";
    output
}
