//! Coordinate-chain move text.
//!
//! A move is written as the visited cells joined by `-`, each cell as
//! `x,y`: `2,5-3,4` for a single step, `1,1-3,3-5,5` for a double jump.

use crate::board::coordinate::Coordinate;
use crate::errors::{CheckersError, CheckersResult};
use crate::move_generation::move_request::MoveStep;

pub fn parse_move_steps(text: &str) -> CheckersResult<Vec<MoveStep>> {
    let cells = text
        .trim()
        .split('-')
        .map(|cell| parse_cell(cell, text))
        .collect::<CheckersResult<Vec<Coordinate>>>()?;

    if cells.len() < 2 {
        return Err(CheckersError::InvalidNotation(format!(
            "expected at least two cells in '{text}'"
        )));
    }

    Ok(cells
        .windows(2)
        .map(|pair| MoveStep::new(pair[0], pair[1]))
        .collect())
}

pub fn format_move_steps(steps: &[MoveStep]) -> String {
    let Some(first) = steps.first() else {
        return String::new();
    };
    let mut out = format_cell(first.from);
    for step in steps {
        out.push('-');
        out.push_str(&format_cell(step.to));
    }
    out
}

fn format_cell(cell: Coordinate) -> String {
    format!("{},{}", cell.x, cell.y)
}

fn parse_cell(cell: &str, whole: &str) -> CheckersResult<Coordinate> {
    let invalid = || CheckersError::InvalidNotation(format!("bad cell '{}' in '{whole}'", cell.trim()));

    let (x, y) = cell.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Coordinate::new(x, y))
}
