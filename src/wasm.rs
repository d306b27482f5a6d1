//! WASM bindings, for hosting applications that run in a browser.

use wasm_bindgen::prelude::*;

use crate::config::ReportConfig;
use crate::{rank, Board, Color, Report, SnapshotV1};

fn js_error(e: impl std::fmt::Display) -> js_sys::Error {
    js_sys::Error::new(&e.to_string())
}

/// Rank the tokens of `target` on the board described by the JSON [`SnapshotV1`] `json` and return the text
/// [`Report`], rendered with the default [`ReportConfig`].
#[wasm_bindgen(js_name = rankSnapshot)]
pub fn rank_snapshot(json: &str, target: char) -> Result<String, js_sys::Error> {
    let target = Color::new(target)
        .ok_or_else(|| js_error(format!("{:?} is not a color code", target)))?;
    let board = Board::try_from(SnapshotV1::from_json(json).map_err(js_error)?).map_err(js_error)?;
    let ranking = rank(&board, target).map_err(js_error)?;

    Ok(Report::new(&board, target, &ranking, &ReportConfig::default()).to_string())
}
