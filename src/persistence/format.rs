//! Encoding and decoding of the canvas text format.

use std::fs;
use std::path::Path as FsPath;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{AcoError, Result};
use crate::models::{Canvas, TownId};

/// Serializes towns and paths of `canvas`.
///
/// # Examples
///
/// ```
/// use ant_colony::models::Canvas;
/// use ant_colony::persistence::to_persisted_string;
///
/// let mut canvas = Canvas::new();
/// canvas.add_town(0, 0);
/// canvas.add_town(64, 0);
/// assert_eq!(to_persisted_string(&canvas), "0;0;Town 1\n64;0;Town 2\n0;1;1;1\n");
/// ```
pub fn to_persisted_string(canvas: &Canvas) -> String {
    let mut out = String::new();
    for town in canvas.towns() {
        out.push_str(&format!("{};{};{}\n", town.x(), town.y(), town.name()));
    }
    for path in canvas.paths() {
        let (Some(a), Some(b)) = (
            canvas.town_index(path.town_a()),
            canvas.town_index(path.town_b()),
        ) else {
            continue;
        };
        out.push_str(&format!("{};{};{};{}\n", a, b, path.distance(), path.trail()));
    }
    out
}

/// Replaces the contents of `canvas` with the towns and paths in `text`.
///
/// The canvas is cleared first. Town lines create towns through
/// [`Canvas::add_town`], so with `fill_paths` on the graph is completed as
/// it loads. A path line sets the distance of the path between the two
/// referenced towns, creating the path if the canvas has none. A distance
/// equal to the position-derived one stays derived. Lines with any other
/// field count are skipped.
///
/// On error the canvas keeps whatever was loaded before the faulty line.
pub fn load_str(canvas: &mut Canvas, text: &str) -> Result<()> {
    canvas.clear();
    let mut towns: Vec<TownId> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        match fields.as_slice() {
            [x, y, name] => {
                let x: i32 = parse_field(x, line_no, "x")?;
                let y: i32 = parse_field(y, line_no, "y")?;
                let id = canvas.add_town(x, y);
                canvas.set_town_name(id, name);
                towns.push(id);
            }
            [a, b, distance, _trail] => {
                let a = town_at(&towns, parse_field(a, line_no, "town index")?, line_no)?;
                let b = town_at(&towns, parse_field(b, line_no, "town index")?, line_no)?;
                let distance: f64 = parse_field(distance, line_no, "distance")?;
                let Some(id) = canvas.ensure_path(a, b) else {
                    return Err(AcoError::Parse {
                        line: line_no,
                        message: "path endpoints must differ".into(),
                    });
                };
                let derived = canvas.path(id).map(|p| p.distance());
                if derived != Some(distance) {
                    canvas.set_path_distance(id, distance);
                }
            }
            _ => warn!(line = line_no, fields = fields.len(), "skipping unrecognized line"),
        }
    }

    debug!(towns = canvas.town_count(), paths = canvas.path_count(), "canvas loaded");
    Ok(())
}

/// Writes `canvas` to a file.
pub fn save_to(canvas: &Canvas, path: impl AsRef<FsPath>) -> Result<()> {
    fs::write(path.as_ref(), to_persisted_string(canvas))?;
    debug!(file = %path.as_ref().display(), "canvas saved");
    Ok(())
}

/// Replaces the contents of `canvas` with a file written by [`save_to`].
pub fn load_from(canvas: &mut Canvas, path: impl AsRef<FsPath>) -> Result<()> {
    let text = fs::read_to_string(path.as_ref())?;
    load_str(canvas, &text)
}

fn parse_field<T: FromStr>(field: &str, line: usize, what: &str) -> Result<T> {
    field.trim().parse().map_err(|_| AcoError::Parse {
        line,
        message: format!("invalid {what} '{field}'"),
    })
}

fn town_at(towns: &[TownId], index: usize, line: usize) -> Result<TownId> {
    towns
        .get(index)
        .copied()
        .ok_or(AcoError::TownIndex { line, index })
}
