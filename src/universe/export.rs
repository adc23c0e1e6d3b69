//! Universe export: Graphviz "dot" for drawing, JSON for tooling.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::model::{Place, Wormhole};
use super::{Universe, UniverseSummary};

/// Default multiplier from place coordinates to dot positions.
pub const DEFAULT_DOT_SCALE: i64 = 20;

fn raw_id(place: &Place) -> i64 {
    place.id.map_or(0, |id| id.0)
}

/// Write the universe as a directed graph, one node per place pinned at its
/// scaled position and one edge per wormhole.
///
/// Meant for `neato -n` or `fdp`, which honor the `pos="x,y!"` pins.
pub fn write_dot(universe: &Universe, scale: i64, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "digraph G {{")?;
    for place in &universe.places {
        writeln!(
            out,
            "    p{} [pos=\"{},{}!\"];",
            raw_id(place),
            place.x * scale,
            place.y * scale
        )?;
    }
    for wormhole in &universe.wormholes {
        writeln!(out, "    p{} -> p{};", wormhole.source.0, wormhole.destination.0)?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Write the dot export to a file.
pub fn write_dot_file(universe: &Universe, scale: i64, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_dot(universe, scale, &mut writer)?;
    writer.flush()?;
    log::info!("wrote dot graph to {}", path.display());
    Ok(())
}

/// JSON document describing one generated universe.
#[derive(Serialize)]
pub struct UniverseExport<'a> {
    pub seed: Option<u64>,
    pub summary: UniverseSummary,
    pub places: &'a [Place],
    pub wormholes: &'a [Wormhole],
}

/// Export places and wormholes to a JSON file.
pub fn export_json(universe: &Universe, seed: Option<u64>, path: &Path) -> io::Result<()> {
    let export = UniverseExport {
        seed,
        summary: universe.summary(),
        places: &universe.places,
        wormholes: &universe.wormholes,
    };
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &export)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writer.flush()?;
    log::info!("wrote JSON export to {}", path.display());
    Ok(())
}
