use std::io::Write;

use itertools::Itertools;

use crate::map::{FaceI, FlagI, Map};
use crate::trace::{SearchOutcome, Trace};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    TabbedTable,
    CSV,
}

pub fn write_outcome(
    map: &Map,
    outcome: &SearchOutcome,
    w: &mut dyn Write,
    format: OutputFormat,
    count_only: bool,
) -> std::io::Result<()> {
    let prefix = match format {
        OutputFormat::TabbedTable => "",
        OutputFormat::CSV => "# ",
    };

    writeln!(w, "{}", prefix)?;
    writeln!(w, "{}Strong Traces", prefix)?;
    writeln!(w, "{}|F| = {}", prefix, map.face_count())?;
    writeln!(w, "{}|E| = {}", prefix, map.edge_count())?;
    writeln!(w, "{}|X| = {}", prefix, map.flag_count())?;
    writeln!(w, "{}evaluated = {}", prefix, outcome.evaluated)?;
    writeln!(w, "{}found = {}", prefix, outcome.traces.len())?;
    writeln!(w, "{}", prefix)?;

    if count_only {
        return Ok(());
    }

    write_trace_header(w, format)?;
    for (index, trace) in outcome.traces.iter().enumerate() {
        write_trace_line(w, map, index, trace, format)?;
    }

    Ok(())
}

fn write_trace_header(w: &mut dyn Write, format: OutputFormat) -> std::io::Result<()> {
    match format {
        OutputFormat::TabbedTable => writeln!(w, "{:<8} {:<40} {}", "#Trace", "Crossover", "Flags"),
        OutputFormat::CSV => writeln!(w, "{};{};{}", "Trace", "Crossover", "Flags"),
    }
}

fn write_trace_line(
    w: &mut dyn Write,
    map: &Map,
    index: usize,
    trace: &Trace,
    format: OutputFormat,
) -> std::io::Result<()> {
    let crossover = trace
        .crossover
        .iter()
        .filter_map(|e| map.edge_vertices(*e))
        .map(|(u, v)| format!("{}-{}", u.0, v.0))
        .join(" ");
    let flags = trace.flags.iter().map(|i| flag_tuple(map, *i)).join(" ");

    match format {
        OutputFormat::TabbedTable => writeln!(w, "{:<8} {:<40} {}", index, crossover, flags),
        OutputFormat::CSV => writeln!(w, "{};{};{}", index, crossover, flags),
    }
}

fn flag_tuple(map: &Map, i: FlagI) -> String {
    let (v, e, f) = map.flag(i).as_tuple();
    format!("({},{},{})", v, e, f)
}

/// Every flag with its three neighbors, followed by the face walks.
pub fn write_flag_graph(map: &Map, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Flags ({})", map.flag_count())?;
    for (i, _) in map.flags() {
        writeln!(w, "  {}: {}", i, map.describe_flag(i))?;
    }

    writeln!(w, "Edges ({})", map.edge_count())?;
    for (e, (u, v)) in map.edges() {
        writeln!(w, "  {}: {} {}", e, u, v)?;
    }

    writeln!(w, "Faces ({})", map.face_count())?;
    for f in (0..map.face_count()).map(FaceI) {
        if let Some(walk) = map.face_walk(f) {
            writeln!(w, "  {}: {}", f, walk.iter().map(|v| v.0).join(" "))?;
        }
    }

    Ok(())
}
