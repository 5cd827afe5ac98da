//! Exhaustive search for strong traces.
//!
//! A trace starts at a fixed flag and alternately moves to the other edge at
//! the same corner (`t1`) and along the edge to its other end (`t0`). At the
//! edges of a chosen crossover set it additionally switches to the other face
//! (`t2`). A trace that comes back to the start only after visiting every
//! flag exactly once is strong. The search tries every subset of edges as
//! crossover set, so it evaluates 2^|E| candidates.

use itertools::Itertools;
use tracing::info;

use crate::map::{EdgeI, FlagI, Map};

pub mod io;
pub mod parallel;

/// A set of edges, given as ids of one map.
#[derive(Clone, Debug)]
pub struct CrossoverSet {
    edges: Vec<EdgeI>,
    indicator: Vec<bool>,
}

impl CrossoverSet {
    /// Ids that are not edges of `map` are dropped.
    pub fn new(map: &Map, mut edges: Vec<EdgeI>) -> CrossoverSet {
        edges.retain(|e| e.0 < map.edge_count());
        let mut indicator = vec![false; map.edge_count()];
        for e in &edges {
            indicator[e.0] = true;
        }
        CrossoverSet { edges, indicator }
    }

    pub fn contains(&self, e: EdgeI) -> bool {
        self.indicator.get(e.0).copied().unwrap_or(false)
    }

    pub fn edges(&self) -> &[EdgeI] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<EdgeI> {
        self.edges
    }
}

/// Moves from `pos` along its edge, crossing to the other face if the edge is
/// a crossover edge.
pub fn advance(map: &Map, pos: FlagI, crossover: &CrossoverSet) -> FlagI {
    let pos = map.t0(pos);
    if crossover.contains(map.flag(pos).edge) {
        map.t2(pos)
    } else {
        pos
    }
}

/// Walks from `start` until it recurs and returns the visited flags, `start`
/// first. The walk always closes since every step is a bijection on flags.
pub fn do_trace(map: &Map, start: FlagI, crossover: &CrossoverSet) -> Vec<FlagI> {
    let mut trace = vec![start];
    let mut pos = start;
    loop {
        pos = map.t1(pos);
        trace.push(pos);
        pos = advance(map, pos, crossover);
        if pos == start {
            break;
        }
        trace.push(pos);
    }
    trace
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub crossover: Vec<EdgeI>,
    pub flags: Vec<FlagI>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn start(&self) -> Option<FlagI> {
        self.flags.first().copied()
    }

    /// True if one more step from the last flag leads back to the start.
    pub fn closes(&self, map: &Map) -> bool {
        match (self.flags.first(), self.flags.last()) {
            (Some(first), Some(last)) => {
                let crossover = CrossoverSet::new(map, self.crossover.clone());
                advance(map, *last, &crossover) == *first
            }
            _ => false,
        }
    }
}

/// Visits every flag of `map` exactly once.
pub fn covers_all_flags(map: &Map, flags: &[FlagI]) -> bool {
    if flags.len() != map.flag_count() {
        return false;
    }
    let mut seen = vec![false; map.flag_count()];
    for i in flags {
        if seen[i.0] {
            return false;
        }
        seen[i.0] = true;
    }
    true
}

pub struct SearchOutcome {
    /// Strong traces in the order their crossover sets were enumerated.
    pub traces: Vec<Trace>,
    /// Number of crossover sets tried.
    pub evaluated: usize,
}

pub struct TraceSearch<'a> {
    map: &'a Map,
    start: FlagI,
}

impl<'a> TraceSearch<'a> {
    /// Searches from the map's start flag.
    pub fn new(map: &'a Map) -> TraceSearch<'a> {
        TraceSearch { map, start: map.start_flag() }
    }

    pub fn with_start(map: &'a Map, start: FlagI) -> TraceSearch<'a> {
        if map.try_flag(start).is_none() {
            panic!("start flag {} does not belong to the map", start);
        }
        TraceSearch { map, start }
    }

    pub fn map(&self) -> &'a Map {
        self.map
    }

    pub fn start(&self) -> FlagI {
        self.start
    }

    /// 2^|E|, if it fits.
    pub fn candidate_count(&self) -> Option<u64> {
        1u64.checked_shl(self.map.edge_count() as u32)
    }

    /// All subsets of edges, by size and then lexicographically.
    pub fn candidates(&self) -> impl Iterator<Item = Vec<EdgeI>> {
        self.map.edge_indices().powerset()
    }

    /// The trace for one crossover set, if it is strong.
    pub fn evaluate(&self, crossover: Vec<EdgeI>) -> Option<Trace> {
        let crossover = CrossoverSet::new(self.map, crossover);
        let flags = do_trace(self.map, self.start, &crossover);
        if covers_all_flags(self.map, &flags) {
            Some(Trace { crossover: crossover.into_edges(), flags })
        } else {
            None
        }
    }

    pub fn run(&self) -> SearchOutcome {
        info!(
            edges = self.map.edge_count(),
            flags = self.map.flag_count(),
            candidates = ?self.candidate_count(),
            "searching strong traces"
        );

        let mut evaluated = 0;
        let mut traces = Vec::new();
        for crossover in self.candidates() {
            evaluated += 1;
            if let Some(trace) = self.evaluate(crossover) {
                traces.push(trace);
            }
        }

        info!(evaluated, found = traces.len(), "search finished");
        SearchOutcome { traces, evaluated }
    }
}

/// Every strong trace of `map` from its start flag.
pub fn find_strong_traces(map: &Map) -> Vec<Trace> {
    TraceSearch::new(map).run().traces
}
