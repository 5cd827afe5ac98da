use clap::ArgMatches;
use flagtrace::map::io::{read_face_list, read_plantri_planar_code};
use flagtrace::map::Map;
use flagtrace::polyhedra;
use flagtrace::trace::io::{write_flag_graph, write_outcome, OutputFormat};
use flagtrace::trace::TraceSearch;
use std::fs::{read, File};
use std::io::{stdout, Write};
use tracing::info;

const MAX_THREADS: usize = 64;

pub fn traces(matches: &ArgMatches) {
    let map = match load_map(matches) {
        Some(map) => map,
        None => return,
    };

    let threads = match retrieve_threads(matches, MAX_THREADS) {
        Some(n) => n,
        None => return,
    };

    let format = match matches.value_of("format").unwrap_or("table").to_lowercase().as_str() {
        "table" => OutputFormat::TabbedTable,
        "csv" => OutputFormat::CSV,
        str => {
            println!("Output format '{}' not known.", str);
            return;
        }
    };
    let count_only = matches.is_present("count-only");

    let search = TraceSearch::new(&map);
    if search.candidate_count().is_none() {
        println!(
            "The map has {} edges, too many crossover sets to enumerate.",
            map.edge_count()
        );
        return;
    }

    let outcome = if threads > 1 {
        search.run_parallel(threads)
    } else {
        search.run()
    };

    if let Some(output_filename) = matches.value_of("output") {
        if let Ok(mut output_file) = File::create(output_filename) {
            if let Err(e) = write_outcome(&map, &outcome, &mut output_file, format, count_only) {
                println!("Output file could not be written: {}", e);
            } else {
                info!(file = output_filename, traces = outcome.traces.len(), "results written");
            }
        } else {
            println!(
                "Output file '{}' could not be created or opened for writing.",
                output_filename
            );
        }
    } else if let Err(e) = write_outcome(&map, &outcome, &mut stdout(), format, count_only) {
        println!("Output could not be written to STDOUT: {}", e);
    }
}

pub fn inspect(matches: &ArgMatches) {
    let map = match load_map(matches) {
        Some(map) => map,
        None => return,
    };

    let mut out = stdout();
    if let Err(e) = write_flag_graph(&map, &mut out).and_then(|_| out.flush()) {
        println!("Output could not be written to STDOUT: {}", e);
    }
}

fn load_map(matches: &ArgMatches) -> Option<Map> {
    let faces = if let Some(name) = matches.value_of("fixture") {
        match polyhedra::by_name(name) {
            Some(faces) => faces,
            None => {
                println!(
                    "Fixture '{}' not known, try one of: {}.",
                    name,
                    polyhedra::NAMES.join(", ")
                );
                return None;
            }
        }
    } else if let Some(filename) = matches.value_of("faces") {
        if let Ok(mut file) = File::open(filename) {
            match read_face_list(&mut file) {
                Ok(faces) => faces,
                Err(e) => {
                    println!("File '{}' does not contain a face list: {}", filename, e);
                    return None;
                }
            }
        } else {
            println!("File '{}' could not be opened for reading.", filename);
            return None;
        }
    } else if let Some(filename) = matches.value_of("planar-code") {
        let index = match matches.value_of("index").map(str::parse::<usize>) {
            Some(Ok(k)) => k,
            None => 0,
            _ => {
                println!("Index should be a non-negative number.");
                return None;
            }
        };

        let data = match read(filename) {
            Ok(data) => data,
            Err(e) => {
                println!("File '{}' could not be read: {}", filename, e);
                return None;
            }
        };
        match read_plantri_planar_code(&data) {
            Ok(mut graphs) if index < graphs.len() => graphs.swap_remove(index),
            Ok(graphs) => {
                println!(
                    "File '{}' contains {} graphs, index {} is out of range.",
                    filename,
                    graphs.len(),
                    index
                );
                return None;
            }
            Err(e) => {
                println!("{}", e);
                return None;
            }
        }
    } else {
        println!("No input given.");
        return None;
    };

    match Map::from_faces(&faces) {
        Ok(map) => Some(map),
        Err(e) => {
            println!("{}", e);
            None
        }
    }
}

fn retrieve_threads(matches: &ArgMatches, upper_bound: usize) -> Option<usize> {
    match matches.value_of("threads").map(str::parse::<usize>) {
        Some(Ok(n)) if n >= 1 && n <= upper_bound => Some(n),
        None => Some(1),
        Some(Ok(_)) => {
            println!("Thread count should be at least 1 and at most {}.", upper_bound);
            None
        }
        _ => {
            println!("Thread count should be a positive number.");
            None
        }
    }
}
