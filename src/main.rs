use clap::{Arg, ArgGroup, ArgMatches, Command};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod subcommands;

fn input_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("fixture")
            .long("fixture")
            .takes_value(true)
            .value_name("NAME")
            .help("Built-in polyhedron: tetrahedron, octahedron, cube, prism<N>, bipyramid<N>"),
        Arg::new("faces")
            .long("faces")
            .takes_value(true)
            .value_name("FILE")
            .help("Text file with one face per line"),
        Arg::new("planar-code")
            .long("planar-code")
            .takes_value(true)
            .value_name("FILE")
            .help("plantri planar_code file"),
        Arg::new("index")
            .long("index")
            .takes_value(true)
            .value_name("K")
            .requires("planar-code")
            .help("Which graph of the planar_code file to use [default: 0]"),
    ]
}

fn input_group() -> ArgGroup<'static> {
    ArgGroup::new("input").args(&["fixture", "faces", "planar-code"]).required(true)
}

fn cli() -> Command<'static> {
    Command::new("flagtrace")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds flag maps from face lists and searches them for strong traces")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .global(true)
                .help("More log output on stderr (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("traces")
                .about("Enumerates all strong traces from the start flag")
                .args(input_args())
                .group(input_group())
                .arg(
                    Arg::new("threads")
                        .long("threads")
                        .short('t')
                        .takes_value(true)
                        .value_name("N")
                        .default_value("1"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .takes_value(true)
                        .possible_values(["table", "csv"])
                        .default_value("table"),
                )
                .arg(Arg::new("count-only").long("count-only").help("Only print the summary"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .takes_value(true)
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Prints every flag with its t0, t1 and t2 neighbors")
                .args(input_args())
                .group(input_group()),
        )
}

fn init_logging(matches: &ArgMatches, sub: &ArgMatches) {
    let verbosity = matches.occurrences_of("verbose").max(sub.occurrences_of("verbose"));
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = cli().get_matches();
    let (name, sub) = match matches.subcommand() {
        Some(subcommand) => subcommand,
        None => return,
    };
    init_logging(&matches, sub);

    match name {
        "traces" => subcommands::traces(sub),
        "inspect" => subcommands::inspect(sub),
        _ => println!("Unknown subcommand '{}'.", name),
    }
}
