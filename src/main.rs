extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let ifile = match args.value_of("INPUT") {
        Some(path) => path,
        None => {
            println!("{}", args.usage());
            std::process::exit(1);
        },
    };

    debug!("Arguments:\n\tVerbosity: {}\n\tQuiet: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        args.is_present("quiet"),
        args.value_of("output").unwrap_or("None"),
        ifile
    );

    // Read the whole input before doing anything with it.
    let ipath = Path::new(ifile);
    let mut ifile = match File::open(&ipath) {
        Err(err) => {
            eprintln!("File not found: {}", ipath.display());
            debug!("unable to open `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let mut raw = Vec::new();
    if let Err(err) = ifile.read_to_end(&mut raw) {
        eprintln!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
        std::process::exit(1);
    }
    // Only ASCII is meaningful outside comments, so stray bytes are
    // replaced rather than rejected.
    let source = String::from_utf8_lossy(&raw);

    let assembly = match assembler::assemble(&source) {
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        },
        Ok(assembly) => assembly,
    };

    for warning in assembly.warnings.iter() {
        eprintln!("{}", warning);
    }

    if args.is_present("print-debug") {
        print_listing(&assembly);
    }

    if !args.is_present("quiet") {
        println!("\n*** BINARY ***\n");
        println!("{}", assembler::encoder::format_binary(&assembly.bytes));
    }

    let opath = match args.value_of("output") {
        Some(filename) => PathBuf::from(filename),
        None => ipath.with_extension("bin"),
    };

    let mut ofile = match File::create(&opath) {
        Err(err) => {
            eprintln!("fatal: unable to open output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    if let Err(err) = ofile.write_all(&assembly.bytes) {
        eprintln!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }

    info!("wrote {} byte(s) to `{}`", assembly.bytes.len(), opath.display());
}

/// Prints each instruction with its address and word, then the labels.
fn print_listing(assembly: &assembler::Assembly) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, ins) in assembly.instructions.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:03X}:", idx)));
        grid.add(Cell::from(format!("{}", ins)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(format!("0x{:03X}", ins.assemble())));
    }

    println!("{}", grid.fit_into_columns(4));

    if assembly.labels.is_empty() {
        return;
    }

    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for label in assembly.labels.iter() {
        grid.add(Cell::from(format!("{}:", label.name)));
        grid.add(Cell::from(format!("0x{:03X}", label.target)));
    }

    println!("{}", grid.fit_into_columns(2));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile instead of <INPUT>.bin"))
        .arg(Arg::with_name("quiet")
            .short("q")
            .takes_value(false)
            .help("do not echo the binary to STDOUT"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the instruction listing and labels to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}
