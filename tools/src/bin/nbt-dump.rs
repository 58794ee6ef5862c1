use std::io::Read;

use clap::{App, Arg};
use env_logger::Env;
use log::{error, info};
use nbtree::{DeOpts, Endian, TextPolicy};
use nbtree_tools::{documents, dump, Result};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = App::new("nbt-dump")
        .about("Decode NBT, optionally gzip or zlib compressed, and print it as JSON")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(false)
                .help("file to read, stdin if omitted"),
        )
        .arg(
            Arg::with_name("little-endian")
                .long("little-endian")
                .takes_value(false)
                .help("decode the little-endian variant of the format"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .help("maximum nesting of lists and compounds"),
        )
        .arg(
            Arg::with_name("strict-text")
                .long("strict-text")
                .takes_value(false)
                .help("fail on strings that are not valid text instead of replacing bad bytes"),
        )
        .arg(
            Arg::with_name("base64")
                .long("base64")
                .takes_value(false)
                .help("treat each input line as a base64 encoded document"),
        )
        .arg(
            Arg::with_name("compact")
                .long("compact")
                .takes_value(false)
                .help("print each document on a single line"),
        )
        .get_matches();

    let mut opts = DeOpts::new();
    if matches.is_present("little-endian") {
        opts = opts.endian(Endian::Little);
    }
    if matches.is_present("strict-text") {
        opts = opts.text_policy(TextPolicy::Strict);
    }
    if let Some(depth) = matches.value_of("max-depth") {
        opts = opts.max_depth(depth.parse()?);
    }

    let input = match matches.value_of_os("file") {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = vec![];
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let docs = documents(&input, matches.is_present("base64"))?;
    info!("{} documents", docs.len());

    for doc in docs {
        println!("{}", dump(&doc, opts, !matches.is_present("compact"))?);
    }

    Ok(())
}
