//! Command-line interface for inikeep
//! This binary is used to inspect / convert / edit INI files while keeping
//! their formatting intact.
//!
//! Usage:
//!   inikeep show `<path>` [--format `<format>`] [--strip-comments]  - Print the document
//!   inikeep get `<path>` `<section>` `<key>` [--default `<value>`]  - Print one value
//!   inikeep set `<path>` `<section>` `<key>` `<value>` [--out `<path>`] - Set a value and save

use clap::{Arg, ArgAction, Command};
use inikeep::{Document, WriteOptions};

fn main() {
    let matches = Command::new("inikeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and editing INI files without disturbing their formatting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Parse a file and print it back")
                .arg(
                    Arg::new("path")
                        .help("Path to the INI file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: 'ini' (round trip), 'json', or 'yaml'")
                        .default_value("ini"),
                )
                .arg(
                    Arg::new("strip-comments")
                        .long("strip-comments")
                        .help("Drop all comments from 'ini' output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Print a single value")
                .arg(Arg::new("path").required(true).index(1))
                .arg(Arg::new("section").required(true).index(2))
                .arg(Arg::new("key").required(true).index(3))
                .arg(
                    Arg::new("default")
                        .long("default")
                        .short('d')
                        .help("Value to print when the lookup misses")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Set a value and write the file back")
                .arg(Arg::new("path").required(true).index(1))
                .arg(Arg::new("section").required(true).index(2))
                .arg(Arg::new("key").required(true).index(3))
                .arg(Arg::new("value").required(true).index(4))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Write to this path instead of back to the input"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("show", show_matches)) => {
            let path = show_matches.get_one::<String>("path").unwrap();
            let format = show_matches.get_one::<String>("format").unwrap();
            let strip = show_matches.get_flag("strip-comments");
            handle_show_command(path, format, strip);
        }
        Some(("get", get_matches)) => {
            let path = get_matches.get_one::<String>("path").unwrap();
            let section = get_matches.get_one::<String>("section").unwrap();
            let key = get_matches.get_one::<String>("key").unwrap();
            let default = get_matches.get_one::<String>("default").unwrap();
            handle_get_command(path, section, key, default);
        }
        Some(("set", set_matches)) => {
            let path = set_matches.get_one::<String>("path").unwrap();
            let section = set_matches.get_one::<String>("section").unwrap();
            let key = set_matches.get_one::<String>("key").unwrap();
            let value = set_matches.get_one::<String>("value").unwrap();
            let out = set_matches.get_one::<String>("out");
            handle_set_command(path, section, key, value, out);
        }
        _ => unreachable!(),
    }
}

fn load_or_exit(path: &str) -> Document {
    Document::load(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the show command
fn handle_show_command(path: &str, format: &str, strip_comments: bool) {
    let doc = load_or_exit(path);
    match format {
        "ini" => {
            let options = WriteOptions {
                comments: !strip_comments,
                blank_lines_for: None,
            };
            print!("{}", doc.render(&options));
        }
        "json" => {
            let out = serde_json::to_string_pretty(&doc).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", out);
        }
        "yaml" => {
            let out = serde_yaml::to_string(&doc).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            print!("{}", out);
        }
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    }
}

/// Handle the get command
fn handle_get_command(path: &str, section: &str, key: &str, default: &str) {
    let doc = load_or_exit(path);
    println!("{}", doc.get(section, key, default));
}

/// Handle the set command
fn handle_set_command(path: &str, section: &str, key: &str, value: &str, out: Option<&String>) {
    let mut doc = load_or_exit(path);
    doc.set(section, key, value);
    let options = WriteOptions::default();
    let result = match out {
        Some(out_path) => doc.save_as(out_path, &options),
        None => doc.save(&options),
    };
    if let Err(e) = result {
        eprintln!("Error writing file: {}", e);
        std::process::exit(1);
    }
}
