//! avlist : command-line front end for the AVList playlist engine
//!
//! Classifies its arguments (files, directories, playlist files, URIs),
//! resolves nested playlists, reports unusable sources, and can merge the
//! result into a single PLS file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};

use avlplaylist::{resolve_args, ClassifyOptions, ClassifyOptionsConfigExt, Group, SourceKind};
use avlutils::IdAllocator;

#[derive(Parser, Debug)]
#[command(name = "avlist", version, about, long_about = None)]
struct Args {
    /// Files, directories, playlists or URIs to resolve
    #[arg(required = true)]
    sources: Vec<String>,

    /// Scan directories recursively
    #[arg(short, long)]
    recurse: bool,

    /// Accept any <scheme>:// URI, not just the well-known schemes
    #[arg(long)]
    permissive_uri: bool,

    /// Do not reduce file:// URIs to local paths
    #[arg(long)]
    keep_file_uris: bool,

    /// Write all resolved resources to one merged PLS file
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print resolved groups as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = avlconfig::get_config();
    let mut opts: ClassifyOptions = config.classify_options();
    if args.recurse {
        opts.dir_recurse = true;
    }
    if args.permissive_uri {
        opts.uri_filter_permissive = true;
    }
    if args.keep_file_uris {
        opts.file_uri_filter = false;
    }

    let ids = IdAllocator::with_width(config.get_id_hex_width());
    let outcome = resolve_args(&args.sources, &opts, &ids);

    for (what, why) in &outcome.errors {
        warn!("unusable: {}: {}", what, why);
    }

    if args.json {
        match serde_json::to_string_pretty(&outcome.groups) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("JSON encoding failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for group in &outcome.groups {
            print_group(group);
        }
    }

    if let Some(out_path) = &args.out {
        return merge_and_save(&outcome.groups, out_path, &ids);
    }

    if outcome.groups.is_empty() {
        warn!("Nothing playable found");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_group(group: &Group) {
    println!("{} ({} entries)", group.description(), group.len());
    for resource in group.resources() {
        let length = match resource.length_ms() {
            ms if ms < 0 => "?".to_string(),
            ms => format!("{}s", (ms + 500) / 1000),
        };
        println!(
            "  [{}] {}  <{}>",
            length,
            resource.description(),
            resource.resource_name().unwrap_or("-")
        );
    }
}

/// Merges every resolved resource into one literal group and writes it as
/// PLS. A merge with zero named resources is a failure, not an empty file.
fn merge_and_save(groups: &[Group], out_path: &PathBuf, ids: &IdAllocator) -> ExitCode {
    let mut merged = Group::new(SourceKind::Literal, ids);
    for group in groups {
        for resource in group.resources() {
            merged.push(resource.clone());
        }
    }
    merged.set_description("AVList merged playlist");

    match merged.save_to_path(out_path, true) {
        Ok(written) => {
            info!("Wrote {} entries to {}", written, out_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Cannot save {}: {}", out_path.display(), e);
            ExitCode::FAILURE
        }
    }
}
