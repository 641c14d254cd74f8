//! Command-line front end for the mood journal core.
//!
//! # Responsibility
//! - Wire the storage adapter, store and codecs together for local use.
//! - Keep output deterministic: one line per record, stable field order.
//!
//! # Invariants
//! - User errors (bad arguments, malformed imports) exit with code 1 and a
//!   single `error:` line; they never panic.
//! - Every mutation is written through before the process exits.

use chrono::{SecondsFormat, Utc};
use moodlog_core::db::open_db;
use moodlog_core::{
    average_level, compute_filtered, default_log_level, export_csv, export_file_name, export_json,
    histogram, init_logging, mood_label, parse_csv, parse_json, sort_entries, CandidateEntry,
    EntryFilter, ExportFormat, MoodStore, SortDirection, SortKey, SqliteStorage,
};
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

const EXPORT_BASENAME: &str = "mood-export";

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var("MOODLOG_LOG_DIR") {
        if let Err(message) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    if args.len() == 1 && args[0] == "version" {
        println!("moodlog_core version={}", moodlog_core::core_version());
        return Ok(());
    }

    let [db_path, command, rest @ ..] = args else {
        return Err(usage());
    };

    let conn =
        open_db(db_path).map_err(|err| format!("cannot open database `{db_path}`: {err}"))?;
    let mut store = MoodStore::open(SqliteStorage::new(conn));

    match command.as_str() {
        "add" => cmd_add(&mut store, rest),
        "list" => cmd_list(&store, rest),
        "stats" => cmd_stats(&store),
        "delete" => cmd_delete(&mut store, rest),
        "export" => cmd_export(&store, rest),
        "import" => cmd_import(&mut store, rest),
        other => Err(format!("unknown command `{other}`\n{}", usage())),
    }
}

fn cmd_add(store: &mut MoodStore<SqliteStorage>, rest: &[String]) -> Result<(), String> {
    let [level, notes @ ..] = rest else {
        return Err("add requires a mood level (1-5)".to_string());
    };
    let level: u8 = level
        .parse()
        .map_err(|_| format!("invalid mood level `{level}`"))?;

    let entry = store
        .add(level, notes.join(" "))
        .map_err(|err| err.to_string())?;
    println!(
        "added {} level={} label={}",
        entry.id,
        entry.level,
        mood_label(entry.level)
    );
    Ok(())
}

fn cmd_list(store: &MoodStore<SqliteStorage>, rest: &[String]) -> Result<(), String> {
    let filter = EntryFilter {
        search: rest.join(" "),
        ..EntryFilter::default()
    };
    let mut entries = compute_filtered(store.entries(), &filter);
    sort_entries(&mut entries, SortKey::Date, SortDirection::Descending);

    for entry in &entries {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.level,
            mood_label(entry.level),
            entry.id,
            entry.notes
        );
    }
    println!("total={}", entries.len());
    Ok(())
}

fn cmd_stats(store: &MoodStore<SqliteStorage>) -> Result<(), String> {
    for stat in histogram(store.entries()) {
        println!(
            "level={} label={} count={} percentage={}",
            stat.level, stat.label, stat.count, stat.percentage
        );
    }
    println!(
        "entries={} average={:.1}",
        store.entry_count(),
        average_level(store.entries())
    );
    Ok(())
}

fn cmd_delete(store: &mut MoodStore<SqliteStorage>, rest: &[String]) -> Result<(), String> {
    let [id] = rest else {
        return Err("delete requires an entry id".to_string());
    };
    if store.delete_by_id(id) {
        println!("deleted {id}");
    } else {
        println!("no entry with id {id}");
    }
    Ok(())
}

fn cmd_export(store: &MoodStore<SqliteStorage>, rest: &[String]) -> Result<(), String> {
    let format = match rest.first().map(String::as_str) {
        Some("json") => ExportFormat::Json,
        Some("csv") => ExportFormat::Csv,
        other => {
            return Err(format!(
                "export requires a format of json or csv, got `{}`",
                other.unwrap_or("")
            ))
        }
    };

    let text = match format {
        ExportFormat::Json => export_json(store.entries()).map_err(|err| err.to_string())?,
        ExportFormat::Csv => export_csv(store.entries()),
    };

    let path = rest
        .get(1)
        .cloned()
        .unwrap_or_else(|| export_file_name(EXPORT_BASENAME, format, Utc::now().date_naive()));
    fs::write(&path, text).map_err(|err| format!("cannot write `{path}`: {err}"))?;
    println!("exported {} entries to {path}", store.entry_count());
    Ok(())
}

fn cmd_import(store: &mut MoodStore<SqliteStorage>, rest: &[String]) -> Result<(), String> {
    let [path] = rest else {
        return Err("import requires a file path".to_string());
    };

    let candidates = parse_import_file(path)?;
    let outcome = store.import_validated(candidates);
    println!(
        "imported accepted={} rejected={}",
        outcome.accepted, outcome.rejected
    );
    Ok(())
}

fn parse_import_file(path: &str) -> Result<Vec<CandidateEntry>, String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let format = match extension.as_deref() {
        Some("json") => ExportFormat::Json,
        Some("csv") => ExportFormat::Csv,
        _ => {
            return Err(format!(
                "unsupported import format for `{path}` (expected .json or .csv)"
            ))
        }
    };

    let text = fs::read_to_string(path).map_err(|err| format!("cannot read `{path}`: {err}"))?;
    match format {
        ExportFormat::Json => parse_json(&text),
        ExportFormat::Csv => parse_csv(&text),
    }
    .map_err(|err| err.to_string())
}

fn usage() -> String {
    "usage: moodlog <db-path> <command>\n\
     commands:\n\
       version\n\
       add <level 1-5> [notes...]\n\
       list [search]\n\
       stats\n\
       delete <id>\n\
       export <json|csv> [path]\n\
       import <path>"
        .to_string()
}
