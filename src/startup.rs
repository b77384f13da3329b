//! # The Command Runner
//!
//! Loads the configuration, opens the store or the scanner it points at, and
//! carries out one [`Task`]. Soft failures of the store (duplicate names,
//! missing artists) are reported on the terminal and are not errors; read and
//! write failures are.

use crate::configuration::{self, ConfigFolder, Settings};
use crate::foundation::storage::{ArtistRecord, RecordStore};
use crate::process::DirectoryScanner;
use anyhow::Context;
use serde_json::{Map, Value};
use std::path::Path;

/// One thing the user asked for on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Add {
        name: String,
        alternative_names: Vec<String>,
    },
    Find {
        name: String,
    },
    List,
    Update {
        name: String,
        field: String,
        value: Value,
    },
    Rename {
        old_name: String,
        new_name: String,
    },
    Truncate,
    Delete,
    ScanFiles {
        root: Option<String>,
        extension: Option<String>,
    },
    ScanDirs {
        root: Option<String>,
    },
    Demo,
}

/// Loads the settings and carries out `task`.
///
/// Without a config folder (no `HOME`), the built-in defaults and the
/// `ARTISTORE__*` environment variables are used.
pub fn run(cfg_folder: Option<&ConfigFolder>, task: Task) -> anyhow::Result<()> {
    let settings = match cfg_folder {
        Some(cfg_folder) => configuration::get_configuration(&cfg_folder.config_file),
        None => configuration::default_configuration(),
    }
    .context("Unable to parse configuration file")?;

    execute(&settings, task)
}

pub fn execute(settings: &Settings, task: Task) -> anyhow::Result<()> {
    match task {
        Task::Add {
            name,
            alternative_names,
        } => {
            if open_store(settings)?.add_artist(&name, alternative_names)? {
                println!("\x1b[32mAdded artist '{}'\x1b[0m", name);
            } else {
                println!("\x1b[33mArtist '{}' already exists\x1b[0m", name);
            }
        }
        Task::Find { name } => {
            let matches = open_store(settings)?.find_by_name(&name)?;
            if matches.is_empty() {
                println!("\x1b[33mNo artist named '{}'\x1b[0m", name);
            }
            print_records(&matches)?;
        }
        Task::List => print_records(&open_store(settings)?.read_all()?)?,
        Task::Update { name, field, value } => {
            let mut updates = Map::new();
            updates.insert(field.clone(), value);
            if open_store(settings)?.update_artist(&name, updates)? {
                println!("\x1b[32mUpdated '{}' of artist '{}'\x1b[0m", field, name);
            } else {
                println!("\x1b[33mDid not change artist '{}'\x1b[0m", name);
            }
        }
        Task::Rename { old_name, new_name } => {
            if open_store(settings)?.rename_artist(&old_name, &new_name)? {
                println!("\x1b[32mRenamed '{}' to '{}'\x1b[0m", old_name, new_name);
            } else {
                println!(
                    "\x1b[33mCould not rename '{}' to '{}'\x1b[0m",
                    old_name, new_name
                );
            }
        }
        Task::Truncate => {
            let store = open_store(settings)?;
            if store.truncate() {
                println!("\x1b[32mRemoved all artists\x1b[0m");
            } else {
                eprintln!("\x1b[31mCould not clear {}\x1b[0m", store.path().display());
            }
        }
        Task::Delete => {
            // Opening creates a missing store, which would make the delete a no-op.
            if !Path::new(&settings.storage.data_path).is_file() {
                println!(
                    "\x1b[33mNo store at {}\x1b[0m",
                    settings.storage.data_path
                );
                return Ok(());
            }
            let store = open_store(settings)?;
            if store.delete_store() {
                println!("\x1b[32mDeleted {}\x1b[0m", store.path().display());
            } else {
                eprintln!("\x1b[31mCould not delete {}\x1b[0m", store.path().display());
            }
        }
        Task::ScanFiles { root, extension } => {
            let extension = extension.unwrap_or_else(|| settings.library.extension.clone());
            for path in scanner_for(settings, root).list_files(&extension) {
                println!("{}", path.display());
            }
        }
        Task::ScanDirs { root } => {
            for path in scanner_for(settings, root).list_directories() {
                println!("{}", path.display());
            }
        }
        Task::Demo => {
            // Never the configured store: the demo ends by deleting its file.
            let scratch_dir = tempfile::tempdir().context("Unable to create demo folder")?;
            run_demo(&RecordStore::open(scratch_dir.path().join("data.json"))?)?;
        }
    }
    Ok(())
}

fn open_store(settings: &Settings) -> anyhow::Result<RecordStore> {
    RecordStore::open(&settings.storage.data_path)
        .with_context(|| format!("Unable to open store {}", settings.storage.data_path))
}

fn scanner_for(settings: &Settings, root: Option<String>) -> DirectoryScanner {
    DirectoryScanner::new(root.unwrap_or_else(|| settings.library.root.clone()))
}

fn print_records(records: &[ArtistRecord]) -> anyhow::Result<()> {
    if !records.is_empty() {
        println!("{}", serde_json::to_string_pretty(records)?);
    }
    Ok(())
}

/// Walks through every store operation once on a scratch store and leaves no
/// file behind.
fn run_demo(store: &RecordStore) -> anyhow::Result<()> {
    println!("\x1b[1m\x1b[34mRunning demo against {}\x1b[0m", store.path().display());

    store.add_artist("Artist Name 1", ["Alternative", "names", "of", "artist"])?;
    store.add_artist("Artist Name 2", ["Some", "other", "alternative", "names"])?;

    let mut updates = Map::new();
    updates.insert(
        "alternative_names".to_string(),
        Value::from(vec!["New", "alternative", "names"]),
    );
    if !store.update_artist("Artist Name 1", updates)? {
        println!("\x1b[33mDid not change it.\x1b[0m");
    }

    if !store.rename_artist("Artist Name 1", "Artist Name 2")? {
        println!("\x1b[33mCould not change the name.\x1b[0m");
    }

    print_records(&store.read_all()?)?;

    store.truncate();
    store.delete_store();
    println!("\x1b[32mDemo finished.\x1b[0m");
    Ok(())
}

/// Reads a command line value as JSON, falling back to a plain string.
///
/// `42`, `true` and `["a", "b"]` keep their JSON type, `Warp Records` becomes
/// a string.
pub fn parse_field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
