use artistore::configuration::{create_config, ConfigFolder};
use artistore::startup::{parse_field_value, run, Task};
use clap::{Arg, ArgMatches, Command};
use log::warn;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli().get_matches();

    match args.subcommand() {
        Some(("config", _)) => {
            println!("\x1b[1m\x1b[34mConfiguring artistore...\x1b[0m");
            create_config(&ConfigFolder::new()?)
        }
        Some((name, sub_args)) => match task_from(name, sub_args) {
            Some(task) => {
                let cfg_folder = ConfigFolder::new().ok();
                if cfg_folder.is_none() {
                    warn!("HOME is not set, using the default configuration");
                }
                run(cfg_folder.as_ref(), task)
            }
            None => {
                print_usage();
                Ok(())
            }
        },
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn cli() -> Command {
    Command::new("artistore")
        .about("🎵 Keep track of your artists and find your audio files 🎵")
        .subcommand(
            Command::new("config").about("🛠️ Create or update configuration file for artistore"),
        )
        .subcommand(
            Command::new("add")
                .about("➕ Add an artist")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("alternative").num_args(0..)),
        )
        .subcommand(
            Command::new("find")
                .about("🔎 Show the artist with this exact name")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("list").about("📜 Show every artist"))
        .subcommand(
            Command::new("update")
                .about("✏️ Set a field of an artist (value is read as JSON when possible)")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("field").required(true))
                .arg(Arg::new("value").required(true)),
        )
        .subcommand(
            Command::new("rename")
                .about("🏷️ Rename an artist")
                .arg(Arg::new("old").required(true))
                .arg(Arg::new("new").required(true)),
        )
        .subcommand(Command::new("truncate").about("🧹 Remove every artist"))
        .subcommand(Command::new("delete").about("🗑️ Delete the store file"))
        .subcommand(
            Command::new("scan")
                .about("📂 List audio files or folders of the library")
                .subcommand(
                    Command::new("files")
                        .arg(Arg::new("ext").long("ext"))
                        .arg(Arg::new("root").long("root")),
                )
                .subcommand(Command::new("dirs").arg(Arg::new("root").long("root"))),
        )
        .subcommand(Command::new("demo").about("🎬 Run every store operation once"))
}

fn task_from(name: &str, args: &ArgMatches) -> Option<Task> {
    let value = |id: &str| args.get_one::<String>(id).cloned();

    let task = match name {
        "add" => Task::Add {
            name: value("name")?,
            alternative_names: args
                .get_many::<String>("alternative")
                .map(|names| names.cloned().collect())
                .unwrap_or_default(),
        },
        "find" => Task::Find {
            name: value("name")?,
        },
        "list" => Task::List,
        "update" => Task::Update {
            name: value("name")?,
            field: value("field")?,
            value: parse_field_value(&value("value")?),
        },
        "rename" => Task::Rename {
            old_name: value("old")?,
            new_name: value("new")?,
        },
        "truncate" => Task::Truncate,
        "delete" => Task::Delete,
        "demo" => Task::Demo,
        "scan" => match args.subcommand() {
            Some(("files", scan_args)) => Task::ScanFiles {
                root: scan_args.get_one::<String>("root").cloned(),
                extension: scan_args.get_one::<String>("ext").cloned(),
            },
            Some(("dirs", scan_args)) => Task::ScanDirs {
                root: scan_args.get_one::<String>("root").cloned(),
            },
            _ => return None,
        },
        _ => return None,
    };

    Some(task)
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid command!\x1b[0m\n");
    println!("📖 Available Commands:");
    println!("  \x1b[1m\x1b[32martistore add <name> [alt...]\x1b[0m   - ➕ Add an artist");
    println!("  \x1b[1m\x1b[32martistore list\x1b[0m                   - 📜 Show every artist");
    println!("  \x1b[1m\x1b[32martistore scan files|dirs\x1b[0m        - 📂 List library content");
    println!("  \x1b[1m\x1b[32martistore config\x1b[0m                 - 🛠️  Create configuration file");
    println!("\x1b[33mRun 'artistore --help' for every command.\x1b[0m\n");
}
