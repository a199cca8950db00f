//! cpmfs CLI - inspect and edit the directory of a CP/M disk image.
//!
//! Usage:
//!   cpmfs [--trace] [--json] <IMAGE> <COMMAND>
//!
//! Examples:
//!   cpmfs disk.img format              # Write an empty, formatted image
//!   cpmfs disk.img dir                 # List files and sizes
//!   cpmfs disk.img free                # Show the free block map
//!   cpmfs disk.img rm HELLO.COM        # Delete a file
//!   cpmfs disk.img mv OLD.TXT NEW.TXT  # Rename a file
//!   cpmfs disk.img shell               # Interactive prompt

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record};

use cpmfs_core::{CpmFs, FsError, MemoryDisk};

/// CP/M disk image directory tool
#[derive(Parser, Debug)]
#[command(name = "cpmfs")]
#[command(about = "List, delete and rename files on a CP/M disk image")]
struct Args {
    /// Disk image file
    image: PathBuf,

    /// Enable directory operation tracing
    #[arg(short, long)]
    trace: bool,

    /// Print listings and block maps as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the directory
    Dir,
    /// Show the free block map
    Free,
    /// Delete a file
    Rm { name: String },
    /// Rename a file
    Mv { old: String, new: String },
    /// Write a freshly formatted image
    Format,
    /// Interactive shell
    Shell,
}

/// Stderr logger switched on by `--trace`.
struct TraceLogger;

impl Log for TraceLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("[DIR] {}", record.args());
    }

    fn flush(&self) {}
}

static LOGGER: TraceLogger = TraceLogger;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Output settings shared by one-shot commands and the shell.
struct Output {
    json: bool,
}

impl Output {
    fn dir(&self, fs: &CpmFs<MemoryDisk>, w: &mut impl Write) -> CliResult<()> {
        let entries = fs.dir()?;
        if self.json {
            writeln!(w, "{}", serde_json::to_string_pretty(&entries)?)?;
        } else {
            writeln!(w, "DIRECTORY LISTING")?;
            for entry in entries {
                writeln!(w, "{}", entry)?;
            }
        }
        Ok(())
    }

    fn free(&self, fs: &CpmFs<MemoryDisk>, w: &mut impl Write) -> CliResult<()> {
        if self.json {
            let snapshot = fs.free_list().snapshot();
            writeln!(w, "{}", serde_json::to_string_pretty(&snapshot)?)?;
        } else {
            write!(w, "{}", fs.free_list())?;
        }
        Ok(())
    }
}

fn open(path: &Path) -> CliResult<CpmFs<MemoryDisk>> {
    Ok(CpmFs::new(MemoryDisk::load_image(path)?)?)
}

fn save(fs: &CpmFs<MemoryDisk>, path: &Path) -> CliResult<()> {
    fs.device().save_image(path)?;
    Ok(())
}

fn run(args: Args) -> CliResult<()> {
    let out = Output { json: args.json };
    let mut stdout = io::stdout();

    match args.command {
        Command::Format => {
            MemoryDisk::formatted().save_image(&args.image)?;
            eprintln!("Formatted {}", args.image.display());
        }
        Command::Dir => out.dir(&open(&args.image)?, &mut stdout)?,
        Command::Free => out.free(&open(&args.image)?, &mut stdout)?,
        Command::Rm { name } => {
            let mut fs = open(&args.image)?;
            fs.delete(&name)?;
            save(&fs, &args.image)?;
        }
        Command::Mv { old, new } => {
            let mut fs = open(&args.image)?;
            fs.rename(&old, &new)?;
            save(&fs, &args.image)?;
        }
        Command::Shell => {
            let mut fs = open(&args.image)?;
            shell(&mut fs, &args.image, &out, io::stdin().lock(), &mut stdout)?;
        }
    }

    Ok(())
}

const HELP: &str = "\
Commands:
  dir             list files
  free            show free block map
  rm NAME         delete a file
  mv OLD NEW      rename a file
  save            write changes to the image
  quit | exit     save and leave";

/// Run commands read from `input` until EOF or `quit`, saving pending
/// changes to `image` on the way out.
fn shell(
    fs: &mut CpmFs<MemoryDisk>,
    image: &Path,
    out: &Output,
    mut input: impl BufRead,
    w: &mut impl Write,
) -> CliResult<()> {
    let mut dirty = false;

    loop {
        write!(w, "cpmfs> ")?;
        w.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();

        let result = match words.as_slice() {
            [] => Ok(()),
            ["dir"] => out.dir(fs, w),
            ["free"] => out.free(fs, w),
            ["rm", name] => fs.delete(name).map_err(Into::into).map(|_| dirty = true),
            ["mv", old, new] => fs.rename(old, new).map_err(Into::into).map(|_| dirty = true),
            ["save"] => save(fs, image).map(|_| dirty = false),
            ["help"] => writeln!(w, "{}", HELP).map_err(Into::into),
            ["quit"] | ["exit"] => break,
            _ => writeln!(w, "Unknown command (try help)").map_err(Into::into),
        };

        // Expected failures are reported and the shell keeps going
        if let Err(e) = result {
            match e.downcast_ref::<FsError>() {
                Some(fs_err) if fs_err.is_recoverable() => writeln!(w, "{}", fs_err)?,
                _ => return Err(e),
            }
        }
    }

    if dirty {
        save(fs, image)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.trace && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
