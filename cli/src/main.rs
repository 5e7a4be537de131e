#![allow(clippy::print_stderr, clippy::print_stdout)]

use std::{
    io::{IsTerminal as _, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, error::ErrorKind};
use env_logger::Env;
use gentree_core::{
    Progress, Summary,
    config::{Config, DEFAULT_MAX_LINE_LEN, DirectoryFailurePolicy, NonAsciiPolicy},
    encoding::Encoding,
    fs::LocalFileSystem,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor as _};

const BANNER: &str = "gentree
    Created by Mark Sowden (https://oldtimes-software.com)
----------------------------------------------------------
";

const USAGE: &str = "Usage: gentree <file>";

fn main() -> ExitCode {
    env_logger::init_from_env(Env::new().filter("GENTREE_LOG"));
    println!("{BANNER}");
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage(&err),
    };
    if run(&cli).is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// A wrong argument count is not an error, only print what to do instead
fn usage(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
        }
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument => {
            println!("{USAGE}");
        }
        _ => {
            let _ = err.print();
            println!("{USAGE}");
        }
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<(), ()> {
    let config = cli.config();
    log::debug!("{config:?}");
    let color = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color);
    let summary = gentree_core::generate(&LocalFileSystem, &config, &cli.file, |progress| {
        let _ = report(&mut stdout, &cli.file, &progress);
    })
    .map_err(|err| match err {
        gentree_core::Error::Open { .. } => {
            println!("Failed to open \"{}\"!", cli.file.display());
            log::error!("{err}");
        }
        gentree_core::Error::Decode(err) => {
            println!("Failed to decode \"{}\": {err}", cli.file.display());
        }
    })?;
    print_summary(&summary);
    Ok(())
}

fn report(
    stdout: &mut StandardStream,
    input: &Path,
    progress: &Progress<'_>,
) -> std::io::Result<()> {
    match progress {
        Progress::Opened { encoding } => {
            writeln!(
                stdout,
                "Opened \"{}\" - proceeding to generate tree",
                input.display()
            )?;
            if *encoding == Encoding::Utf16Le {
                writeln!(stdout, "File is encoded as UTF-16")?;
            }
        }
        Progress::LineRejected { err } => {
            status(stdout, &err.display_path(), Color::Red, "FAILED")?;
            eprintln!("    {err}");
        }
        Progress::DirectoryFailed { err, .. } => {
            writeln!(
                stdout,
                "Failed to create directory, \"{}\"",
                err.path.display()
            )?;
        }
        Progress::Done { path } => status(stdout, path, Color::Green, "DONE")?,
        Progress::Failed { path, err } => {
            status(stdout, path, Color::Red, "FAILED")?;
            eprintln!("    {err}");
        }
    }
    stdout.flush()
}

fn status(
    stdout: &mut StandardStream,
    path: &str,
    color: Color,
    label: &str,
) -> std::io::Result<()> {
    write!(stdout, "\"{path}\": ")?;
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stdout, "{label}")?;
    stdout.reset()?;
    writeln!(stdout)
}

fn print_summary(summary: &Summary) {
    let Summary {
        written,
        directories,
        failed,
        skipped,
    } = summary;
    println!();
    println!(
        "Wrote {written} files and {directories} directories, {failed} failed, {skipped} skipped"
    );
}

#[derive(Debug, Parser)]
#[command(version, about = "Generate a tree of stub files from a listing of paths")]
#[command(override_usage = "gentree <file>")]
struct Cli {
    /// Listing with one path per line, UTF-8 or UTF-16 with a BOM
    file: PathBuf,
    /// Directory the tree is generated in
    #[arg(long, env = "GENTREE_ROOT", default_value = ".")]
    root: PathBuf,
    /// Longest accepted line in bytes
    #[arg(long, env = "GENTREE_MAX_LINE_LEN", default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
    /// Drop non-ASCII bytes instead of reading lines as UTF-8
    #[arg(long)]
    strip_non_ascii: bool,
    /// Still write the stub when its directories could not be created
    #[arg(long)]
    write_after_dir_failure: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new().with_root(&self.root);
        config.max_line_len = self.max_line_len;
        if self.strip_non_ascii {
            config.non_ascii = NonAsciiPolicy::Strip;
        }
        if self.write_after_dir_failure {
            config.on_directory_failure = DirectoryFailurePolicy::AttemptFile;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::Cli;

    #[test]
    fn parse_flags() {
        let cli = Cli::try_parse_from([
            "gentree",
            "listing.txt",
            "--root",
            "out",
            "--max-line-len",
            "260",
            "--strip-non-ascii",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.root, std::path::Path::new("out"));
        assert_eq!(config.max_line_len, 260);
        assert_eq!(config.non_ascii, gentree_core::config::NonAsciiPolicy::Strip);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory as _;
        Cli::command().debug_assert();
    }
}
