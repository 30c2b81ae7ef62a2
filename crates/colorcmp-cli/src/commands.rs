use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use colorcmp::{
    should_use_color, CompareOptions, Comparer, Reporter, ReporterConfig, TerminalStream,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, ColorArg};

/// Exit status when the documents differ.
pub const EXIT_DIFFERENT: u8 = 1;
/// Exit status when the comparison could not run (unreadable or invalid input).
pub const EXIT_TROUBLE: u8 = 2;

/// Result of comparing the two documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Different,
}

/// Process exit status for a finished run, following `diff`: 0 when equal,
/// 1 when different, 2 on error.
pub fn exit_status(result: &anyhow::Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Equal) => 0,
        Ok(Outcome::Different) => EXIT_DIFFERENT,
        Err(_) => EXIT_TROUBLE,
    }
}

/// Whether messages written to `stream` (the summary and errors on stderr)
/// should be colored.
pub fn summary_colors<S: TerminalStream + ?Sized>(color: ColorArg, stream: &S) -> bool {
    match color {
        ColorArg::Always => true,
        ColorArg::Never => false,
        ColorArg::Auto => should_use_color(stream),
    }
}

pub fn run_command(cli: &Cli) -> anyhow::Result<Outcome> {
    let stdout = io::stdout();
    let (outcome, reporter) = diff_files(cli, &stdout)?;

    let mut out = stdout.lock();
    out.write_all(reporter.finish().as_bytes())?;
    out.flush()?;

    match outcome {
        Outcome::Equal => eprintln!("{} documents are equal", "✓".green().bold()),
        Outcome::Different => eprintln!(
            "{} {} difference(s) between {} and {}",
            "✗".red().bold(),
            reporter.len().to_string().bold(),
            cli.left.display(),
            cli.right.display(),
        ),
    }
    Ok(outcome)
}

/// Compare the two documents named by `cli`, detecting color against `stream`.
pub fn diff_files<S: TerminalStream + ?Sized>(
    cli: &Cli,
    stream: &S,
) -> anyhow::Result<(Outcome, Reporter)> {
    let left = read_json(&cli.left)?;
    let right = read_json(&cli.right)?;

    let config = ReporterConfig {
        color: cli.color.into(),
        context_lines: cli.context,
    };
    let mut reporter = Reporter::with_config(&config, stream);
    let comparer = Comparer::new(CompareOptions {
        max_depth: cli.max_depth,
    });

    let equal = comparer.compare(&left, &right, &mut reporter);
    debug!(equal, entries = reporter.len(), "comparison finished");

    let outcome = if equal {
        Outcome::Equal
    } else {
        Outcome::Different
    };
    Ok((outcome, reporter))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {} as JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("colorcmp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn equal_documents() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.json", r#"{"x": [1, 2]}"#);
        let b = write(&dir, "b.json", r#"{ "x": [1,2] }"#);

        let cli = cli(&[a.to_str().unwrap(), b.to_str().unwrap(), "--color", "never"]);
        let (outcome, reporter) = diff_files(&cli, &Vec::<u8>::new()).unwrap();
        assert_eq!(outcome, Outcome::Equal);
        assert_eq!(reporter.finish(), "");
    }

    #[test]
    fn different_documents_report_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.json", r#"{"Name": "Alice", "Age": 30}"#);
        let b = write(&dir, "b.json", r#"{"Name": "Alice", "Age": 31}"#);

        let cli = cli(&[a.to_str().unwrap(), b.to_str().unwrap(), "--color=never"]);
        let (outcome, reporter) = diff_files(&cli, &Vec::<u8>::new()).unwrap();
        assert_eq!(outcome, Outcome::Different);
        assert_eq!(reporter.finish(), ".Age: -30 +31\n");
    }

    #[test]
    fn always_color_and_max_depth_flags() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.json", r#"{"s": {"p": 1, "q": 2}}"#);
        let b = write(&dir, "b.json", r#"{"s": {"p": 1, "q": 3}}"#);

        let cli = cli(&[
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--color",
            "always",
            "--max-depth",
            "1",
        ]);
        let (_, reporter) = diff_files(&cli, &Vec::<u8>::new()).unwrap();
        assert!(reporter.colors());
        assert_eq!(
            reporter.finish(),
            ".s:\n {\n \t\"p\": 1,\n\x1b[31m-\t\"q\": 2\x1b[0m\n\x1b[32m+\t\"q\": 3\x1b[0m\n }\n"
        );
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.json", "{not json");
        let b = write(&dir, "b.json", "{}");

        let cli = cli(&[a.to_str().unwrap(), b.to_str().unwrap()]);
        let err = diff_files(&cli, &Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = cli(&["/nonexistent/a.json", "/nonexistent/b.json"]);
        let err = diff_files(&cli, &Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    struct Tty;

    impl TerminalStream for Tty {
        fn terminal(&self) -> Option<bool> {
            Some(true)
        }
    }

    #[test]
    fn exit_status_separates_differences_from_errors() {
        assert_eq!(exit_status(&Ok(Outcome::Equal)), 0);
        assert_eq!(exit_status(&Ok(Outcome::Different)), 1);

        let cli = cli(&["/nonexistent/a.json", "/nonexistent/b.json"]);
        let result = diff_files(&cli, &Vec::<u8>::new()).map(|(outcome, _)| outcome);
        assert_eq!(exit_status(&result), 2);
    }

    #[test]
    fn summary_color_follows_flag_and_given_stream() {
        assert!(summary_colors(ColorArg::Always, &Vec::<u8>::new()));
        assert!(!summary_colors(ColorArg::Never, &Tty));
        assert_eq!(summary_colors(ColorArg::Auto, &Tty), should_use_color(&Tty));
        let stderr = io::stderr();
        assert_eq!(
            summary_colors(ColorArg::Auto, &stderr),
            should_use_color(&stderr)
        );
    }

    #[test]
    fn context_flag_defaults_to_three() {
        let cli = cli(&["a.json", "b.json"]);
        assert_eq!(cli.context, 3);
        assert_eq!(cli.color, ColorArg::Auto);
        assert_eq!(cli.max_depth, None);
    }
}
