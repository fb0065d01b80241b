use std::path::PathBuf;

use anyhow::Result;
use calcut_core::CalcutResult;
use calcut_core::config::CalcutConfig;
use calcut_core::ics::{Event, parse};
use calcut_core::sink::{DirectorySink, UnitSink, write_units};
use calcut_core::split::{ModeKind, OversizedEvent, SplitMode, SplitOptions, SplitUnit, split};
use owo_colors::OwoColorize;

use super::read_input;
use crate::render::{self, Manifest};

pub struct SplitArgs {
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub max_size: Option<String>,
    pub mode: Option<ModeKind>,
    pub json: bool,
}

/// Flags merged with config file values, before validation.
#[derive(Debug, PartialEq)]
pub struct MergedSettings {
    pub mode: Option<ModeKind>,
    pub max_size: Option<String>,
    pub prefix: Option<String>,
    pub output_dir: PathBuf,
}

impl SplitArgs {
    /// Fill unset flags from `config`.
    ///
    /// A size given on the command line overrides a mode from the config file.
    pub fn merge(&self, config: &CalcutConfig) -> MergedSettings {
        let mode = self.mode.or(if self.max_size.is_some() {
            None
        } else {
            config.mode
        });

        MergedSettings {
            mode,
            max_size: self.max_size.clone().or_else(|| config.max_size.clone()),
            prefix: self.prefix.clone().or_else(|| config.prefix.clone()),
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| config.expanded_output_dir()),
        }
    }
}

pub fn run(args: SplitArgs) -> Result<()> {
    let config = CalcutConfig::load()?;
    run_with_config(args, &config)
}

fn run_with_config(args: SplitArgs, config: &CalcutConfig) -> Result<()> {
    let MergedSettings {
        mode,
        max_size,
        prefix,
        output_dir,
    } = args.merge(config);

    let options = SplitOptions::resolve(mode, max_size.as_deref(), prefix.as_deref())?;

    let content = read_input(&args.input)?;
    let calendar = parse(&content);
    let info = calendar.info(&content);

    if calendar.events.is_empty() {
        if args.json {
            println!("{}", Manifest::empty().to_json()?);
        } else {
            eprintln!("{}", "No events found, nothing to split".dimmed());
        }
        return Ok(());
    }

    let outcome = split(&calendar, &options);
    let mut sink = DirectorySink::create(&output_dir)?;

    if args.json {
        write_units(&outcome.units, &mut sink)?;
        println!("{}", Manifest::new(&outcome, sink.dir()).to_json()?);
        return Ok(());
    }

    println!();
    println!("{}", render::split_header(&args.input, &info, &output_dir, &options));
    println!();

    let mut progress = ProgressSink {
        inner: sink,
        mode: options.mode,
        events: &calendar.events,
        oversized: &outcome.oversized,
        total: outcome.units.len(),
        count: 0,
    };
    write_units(&outcome.units, &mut progress)?;

    println!();
    println!(
        "{}",
        render::done(progress.inner.written().len(), progress.inner.dir())
    );
    println!();

    Ok(())
}

/// Prints a progress line after each unit the wrapped sink accepts.
struct ProgressSink<'a, S> {
    inner: S,
    mode: SplitMode,
    events: &'a [Event],
    oversized: &'a [OversizedEvent],
    total: usize,
    count: usize,
}

impl<S: UnitSink> UnitSink for ProgressSink<'_, S> {
    fn write(&mut self, unit: &SplitUnit) -> CalcutResult<()> {
        if let Some(warning) = self.oversized.iter().find(|o| o.filename == unit.filename) {
            println!("{}", render::oversized(warning));
        }

        self.inner.write(unit)?;
        self.count += 1;

        match self.mode {
            SplitMode::PerEvent => {
                let summary = self
                    .events
                    .get(self.count - 1)
                    .map(|e| e.summary.as_str())
                    .unwrap_or_default();
                println!("{}", render::event_unit(self.count, self.total, unit, summary));
            }
            SplitMode::BySize { .. } => {
                println!("{}", render::chunk_unit(self.count, unit));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(max_size: Option<&str>, mode: Option<ModeKind>) -> SplitArgs {
        SplitArgs {
            input: PathBuf::from("calendar.ics"),
            output_dir: None,
            prefix: None,
            max_size: max_size.map(str::to_string),
            mode,
            json: false,
        }
    }

    fn config_from(toml: &str) -> CalcutConfig {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, toml).unwrap();
        CalcutConfig::load_from(&path).unwrap()
    }

    fn resolved(settings: &MergedSettings) -> SplitMode {
        SplitOptions::resolve(
            settings.mode,
            settings.max_size.as_deref(),
            settings.prefix.as_deref(),
        )
        .unwrap()
        .mode
    }

    #[test]
    fn test_cli_size_overrides_config_mode() {
        let config = config_from("mode = \"per-event\"\n");

        let settings = args(Some("1M"), None).merge(&config);

        assert_eq!(settings.mode, None);
        assert_eq!(resolved(&settings), SplitMode::BySize { max_bytes: 1_048_576 });
    }

    #[test]
    fn test_cli_mode_overrides_config_size() {
        let config = config_from("max_size = \"1M\"\n");

        let settings = args(None, Some(ModeKind::PerEvent)).merge(&config);

        assert_eq!(settings.max_size.as_deref(), Some("1M"));
        assert_eq!(resolved(&settings), SplitMode::PerEvent);
    }

    #[test]
    fn test_unset_flags_fall_back_to_config() {
        let config = config_from(
            "output_dir = \"/tmp/cal\"\nprefix = \"work\"\nmax_size = \"512K\"\nmode = \"by-size\"\n",
        );

        let settings = args(None, None).merge(&config);

        assert_eq!(
            settings,
            MergedSettings {
                mode: Some(ModeKind::BySize),
                max_size: Some("512K".to_string()),
                prefix: Some("work".to_string()),
                output_dir: PathBuf::from("/tmp/cal"),
            }
        );
    }

    #[test]
    fn test_flags_take_precedence_over_config() {
        let config = config_from("output_dir = \"/tmp/cal\"\nprefix = \"work\"\n");
        let mut cli = args(None, None);
        cli.output_dir = Some(PathBuf::from("out"));
        cli.prefix = Some("home".to_string());

        let settings = cli.merge(&config);

        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.prefix.as_deref(), Some("home"));
    }

    #[test]
    fn test_zero_events_leaves_output_dir_uncreated() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("empty.ics");
        std::fs::write(&input, "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n").unwrap();
        let out = tmp.path().join("out");

        let mut cli = args(None, None);
        cli.input = input;
        cli.output_dir = Some(out.clone());
        run_with_config(cli, &CalcutConfig::default()).unwrap();

        assert!(!out.exists());
    }

    #[test]
    fn test_writes_units_to_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("two.ics");
        std::fs::write(
            &input,
            "BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\nUID:a\nSUMMARY:A\nEND:VEVENT\n\
BEGIN:VEVENT\nUID:b\nEND:VEVENT\nEND:VCALENDAR\n",
        )
        .unwrap();
        let out = tmp.path().join("out");

        let mut cli = args(None, None);
        cli.input = input;
        cli.output_dir = Some(out.clone());
        cli.json = true;
        run_with_config(cli, &CalcutConfig::default()).unwrap();

        assert!(out.join("001_A.ics").exists());
        assert!(out.join("002_event.ics").exists());
    }

    #[test]
    fn test_malformed_size_fails_before_reading_input() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cli = args(Some("abc"), None);
        cli.input = tmp.path().join("missing.ics");
        cli.output_dir = Some(tmp.path().join("out"));

        let err = run_with_config(cli, &CalcutConfig::default()).unwrap_err();

        assert!(err.to_string().contains("abc"));
        assert!(!tmp.path().join("out").exists());
    }
}
