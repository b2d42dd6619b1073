use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use soundex::{soundex_code, Config, OutputFormat, SoundexCode};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "soundex")]
#[command(about = "Encode words with the American Soundex algorithm", long_about = None)]
struct Args {
    /// Words to encode (reads one word per line from stdin if omitted)
    words: Vec<String>,

    /// Emit one JSON object per word
    #[arg(long)]
    json: bool,

    /// Skip words that cannot be encoded instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Directory containing soundex.toml and .env
    #[arg(long, default_value = ".")]
    config: PathBuf,
}

impl Args {
    /// Command-line flags win over the file and environment.
    fn apply_to(&self, config: &mut Config) {
        if self.json {
            config.format = OutputFormat::Json;
        }
        if self.skip_invalid {
            config.skip_invalid = true;
        }
    }
}

#[derive(Serialize)]
struct Record<'a> {
    word: &'a str,
    code: SoundexCode,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, rejected) = Config::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    args.apply_to(&mut config);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    for r in &rejected {
        tracing::warn!("{}", r);
    }
    tracing::info!(format = ?config.format, skip_invalid = config.skip_invalid, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.words.is_empty() {
        write_lines(&mut out, &config, io::stdin().lock())?;
    } else {
        for word in &args.words {
            write_word(&mut out, &config, word)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Encode one word per line; surrounding whitespace is trimmed and blank
/// lines are skipped.
fn write_lines(
    out: &mut impl Write,
    config: &Config,
    input: impl BufRead,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("reading stdin")?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        write_word(out, config, word)?;
    }
    Ok(())
}

fn write_word(out: &mut impl Write, config: &Config, word: &str) -> anyhow::Result<()> {
    let code = match soundex_code(word) {
        Ok(code) => code,
        Err(e) if config.skip_invalid => {
            tracing::warn!("skipping {:?}: {}", word, e);
            return Ok(());
        }
        Err(e) => return Err(e).with_context(|| format!("encoding {:?}", word)),
    };

    match config.format {
        OutputFormat::Plain => writeln!(out, "{}", code)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &Record { word, code })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use soundex::SoundexError;

    fn config(format: OutputFormat, skip_invalid: bool) -> Config {
        Config {
            format,
            skip_invalid,
            ..Config::default()
        }
    }

    fn run_lines(config: &Config, input: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        write_lines(&mut out, config, input.as_bytes())?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plain_output() {
        let mut out = Vec::new();
        write_word(&mut out, &config(OutputFormat::Plain, false), "Robert").unwrap();
        write_word(&mut out, &config(OutputFormat::Plain, false), "Jbob").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "R163\nJ110\n");
    }

    #[test]
    fn test_json_record_shape() {
        let mut out = Vec::new();
        write_word(&mut out, &config(OutputFormat::Json, false), "Robert").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let record: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(record, json!({"word": "Robert", "code": "R163"}));
    }

    #[test]
    fn test_invalid_word_is_an_error_without_skip() {
        let mut out = Vec::new();
        let err = write_word(&mut out, &config(OutputFormat::Plain, false), "#x").unwrap_err();

        assert!(out.is_empty());
        assert!(err.to_string().contains("#x"));
        assert!(matches!(
            err.downcast_ref::<SoundexError>(),
            Some(SoundexError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_word_is_skipped() {
        let mut out = Vec::new();
        write_word(&mut out, &config(OutputFormat::Plain, true), "#x").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_lines_are_trimmed_and_blanks_skipped() {
        let input = "  Robert \n\n\t\nRupert\n";
        let text = run_lines(&config(OutputFormat::Plain, false), input).unwrap();
        assert_eq!(text, "R163\nR163\n");
    }

    #[test]
    fn test_lines_with_skip_and_json() {
        let text = run_lines(&config(OutputFormat::Json, true), "Robert\n\n#x\n").unwrap();
        assert_eq!(text, "{\"word\":\"Robert\",\"code\":\"R163\"}\n");
    }

    #[test]
    fn test_lines_stop_at_first_invalid_word() {
        let mut out = Vec::new();
        let input = "Lee\n#x\nRobert\n".as_bytes();
        let result = write_lines(&mut out, &config(OutputFormat::Plain, false), input);
        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "L000\n");
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from(["soundex", "--json", "--skip-invalid", "Robert"]).unwrap();
        let mut config = config(OutputFormat::Plain, false);
        args.apply_to(&mut config);

        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.skip_invalid);
        assert_eq!(args.words, vec!["Robert".to_string()]);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = Args::try_parse_from(["soundex"]).unwrap();
        let mut config = config(OutputFormat::Json, true);
        args.apply_to(&mut config);

        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.skip_invalid);
        assert!(args.words.is_empty());
        assert_eq!(args.config, PathBuf::from("."));
    }
}
