// Keyintent CLI
// Replays a recorded key event stream and prints the intents it produces

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use keyintent_core::{Classifier, IntentSink, KeyEvent, ProfileSelector, Settings};

/// Keyboard shortcut intent classifier
#[derive(Parser, Debug)]
#[command(name = "keyintent")]
#[command(version)]
#[command(about = "Classify raw key events into shortcut intents", long_about = None)]
struct Args {
    /// Recorded events, one per line (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Platform profile: default, mac or auto
    #[arg(short, long, value_name = "PROFILE")]
    profile: Option<ProfileSelector>,

    /// Settings TOML file
    #[arg(short, long, value_name = "SETTINGS")]
    settings: Option<PathBuf>,

    /// Print each intent as a JSON object
    #[arg(long)]
    json: bool,

    /// Print the rule table for the selected profile and exit
    #[arg(long)]
    list_rules: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Writes intents to stdout, one per line
struct PrintSink<W: Write> {
    out: W,
    json: bool,
    error: Option<io::Error>,
}

impl<W: Write> PrintSink<W> {
    fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            error: None,
        }
    }

    fn finish(mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }
}

impl<W: Write> IntentSink for PrintSink<W> {
    fn emit(&mut self, emission: keyintent_core::Emission) {
        if self.error.is_some() {
            return;
        }
        let written = if self.json {
            serde_json::to_string(&emission)
                .map_err(io::Error::from)
                .and_then(|line| writeln!(self.out, "{}", line))
        } else {
            writeln!(self.out, "{}", emission)
        };
        if let Err(err) = written {
            self.error = Some(err);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("failed to load default settings")?,
    };
    if let Some(selector) = args.profile {
        settings.set_profile(selector);
    }
    Ok(settings)
}

fn list_rules(classifier: &Classifier) {
    println!("Rules for the {} profile:", classifier.profile());
    for (index, rule) in classifier.rules().primary().iter().enumerate() {
        println!("  {:>2}. {}", index + 1, rule);
    }
    if !classifier.rules().platform().is_empty() {
        println!("Platform rules (evaluated independently):");
        for rule in classifier.rules().platform() {
            println!("      {}", rule);
        }
    }
}

/// Feed every event line of `reader` through the classifier
fn replay<R: BufRead, S: IntentSink>(
    classifier: &mut Classifier,
    reader: R,
    sink: &mut S,
) -> Result<usize> {
    let mut emitted = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = KeyEvent::parse_line(trimmed)
            .with_context(|| format!("line {}: invalid event '{}'", number + 1, trimmed))?;
        emitted += classifier.process_into(event, sink);
    }
    Ok(emitted)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = load_settings(&args)?;
    let mut classifier = Classifier::configure(settings.profile());
    log::info!("using {} profile", classifier.profile());

    if args.list_rules {
        list_rules(&classifier);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut sink = PrintSink::new(stdout.lock(), args.json);

    let emitted = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            replay(&mut classifier, BufReader::new(file), &mut sink)?
        }
        None => replay(&mut classifier, io::stdin().lock(), &mut sink)?,
    };

    sink.finish().context("failed to write intents")?;
    log::debug!("{} intent(s) emitted", emitted);
    Ok(())
}
