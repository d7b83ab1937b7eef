mod cli;
mod screens;
mod tui;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use cli::{Args, Command, JournalCommand};
use drift::completion::{GeminiClient, SLEEP_TIPS, StoryTheme};
use drift::engine::{CpalHost, NoiseEngine};
use drift::error::CompletionError;
use drift::journal::{Draft, Journal, JournalEntry};
use drift::onboarding::{self, ONBOARDING_STEPS};
use drift::store::FileStore;
use drift::DriftConfig;
use screens::{BreatheScreen, NoiseScreen, SheepScreen};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = DriftConfig::from_env();
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(seed) = args.seed {
        config.noise.seed = Some(seed);
    }
    config.validate().map_err(anyhow::Error::msg)?;

    init_logging(&config)?;
    tracing::info!(command = ?args.command, "starting drift");

    let mut store = FileStore::open(config.store_path())
        .with_context(|| format!("opening {}", config.store_path().display()))?;
    if !onboarding::seen(&store)? {
        show_onboarding();
        onboarding::mark_seen(&mut store)?;
    }

    match args.command {
        Command::Noise => tui::run(&mut NoiseScreen::new(engine(&config))),
        Command::Breathe => tui::run(&mut BreatheScreen::new(engine(&config))),
        Command::Sheep => tui::run(&mut SheepScreen::new(engine(&config))),
        Command::Journal(command) => journal(&config, Journal::load(store)?, command),
        Command::Story { theme } => story(&config, &theme),
        Command::Tips => {
            for tip in SLEEP_TIPS {
                println!("{}\n  {}\n", tip.title, tip.description);
            }
            Ok(())
        }
        Command::Render {
            seconds,
            out,
            sample_rate,
        } => render(&config, seconds, &out, sample_rate),
    }
}

/// Logs go to a file so they never land in the raw-mode terminal.
fn init_logging(config: &DriftConfig) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating {}", config.data_dir.display()))?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drift=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn show_onboarding() {
    for (i, step) in ONBOARDING_STEPS.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, ONBOARDING_STEPS.len(), step.title);
        println!("      {}\n", step.description);
    }
}

fn engine(config: &DriftConfig) -> NoiseEngine<CpalHost> {
    NoiseEngine::new(CpalHost::new(), config.noise.clone())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn print_entry(entry: &JournalEntry) {
    let created = entry.created_at.with_timezone(&Local);
    println!("{}  [{}]", entry.title, entry.id);
    println!("{}\n", created.format("%b %e, %H:%M"));
    println!("{}", entry.body);
    if let Some(note) = entry.note() {
        println!("\n  \"{}\"", note);
    }
}

fn journal(config: &DriftConfig, mut journal: Journal<FileStore>, command: JournalCommand) -> Result<()> {
    match command {
        JournalCommand::List => {
            if journal.is_empty() {
                println!("No entries yet. Empty your mind here.");
            }
            for entry in journal.list() {
                let created = entry.created_at.with_timezone(&Local);
                println!(
                    "{:>14}  {}  {}",
                    entry.id,
                    created.format("%b %e, %H:%M"),
                    entry.title
                );
            }
        }
        JournalCommand::Show { id } => {
            let entry = journal
                .get(&id)
                .with_context(|| format!("no journal entry {}", id))?;
            print_entry(entry);
        }
        JournalCommand::Write {
            id,
            title,
            body,
            soothe,
        } => {
            let mut draft = Draft::new(title, body);
            draft.id = id;

            if soothe {
                let client = GeminiClient::new(config.completion.clone());
                match runtime()?.block_on(client.soothe(&draft.body)) {
                    Ok(advice) => draft.ai_advice = Some(advice),
                    Err(CompletionError::EmptyPrompt(reason)) => println!("Not soothing: {}", reason),
                    Err(e) => return Err(e.into()),
                }
            } else if let Some(existing) = draft.id.as_deref().and_then(|id| journal.get(id)) {
                draft.ai_advice = existing.ai_advice.clone();
            }

            match journal.save(draft)? {
                Some(entry) => print_entry(&entry),
                None => println!("Nothing to save."),
            }
        }
        JournalCommand::Delete { id } => {
            if journal.delete(&id)? {
                println!("Deleted {}", id);
            } else {
                println!("No journal entry {}", id);
            }
        }
        JournalCommand::Soothe { id } => {
            let body = journal
                .get(&id)
                .map(|entry| entry.body.clone())
                .with_context(|| format!("no journal entry {}", id))?;

            let client = GeminiClient::new(config.completion.clone());
            let advice = runtime()?.block_on(client.soothe(&body))?;
            journal.set_note(&id, advice.clone())?;
            println!("\"{}\"", advice);
        }
    }
    Ok(())
}

fn story(config: &DriftConfig, theme: &str) -> Result<()> {
    let theme: StoryTheme = theme.parse().map_err(anyhow::Error::msg)?;
    println!("{}\n", theme);

    let client = GeminiClient::new(config.completion.clone());
    let text = runtime()?.block_on(client.story(theme));
    println!("{}", text);
    Ok(())
}

#[cfg(feature = "wav-export")]
fn render(config: &DriftConfig, seconds: f64, out: &std::path::Path, sample_rate: u32) -> Result<()> {
    use drift::engine::OfflineHost;

    let mut engine = NoiseEngine::new(OfflineHost::new(sample_rate), config.noise.clone());
    engine.initialize().context("building the noise graph")?;
    engine.toggle();
    let samples = engine
        .context_mut()
        .map(|context| context.render_seconds(seconds))
        .unwrap_or_default();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(out, spec)
        .with_context(|| format!("creating {}", out.display()))?;
    for sample in &samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;

    tracing::info!(frames = samples.len(), path = %out.display(), "rendered noise");
    println!("Wrote {:.1}s of noise to {}", seconds, out.display());
    Ok(())
}

#[cfg(not(feature = "wav-export"))]
fn render(_config: &DriftConfig, _seconds: f64, _out: &std::path::Path, _sample_rate: u32) -> Result<()> {
    anyhow::bail!("drift was built without the wav-export feature")
}
