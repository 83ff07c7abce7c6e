use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use turnwise::detect::external::load_segments;
use turnwise::engine::{collect_stats, count_label_changes};
use turnwise::reconcile::cross_check_counts;
use turnwise::{
    parse_transcription_file, reconcile_with_segments, AnnotatedTranscript, AttributionEngine,
    EngineConfig, HumanTranscript,
};

#[derive(Parser)]
#[command(name = "turnwise")]
#[command(author, version, about = "Heuristic speaker attribution for transcribed conversations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign speaker labels to a transcribed conversation
    Attribute {
        /// Input transcript file (transcription collaborator JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the annotated transcript (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Maximum number of speakers
        #[arg(long, default_value = "4")]
        max_speakers: u32,

        /// Force a specific speaker count instead of estimating one
        #[arg(long)]
        speakers: Option<u32>,

        /// External diarization segments (JSON) to override heuristic labels
        #[arg(long)]
        diarization: Option<PathBuf>,

        /// Maximum silence bridged when merging same-speaker spans, seconds
        #[arg(long, default_value = "1.0")]
        merge_gap: f64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Inspect a transcript's conversational statistics without writing output
    Analyze {
        /// Input transcript file (transcription collaborator JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Attribute {
            input,
            output,
            human_readable,
            max_speakers,
            speakers,
            diarization,
            merge_gap,
            verbose,
        } => {
            setup_logging(verbose);
            attribute_transcript(
                input,
                output,
                human_readable,
                max_speakers,
                speakers,
                diarization,
                merge_gap,
            )
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze_transcript(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

#[allow(clippy::too_many_arguments)]
fn attribute_transcript(
    input: PathBuf,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    max_speakers: u32,
    speakers: Option<u32>,
    diarization: Option<PathBuf>,
    merge_gap: f64,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let mut utterances =
        parse_transcription_file(&input).context("Failed to parse input transcript")?;
    info!("Loaded {} utterances", utterances.len());

    let config = EngineConfig {
        max_speakers,
        merge_gap_seconds: merge_gap,
        ..Default::default()
    };
    let engine = AttributionEngine::new(config);

    let mut result = match speakers {
        Some(count) => {
            info!("Forcing speaker count {}", count);
            engine.attribute_with_count(&mut utterances, count)
        }
        None => engine.attribute(&mut utterances),
    };

    info!(
        "Attribution: {} speakers, {} changes, {} spans",
        result.speaker_count,
        result.changes,
        result.spans.len()
    );

    let mut backend = "heuristic".to_string();

    // External diarization, when present, supersedes heuristic labels
    if let Some(path) = diarization {
        match load_segments(&path) {
            Ok(detection) => {
                cross_check_counts(result.speaker_count, detection.speaker_count);
                let reconciled = reconcile_with_segments(&mut utterances, &detection.segments);
                info!(
                    "Reconciled with external segments: {} overridden, {} retained",
                    reconciled.overridden, reconciled.retained
                );
                result.speaker_count = result
                    .speaker_count
                    .max(reconciled.external_speaker_count);
                result.spans = turnwise::engine::merge_spans(&utterances, merge_gap);
                result.changes = count_label_changes(&utterances);
                backend = "external".to_string();
            }
            Err(err) => {
                info!("External diarization unavailable ({err}), keeping heuristic labels");
            }
        }
    }

    let transcript = AnnotatedTranscript::from_labeled(
        &utterances,
        result.spans.clone(),
        result.speaker_count,
        result.changes,
        backend,
    );
    transcript.write_json(&output)?;
    info!("Output written to {:?}", output);

    if let Some(human_path) = human_readable {
        HumanTranscript::new(&utterances, &result.spans).write_file(&human_path)?;
        info!("Human-readable output written to {:?}", human_path);
    }

    Ok(())
}

fn analyze_transcript(input: PathBuf) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let mut utterances =
        parse_transcription_file(&input).context("Failed to parse input transcript")?;

    let config = EngineConfig::default();
    let stats = collect_stats(&utterances, &config);

    println!("Transcript Analysis");
    println!("==================");
    println!("Total utterances: {}", utterances.len());
    let duration = utterances
        .last()
        .map(|u| u.end)
        .unwrap_or(0.0)
        - utterances.first().map(|u| u.start).unwrap_or(0.0);
    println!("Duration: {:.1}s", duration.max(0.0));
    println!();

    println!("Conversational Signals (first {} utterances)", stats.sampled);
    println!("---------------------------------------------");
    println!("Pause changes: {}", stats.pause_changes);
    println!("Response words: {}", stats.response_hits);
    println!("Questions: {}", stats.question_hits);
    println!("Direct addresses: {}", stats.address_hits);
    println!("Length asymmetries: {}", stats.length_asymmetries);
    println!("Length variation: {:.2}", stats.length_std_normalized);
    println!("Conversation score: {:.2}", stats.score);
    println!();

    let engine = AttributionEngine::new(config);
    let result = engine.attribute(&mut utterances);

    println!("Attribution");
    println!("-----------");
    println!("Estimated speakers: {}", result.speaker_count);
    println!("Speaker changes: {}", result.changes);
    println!("Spans: {}", result.spans.len());
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for speaker in 1..=result.speaker_count {
        let spans: Vec<_> = result
            .spans
            .iter()
            .filter(|s| s.speaker == speaker)
            .collect();
        let utterance_count: usize = spans.iter().map(|s| s.utterance_count()).sum();
        let speaking_time: f64 = spans.iter().map(|s| s.duration).sum();
        println!(
            "Speaker {:02}: {} utterances, {} spans, {:.1}s speaking time",
            speaker,
            utterance_count,
            spans.len(),
            speaking_time
        );
    }

    Ok(())
}
