//! chapterize - segment a translated novel into chapters and report
//! numbering anomalies.

use anyhow::{Context, Result};
use chapterize::{detect_issues, split_into_parts, ChapterSplitter, SplitOptions};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chapterize",
    about = "Segment translated novel text into chapters",
    long_about = "Reads a UTF-8 text file, recognizes chapter headings in several \
                  formats, reports gaps and duplicates in the chapter numbering, and \
                  optionally chunks chapter bodies to a character budget"
)]
#[command(version)]
struct Args {
    /// Path to the novel text file (UTF-8)
    input: PathBuf,

    /// Skip heading detection and treat the file as one chapter
    #[arg(long)]
    no_detect: bool,

    /// Bypass the large-file segmentation path
    #[arg(long)]
    no_db: bool,

    /// Chunk chapter bodies to this many characters and report chunk counts
    #[arg(short, long)]
    chunk_size: Option<usize>,

    /// Segmenter options file (TOML)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

#[derive(Serialize)]
struct ChapterReport {
    title: String,
    number: Option<i64>,
    body_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    chunks: Option<usize>,
}

#[derive(Serialize)]
struct Report {
    chapters: Vec<ChapterReport>,
    sequence: Vec<i64>,
    issues: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let options = match &args.options {
        Some(path) => SplitOptions::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => SplitOptions::default(),
    };

    let splitter = ChapterSplitter::new(options);
    let (chapters, sequence) = splitter.split_text(&text, !args.no_detect, args.no_db);
    let issues = detect_issues(&sequence);

    let report = Report {
        chapters: chapters
            .iter()
            .map(|c| ChapterReport {
                title: c.title.clone(),
                number: c.number,
                body_chars: c.body.chars().count(),
                chunks: args
                    .chunk_size
                    .map(|size| split_into_parts(&c.body, size).len()),
            })
            .collect(),
        sequence,
        issues,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!("Found {} chapter(s)", report.chapters.len());
    for chapter in &report.chapters {
        let number = chapter
            .number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        match chapter.chunks {
            Some(chunks) => println!(
                "  [{number}] {} ({} chars, {chunks} chunk(s))",
                chapter.title, chapter.body_chars
            ),
            None => println!("  [{number}] {} ({} chars)", chapter.title, chapter.body_chars),
        }
    }

    if report.issues.is_empty() {
        println!("Chapter numbering is clean");
    } else {
        println!("Numbering issues:");
        for issue in &report.issues {
            println!("  {issue}");
        }
    }
}
