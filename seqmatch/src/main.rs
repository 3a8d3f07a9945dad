use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use seqmatch::align::{AlignMode, Scoring};
use seqmatch::batch;
use seqmatch::index::{FMIndex, IndexMeta, RotationSort};
use seqmatch::motif;

#[derive(Parser, Debug)]
#[command(name = "seqmatch", author, version, about = "FM-index motif search and pairwise sequence alignment", arg_required_else_help = true)]
struct Cli {
    /// Worker threads for batch queries (0 = one per core)
    #[arg(short = 't', long = "threads", default_value_t = 0, global = true)]
    threads: usize,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an FM index of a text and save it
    Index {
        /// Text to index (sentinel '$' is appended if missing)
        text: String,
        /// Output prefix for the index file
        #[arg(short, long, default_value = "ref")]
        output: String,
        /// Label stored in the index metadata
        #[arg(long)]
        label: Option<String>,
        #[arg(long, value_enum, default_value_t = RotationSort::Naive)]
        sort: RotationSort,
        /// Occ checkpoint spacing
        #[arg(long, default_value_t = seqmatch::index::fm::DEFAULT_BLOCK)]
        block: usize,
    },
    /// Count occurrences of a pattern
    Count {
        pattern: String,
        /// Text to search (omit when --index is given)
        #[arg(long)]
        text: Option<String>,
        /// Path to a saved FM index (.fm)
        #[arg(short = 'i', long = "index")]
        index: Option<String>,
    },
    /// Locate occurrences of one or more patterns
    Locate {
        #[arg(required = true)]
        patterns: Vec<String>,
        /// Text to search (omit when --index is given)
        #[arg(long)]
        text: Option<String>,
        /// Path to a saved FM index (.fm)
        #[arg(short = 'i', long = "index")]
        index: Option<String>,
    },
    /// Align two sequences
    Align {
        a: String,
        b: String,
        #[arg(long = "match", default_value_t = 1, allow_negative_numbers = true)]
        match_score: i32,
        #[arg(long = "mismatch", default_value_t = -1, allow_negative_numbers = true)]
        mismatch: i32,
        #[arg(long = "gap", default_value_t = -2, allow_negative_numbers = true)]
        gap: i32,
        /// global | local
        #[arg(long, default_value = "global")]
        mode: AlignMode,
        /// Only report the score
        #[arg(long)]
        score_only: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("cannot configure thread pool")?;
    }

    match cli.command {
        Commands::Index { text, output, label, sort, block } => run_index(&text, &output, label, sort, block),
        Commands::Count { pattern, text, index } => {
            let fm = open_index(text.as_deref(), index.as_deref())?;
            let count = fm.count(pattern.as_bytes());
            if cli.json {
                emit_json(&serde_json::json!({ "pattern": pattern, "count": count }))
            } else {
                println!("{}", count);
                Ok(())
            }
        }
        Commands::Locate { patterns, text, index } => {
            let fm = open_index(text.as_deref(), index.as_deref())?;
            let hits = batch::locate_many(&fm, &patterns);
            if cli.json {
                let rows: Vec<_> = patterns
                    .iter()
                    .zip(&hits)
                    .map(|(p, h)| serde_json::json!({ "pattern": p, "count": h.count, "offsets": h.offsets }))
                    .collect();
                return emit_json(&rows);
            }
            for (p, h) in patterns.iter().zip(&hits) {
                let offsets: Vec<String> = h.offsets.iter().map(|o| o.to_string()).collect();
                println!("{}\t{}\t{}", p, h.count, offsets.join(","));
            }
            Ok(())
        }
        Commands::Align { a, b, match_score, mismatch, gap, mode, score_only } => {
            let scoring = Scoring::new(match_score, mismatch, gap);
            if score_only {
                let score = motif::score_only(a.as_bytes(), b.as_bytes(), &scoring, mode)?;
                if cli.json {
                    return emit_json(&serde_json::json!({ "mode": mode, "score": score }));
                }
                println!("{}", score);
                return Ok(());
            }
            let aln = motif::align(a.as_bytes(), b.as_bytes(), &scoring, mode)?;
            if cli.json {
                return emit_json(&aln);
            }
            println!("{}", aln);
            println!("score: {}", aln.score);
            Ok(())
        }
    }
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_index(text: Option<&str>, index: Option<&str>) -> Result<FMIndex> {
    match (text, index) {
        (_, Some(path)) => FMIndex::load_from_file(path)
            .with_context(|| format!("cannot load FM index from '{}'", path)),
        (Some(text), None) => Ok(FMIndex::from_text(text.as_bytes())?),
        (None, None) => anyhow::bail!("either a text or --index must be given"),
    }
}

fn run_index(text: &str, output: &str, label: Option<String>, sort: RotationSort, block: usize) -> Result<()> {
    let mut fm = FMIndex::from_text_with(text.as_bytes(), sort, block)?;
    fm.set_meta(IndexMeta {
        source: label,
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });
    info!("indexed {} symbols, alphabet {:?}", fm.len(), String::from_utf8_lossy(&fm.alphabet));

    let out_path = format!("{}.fm", output);
    fm.save_to_file(&out_path)
        .with_context(|| format!("cannot write index to '{}'", out_path))?;
    println!("FM index saved: {}", out_path);
    Ok(())
}
