use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vectionary_protocol::Token;
use vectionary_session::{parse_response, EngineConfig, Session, View};
use vectionary_tagger::{lexicon, Classifier};

#[derive(Parser)]
#[command(author, version, about = "Compiles Vectionary lexicons and tags sentences offline")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON lexicon to the rkyv binary the engine loads
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Tag a sentence, optionally merging a saved remote response
    Tag {
        text: String,

        /// Lexicon (.json or compiled binary); the built-in English lists otherwise
        #[arg(short, long, value_name = "FILE")]
        lexicon: Option<PathBuf>,

        /// Saved response body of the remote classification service
        #[arg(short, long, value_name = "FILE")]
        response: Option<PathBuf>,

        /// Engine config JSON
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct TokenLine<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    /// Same spelling as the browser views (`PROPER NOUN`).
    category: &'static str,
    link: Option<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Tag { text, lexicon, response, config, json } => {
            tag(&text, lexicon.as_deref(), response.as_deref(), config.as_deref(), json)
        }
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    info!("reading lexicon JSON from {:?}", input);
    let source = fs::read_to_string(input).with_context(|| format!("reading {:?}", input))?;
    let lexicon = lexicon::parse_json(&source)?;

    info!(
        "compiling lexicon version {} with {} words and {} bigrams",
        lexicon.version.0,
        lexicon.word_count(),
        lexicon.bigrams.len()
    );
    let bytes = lexicon::compile(&lexicon)?;

    fs::write(output, bytes.as_slice()).with_context(|| format!("writing {:?}", output))?;
    println!("Compiled {} words into {:?} ({} bytes)", lexicon.word_count(), output, bytes.len());
    Ok(())
}

fn load_classifier(path: Option<&Path>) -> anyhow::Result<Classifier> {
    let Some(path) = path else {
        return Ok(Classifier::english()?);
    };
    let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
    let classifier = if path.extension().is_some_and(|ext| ext == "json") {
        Classifier::from_json(std::str::from_utf8(&bytes).context("lexicon JSON is not UTF-8")?)?
    } else {
        Classifier::from_archive(&bytes)?
    };
    Ok(classifier)
}

fn tag(
    text: &str,
    lexicon: Option<&Path>,
    response: Option<&Path>,
    config: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let classifier = load_classifier(lexicon)?;
    let config = match config {
        Some(path) => EngineConfig::from_json(
            &fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?,
        )?,
        None => EngineConfig::default(),
    };
    let mut session = Session::with_config(classifier, config);

    match response {
        Some(path) => {
            let body = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            // Surface payload errors directly instead of as a failed view
            parse_response(text, &body, session.analyzer().classifier())?;
            let submission = session.submit(text)?;
            session.complete_raw(submission.id, 200, &body);
        }
        None => {
            session.submit_offline(text)?;
        }
    }

    let analysis = match session.view() {
        View::Ready { analysis, .. } => analysis,
        View::Failed { error, .. } => bail!("{error}"),
        other => bail!("unexpected session state: {other:?}"),
    };

    for issue in &analysis.issues {
        eprintln!("warning: {issue}");
    }

    let tokens = &analysis.sentence.tokens;
    if json {
        let lines: Vec<TokenLine<'_>> = tokens.iter().map(token_line).collect();
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for token in tokens {
            let line = token_line(token);
            println!(
                "{:>3}..{:<3} {:<14} {:<12} {}",
                line.start,
                line.end,
                line.text,
                line.category,
                line.link.unwrap_or("-")
            );
        }
    }
    Ok(())
}

fn token_line(token: &Token) -> TokenLine<'_> {
    TokenLine {
        text: &token.text,
        start: token.char_span.start,
        end: token.char_span.end,
        category: token.category.label(),
        link: token.definition_link.as_uri(),
    }
}
