use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hanzi_vocab::{
    decode_phrase, load_entries, parse_level, prompt_level, segment, segment_words,
    unknown_words, DictionaryEntry, Enricher, ExportFormat, KnownWordSet, LexiconIndex,
    PresenceIndex, RateLimiter, RemoteDictionary, SentenceCorpus, VocabConfig,
};
use hanzi_vocab_core::utils::normalize;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "hanzi-vocab",
    version,
    about = "Extract unknown Mandarin vocabulary from a text into a flashcard deck"
)]
struct Cli {
    /// Configuration file (TOML); defaults are used when omitted
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Segment a text, filter known words and write the enriched deck
    Build(BuildArgs),
    /// Print the dictionary segmentation of a text
    Segment(SegmentArgs),
    /// Render numeric-tone pinyin with tone marks
    Decode(DecodeArgs),
    /// Write a configuration file with every default filled in
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Highest HSK level fully completed; asked on stdin when omitted
    #[arg(short, long, value_name = "LEVEL")]
    level: Option<String>,

    /// Input text (overrides paths.input)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Deck file (overrides paths.output)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Deck format (overrides export.format)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Never query the remote dictionary
    #[arg(long)]
    no_fallback: bool,

    /// Leave entries without an example sentence out of the deck
    #[arg(long)]
    skip_incomplete: bool,
}

#[derive(Debug, Args)]
struct SegmentArgs {
    /// Text to segment; read from --file or stdin when omitted
    text: Option<String>,

    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Print the character offset of every segment
    #[arg(long)]
    offsets: bool,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Pinyin such as "ni3 hao3" or "lv4"
    #[arg(required = true, num_args = 1..)]
    pinyin: Vec<String>,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    #[arg(default_value = "hanzi-vocab.toml")]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&Path>) -> Result<VocabConfig> {
    match path {
        Some(path) => VocabConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(VocabConfig::default()),
    }
}

/// Dictionary entries from an optional file; a missing file is an empty list.
fn load_optional_entries(
    path: &Path,
    fields: &hanzi_vocab::FieldNames,
    what: &str,
) -> Result<Vec<DictionaryEntry>> {
    if !path.exists() {
        warn!(path = %path.display(), "no {} found, continuing without it", what);
        return Ok(Vec::new());
    }
    let (entries, _) = load_entries(path, fields)
        .with_context(|| format!("failed to load {} {}", what, path.display()))?;
    Ok(entries)
}

fn load_lexicon(config: &VocabConfig) -> Result<Vec<DictionaryEntry>> {
    let path = &config.paths.lexicon;
    let (entries, report) = load_entries(path, &config.base().lexicon_fields)
        .with_context(|| format!("failed to load lexicon {}", path.display()))?;
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "lexicon records without a usable word were skipped");
    }
    info!(entries = report.loaded, "lexicon loaded");
    Ok(entries)
}

/// Level from `--level`, or asked on `reader` when the flag is absent or
/// not a valid level.
fn resolve_level<R: BufRead, W: Write>(
    arg: Option<&str>,
    reader: R,
    writer: W,
    max_level: u8,
) -> Result<u8> {
    if let Some(raw) = arg {
        match parse_level(raw, max_level) {
            Ok(level) => return Ok(level),
            Err(e) => warn!(error = %e, "ignoring --level"),
        }
    }
    prompt_level(reader, writer, max_level).context("failed to read proficiency level")
}

fn run_build(mut config: VocabConfig, args: &BuildArgs) -> Result<()> {
    if let Some(input) = &args.input {
        config.paths.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.paths.output = output.clone();
    }
    if let Some(format) = args.format {
        config.export.format = format;
    }
    if args.no_fallback {
        config.fallback.enabled = false;
    }
    if args.skip_incomplete {
        config.export.include_incomplete = false;
    }

    let level = resolve_level(
        args.level.as_deref(),
        io::stdin().lock(),
        io::stdout(),
        config.base().max_level,
    )?;

    let raw_text = fs::read_to_string(&config.paths.input)
        .with_context(|| format!("failed to read input text {}", config.paths.input.display()))?;
    let text = normalize(&raw_text);

    let known_fields = &config.base().known_fields;
    let (graded, _) = load_entries(&config.paths.hsk, known_fields)
        .with_context(|| format!("failed to load word list {}", config.paths.hsk.display()))?;
    let saved = load_optional_entries(&config.paths.saved, known_fields, "saved-words list")?;
    let known = KnownWordSet::build(&graded, level, &saved);
    info!(hsk_level = level, known = known.len(), "known words collected");

    let lexicon = LexiconIndex::from_entries(load_lexicon(&config)?);

    let words = segment_words(&text, &lexicon);
    let unknown = unknown_words(&words, &known);
    info!(segments = words.len(), unknown = unknown.len(), "text segmented");

    let corpus = if config.paths.sentences.exists() {
        SentenceCorpus::load(&config.paths.sentences).with_context(|| {
            format!("failed to load sentences {}", config.paths.sentences.display())
        })?
    } else {
        warn!(path = %config.paths.sentences.display(), "no sentence corpus found");
        SentenceCorpus::new()
    };

    let mut enricher =
        Enricher::new(&lexicon, &corpus).decode_pinyin(config.decode_lexicon_pinyin);
    if config.fallback.enabled {
        let remote = RemoteDictionary::new(&config.fallback)
            .context("failed to build the dictionary HTTP client")?;
        enricher = enricher.with_fallback(remote, RateLimiter::new(config.fallback.min_delay()));
    }
    let deck = enricher.enrich(&unknown);

    let written = deck
        .save(&config.paths.output, &config.export)
        .with_context(|| format!("failed to write deck {}", config.paths.output.display()))?;

    println!(
        "Wrote {} entries to {} ({} without example, {} dropped)",
        written,
        config.paths.output.display(),
        deck.incomplete.len(),
        deck.dropped.len()
    );
    if !deck.dropped.is_empty() {
        println!("Dropped (no definition): {}", deck.dropped.join(", "));
    }
    Ok(())
}

fn run_segment(config: &VocabConfig, args: &SegmentArgs) -> Result<()> {
    let raw = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let text = normalize(&raw);

    let index = PresenceIndex::from_entries(&load_lexicon(config)?);
    for seg in segment(&text, &index) {
        if args.offsets {
            println!("{}\t{}", seg.start, seg.text);
        } else {
            println!("{}", seg.text);
        }
    }
    Ok(())
}

fn run_init_config(args: &InitConfigArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }
    VocabConfig::default()
        .save_toml(&args.path)
        .with_context(|| format!("failed to write {}", args.path.display()))?;
    println!("Wrote default configuration to {}", args.path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Command::Build(args) => run_build(load_config(cli.config.as_deref())?, args),
        Command::Segment(args) => run_segment(&load_config(cli.config.as_deref())?, args),
        Command::Decode(args) => {
            println!("{}", decode_phrase(&args.pinyin.join(" ")));
            Ok(())
        }
        Command::InitConfig(args) => run_init_config(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Cursor;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_args_parse() {
        let cli = Cli::parse_from([
            "hanzi-vocab",
            "build",
            "--level",
            "3",
            "--format",
            "json",
            "--no-fallback",
        ]);
        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.level.as_deref(), Some("3"));
                assert_eq!(args.format, Some(ExportFormat::Json));
                assert!(args.no_fallback);
                assert!(!args.skip_incomplete);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_valid_level_flag_skips_prompt() {
        let mut shown = Vec::new();
        let level = resolve_level(Some("3"), Cursor::new(""), &mut shown, 6).unwrap();
        assert_eq!(level, 3);
        assert!(shown.is_empty());
    }

    #[test]
    fn test_invalid_level_flag_falls_back_to_prompt() {
        let mut shown = Vec::new();
        let level = resolve_level(Some("9"), Cursor::new("seven\n2\n"), &mut shown, 6).unwrap();
        assert_eq!(level, 2);

        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(shown.matches("Enter your HSK level").count(), 2);
        assert!(shown.contains("invalid proficiency level 'seven'"));
    }

    #[test]
    fn test_missing_level_prompts_and_eof_is_an_error() {
        let level = resolve_level(None, Cursor::new("0\n"), Vec::new(), 6).unwrap();
        assert_eq!(level, 0);
        assert!(resolve_level(Some("x"), Cursor::new(""), Vec::new(), 6).is_err());
    }

    const CEDICT: &str = r#"[
        {"simplified": "我", "pinyin": "wo3", "english": "I"},
        {"simplified": "喜", "pinyin": "xi3", "english": "happy"},
        {"simplified": "喜欢", "pinyin": "xi3 huan5", "english": "to like"},
        {"simplified": "熊", "pinyin": "xiong2", "english": "bear"},
        {"simplified": "熊猫", "pinyin": "xiong2 mao1", "english": ["panda"]}
    ]"#;
    const HSK: &str = r#"[{"hanzi": "我", "HSK": 1}, {"hanzi": "喜欢", "HSK": 1}]"#;

    /// Config with the required inputs in `dir`; the saved-words list and
    /// the sentence corpus point at files that do not exist.
    fn build_fixture(dir: &tempfile::TempDir) -> VocabConfig {
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        };
        let mut config = VocabConfig::default();
        config.paths.input = write("text.txt", "我喜欢熊猫。\n");
        config.paths.hsk = write("hsk.json", HSK);
        config.paths.lexicon = write("cedict.json", CEDICT);
        config.paths.saved = dir.path().join("missing-saved.json");
        config.paths.sentences = dir.path().join("missing-sentences.tsv");
        config.paths.output = dir.path().join("deck.tsv");
        config
    }

    fn build_args(extra: &[&str]) -> BuildArgs {
        let mut argv = vec!["hanzi-vocab", "build", "--level", "1", "--no-fallback"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Build(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_build_without_optional_inputs_writes_incomplete_entries() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_fixture(&dir);
        let output = config.paths.output.clone();

        run_build(config, &build_args(&[])).unwrap();

        let tsv = fs::read_to_string(&output).unwrap();
        assert_eq!(tsv, "熊猫\txióng māo\tpanda\t\t\t\tincomplete\n");
    }

    #[test]
    fn test_build_honours_format_and_skip_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_fixture(&dir);
        let json_path = dir.path().join("out").join("deck.json");

        let json_arg = json_path.to_str().unwrap();
        run_build(
            config.clone(),
            &build_args(&["--format", "json", "--output", json_arg]),
        )
        .unwrap();
        let rows: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(rows[0]["word"], "熊猫");
        assert_eq!(rows[0]["example"], "");

        run_build(
            config,
            &build_args(&["--format", "json", "--output", json_arg, "--skip-incomplete"]),
        )
        .unwrap();
        let rows: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(rows, serde_json::json!([]));
    }

    #[test]
    fn test_segment_text_and_file_conflict() {
        let res = Cli::try_parse_from(["hanzi-vocab", "segment", "你好", "--file", "a.txt"]);
        assert!(res.is_err());
    }
}
