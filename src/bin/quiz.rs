// Quiz Lookup CLI Tool
// Command-line interface for question bank lookups

use clap::{Parser, Subcommand};
use quiz_lookup::types::{
    PLACEHOLDER_ANSWER, PLACEHOLDER_LEVEL, PLACEHOLDER_OPTION, PLACEHOLDER_QUESTION,
    PLACEHOLDER_TYPE,
};
use quiz_lookup::{
    BankSource, Config, HistoryEntry, LookupError, QueryHistory, QueryOutcome, QuestionRecord,
    QuizLookup, ScoredMatch, SearchField,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Characters of the searched field shown per result in a list
const LIST_PREVIEW_LEN: usize = 50;
/// Characters of the question shown per history entry
const HISTORY_PREVIEW_LEN: usize = 30;

/// Quiz Lookup Tool - Find questions by id or keyword
#[derive(Parser, Debug)]
#[command(name = "quiz")]
#[command(about = "Look up questions in an INI question bank by id or keyword", long_about = None)]
#[command(version)]
struct Args {
    /// Question bank: "bundled" or a path to an INI file
    #[arg(short, long, global = true, env = "QUIZ_SOURCE")]
    source: Option<BankSource>,

    /// History file
    #[arg(long, global = true, env = "QUIZ_HISTORY_PATH")]
    history: Option<PathBuf>,

    /// Maximum number of results to list
    #[arg(short, long, default_value = "10", global = true)]
    limit: usize,

    /// Show detailed information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the question with this id
    Id { id: String },

    /// Search question text; every keyword must appear
    Question {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
    },

    /// Search option text; every keyword must appear
    #[command(name = "option")]
    Options {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
    },

    /// List recently viewed questions
    History,

    /// Forget all recently viewed questions
    ClearHistory,

    /// Show question bank statistics
    Stats,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let source = args.source.clone().unwrap_or(config.source);
    let history_path = args.history.clone().unwrap_or(config.history_path);

    // Never parse the file here: clearing must work on a corrupt history
    if let Command::ClearHistory = args.command {
        QueryHistory::discard(&history_path)?;
        println!("History cleared.");
        return Ok(());
    }

    let mut history = open_history(&history_path);

    if let Command::History = args.command {
        print_history(history.entries());
        return Ok(());
    }

    let mut lookup = QuizLookup::new();
    let stats = lookup.load(&source)?;

    if args.verbose {
        println!("Question bank loaded from {}: {} questions\n", source, stats.sections);
    }

    match &args.command {
        Command::Id { id } => print!("{}", run_id(&lookup, &mut history, id)?),
        Command::Question { keywords } => {
            let phrase = keywords.join(" ");
            let field = SearchField::Question;
            print!("{}", run_search(&lookup, &mut history, &phrase, field, args.limit)?);
        }
        Command::Options { keywords } => {
            let phrase = keywords.join(" ");
            let field = SearchField::Option;
            print!("{}", run_search(&lookup, &mut history, &phrase, field, args.limit)?);
        }
        Command::Stats => {
            println!("Questions: {}", stats.sections);
            let mut by_type: Vec<(&String, &usize)> = stats.by_type.iter().collect();
            by_type.sort();
            for (label, count) in by_type {
                println!("  {:<20} {}", label, count);
            }
        }
        Command::History | Command::ClearHistory => {}
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "quiz_lookup=debug,quiz=debug"
    } else {
        "quiz_lookup=info,quiz=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Open the history file, or fall back to an in-memory history
fn open_history(path: &Path) -> QueryHistory {
    match QueryHistory::open(path) {
        Ok(history) => history,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "history unavailable, not persisting");
            QueryHistory::new()
        }
    }
}

/// Add a shown question to the history; failures only warn
fn remember(history: &mut QueryHistory, id: &str, record: &QuestionRecord) {
    if let Err(e) = history.record(id, record) {
        warn!(id, error = %e, "could not record history");
    }
}

/// The question a keyword query displays in full, if any
///
/// Direct lookups and single matches are shown in full; lists are not.
fn shown_record(outcome: &QueryOutcome) -> Option<(&str, &QuestionRecord)> {
    match outcome {
        QueryOutcome::Matches(matches) if matches.len() == 1 => {
            Some((matches[0].id.as_str(), &matches[0].record))
        }
        QueryOutcome::Direct { id, record } => Some((id.as_str(), record)),
        QueryOutcome::Matches(_) | QueryOutcome::NoMatch => None,
    }
}

fn run_id(
    lookup: &QuizLookup,
    history: &mut QueryHistory,
    id: &str,
) -> Result<String, LookupError> {
    match lookup.get_by_id(id) {
        Ok(record) => {
            let id = id.trim();
            remember(history, id, record);
            Ok(render_record(id, record))
        }
        Err(LookupError::NotFound { id }) => Ok(format!("No question with id {}.\n", id)),
        Err(e) => Err(e),
    }
}

fn run_search(
    lookup: &QuizLookup,
    history: &mut QueryHistory,
    phrase: &str,
    field: SearchField,
    limit: usize,
) -> Result<String, LookupError> {
    let outcome = lookup.search(phrase, field)?;

    if let Some((id, record)) = shown_record(&outcome) {
        remember(history, id, record);
    }

    Ok(render_outcome(&outcome, field, limit))
}

fn render_outcome(outcome: &QueryOutcome, field: SearchField, limit: usize) -> String {
    if let Some((id, record)) = shown_record(outcome) {
        return render_record(id, record);
    }

    let QueryOutcome::Matches(matches) = outcome else {
        return "No matching questions found.\n".to_string();
    };

    let mut out = if matches.len() > limit {
        format!("Found {} matches, showing {}:\n\n", matches.len(), limit)
    } else {
        format!("Found {} matches:\n\n", matches.len())
    };
    for (idx, matched) in matches.iter().take(limit).enumerate() {
        out.push_str(&render_list_item(idx + 1, matched, field));
        out.push('\n');
    }
    out
}

fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No history yet.");
        return;
    }

    for entry in entries {
        println!("{}", render_history_entry(entry));
    }
}

/// Full view of one question
fn render_record(id: &str, record: &QuestionRecord) -> String {
    let options = record
        .option()
        .map(format_options)
        .unwrap_or_else(|| PLACEHOLDER_OPTION.to_string());

    format!(
        "ID:       {}\nType:     {}\nLevel:    {}\nQuestion: {}\nOptions:\n{}\nAnswer:   {}\n",
        id,
        record.question_type().unwrap_or(PLACEHOLDER_TYPE),
        record.level().unwrap_or(PLACEHOLDER_LEVEL),
        record.question().unwrap_or(PLACEHOLDER_QUESTION),
        indent(&options, "  "),
        record.answer().unwrap_or(PLACEHOLDER_ANSWER),
    )
}

/// One line of a result list, previewing the searched field
fn render_list_item(position: usize, matched: &ScoredMatch, field: SearchField) -> String {
    let record = &matched.record;
    let preview = match field {
        SearchField::Question => {
            preview(record.question().unwrap_or(PLACEHOLDER_QUESTION), LIST_PREVIEW_LEN)
        }
        SearchField::Option => format!(
            "Options: {}",
            preview(record.option().unwrap_or(PLACEHOLDER_OPTION), LIST_PREVIEW_LEN)
        ),
    };

    format!(
        "{}. ID: {} - {}\n   {}",
        position,
        matched.id,
        record.question_type().unwrap_or(PLACEHOLDER_TYPE),
        preview.replace('\n', " "),
    )
}

fn render_history_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} - {}\n   {}\n   {}",
        entry.id,
        entry.question_type,
        preview(&entry.question, HISTORY_PREVIEW_LEN),
        entry.time.format("%Y/%m/%d %H:%M:%S"),
    )
}

/// Options are stored `;`-separated, one per line on screen
fn format_options(option: &str) -> String {
    option.replace(';', "\n")
}

/// First `max` characters, with `...` when anything was cut
fn preview(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    if text.chars().count() > max {
        out.push_str("...");
    }
    out
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly10!", 10), "exactly10!");
        assert_eq!(preview("this is longer", 4), "this...");
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_format_options() {
        assert_eq!(format_options("A.Yes;B.No"), "A.Yes\nB.No");
    }

    #[test]
    fn test_render_record_placeholders() {
        let rendered = render_record("Q9", &QuestionRecord::new());

        assert!(rendered.contains("ID:       Q9"));
        assert!(rendered.contains(PLACEHOLDER_TYPE));
        assert!(rendered.contains(PLACEHOLDER_LEVEL));
        assert!(rendered.contains(PLACEHOLDER_QUESTION));
        assert!(rendered.contains(PLACEHOLDER_OPTION));
        assert!(rendered.contains(PLACEHOLDER_ANSWER));
    }

    #[test]
    fn test_render_record_options_split() {
        let record: QuestionRecord = [("option", "A.Invoice;B.Waybill")].into_iter().collect();
        let rendered = render_record("1", &record);

        assert!(rendered.contains("  A.Invoice\n  B.Waybill"));
    }

    #[test]
    fn test_render_list_item() {
        let matched = ScoredMatch {
            id: "217001".to_string(),
            record: [("type", "single-choice"), ("option", "A.Invoice;B.Waybill")]
                .into_iter()
                .collect(),
            score: 1,
        };

        let line = render_list_item(1, &matched, SearchField::Option);
        assert_eq!(line, "1. ID: 217001 - single-choice\n   Options: A.Invoice;B.Waybill");
    }

    #[test]
    fn test_render_history_entry() {
        let entry = HistoryEntry {
            id: "217001".to_string(),
            question_type: "single-choice".to_string(),
            question: "Which document travels with a parcel?".to_string(),
            time: Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 1).unwrap(),
        };

        let rendered = render_history_entry(&entry);
        assert!(rendered.starts_with("217001 - single-choice"));
        assert!(rendered.contains("Which document travels with a ..."));
        assert!(rendered.contains("2024/03/05 09:07:01"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["quiz", "question", "parcel", "weight", "-l", "3"]);

        assert_eq!(args.limit, 3);
        match args.command {
            Command::Question { keywords } => assert_eq!(keywords, vec!["parcel", "weight"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_args_source() {
        let args = Args::parse_from(["quiz", "--source", "bank.ini", "id", "217001"]);
        assert_eq!(args.source, Some(BankSource::File("bank.ini".into())));
    }

    fn lookup() -> QuizLookup {
        QuizLookup::from_text(
            "[217001]\ntype = dx\nquestion = Which document travels with a parcel?\n\
             [217005]\ntype = pd\nquestion = Parcel weight is checked at outbound scan\n\
             [217007]\ntype = dxx\nquestion = What sets the billable weight of a parcel?\n",
        )
    }

    fn history_ids(history: &QueryHistory) -> Vec<&str> {
        history.entries().iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_single_match_is_recorded() {
        let mut history = QueryHistory::new();
        let out = run_search(&lookup(), &mut history, "document", SearchField::Question, 10)
            .unwrap();

        assert!(out.starts_with("ID:       217001"));
        assert_eq!(history_ids(&history), vec!["217001"]);
    }

    #[test]
    fn test_id_fallback_is_recorded() {
        let mut history = QueryHistory::new();
        let out = run_search(&lookup(), &mut history, "217007", SearchField::Question, 10)
            .unwrap();

        assert!(out.starts_with("ID:       217007"));
        assert_eq!(history_ids(&history), vec!["217007"]);
    }

    #[test]
    fn test_result_list_is_not_recorded() {
        let mut history = QueryHistory::new();
        let out = run_search(&lookup(), &mut history, "parcel", SearchField::Question, 2)
            .unwrap();

        assert!(out.starts_with("Found 3 matches, showing 2:\n\n"));
        assert!(out.contains("1. ID: 217001"));
        assert!(out.contains("2. ID: 217005"));
        assert!(!out.contains("217007"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_result_list_within_limit() {
        let mut history = QueryHistory::new();
        let out = run_search(&lookup(), &mut history, "weight", SearchField::Question, 10)
            .unwrap();

        assert!(out.starts_with("Found 2 matches:\n\n"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_no_match_is_not_recorded() {
        let mut history = QueryHistory::new();
        let out = run_search(&lookup(), &mut history, "customs", SearchField::Question, 10)
            .unwrap();

        assert_eq!(out, "No matching questions found.\n");
        assert!(history.is_empty());
    }

    #[test]
    fn test_id_lookup_is_recorded() {
        let mut history = QueryHistory::new();

        let out = run_id(&lookup(), &mut history, " 217005 ").unwrap();
        assert!(out.starts_with("ID:       217005"));

        let missing = run_id(&lookup(), &mut history, "999").unwrap();
        assert_eq!(missing, "No question with id 999.\n");
        assert_eq!(history_ids(&history), vec!["217005"]);
    }

    #[test]
    fn test_history_save_failure_does_not_fail_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = QueryHistory::open(dir.path().join("gone").join("h.json")).unwrap();

        let out = run_id(&lookup(), &mut history, "217001").unwrap();
        assert!(out.starts_with("ID:       217001"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_corrupt_history_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{oops").unwrap();

        let mut history = open_history(&path);
        assert!(history.is_empty());

        run_id(&lookup(), &mut history, "217001").unwrap();
        assert_eq!(history_ids(&history), vec!["217001"]);
        // The corrupt file is left alone
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{oops");
    }

    #[test]
    fn test_clear_history_with_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{oops").unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let args = Args::parse_from(["quiz", "--history", path_arg.as_str(), "clear-history"]);
        run(&args).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_id_command_with_corrupt_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{oops").unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "quiz",
            "--source",
            "bundled",
            "--history",
            path_arg.as_str(),
            "id",
            "217001",
        ]);
        run(&args).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{oops");
    }
}
