//! 채움 - 터미널에서 문장 맞히기 퍼즐을 플레이한다.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chaeum::config::{load_config, GameConfig};
use chaeum::share::{parse_share_url, share_url, SharedPuzzle};
use chaeum::{
    generate_puzzle_with_config, validate_sentence, CharEdit, ClueOutcome, Dictionary,
    EditOutcome, Feedback, GameMode, GuessOutcome, HintId, PuzzleError, PuzzleRequest,
    SentenceOrigin, Session, Stage,
};
use clap::Parser;

/// Play a Korean sentence puzzle in the terminal.
#[derive(Parser)]
struct Args {
    /// Sentence to turn into a puzzle
    sentence: Option<String>,
    /// Puzzle mode: word, consonant or shuffle
    #[arg(long, default_value = "consonant")]
    mode: GameMode,
    /// RNG seed for a reproducible puzzle
    #[arg(long)]
    seed: Option<u64>,
    /// Extra word → meaning JSON table merged over the bundled one
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// Game config JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Load the sentence and mode from a share link instead
    #[arg(long, conflicts_with = "sentence")]
    link: Option<String>,
    /// Print a share link for the puzzle under this base URL and exit
    #[arg(long)]
    share: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.config.as_deref().map(load_config).unwrap_or_default();

    let mut dictionary = Dictionary::starter()?;
    if let Some(path) = &args.dictionary {
        let extra = Dictionary::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!("merging {} words from {}", extra.len(), path.display());
        dictionary.merge(extra);
    }

    let (raw, mode) = match (&args.link, &args.sentence) {
        (Some(link), _) => {
            let shared = parse_share_url(link)?;
            (shared.sentence, shared.mode)
        }
        (None, Some(sentence)) => (sentence.clone(), args.mode),
        (None, None) => return Err("문장을 입력하거나 --link 를 지정하세요".into()),
    };
    let sentence = validate_sentence(&raw, SentenceOrigin::Custom, &config)?;

    if let Some(base) = &args.share {
        println!("{}", share_url(base, &SharedPuzzle::new(sentence, mode))?);
        return Ok(());
    }

    let request = PuzzleRequest { sentence, mode, rng_seed: args.seed };
    let puzzle = generate_puzzle_with_config(request, &dictionary, &config)?;
    println!("[{}] {} ({})", mode, puzzle.puzzle_id, puzzle.problem_text());

    let mut session = Session::new(config.clone());
    session.start(puzzle)?;
    play(&mut session, &config)
}

fn play(session: &mut Session, config: &GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    render(session);

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        match handle(session, line) {
            Ok(message) => println!("{message}"),
            Err(e) => println!("! {e}"),
        }
        if session.stage() == Stage::Result {
            println!(
                "정답: {} (시도 {}회, 힌트 {}/{})",
                session.revealed_sentence(),
                session.attempts(),
                session.hints_used(),
                config.max_hints
            );
            break;
        }
        render(session);
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn handle(session: &mut Session, line: &str) -> chaeum::Result<String> {
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "guess" => Ok(match session.submit_guess(rest)? {
            GuessOutcome::Solved => "정답입니다!".to_string(),
            GuessOutcome::Retry { similarity } => format!("아쉬워요 (유사도 {similarity:.1}%)"),
        }),

        "hint" if rest.is_empty() => {
            let candidates = session.request_hint()?;
            Ok(candidates
                .iter()
                .map(|c| format!("  {} {}", c.id, c.display_text))
                .collect::<Vec<_>>()
                .join("\n"))
        }

        "hint" => {
            let id: HintId = rest.parse()?;
            let outcome = session.apply_hint(id)?;
            Ok(format!("힌트: {} (남은 힌트 {})", outcome.answer, outcome.hints_remaining))
        }

        "unlock" => {
            let pos = parse_position(rest)?;
            let message = if session.unlock(pos)? { "수정할 수 있습니다" } else { "바꿀 수 없는 글자입니다" };
            Ok(message.to_string())
        }

        _ => match session.mode() {
            Some(GameMode::Word) => {
                let index = parse_position(cmd)?;
                Ok(match session.submit_clue_answer(index, rest)? {
                    ClueOutcome::Correct { .. } => "맞았습니다!".to_string(),
                    ClueOutcome::Incorrect => "틀렸습니다".to_string(),
                    ClueOutcome::AlreadySolved => "이미 푼 단서입니다".to_string(),
                })
            }
            _ => {
                let edits = parse_edits(line)?;
                if let [edit] = edits.as_slice() {
                    Ok(match session.set_character(edit.position, edit.value)? {
                        EditOutcome::Applied(Feedback::Correct) => "O".to_string(),
                        EditOutcome::Applied(Feedback::Incorrect) => "X".to_string(),
                        EditOutcome::Applied(Feedback::Neutral) => "지웠습니다".to_string(),
                        EditOutcome::Locked => "이미 맞힌 글자입니다".to_string(),
                        EditOutcome::Completed => "완성!".to_string(),
                    })
                } else {
                    let outcome = session.apply_edits(&edits)?;
                    Ok(format!("{}개 반영, {}개 잠김", outcome.applied, outcome.locked))
                }
            }
        },
    }
}

/// Positions are 1-based on the command line.
fn parse_position(s: &str) -> chaeum::Result<usize> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(PuzzleError::InvalidPosition(s.to_string())),
    }
}

/// `<pos> <char> [<pos> <char> ...]`; `-` clears a position.
fn parse_edits(line: &str) -> chaeum::Result<Vec<CharEdit>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens
        .chunks(2)
        .map(|pair| {
            let position = parse_position(pair[0])?;
            let value = match pair.get(1).copied() {
                None | Some("-") => None,
                Some(s) => s.chars().next(),
            };
            Ok(CharEdit { position, value })
        })
        .collect()
}

fn render(session: &Session) {
    let shown: String = session.reveal_state().iter().map(|c| c.unwrap_or('_')).collect();
    let marks: String = session
        .live_feedback()
        .iter()
        .zip(session.reveal_state())
        .map(|(f, c)| match (f, c) {
            (_, Some(' ')) => ' ',
            (Feedback::Correct, _) => 'O',
            (Feedback::Incorrect, _) => 'X',
            (Feedback::Neutral, _) => '.',
        })
        .collect();

    println!("{shown}");
    println!("{marks}");
    for (i, clue) in session.clues().iter().enumerate() {
        let state = if clue.solved { clue.clue_word.as_str() } else { "?" };
        println!("  {}. {} ({}글자) {}", i + 1, clue.meaning, clue.clue_word.chars().count(), state);
    }
    println!("진행 {:.0}% · 남은 힌트 {}", session.progress(), session.hints_remaining());
}
