//! Terminal front end for Cosmic Odyssey.
//!
//! Runs the personality quiz, creates a character, then plays the reference
//! adventure with real reveal delays. Selections come from the command line
//! so a whole run can be scripted.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin odyssey -- --answers 3,0,1,2 --choices 1,0,0,0,1 --seed 42
//! # replay with a featured character and an active artifact:
//! cargo run --bin odyssey -- --play-as Zortblob --activate 0 --skip-quiz
//! ```

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cosmic_rules::{Catalog, Character, Roster, StatType};
use narrative_core::{
    AdventureSession, AnswerOutcome, ChoiceOutcome, NarrativeError, NarrativeEvent, QuizSession,
    SessionConfig, SessionError, Story,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Quiz answers, one option index per question. Missing answers pick 0.
    #[arg(long, value_delimiter = ',')]
    answers: Vec<usize>,

    /// Adventure choices, one option index per step. Missing choices pick 0.
    #[arg(long, value_delimiter = ',')]
    choices: Vec<usize>,

    /// Artifact slots to activate before the adventure starts.
    #[arg(long, value_delimiter = ',')]
    activate: Vec<usize>,

    /// Play as a character from the roster instead of the new one.
    #[arg(long)]
    play_as: Option<String>,

    /// Skip the quiz. Requires --play-as.
    #[arg(long)]
    skip_quiz: bool,

    /// Seed for name, class and portrait selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Session config TOML (reveal delays).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog TOML (questions, artifacts, names, featured characters).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Story TOML.
    #[arg(long)]
    story: Option<PathBuf>,

    /// Print the final character as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::reference()?,
    };
    let story = match &args.story {
        Some(path) => Story::load(path, &catalog)
            .with_context(|| format!("loading story {}", path.display()))?,
        None => Story::reference(&catalog)?,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut roster = Roster::with_characters(catalog.featured().iter().cloned());

    if !args.skip_quiz {
        let character = run_quiz(&args, &catalog, config, &mut rng).await?;
        roster.add_character(character);
    } else if args.play_as.is_none() {
        return Err(anyhow!("--skip-quiz needs --play-as"));
    }

    let player = match &args.play_as {
        Some(name) => roster.find_by_name(name).cloned(),
        None => roster.latest(1).first().map(|c| (*c).clone()),
    };

    let mut builder = AdventureSession::builder()
        .with_story(story)
        .with_config(config);
    if let Some(character) = player {
        builder = builder.with_character(character);
    }
    let mut session = builder
        .build()
        .context("no character to adventure with; create one with the quiz")?;

    run_adventure(&args, &mut session).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.character())?);
    }

    let character = session.end();
    roster.add_character(character);

    println!("\nLatest travellers:");
    for character in roster.latest(3) {
        println!("  {} the {}", character.name(), character.class());
    }

    Ok(())
}

async fn run_quiz(
    args: &Args,
    catalog: &Catalog,
    config: SessionConfig,
    rng: &mut StdRng,
) -> Result<Character> {
    let mut quiz = QuizSession::new(catalog.questions().to_vec(), config);
    let mut index = 0;

    while let Some(question) = quiz.current_question() {
        println!("\n{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  [{}] {}", i, option.label);
        }

        let choice = args.answers.get(index).copied().unwrap_or(0);
        let outcome = answer_or_first(&mut quiz, choice)
            .with_context(|| format!("answer {}", index))?;
        println!("> {}", outcome.feedback);
        print_notices(quiz.drain_events());

        quiz.reveal_elapsed().await?;
        index += 1;
    }

    let character = quiz.create_character(catalog.generator(), rng)?;
    print_notices(quiz.drain_events());
    print_character(&character);
    Ok(character)
}

async fn run_adventure(args: &Args, session: &mut AdventureSession) -> Result<()> {
    for &slot in &args.activate {
        if let Err(e) = session.toggle_artifact(slot) {
            tracing::warn!(slot, error = %e, "Could not toggle artifact");
        }
    }
    print_notices(session.drain_events());

    println!("\n== {} ==", session.story().title());
    let mut turn = 0;

    while !session.is_complete() {
        if let Some(text) = session.current_narrative_text() {
            println!("\n{}", text);
        }
        if let Some(step) = session.current_step() {
            for (i, option) in step.options.iter().enumerate() {
                match &option.icon {
                    Some(icon) => println!("  [{}] {} {}", i, icon, option.label),
                    None => println!("  [{}] {}", i, option.label),
                }
            }
        }

        let choice = args.choices.get(turn).copied().unwrap_or(0);
        let outcome = choose_or_first(session, choice)?;
        println!("> {}", outcome.outcome_text);
        print_notices(session.drain_events());

        session.reveal_elapsed().await?;
        print_notices(session.drain_events());
        turn += 1;
    }

    session.mint_request()?;
    print_notices(session.drain_events());
    print_character(session.character());
    Ok(())
}

/// Answer with `choice`, taking the first option when it is out of range.
fn answer_or_first(quiz: &mut QuizSession, choice: usize) -> Result<AnswerOutcome, SessionError> {
    match quiz.answer(choice) {
        Err(SessionError::Narrative(NarrativeError::OutOfRangeSelection { .. })) => {
            tracing::warn!(choice, "Answer out of range, taking the first option");
            quiz.answer(0)
        }
        other => other,
    }
}

/// Choose `choice`, taking the first option when it is out of range.
fn choose_or_first(
    session: &mut AdventureSession,
    choice: usize,
) -> Result<ChoiceOutcome, SessionError> {
    match session.choose(choice) {
        Err(SessionError::Narrative(NarrativeError::OutOfRangeSelection { .. })) => {
            tracing::warn!(choice, "Choice out of range, taking the first option");
            session.choose(0)
        }
        other => other,
    }
}

fn print_notices(events: Vec<NarrativeEvent>) {
    for notice in events.iter().filter_map(NarrativeEvent::notice) {
        println!("* {}", notice);
    }
}

fn print_character(character: &Character) {
    println!("\n{} the {}", character.name(), character.class());
    for stat in StatType::ALL {
        let bonus = character.effective_bonus(stat);
        let level = character.stats().level(stat);
        if bonus > 0 {
            println!(
                "  {:<22} {:>3} (+{}) lvl {}",
                stat.label(),
                character.stats().get(stat),
                bonus,
                level
            );
        } else {
            println!("  {:<22} {:>3} lvl {}", stat.label(), character.stats().get(stat), level);
        }
    }
    for (slot, artifact) in character.artifacts().occupied() {
        let state = if artifact.is_active { "active" } else { "idle" };
        println!("  slot {}: {} ({})", slot, artifact.name, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmic_rules::StatVector;

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_answer_takes_first_option() {
        let catalog = Catalog::reference().expect("reference catalog is valid");
        let mut quiz = QuizSession::new(catalog.questions().to_vec(), SessionConfig::default());

        let outcome = answer_or_first(&mut quiz, 9).expect("falls back to option 0");

        assert_eq!(outcome.option, 0);
        assert_eq!(quiz.runner().answers(), &[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_choice_takes_first_option() {
        let catalog = Catalog::reference().expect("reference catalog is valid");
        let story = Story::reference(&catalog).expect("reference story is valid");
        let mut session = AdventureSession::builder()
            .with_character(Character::new(StatVector::baseline(), "Zimplex", "Comet Dancer", "img"))
            .with_story(story)
            .build()
            .expect("session builds");

        let outcome = choose_or_first(&mut session, 9).expect("falls back to option 0");

        assert_eq!(outcome.option, 0);
        assert!(session.is_revealing());
    }
}
