use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use repaso::catalog::Catalog;
use repaso::progress::ProgressStorage;
use repaso::scheduler::Grade;
use repaso::session::{collect_stats, full_reset, StudySession};

#[derive(Parser)]
#[command(name = "repaso", about = "Spanish vocabulary flashcards", version)]
struct Cli {
    /// Catalog source: a words.json path or an http(s) URL
    #[arg(long, global = true, default_value = "words.json")]
    catalog: String,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Study a session of due words (mixed practice when nothing is due)
    Study {
        /// Maximum words in the session
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show progress statistics
    Stats,

    /// Show due and new counts without starting a session
    Due,

    /// Erase all progress and start over
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => ProgressStorage::default_data_dir()?,
    };
    let storage = ProgressStorage::new(data_dir);
    storage.init()?;

    let catalog = load_catalog(&cli.catalog)?;
    if catalog.is_empty() {
        bail!("catalog {} contains no words", cli.catalog);
    }

    match cli.command {
        Command::Study { limit } => run_study(&catalog, &storage, limit),
        Command::Stats => {
            let stats = collect_stats(&catalog, &storage)?;
            println!("Words:     {}", stats.total_words);
            println!("Due:       {}", stats.due_count);
            println!("New:       {}", stats.new_count);
            println!("Reviews:   {}", stats.total_reviews);
            println!("Accuracy:  {:.1}%", stats.accuracy_pct);
            println!("Learned:   {}", stats.learned_count);
            println!("Streak:    {} day(s)", stats.streak);
            Ok(())
        }
        Command::Due => {
            let stats = collect_stats(&catalog, &storage)?;
            println!("{} due, {} new", stats.due_count, stats.new_count);
            Ok(())
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to erase progress without --yes");
            }
            full_reset(&catalog, &storage)?;
            println!("Progress reset for {} words.", catalog.len());
            Ok(())
        }
    }
}

fn load_catalog(source: &str) -> anyhow::Result<Catalog> {
    let catalog = if source.starts_with("http://") || source.starts_with("https://") {
        Catalog::load_url(source)
    } else {
        Catalog::load_file(&PathBuf::from(source))
    };
    catalog.with_context(|| format!("failed to load catalog from {}", source))
}

fn run_study(catalog: &Catalog, storage: &ProgressStorage, limit: usize) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let mut session = StudySession::start(catalog, storage, limit, &mut rng)?;

    if session.queue().is_empty() {
        println!("Nothing to study.");
        return Ok(());
    }
    if session.queue().mixed {
        println!(
            "Nothing is due right now — studying a mixed set of {} words.",
            session.queue().len()
        );
    } else {
        println!("{} words due.", session.queue().len());
    }
    println!("[enter] flip  [a]gain [h]ard [g]ood [e]asy  [s]kip  [q]uit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Some(entry) = session.current_entry().cloned() {
        let left = session.queue().remaining();
        print!("({left} left) {} [{}] > ", entry.spanish, entry.part_of_speech.as_str());
        io::stdout().flush()?;

        let mut flipped = false;
        let graded = loop {
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };
            match line.trim() {
                "" if !flipped => {
                    flipped = true;
                    print!("  = {} > ", entry.english);
                    io::stdout().flush()?;
                }
                "a" => break Some(Grade::Again),
                "h" => break Some(Grade::Hard),
                "g" => break Some(Grade::Good),
                "e" => break Some(Grade::Easy),
                "s" => break None,
                "q" => {
                    println!("Hasta luego.");
                    return Ok(());
                }
                _ => {
                    print!("  a/h/g/e, s to skip, q to quit > ");
                    io::stdout().flush()?;
                }
            }
        };

        match graded {
            Some(grade) => {
                session.grade_current(grade)?;
            }
            None => session.skip(),
        }
    }

    let stats = collect_stats(catalog, storage)?;
    println!(
        "\nSession done. {} still due. Streak: {} day(s).",
        stats.due_count, stats.streak
    );
    Ok(())
}
