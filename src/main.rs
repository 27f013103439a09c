use std::{error::Error, fs, path::PathBuf, process::ExitCode, time::Duration};
use clap::{Parser, Subcommand};
use tokio_stream::StreamExt;

use crossword_synth::{
    document::CrosswordDocument,
    generator::{CrosswordGenerator, CrosswordGeneratorSettings},
    grid::Grid,
    numbering::Numbering,
    suggestion::{Pattern, SuggestionRequest, SuggestionStream, WordListSource},
    word::Direction,
};

const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Crossword layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli
{
    /// Log every layout attempt
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command
{
    /// Lay out words on a grid
    Generate
    {
        /// The words to place
        #[arg(required = true)]
        words: Vec<String>,

        #[arg(long, default_value_t = 15)]
        width: usize,

        #[arg(long, default_value_t = 15)]
        height: usize,

        /// JSON file with generator settings
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Seed for the random word orders (overrides the settings file)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the layout as JSON instead of a grid
        #[arg(long)]
        json: bool,

        /// Save the crossword document to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a saved crossword document
    Show
    {
        path: PathBuf,
    },
    /// Suggest words for a pattern such as "C?T" from a word list file (one word per line)
    Suggest
    {
        pattern: String,

        #[arg(long)]
        dict: PathBuf,
    },
}

fn main() -> ExitCode
{
    let cli = Cli::parse();
    crossword_synth::logging::init_logger(cli.debug);

    match try_main(cli)
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) =>
        {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn Error>>
{
    match cli.command
    {
        Command::Generate { words, width, height, settings, seed, json, output } =>
        {
            let mut settings: CrosswordGeneratorSettings = match settings
            {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => CrosswordGeneratorSettings::default(),
            };
            if seed.is_some() { settings.seed = seed; }

            let layout = CrosswordGenerator::new(settings).generate(&words, width, height)?;

            if json
            {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            }
            else
            {
                print_crossword(&layout.grid, &layout.numbering(), |w| w.to_owned());
                if !layout.unplaced_words.is_empty()
                {
                    println!("\nCould not place: {}", layout.unplaced_words.join(", "));
                }
            }

            if let Some(path) = output
            {
                CrosswordDocument::from_layout(&layout, &words).save(&path)?;
                log::info!("saved to {}", path.display());
            }
        }
        Command::Show { path } =>
        {
            let doc = CrosswordDocument::load(&path)?;
            let (grid, _) = doc.reconstruct()?.into_parts();
            print_crossword(&grid, &Numbering::generate(&grid), |w| doc.display_form(w).to_owned());
        }
        Command::Suggest { pattern, dict } =>
        {
            let pattern = Pattern::parse(&pattern)?;
            let source = WordListSource::new(fs::read_to_string(dict)?.lines());

            let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
            let answer = runtime.block_on(async move
            {
                let mut stream = SuggestionStream::new(source, SUGGESTION_DEBOUNCE);
                stream.request_suggestions(SuggestionRequest::Lookup(pattern)).await;
                stream.request_suggestions(SuggestionRequest::Stop).await;
                stream.next().await
            });

            for word in answer.map(|a| a.words).unwrap_or_default()
            {
                println!("{word}");
            }
        }
    }
    Ok(())
}

fn print_crossword(grid: &Grid, numbering: &Numbering, display: impl Fn(&str) -> String)
{
    print!("{grid}");
    for direction in [Direction::Across, Direction::Down]
    {
        println!("\n{}", direction.to_string().to_uppercase());
        for entry in numbering.entries(direction)
        {
            println!("{:>3}. {}", entry.number, display(&entry.word));
        }
    }
}
