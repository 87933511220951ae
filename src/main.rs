//! # Wordbloom
//!
//! Wordbloom is a word puzzle played on a flower of 19 lettered tiles: one
//! center tile, an inner ring of 6, and an outer ring of 12. Words are spelled
//! by tracing chains of adjacent tiles through the center.
//!
//! Via command line options, the user can specify the dictionary to use. The
//! subcommands generate puzzles, list their words, check candidate words, or
//! open a text-based user interface (TUI) for playing.

mod app;
mod tui;

use std::{error::Error, rc::Rc};

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info, trace};

use app::App;
use tui::tui;
use wordbloom::{
	arrangement::Arrangement,
	dictionary::DictionaryIndex,
	generator::{Difficulty, Generator},
	path::find_formable_words,
	round::Round
};

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for generating and playing Wordbloom puzzles.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0", author = "Todd L Smith")]
struct Opts
{
	/// The path to the directory containing the dictionary files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the dictionary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "english")]
	dictionary: String,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just build the binary dictionary and exit.
	Index,

	/// Generate puzzles and print them with their word counts.
	Generate {
		/// The difficulty: easy, medium, or hard.
		#[arg(short = 'l', long, default_value = "easy")]
		level: Difficulty,

		/// The seed for reproducible generation.
		#[arg(short = 's', long)]
		seed: Option<u64>,

		/// How many puzzles to generate.
		#[arg(short = 'c', long, default_value = "1")]
		count: u64
	},

	/// Print every word that can be formed on a puzzle, given as
	/// `C/IIIIII/OOOOOOOOOOOO`.
	Solve {
		/// The puzzle.
		arrangement: Arrangement
	},

	/// Judge words against a puzzle, printing a verdict and a path for each.
	Check {
		/// The puzzle.
		arrangement: Arrangement,

		/// The words to judge.
		#[arg(required = true)]
		words: Vec<String>
	},

	/// Open the text-based user interface (TUI) for playing a puzzle. The
	/// words found will be written to standard output.
	Play {
		/// The difficulty of a generated puzzle.
		#[arg(short = 'l', long, default_value = "easy")]
		level: Difficulty,

		/// The seed for reproducible generation.
		#[arg(short = 's', long)]
		seed: Option<u64>,

		/// Play this puzzle instead of generating one.
		#[arg(short = 'a', long)]
		arrangement: Option<Arrangement>,

		/// Suppress emission of the words found to standard output.
		#[arg(short = 'q', long)]
		quiet: bool
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
///
/// # Errors
///
/// Any error that occurs while indexing the dictionary or driving the TUI.
fn main() -> Result<(), Box<dyn Error>>
{
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Building the binary dictionary must succeed; everything else can make
	// do with the emergency word list.
	if let Command::Index = opts.command
	{
		let dictionary =
			DictionaryIndex::open(&opts.directory, &opts.dictionary)?;
		info!("Indexed {} words", dictionary.len());
		trace!("Exiting after building binary dictionary");
		return Ok(())
	}
	let dictionary = DictionaryIndex::load(&opts.directory, &opts.dictionary);

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Index => {},
		Command::Generate { level, seed, count } =>
		{
			for i in 0 .. count
			{
				let mut generator = match seed
				{
					Some(seed) => Generator::seeded(
						&dictionary,
						level,
						seed.wrapping_add(i)
					),
					None => Generator::new(&dictionary, level)
				};
				let generated = generator.generate_report();
				println!(
					"{}\t{}\t{}",
					generated.arrangement,
					generated.score.words,
					generated.provenance
				);
			}
		},
		Command::Solve { arrangement } =>
		{
			print_words(find_formable_words(&dictionary, &arrangement));
		},
		Command::Check { arrangement, words } =>
		{
			let mut round = Round::new(Rc::new(dictionary), arrangement);
			for word in words
			{
				match round.submit_word(&word)
				{
					Ok(found) => println!("{}\t{}", found.word, found.path),
					Err(rejection) => println!(
						"{}\t{}",
						word.to_ascii_uppercase(),
						rejection
					)
				}
			}
		},
		Command::Play { level, seed, arrangement, quiet } =>
		{
			let arrangement = arrangement.unwrap_or_else(|| match seed
			{
				Some(seed) =>
					Generator::seeded(&dictionary, level, seed).generate(),
				None => Generator::new(&dictionary, level).generate()
			});
			trace!("Opening TUI");
			let round = Round::new(Rc::new(dictionary), arrangement);
			let found = tui(|terminal| App::new(round).run(terminal))?;
			if !quiet
			{
				print_words(found);
			}
		}
	}
	Ok(())
}

/// Print words to standard output, one per line.
///
/// # Arguments
///
/// * `words` - The words to print.
fn print_words<I: IntoIterator<Item = String>>(words: I)
{
	for word in words
	{
		println!("{}", word);
	}
}
