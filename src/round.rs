//! # Round
//!
//! A round is one play session over a single [`Arrangement`]: the live
//! [`Selection`], the words found so far, and the verdicts on each submitted
//! word. A rejected submission is an ordinary outcome, classified so that the
//! front end can tell the player why.

use std::{
	collections::BTreeSet,
	fmt::{self, Display, Formatter},
	rc::Rc
};

use log::{debug, info};

use crate::{
	arrangement::Arrangement,
	dictionary::{DictionaryIndex, MIN_WORD_LENGTH},
	path::{find_formable_words, find_path, Path},
	selection::{Pick, Selection},
	tile::Tile
};

////////////////////////////////////////////////////////////////////////////////
//                                   Round.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The state of a single play session.
#[derive(Clone, Debug)]
#[must_use]
pub struct Round
{
	/// The dictionary against which words are judged.
	dictionary: Rc<DictionaryIndex>,

	/// The letters of the puzzle.
	arrangement: Arrangement,

	/// The selection in progress.
	selection: Selection,

	/// The words found so far, in order of discovery.
	found: Vec<String>,

	/// Every word that can be found.
	formable: BTreeSet<String>
}

impl Round
{
	/// Start a round over the given arrangement.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary against which words are judged.
	/// * `arrangement` - The letters of the puzzle.
	///
	/// # Returns
	///
	/// A round with nothing found yet.
	pub fn new(dictionary: Rc<DictionaryIndex>, arrangement: Arrangement) -> Self
	{
		let formable = find_formable_words(&dictionary, &arrangement);
		info!("Round {}: {} formable words", arrangement, formable.len());
		Self
		{
			dictionary,
			arrangement,
			selection: Selection::new(),
			found: Vec::new(),
			formable
		}
	}

	/// Get the letters of the puzzle.
	#[inline]
	pub fn arrangement(&self) -> &Arrangement { &self.arrangement }

	/// Get the selection in progress.
	#[inline]
	pub fn selection(&self) -> &Selection { &self.selection }

	/// Get the words found so far, in order of discovery.
	#[inline]
	#[must_use]
	pub fn found(&self) -> &[String] { &self.found }

	/// Get every word that can be found.
	#[inline]
	#[must_use]
	pub fn formable(&self) -> &BTreeSet<String> { &self.formable }

	/// Get the number of words that can be found.
	#[inline]
	#[must_use]
	pub fn formable_count(&self) -> usize { self.formable.len() }

	/// Check if every formable word has been found.
	#[inline]
	#[must_use]
	pub fn is_complete(&self) -> bool
	{
		self.found.len() >= self.formable.len()
	}

	/// Check if the selection in progress could still grow into a dictionary
	/// word. An empty selection is always promising.
	#[must_use]
	pub fn is_promising(&self) -> bool
	{
		self.selection.is_empty()
			|| self.dictionary.contains_prefix(self.selection.word())
	}

	/// Attempt to extend the selection by one tile.
	///
	/// # Arguments
	///
	/// * `tile` - The tile to pick.
	///
	/// # Returns
	///
	/// Whether the pick was accepted and, if not, why.
	pub fn pick(&mut self, tile: Tile) -> Pick
	{
		self.selection.pick(tile, &self.arrangement)
	}

	/// Abandon the selection in progress.
	#[inline]
	pub fn cancel(&mut self) { self.selection.reset(); }

	/// Submit the selection in progress. The selection is emptied whatever
	/// the verdict. The word is judged exactly as by
	/// [`submit_word`](Self::submit_word). If it is accepted and the picked
	/// tiles themselves form a valid path, that path is reported; otherwise
	/// the reported path is one found by search, which may differ from the
	/// tiles picked.
	///
	/// # Returns
	///
	/// The accepted word and its path.
	///
	/// # Errors
	///
	/// The reason the word was rejected.
	pub fn submit(&mut self) -> Result<Found, Rejection>
	{
		let (word, tiles) = self.selection.take();
		let picked = Path::new(tiles);
		debug!("submitted {} via {}", word, picked);
		self.submit_word(&word).map(|found|
			if picked.is_witness() { Found { path: picked, ..found } }
			else { found }
		)
	}

	/// Submit a word given as text. Case is ignored. Verdicts are checked in
	/// this order: length, center letter, repetition, dictionary membership,
	/// and finally traceability.
	///
	/// # Arguments
	///
	/// * `word` - The word.
	///
	/// # Returns
	///
	/// The accepted word and its path.
	///
	/// # Errors
	///
	/// The reason the word was rejected.
	pub fn submit_word(&mut self, word: &str) -> Result<Found, Rejection>
	{
		let word = word.trim().to_ascii_uppercase();
		let verdict = self.judge(&word);
		match verdict
		{
			Ok(ref found) =>
			{
				info!("found {}", found.word);
				self.found.push(found.word.clone());
			},
			Err(rejection) => debug!("rejected {}: {}", word, rejection)
		}
		verdict
	}

	/// Judge a word without recording it.
	///
	/// # Arguments
	///
	/// * `word` - The word, in uppercase.
	///
	/// # Returns
	///
	/// The accepted word and its path.
	///
	/// # Errors
	///
	/// The reason the word would be rejected.
	fn judge(&self, word: &str) -> Result<Found, Rejection>
	{
		if word.chars().count() < MIN_WORD_LENGTH
		{
			return Err(Rejection::TooShort)
		}
		if !word.contains(self.arrangement.center())
		{
			return Err(Rejection::MissingCenterLetter)
		}
		if self.found.iter().any(|w| w == word)
		{
			return Err(Rejection::Duplicate)
		}
		if !self.dictionary.contains(word)
		{
			return Err(Rejection::NotInDictionary)
		}
		match find_path(word, &self.arrangement)
		{
			Some(path) => Ok(Found { word: word.to_string(), path }),
			None => Err(Rejection::NoValidPath)
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Verdicts.                                 //
////////////////////////////////////////////////////////////////////////////////

/// An accepted word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Found
{
	/// The word, in uppercase.
	pub word: String,

	/// A path that spells the word.
	pub path: Path
}

/// The reasons for rejecting a submitted word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection
{
	/// The word is shorter than the shortest formable word.
	TooShort,

	/// The word lacks the letter of the center tile.
	MissingCenterLetter,

	/// The word was already found.
	Duplicate,

	/// The word is not in the dictionary.
	NotInDictionary,

	/// The word cannot be traced across the tiles.
	NoValidPath
}

impl Display for Rejection
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::TooShort => write!(f, "too short"),
			Self::MissingCenterLetter => write!(f, "missing the center letter"),
			Self::Duplicate => write!(f, "already found"),
			Self::NotInDictionary => write!(f, "not in the dictionary"),
			Self::NoValidPath => write!(f, "cannot be traced")
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
