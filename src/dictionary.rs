//! # Dictionary
//!
//! Herein is support for dictionary construction and lookup. All runtime
//! operations are performed against a [`DictionaryIndex`], an immutable index
//! over a word list that answers membership, prefix, length, and letter
//! queries. Only uppercase ASCII words of [`MIN_WORD_LENGTH`] to
//! [`MAX_WORD_LENGTH`] letters are indexed.

use std::{
	fs::File,
	io::{self, BufRead, BufReader, ErrorKind, Read, Write},
	path::Path
};

use log::{trace, warn};
use pfx::PrefixTreeSet;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                 Constants.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The length of the shortest formable word.
pub const MIN_WORD_LENGTH: usize = 3;

/// The length of the longest formable word.
pub const MAX_WORD_LENGTH: usize = 9;

/// The words used when no real word list can be loaded. Small, but enough to
/// keep the game playable.
const EMERGENCY_WORDS: &[&str] = &[
	"ACE", "ACT", "AID", "AIR", "ANT", "APE", "ARE", "ART", "ATE", "EAR",
	"EAT", "END", "ERA", "ICE", "ION", "NET", "NOT", "NUT", "OAR", "ODE",
	"ONE", "ORE", "OUR", "RAN", "RAT", "RED", "ROD", "RUN", "SAT", "SEA",
	"SET", "SIT", "SON", "SUN", "TAN", "TEA", "TEN", "TIE", "TIN", "TOE",
	"TON", "URN", "DATE", "DEAR", "DIET", "DOTE", "EARN", "EAST", "EDIT",
	"NEAR", "NOTE", "RATE", "READ", "REST", "RIDE", "ROAD", "ROTE", "SAND",
	"SEAT", "SNOT", "STAR", "TEAR", "TIDE", "TONE", "TRIO", "UNIT", "ALERT",
	"ASTER", "CRATE", "DINER", "IRATE", "NOTED", "RAISE", "RATED", "REACT",
	"STARE", "STONE", "TRADE", "TREAD", "TRAIN", "ORATE", "ROUTE", "SAINT",
	"STAIN", "TENOR", "TONER", "UNITE", "DETOUR", "ROUTED", "SENIOR",
	"STRAND", "TRAINED", "STRAINED", "ROTATED", "STATIONED"
];

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// An immutable index over a word list. Membership and prefix queries go
/// through a [`PrefixTreeSet`]; the length and letter buckets hold positions
/// into the sorted word list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct DictionaryIndex
{
	/// The words, as a prefix tree.
	tree: PrefixTreeSet<String>,

	/// The words, sorted and de-duplicated.
	words: Vec<String>,

	/// The positions of the words of each length, indexed by length.
	by_length: Vec<Vec<u32>>,

	/// The positions of the words containing each letter at least once,
	/// indexed by `letter - 'A'`.
	by_letter: Vec<Vec<u32>>
}

impl DictionaryIndex
{
	/// Construct an empty index. Same as [`Default::default`].
	///
	/// # Returns
	///
	/// An empty index.
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Build an index over the given words. Each word is trimmed and
	/// uppercased; words that are not purely ASCII letters, or whose length
	/// falls outside [`MIN_WORD_LENGTH`]..=[`MAX_WORD_LENGTH`], are skipped.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the index.
	///
	/// # Returns
	///
	/// The index.
	pub fn from_words<I, T>(words: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: AsRef<str>
	{
		let mut list = words.into_iter()
			.filter_map(|w| normalize(w.as_ref()))
			.collect::<Vec<_>>();
		list.sort_unstable();
		list.dedup();
		let mut tree = PrefixTreeSet::default();
		let mut by_length = vec![Vec::new(); MAX_WORD_LENGTH + 1];
		let mut by_letter = vec![Vec::new(); 26];
		for (position, word) in list.iter().enumerate()
		{
			let position = position as u32;
			tree.insert(word.clone());
			by_length[word.len()].push(position);
			let mut seen = [false; 26];
			for b in word.bytes()
			{
				let letter = (b - b'A') as usize;
				if !seen[letter]
				{
					seen[letter] = true;
					by_letter[letter].push(position);
				}
			}
		}
		trace!("Indexed {} words", list.len());
		Self { tree, words: list, by_length, by_letter }
	}

	/// Build an index over the embedded emergency word list.
	///
	/// # Returns
	///
	/// A small but usable index.
	pub fn emergency() -> Self
	{
		Self::from_words(EMERGENCY_WORDS.iter())
	}

	/// Check if the index is empty.
	///
	/// # Returns
	///
	/// `true` if the index is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.words.is_empty() }

	/// Get the number of indexed words.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.words.len() }

	/// Get every indexed word, in sorted order.
	#[inline]
	#[must_use]
	pub fn words(&self) -> &[String] { &self.words }

	/// Check if the index contains the given word. Case is ignored.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the index contains the word, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		self.tree.contains(word.to_ascii_uppercase().as_str())
	}

	/// Check if the index contains a word with the given prefix. Case is
	/// ignored.
	///
	/// # Arguments
	///
	/// * `prefix` - The prefix to check.
	///
	/// # Returns
	///
	/// `true` if the index contains a word with the given prefix, `false`
	/// otherwise.
	#[inline]
	#[must_use]
	pub fn contains_prefix(&self, prefix: &str) -> bool
	{
		self.tree.contains_prefix(prefix.to_ascii_uppercase().as_str())
	}

	/// Get the words of the given length. The iterator is empty for lengths
	/// that are never indexed.
	///
	/// # Arguments
	///
	/// * `length` - The word length.
	///
	/// # Returns
	///
	/// An iterator over the words of the given length, in sorted order.
	pub fn words_of_length(&self, length: usize) -> impl Iterator<Item = &str> + '_
	{
		self.by_length.get(length)
			.map(Vec::as_slice)
			.unwrap_or(&[])
			.iter()
			.map(move |&p| self.words[p as usize].as_str())
	}

	/// Get the words that contain the given letter at least once. Case is
	/// ignored; non-letters yield nothing.
	///
	/// # Arguments
	///
	/// * `letter` - The letter.
	///
	/// # Returns
	///
	/// An iterator over the words containing the letter, in sorted order.
	pub fn words_containing(&self, letter: char) -> impl Iterator<Item = &str> + '_
	{
		let letter = letter.to_ascii_uppercase();
		let bucket: &[u32] =
			if letter.is_ascii_uppercase()
			{
				self.by_letter.get((letter as u8 - b'A') as usize)
					.map(Vec::as_slice)
					.unwrap_or(&[])
			}
			else
			{
				&[]
			};
		bucket.iter().map(move |&p| self.words[p as usize].as_str())
	}

	/// Open a dictionary with the given name, falling back to the
	/// [emergency](Self::emergency) word list if the dictionary cannot be
	/// read or turns out to be empty. Never fails.
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the dictionary file.
	///
	/// # Returns
	///
	/// The index.
	pub fn load<T: AsRef<Path>>(dir: T, name: &str) -> Self
	{
		match Self::open(&dir, name)
		{
			Ok(index) if !index.is_empty() => index,
			Ok(_) =>
			{
				warn!(
					"Dictionary is empty: {}/{}; using emergency word list",
					dir.as_ref().display(),
					name
				);
				Self::emergency()
			},
			Err(e) =>
			{
				warn!(
					"Failed to open dictionary: {}/{}: {}; using emergency word list",
					dir.as_ref().display(),
					name,
					e
				);
				Self::emergency()
			}
		}
	}

	/// Open a dictionary with the given name. Only the specified directory will
	/// be searched. `name` denotes the dictionary file, sans the extension. If
	/// a binary index (`<name>.dict`) exists _and_ is newer than the text file
	/// (`<name>.txt`), it will be read; otherwise, the text file will be read
	/// and a binary index will be created (to optimize future reads).
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the dictionary file.
	///
	/// # Returns
	///
	/// An index over the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn open<T: AsRef<Path>>(dir: T, name: &str) -> Result<Self, io::Error>
	{
		let dict_path = dir.as_ref().join(format!("{}.dict", name));
		let txt_path = dir.as_ref().join(format!("{}.txt", name));
		// Use the binary index only if it's newer than the text file. Any
		// failure to read either timestamp, including the absence of the
		// binary index, sends us back to the text file.
		let binary_is_fresh = dict_path
			.metadata()
			.and_then(|m| m.modified())
			.and_then(|dict_time| {
				txt_path
					.metadata()
					.and_then(|n| n.modified())
					.map(|txt_time| dict_time > txt_time)
			})
			.unwrap_or(false);
		if binary_is_fresh
		{
			match Self::deserialize_from_file(&dict_path)
			{
				Ok(index) =>
				{
					trace!("Read binary dictionary: {}", dict_path.display());
					return Ok(index)
				},
				Err(e) => warn!(
					"Ignoring unreadable binary dictionary: {}: {}",
					dict_path.display(),
					e
				)
			}
		}
		let index = Self::read_from_file(&txt_path)?;
		trace!("Read text dictionary: {}", txt_path.display());
		match index.serialize_to_file(&dict_path)
		{
			Ok(_) =>
			{
				trace!("Wrote binary dictionary: {}", dict_path.display())
			},
			Err(e) => warn!(
				"Failed to write binary dictionary: {}: {}",
				dict_path.display(),
				e
			)
		}
		Ok(index)
	}

	/// Construct an index from the contents of the given file. Each line in
	/// the file is considered a single word.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// An index over the words from the file.
	///
	/// # Errors
	///
	/// If the file cannot be opened or read, an error is returned.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let words = reader.lines().collect::<Result<Vec<_>, _>>()?;
		Ok(Self::from_words(&words))
	}

	/// Deserialize an index from the given file. The file must contain a
	/// serialized index in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// An index deserialized from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		let index = bincode::deserialize(&content)
			.map_err(|_e| ErrorKind::InvalidData)?;
		Ok(index)
	}

	/// Serialize the index to the given file. The index is serialized in
	/// [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or written, an error is returned.
	/// * If the index cannot be encoded, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let mut file = File::create(path)?;
		let content =
			bincode::serialize(self).map_err(|_e| ErrorKind::InvalidData)?;
		file.write_all(&content)?;
		Ok(())
	}
}

/// Normalize a raw word list entry.
///
/// # Arguments
///
/// * `raw` - The raw entry.
///
/// # Returns
///
/// The uppercased word, or `None` if the entry is not an indexable word.
#[must_use]
fn normalize(raw: &str) -> Option<String>
{
	let word = raw.trim();
	if (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.len())
		&& word.bytes().all(|b| b.is_ascii_alphabetic())
	{
		Some(word.to_ascii_uppercase())
	}
	else
	{
		None
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
