//! # Paths
//!
//! Herein is the path validator, which decides whether a word can be traced
//! across an [`Arrangement`] as a chain of adjacent tiles. A word is traced by
//! exhaustive depth-first search over the adjacency graph, so every candidate
//! path is eventually considered; the search space is tiny (at most 19 tiles
//! and 9 letters), so correctness wins over cleverness.
//!
//! Every accepted path must pass through the center tile. Words longer than
//! [`LONG_WORD_LENGTH`] must also enter and leave the center through the inner
//! ring whenever the center is not an endpoint of the path.

use std::{
	collections::BTreeSet,
	fmt::{self, Display, Formatter}
};

use log::{debug, trace};
use rayon::prelude::*;

use crate::{
	arrangement::{can_supply_from, Arrangement},
	dictionary::{DictionaryIndex, MAX_WORD_LENGTH, MIN_WORD_LENGTH},
	tile::{is_adjacent, Tier, Tile, TILE_COUNT}
};

/// Words longer than this are subject to the stricter center check.
pub const LONG_WORD_LENGTH: usize = 6;

////////////////////////////////////////////////////////////////////////////////
//                                   Paths.                                   //
////////////////////////////////////////////////////////////////////////////////

/// An ordered sequence of tiles that spells a word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[must_use]
pub struct Path(Vec<Tile>);

impl Path
{
	/// Construct a path from its tiles. No validation is performed; see
	/// [`is_chain`](Self::is_chain).
	///
	/// # Arguments
	///
	/// * `tiles` - The tiles, in order.
	///
	/// # Returns
	///
	/// The path.
	#[inline]
	pub fn new(tiles: Vec<Tile>) -> Self { Self(tiles) }

	/// Get the tiles of the path, in order.
	#[inline]
	#[must_use]
	pub fn tiles(&self) -> &[Tile] { &self.0 }

	/// Get the number of tiles in the path.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	/// Check if the path is empty.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// Check if the path passes through the center tile.
	#[inline]
	#[must_use]
	pub fn includes_center(&self) -> bool { self.0.contains(&Tile::Center) }

	/// Check if the path is a proper chain: non-empty, every consecutive pair
	/// of tiles adjacent, and no tile visited twice.
	///
	/// # Returns
	///
	/// `true` if the path is a chain, `false` otherwise.
	#[must_use]
	pub fn is_chain(&self) -> bool
	{
		let mut seen = [false; TILE_COUNT];
		for tile in self.0.iter()
		{
			if seen[tile.index()]
			{
				return false
			}
			seen[tile.index()] = true;
		}
		!self.0.is_empty()
			&& self.0.windows(2).all(|pair| is_adjacent(pair[0], pair[1]))
	}

	/// Check if the path is a valid witness for a word: a chain of playable
	/// length through the center that obeys the center rules.
	///
	/// # Returns
	///
	/// `true` if the path is a valid witness, `false` otherwise.
	#[must_use]
	pub fn is_witness(&self) -> bool
	{
		(MIN_WORD_LENGTH ..= MAX_WORD_LENGTH).contains(&self.0.len())
			&& self.is_chain()
			&& obeys_center_rules(&self.0)
	}

	/// Get the word spelled by the path.
	///
	/// # Arguments
	///
	/// * `arrangement` - The letters of the tiles.
	///
	/// # Returns
	///
	/// The word spelled by the path.
	#[must_use]
	pub fn word(&self, arrangement: &Arrangement) -> String
	{
		self.0.iter().map(|&t| arrangement.letter_at(t)).collect()
	}
}

impl Display for Path
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		for (i, tile) in self.0.iter().enumerate()
		{
			if i > 0
			{
				write!(f, " → ")?;
			}
			write!(f, "{}", tile)?;
		}
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Validator.                                 //
////////////////////////////////////////////////////////////////////////////////

/// A search frame: a tile on the current path and the linear index of the next
/// tile to consider as its successor.
#[derive(Clone, Copy, Debug)]
struct Frame
{
	/// The tile on the path.
	tile: Tile,

	/// The linear index of the next candidate successor.
	next: usize
}

/// Find a path across the arrangement that spells the given word and obeys the
/// center rules. Case is ignored.
///
/// # Arguments
///
/// * `word` - The word to trace.
/// * `arrangement` - The arrangement.
///
/// # Returns
///
/// The first acceptable path found, or `None` if the word cannot be traced.
#[must_use]
pub fn find_path(word: &str, arrangement: &Arrangement) -> Option<Path>
{
	let word = word.chars()
		.map(|c| c.to_ascii_uppercase())
		.collect::<Vec<_>>();
	if word.len() < MIN_WORD_LENGTH || word.len() > MAX_WORD_LENGTH
	{
		return None
	}
	// A path through the center spells the center letter.
	if !word.contains(&arrangement.center())
	{
		return None
	}
	let letters = arrangement.letters();
	for start in arrangement.tiles_with(word[0])
	{
		if let Some(path) = search_from(start, &word, &letters)
		{
			trace!("traced {}: {}", word.iter().collect::<String>(), path);
			return Some(path)
		}
	}
	None
}

/// Check whether the given word can be traced across the arrangement.
///
/// # Arguments
///
/// * `word` - The word to trace.
/// * `arrangement` - The arrangement.
///
/// # Returns
///
/// `true` if some acceptable path spells the word, `false` otherwise.
#[inline]
#[must_use]
pub fn can_form_word(word: &str, arrangement: &Arrangement) -> bool
{
	find_path(word, arrangement).is_some()
}

/// Find every dictionary word that can be traced across the arrangement. The
/// dictionary is first pruned to words that contain the center letter and
/// whose letters the arrangement can supply; only the survivors are searched.
///
/// # Arguments
///
/// * `dictionary` - The dictionary.
/// * `arrangement` - The arrangement.
///
/// # Returns
///
/// The formable words, in sorted order.
#[must_use]
pub fn find_formable_words(
	dictionary: &DictionaryIndex,
	arrangement: &Arrangement
) -> BTreeSet<String>
{
	let candidates = candidates(dictionary, arrangement);
	let formable = candidates.par_iter()
		.filter(|w| can_form_word(w, arrangement))
		.map(|w| w.to_string())
		.collect::<BTreeSet<_>>();
	debug!(
		"{}: {} candidates, {} formable",
		arrangement,
		candidates.len(),
		formable.len()
	);
	formable
}

/// Count the dictionary words that can be traced across the arrangement.
/// Equivalent to the size of [`find_formable_words`], without collecting the
/// words.
///
/// # Arguments
///
/// * `dictionary` - The dictionary.
/// * `arrangement` - The arrangement.
///
/// # Returns
///
/// The number of formable words.
#[must_use]
pub fn count_formable_words(
	dictionary: &DictionaryIndex,
	arrangement: &Arrangement
) -> usize
{
	candidates(dictionary, arrangement).par_iter()
		.filter(|w| can_form_word(w, arrangement))
		.count()
}

/// Prune the dictionary to the words worth searching for.
fn candidates<'a>(
	dictionary: &'a DictionaryIndex,
	arrangement: &Arrangement
) -> Vec<&'a str>
{
	let counts = arrangement.letter_counts();
	dictionary.words_containing(arrangement.center())
		.filter(|w| can_supply_from(&counts, w))
		.collect()
}

/// Search for an acceptable path that starts at the given tile. The search
/// keeps an explicit stack of frames, one per tile on the current path, plus
/// a table of the tiles currently on the path.
///
/// # Arguments
///
/// * `start` - The first tile, which must carry the first letter.
/// * `word` - The uppercase letters of the word.
/// * `letters` - The letters of the arrangement, by linear tile index.
///
/// # Returns
///
/// The first acceptable path, if any.
fn search_from(
	start: Tile,
	word: &[char],
	letters: &[char; TILE_COUNT]
) -> Option<Path>
{
	let mut visited = [false; TILE_COUNT];
	let mut stack = Vec::with_capacity(word.len());
	visited[start.index()] = true;
	stack.push(Frame { tile: start, next: 0 });
	while !stack.is_empty()
	{
		if stack.len() == word.len()
		{
			let tiles = stack.iter().map(|f| f.tile).collect::<Vec<_>>();
			if obeys_center_rules(&tiles)
			{
				return Some(Path(tiles))
			}
			// Keep searching; another path may yet pass the checks.
			pop(&mut stack, &mut visited);
			continue
		}
		let wanted = word[stack.len()];
		let successor = match stack.last_mut()
		{
			Some(frame) => advance(frame, wanted, letters, &visited),
			None => None
		};
		match successor
		{
			Some(tile) =>
			{
				visited[tile.index()] = true;
				stack.push(Frame { tile, next: 0 });
			},
			None => pop(&mut stack, &mut visited)
		}
	}
	None
}

/// Advance the frame to its next viable successor: a tile adjacent to the
/// frame's tile, not already on the path, and carrying the wanted letter.
///
/// # Arguments
///
/// * `frame` - The frame to advance.
/// * `wanted` - The letter that the successor must carry.
/// * `letters` - The letters of the arrangement, by linear tile index.
/// * `visited` - The tiles already on the path, by linear tile index.
///
/// # Returns
///
/// The successor, or `None` if the frame is exhausted.
fn advance(
	frame: &mut Frame,
	wanted: char,
	letters: &[char; TILE_COUNT],
	visited: &[bool; TILE_COUNT]
) -> Option<Tile>
{
	while frame.next < TILE_COUNT
	{
		let index = frame.next;
		frame.next += 1;
		if visited[index] || letters[index] != wanted
		{
			continue
		}
		match Tile::from_index(index)
		{
			Some(tile) if is_adjacent(frame.tile, tile) => return Some(tile),
			_ => {}
		}
	}
	None
}

/// Pop the last frame from the stack, releasing its tile.
#[inline]
fn pop(stack: &mut Vec<Frame>, visited: &mut [bool; TILE_COUNT])
{
	if let Some(frame) = stack.pop()
	{
		visited[frame.tile.index()] = false;
	}
}

/// Check the rules that a complete path must satisfy beyond adjacency: the
/// path must include the center, and a long word whose path passes through
/// the center must reach it from the inner ring and leave it into the inner
/// ring.
///
/// # Arguments
///
/// * `tiles` - The complete path.
///
/// # Returns
///
/// `true` if the path is acceptable, `false` otherwise.
#[must_use]
fn obeys_center_rules(tiles: &[Tile]) -> bool
{
	let Some(position) = tiles.iter().position(|&t| t == Tile::Center)
	else
	{
		return false
	};
	if tiles.len() > LONG_WORD_LENGTH
		&& position > 0
		&& position + 1 < tiles.len()
	{
		return tiles[position - 1].tier() == Tier::Inner
			&& tiles[position + 1].tier() == Tier::Inner
	}
	true
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::BTreeSet;

	use crate::{
		arrangement::Arrangement,
		dictionary::DictionaryIndex,
		path::{
			can_form_word, count_formable_words, find_formable_words,
			find_path, obeys_center_rules, Path
		},
		tile::{is_adjacent, Tile}
	};

	/// The sample arrangement: `R` at the center, `UETOAD` around it.
	fn sample() -> Arrangement
	{
		"R/UETOAD/FIKTYNMDLCWS".parse().unwrap()
	}

	/// Shorthand for an inner tile.
	fn inner(i: usize) -> Tile { Tile::inner(i).unwrap() }

	/// Shorthand for an outer tile.
	fn outer(i: usize) -> Tile { Tile::outer(i).unwrap() }

	/// Ensure that traceable words are found along the expected tiles.
	#[test]
	fn test_find_path()
	{
		let arrangement = sample();
		let path = find_path("road", &arrangement).unwrap();
		assert_eq!(
			path.tiles(),
			&[Tile::Center, inner(3), inner(4), inner(5)]
		);
		assert_eq!(path.word(&arrangement), "ROAD");
		let path = find_path("RUE", &arrangement).unwrap();
		assert_eq!(path.tiles(), &[Tile::Center, inner(0), inner(1)]);
		// M sits on the outer ring, beneath the inner O, beside the inner A.
		let path = find_path("RAM", &arrangement).unwrap();
		assert_eq!(path.tiles(), &[Tile::Center, inner(4), outer(6)]);
		assert!(can_form_word("TORE", &arrangement));
		assert!(can_form_word("rot", &arrangement));
	}

	/// Ensure that absent letters, bad lengths, and missing center letters are
	/// all rejected.
	#[test]
	fn test_rejections()
	{
		let arrangement = sample();
		assert!(!can_form_word("ZEBRA", &arrangement));
		assert!(!can_form_word("RU", &arrangement));
		assert!(!can_form_word("", &arrangement));
		assert!(!can_form_word("RUERUERUER", &arrangement));
		// T, O, A, D form a chain, but TOAD never touches the center.
		assert!(!can_form_word("TOAD", &arrangement));
		// No tile may be used twice.
		assert!(!can_form_word("RURU", &arrangement));
		// R and S are never adjacent.
		assert!(!can_form_word("RS", &arrangement));
	}

	/// Ensure that RATE cannot be traced on the sample arrangement. The only
	/// A is inner 4, whose neighbors are the center, inner 3 and 5, and outer
	/// 5 through 10 (`NMDLCW`). Neither T (inner 2, outer 3) is among them.
	#[test]
	fn test_rate()
	{
		let arrangement = sample();
		assert_eq!(find_path("RATE", &arrangement), None);
		assert_eq!(arrangement.tiles_with('A').collect::<Vec<_>>(), vec![inner(4)]);
		assert_eq!(
			arrangement.tiles_with('T').collect::<Vec<_>>(),
			vec![inner(2), outer(3)]
		);
		assert!(!is_adjacent(inner(4), inner(2)));
		assert!(!is_adjacent(inner(4), outer(3)));
		// The letters alone would allow it.
		assert!(arrangement.can_supply("RATE"));
	}

	/// Ensure that a long word may pass through the center between two inner
	/// tiles, and that the check itself rejects other neighbors.
	#[test]
	fn test_long_word()
	{
		let arrangement = "A/RIBCFG/THNEDJKLMPQV".parse::<Arrangement>().unwrap();
		let path = find_path("TRAINED", &arrangement).unwrap();
		assert_eq!(
			path.tiles(),
			&[outer(0), inner(0), Tile::Center, inner(1), outer(2), outer(3), outer(4)]
		);
		assert!(path.is_chain());
		// Such paths cannot arise from adjacency alone, so exercise the rule
		// directly.
		let bad = [inner(0), outer(0), outer(1), Tile::Center, outer(2), inner(1), inner(2)];
		assert!(!obeys_center_rules(&bad));
		let endpoint = [Tile::Center, inner(0), outer(0), outer(1), outer(2), outer(3), outer(4)];
		assert!(obeys_center_rules(&endpoint));
		assert!(!obeys_center_rules(&[inner(0), inner(1), inner(2)]));
	}

	/// Ensure that chains are recognized.
	#[test]
	fn test_is_chain()
	{
		assert!(!Path::default().is_chain());
		assert!(Path::new(vec![Tile::Center]).is_chain());
		assert!(Path::new(vec![outer(0), inner(0), Tile::Center]).is_chain());
		assert!(!Path::new(vec![outer(0), Tile::Center]).is_chain());
		assert!(!Path::new(vec![Tile::Center, inner(0), Tile::Center]).is_chain());
	}

	/// Ensure that the formable words are exactly the traceable dictionary
	/// words, and that every witness path is a chain through the center.
	#[test]
	fn test_find_formable_words()
	{
		let arrangement = sample();
		let dictionary = DictionaryIndex::from_words([
			"road", "rue", "ram", "rot", "tore", "toad", "zebra", "rut",
			"tour", "duet"
		]);
		let formable = find_formable_words(&dictionary, &arrangement);
		let expected = ["RAM", "ROAD", "ROT", "RUE", "TORE"]
			.iter()
			.map(|w| w.to_string())
			.collect::<BTreeSet<_>>();
		assert_eq!(formable, expected);
		assert_eq!(count_formable_words(&dictionary, &arrangement), 5);
		for word in formable.iter()
		{
			let path = find_path(word, &arrangement).unwrap();
			assert!(path.is_chain(), "{}", word);
			assert!(path.includes_center(), "{}", word);
			assert_eq!(&path.word(&arrangement), word);
		}
	}

	/// Ensure that every word formable with the sample word list has a valid
	/// witness.
	#[test]
	fn test_sample_dictionary()
	{
		let dictionary =
			DictionaryIndex::read_from_file("dict/english.txt").unwrap();
		let arrangement = sample();
		let formable = find_formable_words(&dictionary, &arrangement);
		assert!(formable.contains("ROAD"));
		for word in formable.iter()
		{
			assert!(word.contains('R'));
			let path = find_path(word, &arrangement).unwrap();
			assert!(path.is_chain() && path.includes_center(), "{}", word);
		}
	}
}
