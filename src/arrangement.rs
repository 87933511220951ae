//! # Arrangement
//!
//! A letter arrangement assigns one uppercase letter to every tile of the
//! flower. Letters may repeat freely across tiles. The text form of an
//! arrangement lists the center, the inner ring, and the outer ring, separated
//! by slashes, e.g., `R/UETOAD/FIKTYNMDLCWS`.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr
};

use serde::{Deserialize, Serialize};

use crate::tile::{Tile, INNER_COUNT, OUTER_COUNT, TILE_COUNT};

////////////////////////////////////////////////////////////////////////////////
//                                Arrangement.                                //
////////////////////////////////////////////////////////////////////////////////

/// A complete letter assignment over all tiles of the flower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[must_use]
pub struct Arrangement
{
	/// The letter of the center tile.
	center: char,

	/// The letters of the inner ring, by ring position.
	inner: [char; INNER_COUNT],

	/// The letters of the outer ring, by ring position.
	outer: [char; OUTER_COUNT]
}

impl Arrangement
{
	/// Construct an arrangement from its rings. Letters are uppercased.
	///
	/// # Arguments
	///
	/// * `center` - The letter of the center tile.
	/// * `inner` - The letters of the inner ring.
	/// * `outer` - The letters of the outer ring.
	///
	/// # Returns
	///
	/// The arrangement.
	///
	/// # Errors
	///
	/// [`ArrangementError::NotALetter`] if any letter is not an ASCII letter.
	pub fn new(
		center: char,
		inner: [char; INNER_COUNT],
		outer: [char; OUTER_COUNT]
	) -> Result<Self, ArrangementError>
	{
		let check = |c: char| {
			if c.is_ascii_alphabetic() { Ok(c.to_ascii_uppercase()) }
			else { Err(ArrangementError::NotALetter(c)) }
		};
		let center = check(center)?;
		let mut checked_inner = [' '; INNER_COUNT];
		for (slot, &c) in checked_inner.iter_mut().zip(inner.iter())
		{
			*slot = check(c)?;
		}
		let mut checked_outer = [' '; OUTER_COUNT];
		for (slot, &c) in checked_outer.iter_mut().zip(outer.iter())
		{
			*slot = check(c)?;
		}
		Ok(Self { center, inner: checked_inner, outer: checked_outer })
	}

	/// Construct an arrangement from rings already known to hold only
	/// uppercase ASCII letters.
	#[inline]
	pub(crate) const fn from_letters(
		center: char,
		inner: [char; INNER_COUNT],
		outer: [char; OUTER_COUNT]
	) -> Self
	{
		Self { center, inner, outer }
	}

	/// Get the letter of the center tile.
	#[inline]
	#[must_use]
	pub fn center(&self) -> char { self.center }

	/// Get the letters of the inner ring.
	#[inline]
	#[must_use]
	pub fn inner(&self) -> &[char; INNER_COUNT] { &self.inner }

	/// Get the letters of the outer ring.
	#[inline]
	#[must_use]
	pub fn outer(&self) -> &[char; OUTER_COUNT] { &self.outer }

	/// Get the letter at the specified tile.
	///
	/// # Arguments
	///
	/// * `tile` - The tile.
	///
	/// # Returns
	///
	/// The letter at the tile.
	#[inline]
	#[must_use]
	pub fn letter_at(&self, tile: Tile) -> char
	{
		match tile
		{
			Tile::Center => self.center,
			Tile::Inner(i) => self.inner[i.get()],
			Tile::Outer(o) => self.outer[o.get()]
		}
	}

	/// Get every letter of the arrangement, in linear tile order.
	#[must_use]
	pub fn letters(&self) -> [char; TILE_COUNT]
	{
		let mut letters = [' '; TILE_COUNT];
		for tile in Tile::all()
		{
			letters[tile.index()] = self.letter_at(tile);
		}
		letters
	}

	/// Count the occurrences of each letter, indexed by `letter - 'A'`.
	#[must_use]
	pub fn letter_counts(&self) -> [u8; 26]
	{
		let mut counts = [0u8; 26];
		for c in self.letters()
		{
			counts[(c as u8 - b'A') as usize] += 1;
		}
		counts
	}

	/// Check whether the arrangement has at least one tile with the given
	/// letter.
	#[inline]
	#[must_use]
	pub fn contains_letter(&self, letter: char) -> bool
	{
		let letter = letter.to_ascii_uppercase();
		self.center == letter
			|| self.inner.contains(&letter)
			|| self.outer.contains(&letter)
	}

	/// Check whether the letters of `word` form a sub-multiset of the letters
	/// of the arrangement, i.e., whether the arrangement has enough tiles of
	/// each letter to spell the word, ignoring adjacency.
	///
	/// # Arguments
	///
	/// * `word` - The candidate word, in uppercase.
	///
	/// # Returns
	///
	/// `true` if the arrangement can supply the letters, `false` otherwise.
	#[must_use]
	pub fn can_supply(&self, word: &str) -> bool
	{
		can_supply_from(&self.letter_counts(), word)
	}

	/// Find every tile that carries the given letter.
	pub fn tiles_with(&self, letter: char) -> impl Iterator<Item = Tile> + '_
	{
		let letter = letter.to_ascii_uppercase();
		Tile::all().filter(move |&t| self.letter_at(t) == letter)
	}
}

/// Check whether the letters of `word` form a sub-multiset of the given letter
/// counts. Non-letters never fit.
///
/// # Arguments
///
/// * `counts` - The available letters, indexed by `letter - 'A'`.
/// * `word` - The candidate word, in uppercase.
///
/// # Returns
///
/// `true` if the counts cover the word, `false` otherwise.
#[must_use]
pub fn can_supply_from(counts: &[u8; 26], word: &str) -> bool
{
	let mut remaining = *counts;
	for b in word.bytes()
	{
		if !b.is_ascii_uppercase()
		{
			return false
		}
		let slot = &mut remaining[(b - b'A') as usize];
		if *slot == 0
		{
			return false
		}
		*slot -= 1;
	}
	true
}

impl Display for Arrangement
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{}/", self.center)?;
		for c in self.inner.iter()
		{
			write!(f, "{}", c)?;
		}
		write!(f, "/")?;
		for c in self.outer.iter()
		{
			write!(f, "{}", c)?;
		}
		Ok(())
	}
}

impl TryFrom<String> for Arrangement
{
	type Error = ArrangementError;

	fn try_from(text: String) -> Result<Self, Self::Error>
	{
		text.parse()
	}
}

impl From<Arrangement> for String
{
	fn from(arrangement: Arrangement) -> Self
	{
		arrangement.to_string()
	}
}

impl FromStr for Arrangement
{
	type Err = ArrangementError;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		let rings = s.trim().split('/').collect::<Vec<_>>();
		if rings.len() != 3
		{
			return Err(ArrangementError::RingCount(rings.len()))
		}
		let ring = |text: &str, expected: usize| -> Result<Vec<char>, _> {
			let letters = text.chars().collect::<Vec<_>>();
			if letters.len() == expected { Ok(letters) }
			else
			{
				Err(ArrangementError::RingSize { expected, actual: letters.len() })
			}
		};
		let center = ring(rings[0], 1)?;
		let inner = ring(rings[1], INNER_COUNT)?;
		let outer = ring(rings[2], OUTER_COUNT)?;
		let mut inner_ring = [' '; INNER_COUNT];
		inner_ring.copy_from_slice(&inner);
		let mut outer_ring = [' '; OUTER_COUNT];
		outer_ring.copy_from_slice(&outer);
		Self::new(center[0], inner_ring, outer_ring)
	}
}

/// The complete enumeration of [`Arrangement`] construction errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrangementError
{
	/// The text form did not comprise exactly three slash-separated rings.
	RingCount(usize),

	/// A ring did not have the required number of letters.
	RingSize {
		/// The required number of letters.
		expected: usize,

		/// The number of letters supplied.
		actual: usize
	},

	/// A tile was given something other than an ASCII letter.
	NotALetter(char)
}

impl Display for ArrangementError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::RingCount(n) =>
				write!(f, "expected 3 slash-separated rings, found {}", n),
			Self::RingSize { expected, actual } =>
				write!(f, "expected a ring of {} letters, found {}", expected, actual),
			Self::NotALetter(c) => write!(f, "not a letter: {:?}", c)
		}
	}
}

impl Error for ArrangementError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		arrangement::{Arrangement, ArrangementError},
		tile::Tile
	};

	/// Ensure that the text form is parsed into the right rings, and that
	/// it prints back in uppercase.
	#[test]
	fn test_parse()
	{
		let arrangement = "r/uetoad/fiktynmdlcws".parse::<Arrangement>().unwrap();
		assert_eq!(arrangement.center(), 'R');
		assert_eq!(arrangement.inner(), &['U', 'E', 'T', 'O', 'A', 'D']);
		assert_eq!(arrangement.letter_at(Tile::outer(11).unwrap()), 'S');
		assert_eq!(arrangement.letter_at(Tile::inner(4).unwrap()), 'A');
		assert_eq!(arrangement.to_string(), "R/UETOAD/FIKTYNMDLCWS");
	}

	/// Ensure that malformed text is rejected with the right error.
	#[test]
	fn test_parse_errors()
	{
		assert_eq!(
			"R/UETOAD".parse::<Arrangement>(),
			Err(ArrangementError::RingCount(2))
		);
		assert_eq!(
			"R/UETOA/FIKTYNMDLCWS".parse::<Arrangement>(),
			Err(ArrangementError::RingSize { expected: 6, actual: 5 })
		);
		assert_eq!(
			"RS/UETOAD/FIKTYNMDLCWS".parse::<Arrangement>(),
			Err(ArrangementError::RingSize { expected: 1, actual: 2 })
		);
		assert_eq!(
			"R/UET0AD/FIKTYNMDLCWS".parse::<Arrangement>(),
			Err(ArrangementError::NotALetter('0'))
		);
	}

	/// Ensure that letter multisets are honored, including repeated letters.
	#[test]
	fn test_can_supply()
	{
		let arrangement = "R/UETOAD/FIKTYNMDLCWS".parse::<Arrangement>().unwrap();
		assert!(arrangement.can_supply("RATE"));
		assert!(arrangement.can_supply("DOTTED"));
		assert!(!arrangement.can_supply("TOOTED"));
		assert!(arrangement.can_supply("ADD"));
		assert!(!arrangement.can_supply("ZEBRA"));
		assert!(!arrangement.can_supply("RAT3"));
		assert!(arrangement.contains_letter('w'));
		assert_eq!(arrangement.tiles_with('T').count(), 2);
		assert_eq!(arrangement.letter_counts().iter().map(|&c| c as usize).sum::<usize>(), 19);
	}

	/// Ensure that decoding goes through the same validation as parsing.
	#[test]
	fn test_deserialize()
	{
		let arrangement = "R/UETOAD/FIKTYNMDLCWS".parse::<Arrangement>().unwrap();
		let bytes = bincode::serialize(&arrangement).unwrap();
		assert_eq!(
			bincode::deserialize::<Arrangement>(&bytes).unwrap(),
			arrangement
		);
		let lower = bincode::serialize("r/uetoad/fiktynmdlcws").unwrap();
		assert_eq!(
			bincode::deserialize::<Arrangement>(&lower).unwrap(),
			arrangement
		);
		let bad = bincode::serialize("1/UETOAD/FIKTYNMDLCWS").unwrap();
		assert!(bincode::deserialize::<Arrangement>(&bad).is_err());
		let short = bincode::serialize("R/UETOAD/FIK").unwrap();
		assert!(bincode::deserialize::<Arrangement>(&short).is_err());
	}
}
