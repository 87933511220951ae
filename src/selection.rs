//! # Selection
//!
//! Herein is the live selection: the path that the player is building one tile
//! at a time. Each pick is checked against adjacency and a handful of
//! anti-cycling rules that batch validation does not need. A rejected pick
//! leaves the selection exactly as it was.
//!
//! Unlike a validated [`Path`](crate::path::Path), a selection may revisit a
//! tile, provided that the revisit is not an immediate step back.

use std::fmt::{self, Display, Formatter};

use fixedstr::str16;
use log::trace;

use crate::{
	arrangement::Arrangement,
	dictionary::MAX_WORD_LENGTH,
	tile::{is_adjacent, Tile}
};

////////////////////////////////////////////////////////////////////////////////
//                                 Selection.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The selection in progress. Empty until the first accepted pick; reset to
/// empty by [`reset`](Self::reset) or [`take`](Self::take).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Selection
{
	/// The picked tiles, in order.
	tiles: Vec<Tile>,

	/// The word spelled by the picked tiles.
	word: str16
}

impl Selection
{
	/// Construct an empty selection. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Get the picked tiles, in order.
	#[inline]
	#[must_use]
	pub fn tiles(&self) -> &[Tile] { &self.tiles }

	/// Get the word spelled by the picked tiles.
	#[inline]
	#[must_use]
	pub fn word(&self) -> &str { self.word.as_str() }

	/// Get the most recently picked tile, if any.
	#[inline]
	#[must_use]
	pub fn last(&self) -> Option<Tile> { self.tiles.last().copied() }

	/// Get the number of picked tiles.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.tiles.len() }

	/// Check if nothing has been picked.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.tiles.is_empty() }

	/// Abandon the selection.
	#[inline]
	pub fn reset(&mut self)
	{
		self.tiles.clear();
		self.word.clear();
	}

	/// Hand over the selection, leaving it empty.
	///
	/// # Returns
	///
	/// The word and the tiles that spelled it.
	#[must_use]
	pub fn take(&mut self) -> (String, Vec<Tile>)
	{
		let word = self.word.to_string();
		let tiles = std::mem::take(&mut self.tiles);
		self.word.clear();
		(word, tiles)
	}

	/// Attempt to extend the selection by one tile. The pick is rejected if:
	///
	/// * The selection is already as long as the longest word.
	/// * The tile is the last tile picked.
	/// * The tile is not adjacent to the last tile picked.
	/// * The tile is the second- or third-to-last tile picked.
	/// * Appending the tile would end the selection with the same run of
	///   tiles twice over, e.g., `H-A-N-I-H-A-N-I`.
	///
	/// # Arguments
	///
	/// * `tile` - The tile to pick.
	/// * `arrangement` - The letters of the tiles.
	///
	/// # Returns
	///
	/// Whether the pick was accepted and, if not, why.
	pub fn pick(&mut self, tile: Tile, arrangement: &Arrangement) -> Pick
	{
		match self.check(tile)
		{
			Ok(()) =>
			{
				self.tiles.push(tile);
				self.word.push_char(arrangement.letter_at(tile));
				trace!("picked {}: {}", tile, self.word);
				Pick::Accepted
			},
			Err(reason) =>
			{
				trace!("rejected {}: {}", tile, reason);
				Pick::Rejected(reason)
			}
		}
	}

	/// Check whether the tile may be picked next, without picking it.
	///
	/// # Arguments
	///
	/// * `tile` - The candidate tile.
	///
	/// # Errors
	///
	/// The reason for rejecting the pick.
	pub fn check(&self, tile: Tile) -> Result<(), PickRejection>
	{
		if self.tiles.len() >= MAX_WORD_LENGTH
		{
			return Err(PickRejection::Full)
		}
		let Some(last) = self.last()
		else
		{
			return Ok(())
		};
		if tile == last
		{
			return Err(PickRejection::SameAsLast)
		}
		if !is_adjacent(last, tile)
		{
			return Err(PickRejection::NotAdjacent)
		}
		let n = self.tiles.len();
		let recent = self.tiles[n.saturating_sub(3) .. n - 1].contains(&tile);
		if recent
		{
			return Err(PickRejection::Backtrack)
		}
		if ends_with_repeat(&self.tiles, tile)
		{
			return Err(PickRejection::Cycle)
		}
		Ok(())
	}
}

impl Display for Selection
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{}", self.word)
	}
}

/// Check whether appending `tile` to `tiles` would make the last `k` tiles
/// identical to the `k` tiles before them, for any `k` of at least 2.
///
/// # Arguments
///
/// * `tiles` - The tiles picked so far.
/// * `tile` - The tentative next tile.
///
/// # Returns
///
/// `true` if the tentative selection ends in a repeated run, `false`
/// otherwise.
#[must_use]
fn ends_with_repeat(tiles: &[Tile], tile: Tile) -> bool
{
	let mut tentative = tiles.to_vec();
	tentative.push(tile);
	let n = tentative.len();
	(2 ..= n / 2).any(|k| tentative[n - k ..] == tentative[n - 2 * k .. n - k])
}

////////////////////////////////////////////////////////////////////////////////
//                                  Verdicts.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The outcome of a pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Pick
{
	/// The tile was appended to the selection.
	Accepted,

	/// The selection is unchanged.
	Rejected(PickRejection)
}

impl Pick
{
	/// Check if the pick was accepted.
	#[inline]
	#[must_use]
	pub fn is_accepted(&self) -> bool { matches!(self, Self::Accepted) }
}

/// The reasons for rejecting a pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickRejection
{
	/// The selection is already as long as the longest word.
	Full,

	/// The tile is the tile picked last.
	SameAsLast,

	/// The tile is not adjacent to the tile picked last.
	NotAdjacent,

	/// The tile was picked two or three picks ago.
	Backtrack,

	/// The tile would close a repeated run of tiles.
	Cycle
}

impl Display for PickRejection
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Full => write!(f, "selection is full"),
			Self::SameAsLast => write!(f, "tile was just picked"),
			Self::NotAdjacent => write!(f, "tile is not adjacent"),
			Self::Backtrack => write!(f, "tile was picked moments ago"),
			Self::Cycle => write!(f, "tile would repeat a loop")
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		arrangement::Arrangement,
		selection::{ends_with_repeat, Pick, PickRejection, Selection},
		tile::Tile
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

	/// Ensure that accepted picks build the word, and that taking the
	/// selection empties it.
	#[test]
	fn test_build()
	{
		let arrangement = sample();
		let mut selection = Selection::new();
		assert!(selection.is_empty());
		for tile in [Tile::Center, inner(3), inner(4), inner(5)]
		{
			assert_eq!(selection.pick(tile, &arrangement), Pick::Accepted);
		}
		assert_eq!(selection.word(), "ROAD");
		assert_eq!(selection.len(), 4);
		assert_eq!(selection.last(), Some(inner(5)));
		let (word, tiles) = selection.take();
		assert_eq!(word, "ROAD");
		assert_eq!(tiles.len(), 4);
		assert!(selection.is_empty());
		assert_eq!(selection.word(), "");
	}

	/// Ensure that any tile may start a selection, but later picks must be
	/// adjacent and distinct from the last.
	#[test]
	fn test_adjacency()
	{
		let arrangement = sample();
		let mut selection = Selection::new();
		assert!(selection.pick(outer(7), &arrangement).is_accepted());
		assert_eq!(
			selection.pick(outer(7), &arrangement),
			Pick::Rejected(PickRejection::SameAsLast)
		);
		assert_eq!(
			selection.pick(Tile::Center, &arrangement),
			Pick::Rejected(PickRejection::NotAdjacent)
		);
		assert_eq!(selection.word(), "D");
		selection.reset();
		assert!(selection.is_empty());
	}

	/// Ensure that A-B-A ping-pong and one-step detours are rejected.
	#[test]
	fn test_backtrack()
	{
		let arrangement = sample();
		let mut selection = Selection::new();
		assert!(selection.pick(Tile::Center, &arrangement).is_accepted());
		assert!(selection.pick(inner(0), &arrangement).is_accepted());
		assert_eq!(
			selection.pick(Tile::Center, &arrangement),
			Pick::Rejected(PickRejection::Backtrack)
		);
		assert!(selection.pick(inner(1), &arrangement).is_accepted());
		assert_eq!(
			selection.pick(Tile::Center, &arrangement),
			Pick::Rejected(PickRejection::Backtrack)
		);
		assert_eq!(
			selection.pick(inner(0), &arrangement),
			Pick::Rejected(PickRejection::Backtrack)
		);
		assert_eq!(selection.word(), "RUE");
	}

	/// Ensure that a revisit further back than three picks is tolerated.
	#[test]
	fn test_distant_revisit()
	{
		let arrangement = sample();
		let mut selection = Selection::new();
		for tile in [Tile::Center, inner(0), inner(1), inner(2), Tile::Center]
		{
			assert!(selection.pick(tile, &arrangement).is_accepted(), "{}", tile);
		}
		assert_eq!(selection.word(), "RUETR");
	}

	/// Ensure that closing a triangle a second time is rejected at the first
	/// repeated pick.
	#[test]
	fn test_triangle()
	{
		let arrangement = sample();
		let mut selection = Selection::new();
		let (a, b, c) = (Tile::Center, inner(0), inner(1));
		assert!(selection.pick(a, &arrangement).is_accepted());
		assert!(selection.pick(b, &arrangement).is_accepted());
		assert!(selection.pick(c, &arrangement).is_accepted());
		assert!(!selection.pick(a, &arrangement).is_accepted());
		assert_eq!(selection.tiles(), &[a, b, c]);
	}

	/// Ensure that a repeated run of tiles is caught when the simpler rules
	/// let it through.
	#[test]
	fn test_cycle()
	{
		let (h, a, n, i) = (inner(0), inner(1), inner(2), inner(3));
		assert!(ends_with_repeat(&[h, a, n, i, h, a, n], i));
		assert!(ends_with_repeat(&[n, h, a, h], a));
		assert!(!ends_with_repeat(&[h, a, n, i, h, a], Tile::Center));
		assert!(!ends_with_repeat(&[h], a));
		// A loop around the inner ring may return to its start.
		let arrangement = sample();
		let mut selection = Selection::new();
		for k in 0..6
		{
			assert!(selection.pick(inner(k), &arrangement).is_accepted());
		}
		assert!(selection.pick(inner(0), &arrangement).is_accepted());
		assert!(selection.pick(inner(1), &arrangement).is_accepted());
		assert!(selection.pick(inner(2), &arrangement).is_accepted());
		assert_eq!(selection.len(), 9);
		assert_eq!(
			selection.pick(inner(3), &arrangement),
			Pick::Rejected(PickRejection::Full)
		);
	}

	/// Ensure that going round a four-tile loop a second time is rejected as
	/// a cycle when the loop would close.
	#[test]
	fn test_cycle_pick()
	{
		let arrangement = sample();
		let mut selection = Selection::new();
		let (i0, o0, o1, i1) = (inner(0), outer(0), outer(1), inner(1));
		for tile in [i0, o0, o1, i1, i0, o0, o1]
		{
			assert!(selection.pick(tile, &arrangement).is_accepted(), "{}", tile);
		}
		assert_eq!(
			selection.pick(i1, &arrangement),
			Pick::Rejected(PickRejection::Cycle)
		);
		assert_eq!(selection.len(), 7);
	}
}
