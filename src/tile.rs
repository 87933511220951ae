//! # Tiles
//!
//! Herein are the tile identities of the letter flower and the adjacency
//! relation between them. The flower comprises a single center tile, an inner
//! ring of 6 tiles, and an outer ring of 12 tiles. Adjacency is a property of
//! the layout alone; it never depends on which letters occupy the tiles.

use std::{
	error::Error,
	fmt::{self, Display, Formatter}
};

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                 Constants.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The number of tiles in the inner ring.
pub const INNER_COUNT: usize = 6;

/// The number of tiles in the outer ring.
pub const OUTER_COUNT: usize = 12;

/// The total number of tiles in the flower.
pub const TILE_COUNT: usize = 1 + INNER_COUNT + OUTER_COUNT;

////////////////////////////////////////////////////////////////////////////////
//                                   Tiers.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The structural ring to which a tile belongs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub enum Tier
{
	/// The single tile at the heart of the flower.
	Center,

	/// The ring of tiles surrounding the center.
	Inner,

	/// The ring of tiles surrounding the inner ring.
	Outer
}

impl Display for Tier
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Center => write!(f, "center"),
			Self::Inner => write!(f, "inner"),
			Self::Outer => write!(f, "outer")
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                Ring indices.                               //
////////////////////////////////////////////////////////////////////////////////

/// The position of a tile within the inner ring. Always less than
/// [`INNER_COUNT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct InnerIndex(u8);

impl InnerIndex
{
	/// Construct an inner ring index.
	///
	/// # Arguments
	///
	/// * `index` - The position within the inner ring.
	///
	/// # Returns
	///
	/// The index, or `None` if `index` is not less than [`INNER_COUNT`].
	#[inline]
	#[must_use]
	pub const fn new(index: usize) -> Option<Self>
	{
		if index < INNER_COUNT { Some(Self(index as u8)) } else { None }
	}

	/// Get the position within the inner ring.
	#[inline]
	#[must_use]
	pub const fn get(self) -> usize { self.0 as usize }
}

impl TryFrom<u8> for InnerIndex
{
	type Error = RingIndexError;

	fn try_from(index: u8) -> Result<Self, Self::Error>
	{
		Self::new(index as usize).ok_or(RingIndexError {
			tier: Tier::Inner,
			index: index as usize
		})
	}
}

impl From<InnerIndex> for u8
{
	fn from(index: InnerIndex) -> Self { index.0 }
}

/// The position of a tile within the outer ring. Always less than
/// [`OUTER_COUNT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OuterIndex(u8);

impl OuterIndex
{
	/// Construct an outer ring index.
	///
	/// # Arguments
	///
	/// * `index` - The position within the outer ring.
	///
	/// # Returns
	///
	/// The index, or `None` if `index` is not less than [`OUTER_COUNT`].
	#[inline]
	#[must_use]
	pub const fn new(index: usize) -> Option<Self>
	{
		if index < OUTER_COUNT { Some(Self(index as u8)) } else { None }
	}

	/// Get the position within the outer ring.
	#[inline]
	#[must_use]
	pub const fn get(self) -> usize { self.0 as usize }
}

impl TryFrom<u8> for OuterIndex
{
	type Error = RingIndexError;

	fn try_from(index: u8) -> Result<Self, Self::Error>
	{
		Self::new(index as usize).ok_or(RingIndexError {
			tier: Tier::Outer,
			index: index as usize
		})
	}
}

impl From<OuterIndex> for u8
{
	fn from(index: OuterIndex) -> Self { index.0 }
}

/// The error produced when a ring position is out of range for its ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingIndexError
{
	/// The ring.
	pub tier: Tier,

	/// The offending position.
	pub index: usize
}

impl Display for RingIndexError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "no position {} in the {} ring", self.index, self.tier)
	}
}

impl Error for RingIndexError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tiles.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The identity of a tile, which is purely positional. Tiles are also known by
/// a dense linear index: the center is `0`, the inner ring occupies `1..=6`,
/// and the outer ring occupies `7..=18`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[must_use]
pub enum Tile
{
	/// The center tile.
	Center,

	/// A tile of the inner ring.
	Inner(InnerIndex),

	/// A tile of the outer ring.
	Outer(OuterIndex)
}

impl Tile
{
	/// Construct a tile of the inner ring.
	///
	/// # Arguments
	///
	/// * `index` - The position within the inner ring.
	///
	/// # Returns
	///
	/// The tile, or `None` if the position is out of range.
	#[inline]
	#[must_use]
	pub const fn inner(index: usize) -> Option<Self>
	{
		match InnerIndex::new(index)
		{
			Some(index) => Some(Self::Inner(index)),
			None => None
		}
	}

	/// Construct a tile of the outer ring.
	///
	/// # Arguments
	///
	/// * `index` - The position within the outer ring.
	///
	/// # Returns
	///
	/// The tile, or `None` if the position is out of range.
	#[inline]
	#[must_use]
	pub const fn outer(index: usize) -> Option<Self>
	{
		match OuterIndex::new(index)
		{
			Some(index) => Some(Self::Outer(index)),
			None => None
		}
	}

	/// Construct a tile from its linear index.
	///
	/// # Arguments
	///
	/// * `index` - The linear index, in `0..TILE_COUNT`.
	///
	/// # Returns
	///
	/// The tile, or `None` if the linear index is out of range.
	#[must_use]
	pub const fn from_index(index: usize) -> Option<Self>
	{
		if index == 0
		{
			Some(Self::Center)
		}
		else if index <= INNER_COUNT
		{
			Self::inner(index - 1)
		}
		else
		{
			Self::outer(index - 1 - INNER_COUNT)
		}
	}

	/// Get the linear index of the tile.
	#[inline]
	#[must_use]
	pub const fn index(self) -> usize
	{
		match self
		{
			Self::Center => 0,
			Self::Inner(i) => 1 + i.get(),
			Self::Outer(o) => 1 + INNER_COUNT + o.get()
		}
	}

	/// Get the tier of the tile.
	#[inline]
	#[must_use]
	pub const fn tier(self) -> Tier
	{
		match self
		{
			Self::Center => Tier::Center,
			Self::Inner(_) => Tier::Inner,
			Self::Outer(_) => Tier::Outer
		}
	}

	/// Get the position of the tile within its ring. The center is always at
	/// position `0`.
	#[inline]
	#[must_use]
	pub const fn ring_index(self) -> usize
	{
		match self
		{
			Self::Center => 0,
			Self::Inner(i) => i.get(),
			Self::Outer(o) => o.get()
		}
	}

	/// Get every tile of the flower, in linear index order.
	pub fn all() -> impl Iterator<Item = Tile>
	{
		(0..TILE_COUNT).filter_map(Self::from_index)
	}
}

impl Display for Tile
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Center => write!(f, "center"),
			_ => write!(f, "{}:{}", self.tier(), self.ring_index())
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Topology.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The ring population of a flower. Adjacency is a pure function of the
/// topology, so it is recomputed from these two numbers rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topology
{
	/// The number of tiles in the inner ring. Never zero.
	inner: usize,

	/// The number of tiles in the outer ring. Never zero.
	outer: usize
}

impl Topology
{
	/// The topology of the standard 1/6/12 flower.
	pub const STANDARD: Topology =
		Topology { inner: INNER_COUNT, outer: OUTER_COUNT };

	/// Construct a topology from its ring sizes.
	///
	/// # Arguments
	///
	/// * `inner` - The number of tiles in the inner ring.
	/// * `outer` - The number of tiles in the outer ring.
	///
	/// # Returns
	///
	/// The topology, or `None` if either ring is empty.
	#[inline]
	#[must_use]
	pub const fn new(inner: usize, outer: usize) -> Option<Self>
	{
		if inner == 0 || outer == 0 { None }
		else { Some(Self { inner, outer }) }
	}

	/// Get the number of tiles in the inner ring.
	#[inline]
	#[must_use]
	pub const fn inner(&self) -> usize { self.inner }

	/// Get the number of tiles in the outer ring.
	#[inline]
	#[must_use]
	pub const fn outer(&self) -> usize { self.outer }

	/// Compute the parent of an outer tile, i.e., the inner tile beneath
	/// which it is seated. Halves round up.
	///
	/// # Arguments
	///
	/// * `outer` - The position within the outer ring.
	///
	/// # Returns
	///
	/// The position of the parent within the inner ring.
	#[inline]
	#[must_use]
	pub const fn parent(&self, outer: usize) -> usize
	{
		((2 * outer * self.inner + self.outer) / (2 * self.outer)) % self.inner
	}

	/// Decide whether two tiles, given by tier and ring position, are
	/// neighbors. The relation is symmetric and irreflexive.
	///
	/// # Arguments
	///
	/// * `a` - The tier and ring position of the first tile.
	/// * `b` - The tier and ring position of the second tile.
	///
	/// # Returns
	///
	/// `true` if the tiles are adjacent, `false` otherwise.
	#[must_use]
	pub fn is_adjacent(&self, a: (Tier, usize), b: (Tier, usize)) -> bool
	{
		match (a, b)
		{
			((Tier::Center, _), (Tier::Center, _)) => false,
			((Tier::Center, _), (Tier::Inner, _))
				| ((Tier::Inner, _), (Tier::Center, _)) => true,
			((Tier::Center, _), (Tier::Outer, _))
				| ((Tier::Outer, _), (Tier::Center, _)) => false,
			((Tier::Inner, i), (Tier::Inner, j)) =>
				cyclic_neighbors(i, j, self.inner),
			((Tier::Outer, i), (Tier::Outer, j)) =>
			{
				let (pi, pj) = (self.parent(i), self.parent(j));
				cyclic_neighbors(i, j, self.outer)
					&& (pi == pj || cyclic_neighbors(pi, pj, self.inner))
			},
			((Tier::Inner, i), (Tier::Outer, o))
				| ((Tier::Outer, o), (Tier::Inner, i)) =>
			{
				let parent = self.parent(o);
				i == parent || cyclic_neighbors(i, parent, self.inner)
			}
		}
	}
}

/// Check whether two ring positions are immediate neighbors around a ring of
/// the given size.
#[inline]
#[must_use]
fn cyclic_neighbors(a: usize, b: usize, size: usize) -> bool
{
	a != b && ((a + 1) % size == b || (b + 1) % size == a)
}

////////////////////////////////////////////////////////////////////////////////
//                              Adjacency graph.                              //
////////////////////////////////////////////////////////////////////////////////

/// Decide whether two tiles of the standard flower are neighbors.
///
/// # Arguments
///
/// * `a` - The first tile.
/// * `b` - The second tile.
///
/// # Returns
///
/// `true` if the tiles are adjacent, `false` otherwise. A tile is never
/// adjacent to itself.
#[inline]
#[must_use]
pub fn is_adjacent(a: Tile, b: Tile) -> bool
{
	Topology::STANDARD.is_adjacent(
		(a.tier(), a.ring_index()),
		(b.tier(), b.ring_index())
	)
}

/// Get the neighbors of a tile, in linear index order.
///
/// # Arguments
///
/// * `tile` - The tile.
///
/// # Returns
///
/// An iterator over the tiles adjacent to `tile`.
pub fn neighbors(tile: Tile) -> impl Iterator<Item = Tile>
{
	Tile::all().filter(move |&other| is_adjacent(tile, other))
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::tile::{
		is_adjacent, neighbors, InnerIndex, OuterIndex, RingIndexError, Tier,
		Tile, Topology, INNER_COUNT, OUTER_COUNT, TILE_COUNT
	};

	/// Shorthand for an inner tile.
	fn inner(i: usize) -> Tile { Tile::inner(i).unwrap() }

	/// Shorthand for an outer tile.
	fn outer(i: usize) -> Tile { Tile::outer(i).unwrap() }

	/// Ensure that linear indices and tiles correspond exactly, and that
	/// out-of-range positions are rejected.
	#[test]
	fn test_index()
	{
		let tiles = Tile::all().collect::<Vec<_>>();
		assert_eq!(tiles.len(), TILE_COUNT);
		for (index, tile) in tiles.iter().enumerate()
		{
			assert_eq!(tile.index(), index);
			assert_eq!(Tile::from_index(index), Some(*tile));
		}
		assert_eq!(Tile::from_index(TILE_COUNT), None);
		assert_eq!(Tile::inner(INNER_COUNT), None);
		assert_eq!(Tile::outer(OUTER_COUNT), None);
		assert_eq!(inner(5).tier(), Tier::Inner);
		assert_eq!(outer(11).ring_index(), 11);
	}

	/// Ensure that the parent mapping seats each outer tile beneath the
	/// expected inner tile.
	#[test]
	fn test_parent()
	{
		let parents = (0..OUTER_COUNT)
			.map(|o| Topology::STANDARD.parent(o))
			.collect::<Vec<_>>();
		assert_eq!(parents, vec![0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 0]);
	}

	/// Ensure that adjacency is symmetric and irreflexive, exhaustively.
	#[test]
	fn test_symmetry()
	{
		for a in Tile::all()
		{
			assert!(!is_adjacent(a, a), "{}", a);
			for b in Tile::all()
			{
				assert_eq!(is_adjacent(a, b), is_adjacent(b, a), "{}, {}", a, b);
			}
		}
	}

	/// Ensure that the center touches every inner tile and no outer tile.
	#[test]
	fn test_center_isolation()
	{
		for i in 0..INNER_COUNT
		{
			assert!(is_adjacent(Tile::Center, inner(i)));
		}
		for o in 0..OUTER_COUNT
		{
			assert!(!is_adjacent(Tile::Center, outer(o)));
		}
	}

	/// Ensure that inner tiles only touch their cyclic neighbors.
	#[test]
	fn test_inner_ring()
	{
		for i in 0..INNER_COUNT
		{
			for j in 0..INNER_COUNT
			{
				let expected = (i + 1) % INNER_COUNT == j
					|| (j + 1) % INNER_COUNT == i;
				assert_eq!(is_adjacent(inner(i), inner(j)), expected, "{}, {}", i, j);
			}
		}
	}

	/// Ensure the expected relationships between and within the rings.
	#[test]
	fn test_outer_ring()
	{
		assert!(is_adjacent(outer(0), outer(1)));
		assert!(is_adjacent(outer(11), outer(0)));
		assert!(!is_adjacent(outer(0), outer(2)));
		// Outer 3 sits under inner 2, so it touches inner 1, 2 and 3.
		assert!(is_adjacent(outer(3), inner(1)));
		assert!(is_adjacent(outer(3), inner(2)));
		assert!(is_adjacent(outer(3), inner(3)));
		assert!(!is_adjacent(outer(3), inner(4)));
		// Outer 11 wraps around to inner 0.
		assert!(is_adjacent(outer(11), inner(0)));
		assert!(is_adjacent(outer(11), inner(5)));
		assert!(!is_adjacent(outer(11), inner(3)));
	}

	/// Ensure that the neighbor listing agrees with the relation.
	#[test]
	fn test_neighbors()
	{
		let center = neighbors(Tile::Center).collect::<Vec<_>>();
		assert_eq!(center, (0..INNER_COUNT).map(inner).collect::<Vec<_>>());
		for tile in Tile::all()
		{
			for n in neighbors(tile)
			{
				assert!(is_adjacent(tile, n));
			}
		}
	}

	/// Ensure that the relation remains symmetric for other ring sizes.
	#[test]
	fn test_other_topology()
	{
		let topology = Topology::new(8, 16).unwrap();
		assert_eq!((topology.inner(), topology.outer()), (8, 16));
		let tiers = [(Tier::Center, 1), (Tier::Inner, 8), (Tier::Outer, 16)];
		for &(ta, na) in tiers.iter()
		{
			for a in 0..na
			{
				assert!(!topology.is_adjacent((ta, a), (ta, a)));
				for &(tb, nb) in tiers.iter()
				{
					for b in 0..nb
					{
						assert_eq!(
							topology.is_adjacent((ta, a), (tb, b)),
							topology.is_adjacent((tb, b), (ta, a))
						);
					}
				}
			}
		}
	}

	/// Ensure that a topology with an empty ring cannot be built.
	#[test]
	fn test_empty_topology()
	{
		assert_eq!(Topology::new(0, 12), None);
		assert_eq!(Topology::new(6, 0), None);
		assert_eq!(Topology::new(6, 12), Some(Topology::STANDARD));
	}

	/// Ensure that decoding never yields an out-of-range tile.
	#[test]
	fn test_deserialize()
	{
		let bytes = bincode::serialize(&inner(3)).unwrap();
		assert_eq!(bincode::deserialize::<Tile>(&bytes).unwrap(), inner(3));
		let bytes = bincode::serialize(&outer(11)).unwrap();
		assert_eq!(bincode::deserialize::<Tile>(&bytes).unwrap(), outer(11));
		// Variant 1 is the inner ring; position 200 does not exist.
		assert!(bincode::deserialize::<Tile>(&[1, 0, 0, 0, 200]).is_err());
		assert!(bincode::deserialize::<Tile>(&[1, 0, 0, 0, 6]).is_err());
		assert!(bincode::deserialize::<Tile>(&[2, 0, 0, 0, 12]).is_err());
		assert_eq!(
			InnerIndex::try_from(6u8),
			Err(RingIndexError { tier: Tier::Inner, index: 6 })
		);
		assert_eq!(OuterIndex::try_from(11u8).map(OuterIndex::get), Ok(11));
	}
}
