//! # Generator
//!
//! Herein is the arrangement generator. Generation is a bounded
//! generate-and-test loop: each attempt builds a candidate arrangement from
//! letter frequency heuristics, scores it against the dictionary, and accepts
//! it if it clears the bar set by the [`Difficulty`]. If no attempt clears the
//! bar, the best candidate seen is used instead, and if even that yields no
//! words at all, one of a handful of fixed [fallback](FALLBACKS) arrangements
//! is used. Generation therefore never fails.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr
};

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
	arrangement::Arrangement,
	dictionary::DictionaryIndex,
	path::count_formable_words,
	tile::{INNER_COUNT, OUTER_COUNT}
};

////////////////////////////////////////////////////////////////////////////////
//                                 Constants.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The number of candidates to try before settling.
pub const MAX_ATTEMPTS: usize = 20;

/// A candidate with at least this many formable words is accepted at any
/// difficulty.
pub const EXCEPTIONAL_WORD_COUNT: usize = 65;

/// The number of chances to place a rare consonant on the outer ring.
const RARE_SLOTS: usize = 2;

/// The most letter swaps made while seating digraphs on the inner ring.
const MAX_DIGRAPH_SWAPS: usize = 2;

/// The vowels, weighted by their frequency in English.
const VOWELS: &[(char, u32)] = &[
	('E', 12), ('A', 9), ('I', 8), ('O', 8), ('U', 4)
];

/// The common consonants, weighted by their frequency in English.
const CONSONANTS: &[(char, u32)] = &[
	('T', 9), ('N', 7), ('S', 7), ('R', 7), ('H', 4), ('L', 4), ('D', 4),
	('C', 3), ('M', 3), ('P', 3), ('G', 2), ('B', 2), ('F', 2), ('Y', 2),
	('W', 2)
];

/// The consonants that rarely occur in English words.
const RARE_CONSONANTS: &[char] = &['K', 'V', 'X', 'Z', 'J', 'Q'];

/// The consonants that complete common affixes: -S, -ED, -ER, -ING, and so
/// on. `S` comes first, since plurals are by far the most productive.
const AFFIX_CONSONANTS: &[char] = &['S', 'D', 'R', 'N', 'G', 'T', 'L'];

/// The digraphs worth seating side by side on the inner ring, most
/// productive first.
const DIGRAPHS: &[&str] = &[
	"ER", "TH", "IN", "ES", "ST", "ED", "RE", "AN", "ON", "EN", "AT", "ND",
	"NG", "OU"
];

/// The common prefixes, suffixes, and digraphs whose letters an arrangement
/// should be able to supply.
const PATTERNS: &[&str] = &[
	"RE", "UN", "IN", "DE", "PRE", "DIS",
	"ING", "ED", "ER", "ES", "LY", "EST", "ION",
	"TH", "CH", "SH", "ST", "AN", "EN", "ON", "AT"
];

/// Letter-rich arrangements used when generation produces nothing playable.
pub const FALLBACKS: [Arrangement; 5] = [
	Arrangement::from_letters(
		'E',
		['R', 'A', 'T', 'S', 'I', 'N'],
		['D', 'L', 'O', 'C', 'E', 'P', 'M', 'A', 'G', 'U', 'H', 'B']
	),
	Arrangement::from_letters(
		'A',
		['T', 'E', 'R', 'S', 'L', 'N'],
		['I', 'D', 'O', 'C', 'E', 'B', 'M', 'U', 'P', 'G', 'H', 'Y']
	),
	Arrangement::from_letters(
		'S',
		['E', 'A', 'T', 'R', 'O', 'I'],
		['N', 'L', 'D', 'E', 'C', 'P', 'A', 'M', 'H', 'U', 'G', 'B']
	),
	Arrangement::from_letters(
		'R',
		['E', 'A', 'I', 'T', 'S', 'O'],
		['N', 'D', 'L', 'C', 'E', 'P', 'U', 'M', 'A', 'G', 'B', 'H']
	),
	Arrangement::from_letters(
		'T',
		['A', 'E', 'R', 'S', 'I', 'N'],
		['O', 'L', 'D', 'E', 'C', 'M', 'P', 'A', 'U', 'H', 'G', 'S']
	)
];

////////////////////////////////////////////////////////////////////////////////
//                                Difficulty.                                 //
////////////////////////////////////////////////////////////////////////////////

/// How demanding a generated puzzle should be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty
{
	/// Plenty of words, built on high-yield letters.
	#[default]
	Easy,

	/// Fewer words, with a broader choice of letters.
	Medium,

	/// Fewer words still, with rarer letters.
	Hard
}

impl Difficulty
{
	/// Get the generation parameters for the difficulty.
	#[must_use]
	pub const fn profile(self) -> DifficultyProfile
	{
		match self
		{
			Self::Easy => DifficultyProfile {
				min_words: 50,
				min_productivity: Some(7),
				center_weights: &[
					('S', 6), ('R', 5), ('T', 5), ('N', 1), ('L', 1), ('D', 1)
				],
				inner_vowels: 3,
				total_vowels: 8,
				rare_chance: 0.1
			},
			Self::Medium => DifficultyProfile {
				min_words: 30,
				min_productivity: None,
				center_weights: &[
					('S', 3), ('R', 3), ('T', 3), ('N', 3), ('L', 3), ('D', 3),
					('E', 2), ('A', 2), ('C', 2), ('P', 2), ('M', 2), ('G', 1),
					('B', 1)
				],
				inner_vowels: 2,
				total_vowels: 7,
				rare_chance: 0.3
			},
			Self::Hard => DifficultyProfile {
				min_words: 15,
				min_productivity: None,
				center_weights: &[
					('S', 1), ('R', 2), ('T', 2), ('N', 2), ('L', 2), ('D', 2),
					('C', 3), ('P', 3), ('M', 3), ('G', 3), ('B', 3), ('H', 3),
					('F', 2), ('W', 2), ('Y', 2), ('K', 2), ('V', 1)
				],
				inner_vowels: 2,
				total_vowels: 6,
				rare_chance: 0.6
			}
		}
	}
}

impl Display for Difficulty
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Easy => write!(f, "easy"),
			Self::Medium => write!(f, "medium"),
			Self::Hard => write!(f, "hard")
		}
	}
}

impl FromStr for Difficulty
{
	type Err = ParseDifficultyError;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		match s.trim().to_ascii_lowercase().as_str()
		{
			"easy" => Ok(Self::Easy),
			"medium" => Ok(Self::Medium),
			"hard" => Ok(Self::Hard),
			_ => Err(ParseDifficultyError(s.to_string()))
		}
	}
}

/// The error produced when text names no [`Difficulty`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl Display for ParseDifficultyError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "unknown difficulty (expected easy, medium, or hard): {}", self.0)
	}
}

impl Error for ParseDifficultyError {}

/// The generation parameters of a [`Difficulty`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile
{
	/// The fewest formable words an acceptable candidate may have.
	pub min_words: usize,

	/// The lowest pattern productivity an acceptable candidate may have, if
	/// the difficulty cares.
	pub min_productivity: Option<usize>,

	/// The candidate center letters, with their relative weights.
	pub center_weights: &'static [(char, u32)],

	/// The number of vowels to place on the inner ring.
	pub inner_vowels: usize,

	/// The number of vowels to place across the whole flower.
	pub total_vowels: usize,

	/// The chance of placing a rare consonant in each rare slot.
	pub rare_chance: f64
}

impl DifficultyProfile
{
	/// Check whether a candidate with the given score meets the bar. An
	/// exceptional word count meets any bar.
	///
	/// # Arguments
	///
	/// * `score` - The score of the candidate.
	///
	/// # Returns
	///
	/// `true` if the candidate is acceptable, `false` otherwise.
	#[must_use]
	pub fn accepts(&self, score: Score) -> bool
	{
		score.words >= EXCEPTIONAL_WORD_COUNT
			|| (score.words >= self.min_words
				&& self.min_productivity
					.map_or(true, |min| score.productivity >= min))
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Scoring.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The score of a candidate. Scores order by word count, then by pattern
/// productivity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score
{
	/// The number of formable dictionary words.
	pub words: usize,

	/// The number of common patterns whose letters the candidate can supply.
	pub productivity: usize
}

impl Display for Score
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{} words, {} patterns", self.words, self.productivity)
	}
}

/// Count the common prefixes, suffixes, and digraphs whose letters the
/// arrangement can supply. This is a cheap proxy for productivity that needs
/// no path search.
///
/// # Arguments
///
/// * `arrangement` - The arrangement.
///
/// # Returns
///
/// The number of satisfiable patterns.
#[must_use]
pub fn pattern_productivity(arrangement: &Arrangement) -> usize
{
	PATTERNS.iter().filter(|p| arrangement.can_supply(p)).count()
}

/// How a generated arrangement came about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance
{
	/// A candidate met the bar.
	Accepted,

	/// No candidate met the bar; this was the best of them.
	BestEffort,

	/// No candidate was playable; this is a fixed fallback.
	Fallback
}

impl Display for Provenance
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Accepted => write!(f, "accepted"),
			Self::BestEffort => write!(f, "best effort"),
			Self::Fallback => write!(f, "fallback")
		}
	}
}

/// The outcome of generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Generated
{
	/// The chosen arrangement.
	pub arrangement: Arrangement,

	/// The score of the chosen arrangement.
	pub score: Score,

	/// How the arrangement came about.
	pub provenance: Provenance,

	/// The number of candidates tried.
	pub attempts: usize
}

////////////////////////////////////////////////////////////////////////////////
//                                 Generator.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Generate an arrangement for the given difficulty, using an
/// entropy-seeded random number generator.
///
/// # Arguments
///
/// * `dictionary` - The dictionary against which candidates are scored.
/// * `difficulty` - The difficulty.
///
/// # Returns
///
/// The arrangement.
pub fn generate(dictionary: &DictionaryIndex, difficulty: Difficulty) -> Arrangement
{
	Generator::new(dictionary, difficulty).generate()
}

/// The arrangement generator. Holds the dictionary used for scoring and its
/// own source of randomness.
#[derive(Clone, Debug)]
pub struct Generator<'a, R: Rng = StdRng>
{
	/// The dictionary against which candidates are scored.
	dictionary: &'a DictionaryIndex,

	/// The difficulty.
	difficulty: Difficulty,

	/// The source of randomness.
	rng: R
}

impl<'a> Generator<'a, StdRng>
{
	/// Construct a generator with an entropy-seeded random number generator.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary against which candidates are scored.
	/// * `difficulty` - The difficulty.
	///
	/// # Returns
	///
	/// The generator.
	pub fn new(dictionary: &'a DictionaryIndex, difficulty: Difficulty) -> Self
	{
		Self::with_rng(dictionary, difficulty, StdRng::from_entropy())
	}

	/// Construct a generator whose output is determined by the seed.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary against which candidates are scored.
	/// * `difficulty` - The difficulty.
	/// * `seed` - The seed.
	///
	/// # Returns
	///
	/// The generator.
	pub fn seeded(
		dictionary: &'a DictionaryIndex,
		difficulty: Difficulty,
		seed: u64
	) -> Self
	{
		Self::with_rng(dictionary, difficulty, StdRng::seed_from_u64(seed))
	}
}

impl<'a, R: Rng> Generator<'a, R>
{
	/// Construct a generator with the given random number generator.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary against which candidates are scored.
	/// * `difficulty` - The difficulty.
	/// * `rng` - The source of randomness.
	///
	/// # Returns
	///
	/// The generator.
	pub fn with_rng(
		dictionary: &'a DictionaryIndex,
		difficulty: Difficulty,
		rng: R
	) -> Self
	{
		Self { dictionary, difficulty, rng }
	}

	/// Generate an arrangement.
	///
	/// # Returns
	///
	/// The arrangement.
	pub fn generate(&mut self) -> Arrangement
	{
		self.generate_report().arrangement
	}

	/// Generate an arrangement, reporting its score and how it came about.
	/// At most [`MAX_ATTEMPTS`] candidates are scored.
	///
	/// # Returns
	///
	/// The outcome of generation.
	pub fn generate_report(&mut self) -> Generated
	{
		let profile = self.difficulty.profile();
		let mut best: Option<(Arrangement, Score)> = None;
		for attempt in 1 ..= MAX_ATTEMPTS
		{
			let candidate = self.candidate();
			let score = self.score(&candidate);
			debug!("attempt {}: {}: {}", attempt, candidate, score);
			if profile.accepts(score)
			{
				info!(
					"Accepted {} ({}) after {} attempts",
					candidate,
					score,
					attempt
				);
				return Generated {
					arrangement: candidate,
					score,
					provenance: Provenance::Accepted,
					attempts: attempt
				}
			}
			if best.map_or(true, |(_, s)| score > s)
			{
				best = Some((candidate, score));
			}
		}
		match best
		{
			Some((arrangement, score)) if score.words > 0 =>
			{
				info!(
					"No {} candidate met the bar; settling for {} ({})",
					self.difficulty,
					arrangement,
					score
				);
				Generated {
					arrangement,
					score,
					provenance: Provenance::BestEffort,
					attempts: MAX_ATTEMPTS
				}
			},
			_ =>
			{
				let arrangement =
					FALLBACKS[self.rng.gen_range(0 .. FALLBACKS.len())];
				let score = self.score(&arrangement);
				warn!(
					"No playable {} candidate; using fallback {} ({})",
					self.difficulty,
					arrangement,
					score
				);
				Generated {
					arrangement,
					score,
					provenance: Provenance::Fallback,
					attempts: MAX_ATTEMPTS
				}
			}
		}
	}

	/// Score a candidate.
	///
	/// # Arguments
	///
	/// * `arrangement` - The candidate.
	///
	/// # Returns
	///
	/// The score.
	pub fn score(&self, arrangement: &Arrangement) -> Score
	{
		Score {
			words: count_formable_words(self.dictionary, arrangement),
			productivity: pattern_productivity(arrangement)
		}
	}

	/// Build a candidate arrangement from letter frequency heuristics.
	///
	/// # Returns
	///
	/// The candidate.
	pub fn candidate(&mut self) -> Arrangement
	{
		let profile = self.difficulty.profile();
		let center = self.weighted(profile.center_weights);
		let inner = self.inner_ring(center, &profile);
		let outer = self.outer_ring(center, &inner, &profile);
		let candidate = Arrangement::from_letters(center, inner, outer);
		trace!("candidate: {}", candidate);
		candidate
	}

	/// Build the inner ring: the target number of distinct vowels, `S` (unless
	/// it is the center) and another affix consonant, and distinct common
	/// consonants to fill the rest. No inner letter repeats the center.
	/// Productive digraphs are then seated side by side where a couple of
	/// swaps allow.
	///
	/// # Arguments
	///
	/// * `center` - The center letter.
	/// * `profile` - The generation parameters.
	///
	/// # Returns
	///
	/// The inner ring.
	fn inner_ring(
		&mut self,
		center: char,
		profile: &DifficultyProfile
	) -> [char; INNER_COUNT]
	{
		let mut ring = Vec::with_capacity(INNER_COUNT);
		while ring.len() < profile.inner_vowels.min(VOWELS.len() - 1)
		{
			let vowel = self.weighted(VOWELS);
			if vowel != center && !ring.contains(&vowel)
			{
				ring.push(vowel);
			}
		}
		let mut affixes = AFFIX_CONSONANTS.iter()
			.copied()
			.filter(|&c| c != center)
			.collect::<Vec<_>>();
		// Keep S in front; shuffle the others behind it.
		let rest = if affixes.first() == Some(&'S') { 1 } else { 0 };
		affixes[rest ..].shuffle(&mut self.rng);
		for c in affixes.into_iter().take(2)
		{
			if ring.len() < INNER_COUNT
			{
				ring.push(c);
			}
		}
		while ring.len() < INNER_COUNT
		{
			let consonant = self.weighted(CONSONANTS);
			if consonant != center && !ring.contains(&consonant)
			{
				ring.push(consonant);
			}
		}
		ring.shuffle(&mut self.rng);
		let mut inner = [' '; INNER_COUNT];
		inner.copy_from_slice(&ring);
		seat_digraphs(&mut inner);
		inner
	}

	/// Build the outer ring: enough vowels to bring the whole flower to its
	/// vowel target, an occasional rare consonant, and common consonants to
	/// fill the rest. Letters may repeat.
	///
	/// # Arguments
	///
	/// * `center` - The center letter.
	/// * `inner` - The inner ring.
	/// * `profile` - The generation parameters.
	///
	/// # Returns
	///
	/// The outer ring.
	fn outer_ring(
		&mut self,
		center: char,
		inner: &[char; INNER_COUNT],
		profile: &DifficultyProfile
	) -> [char; OUTER_COUNT]
	{
		let placed = usize::from(is_vowel(center))
			+ inner.iter().filter(|&&c| is_vowel(c)).count();
		let vowels = profile.total_vowels.saturating_sub(placed).min(OUTER_COUNT);
		let mut ring = Vec::with_capacity(OUTER_COUNT);
		for _ in 0 .. vowels
		{
			ring.push(self.weighted(VOWELS));
		}
		for _ in 0 .. RARE_SLOTS
		{
			if ring.len() < OUTER_COUNT && self.rng.gen_bool(profile.rare_chance)
			{
				let index = self.rng.gen_range(0 .. RARE_CONSONANTS.len());
				ring.push(RARE_CONSONANTS[index]);
			}
		}
		while ring.len() < OUTER_COUNT
		{
			ring.push(self.weighted(CONSONANTS));
		}
		ring.shuffle(&mut self.rng);
		let mut outer = [' '; OUTER_COUNT];
		outer.copy_from_slice(&ring);
		outer
	}

	/// Choose a letter from a weighted table.
	///
	/// # Arguments
	///
	/// * `weights` - The letters and their relative weights.
	///
	/// # Returns
	///
	/// The chosen letter. An empty or weightless table yields `E`.
	fn weighted(&mut self, weights: &[(char, u32)]) -> char
	{
		weights.choose_weighted(&mut self.rng, |&(_, w)| w)
			.map(|&(c, _)| c)
			.unwrap_or('E')
	}
}

/// Check whether the letter is a vowel.
#[inline]
#[must_use]
fn is_vowel(c: char) -> bool
{
	VOWELS.iter().any(|&(v, _)| v == c)
}

/// Seat productive digraphs side by side on the inner ring. Whenever both
/// letters of a digraph are present but apart, the second letter is swapped
/// into the slot after the first, unless either slot was already claimed by
/// an earlier digraph. At most [`MAX_DIGRAPH_SWAPS`] swaps are made.
///
/// # Arguments
///
/// * `ring` - The inner ring.
fn seat_digraphs(ring: &mut [char; INNER_COUNT])
{
	let mut claimed = [false; INNER_COUNT];
	let mut swaps = 0;
	for digraph in DIGRAPHS
	{
		let mut letters = digraph.chars();
		let (Some(a), Some(b)) = (letters.next(), letters.next())
		else
		{
			continue
		};
		let (Some(i), Some(j)) = (
			ring.iter().position(|&c| c == a),
			ring.iter().position(|&c| c == b)
		)
		else
		{
			continue
		};
		if (i + 1) % INNER_COUNT == j || (j + 1) % INNER_COUNT == i
		{
			claimed[i] = true;
			claimed[j] = true;
			continue
		}
		let target = (i + 1) % INNER_COUNT;
		if swaps >= MAX_DIGRAPH_SWAPS || claimed[target] || claimed[j] || i == j
		{
			continue
		}
		ring.swap(j, target);
		claimed[i] = true;
		claimed[target] = true;
		swaps += 1;
		trace!("seated {} at {}", digraph, i);
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
