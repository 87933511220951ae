use std::time::Duration;

use const_format::concatcp;
use criterion::{measurement::Measurement, BenchmarkGroup, Criterion};
use wordbloom::{
	arrangement::Arrangement,
	dictionary::DictionaryIndex,
	generator::{Difficulty, Generator},
	path::{find_formable_words, find_path}
};

/// The path of the directory containing the dictionaries.
#[inline]
#[must_use]
const fn dir() -> &'static str
{
	"dict"
}

/// The name of the dictionary file.
#[inline]
#[must_use]
const fn name() -> &'static str
{
	"english"
}

/// The path to the text file.
#[inline]
#[must_use]
const fn path_txt() -> &'static str
{
	concatcp!(dir(), "/", name(), ".txt")
}

/// The path to the binary file.
#[inline]
#[must_use]
const fn path_dict() -> &'static str
{
	concatcp!(dir(), "/", name(), ".dict")
}

/// The puzzle used by the search benchmarks.
const ARRANGEMENT: &str = "E/RATSIN/DLOCEPMAGUHB";

/// Benchmark reading a dictionary from a file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_read_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("read_from_file", |b| {
		b.iter(|| DictionaryIndex::read_from_file(path_txt()).unwrap());
	});
}

/// Benchmark deserializing a dictionary from a file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_deserialize_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("deserialize_from_file", |b| {
		b.iter(|| DictionaryIndex::deserialize_from_file(path_dict()).unwrap());
	});
}

/// Benchmark tracing a single long word.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_find_path<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	let arrangement = ARRANGEMENT.parse::<Arrangement>().unwrap();
	g.bench_function("find_path", |b| {
		b.iter(|| find_path("STRAINED", &arrangement));
	});
}

/// Benchmark finding every formable word of a puzzle.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `dictionary` - The dictionary.
fn bench_find_formable_words<M: Measurement>(
	g: &mut BenchmarkGroup<M>,
	dictionary: &DictionaryIndex
) {
	let arrangement = ARRANGEMENT.parse::<Arrangement>().unwrap();
	g.bench_function("find_formable_words", |b| {
		b.iter(|| find_formable_words(dictionary, &arrangement));
	});
}

/// Benchmark generating a puzzle at each difficulty.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `dictionary` - The dictionary.
fn bench_generate<M: Measurement>(
	g: &mut BenchmarkGroup<M>,
	dictionary: &DictionaryIndex
) {
	for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
	{
		g.bench_function(format!("generate_{}", difficulty), |b| {
			b.iter(|| {
				Generator::seeded(dictionary, difficulty, 0).generate_report()
			});
		});
	}
}

/// Run all benchmarks.
///
/// Besides timing generation, the benchmarks check that
/// [`deserialize_from_file`](DictionaryIndex::deserialize_from_file) is
/// faster than [`read_from_file`](DictionaryIndex::read_from_file).
fn main()
{
	// Ensure that both the text and binary files exist.
	let dictionary = DictionaryIndex::open(dir(), name()).unwrap();

	// Run the benchmarks.
	let mut criterion = Criterion::default().configure_from_args();
	let mut group = criterion.benchmark_group("benchmarks");
	group.measurement_time(Duration::from_secs(10));
	bench_read_from_file(&mut group);
	bench_deserialize_from_file(&mut group);
	bench_find_path(&mut group);
	bench_find_formable_words(&mut group, &dictionary);
	bench_generate(&mut group, &dictionary);
	group.finish();

	// Generate the final summary.
	criterion.final_summary();
}
