//! Benchmarks for tvsort-matcher.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tvsort_common::{EpisodeId, SeriesId};
use tvsort_matcher::bktree::{BkTree, EditDistance};
use tvsort_matcher::distance::levenshtein;
use tvsort_matcher::{FilenameProcessor, InMemoryCatalogue, MatcherConfig, NormalizedString};

const NAMES: &[&str] = &[
    "Example Show - 1x01 - Named Episode.mkv",
    "/tv/Example Show/Season 2/Example.Show.S02E07.Episode.Seven.720p.HDTV.x264.mkv",
    "[Group] Series 12 - 03 - Episode Three [1080p].mkv",
    "Series 40 20240105 Episode Five.avi",
    "holiday/IMG_2041.jpg",
];

/// A catalogue of `series` shows with 50 episodes each.
fn catalogue(series: usize) -> InMemoryCatalogue {
    let mut catalogue = InMemoryCatalogue::new();
    for s in 0..series {
        let id = SeriesId::new(format!("series-{s}"));
        let title = if s == 0 {
            "Example Show".to_string()
        } else {
            format!("Series {s}")
        };
        catalogue.add_series(id.clone(), title);
        for e in 0..50u32 {
            let episode = EpisodeId::new(format!("{s}-{e}"));
            let (season, number) = (e / 10 + 1, e % 10 + 1);
            catalogue
                .add_episode(&id, episode.clone(), season, number, Some(e + 1))
                .add_title(&id, episode, format!("Episode {}", words(e)));
        }
    }
    catalogue.add_keyword("720p").add_keyword("1080p").add_keyword("HDTV").add_keyword("x264");
    catalogue
}

fn words(n: u32) -> String {
    const ONES: &[&str] = &["Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine"];
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| ONES[d as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    for series in [10, 100, 1000] {
        let catalogue = catalogue(series);
        let keywords = catalogue.clone();
        let mut processor =
            FilenameProcessor::new(catalogue, &keywords, MatcherConfig::default()).unwrap();

        group.throughput(Throughput::Elements(NAMES.len() as u64));
        group.bench_with_input(BenchmarkId::new("names", series), &series, |b, _| {
            b.iter(|| {
                for name in NAMES {
                    let _ = black_box(processor.process(black_box(name)));
                }
            })
        });
    }

    group.finish();
}

fn bench_building_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("building_blocks");

    group.bench_function("normalize", |b| {
        b.iter(|| NormalizedString::new(black_box(NAMES[1])))
    });

    group.bench_function("levenshtein", |b| {
        b.iter(|| levenshtein(black_box("named episode"), black_box("named episode 720p hdtv x264")))
    });

    let titles: Vec<String> = (0..2000).map(|e| format!("episode {}", words(e))).collect();
    let tree = BkTree::new(titles.clone(), EditDistance);
    let target = "episode one two three".to_string();
    group.bench_function("bktree_find", |b| b.iter(|| tree.find(black_box(&target), 2)));
    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            titles
                .iter()
                .filter(|t| levenshtein(t, black_box(&target)).distance <= 2)
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_process, bench_building_blocks);
criterion_main!(benches);
