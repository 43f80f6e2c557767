//! Criterion benchmarks for the scripture library.
//!
//! Covers verse analysis, index construction, conjunctive search, snippet
//! extraction and Zefania parsing over a generated corpus.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use scripture::analysis::{Analyzer, VerseAnalyzer};
use scripture::corpus::{Book, Chapter, Corpus, Translation, Verse};
use scripture::document::CollisionPolicy;
use scripture::document::zefania::parse_document;
use scripture::search::{SearchIndex, snippet};
use std::fmt::Write;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "and", "the", "lord", "god", "said", "unto", "him", "light", "darkness", "earth", "heaven",
    "waters", "day", "night", "upon", "face", "deep", "spirit", "moved", "created", "beginning",
    "shepherd", "mercy", "truth", "king", "people", "israel", "house", "land", "children",
];

/// Generate verse texts for benchmarking.
fn generate_verses(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let len = 12 + i % 20;
            (0..len)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
                + "."
        })
        .collect()
}

/// Build a corpus of `translations` copies of the same book layout.
fn generate_corpus(translations: usize, verses: &[String]) -> Corpus {
    let mut corpus = Corpus::new();
    for t in 0..translations {
        let mut translation = Translation::new(format!("T{t}"), format!("Translation {t}"));
        for (b, book_verses) in verses.chunks(500).enumerate() {
            let mut book = Book::new(format!("B{b}"), format!("Book {b}"));
            for (c, chapter_verses) in book_verses.chunks(25).enumerate() {
                let verses = chapter_verses
                    .iter()
                    .enumerate()
                    .map(|(v, text)| Verse::new(v as u32 + 1, text.as_str()))
                    .collect();
                book.insert_chapter(Chapter::new(c as u32 + 1, verses));
            }
            translation.insert_book(book);
        }
        corpus.insert(translation);
    }
    corpus
}

fn generate_document(verses: &[String]) -> String {
    let mut xml = String::from(r#"<XMLBIBLE biblename="Bench">"#);
    for (b, book_verses) in verses.chunks(500).enumerate() {
        let _ = write!(xml, r#"<BIBLEBOOK bname="Book {b}" bsname="B{b}">"#);
        for (c, chapter_verses) in book_verses.chunks(25).enumerate() {
            let _ = write!(xml, r#"<CHAPTER cnumber="{}">"#, c + 1);
            for (v, text) in chapter_verses.iter().enumerate() {
                let _ = write!(xml, r#"<VERS vnumber="{}">{text}</VERS>"#, v + 1);
            }
            xml.push_str("</CHAPTER>");
        }
        xml.push_str("</BIBLEBOOK>");
    }
    xml.push_str("</XMLBIBLE>");
    xml
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let analyzer = VerseAnalyzer::default();
    let verses = generate_verses(100);

    group.bench_function("analyze_single_verse", |b| {
        b.iter(|| black_box(analyzer.terms(black_box(&verses[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_verses", |b| {
        b.iter(|| {
            for verse in &verses {
                black_box(analyzer.terms(verse));
            }
        })
    });

    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    group.sample_size(20);

    let verses = generate_verses(5_000);
    let corpus = generate_corpus(3, &verses);

    group.throughput(Throughput::Elements(corpus.verse_count() as u64));
    group.bench_function("build_from_corpus", |b| {
        b.iter(|| black_box(SearchIndex::from_corpus(black_box(&corpus))))
    });

    let index = SearchIndex::from_corpus(&corpus);
    group.throughput(Throughput::Elements(1));
    group.bench_function("search_single_token", |b| {
        b.iter(|| black_box(index.search("T1", black_box("shepherd"), 50)))
    });
    group.bench_function("search_three_tokens", |b| {
        b.iter(|| black_box(index.search("T1", black_box("lord god light"), 50)))
    });
    group.bench_function("search_no_match", |b| {
        b.iter(|| black_box(index.search("T1", black_box("serpent shepherd"), 50)))
    });

    group.finish();
}

fn bench_snippet(c: &mut Criterion) {
    let mut group = c.benchmark_group("snippet");
    let text = generate_verses(40).join(" ");

    group.bench_function("snippet_match", |b| {
        b.iter(|| black_box(snippet(black_box(&text), "Shepherd", 120)))
    });
    group.bench_function("snippet_no_match", |b| {
        b.iter(|| black_box(snippet(black_box(&text), "serpent", 120)))
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(20);

    let verses = generate_verses(5_000);
    let xml = generate_document(&verses);

    group.throughput(Throughput::Bytes(xml.len() as u64));
    group.bench_function("zefania_document", |b| {
        b.iter(|| black_box(parse_document("BENCH", black_box(&xml), CollisionPolicy::Overwrite)))
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_index, bench_snippet, bench_parse);
criterion_main!(benches);
