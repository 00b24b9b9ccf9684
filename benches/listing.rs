// benches/listing.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use fpr_scrape::{
    config::{AppOptions, Vocabulary},
    core::{Document, html},
    data::SummaryRecord,
    specs::{detail, listing},
};

const LISTING: &str = include_str!("../tests/fixtures/listing.html");
const DETAIL: &str = include_str!("../tests/fixtures/detail.html");

/// The fixture's table repeated until it looks like a busy season.
fn large_listing(copies: usize) -> String {
    let table = LISTING.find("class=\"liste\"").expect("fixture has a listing table");
    let start = table + LISTING[table..].find("<tr>").expect("fixture has rows");
    let end = LISTING.rfind("</table>").expect("fixture has a table");
    let rows = &LISTING[start..end];
    let mut page = String::with_capacity(LISTING.len() + rows.len() * copies);
    page.push_str(&LISTING[..end]);
    for _ in 1..copies {
        page.push_str(rows);
    }
    page.push_str(&LISTING[end..]);
    page
}

fn bench_listing(c: &mut Criterion) {
    let opts = AppOptions::default();
    let vocab = Vocabulary::default();
    let min = opts.scrape.min_table_text;
    let doc = Document::parse(&large_listing(40));
    let control = html::selector(&opts.flow.control_selector).expect("selector");
    let target = SummaryRecord {
        date_time: "n.V., ab 10:00".into(),
        location: "Fischereiverein".into(),
        ..Default::default()
    };

    c.bench_function("listing_parse", |b| {
        b.iter(|| black_box(Document::parse(black_box(LISTING))))
    });

    c.bench_function("listing_extract", |b| {
        b.iter(|| {
            let rows = listing::extract_summaries(black_box(&doc), &vocab, min);
            black_box(rows.len())
        })
    });

    c.bench_function("listing_find_control_last_row", |b| {
        b.iter(|| black_box(listing::find_control(&target, black_box(&doc), &vocab, min, &control).is_ok()))
    });

    let page = Document::parse(DETAIL);
    c.bench_function("detail_parse", |b| {
        b.iter(|| black_box(detail::parse_detail(black_box(&page), &vocab, &opts.scrape.detail)))
    });
}

criterion_group!(benches, bench_listing);
criterion_main!(benches);
