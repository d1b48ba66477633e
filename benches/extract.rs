// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use scraper::Html;

use oscar_scrape::{
    scrape,
    specs::{select_nomination_tables, interpret_table},
    Policy,
};

/// A captured category page if one is around, else a synthetic one of similar shape.
fn load_sample() -> String {
    std::fs::read_to_string(".ignore/page_samples/best_picture.html").unwrap_or_else(|_| synthetic_page(90, 5))
}

fn synthetic_page(years: usize, per_year: usize) -> String {
    let mut body = String::from(
        r#"<html><body><div id="mw-content-text"><h2>Winners and nominees</h2><h3>All years</h3>
        <table class="wikitable"><tr><th>Year</th><th>Film</th><th>Producer(s)</th></tr>"#,
    );
    for y in 0..years {
        let year = 1929 + y;
        for n in 0..per_year {
            let year_cell = if n == 0 {
                format!(r#"<td rowspan="{per_year}">{year} ({}th)</td>"#, year - 1928)
            } else {
                String::new()
            };
            let style = if n == 0 { r#" style="background:#FAEB86""# } else { "" };
            body.push_str(&format!(
                r##"<tr{style}>{year_cell}<td><i><a href="/wiki/Film_{year}_{n}_(film)">Film {year} {n}</a></i></td><td><a href="/wiki/Producer_{n}">Producer {n}</a>, <a href="/wiki/Other_{n}">Other {n}</a><sup><a href="#cite_note-{n}">[{n}]</a></sup></td></tr>"##
            ));
        }
    }
    body.push_str("</table></div></body></html>");
    body
}

fn bench_extract(c: &mut Criterion) {
    let html = load_sample();
    let policy = Policy::default();

    c.bench_function("extract_page", |b| {
        b.iter(|| {
            let (recs, _) = scrape::extract_page(black_box(&html), "Best_Picture", &policy);
            black_box(recs.len())
        })
    });

    let doc = Html::parse_document(&html);
    c.bench_function("interpret_tables_preparsed", |b| {
        b.iter(|| {
            let n: usize = select_nomination_tables(black_box(&doc), &policy)
                .iter()
                .map(|t| interpret_table(t, "Best_Picture", &policy).len())
                .sum();
            black_box(n)
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
