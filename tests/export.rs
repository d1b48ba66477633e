// tests/export.rs
use std::fs;
use std::path::PathBuf;

use oscar_scrape::config::{CacheOptions, CategorySelector, ExportFormat, ExportOptions, RunOptions, ScrapeOptions};
use oscar_scrape::file::{write_ceremonies, write_nominations};
use oscar_scrape::progress::RecordingProgress;
use oscar_scrape::runner;
use oscar_scrape::{CeremonyRecord, EntityMention, NominationRecord, Policy, StaticSource};

fn out_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("oscar_scrape_export_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn parasite() -> NominationRecord {
    NominationRecord {
        category: String::from("Best Picture"),
        film_title: String::from("Parasite"),
        film_link: Some(String::from("https://en.wikipedia.org/wiki/Parasite_(2019_film)")),
        people: vec![
            EntityMention::new("Kwak Sin-ae", Some(String::from("https://en.wikipedia.org/wiki/Kwak_Sin-ae"))),
            EntityMention::unlinked("Bong Joon-ho"),
        ],
        is_winner: true,
        edition: Some(92),
        ceremony_year: Some(2020),
        ordinal: 1,
    }
}

#[test]
fn nominations_csv_with_headers() {
    let dir = out_dir("csv");
    let export = ExportOptions { out_dir: dir.clone(), ..Default::default() };
    let path = write_nominations(&export, &[parasite()]).unwrap();
    assert_eq!(path, dir.join("nominations.csv"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Category,Edition,Year,Film,Film Link,People,People Links,Winner,Ordinal");
    assert_eq!(
        lines[1],
        "Best Picture,92,2020,Parasite,https://en.wikipedia.org/wiki/Parasite_(2019_film),Kwak Sin-ae; Bong Joon-ho,https://en.wikipedia.org/wiki/Kwak_Sin-ae; ,yes,1"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tsv_without_headers() {
    let dir = out_dir("tsv");
    let export = ExportOptions { out_dir: dir.clone(), format: ExportFormat::Tsv, include_headers: false };
    let rec = CeremonyRecord {
        edition: 92,
        year: Some(2020),
        venue: Some(String::from("Dolby Theatre")),
        producers: vec![String::from("Lynette Howell Taylor"), String::from("Stephanie Allain")],
        ..Default::default()
    };
    let path = write_ceremonies(&export, &[rec]).unwrap();
    assert!(path.ends_with("ceremonies.tsv"));
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("92\t2020\t"));
    assert!(text.contains("Lynette Howell Taylor; Stephanie Allain"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn runner_end_to_end() {
    let page = r#"<div id="mw-content-text"><h2>Winners and nominees</h2>
      <table class="wikitable">
        <tr><th>Year</th><th>Film</th><th>Producer(s)</th></tr>
        <tr style="background:#FAEB86"><td rowspan="2">2019 (92nd)</td><td><a href="/wiki/Parasite_(2019_film)">Parasite</a></td><td><a href="/wiki/Kwak_Sin-ae">Kwak Sin-ae</a> and <a href="/wiki/Bong_Joon-ho">Bong Joon-ho</a></td></tr>
        <tr><td><a href="/wiki/1917_(2019_film)">1917</a></td><td><a href="/wiki/Sam_Mendes">Sam Mendes</a></td></tr>
      </table></div>"#;
    let film = r#"<h1 id="firstHeading">Parasite (2019 film)</h1><div id="mw-content-text"><table class="infobox"><tr><th>Running time</th><td>132 minutes</td></tr></table></div>"#;
    let person = r#"<h1 id="firstHeading">Sam Mendes</h1><div id="mw-content-text"><p>He directed 1917.</p></div>"#;

    let source = StaticSource::new()
        .with_page("https://en.wikipedia.org/wiki/Academy_Award_for_Best_Picture", page)
        .with_page("https://en.wikipedia.org/wiki/Parasite_(2019_film)", film)
        .with_page("https://en.wikipedia.org/wiki/Sam_Mendes", person);

    let dir = out_dir("run");
    let opts = RunOptions {
        scrape: ScrapeOptions {
            categories: CategorySelector::Some(vec![String::from("Best Picture"), String::from("Best_Sound")]),
            details: true,
            ceremonies: vec![92],
            workers: 2,
            pause_ms: 0,
        },
        export: ExportOptions { out_dir: dir.clone(), ..Default::default() },
        cache: CacheOptions { dir: None, offline: false },
    };

    let mut progress = RecordingProgress::default();
    let summary = runner::run(&opts, &Policy::default(), &source, Some(&mut progress)).unwrap();

    assert_eq!(summary.nominations, 2);
    assert_eq!(summary.winners, 1);
    assert_eq!(summary.empty_categories, vec!["Best_Sound"]);
    // 1917's page is missing: only Parasite becomes a film record.
    assert_eq!(summary.movies, 1);
    // Unreadable people keep their nominated names.
    assert_eq!(summary.persons, 3);
    assert_eq!(summary.ceremonies, 0);
    assert_eq!(summary.files_written.len(), 3);
    assert!(dir.join("nominations.csv").exists());
    assert!(dir.join("movies.csv").exists());
    assert!(dir.join("persons.csv").exists());
    assert!(!dir.join("ceremonies.csv").exists());

    let phases: Vec<&str> = progress.phases.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(phases, vec!["categories", "films", "people", "ceremonies"]);
    assert_eq!(progress.lines.len(), 3);
    assert!(progress.lines[0].starts_with("wrote ") && progress.lines[0].ends_with("nominations.csv"));
    assert!(progress.lines[2].ends_with("persons.csv"));

    let persons = fs::read_to_string(dir.join("persons.csv")).unwrap();
    assert!(persons.contains("Sam Mendes,https://en.wikipedia.org/wiki/Sam_Mendes,,,,male,Sam,,Mendes"));
    let _ = fs::remove_dir_all(&dir);
}
