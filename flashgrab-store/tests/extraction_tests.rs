//! End-to-end extraction tests.
//!
//! Runs the full service against canned pages: pagination, log, parsing,
//! spreadsheet, cap and expiry.

use async_trait::async_trait;
use flashgrab_fetch::{FetchError, PageSource, StopReason};
use flashgrab_core::{ChoiceOption, OptionLabel, StructuredRecord};
use flashgrab_store::{
    DeleteOutcome, ExtractionError, ExtractionService, Settings, read_log, to_buffer,
};
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

// ============================================================================
// Fixtures
// ============================================================================

/// Serves `pages[n - 1]` for `?page=n`; later pages are empty.
struct CannedSite {
    pages: Vec<String>,
    requested: Mutex<Vec<u32>>,
}

impl CannedSite {
    fn new(pages: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            pages,
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for CannedSite {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let page: u32 = url
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap();
        self.requested.lock().unwrap().push(page);
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_else(|| "<html><body>The end</body></html>".to_string()))
    }
}

fn jsonld_page(cards: &[(&str, &str)]) -> String {
    let parts: Vec<String> = cards
        .iter()
        .map(|(q, a)| {
            serde_json::json!({"@type": "Question", "text": q, "acceptedAnswer": {"text": a}})
                .to_string()
        })
        .collect();
    format!(
        r#"<html><head><script type="application/ld+json">{{"@type":"Quiz","hasPart":[{}]}}</script></head><body></body></html>"#,
        parts.join(",")
    )
}

fn markup_page(cards: &[(&str, &str)]) -> String {
    let body: String = cards
        .iter()
        .map(|(q, a)| format!(r#"<div class="question">{q}</div><div class="answer">{a}</div>"#))
        .collect();
    format!("<html><body>{body}</body></html>")
}

fn service(dir: &Path, site: Arc<CannedSite>, max_artifacts: usize) -> ExtractionService {
    let settings = Settings {
        artifacts_dir: Some(dir.to_path_buf()),
        max_artifacts,
        ..Settings::default()
    };
    ExtractionService::with_source(settings, site).unwrap()
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(ext))
        .collect();
    names.sort();
    names
}

/// Reads one part of a written workbook.
fn workbook_part(path: &Path, part: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut xml = String::new();
    archive.by_name(part).unwrap().read_to_string(&mut xml).unwrap();
    xml
}

/// Number of rows in the single worksheet, header included.
fn sheet_rows(path: &Path) -> usize {
    workbook_part(path, "xl/worksheets/sheet1.xml")
        .matches("<row ")
        .count()
}

// ============================================================================
// Extraction
// ============================================================================

#[tokio::test]
async fn test_rows_match_records_across_pages() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![
        jsonld_page(&[("What is 2+2?\nA) 3\nB) 4\nC) 5", "B) 4"), ("Capital of Peru?", "Lima")]),
        markup_page(&[("Largest planet?", "Jupiter")]),
    ]);
    let svc = service(dir.path(), Arc::clone(&site), 10);

    let report = svc
        .run_extraction("https://site.com/123-sample-page")
        .await
        .unwrap();

    assert_eq!(report.records, 3);
    assert_eq!(report.pages, 3);
    assert_eq!(report.stop, StopReason::Exhausted);
    assert_eq!(site.requested(), vec![1, 2, 3]);

    assert!(report.name.starts_with("samplepage_"));
    assert!(report.name.ends_with(".xlsx"));
    assert!(report.path.exists());
    assert_eq!(report.info.name, report.name);

    // The intermediate log is gone once the artifact exists.
    assert!(files_with_extension(dir.path(), ".txt").is_empty());
    assert_eq!(files_with_extension(dir.path(), ".xlsx"), vec![report.name.clone()]);
}

#[tokio::test]
async fn test_written_workbook_holds_every_record() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![
        jsonld_page(&[("What is 2+2?\nA) 3\nB) 4\nC) 5", "B) 4"), ("Capital of Peru?", "Lima")]),
        markup_page(&[("Largest planet?", "Jupiter")]),
    ]);
    let svc = service(dir.path(), site, 10);

    let report = svc
        .run_extraction("https://site.com/123-sample-page")
        .await
        .unwrap();
    report.expiry.cancel();

    assert_eq!(sheet_rows(&report.path), report.records + 1);

    let expected = vec![
        StructuredRecord::with_options(
            "What is 2+2?",
            vec![
                ChoiceOption::new(OptionLabel::A, "3"),
                ChoiceOption::new(OptionLabel::B, "4"),
                ChoiceOption::new(OptionLabel::C, "5"),
            ],
            "B) 4",
        ),
        StructuredRecord::open("Capital of Peru?", "Lima"),
        StructuredRecord::open("Largest planet?", "Jupiter"),
    ];
    let written = std::fs::read(&report.path).unwrap();
    assert_eq!(written, to_buffer(&expected).unwrap());

    let strings = workbook_part(&report.path, "xl/sharedStrings.xml");
    for text in ["Question", "Options", "Answer", "What is 2+2?", "Lima", "Jupiter"] {
        assert!(strings.contains(text), "{text} missing from workbook");
    }
}

#[tokio::test]
async fn test_no_records_writes_header_only_sheet() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![]);
    let svc = service(dir.path(), Arc::clone(&site), 10);

    let report = svc
        .run_extraction("https://site.com/empty-deck")
        .await
        .unwrap();
    report.expiry.cancel();

    assert_eq!(report.records, 0);
    assert_eq!(report.pages, 1);
    assert_eq!(site.requested(), vec![1]);
    assert_eq!(sheet_rows(&report.path), 1);
    assert_eq!(std::fs::read(&report.path).unwrap(), to_buffer(&[]).unwrap());

    assert!(files_with_extension(dir.path(), ".txt").is_empty());
    assert_eq!(files_with_extension(dir.path(), ".xlsx"), vec![report.name.clone()]);
}

#[tokio::test]
async fn test_invalid_url_is_rejected_before_fetching() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![markup_page(&[("q", "a")])]);
    let svc = service(dir.path(), Arc::clone(&site), 10);

    for url in ["not a url", "ftp://site.com/deck"] {
        let err = svc.run_extraction(url).await.unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUrl(_)), "{url}");
    }
    assert!(site.requested().is_empty());
}

#[tokio::test]
async fn test_log_round_trip_keeps_options() {
    // Write through the sink the service uses, then read it back.
    use flashgrab_core::{FlashcardRecord, RecordSink};
    use flashgrab_store::LogWriter;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.txt");
    let mut writer = LogWriter::create(&path).await.unwrap();
    writer
        .append(
            &[
                FlashcardRecord::new("What is 2+2?\nA) 3\nB) 4\nC) 5", "B) 4"),
                FlashcardRecord::new("Speed of light?", "299 792 km/s"),
                FlashcardRecord::new("Read this:\nQuestion 2: is a heading\nWhich?", "yes"),
            ],
            1,
        )
        .await
        .unwrap();

    let records = read_log(&path).await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].question, "What is 2+2?");
    assert_eq!(records[0].options.len(), 3);
    assert_eq!(records[1].question, "Speed of light?");
    assert!(records[1].options.is_empty());
    assert_eq!(records[2].question, "Read this:\nQuestion 2: is a heading\nWhich?");
    assert_eq!(records[2].answer, "yes");
}

// ============================================================================
// Artifact Lifecycle
// ============================================================================

#[tokio::test]
async fn test_cap_keeps_newest_artifacts() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![markup_page(&[("q", "a")])]);
    let svc = service(dir.path(), site, 2);

    let mut names = Vec::new();
    for _ in 0..3 {
        let report = svc.run_extraction("https://site.com/deck").await.unwrap();
        report.expiry.cancel();
        names.push(report.name);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let listed: Vec<String> = svc
        .list_artifacts()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(listed, vec![names[2].clone(), names[1].clone()]);
}

#[tokio::test]
async fn test_expiry_then_delete_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![markup_page(&[("q", "a")])]);
    let settings = Settings {
        artifacts_dir: Some(dir.path().to_path_buf()),
        expiry_secs: 0,
        ..Settings::default()
    };
    let svc = ExtractionService::with_source(settings, site).unwrap();

    let report = svc.run_extraction("https://site.com/deck").await.unwrap();
    let name = report.name.clone();
    report.expiry.wait().await;

    assert!(svc.artifact_path(&name).await.unwrap().is_none());
    assert!(svc.list_artifacts().await.unwrap().is_empty());
    assert_eq!(svc.delete_artifact(&name).await.unwrap(), DeleteOutcome::NotFound);
}

#[tokio::test]
async fn test_delete_and_resolve() {
    let dir = TempDir::new().unwrap();
    let site = CannedSite::new(vec![markup_page(&[("q", "a")])]);
    let svc = service(dir.path(), site, 10);

    let report = svc.run_extraction("https://site.com/deck").await.unwrap();
    report.expiry.cancel();

    assert_eq!(svc.artifact_path(&report.name).await.unwrap(), Some(report.path.clone()));
    assert_eq!(svc.delete_artifact(&report.name).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(svc.delete_artifact(&report.name).await.unwrap(), DeleteOutcome::NotFound);
    assert!(svc.artifact_path("../../etc/passwd.xlsx").await.is_err());
}

#[tokio::test]
async fn test_sweep_removes_stale_artifacts() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("old_deck.xlsx"), b"PK").unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let site = CannedSite::new(vec![]);
    let settings = Settings {
        artifacts_dir: Some(dir.path().to_path_buf()),
        expiry_secs: 1,
        ..Settings::default()
    };
    let svc = ExtractionService::with_source(settings, site).unwrap();

    let report = svc.sweep().await.unwrap();
    assert_eq!(report.expired, vec!["old_deck.xlsx"]);
    assert!(report.evicted.is_empty());
    assert_eq!(report.removed(), 1);
}
