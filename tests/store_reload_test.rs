//! Integration tests for publishing new snapshots while readers query.

use std::fs;
use std::sync::Arc;
use std::thread;

use scripture::config::ScriptureConfig;
use scripture::store::CorpusStore;
use tempfile::TempDir;

fn bible(name: &str, verse: &str) -> String {
    format!(
        r#"<XMLBIBLE biblename="{name}">
  <BIBLEBOOK bname="Psalms" bsname="PSA">
    <CHAPTER cnumber="23">
      <VERS vnumber="1">{verse}</VERS>
    </CHAPTER>
  </BIBLEBOOK>
</XMLBIBLE>"#
    )
}

#[test]
fn test_reload_picks_up_new_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("KJV.xml"),
        bible("King James Version", "The LORD is my shepherd; I shall not want."),
    )
    .unwrap();

    let config = ScriptureConfig::builder().data_dir(dir.path()).build().unwrap();
    let store = CorpusStore::new(&config);
    store.ensure_loaded().unwrap();
    assert_eq!(store.translations().translations, vec!["KJV"]);

    fs::write(
        dir.path().join("ASV.xml"),
        bible("American Standard Version", "Jehovah is my shepherd; I shall not want."),
    )
    .unwrap();

    // Already loaded, so nothing changes until an explicit reload.
    store.ensure_loaded().unwrap();
    assert_eq!(store.translations().translations, vec!["KJV"]);

    let report = store.reload().unwrap();
    assert_eq!(report.translations, 2);
    assert_eq!(store.translations().translations, vec!["ASV", "KJV"]);
    assert_eq!(store.search("ASV", "jehovah", 10).unwrap().results.len(), 1);
}

#[test]
fn test_readers_see_whole_snapshots_during_reloads() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("KJV.xml"),
        bible("King James Version", "The LORD is my shepherd; I shall not want."),
    )
    .unwrap();

    let config = ScriptureConfig::builder().data_dir(dir.path()).build().unwrap();
    let store = Arc::new(CorpusStore::new(&config));
    store.reload().unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.snapshot();
                    // Corpus and index always come from the same load.
                    assert_eq!(snapshot.index.len(), snapshot.corpus.verse_count());
                    assert_eq!(snapshot.index.search("KJV", "shepherd", 10).len(), 1);
                }
            });
        }

        let store = Arc::clone(&store);
        scope.spawn(move || {
            for _ in 0..20 {
                store.reload().unwrap();
            }
        });
    });
}
