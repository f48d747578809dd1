//! Integration tests for `SqliteStore` against an in-memory database.

use statefacts_core::{
  funfact::{Edit, FunFactRecord, Insert, Rejection},
  reference::NON_CONTIGUOUS,
  store::FunFactStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn facts(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

async fn seeded(code: &str, items: &[&str]) -> SqliteStore {
  let s = store().await;
  s.save(FunFactRecord::new(code, facts(items))).await.unwrap();
  s
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_has_no_records() {
  let s = store().await;
  assert!(s.find_all().await.unwrap().is_empty());
  assert!(s.find_one("CA").await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_keeps_insertion_order() {
  let s = store().await;
  s.save(FunFactRecord::new("TX", facts(&["big"]))).await.unwrap();
  s.save(FunFactRecord::new("AK", facts(&["cold"]))).await.unwrap();
  s.save(FunFactRecord::new("CA", facts(&["gold"]))).await.unwrap();

  let codes: Vec<String> = s
    .find_all()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.state_code)
    .collect();
  assert_eq!(codes, ["TX", "AK", "CA"]);
}

#[tokio::test]
async fn find_excluding_skips_listed_codes() {
  let s = store().await;
  for code in ["AK", "CA", "HI", "TX"] {
    s.save(FunFactRecord::new(code, facts(&["x"]))).await.unwrap();
  }

  let records = s.find_excluding(NON_CONTIGUOUS).await.unwrap();
  let codes: Vec<&str> = records.iter().map(|r| r.state_code.as_str()).collect();
  assert_eq!(codes, ["CA", "TX"]);
}

// ─── Whole-record writes ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_find_one() {
  let s = store().await;
  let outcome = s
    .create(FunFactRecord::new("CA", facts(&["gold", "redwoods"])))
    .await
    .unwrap();
  assert!(matches!(outcome, Insert::Inserted(_)));

  let found = s.find_one("CA").await.unwrap().unwrap();
  assert_eq!(found.funfacts, ["gold", "redwoods"]);
}

#[tokio::test]
async fn create_duplicate_leaves_existing_record() {
  let s = seeded("CA", &["gold"]).await;

  let outcome = s
    .create(FunFactRecord::new("CA", facts(&["overwritten?"])))
    .await
    .unwrap();
  assert_eq!(outcome, Insert::AlreadyExists);

  let found = s.find_one("CA").await.unwrap().unwrap();
  assert_eq!(found.funfacts, ["gold"]);
}

#[tokio::test]
async fn save_overwrites() {
  let s = seeded("CA", &["gold"]).await;
  s.save(FunFactRecord::new("CA", facts(&["silver"]))).await.unwrap();

  let found = s.find_one("CA").await.unwrap().unwrap();
  assert_eq!(found.funfacts, ["silver"]);
  assert_eq!(s.find_all().await.unwrap().len(), 1);
}

// ─── Append ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_creates_missing_record() {
  let s = store().await;
  let record = s.append("TX".into(), facts(&["big"])).await.unwrap();
  assert_eq!(record, FunFactRecord::new("TX", facts(&["big"])));
  assert_eq!(s.find_one("TX").await.unwrap(), Some(record));
}

#[tokio::test]
async fn append_extends_in_order() {
  let s = seeded("TX", &["big"]).await;
  let record = s
    .append("TX".into(), facts(&["hot", "proud"]))
    .await
    .unwrap();
  assert_eq!(record.funfacts, ["big", "hot", "proud"]);
}

#[tokio::test]
async fn concurrent_appends_do_not_lose_updates() {
  let s = seeded("CA", &[]).await;

  let mut handles = Vec::new();
  for i in 0..20 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.append("CA".into(), vec![format!("fact {i}")]).await.unwrap();
    }));
  }
  for h in handles {
    h.await.unwrap();
  }

  let found = s.find_one("CA").await.unwrap().unwrap();
  assert_eq!(found.funfacts.len(), 20);
}

// ─── Index-based edits ───────────────────────────────────────────────────────

#[tokio::test]
async fn replace_at_first_and_last_index() {
  let s = seeded("CA", &["a", "b", "c"]).await;

  s.replace_at("CA".into(), 1, "first".into()).await.unwrap();
  let edit = s.replace_at("CA".into(), 3, "last".into()).await.unwrap();

  let Edit::Applied(record) = edit else { panic!("expected an applied edit") };
  assert_eq!(record.funfacts, ["first", "b", "last"]);
  assert_eq!(s.find_one("CA").await.unwrap().unwrap(), record);
}

#[tokio::test]
async fn replace_out_of_range_is_rejected_and_unchanged() {
  let s = seeded("CA", &["a", "b"]).await;

  for index in [0, 3, -1] {
    let edit = s.replace_at("CA".into(), index, "x".into()).await.unwrap();
    assert_eq!(
      edit,
      Edit::Rejected(Rejection::InvalidIndex { index, len: 2 })
    );
  }
  assert_eq!(s.find_one("CA").await.unwrap().unwrap().funfacts, ["a", "b"]);
}

#[tokio::test]
async fn edits_on_missing_or_empty_record_report_no_fun_facts() {
  let s = seeded("CA", &[]).await;

  assert_eq!(
    s.remove_at("CA".into(), 1).await.unwrap(),
    Edit::Rejected(Rejection::NoFunFacts)
  );
  assert_eq!(
    s.replace_at("TX".into(), 1, "x".into()).await.unwrap(),
    Edit::Rejected(Rejection::NoFunFacts)
  );
}

#[tokio::test]
async fn append_then_remove_restores_list() {
  let s = seeded("CA", &["a", "b"]).await;

  let appended = s.append("CA".into(), facts(&["new"])).await.unwrap();
  let index = appended.funfacts.len() as i64;

  let edit = s.remove_at("CA".into(), index).await.unwrap();
  assert_eq!(edit, Edit::Applied(FunFactRecord::new("CA", facts(&["a", "b"]))));
}

#[tokio::test]
async fn remove_middle_shifts_later_entries() {
  let s = seeded("CA", &["a", "b", "c"]).await;
  s.remove_at("CA".into(), 2).await.unwrap();
  assert_eq!(s.find_one("CA").await.unwrap().unwrap().funfacts, ["a", "c"]);
}

#[tokio::test]
async fn reopening_a_file_store_keeps_records() {
  let dir = std::env::temp_dir().join(format!(
    "statefacts-store-test-{}-{}",
    std::process::id(),
    line!()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("facts.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.append("CA".into(), facts(&["persisted"])).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(
    s.find_one("CA").await.unwrap().unwrap().funfacts,
    ["persisted"]
  );

  let _ = std::fs::remove_dir_all(&dir);
}
