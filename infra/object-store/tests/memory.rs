use strata_object_store::*;

async fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    for key in ["alice/a/x.txt", "alice/a/deep/y.txt", "alice/b/.keep", "alice/top.md", "bob/z.txt"] {
        store.upload(key, key.as_bytes().to_vec(), UploadOptions::new()).await.unwrap();
    }
    store
}

#[tokio::test]
async fn test_list_is_single_level_and_sorted() {
    let store = seeded().await;

    let entries = store.list("alice", ListOptions::new()).await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.is_folder())).collect();

    assert_eq!(names, vec![("a", true), ("b", true), ("top.md", false)]);
    assert_eq!(entries[2].size(), "alice/top.md".len() as u64);
    assert!(entries[2].created_at.is_some());
}

#[tokio::test]
async fn test_list_tolerates_trailing_slash_and_root() {
    let store = seeded().await;

    let with_slash = store.list("alice/a/", ListOptions::new()).await.unwrap();
    let without = store.list("alice/a", ListOptions::new()).await.unwrap();
    assert_eq!(with_slash, without);

    let root = store.list("", ListOptions::new()).await.unwrap();
    let names: Vec<_> = root.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_list_respects_limit_and_missing_prefix() {
    let store = seeded().await;

    let limited = store.list("alice", ListOptions::new().limit(2)).await.unwrap();
    assert_eq!(limited.len(), 2);

    let missing = store.list("carol", ListOptions::new()).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_prefix_does_not_match_sibling_names() {
    let store = MemoryStore::new();
    store.upload("alice/ab/x.txt", b"1".to_vec(), UploadOptions::new()).await.unwrap();
    store.upload("alice/a/y.txt", b"2".to_vec(), UploadOptions::new()).await.unwrap();

    let entries = store.list("alice/a", ListOptions::new()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "y.txt");
}

#[tokio::test]
async fn test_upload_conflict_and_upsert() {
    let store = seeded().await;

    let err = store.upload("alice/top.md", b"new".to_vec(), UploadOptions::new()).await.unwrap_err();
    assert!(err.is_already_exists());

    let id_before = store.list("alice", ListOptions::new()).await.unwrap()[2].id.clone();
    store.upload("alice/top.md", b"new".to_vec(), UploadOptions::new().upsert(true)).await.unwrap();
    let id_after = store.list("alice", ListOptions::new()).await.unwrap()[2].id.clone();

    assert_eq!(store.download("alice/top.md").await.unwrap(), b"new");
    assert_eq!(id_before, id_after);
}

#[tokio::test]
async fn test_move_semantics() {
    let store = seeded().await;

    store.move_object("alice/top.md", "alice/b/top.md").await.unwrap();
    assert!(!store.contains("alice/top.md"));
    assert!(store.contains("alice/b/top.md"));

    let missing = store.move_object("alice/top.md", "alice/c.md").await.unwrap_err();
    assert!(missing.is_not_found());

    let occupied = store.move_object("alice/a/x.txt", "bob/z.txt").await.unwrap_err();
    assert!(occupied.is_already_exists());
    assert!(store.contains("alice/a/x.txt"));
}

#[tokio::test]
async fn test_remove_missing_key_removes_nothing() {
    let store = seeded().await;

    let err = store
        .remove(&["alice/top.md".to_owned(), "alice/ghost.md".to_owned()])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "alice/ghost.md");
    assert!(store.contains("alice/top.md"));

    store.remove(&["alice/top.md".to_owned()]).await.unwrap();
    assert!(!store.contains("alice/top.md"));
}

#[tokio::test]
async fn test_public_url_and_key_validation() {
    let store = MemoryStore::with_config(MemoryStoreConfig {
        bucket: "docs".to_owned(),
        public_base_url: "https://cdn.example.com/public/".to_owned(),
    });

    let url = store.public_url("alice/a.txt").await.unwrap();
    assert_eq!(url, "https://cdn.example.com/public/docs/alice/a.txt");

    let err = store.upload("alice//a.txt", Vec::new(), UploadOptions::new()).await.unwrap_err();
    assert_eq!(err.kind(), "Rejected");
}

#[tokio::test]
async fn test_fault_injection_and_journal() {
    let store = seeded().await;
    store.clear_calls();
    store.fail_on(StoreOp::Download, "alice/top.md");

    let err = store.download("alice/top.md").await.unwrap_err();
    assert_eq!(err.kind(), "Rejected");
    assert!(store.download("alice/a/x.txt").await.is_ok());

    assert_eq!(store.count(StoreOp::Download), 2);
    assert_eq!(
        store.calls()[0],
        StoreCall { op: StoreOp::Download, key: "alice/top.md".to_owned() }
    );

    store.clear_faults();
    assert!(store.download("alice/top.md").await.is_ok());
}

#[tokio::test]
async fn test_list_pages_with_offset() {
    let store = MemoryStore::new();
    for i in 0..5 {
        store.upload(&format!("alice/f{i}.txt"), Vec::new(), UploadOptions::new()).await.unwrap();
    }

    let first = store.list("alice", ListOptions::new().limit(2)).await.unwrap();
    let second = store.list("alice", ListOptions::new().limit(2).offset(2)).await.unwrap();
    let tail = store.list("alice", ListOptions::new().limit(2).offset(4)).await.unwrap();

    let names: Vec<_> = first.iter().chain(&second).chain(&tail).map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["f0.txt", "f1.txt", "f2.txt", "f3.txt", "f4.txt"]);
    assert_eq!(tail.len(), 1);
}
