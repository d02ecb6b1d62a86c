use kbase::api::{ArticleDraft, KnowledgeBase};
use kbase::error::KbError;
use kbase::model::{Category, NewFolder};
use kbase::store::backend::StorageBackend;
use kbase::store::folder_store::FolderStore;
use kbase::store::fs_backend::FsBackend;
use kbase::store::Collection;
use std::fs;

#[test]
fn missing_directory_loads_empty_and_is_created_on_save() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path().join("nested").join("data");
    let backend = FsBackend::new(&root);
    assert_eq!(backend.root(), root.as_path());

    assert!(backend.load_folders().unwrap().is_empty());
    assert!(backend.load_articles().unwrap().is_empty());

    let mut store = FolderStore::open(backend).unwrap();
    store.add(NewFolder::new("Setup", Category::Pabx)).unwrap();

    assert!(root.join("knowledge-base-folders.json").exists());
    assert!(!root.join("knowledge-base-articles.json").exists());
}

#[test]
fn saves_versioned_snapshot_without_temp_leftovers() {
    let temp_dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp_dir.path());
    let mut store = FolderStore::open(backend.clone()).unwrap();
    for name in ["One", "Two", "Three"] {
        store.add(NewFolder::new(name, Category::Omni)).unwrap();
    }

    let raw = fs::read_to_string(backend.location(Collection::Folders)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["items"].as_array().unwrap().len(), 3);
    assert_eq!(value["items"][0]["category"], "omni");
    assert!(value["items"][0]["createdAt"].is_string());

    let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn legacy_bare_array_is_read_and_upgraded_on_save() {
    let temp_dir = tempfile::tempdir().unwrap();
    let legacy = r#"[
        {
            "id": "0b6f6a52-8a55-4f8e-9a4c-0d7c1c7c2a10",
            "folderId": "5d7f1e9e-3b55-4c3a-8d8e-6a0e5f1b2c3d",
            "title": "Install",
            "content": "Plug it in",
            "category": "pabx",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z"
        }
    ]"#;
    fs::write(temp_dir.path().join("knowledge-base-articles.json"), legacy).unwrap();

    let backend = FsBackend::new(temp_dir.path());
    let articles = backend.load_articles().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Install");
    assert!(articles[0].images.is_empty());
    assert!(articles[0].videos.is_empty());

    backend.save_articles(&articles).unwrap();
    let raw = fs::read_to_string(backend.location(Collection::Articles)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["items"][0]["folderId"], "5d7f1e9e-3b55-4c3a-8d8e-6a0e5f1b2c3d");
}

#[test]
fn newer_snapshot_version_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("knowledge-base-folders.json"),
        r#"{"version": 7, "items": []}"#,
    )
    .unwrap();

    let result = FsBackend::new(temp_dir.path()).load_folders();
    assert!(matches!(
        result,
        Err(KbError::UnsupportedSnapshot {
            found: 7,
            supported: 1
        })
    ));
}

#[test]
fn corrupt_snapshot_fails_to_open() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("knowledge-base-folders.json"), "{not json").unwrap();

    assert!(KnowledgeBase::open(FsBackend::new(temp_dir.path())).is_err());
}

#[test]
fn knowledge_base_survives_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();

    let (folder_id, article_id) = {
        let mut kb = KnowledgeBase::open(FsBackend::new(temp_dir.path())).unwrap();
        let folder = kb.create_folder("Setup", Category::Pabx).unwrap();
        let article = kb
            .create_article(ArticleDraft {
                folder: folder.id.to_string(),
                title: "Install".into(),
                content: "...".into(),
                images: vec!["https://cdn.example.com/a.png".into()],
                ..Default::default()
            })
            .unwrap();
        (folder.id, article.id)
    };

    let kb = KnowledgeBase::open(FsBackend::new(temp_dir.path())).unwrap();
    let article = kb.article(&article_id.to_string()).unwrap();
    assert_eq!(article.folder_id, folder_id);
    assert_eq!(article.images, vec!["https://cdn.example.com/a.png"]);
    assert_eq!(kb.folders(None, None)[0].article_count, 1);
}

#[test]
fn cascade_delete_is_persisted() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut kb = KnowledgeBase::open(FsBackend::new(temp_dir.path())).unwrap();
    let folder = kb.create_folder("Doomed", Category::Omni).unwrap();
    for title in ["A", "B"] {
        kb.create_article(ArticleDraft {
            folder: folder.id.to_string(),
            title: title.into(),
            ..Default::default()
        })
        .unwrap();
    }

    kb.delete_folder(&folder.id.to_string()).unwrap();

    let backend = FsBackend::new(temp_dir.path());
    assert!(backend.load_folders().unwrap().is_empty());
    assert!(backend.load_articles().unwrap().is_empty());
}
