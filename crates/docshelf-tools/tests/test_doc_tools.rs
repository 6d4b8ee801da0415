//! Unit tests for DocTools

use docshelf_codec::frontmatter::Fields;
use docshelf_core::StoreConfig;
use docshelf_store::{DocumentIndex, DocumentStore};
use docshelf_tools::{DocTools, response};
use std::sync::Arc;
use tempfile::TempDir;

fn setup_test_tools() -> (TempDir, DocTools) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = StoreConfig::builder(temp_dir.path())
        .build()
        .expect("Failed to build config");
    let store = DocumentStore::new(config.clone()).expect("Failed to create store");
    let index = DocumentIndex::new(config).expect("Failed to create index");

    (temp_dir, DocTools::new(Arc::new(store), Arc::new(index)))
}

fn titled(title: &str) -> Fields {
    Fields {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_list_versions_empty_root() {
    let (_temp_dir, tools) = setup_test_tools();

    let response = tools.list_versions().await.unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["versions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_then_list_versions() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", None, "intro", titled("Intro"))
        .await
        .unwrap();
    tools
        .create_document("v2", Some("guides"), "setup", titled("Setup"))
        .await
        .unwrap();

    let response = tools.list_versions().await.unwrap();
    let versions = response["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["name"], "v1");
    assert_eq!(versions[0]["document_count"], 1);
    assert_eq!(versions[1]["name"], "v2");
}

#[tokio::test]
async fn test_list_documents_for_version() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", Some("guides"), "setup", titled("Setup"))
        .await
        .unwrap();
    tools
        .create_document("v1", None, "intro", titled("Intro"))
        .await
        .unwrap();

    let response = tools.list_documents(Some("v1")).await.unwrap();
    assert_eq!(response["success"], true);

    let documents = response["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);

    let categories = response["categories"].as_object().unwrap();
    assert!(categories.contains_key("guides"));
    assert!(categories.contains_key("root"));
}

#[tokio::test]
async fn test_list_documents_across_versions() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", None, "a", titled("A"))
        .await
        .unwrap();
    tools
        .create_document("v2", None, "b", titled("B"))
        .await
        .unwrap();

    let response = tools.list_documents(None).await.unwrap();
    let documents = response["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);
}

#[tokio::test]
async fn test_read_document_success() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", Some("guides"), "intro", titled("Intro"))
        .await
        .unwrap();

    let response = tools.read_document("v1", "guides/intro.mdx").await.unwrap();
    let document = &response["document"];
    assert_eq!(document["meta"]["title"], "Intro");
    assert_eq!(document["category"], "guides");
    assert!(document["hash"].is_string());
}

#[tokio::test]
async fn test_read_document_not_found() {
    let (_temp_dir, tools) = setup_test_tools();

    let err = tools.read_document("v1", "absent.mdx").await.unwrap_err();
    let envelope = response::failure(&err);
    assert_eq!(envelope["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_document_collision() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", None, "intro", titled("Intro"))
        .await
        .unwrap();
    let err = tools
        .create_document("v1", None, "intro", titled("Intro"))
        .await
        .unwrap_err();
    assert_eq!(response::failure(&err)["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_save_document_roundtrip() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .save_document("v1", "notes/draft", titled("Draft"), "# Draft\n", None)
        .await
        .unwrap();

    let response = tools.read_document("v1", "notes/draft.mdx").await.unwrap();
    assert_eq!(response["document"]["content"], "# Draft\n");
}

#[tokio::test]
async fn test_save_document_stale_hash() {
    let (_temp_dir, tools) = setup_test_tools();

    let created = tools
        .save_document("v1", "doc", titled("Doc"), "one\n", None)
        .await
        .unwrap();
    let hash = created["document"]["hash"].as_str().unwrap().to_string();

    tools
        .save_document("v1", "doc", titled("Doc"), "two\n", None)
        .await
        .unwrap();

    let err = tools
        .save_document("v1", "doc", titled("Doc"), "three\n", Some(&hash))
        .await
        .unwrap_err();
    assert_eq!(response::failure(&err)["code"], "CONFLICT");
}

#[tokio::test]
async fn test_delete_document_prunes_category() {
    let (temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", Some("lonely"), "only", titled("Only"))
        .await
        .unwrap();
    tools
        .delete_document("v1", "lonely/only.mdx")
        .await
        .unwrap();

    assert!(!temp_dir.path().join("v1/lonely").exists());
    let listing = tools.list_documents(Some("v1")).await.unwrap();
    assert!(
        !listing["categories"]
            .as_object()
            .unwrap()
            .contains_key("lonely")
    );
}

#[tokio::test]
async fn test_rename_document() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .create_document("v1", None, "old", titled("Doc"))
        .await
        .unwrap();
    let response = tools
        .rename_document("v1", "old.mdx", "guides/new.mdx")
        .await
        .unwrap();
    assert_eq!(response["document"]["path"], "guides/new.mdx");

    let err = tools.read_document("v1", "old.mdx").await.unwrap_err();
    assert_eq!(docshelf_tools::failure(&err)["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_duplicate_document() {
    let (_temp_dir, tools) = setup_test_tools();

    tools
        .save_document("v1", "guide", titled("Guide"), "body text\n", None)
        .await
        .unwrap();
    let response = tools
        .duplicate_document("v1", "guide.mdx", "guide-copy.mdx")
        .await
        .unwrap();

    assert_eq!(response["document"]["meta"]["title"], "Guide (Copy)");
    assert_eq!(response["document"]["content"], "body text\n");

    // Source unchanged.
    let original = tools.read_document("v1", "guide.mdx").await.unwrap();
    assert_eq!(original["document"]["meta"]["title"], "Guide");
}

#[tokio::test]
async fn test_create_category() {
    let (temp_dir, tools) = setup_test_tools();

    tools.create_category("v1", "tutorials").await.unwrap();
    assert!(temp_dir.path().join("v1/tutorials").is_dir());

    // Empty categories are invisible to listings.
    let listing = tools.list_documents(Some("v1")).await.unwrap();
    assert!(
        !listing["categories"]
            .as_object()
            .unwrap()
            .contains_key("tutorials")
    );
}

#[tokio::test]
async fn test_path_traversal_prevention() {
    let (_temp_dir, tools) = setup_test_tools();

    let err = tools
        .read_document("v1", "../../etc/passwd")
        .await
        .unwrap_err();
    assert_eq!(response::failure(&err)["code"], "INVALID_PATH");

    let err = tools
        .save_document("v1", "../evil", Fields::default(), "x", None)
        .await
        .unwrap_err();
    assert_eq!(response::failure(&err)["code"], "INVALID_PATH");
}

#[tokio::test]
async fn test_concurrent_saves_all_land() {
    let (_temp_dir, tools) = setup_test_tools();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let tools_clone = tools.clone();
            tokio::spawn(async move {
                let path = format!("concurrent_{}", i);
                let content = format!("Content {}\n", i);
                tools_clone
                    .save_document("v1", &path, Fields::default(), &content, None)
                    .await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.expect("Task panicked");
        assert!(result.is_ok());
    }

    let listing = tools.list_documents(Some("v1")).await.unwrap();
    assert_eq!(listing["documents"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_open_with_tilde_free_path() {
    let temp_dir = TempDir::new().unwrap();
    let tools = DocTools::open(temp_dir.path().to_str().unwrap()).unwrap();

    tools
        .create_document("v1", None, "doc", titled("Doc"))
        .await
        .unwrap();
    let listing = tools.list_documents(Some("v1")).await.unwrap();
    assert_eq!(listing["documents"].as_array().unwrap().len(), 1);
}
