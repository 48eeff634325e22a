use std::fs;
use std::path::{Path, PathBuf};

use super::{ArticleStore, PersistError, SaveReceipt};
use crate::models::Article;

/// Stores each article as `<id>.json` in one directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, PersistError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistError::NotFound(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.json")))
    }

    /// Ids of all stored articles, sorted
    pub fn list(&self) -> Result<Vec<String>, PersistError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem()
            {
                ids.push(stem.to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl ArticleStore for JsonFileStore {
    fn fetch(&self, id: &str) -> Result<Article, PersistError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(PersistError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            PersistError::InvalidResponse(format!("{} is not a valid article: {e}", path.display()))
        })
    }

    fn save(&self, article: &Article) -> Result<SaveReceipt, PersistError> {
        let (id, created) = match &article.id {
            Some(id) => (id.clone(), false),
            None => (uuid::Uuid::new_v4().to_string(), true),
        };
        let path = self.path_for(&id)?;

        let mut stored = article.clone();
        stored.id = Some(id.clone());
        let content = serde_json::to_string_pretty(&stored)
            .map_err(|e| PersistError::InvalidResponse(e.to_string()))?;

        fs::create_dir_all(&self.root)?;
        fs::write(&path, content)?;
        log::info!("saved article {id} to {}", path.display());

        Ok(SaveReceipt { id, created })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_content_dir, create_test_file};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_new_assigns_id_and_fetch_round_trips() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        let article = Article {
            title: "Omega-3 Review".to_string(),
            ..Article::default()
        };

        let receipt = store.save(&article).unwrap();
        assert!(receipt.created);

        let loaded = store.fetch(&receipt.id).unwrap();
        assert_eq!(loaded.id.as_deref(), Some(receipt.id.as_str()));
        assert_eq!(loaded.title, "Omega-3 Review");
    }

    #[test]
    fn test_save_existing_overwrites() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        let mut article = Article {
            id: Some("a1".to_string()),
            title: "Draft".to_string(),
            ..Article::default()
        };
        store.save(&article).unwrap();

        article.title = "Final".to_string();
        let receipt = store.save(&article).unwrap();

        assert_eq!(
            receipt,
            SaveReceipt {
                id: "a1".to_string(),
                created: false
            }
        );
        assert_eq!(store.fetch("a1").unwrap().title, "Final");
    }

    #[test]
    fn test_fetch_missing_is_not_found() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.fetch("nope"), Err(PersistError::NotFound(_))));
    }

    #[test]
    fn test_fetch_rejects_path_traversal() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.fetch("../etc/passwd"),
            Err(PersistError::NotFound(_))
        ));
    }

    #[test]
    fn test_fetch_malformed_file_is_invalid_response() {
        let dir = create_test_content_dir();
        create_test_file(&dir, "broken.json", "{ not json");
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(
            store.fetch("broken"),
            Err(PersistError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_list_only_json_files() {
        let dir = create_test_content_dir();
        create_test_file(&dir, "b.json", "{}");
        create_test_file(&dir, "a.json", "{}");
        create_test_file(&dir, "notes.txt", "ignored");
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.list().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let store = JsonFileStore::new("/this/path/does/not/exist");
        assert!(store.list().unwrap().is_empty());
    }
}
