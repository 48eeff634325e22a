pub mod editing;
pub mod io;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    BlockDocument, BlockFactory, BlockPatch, Cmd, DragController, EditError, Editor, EditorPolicy,
    Outcome, Patch,
};
pub use io::{ArticleStore, JsonFileStore, PersistError, SaveReceipt};
pub use models::{Article, Block, BlockKind, BlockType, ChildContent, ChildItem, ChildList};
