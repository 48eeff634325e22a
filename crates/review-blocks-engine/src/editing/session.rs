use crate::editing::commands::{BlockPatch, Cmd, NoOpReason};
use crate::editing::drag::ReorderTarget;
use crate::editing::factory::BlockFactory;
use crate::editing::generation::{
    ContentGenerator, GenerationError, GenerationRequest, GenerationTicket, GenerationTracker,
};
use crate::editing::sniff::{Proposal, ProposalDetail, sniff};
use crate::editing::{BlockDocument, EditError, Outcome, Patch};
use crate::io::{ArticleStore, PersistError, SaveReceipt};
use crate::models::{
    Article, BlockId, BlockType, ChildContent, ChildId, ChildList, NEW_ARTICLE_ID,
    ValidationErrors,
};

/// What a new, unsaved article starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bootstrap {
    #[default]
    Empty,
    /// A single empty paragraph
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorPolicy {
    /// Removing a block is refused when it would leave fewer than this many
    pub min_blocks: usize,
    pub bootstrap: Bootstrap,
}

impl Default for EditorPolicy {
    fn default() -> Self {
        Self {
            min_blocks: 1,
            bootstrap: Bootstrap::Empty,
        }
    }
}

/// A user-facing notice for an edit the session declined to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Refusal {
    #[error("The article must keep at least {min_blocks} block(s)")]
    LastBlock { min_blocks: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(Patch),
    Refused(Refusal),
}

/// A sniffed paste awaiting the user's answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPaste {
    /// Block that was active when the text was pasted
    pub block_id: BlockId,
    pub text: String,
    pub proposal: Proposal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteDecision {
    /// Create the proposed block after the active one
    Accept,
    /// Keep the text as plain content of the active block
    Decline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PasteOutcome {
    /// Nothing changed yet; answer with [`Editor::resolve_paste`]
    Pending(PendingPaste),
    /// No proposal; the text went straight into the active block
    Appended(Patch),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// One editing session over one article.
///
/// Owns the block document and everything that may change it. Every
/// structural edit goes through [`BlockDocument::apply`]; the session only
/// adds policy (minimum block count), id generation, the paste confirmation
/// step and per-block generation flags on top.
#[derive(Debug)]
pub struct Editor {
    /// Scalar article fields; `structured_content` is kept empty, blocks live in `document`
    article: Article,
    document: BlockDocument,
    factory: BlockFactory,
    policy: EditorPolicy,
    generations: GenerationTracker,
    pending_paste: Option<PendingPaste>,
    saved_version: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorPolicy::default(), BlockFactory::default())
    }
}

impl Editor {
    /// A fresh, unsaved article bootstrapped per `policy`
    pub fn new(policy: EditorPolicy, factory: BlockFactory) -> Self {
        let mut editor = Self {
            article: Article::default(),
            document: BlockDocument::new(),
            factory,
            policy,
            generations: GenerationTracker::default(),
            pending_paste: None,
            saved_version: 0,
        };
        editor.bootstrap();
        editor
    }

    fn bootstrap(&mut self) {
        let blocks = match self.policy.bootstrap {
            Bootstrap::Empty => Vec::new(),
            Bootstrap::Paragraph => vec![self.factory.create(BlockType::Paragraph)],
        };
        self.document = BlockDocument::from_blocks(blocks);
        self.saved_version = self.document.version();
    }

    pub fn document(&self) -> &BlockDocument {
        &self.document
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Scalar article fields (title, ratings, ...). Blocks are edited through the session.
    pub fn article_mut(&mut self) -> &mut Article {
        &mut self.article
    }

    pub fn policy(&self) -> EditorPolicy {
        self.policy
    }

    /// Block changes since the last open or save
    pub fn is_dirty(&self) -> bool {
        self.document.version() != self.saved_version
    }

    /// Load `id` from `store`; no id or the `"new"` sentinel starts a fresh article
    pub fn open(&mut self, store: &dyn ArticleStore, id: Option<&str>) -> Result<(), PersistError> {
        self.pending_paste = None;
        self.generations = GenerationTracker::default();

        let id = id.map(str::trim).filter(|id| !id.is_empty() && *id != NEW_ARTICLE_ID);
        let Some(id) = id else {
            log::info!("starting a new article");
            self.article = Article::default();
            self.bootstrap();
            return Ok(());
        };

        let mut article = store.fetch(id)?;
        // Records fetched without an id still belong to the id they were fetched by
        article.id.get_or_insert_with(|| id.to_string());
        let blocks = std::mem::take(&mut article.structured_content);
        log::info!("opened article {id} with {} block(s)", blocks.len());
        self.article = article;
        self.document = BlockDocument::from_blocks(blocks);
        self.saved_version = self.document.version();
        Ok(())
    }

    /// The article as it would be submitted
    pub fn to_article(&self) -> Article {
        Article {
            structured_content: self.document.blocks().to_vec(),
            ..self.article.clone()
        }
    }

    /// Validate, then submit. Validation failures never reach the store.
    pub fn save(&mut self, store: &dyn ArticleStore) -> Result<SaveReceipt, SessionError> {
        let article = self.to_article();
        if let Err(errors) = article.validate() {
            log::warn!("save blocked by {} validation error(s)", errors.errors.len());
            return Err(errors.into());
        }

        let receipt = store.save(&article).inspect_err(|e| log::warn!("save failed: {e}"))?;

        if self.article.id.as_deref() != Some(receipt.id.as_str()) {
            self.article.id = Some(receipt.id.clone());
            let blocks = self
                .document
                .blocks()
                .iter()
                .cloned()
                .map(|mut block| {
                    block.article_id = Some(receipt.id.clone());
                    block
                })
                .collect();
            self.document.replace(blocks);
        }
        self.saved_version = self.document.version();
        Ok(receipt)
    }

    /// Create a default `block_type` block at `at` (`-1` appends)
    pub fn add_block(&mut self, block_type: BlockType, at: isize) -> Result<BlockId, EditError> {
        let mut block = self.factory.create(block_type);
        block.article_id = self.article.id.clone();
        let id = block.id.clone();
        self.document.insert(block, at)?;
        Ok(id)
    }

    pub fn remove_block(&mut self, id: &BlockId) -> Removal {
        if self.document.get(id).is_some() && self.document.len() <= self.policy.min_blocks {
            log::warn!("refused to remove {id}: minimum of {} block(s)", self.policy.min_blocks);
            return Removal::Refused(Refusal::LastBlock {
                min_blocks: self.policy.min_blocks,
            });
        }
        Removal::Removed(self.document.remove(id))
    }

    pub fn move_block(&mut self, id: &BlockId, to: usize) -> Patch {
        self.document.move_block(id, to)
    }

    pub fn update_block(&mut self, id: &BlockId, patch: BlockPatch) -> Patch {
        self.document.update(id, patch)
    }

    /// Switch a block's variant; the new variant's attributes get their defaults
    pub fn convert_block(&mut self, id: &BlockId, to: BlockType) -> Patch {
        let kind = self.factory.default_kind(to, id);
        self.document
            .apply(Cmd::ConvertBlock {
                id: id.clone(),
                kind,
            })
            .unwrap_or_else(|_| self.stale())
    }

    /// Append a child to `list`. `None` content uses the list's default item.
    ///
    /// Returns the new child's id, or `None` when the block is gone.
    pub fn add_child(
        &mut self,
        block_id: &BlockId,
        list: ChildList,
        content: Option<ChildContent>,
    ) -> Result<Option<ChildId>, EditError> {
        let Some(block) = self.document.get(block_id) else {
            return Ok(None);
        };
        let block_type = block.block_type();
        let content = match content {
            Some(content) => content,
            None => BlockFactory::default_child_content(block_type, list)
                .ok_or(EditError::NoSuchChildList { block_type, list })?,
        };
        let item = self.factory.new_child(block_id, content);
        let child_id = item.id.clone();
        let patch = self.document.apply(Cmd::AddChild {
            block_id: block_id.clone(),
            list,
            item,
        })?;
        Ok(patch.applied().then_some(child_id))
    }

    pub fn update_child(
        &mut self,
        block_id: &BlockId,
        list: ChildList,
        child_id: &ChildId,
        content: ChildContent,
    ) -> Result<Patch, EditError> {
        self.document.apply(Cmd::UpdateChild {
            block_id: block_id.clone(),
            list,
            child_id: child_id.clone(),
            content,
        })
    }

    pub fn remove_child(
        &mut self,
        block_id: &BlockId,
        list: ChildList,
        child_id: &ChildId,
    ) -> Result<Patch, EditError> {
        self.document.apply(Cmd::RemoveChild {
            block_id: block_id.clone(),
            list,
            child_id: child_id.clone(),
        })
    }

    pub fn move_child(
        &mut self,
        block_id: &BlockId,
        list: ChildList,
        child_id: &ChildId,
        to: usize,
    ) -> Result<Patch, EditError> {
        self.document.apply(Cmd::MoveChild {
            block_id: block_id.clone(),
            list,
            child_id: child_id.clone(),
            to,
        })
    }

    /// Text pasted into `block_id`.
    ///
    /// When the sniffer has a proposal nothing changes until
    /// [`resolve_paste`](Self::resolve_paste) is called. A newer paste replaces
    /// an unanswered one.
    pub fn paste(&mut self, block_id: &BlockId, text: &str) -> PasteOutcome {
        match sniff(text) {
            Some(proposal) if self.document.get(block_id).is_some() => {
                let pending = PendingPaste {
                    block_id: block_id.clone(),
                    text: text.to_string(),
                    proposal,
                };
                self.pending_paste = Some(pending.clone());
                PasteOutcome::Pending(pending)
            }
            _ => PasteOutcome::Appended(self.append_text(block_id, text)),
        }
    }

    pub fn pending_paste(&self) -> Option<&PendingPaste> {
        self.pending_paste.as_ref()
    }

    /// Answer the pending paste. `None` when there was nothing to answer.
    pub fn resolve_paste(&mut self, decision: PasteDecision) -> Option<Patch> {
        let pending = self.pending_paste.take()?;
        let patch = match decision {
            PasteDecision::Decline => self.append_text(&pending.block_id, &pending.text),
            PasteDecision::Accept => self.insert_proposal(&pending),
        };
        Some(patch)
    }

    fn insert_proposal(&mut self, pending: &PendingPaste) -> Patch {
        let proposal = &pending.proposal;
        let at = match self.document.index_of(&pending.block_id) {
            Some(index) => (index + 1) as isize,
            None => -1,
        };

        let mut block = self.factory.create(proposal.block_type);
        block.article_id = self.article.id.clone();
        let mut patch = BlockPatch::content(proposal.content.clone());
        match &proposal.detail {
            ProposalDetail::None => {}
            ProposalDetail::Code { language } => patch.language = Some(language.clone()),
            ProposalDetail::Heading { level } => patch.level = Some(*level),
            ProposalDetail::List { style } => patch.list_style = Some(*style),
        }
        patch.merge_into(&mut block);

        log::info!("inserting pasted {} block", proposal.block_type);
        self.document
            .insert(block, at)
            .unwrap_or_else(|_| self.stale())
    }

    fn append_text(&mut self, block_id: &BlockId, text: &str) -> Patch {
        let Some(block) = self.document.get(block_id) else {
            return self.stale();
        };
        let content = format!("{}{}", block.content, text);
        self.document.update(block_id, BlockPatch::content(content))
    }

    pub fn is_generating(&self, block_id: &BlockId) -> bool {
        self.generations.is_busy(block_id)
    }

    /// Mark `block_id` busy. Fails while a generation for it is outstanding.
    pub fn begin_generation(&mut self, block_id: &BlockId) -> Result<GenerationTicket, EditError> {
        self.generations
            .begin(block_id)
            .ok_or_else(|| EditError::GenerationInProgress(block_id.clone()))
    }

    /// Request for `ticket`'s block as it currently reads
    pub fn generation_request(&self, ticket: &GenerationTicket, prompt: &str) -> GenerationRequest {
        let block = self.document.get(ticket.block_id());
        GenerationRequest {
            block_id: ticket.block_id().clone(),
            block_type: block.map_or(BlockType::Paragraph, |b| b.block_type()),
            prompt: prompt.to_string(),
            current_content: block.map(|b| b.content.clone()).unwrap_or_default(),
        }
    }

    /// Finish a generation. The busy flag is cleared whatever the result; on
    /// success the text replaces the block's content (a removed block is a no-op).
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<String, GenerationError>,
    ) -> Result<Patch, GenerationError> {
        self.generations.finish(&ticket);
        let text = result
            .inspect_err(|e| log::warn!("generation for {} failed: {e}", ticket.block_id()))?;
        if text.trim().is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(self.document.update(ticket.block_id(), BlockPatch::content(text)))
    }

    /// Run `generator` for `block_id` synchronously
    pub fn generate_with(
        &mut self,
        block_id: &BlockId,
        prompt: &str,
        generator: &dyn ContentGenerator,
    ) -> Result<Patch, SessionError> {
        let ticket = self.begin_generation(block_id)?;
        let request = self.generation_request(&ticket, prompt);
        let result = generator.generate(&request);
        Ok(self.finish_generation(ticket, result)?)
    }

    fn stale(&self) -> Patch {
        Patch {
            outcome: Outcome::NoOp(NoOpReason::StaleReference),
            version: self.document.version(),
        }
    }
}

impl ReorderTarget for Editor {
    fn move_block(&mut self, id: &BlockId, to: usize) -> Patch {
        Editor::move_block(self, id, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::factory::SequentialIds;
    use crate::io::JsonFileStore;
    use crate::models::{BlockKind, ListStyle};
    use crate::tests::{create_test_content_dir, create_test_file};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn editor(bootstrap: Bootstrap) -> Editor {
        Editor::new(
            EditorPolicy {
                min_blocks: 1,
                bootstrap,
            },
            BlockFactory::new(SequentialIds::new("t")),
        )
    }

    fn contents(editor: &Editor) -> Vec<(String, usize)> {
        editor
            .document()
            .blocks()
            .iter()
            .map(|b| (b.content.clone(), b.order))
            .collect()
    }

    struct FixedGenerator {
        reply: Result<String, GenerationError>,
        calls: Cell<usize>,
    }

    impl ContentGenerator for FixedGenerator {
        fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    #[test]
    fn test_bootstrap_variants() {
        assert!(editor(Bootstrap::Empty).document().is_empty());

        let ed = editor(Bootstrap::Paragraph);
        assert_eq!(ed.document().len(), 1);
        assert_eq!(ed.document().blocks()[0].block_type(), BlockType::Paragraph);
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_remove_last_block_is_refused() {
        let mut ed = editor(Bootstrap::Paragraph);
        let id = ed.document().blocks()[0].id.clone();

        assert_eq!(
            ed.remove_block(&id),
            Removal::Refused(Refusal::LastBlock { min_blocks: 1 })
        );
        assert_eq!(ed.document().len(), 1);
    }

    #[test]
    fn test_remove_stale_block_is_noop_not_refusal() {
        let mut ed = editor(Bootstrap::Paragraph);
        let Removal::Removed(patch) = ed.remove_block(&"gone".to_string()) else {
            panic!("expected a no-op removal");
        };
        assert_eq!(patch.outcome, Outcome::NoOp(NoOpReason::StaleReference));
    }

    #[test]
    fn test_convert_block_fills_defaults() {
        let mut ed = editor(Bootstrap::Paragraph);
        let id = ed.document().blocks()[0].id.clone();

        assert!(ed.convert_block(&id, BlockType::Rating).applied());

        let block = ed.document().get(&id).unwrap();
        let BlockKind::Rating { highlights, .. } = &block.kind else {
            panic!("expected a rating block");
        };
        assert_eq!(highlights.len(), 3);
        assert_eq!(
            ed.convert_block(&id, BlockType::Rating).outcome,
            Outcome::NoOp(NoOpReason::SameType)
        );
    }

    #[test]
    fn test_add_child_with_default_content() {
        let mut ed = editor(Bootstrap::Empty);
        let id = ed.add_block(BlockType::ProsCons, -1).unwrap();

        let child = ed.add_child(&id, ChildList::Pros, None).unwrap().unwrap();
        let block = ed.document().get(&id).unwrap();
        let pros = block.child_list(ChildList::Pros).unwrap();

        assert_eq!(pros.len(), 2);
        assert_eq!(pros[1].id, child);
        assert_eq!(pros[1].order, 2);
    }

    #[test]
    fn test_add_child_to_missing_list_is_error() {
        let mut ed = editor(Bootstrap::Paragraph);
        let id = ed.document().blocks()[0].id.clone();

        assert_eq!(
            ed.add_child(&id, ChildList::Pros, None),
            Err(EditError::NoSuchChildList {
                block_type: BlockType::Paragraph,
                list: ChildList::Pros
            })
        );
        assert_eq!(ed.add_child(&"gone".to_string(), ChildList::Pros, None), Ok(None));
    }

    #[test]
    fn test_paste_without_proposal_appends() {
        let mut ed = editor(Bootstrap::Paragraph);
        let id = ed.document().blocks()[0].id.clone();

        let outcome = ed.paste(&id, "It works well for me.");

        assert!(matches!(outcome, PasteOutcome::Appended(ref p) if p.applied()));
        assert_eq!(contents(&ed), vec![("It works well for me.".to_string(), 0)]);
    }

    #[test]
    fn test_paste_accept_inserts_after_active_block() {
        let mut ed = editor(Bootstrap::Paragraph);
        let first = ed.document().blocks()[0].id.clone();
        ed.add_block(BlockType::Paragraph, -1).unwrap();

        let outcome = ed.paste(&first, "- Zinc\n- Iron");
        assert!(matches!(outcome, PasteOutcome::Pending(_)));
        assert_eq!(ed.document().len(), 2);

        let patch = ed.resolve_paste(PasteDecision::Accept).unwrap();
        assert!(patch.applied());

        let inserted = &ed.document().blocks()[1];
        assert_eq!(inserted.content, "Zinc\nIron");
        assert_eq!(
            inserted.kind,
            BlockKind::List {
                style: ListStyle::Unordered
            }
        );
        assert!(ed.pending_paste().is_none());
        assert_eq!(ed.resolve_paste(PasteDecision::Accept), None);
    }

    #[test]
    fn test_generation_busy_flag_cleared_on_failure() {
        let mut ed = editor(Bootstrap::Paragraph);
        let id = ed.document().blocks()[0].id.clone();

        let ticket = ed.begin_generation(&id).unwrap();
        assert_eq!(
            ed.begin_generation(&id),
            Err(EditError::GenerationInProgress(id.clone()))
        );

        let result = ed.finish_generation(ticket, Err(GenerationError::Failed("quota".into())));
        assert!(result.is_err());
        assert!(!ed.is_generating(&id));
    }

    #[test]
    fn test_generate_with_replaces_content() {
        let mut ed = editor(Bootstrap::Paragraph);
        let id = ed.document().blocks()[0].id.clone();
        let generator = FixedGenerator {
            reply: Ok("Magnesium supports sleep.".to_string()),
            calls: Cell::new(0),
        };

        let patch = ed.generate_with(&id, "intro", &generator).unwrap();

        assert!(patch.applied());
        assert_eq!(generator.calls.get(), 1);
        assert_eq!(ed.document().get(&id).unwrap().content, "Magnesium supports sleep.");
        assert!(!ed.is_generating(&id));
    }

    #[test]
    fn test_generation_for_removed_block_is_noop() {
        let mut ed = editor(Bootstrap::Paragraph);
        let keep = ed.document().blocks()[0].id.clone();
        let id = ed.add_block(BlockType::Paragraph, -1).unwrap();

        let ticket = ed.begin_generation(&id).unwrap();
        ed.remove_block(&id);
        let patch = ed.finish_generation(ticket, Ok("text".to_string())).unwrap();

        assert_eq!(patch.outcome, Outcome::NoOp(NoOpReason::StaleReference));
        assert_eq!(ed.document().blocks()[0].id, keep);
    }

    #[test]
    fn test_save_blocked_by_validation() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        let mut ed = editor(Bootstrap::Paragraph);

        let err = ed.save(&store).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Validation(ref e) if e.for_field("title").count() == 1
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_adopts_id_then_reopens() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        let mut ed = editor(Bootstrap::Paragraph);
        ed.article_mut().title = "Best Probiotics".to_string();
        let id = ed.add_block(BlockType::Heading, 0).unwrap();

        let receipt = ed.save(&store).unwrap();

        assert!(receipt.created);
        assert_eq!(ed.article().id.as_deref(), Some(receipt.id.as_str()));
        assert!(
            ed.document()
                .blocks()
                .iter()
                .all(|b| b.article_id.as_deref() == Some(receipt.id.as_str()))
        );
        assert!(!ed.is_dirty());

        let mut reopened = editor(Bootstrap::Empty);
        reopened.open(&store, Some(&receipt.id)).unwrap();
        assert_eq!(reopened.article().title, "Best Probiotics");
        assert_eq!(reopened.document().blocks()[0].id, id);
        assert_eq!(reopened.document().len(), 2);
    }

    #[test]
    fn test_open_record_without_id_saves_in_place() {
        let dir = create_test_content_dir();
        create_test_file(&dir, "a1.json", r#"{"title":"T","structuredContent":[]}"#);
        let store = JsonFileStore::new(dir.path());
        let mut ed = editor(Bootstrap::Empty);

        ed.open(&store, Some("a1")).unwrap();
        assert_eq!(ed.article().id.as_deref(), Some("a1"));

        let receipt = ed.save(&store).unwrap();
        assert_eq!(
            receipt,
            SaveReceipt {
                id: "a1".to_string(),
                created: false
            }
        );
        assert_eq!(store.list().unwrap(), vec!["a1".to_string()]);
    }

    struct RejectingStore;

    impl ArticleStore for RejectingStore {
        fn fetch(&self, id: &str) -> Result<Article, PersistError> {
            Err(PersistError::NotFound(id.to_string()))
        }

        fn save(&self, _article: &Article) -> Result<SaveReceipt, PersistError> {
            Err(PersistError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_failed_save_keeps_session_for_resubmit() {
        let mut ed = editor(Bootstrap::Paragraph);
        ed.article_mut().title = "Zinc Picolinate".to_string();
        ed.add_block(BlockType::Heading, 0).unwrap();
        let before = ed.document().clone();

        let err = ed.save(&RejectingStore).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Persist(PersistError::Status { status: 503, .. })
        ));
        assert_eq!(ed.article().id, None);
        assert_eq!(ed.document(), &before);
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_open_new_sentinel_bootstraps() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        let mut ed = editor(Bootstrap::Paragraph);
        ed.add_block(BlockType::Divider, -1).unwrap();

        ed.open(&store, Some("new")).unwrap();

        assert_eq!(ed.document().len(), 1);
        assert!(ed.article().is_new());
    }

    #[test]
    fn test_open_missing_article_fails() {
        let dir = create_test_content_dir();
        let store = JsonFileStore::new(dir.path());
        let mut ed = editor(Bootstrap::Empty);

        assert!(matches!(
            ed.open(&store, Some("missing")),
            Err(PersistError::NotFound(_))
        ));
    }
}
