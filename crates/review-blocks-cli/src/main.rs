use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use review_blocks_config::{BootstrapMode, Config};
use review_blocks_engine::editing::children::lists_of;
use review_blocks_engine::editing::{
    BlockPatch, Bootstrap, DragController, DragEnd, Editor, EditorPolicy, PasteDecision,
    PasteOutcome, Removal, SessionError,
};
use review_blocks_engine::io::{ArticleStore, JsonFileStore};
use review_blocks_engine::models::{self, BlockId, BlockKind, BlockType};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    process,
};

enum Mode {
    Normal,
    EditContent { block: BlockId, buffer: String },
    EditTitle { buffer: String },
}

struct App {
    editor: Editor,
    store: Box<dyn ArticleStore>,
    list_state: ListState,
    /// Where the block list was last drawn, for mapping mouse rows to blocks
    list_area: Rect,
    drag: DragController,
    mode: Mode,
    status: Option<String>,
}

impl App {
    fn new(editor: Editor, store: Box<dyn ArticleStore>) -> Self {
        let mut app = Self {
            editor,
            store,
            list_state: ListState::default(),
            list_area: Rect::default(),
            drag: DragController::new(),
            mode: Mode::Normal,
            status: None,
        };
        if !app.editor.document().is_empty() {
            app.list_state.select(Some(0));
        }
        app
    }

    fn len(&self) -> usize {
        self.editor.document().len()
    }

    fn selected_id(&self) -> Option<BlockId> {
        let index = self.list_state.selected()?;
        self.editor
            .document()
            .blocks()
            .get(index)
            .map(|block| block.id.clone())
    }

    fn select_id(&mut self, id: &BlockId) {
        self.list_state.select(self.editor.document().index_of(id));
    }

    fn clamp_selection(&mut self) {
        let selected = match (self.list_state.selected(), self.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    fn next_block(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn move_selected(&mut self, down: bool) {
        let (Some(id), Some(index)) = (self.selected_id(), self.list_state.selected()) else {
            return;
        };
        let to = if down {
            index + 1
        } else {
            index.saturating_sub(1)
        };
        self.editor.move_block(&id, to);
        self.select_id(&id);
    }

    fn add_block(&mut self, block_type: BlockType) {
        let at = match self.list_state.selected() {
            Some(index) => (index + 1) as isize,
            None => -1,
        };
        match self.editor.add_block(block_type, at) {
            Ok(id) => {
                self.select_id(&id);
                self.status = Some(format!("Added {block_type} block"));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn convert_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(current) = self.editor.document().get(&id).map(|b| b.block_type()) else {
            return;
        };
        let target = current.next();
        self.editor.convert_block(&id, target);
        self.status = Some(format!("Converted {current} to {target}"));
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.editor.remove_block(&id) {
            Removal::Removed(_) => self.status = Some("Block deleted".to_string()),
            Removal::Refused(refusal) => self.status = Some(refusal.to_string()),
        }
        self.clamp_selection();
    }

    fn save(&mut self) {
        self.status = Some(match self.editor.save(self.store.as_ref()) {
            Ok(receipt) if receipt.created => format!("Created article {}", receipt.id),
            Ok(receipt) => format!("Saved article {}", receipt.id),
            Err(SessionError::Validation(errors)) => errors
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
            Err(e) => format!("Save failed: {e}"),
        });
    }

    fn paste(&mut self, text: &str) {
        // While editing, pasted text belongs to the buffer being edited
        match &mut self.mode {
            Mode::EditContent { buffer, .. } => {
                buffer.push_str(text);
                return;
            }
            Mode::EditTitle { buffer } => {
                buffer.push_str(&text.lines().collect::<Vec<_>>().join(" "));
                return;
            }
            Mode::Normal => {}
        }
        let Some(id) = self.selected_id() else {
            self.status = Some("Select a block to paste into".to_string());
            return;
        };
        self.status = Some(match self.editor.paste(&id, text) {
            PasteOutcome::Pending(pending) => format!(
                "This looks like {}. Create a {} block? (y/n)",
                pending.proposal.block_type, pending.proposal.block_type
            ),
            PasteOutcome::Appended(_) => "Pasted".to_string(),
        });
    }

    fn resolve_paste(&mut self, decision: PasteDecision) {
        let active = self.selected_id();
        if self.editor.resolve_paste(decision).is_some() {
            if decision == PasteDecision::Accept
                && let Some(index) = active.and_then(|id| self.editor.document().index_of(&id))
            {
                self.list_state.select(Some(index + 1));
            }
            self.status = None;
        }
    }

    fn start_edit_content(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(block) = self.editor.document().get(&id) else {
            return;
        };
        if !block.block_type().carries_text() {
            self.status = Some(format!("{} blocks have no text content", block.block_type()));
            return;
        }
        self.mode = Mode::EditContent {
            buffer: block.content.clone(),
            block: id,
        };
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::EditContent { block, mut buffer } => {
                match key.code {
                    KeyCode::Enter => {
                        self.editor.update_block(&block, BlockPatch::content(buffer));
                    }
                    KeyCode::Esc => {}
                    code => {
                        edit_buffer(&mut buffer, code);
                        self.mode = Mode::EditContent { block, buffer };
                    }
                }
                return false;
            }
            Mode::EditTitle { mut buffer } => {
                match key.code {
                    KeyCode::Enter => self.editor.article_mut().title = buffer,
                    KeyCode::Esc => {}
                    code => {
                        edit_buffer(&mut buffer, code);
                        self.mode = Mode::EditTitle { buffer };
                    }
                }
                return false;
            }
            Mode::Normal => {}
        }

        if self.editor.pending_paste().is_some() {
            match key.code {
                KeyCode::Char('y') => self.resolve_paste(PasteDecision::Accept),
                KeyCode::Char('n') | KeyCode::Esc => self.resolve_paste(PasteDecision::Decline),
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.next_block(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_block(),
            KeyCode::Char('J') => self.move_selected(true),
            KeyCode::Char('K') => self.move_selected(false),
            KeyCode::Char('a') => self.add_block(BlockType::Paragraph),
            KeyCode::Char('h') => self.add_block(BlockType::Heading),
            KeyCode::Char('c') => self.convert_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit_content(),
            KeyCode::Char('t') => {
                self.mode = Mode::EditTitle {
                    buffer: self.editor.article().title.clone(),
                }
            }
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
        false
    }

    /// Block index under a screen position in the block list
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        let inside = column > area.x
            && column < area.x + area.width.saturating_sub(1)
            && row > area.y
            && row < area.y + area.height.saturating_sub(1);
        if !inside {
            return None;
        }
        let index = (row - area.y - 1) as usize + self.list_state.offset();
        (index < self.len()).then_some(index)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let row = self.row_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = row {
                    self.list_state.select(Some(index));
                    if let Some(id) = self.selected_id() {
                        self.drag.begin(id);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = row {
                    self.drag.hover(index);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let end = if row.is_some() {
                    self.drag.drop_on_hovered(&mut self.editor)
                } else {
                    self.drag.cancel()
                };
                if let DragEnd::Dropped { block, patch, .. } = end
                    && patch.applied()
                {
                    self.select_id(&block);
                    self.status = Some("Block moved".to_string());
                }
            }
            _ => {}
        }
    }
}

fn edit_buffer(buffer: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Tab => buffer.push('\n'),
        _ => {}
    }
}

fn init_logging() -> Result<()> {
    // The terminal belongs to the UI, so log lines go to a file
    let log_path = env::temp_dir().join("review-blocks.log");
    let log_file = File::create(&log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn open_store(config: &Config) -> Result<Box<dyn ArticleStore>> {
    if let Some(url) = &config.api_base_url {
        log::info!("using article API at {url}");
        let store = review_blocks_engine::io::HttpArticleStore::new(url)?;
        return Ok(Box::new(store));
    }
    log::info!("using article directory {}", config.content_dir.display());
    Ok(Box::new(JsonFileStore::new(&config.content_dir)))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [article-id]", args[0]);
        process::exit(1);
    }
    let article_id = args.get(1).map(String::as_str);

    init_logging()?;
    log::info!("review-blocks starting up!");

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config file location: {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let store = open_store(&config)?;
    let policy = EditorPolicy {
        min_blocks: config.min_blocks,
        bootstrap: match config.bootstrap {
            BootstrapMode::Empty => Bootstrap::Empty,
            BootstrapMode::Paragraph => Bootstrap::Paragraph,
        },
    };
    let mut editor = Editor::new(policy, Default::default());
    if let Err(e) = editor.open(store.as_ref(), article_id) {
        eprintln!("Error: Failed to open article: {e}");
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(editor, store);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) {
                    return Ok(());
                }
            }
            Event::Paste(text) => app.paste(&text),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}

fn block_summary(block: &models::Block) -> String {
    let first_line = block.content.lines().next().unwrap_or("");
    match &block.kind {
        BlockKind::Rating { product_name, .. } | BlockKind::Ingredients { product_name, .. }
            if first_line.is_empty() =>
        {
            product_name.clone()
        }
        BlockKind::ProsCons { pros, cons, .. } => {
            format!("{} pros, {} cons", pros.len(), cons.len())
        }
        BlockKind::Image { url, .. } => url.clone(),
        BlockKind::Divider => "────".to_string(),
        _ => first_line.to_string(),
    }
}

fn block_details(block: &models::Block) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                block.block_type().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  #{}  {}", block.order, block.id)),
        ]),
        Line::from(""),
    ];

    let attribute = |name: &str, value: String| Line::from(format!("{name}: {value}"));
    match &block.kind {
        BlockKind::Heading { level } => lines.push(attribute("level", level.to_string())),
        BlockKind::List { style } => lines.push(attribute("style", format!("{style:?}"))),
        BlockKind::Code { language } => lines.push(attribute("language", language.clone())),
        BlockKind::Image { url, alt, caption } => {
            lines.push(attribute("url", url.clone()));
            lines.push(attribute("alt", alt.clone()));
            lines.push(attribute("caption", caption.clone()));
        }
        BlockKind::Quote { citation } => {
            lines.push(attribute("citation", citation.clone().unwrap_or_default()));
        }
        BlockKind::Cta {
            button_text,
            button_url,
            ..
        } => {
            lines.push(attribute("button", button_text.clone()));
            lines.push(attribute("url", button_url.clone()));
        }
        BlockKind::Rating {
            product_name,
            ratings,
            ..
        } => {
            lines.push(attribute("product", product_name.clone()));
            for (name, score) in ratings.scores() {
                lines.push(attribute(name, format!("{score:.1}")));
            }
            lines.push(attribute("average", format!("{:.1}", ratings.average())));
        }
        BlockKind::Ingredients { product_name, .. } => {
            lines.push(attribute("product", product_name.clone()));
        }
        BlockKind::Paragraph
        | BlockKind::Html
        | BlockKind::Divider
        | BlockKind::ProsCons { .. } => {}
    }

    if block.block_type().carries_text() {
        lines.push(Line::from(""));
        lines.extend(block.content.lines().map(|l| Line::from(l.to_string())));
    }

    for list in lists_of(block.block_type()) {
        let Some(items) = block.child_list(*list) else {
            continue;
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            list.to_string(),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )));
        for item in items {
            lines.push(Line::from(format!("  {}. {}", item.order, item.content.summary())));
        }
    }

    lines
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());

    // Article header
    let article = app.editor.article();
    let title = match &app.mode {
        Mode::EditTitle { buffer } => format!("{buffer}▏"),
        _ if article.title.is_empty() => "(untitled)".to_string(),
        _ => article.title.clone(),
    };
    let id = article.id.as_deref().unwrap_or(models::NEW_ARTICLE_ID);
    let dirty = if app.editor.is_dirty() { " *" } else { "" };
    let header = Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  [{id}]{dirty}")),
    ]);
    f.render_widget(Paragraph::new(header), rows[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    // Block list panel
    let dragged = app.drag.dragged().cloned();
    let hovered = app.drag.hovered_index();
    let items: Vec<ListItem> = app
        .editor
        .document()
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let marker = if dragged.as_ref() == Some(&block.id) {
                "≡ "
            } else if hovered == Some(index) {
                "→ "
            } else {
                "  "
            };
            let busy = if app.editor.is_generating(&block.id) {
                " …"
            } else {
                ""
            };
            let text = format!(
                "{marker}{:<12} {}{busy}",
                block.block_type().to_string(),
                block_summary(block)
            );
            ListItem::new(Line::from(Span::raw(text)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Blocks"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    app.list_area = chunks[0];
    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    // Detail panel
    let detail_lines = match (&app.mode, app.selected_id()) {
        (Mode::EditContent { buffer, .. }, _) => buffer
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .chain([Line::from("▏")])
            .collect(),
        (_, Some(id)) => app
            .editor
            .document()
            .get(&id)
            .map(block_details)
            .unwrap_or_default(),
        (_, None) => vec![Line::from("Empty article. Press a to add a paragraph.")],
    };
    let detail_title = match app.mode {
        Mode::EditContent { .. } => "Editing (Enter: save, Esc: cancel, Tab: newline)",
        _ => "Block",
    };
    let detail = Paragraph::new(detail_lines)
        .block(Block::default().borders(Borders::ALL).title(detail_title))
        .wrap(Wrap { trim: false });
    f.render_widget(detail, chunks[1]);

    // Status and help
    let status = app.status.clone().unwrap_or_default();
    let help = Line::from(vec![
        Span::raw("q: Quit | j/k: Select | J/K: Move | a/h: Add | c: Convert | "),
        Span::raw("d: Delete | e: Edit | t: Title | s: Save"),
    ]);
    let footer = Paragraph::new(vec![
        Line::from(Span::styled(status, Style::default().fg(Color::Cyan))),
        help,
    ]);
    f.render_widget(footer, rows[2]);
}
