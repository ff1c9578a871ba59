use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io;
use crate::io::paths;
use crate::io::recent::{self, RecentFile};
use crate::io::session::{SaveOutcome, Session};
use crate::model::config::next_theme;
use crate::model::{AppConfig, Notice};
use crate::ops::StoreError;
use crate::ops::search::{self, SearchHit};
use crate::ops::store::Store;
use crate::util::html;

use super::editor::TextInput;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into a list name, task title or task content
    Edit,
    /// Typing a search query
    Search,
    /// Entering a file path
    Prompt,
    Confirm,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Lists,
    Tasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    NewTask,
    ListName,
    TaskTitle,
    TaskContent,
}

#[derive(Debug, Clone)]
pub struct EditState {
    pub target: EditTarget,
    pub input: TextInput,
    /// Text when editing started; committing it unchanged is a no-op
    pub original: String,
}

/// The open search panel
#[derive(Debug, Clone)]
pub struct SearchState {
    pub input: TextInput,
    pub hits: Vec<SearchHit>,
    pub cursor: usize,
    /// List selected when the panel opened, restored on cancel
    pub saved_list: Option<usize>,
}

/// An action that would discard the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    NewFile,
    OpenFile,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    OpenFile,
    SaveAs,
}

/// File path prompt, standing in for the open and save dialogs
#[derive(Debug, Clone)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: TextInput,
    pub recent: Vec<RecentFile>,
    pub recent_cursor: Option<usize>,
    /// Action to continue with once a save-as succeeds
    pub after_save: Option<PendingAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Save / Don't save / Cancel before `PendingAction`
    UnsavedChanges(PendingAction),
    DeleteList(usize),
    DeleteTask { list: usize, task: usize },
}

/// Answer to a confirm popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    /// Delete, or save first
    Yes,
    /// Keep going without saving
    No,
    Cancel,
}

/// Main application state
pub struct App {
    pub store: Store,
    pub session: Session,
    pub config: AppConfig,
    /// Where theme changes are written; `None` leaves the config file alone
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    pub mode: Mode,
    pub focus: Focus,
    /// Detail pane for the selected task
    pub show_detail: bool,
    /// Checked tasks listed below the open ones
    pub show_done: bool,
    pub show_help: bool,
    pub notice: Option<(Notice, Instant)>,
    pub edit: Option<EditState>,
    pub search: Option<SearchState>,
    pub prompt: Option<PromptState>,
    pub confirm: Option<ConfirmAction>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        store: Store,
        session: Session,
        config: AppConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        let theme = Theme::from_config(&config.ui);
        let show_done = config.ui.show_done;
        App {
            store,
            session,
            config,
            config_path,
            theme,
            mode: Mode::Navigate,
            focus: Focus::Lists,
            show_detail: false,
            show_done,
            show_help: false,
            notice: None,
            edit: None,
            search: None,
            prompt: None,
            confirm: None,
            should_quit: false,
        }
    }

    // -----------------------------------------------------------------------
    // Notices
    // -----------------------------------------------------------------------

    pub fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(title = %notice.title, desc = %notice.desc, "error notice");
        }
        self.notice = Some((notice, Instant::now()));
    }

    /// Called once per event loop iteration
    pub fn tick(&mut self) {
        self.expire_notice(Instant::now());
    }

    pub(crate) fn expire_notice(&mut self, now: Instant) {
        let ttl = Duration::from_secs(self.config.ui.notice_seconds);
        if let Some((_, shown)) = &self.notice
            && now.saturating_duration_since(*shown) >= ttl
        {
            self.notice = None;
        }
    }

    fn store_error(&mut self, err: StoreError) {
        tracing::debug!(error = %err, "store action rejected");
        self.notify(Notice::error("Could not update", err.to_string()));
    }

    // -----------------------------------------------------------------------
    // Task visibility and navigation
    // -----------------------------------------------------------------------

    /// Indices of the selected list's tasks in display order: open tasks
    /// first, then checked ones when they are shown.
    pub fn visible_tasks(&self) -> Vec<usize> {
        let tasks = self.store.task_list();
        let mut visible: Vec<usize> = (0..tasks.len())
            .filter(|&i| !tasks[i].is_checked())
            .collect();
        if self.show_done {
            visible.extend((0..tasks.len()).filter(|&i| tasks[i].is_checked()));
        }
        visible
    }

    /// Position of the selected task within [`App::visible_tasks`]
    pub fn task_cursor(&self) -> Option<usize> {
        let selected = self.store.task_index()?;
        self.visible_tasks().iter().position(|&i| i == selected)
    }

    pub fn move_list(&mut self, delta: isize) {
        let count = self.store.list_count();
        if count == 0 {
            return;
        }
        let next = match self.store.list_index() {
            Some(i) => step(i, delta, count),
            None => 0,
        };
        if self.store.list_index() != Some(next) {
            self.select_list(Some(next));
        }
    }

    pub fn move_task(&mut self, delta: isize) {
        let visible = self.visible_tasks();
        if visible.is_empty() {
            return;
        }
        let next = match self.task_cursor() {
            Some(pos) => step(pos, delta, visible.len()),
            None if delta < 0 => visible.len() - 1,
            None => 0,
        };
        self.select_task(Some(visible[next]));
    }

    /// Jump to the first or last visible task
    pub fn jump_task(&mut self, last: bool) {
        let visible = self.visible_tasks();
        let target = if last { visible.last() } else { visible.first() };
        if let Some(&index) = target {
            self.select_task(Some(index));
        }
    }

    fn select_list(&mut self, index: Option<usize>) {
        if let Err(e) = self.store.select_list(index) {
            tracing::debug!(error = %e, "list selection rejected");
        }
    }

    fn select_task(&mut self, index: Option<usize>) {
        if let Err(e) = self.store.select_task(index) {
            tracing::debug!(error = %e, "task selection rejected");
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Lists => Focus::Tasks,
            Focus::Tasks => Focus::Lists,
        };
    }

    /// Enter on a task: open its detail pane, or on a list: move into its tasks
    pub fn open_selected(&mut self) {
        match self.focus {
            Focus::Lists => {
                if self.store.current_list().is_some() {
                    self.focus = Focus::Tasks;
                    if self.store.task_index().is_none() {
                        self.jump_task(false);
                    }
                }
            }
            Focus::Tasks => {
                if self.store.current_task().is_some() {
                    self.show_detail = true;
                }
            }
        }
    }

    pub fn toggle_show_done(&mut self) {
        self.show_done = !self.show_done;
        if let Some(selected) = self.store.task_index()
            && !self.visible_tasks().contains(&selected)
        {
            self.select_task(None);
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Start editing `target`. Does nothing when there is nothing to edit.
    pub fn begin_edit(&mut self, target: EditTarget) {
        let original = match target {
            EditTarget::NewTask => String::new(),
            EditTarget::ListName => match self.store.current_name() {
                Some(name) => name.to_string(),
                None => return,
            },
            EditTarget::TaskTitle => match self.store.current_task() {
                Some(task) => task.title.clone(),
                None => return,
            },
            EditTarget::TaskContent => match self.store.current_task() {
                Some(task) => html::html_to_text(&task.content),
                None => return,
            },
        };

        let input = if target == EditTarget::TaskContent {
            self.show_detail = true;
            TextInput::multiline(original.clone())
        } else {
            TextInput::new(original.clone())
        };
        if target == EditTarget::NewTask {
            self.focus = Focus::Tasks;
        }

        self.edit = Some(EditState {
            target,
            input,
            original,
        });
        self.mode = Mode::Edit;
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.mode = Mode::Navigate;
    }

    /// Apply the edit buffer to its target and leave edit mode.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        self.mode = Mode::Navigate;

        let text = edit.input.text;
        if text == edit.original && edit.target != EditTarget::NewTask {
            return;
        }

        let result = match edit.target {
            EditTarget::NewTask => match self.store.add_task(&text) {
                Ok(_) | Err(StoreError::EmptyTitle) => Ok(()),
                Err(e) => Err(e),
            },
            EditTarget::ListName => match text.trim() {
                "" => Ok(()),
                name => self.store.rename_current_list(name),
            },
            EditTarget::TaskTitle => match text.trim() {
                "" => {
                    self.notify(Notice::info("Title unchanged", "A task needs a title"));
                    return;
                }
                title => self.store.set_current_task_title(title),
            },
            EditTarget::TaskContent => self
                .store
                .set_current_task_content(html::text_to_html(&text)),
        };

        match result {
            Ok(()) => self.after_mutation(),
            Err(e) => self.store_error(e),
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Keep derived views in step with the document
    fn after_mutation(&mut self) {
        self.refresh_search();
    }

    /// Add a list, select it and start renaming it
    pub fn add_list(&mut self) {
        self.store.add_list();
        self.focus = Focus::Lists;
        self.after_mutation();
        self.begin_edit(EditTarget::ListName);
    }

    pub fn toggle_selected_task(&mut self) {
        let Some(index) = self.store.task_index() else {
            return;
        };
        let pos = self.task_cursor().unwrap_or(0);
        match self.store.toggle_task_status(index) {
            Ok(_) => {
                let visible = self.visible_tasks();
                if !visible.contains(&index) {
                    let next = visible
                        .get(pos.min(visible.len().saturating_sub(1)))
                        .copied();
                    self.select_task(next);
                }
                self.after_mutation();
            }
            Err(e) => self.store_error(e),
        }
    }

    /// Ask before deleting the focused list or task
    pub fn request_delete(&mut self) {
        let action = match self.focus {
            Focus::Lists => self.store.list_index().map(ConfirmAction::DeleteList),
            Focus::Tasks => self
                .store
                .list_index()
                .zip(self.store.task_index())
                .map(|(list, task)| ConfirmAction::DeleteTask { list, task }),
        };
        if let Some(action) = action {
            self.confirm = Some(action);
            self.mode = Mode::Confirm;
        }
    }

    pub fn answer_confirm(&mut self, answer: ConfirmAnswer) {
        let Some(action) = self.confirm.take() else {
            return;
        };
        self.mode = Mode::Navigate;

        match (action, answer) {
            (ConfirmAction::DeleteList(index), ConfirmAnswer::Yes) => {
                match self.store.remove_list(index) {
                    Ok(_) => self.after_mutation(),
                    Err(e) => self.store_error(e),
                }
            }
            (ConfirmAction::DeleteTask { list, task }, ConfirmAnswer::Yes) => {
                match self.store.remove_task(list, task) {
                    Ok(_) => self.after_mutation(),
                    Err(e) => self.store_error(e),
                }
            }
            (ConfirmAction::UnsavedChanges(pending), ConfirmAnswer::Yes) => {
                self.save_then(Some(pending));
            }
            (ConfirmAction::UnsavedChanges(pending), ConfirmAnswer::No) => {
                self.perform(pending);
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    /// Run `action`, first asking to save when the document has unsaved changes
    pub fn request(&mut self, action: PendingAction) {
        if self.session.is_dirty(&self.store) {
            self.confirm = Some(ConfirmAction::UnsavedChanges(action));
            self.mode = Mode::Confirm;
        } else {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: PendingAction) {
        match action {
            PendingAction::NewFile => {
                let notice = self.session.new_file(&mut self.store);
                self.reset_view();
                self.notify(notice);
            }
            PendingAction::OpenFile => self.open_prompt(PromptKind::OpenFile, None),
            PendingAction::Quit => self.should_quit = true,
        }
    }

    pub fn save(&mut self) {
        self.save_then(None);
    }

    /// Save, asking for a path if needed, then continue with `next` on success
    fn save_then(&mut self, next: Option<PendingAction>) {
        match self.session.save(&self.store) {
            SaveOutcome::Saved(notice) => {
                self.notify(notice);
                if let Some(action) = next {
                    self.perform(action);
                }
            }
            SaveOutcome::NeedsPath => self.open_prompt(PromptKind::SaveAs, next),
            SaveOutcome::Failed(notice) => self.notify(notice),
        }
    }

    /// Load `path`; failures leave everything as it was and show a notice
    pub fn open_path(&mut self, path: &Path) {
        match self.session.open(&mut self.store, path) {
            Ok(notice) => {
                self.reset_view();
                self.notify(notice);
            }
            Err(notice) => self.notify(notice),
        }
    }

    fn reset_view(&mut self) {
        self.focus = Focus::Lists;
        self.show_detail = false;
        self.edit = None;
        self.search = None;
        self.mode = Mode::Navigate;
    }

    pub fn open_prompt(&mut self, kind: PromptKind, after_save: Option<PendingAction>) {
        let (initial, recent) = match kind {
            PromptKind::OpenFile => (
                String::new(),
                self.session
                    .recent_path()
                    .map(|p| recent::read_recent_from(p).files)
                    .unwrap_or_default(),
            ),
            PromptKind::SaveAs => (
                self.session
                    .current_file()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                Vec::new(),
            ),
        };
        self.prompt = Some(PromptState {
            kind,
            input: TextInput::new(initial),
            recent,
            recent_cursor: None,
            after_save,
        });
        self.mode = Mode::Prompt;
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.mode = Mode::Navigate;
    }

    /// Step through the recent files, copying the chosen path into the input
    pub fn move_recent(&mut self, delta: isize) {
        let Some(prompt) = &mut self.prompt else {
            return;
        };
        if prompt.recent.is_empty() {
            return;
        }
        let next = match prompt.recent_cursor {
            Some(i) => step(i, delta, prompt.recent.len()),
            None => 0,
        };
        prompt.recent_cursor = Some(next);
        prompt.input = TextInput::new(prompt.recent[next].path.clone());
    }

    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        self.mode = Mode::Navigate;

        let raw = prompt.input.text.trim();
        if raw.is_empty() {
            return;
        }
        let path = expand_tilde(raw);

        match prompt.kind {
            PromptKind::OpenFile => self.open_path(&path),
            PromptKind::SaveAs => match self.session.save_as(&self.store, &path) {
                SaveOutcome::Saved(notice) => {
                    self.notify(notice);
                    if let Some(action) = prompt.after_save {
                        self.perform(action);
                    }
                }
                SaveOutcome::Failed(notice) => self.notify(notice),
                SaveOutcome::NeedsPath => {}
            },
        }
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    pub fn open_search(&mut self) {
        if self.search.is_none() {
            self.search = Some(SearchState {
                input: TextInput::new(""),
                hits: Vec::new(),
                cursor: 0,
                saved_list: self.store.list_index(),
            });
        }
        self.mode = Mode::Search;
    }

    /// Rerun the query against the current document
    pub fn refresh_search(&mut self) {
        if let Some(state) = &mut self.search {
            state.hits = search::search(self.store.document(), &state.input.text);
            state.cursor = state.cursor.min(state.hits.len().saturating_sub(1));
        }
    }

    /// The query changed: rerun it and preview the first hit
    pub fn search_input_changed(&mut self) {
        if let Some(state) = &mut self.search {
            state.cursor = 0;
        }
        self.refresh_search();
        self.preview_hit();
    }

    pub fn search_regex(&self) -> Option<Regex> {
        self.search
            .as_ref()
            .and_then(|s| search::build_regex(&s.input.text))
    }

    fn current_hit(&self) -> Option<SearchHit> {
        let state = self.search.as_ref()?;
        state.hits.get(state.cursor).cloned()
    }

    pub fn move_hit(&mut self, delta: isize) {
        if let Some(state) = &mut self.search
            && !state.hits.is_empty()
        {
            state.cursor = step(state.cursor, delta, state.hits.len());
        }
        self.preview_hit();
    }

    /// Select the highlighted hit's list and task without closing the panel
    fn preview_hit(&mut self) {
        if let Some(hit) = self.current_hit() {
            self.select_hit(&hit);
        }
    }

    /// Keep the highlighted hit selected, close the panel and show its detail
    pub fn choose_hit(&mut self) {
        let Some(hit) = self.current_hit() else {
            return;
        };
        self.search = None;
        self.mode = Mode::Navigate;

        self.select_hit(&hit);
        if self.store.current_task().is_some_and(|t| t.is_checked()) {
            self.show_done = true;
        }
        self.focus = Focus::Tasks;
        self.show_detail = true;
    }

    fn select_hit(&mut self, hit: &SearchHit) {
        if self.store.list_index() != Some(hit.list_index) {
            self.select_list(Some(hit.list_index));
        }
        self.select_task(Some(hit.task_index));
    }

    /// Close the panel and go back to the list selected when it opened
    pub fn close_search(&mut self) {
        if let Some(state) = self.search.take() {
            self.select_list(state.saved_list);
        }
        self.mode = Mode::Navigate;
    }

    /// Check off (or reopen) the highlighted hit. Does nothing without hits.
    pub fn toggle_current_hit(&mut self) {
        let Some(hit) = self.current_hit() else {
            return;
        };
        self.select_hit(&hit);
        match self.store.toggle_task_status(hit.task_index) {
            Ok(_) => {
                self.refresh_search();
                self.preview_hit();
            }
            Err(e) => self.store_error(e),
        }
    }

    // -----------------------------------------------------------------------
    // Appearance
    // -----------------------------------------------------------------------

    /// Switch to the next accent theme and remember it in the config file
    pub fn cycle_theme(&mut self) {
        let next = next_theme(&self.config.ui.theme);
        self.config.ui.theme = next.to_string();
        self.theme = Theme::from_config(&self.config.ui);

        let saved = match &self.config_path {
            Some(path) => config_io::set_theme_in(path, next),
            None => Ok(()),
        };
        if let Err(e) = saved {
            self.notify(Notice::error("Could not save theme", e.to_string()));
        }
    }

    pub fn head_title(&self) -> String {
        self.session.head_title()
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty(&self.store)
    }
}

/// Move `delta` steps from `from` within `0..len`, stopping at the ends
fn step(from: usize, delta: isize, len: usize) -> usize {
    let max = len.saturating_sub(1) as isize;
    (from as isize + delta).clamp(0, max) as usize
}

/// `~` and `~/...` relative to the home directory
fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        return paths::home_dir();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => paths::home_dir().join(rest),
        None => PathBuf::from(raw),
    }
}

/// Run the TUI application, loading `file` first when given
pub fn run(file: Option<PathBuf>, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(
        Store::new(),
        Session::with_default_paths(),
        config,
        Some(config_io::config_path()),
    );
    if let Some(path) = file {
        app.open_path(&path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        app.tick();
        if app.should_quit {
            break;
        }
    }
    Ok(())
}
