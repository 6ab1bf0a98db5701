use crate::model::Model;
use crate::tree::objects::{INITIAL_EXPAND_DEPTH, OBJECT_HEADERS};
use crate::tree::properties::PROPERTY_HEADERS;
use crate::tree::{build_object_tree, build_property_panel};
use crate::ui::tree_view::TreeView;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Objects,
    Properties,
}

pub struct App {
    pub model: Model,
    pub objects: TreeView,
    pub properties: TreeView,
    pub focus_panel: FocusPanel,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(model: Model) -> Self {
        let mut objects = TreeView::new(" Objects ", OBJECT_HEADERS);
        objects.set_rows(vec![build_object_tree(&model)]);
        objects.expand_to_depth(INITIAL_EXPAND_DEPTH);

        Self {
            model,
            objects,
            properties: TreeView::new(" Properties ", PROPERTY_HEADERS),
            focus_panel: FocusPanel::Objects,
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::panels::draw_viewer(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            _ => match self.focus_panel {
                FocusPanel::Objects => self.handle_object_keys(key),
                FocusPanel::Properties => self.handle_property_keys(key.code),
            },
        }
    }

    fn toggle_focus(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusPanel::Objects => FocusPanel::Properties,
            FocusPanel::Properties => FocusPanel::Objects,
        };
    }

    fn handle_object_keys(&mut self, key: KeyEvent) {
        // Ctrl/Shift moves the cursor without changing the selection
        let keep_selection = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SHIFT);

        let selection_changed = match key.code {
            KeyCode::Up | KeyCode::Char('k') if keep_selection => {
                self.objects.move_focus(-1);
                false
            }
            KeyCode::Down | KeyCode::Char('j') if keep_selection => {
                self.objects.move_focus(1);
                false
            }
            KeyCode::Char('K') => {
                self.objects.move_focus(-1);
                false
            }
            KeyCode::Char('J') => {
                self.objects.move_focus(1);
                false
            }
            KeyCode::Up | KeyCode::Char('k') => self.objects.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.objects.move_cursor(1),
            KeyCode::PageUp => self.objects.move_cursor(-10),
            KeyCode::PageDown => self.objects.move_cursor(10),
            KeyCode::Left | KeyCode::Char('h') => self.objects.collapse(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                self.objects.expand();
                false
            }
            KeyCode::Char(' ') => self.objects.toggle_selected(),
            KeyCode::Char('e') => {
                self.objects.expand_all();
                false
            }
            _ => false,
        };

        if selection_changed {
            self.refresh_properties();
        }
    }

    fn handle_property_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.properties.move_focus(-1),
            KeyCode::Down | KeyCode::Char('j') => self.properties.move_focus(1),
            KeyCode::PageUp => self.properties.move_focus(-10),
            KeyCode::PageDown => self.properties.move_focus(10),
            KeyCode::Left | KeyCode::Char('h') => {
                self.properties.collapse();
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                self.properties.expand();
            }
            KeyCode::Char('e') => self.properties.expand_all(),
            _ => {}
        }
    }

    /// Rebuilds the property panel from the current object selection.
    ///
    /// The panel is always cleared first, so a selection that resolves to
    /// nothing leaves it empty.
    pub fn refresh_properties(&mut self) {
        self.properties.clear();
        let rows = build_property_panel(&self.model, self.objects.selected_rows());
        tracing::debug!(sections = rows.len(), "selection changed");
        self.properties.set_rows(rows);
        self.properties.expand_all();
    }
}
