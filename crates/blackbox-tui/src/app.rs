//! TUI state: the palette, the blackbox, and what keys do to them.

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent};

use blackbox_core::catalog::{Catalog, ServerDescriptor};
use blackbox_core::compose::compose_selection;
use blackbox_core::selection::{SelectionManager, SelectionSet, SelectionStore};

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Palette,
    Blackbox,
}

pub struct App<S: SelectionStore> {
    catalog: Catalog,
    manager: SelectionManager<S>,
    focus: Focus,
    palette_index: usize,
    blackbox_index: usize,
    show_combined: bool,
    status: Option<String>,
    should_quit: bool,
}

impl<S: SelectionStore> App<S> {
    pub fn new(catalog: Catalog, manager: SelectionManager<S>) -> Self {
        Self {
            catalog,
            manager,
            focus: Focus::Palette,
            palette_index: 0,
            blackbox_index: 0,
            show_combined: false,
            status: None,
            should_quit: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        self.manager.selection()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    pub fn blackbox_index(&self) -> usize {
        self.blackbox_index
    }

    pub fn show_combined(&self) -> bool {
        self.show_combined
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Descriptor for a selected id, if the catalog knows it.
    pub fn descriptor(&self, id: &str) -> Option<&ServerDescriptor> {
        self.catalog.get(id)
    }

    /// Pretty JSON of the combined configuration for the current selection.
    pub fn combined_json(&self) -> String {
        compose_selection(self.manager.selection(), &self.catalog)
            .to_json_pretty()
            .unwrap_or_else(|e| format!("Failed to render configuration: {e}"))
    }

    /// Apply a key press. Save failures are reported in the status line.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                Ok(())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1);
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1);
                Ok(())
            }
            KeyCode::Char('c') => {
                self.show_combined = !self.show_combined;
                Ok(())
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == Focus::Palette => {
                self.drop_highlighted()
            }
            KeyCode::Char('d') | KeyCode::Delete if self.focus == Focus::Blackbox => {
                self.remove_highlighted()
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!("{:#}", e);
            self.status = Some(format!("{e:#}"));
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Palette => Focus::Blackbox,
            Focus::Blackbox => Focus::Palette,
        };
    }

    fn move_cursor(&mut self, delta: isize) {
        let (index, len) = match self.focus {
            Focus::Palette => (&mut self.palette_index, self.catalog.len()),
            Focus::Blackbox => (&mut self.blackbox_index, self.manager.selection().len()),
        };
        if len == 0 {
            *index = 0;
            return;
        }
        *index = index.saturating_add_signed(delta).min(len - 1);
    }

    /// Drop the highlighted palette server into the blackbox.
    fn drop_highlighted(&mut self) -> Result<()> {
        let Some(server) = self.catalog.iter().nth(self.palette_index) else {
            return Ok(());
        };
        let (id, name) = (server.id.clone(), server.name.clone());

        self.status = Some(if self.manager.add(id.clone())? {
            tracing::info!("Dropped {} into the blackbox", id);
            format!("Added {name}")
        } else {
            format!("{name} is already in the blackbox")
        });
        Ok(())
    }

    fn remove_highlighted(&mut self) -> Result<()> {
        let Some(id) = self
            .manager
            .selection()
            .ids()
            .get(self.blackbox_index)
            .cloned()
        else {
            return Ok(());
        };

        if self.manager.remove(&id)? {
            tracing::info!("Removed {} from the blackbox", id);
            self.status = Some(format!("Removed {id}"));
        }

        let len = self.manager.selection().len();
        self.blackbox_index = self.blackbox_index.min(len.saturating_sub(1));
        Ok(())
    }
}
