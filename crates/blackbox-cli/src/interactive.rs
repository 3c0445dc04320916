//! Interactive palette picker for the add command.
//!
//! Shows the catalog servers that are not selected yet and lets the user tick
//! the ones to drop into the blackbox. Uses dialoguer for terminal prompts.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, MultiSelect, theme::ColorfulTheme};

use blackbox_core::catalog::{Catalog, ServerDescriptor};
use blackbox_core::selection::SelectionSet;

/// Result of the interactive picker.
#[derive(Debug, Clone, Default)]
pub struct PickResult {
    /// Ids to add, in palette order
    pub ids: Vec<String>,
    /// Whether the user confirmed
    pub confirmed: bool,
}

/// Interactive picker over the palette.
pub struct PalettePicker<'a, W: Write = io::Stdout> {
    catalog: &'a Catalog,
    selection: &'a SelectionSet,
    /// Skip the confirmation prompt
    yes: bool,
    /// Output writer (for testing)
    writer: W,
    theme: ColorfulTheme,
}

impl<'a> PalettePicker<'a, io::Stdout> {
    pub fn new(catalog: &'a Catalog, selection: &'a SelectionSet, yes: bool) -> Self {
        Self {
            catalog,
            selection,
            yes,
            writer: io::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl<'a, W: Write> PalettePicker<'a, W> {
    /// Create a picker with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(
        catalog: &'a Catalog,
        selection: &'a SelectionSet,
        yes: bool,
        writer: W,
    ) -> Self {
        Self {
            catalog,
            selection,
            yes,
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    /// Run the picker.
    pub fn pick(&mut self) -> Result<PickResult> {
        self.print_header()?;

        let candidates = candidates(self.catalog, self.selection);
        if candidates.is_empty() {
            writeln!(self.writer, "  Every server in the palette is already selected.")?;
            return Ok(PickResult::default());
        }

        let labels: Vec<String> = candidates.iter().map(|s| palette_label(s)).collect();
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt("Drop servers into the blackbox (space to toggle)")
            .items(&labels)
            .interact()?;

        let ids: Vec<String> = chosen
            .into_iter()
            .map(|i| candidates[i].id.clone())
            .collect();

        if ids.is_empty() {
            return Ok(PickResult::default());
        }

        let confirmed = self.confirm(&ids)?;
        Ok(PickResult { ids, confirmed })
    }

    fn print_header(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  MCP Blackbox").bold().cyan())?;
        writeln!(
            self.writer,
            "  {} selected, {} in palette",
            self.selection.len(),
            self.catalog.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn confirm(&mut self, ids: &[String]) -> Result<bool> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  Summary").bold())?;
        for id in ids {
            writeln!(self.writer, "    + {}", id)?;
        }
        writeln!(self.writer)?;

        if self.yes {
            return Ok(true);
        }

        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Add these servers?")
            .default(true)
            .interact()?)
    }
}

/// Palette entries that are not selected yet.
fn candidates<'c>(catalog: &'c Catalog, selection: &SelectionSet) -> Vec<&'c ServerDescriptor> {
    catalog
        .iter()
        .filter(|s| !selection.contains(&s.id))
        .collect()
}

fn palette_label(server: &ServerDescriptor) -> String {
    if server.description.is_empty() {
        format!("{} ({})", server.name, server.id)
    } else {
        format!("{} ({}) - {}", server.name, server.id, server.description)
    }
}
