//! Start/end station dropdowns.

use crate::stations::StationDirectory;

/// Text of the default ("no selection") entry.
pub const DEFAULT_OPTION_LABEL: &str = "Select a station";

/// A single dropdown: a default entry followed by one option per station.
///
/// `selected == 0` is the default entry; `selected == i + 1` is
/// `options[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationList {
    options: Vec<String>,
    selected: usize,
}

impl StationList {
    /// Replace the options and return to the default entry.
    fn populate(&mut self, directory: &StationDirectory) {
        self.options = directory.names().map(str::to_string).collect();
        self.selected = 0;
    }

    /// Select the option whose value is `value`.
    ///
    /// An empty or unknown value selects the default entry. Returns whether
    /// a station option is now selected.
    pub fn select(&mut self, value: &str) -> bool {
        self.selected = self
            .options
            .iter()
            .position(|option| option == value)
            .map_or(0, |i| i + 1);
        self.selected != 0
    }

    /// Return to the default entry.
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Value of the selected entry; empty for the default entry.
    pub fn value(&self) -> &str {
        match self.selected {
            0 => "",
            i => &self.options[i - 1],
        }
    }

    /// Index of the selected entry (0 is the default entry).
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Station option values, default entry excluded.
    pub fn option_values(&self) -> &[String] {
        &self.options
    }
}

/// The current (start, end) choice; each side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSelection {
    pub start: String,
    pub end: String,
}

/// The start and end dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionControls {
    pub start: StationList,
    pub end: StationList,
}

impl SelectionControls {
    /// Create empty controls (only the default entry).
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one option per station into both lists, in directory order.
    pub fn populate(&mut self, directory: &StationDirectory) {
        self.start.populate(directory);
        self.end.populate(directory);
    }

    /// Select both lists by value.
    pub fn select(&mut self, start: &str, end: &str) {
        self.start.select(start);
        self.end.select(end);
    }

    /// Current selection.
    pub fn selection(&self) -> RouteSelection {
        RouteSelection {
            start: self.start.value().to_string(),
            end: self.end.value().to_string(),
        }
    }

    /// Return both lists to their default entry.
    pub fn reset(&mut self) {
        self.start.reset();
        self.end.reset();
    }

    /// Whether the lists hold any station options.
    pub fn is_populated(&self) -> bool {
        !self.start.options.is_empty()
    }
}
