#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Chart,
    Table,
}

impl ViewMode {
    pub const TITLES: [&'static str; 2] = ["Chart", "Table"];

    pub fn from_tab(index: usize) -> Self {
        match index {
            1 => ViewMode::Table,
            _ => ViewMode::Chart,
        }
    }
}

pub struct TuiState {
    /// Index into the weekly table, not into `filtered_indices`.
    pub selected: usize,
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub search_query: String,
    pub search_mode: bool,
    pub filtered_indices: Vec<usize>,
}

impl TuiState {
    pub fn new(week_count: usize) -> Self {
        Self {
            filtered_indices: (0..week_count).collect(),
            ..Self::default()
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            selected: 0,
            view_mode: ViewMode::Chart,
            tab_index: 0,
            show_help: false,
            search_query: String::new(),
            search_mode: false,
            filtered_indices: Vec::new(),
        }
    }
}
