/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    ShoppingList,
    Counter,
    Idea,
}

impl Tab {
    /// Get the display title for this tab
    pub fn title(&self) -> &'static str {
        match self {
            Tab::ShoppingList => "Shopping List",
            Tab::Counter => "Counter",
            Tab::Idea => "Idea",
        }
    }

    /// Get all tabs in display order
    pub fn all() -> &'static [Tab] {
        &[Tab::ShoppingList, Tab::Counter, Tab::Idea]
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::ShoppingList => Tab::Counter,
            Tab::Counter => Tab::Idea,
            Tab::Idea => Tab::ShoppingList,
        }
    }

    pub fn previous(&self) -> Tab {
        match self {
            Tab::ShoppingList => Tab::Idea,
            Tab::Counter => Tab::ShoppingList,
            Tab::Idea => Tab::Counter,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Typing into the shopping list input field
    Editing,
    /// Yes/cancel prompt before deleting an item
    ConfirmDelete,
    /// Completion history under the Counter tab
    History,
}

/// Tactile/audible feedback kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Something was completed
    Success,
    /// Something was undone or removed
    Impact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        for tab in Tab::all() {
            assert_eq!(tab.next().previous(), *tab);
        }
        assert_eq!(Tab::Idea.next(), Tab::ShoppingList);
    }

    #[test]
    fn test_tab_titles() {
        assert_eq!(Tab::ShoppingList.title(), "Shopping List");
        assert_eq!(Tab::Counter.title(), "Counter");
        assert_eq!(Tab::Idea.title(), "Idea");
    }
}
