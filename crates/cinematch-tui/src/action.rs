/// Everything the UI can be asked to do, decoupled from the key that asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    GoTop,
    GoBottom,
    /// Open the card under the cursor.
    DrillIn,
    NavigateBack,
    /// Reload the popular list.
    Home,
    StartSearch,
    /// A typed character while editing the search box (`'\x08'` = backspace).
    SearchInput(char),
    SearchConfirm,
    SearchCancel,
    ToggleHelp,
    Resize(u16, u16),
    Tick,
    None,
}
