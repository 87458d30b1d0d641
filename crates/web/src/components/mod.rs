// =============================================================================
// Storedesk Web - UI Components
// =============================================================================
// Table of Contents:
// 1. Layout Components
// 2. Common Components
// 3. Form Components
// =============================================================================

pub mod common;
pub mod forms;
pub mod layout;

pub use common::{
    cell_text, Button, ButtonVariant, Card, DataTable, ErrorDisplay, LoadingSpinner, Notice, Pager,
};
pub use forms::{Select, SelectOption, TextInput};
pub use layout::{AccountLayout, Layout};
