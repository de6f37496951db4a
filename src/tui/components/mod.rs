//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields, rebuilt each frame:
//! - `TitleBar`: app name, status message, busy spinner
//! - `NotificationModal`: blocking error report
//! - `QrOverlay`: full-size QR code
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state in `TuiState` and emit events:
//! - `TextField`: multi-line editor shared by the forms below
//! - `UploadForm`: source text input, file drops
//! - `SummaryPanel`: the active summary (scroll state), store action, sharing
//! - `ChatPanel`: turn history and question input
//! - `FilePicker`: directory browser overlay
//!
//! Each component file holds its state, event and render logic, and tests.
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status bar)
//! ├── text_field/       (editor + visual line layout)
//! ├── upload_form.rs    (left column)
//! ├── summary_panel.rs  (right column, top)
//! ├── chat_panel.rs     (right column, bottom)
//! ├── file_picker.rs    (Ctrl+O overlay)
//! ├── notification.rs   (error modal)
//! └── qr_overlay.rs     (Ctrl+R overlay)
//! ```

pub mod chat_panel;
pub mod file_picker;
pub mod notification;
pub mod qr_overlay;
pub mod summary_panel;
pub mod text_field;
mod title_bar;
pub mod upload_form;

pub use chat_panel::{ChatEvent, ChatPanel, ChatPanelState};
pub use file_picker::{FilePicker, FilePickerState, PickerEvent};
pub use notification::NotificationModal;
pub use qr_overlay::QrOverlay;
pub use summary_panel::SummaryPanel;
pub use text_field::{FieldEvent, TextField};
pub use title_bar::TitleBar;
pub use upload_form::{UploadEvent, UploadForm};
