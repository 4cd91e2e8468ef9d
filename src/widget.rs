mod amount_input;
pub mod block;
mod comparison_chart;
mod date_picker;
mod help;
mod summary;

pub use amount_input::{AmountInputState, AmountInputWidget};
pub use comparison_chart::{ComparisonChart, NUM_LOADING_TICKS};
pub use date_picker::{DatePickerState, DatePickerWidget};
pub use help::{HelpWidget, HELP_HEIGHT, HELP_WIDTH};
pub use summary::SummaryWidget;
