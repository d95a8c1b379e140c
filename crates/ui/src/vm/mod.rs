mod markdown_vm;
mod page_vm;
mod time_fmt;

pub use markdown_vm::markdown_to_html;
pub use page_vm::{LogLineVm, NarratorVm, PageVm, token_color_class, tone_name};
pub use time_fmt::format_clock;
