// Modal rendering modules
mod utils;
mod report_form;
mod help;

pub use help::*;
pub use report_form::*;
