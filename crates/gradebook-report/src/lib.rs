//! gradebook-report — Report card model and its text, JSON and HTML renderings.

pub mod card;
pub mod html;
pub mod text;

pub use card::ReportCard;
