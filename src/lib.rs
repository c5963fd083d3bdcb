//! 職業性ストレス調査票 (WSQ, 16設問) の採点
//!
//! 4択の回答を逆転項目を考慮して合計し、区分ごとの割合と
//! ストレスの程度 (4段階) を求める。表示文言は英語とインドネシア語。

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod locale;
pub mod report;
pub mod scoring;
pub mod session;
pub mod telemetry;

pub use catalog::{AnswerSet, Item, Likert};
pub use content::{Bundle, ContentProvider};
pub use error::{AppError, Error};
pub use locale::Locale;
pub use report::ExportFormat;
pub use scoring::{
    classify, max_score, normalize, section_scores, section_summaries, total_score, Band,
    Interpretation, SectionScore, SectionSummary,
};
pub use session::{Progress, Results, Session};
