use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::content::Bundle;
use crate::session::Results;
use crate::Error;

const BAR_WIDTH: usize = 20;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

#[derive(Serialize)]
struct SectionRow<'a> {
    section: u32,
    name: &'a str,
    score: u32,
    percentage: f64,
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// 結果画面をテキストで組み立てる
pub fn render_text(bundle: &Bundle, results: &Results) -> String {
    let text = bundle.text();
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = writeln!(out, "{}", text.app_title);
    let _ = writeln!(out, "{}", text.app_subtitle);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", text.results_title);
    let _ = writeln!(out, "{} {}", text.total_score, results.total_score);
    let _ = writeln!(out, "{} {}", text.level, results.interpretation.level);
    let _ = writeln!(out, "{}", results.interpretation.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", text.section_analysis);
    for section in &results.sections {
        let _ = writeln!(
            out,
            "  {:<34} {:>3} {:<7} [{}] {:>5.1}%",
            section.name,
            section.score,
            text.points,
            bar(section.percentage),
            section.percentage
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", text.footer_text);
    out
}

pub fn write_csv<W: Write>(writer: W, results: &Results) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for section in &results.sections {
        writer.serialize(SectionRow {
            section: section.section,
            name: &section.name,
            score: section.score,
            percentage: section.percentage,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// 結果をファイルに書き出す
pub fn export(
    path: &Path,
    format: ExportFormat,
    bundle: &Bundle,
    results: &Results,
) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Text => writer.write_all(render_text(bundle, results).as_bytes())?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, results)?;
            writer.write_all(b"\n")?;
        }
        ExportFormat::Csv => write_csv(&mut writer, results)?,
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), ?format, "results exported");
    Ok(())
}
