//! Writing fetched rankings out as CSV, JSON or XLSX.
//!
//! These functions only serialise what they are handed; nothing here
//! touches the network.

use lords_core::AiModel;
use rust_xlsxwriter::{Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::info;

/// Column order shared by every format
pub const HEADERS: [&str; 7] = [
    "ID",
    "Name",
    "Developer",
    "Category",
    "Score",
    "Release Date",
    "Description",
];

const SHEET_NAME: &str = "Rankings";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// One exported line per model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Developer")]
    pub developer: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Score")]
    pub score: Option<f64>,
    #[serde(rename = "Release Date")]
    pub release_date: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl From<&AiModel> for ExportRow {
    fn from(model: &AiModel) -> Self {
        Self {
            id: model.model_id.as_i64(),
            name: model.name.clone(),
            developer: model.developer.clone(),
            category: model.category_name().unwrap_or_default().to_string(),
            score: model.score,
            release_date: model.release_date.clone().unwrap_or_default(),
            description: model.description.clone(),
        }
    }
}

pub fn rows(models: &[AiModel]) -> Vec<ExportRow> {
    models.iter().map(ExportRow::from).collect()
}

fn quoted(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Header line plus one line per row; empty input gives an empty string
pub fn to_csv(rows: &[ExportRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADERS.join(","));
    for row in rows {
        let cells = [
            row.id.to_string(),
            quoted(&row.name),
            quoted(&row.developer),
            quoted(&row.category),
            row.score.map(|s| s.to_string()).unwrap_or_default(),
            quoted(&row.release_date),
            quoted(&row.description),
        ];
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

pub fn to_json(rows: &[ExportRow]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Workbook with a single "Rankings" sheet
pub fn to_xlsx(rows: &[ExportRow]) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let r = index as u32 + 1;
        sheet.write_number(r, 0, row.id as f64)?;
        sheet.write_string(r, 1, &row.name)?;
        sheet.write_string(r, 2, &row.developer)?;
        sheet.write_string(r, 3, &row.category)?;
        if let Some(score) = row.score {
            sheet.write_number(r, 4, score)?;
        }
        sheet.write_string(r, 5, &row.release_date)?;
        sheet.write_string(r, 6, &row.description)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Serialise `rows` in `format` and write them to `path`
pub async fn write_export(path: &Path, format: ExportFormat, rows: &[ExportRow]) -> ExportResult<()> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(rows).into_bytes(),
        ExportFormat::Json => to_json(rows)?.into_bytes(),
        ExportFormat::Xlsx => to_xlsx(rows)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    info!(path = %path.display(), %format, rows = rows.len(), "Export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lords_core::Category;
    use std::str::FromStr;

    fn sample() -> Vec<ExportRow> {
        let mut m = AiModel::new(1, "GPT-4");
        m.developer = "OpenAI".to_string();
        m.category = Some(Category::new(Some(1), "texto"));
        m.score = Some(9.5);
        m.release_date = Some("2023-03-14".to_string());
        m.description = "Dice \"hola\", y más".to_string();

        let bare = AiModel::new(2, "Sin datos");
        rows(&[m, bare])
    }

    #[test]
    fn test_csv_quotes_strings() {
        let csv = to_csv(&sample());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Name,Developer,Category,Score,Release Date,Description");
        assert_eq!(
            lines[1],
            r#"1,"GPT-4","OpenAI","texto",9.5,"2023-03-14","Dice ""hola"", y más""#
        );
        assert_eq!(lines[2], r#"2,"Sin datos","","",,"","""#);
    }

    #[test]
    fn test_csv_empty() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_json_uses_column_names() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert_eq!(json[0]["Name"], "GPT-4");
        assert_eq!(json[0]["Release Date"], "2023-03-14");
        assert_eq!(json[1]["Score"], serde_json::Value::Null);
    }

    #[test]
    fn test_xlsx_is_a_zip() {
        let bytes = to_xlsx(&sample()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("xlsx").unwrap(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
        assert!(ExportFormat::from_str("pdf").is_err());
    }

    #[tokio::test]
    async fn test_write_export_creates_file() {
        let dir = std::env::temp_dir().join(format!("lords-export-{}", uuid::Uuid::new_v4()));
        let path = dir.join("rankings.csv");

        write_export(&path, ExportFormat::Csv, &sample()).await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("ID,Name"));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
