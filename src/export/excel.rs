//! Excel出力（rust_xlsxwriter）
//!
//! 照合結果の一覧と、ジョブサマリーの2種類を書き出す。

use crate::error::Result;
use circuit_match_common::{CompareOutcome, SummaryRow};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

const RESULT_HEADERS: [&str; 8] = [
    "#",
    "เลขวงจร",
    "ข้อความเดิม",
    "สถานะ",
    "ลูกค้า",
    "ชื่อโครงการ",
    "จังหวัด",
    "ประเภท",
];
const RESULT_WIDTHS: [f64; 8] = [6.0, 16.0, 20.0, 12.0, 30.0, 40.0, 18.0, 16.0];

const SUMMARY_HEADERS: [&str; 8] = [
    "#",
    "ลูกค้า",
    "ชื่อโครงการ",
    "SLA",
    "จังหวัด",
    "ประเภท",
    "จำนวนวงจร",
    "เลขวงจร",
];
const SUMMARY_WIDTHS: [f64; 7] = [5.0, 30.0, 45.0, 10.0, 20.0, 25.0, 12.0];

/// Excelの列幅上限
const MAX_COLUMN_WIDTH: f64 = 255.0;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA))
}

fn write_header(worksheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// 照合結果を一覧シート（Results）と集計シート（Run）に書き出す
pub fn write_results(outcome: &CompareOutcome, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Results")?;
        write_header(worksheet, &RESULT_HEADERS)?;
        for (col, width) in RESULT_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        let unmatched = Format::new().set_font_color(Color::RGB(0xC00000));
        for (i, result) in outcome.results.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, (i + 1) as f64)?;
            worksheet.write_string(row, 1, &result.circuit_norm)?;
            worksheet.write_string(row, 2, &result.circuit_raw)?;
            if result.matched {
                worksheet.write_string(row, 3, result.status())?;
            } else {
                worksheet.write_string_with_format(row, 3, result.status(), &unmatched)?;
            }
            worksheet.write_string(row, 4, &result.customer)?;
            worksheet.write_string(row, 5, &result.project_name)?;
            worksheet.write_string(row, 6, &result.province)?;
            worksheet.write_string(row, 7, &result.service_category)?;
        }
    }

    {
        let summary = &outcome.summary;
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Run")?;
        worksheet.set_column_width(0, 18.0)?;
        let label = Format::new().set_bold();

        let job = summary.job_id.map(|id| id.to_string()).unwrap_or_default();
        worksheet.write_string_with_format(0, 0, "job_id", &label)?;
        worksheet.write_string(0, 1, job)?;
        let totals = [
            ("matched_total", summary.matched_total),
            ("unmatched_total", summary.unmatched_total),
            ("total_records", summary.total_records),
        ];
        for (i, (name, value)) in totals.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_string_with_format(row, 0, *name, &label)?;
            worksheet.write_number(row, 1, *value as f64)?;
        }
    }

    workbook.save(output_path)?;
    tracing::debug!(path = %output_path.display(), rows = outcome.results.len(), "結果Excelを保存");
    Ok(())
}

/// ジョブサマリーを1シートに書き出す
pub fn write_summary(rows: &[SummaryRow], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Summary")?;
    write_header(worksheet, &SUMMARY_HEADERS)?;
    for (col, width) in SUMMARY_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let wrap = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top);
    let mut circuits_width: f64 = 20.0;

    for (i, summary) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        let circuits = summary.circuits_joined();
        circuits_width = circuits_width.max(circuits.chars().count() as f64 + 2.0);

        worksheet.write_number(row, 0, summary.index as f64)?;
        worksheet.write_string(row, 1, &summary.customer)?;
        worksheet.write_string(row, 2, &summary.project_name)?;
        worksheet.write_string(row, 3, summary.sla.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 4, &summary.province)?;
        worksheet.write_string(row, 5, summary.category_label())?;
        worksheet.write_number(row, 6, summary.circuit_count() as f64)?;
        worksheet.write_string_with_format(row, 7, circuits, &wrap)?;
    }
    worksheet.set_column_width(7, circuits_width.min(MAX_COLUMN_WIDTH))?;

    workbook.save(output_path)?;
    tracing::debug!(path = %output_path.display(), groups = rows.len(), "サマリーExcelを保存");
    Ok(())
}
