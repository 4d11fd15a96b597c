//! Presentation of an [`AnalysisReport`]: plain-text summary for the
//! terminal and a CSV/JSON bundle for export. Unknown items are always shown
//! as "cost not estimated" rather than dropped, so estimate coverage stays
//! visible.

use crate::domain::model::{AnalysisReport, PublisherClassification};
use crate::utils::error::{Result, TrackerError};
use std::fmt::Write as _;
use std::io::Write as _;
use zip::write::{FileOptions, ZipWriter};

const CLASSIFICATIONS: [PublisherClassification; 3] = [
    PublisherClassification::ForProfit,
    PublisherClassification::NonProfit,
    PublisherClassification::Unknown,
];

pub fn fmt_usd(cents: u64) -> String {
    format!("${}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn fmt_plain(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

pub fn render_text(analysis: &AnalysisReport) -> String {
    let summary = &analysis.summary;
    let mut out = String::new();

    writeln!(out, "Publication cost report").unwrap();
    writeln!(
        out,
        "Author: {} ({})",
        analysis.author.display_name,
        analysis
            .author
            .affiliation
            .as_deref()
            .unwrap_or("Unknown affiliation")
    )
    .unwrap();
    writeln!(
        out,
        "Analyzed {} of {} fetched records ({} preprints excluded)",
        summary.analyzed_count(),
        analysis.fetched_count,
        analysis.skipped_preprints
    )
    .unwrap();
    writeln!(
        out,
        "For-profit publishers: {} ({:.1}%)",
        summary.for_profit_count(),
        summary.for_profit_share()
    )
    .unwrap();
    writeln!(
        out,
        "Total estimated cost: {}",
        fmt_usd(summary.total_estimated_cents)
    )
    .unwrap();

    writeln!(out).unwrap();
    writeln!(out, "Breakdown by classification:").unwrap();
    for classification in CLASSIFICATIONS {
        let tally = summary.tally(classification);
        writeln!(
            out,
            "  {:<11} {:>4} publications  {:>14}",
            classification,
            tally.count,
            fmt_usd(tally.subtotal_cents)
        )
        .unwrap();
    }

    if !summary.unknown_items.is_empty() {
        writeln!(out).unwrap();
        writeln!(
            out,
            "Items without a cost estimate ({}):",
            summary.unknown_items.len()
        )
        .unwrap();
        for item in &summary.unknown_items {
            writeln!(
                out,
                "  - {} [{}]: cost not estimated",
                item.record.title.as_deref().unwrap_or("Untitled"),
                item.record.venue_name
            )
            .unwrap();
        }
    }

    out
}

pub fn summary_csv(analysis: &AnalysisReport) -> Result<Vec<u8>> {
    let summary = &analysis.summary;
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(["metric", "value"])?;
    wtr.write_record(["author", analysis.author.display_name.as_str()])?;
    wtr.write_record([
        "affiliation",
        analysis
            .author
            .affiliation
            .as_deref()
            .unwrap_or("Unknown affiliation"),
    ])?;
    wtr.write_record([
        "analyzed_publications",
        summary.analyzed_count().to_string().as_str(),
    ])?;
    wtr.write_record([
        "skipped_preprints",
        analysis.skipped_preprints.to_string().as_str(),
    ])?;
    wtr.write_record([
        "for_profit_publications",
        summary.for_profit_count().to_string().as_str(),
    ])?;
    wtr.write_record([
        "for_profit_percentage",
        format!("{:.1}", summary.for_profit_share()).as_str(),
    ])?;
    for classification in CLASSIFICATIONS {
        let tally = summary.tally(classification);
        wtr.write_record([
            format!("{}_subtotal_usd", classification.to_string().replace('-', "_")).as_str(),
            fmt_plain(tally.subtotal_cents).as_str(),
        ])?;
    }
    wtr.write_record([
        "total_estimated_cost_usd",
        fmt_plain(summary.total_estimated_cents).as_str(),
    ])?;

    finish_csv(wtr)
}

pub fn publications_csv(analysis: &AnalysisReport) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record([
        "title",
        "venue",
        "year",
        "open_access",
        "classification",
        "confidence",
        "estimated_cost_usd",
    ])?;
    for item in &analysis.summary.items {
        wtr.write_record([
            item.record.title.as_deref().unwrap_or("Untitled"),
            item.record.venue_name.as_str(),
            item.record
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_default()
                .as_str(),
            if item.record.is_open_access { "yes" } else { "no" },
            item.classification.to_string().as_str(),
            item.confidence.to_string().as_str(),
            fmt_plain(item.estimated_cost_cents).as_str(),
        ])?;
    }

    finish_csv(wtr)
}

/// Bundles summary.csv, publications.csv and summary.json into one zip.
pub fn export_bundle(analysis: &AnalysisReport) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("summary.csv", FileOptions::default())?;
    zip.write_all(&summary_csv(analysis)?)?;

    zip.start_file::<_, ()>("publications.csv", FileOptions::default())?;
    zip.write_all(&publications_csv(analysis)?)?;

    zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
    let json_data = serde_json::to_string_pretty(analysis)?;
    zip.write_all(json_data.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn finish_csv(mut wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| TrackerError::IoError(std::io::Error::other(e.to_string())))
}
