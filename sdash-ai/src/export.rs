//! Download formats for an analysis

use chrono::{DateTime, Utc};
use sdash_common::time::{to_file_stamp, to_iso_millis, to_local_display};
use sdash_common::{Error, Result, Sentiment, SentimentAnalysis};
use std::fmt::Write;

const CSV_HEADER: &str =
    "Text,Sentiment,Confidence,Positive Score,Negative Score,Neutral Score,Keywords,Timestamp";

/// Export kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    /// Plain-text report
    Report,
}

impl ExportFormat {
    /// Parse a format name; `pdf` is accepted for the report
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "report" | "pdf" | "txt" => Ok(ExportFormat::Report),
            other => Err(Error::InvalidInput(format!(
                "Unknown export format '{}'. Expected csv, json or report",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Report => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Report => "text/plain; charset=utf-8",
        }
    }

    /// `sentiment-analysis-<stamp>.<ext>`
    pub fn file_name(&self, at: &DateTime<Utc>) -> String {
        format!("sentiment-analysis-{}.{}", to_file_stamp(at), self.extension())
    }

    pub fn render(&self, analysis: &SentimentAnalysis, at: &DateTime<Utc>) -> Result<String> {
        match self {
            ExportFormat::Csv => Ok(to_csv(analysis)),
            ExportFormat::Json => to_json(analysis),
            ExportFormat::Report => Ok(to_report(analysis, at)),
        }
    }
}

/// One row per result; text and keywords quoted, numbers to three decimals
pub fn to_csv(analysis: &SentimentAnalysis) -> String {
    let mut lines = Vec::with_capacity(analysis.results.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for result in &analysis.results {
        lines.push(format!(
            "\"{}\",{},{:.3},{:.3},{:.3},{:.3},\"{}\",{}",
            result.text.replace('"', "\"\""),
            result.sentiment,
            result.confidence,
            result.scores.positive,
            result.scores.negative,
            result.scores.neutral,
            result.keywords.join(", "),
            to_iso_millis(&result.timestamp)
        ));
    }
    lines.join("\n")
}

pub fn to_json(analysis: &SentimentAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Human-readable report: header block, distribution, per-text details
pub fn to_report(analysis: &SentimentAnalysis, at: &DateTime<Utc>) -> String {
    let summary = &analysis.summary;
    let distribution = &summary.sentiment_distribution;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "SENTIMENT ANALYSIS REPORT");
    let _ = writeln!(out, "========================\n");
    let _ = writeln!(out, "Analysis Date: {}", to_local_display(at));
    let _ = writeln!(out, "Total Texts Analyzed: {}", summary.total_texts);
    let _ = writeln!(
        out,
        "Average Confidence: {:.1}%\n",
        summary.average_confidence * 100.0
    );

    let _ = writeln!(out, "SENTIMENT DISTRIBUTION:");
    let _ = writeln!(out, "-----------------------");
    for (label, sentiment) in [
        ("Positive", Sentiment::Positive),
        ("Negative", Sentiment::Negative),
        ("Neutral", Sentiment::Neutral),
    ] {
        let _ = writeln!(
            out,
            "{}: {} ({:.1}%)",
            label,
            distribution.count(sentiment),
            summary.percentage(sentiment)
        );
    }

    let _ = writeln!(out, "\nDETAILED RESULTS:");
    let _ = writeln!(out, "-----------------");
    for (index, result) in analysis.results.iter().enumerate() {
        let _ = writeln!(out, "\n{}. Text: \"{}\"", index + 1, result.text);
        let _ = writeln!(
            out,
            "   Sentiment: {} ({:.1}% confidence)",
            result.sentiment,
            result.confidence * 100.0
        );
        let _ = writeln!(out, "   Keywords: {}", result.keywords.join(", "));
        let _ = writeln!(out, "   Explanation: {}", result.explanation);
    }
    out
}
