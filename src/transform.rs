use std::path::PathBuf;

use chrono::DateTime;

use crate::cli::TransformArgs;
use crate::duration;
use crate::error::Error;
use crate::records::{TransformedRecord, VideoRecord};

pub fn run(args: TransformArgs) -> Result<(), Error> {
    let input_path = PathBuf::from(&args.input);
    let out_path = PathBuf::from(&args.out);

    tracing::info!(input = %input_path.display(), "transform: reading raw records");
    let raw: Vec<VideoRecord> = crate::store::read_csv(&input_path)?;

    // One timestamp for the whole file, stamped once per run.
    let transformed_at = chrono::Utc::now().to_rfc3339();
    let rows: Vec<TransformedRecord> = raw
        .into_iter()
        .map(|record| transform_record(record, &transformed_at))
        .collect();

    crate::store::write_csv(&out_path, &rows)?;
    tracing::info!(rows = rows.len(), out = %out_path.display(), "transform: wrote cleaned records");

    Ok(())
}

/// Clean a single record. Every conversion here is best-effort: a value
/// that does not parse becomes null and the rest of the row is untouched.
fn transform_record(record: VideoRecord, transformed_at: &str) -> TransformedRecord {
    let video_id = record.video_id;

    let view_count = coerce_numeric("viewCount", &video_id, record.view_count);
    let like_count = coerce_numeric("likeCount", &video_id, record.like_count);
    let comment_count = coerce_numeric("commentCount", &video_id, record.comment_count);
    // favouriteCount is dropped here: the platform never populates it.

    let (published_at, day_of_week) = parse_published_at(&video_id, record.published_at);

    let duration = record.duration.and_then(|raw| {
        let parsed = duration::parse_seconds(&raw);
        if parsed.is_none() && !raw.is_empty() {
            tracing::warn!(video_id = %video_id, value = %raw, "transform: duration is not ISO 8601, coercing to null");
        }
        parsed
    });

    TransformedRecord {
        channel_title: record.channel_title,
        title: record.title,
        description: record.description.unwrap_or_default(),
        tags: record.tags.unwrap_or_default(),
        published_at,
        view_count,
        like_count,
        comment_count,
        duration,
        definition: record.definition,
        caption: record.caption,
        data_collected_at: record.data_collected_at,
        day_of_week,
        transformed_at: transformed_at.to_owned(),
        video_id,
    }
}

fn coerce_numeric(column: &str, video_id: &str, value: Option<String>) -> Option<u64> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u64>() {
        Ok(number) => Some(number),
        Err(_) => {
            tracing::warn!(column = column, video_id = %video_id, value = %raw, "transform: value is not numeric, coercing to null");
            None
        }
    }
}

/// Parse the publish timestamp and derive the weekday name from it. An
/// unparsable value keeps its raw string (the column is enrichment, not
/// something worth aborting over) and yields no weekday.
fn parse_published_at(
    video_id: &str,
    published_at: Option<String>,
) -> (Option<String>, Option<String>) {
    let Some(raw) = published_at else {
        return (None, None);
    };

    match DateTime::parse_from_rfc3339(&raw) {
        Ok(timestamp) => (
            Some(timestamp.to_rfc3339()),
            Some(timestamp.format("%A").to_string()),
        ),
        Err(err) => {
            tracing::warn!(video_id = %video_id, value = %raw, error = %err, "transform: publishedAt is not a timestamp, keeping raw value");
            (Some(raw), None)
        }
    }
}
