use std::path::PathBuf;

use crate::cli::ExtractArgs;
use crate::error::Error;
use crate::records::VideoRecord;
use crate::youtube::{self, VideoItem, YouTubeClient};

pub async fn run(args: ExtractArgs) -> Result<(), Error> {
    let out_path = PathBuf::from(&args.out);
    let client = YouTubeClient::from_env(&args.api_base_url)?;

    let playlist_id = youtube::uploads_playlist_id(&args.channel_id);
    tracing::info!(channel_id = %args.channel_id, playlist_id = %playlist_id, "extract: listing uploads");

    let video_ids = client.list_upload_video_ids(&playlist_id).await?;
    if video_ids.is_empty() {
        return Err(Error::EmptyResult(format!(
            "no videos found for channel {}",
            args.channel_id
        )));
    }
    tracing::info!(videos = video_ids.len(), "extract: collected video ids");

    let mut records = Vec::with_capacity(video_ids.len());
    let mut failed_batches = 0_usize;

    for batch in video_ids.chunks(youtube::PAGE_SIZE) {
        match client.fetch_video_details(batch).await {
            Ok(items) => {
                let collected_at = chrono::Utc::now().to_rfc3339();
                for item in items {
                    records.push(video_record(item, &collected_at));
                }
            }
            // A bad batch costs at most 50 records; the rest of the run is
            // still worth keeping.
            Err(err) => {
                failed_batches += 1;
                tracing::error!(error = %err, batch_size = batch.len(), "extract: batch failed, skipping");
            }
        }
    }

    if records.is_empty() {
        return Err(Error::EmptyResult(format!(
            "no video data could be collected for channel {} ({failed_batches} failed batches)",
            args.channel_id
        )));
    }

    crate::store::write_csv(&out_path, &records)?;
    tracing::info!(
        records = records.len(),
        failed_batches = failed_batches,
        out = %out_path.display(),
        "extract: wrote video records"
    );

    Ok(())
}

/// Flatten one API item into a record, keeping the fixed allow-list of
/// fields and nulling anything the response omitted.
fn video_record(item: VideoItem, collected_at: &str) -> VideoRecord {
    let snippet = item.snippet;
    let statistics = item.statistics;
    let content_details = item.content_details;

    let (channel_title, title, description, tags, published_at) = match snippet {
        Some(snippet) => (
            snippet.channel_title,
            snippet.title,
            snippet.description,
            snippet.tags.as_deref().map(encode_tags),
            snippet.published_at,
        ),
        None => (None, None, None, None, None),
    };

    let (view_count, like_count, favourite_count, comment_count) = match statistics {
        Some(stats) => (
            stats.view_count,
            stats.like_count,
            stats.favourite_count,
            stats.comment_count,
        ),
        None => (None, None, None, None),
    };

    let (duration, definition, caption) = match content_details {
        Some(details) => (details.duration, details.definition, details.caption),
        None => (None, None, None),
    };

    VideoRecord {
        video_id: item.id,
        channel_title,
        title,
        description,
        tags,
        published_at,
        view_count,
        like_count,
        favourite_count,
        comment_count,
        duration,
        definition,
        caption,
        data_collected_at: collected_at.to_owned(),
    }
}

fn encode_tags(tags: &[String]) -> String {
    // Tag lists ride in one CSV cell; JSON keeps them lossless.
    serde_json::to_string(tags).unwrap_or_default()
}
