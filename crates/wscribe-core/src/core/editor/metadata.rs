use serde::{Deserialize, Serialize};

use crate::core::Millis;

/// A displayed value with its short alias
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry<T> {
    pub alias: String,
    pub value: T,
}

impl<T> MetadataEntry<T> {
    fn new(alias: &str, value: T) -> Self {
        Self {
            alias: alias.to_string(),
            value,
        }
    }
}

/// Playback state supplied by whoever owns the media
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaInfo {
    pub file_name: String,
    pub total_duration: Millis,
    pub current_position: Millis,
    pub playback_speed: f64,
}

/// Status-bar record for one editing session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    pub media_file_name: MetadataEntry<String>,
    pub transcript_file_name: MetadataEntry<String>,
    pub media_total_duration: MetadataEntry<String>,
    pub transcript_last_timestamp: MetadataEntry<String>,
    pub media_current_timestamp: MetadataEntry<String>,
    pub media_current_playback_speed: MetadataEntry<String>,
    pub total_segments: MetadataEntry<usize>,
}

impl SessionMetadata {
    pub fn new(
        media_file_name: &str,
        transcript_file_name: &str,
        media_total_duration: String,
        transcript_last_timestamp: String,
        media_current_timestamp: String,
        media_current_playback_speed: String,
        total_segments: usize,
    ) -> Self {
        Self {
            media_file_name: MetadataEntry::new("MED", media_file_name.to_string()),
            transcript_file_name: MetadataEntry::new("TRA", transcript_file_name.to_string()),
            media_total_duration: MetadataEntry::new("EOM", media_total_duration),
            transcript_last_timestamp: MetadataEntry::new("EOT", transcript_last_timestamp),
            media_current_timestamp: MetadataEntry::new("CUR", media_current_timestamp),
            media_current_playback_speed: MetadataEntry::new("SPD", media_current_playback_speed),
            total_segments: MetadataEntry::new("SEG", total_segments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_shape() {
        let metadata = SessionMetadata::new(
            "talk.mp3",
            "talk.json",
            "00:10:00.000".to_string(),
            "00:09:58.000".to_string(),
            "00:00:00.000".to_string(),
            "1x".to_string(),
            42,
        );
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["mediaFileName"]["alias"], "MED");
        assert_eq!(json["mediaFileName"]["value"], "talk.mp3");
        assert_eq!(json["transcriptLastTimestamp"]["alias"], "EOT");
        assert_eq!(json["mediaCurrentPlaybackSpeed"]["alias"], "SPD");
        assert_eq!(json["totalSegments"]["alias"], "SEG");
        assert_eq!(json["totalSegments"]["value"], 42);
    }
}
