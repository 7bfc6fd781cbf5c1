use serde::Deserialize;

/// One record from `GET /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct LrclibRecord {
    pub id: i64,
    #[serde(rename = "trackName", default)]
    pub track_name: String,
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(rename = "albumName")]
    pub album_name: Option<String>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub instrumental: bool,
    #[serde(rename = "plainLyrics")]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
}

impl LrclibRecord {
    /// Plain lyrics text. Falls back to synced lyrics with the `[mm:ss.xx]`
    /// stamps removed when the plain variant is missing.
    pub fn lyrics_text(&self) -> Option<String> {
        if self.instrumental {
            return None;
        }
        if let Some(plain) = self.plain_lyrics.as_deref().filter(|p| !p.trim().is_empty()) {
            return Some(plain.trim().to_string());
        }
        let synced = self.synced_lyrics.as_deref()?;
        let text = synced
            .lines()
            .map(strip_timestamps)
            .collect::<Vec<_>>()
            .join("\n");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Drop leading `[..]` tags from one LRC line.
fn strip_timestamps(line: &str) -> &str {
    let mut rest = line.trim_start();
    while rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => rest = rest[end + 1..].trim_start(),
            None => break,
        }
    }
    rest.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(plain: Option<&str>, synced: Option<&str>) -> LrclibRecord {
        LrclibRecord {
            id: 1,
            track_name: "Amazing Grace".to_string(),
            artist_name: "John Newton".to_string(),
            album_name: None,
            duration: None,
            instrumental: false,
            plain_lyrics: plain.map(String::from),
            synced_lyrics: synced.map(String::from),
        }
    }

    #[test]
    fn prefers_plain_lyrics() {
        let r = record(Some("Amazing grace\nHow sweet the sound\n"), Some("[00:01.00]ignored"));
        assert_eq!(r.lyrics_text().as_deref(), Some("Amazing grace\nHow sweet the sound"));
    }

    #[test]
    fn strips_synced_timestamps() {
        let r = record(
            Some("   "),
            Some("[00:01.00] Amazing grace\n[00:04.50][00:30.00] How sweet the sound\n\n[00:09.10]"),
        );
        assert_eq!(
            r.lyrics_text().as_deref(),
            Some("Amazing grace\nHow sweet the sound")
        );
    }

    #[test]
    fn instrumental_has_no_text() {
        let mut r = record(Some("la la la"), None);
        r.instrumental = true;
        assert_eq!(r.lyrics_text(), None);
    }

    #[test]
    fn parses_search_payload() {
        let json = r#"[{
            "id": 42,
            "trackName": "Amazing Grace",
            "artistName": "Chris Tomlin",
            "albumName": null,
            "duration": 241.0,
            "instrumental": false,
            "plainLyrics": "Amazing grace",
            "syncedLyrics": null
        }]"#;
        let records: Vec<LrclibRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].artist_name, "Chris Tomlin");
        assert_eq!(records[0].lyrics_text().as_deref(), Some("Amazing grace"));
    }
}
