//! CSV export of a track table

use crate::generator::{TrackRecord, Variant};
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, tracks: &[TrackRecord], variant: Variant) -> io::Result<()> {
    writeln!(
        writer,
        "track_id,track_name,artist,genre,popularity,{},{},duration_ms,danceability,energy,valence,acousticness,instrumentalness,speechiness,tempo,loudness",
        variant.volume_label(),
        variant.window_label()
    )?;

    for t in tracks {
        let f = &t.features;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.2}",
            t.track_id,
            escape(&t.track_name),
            escape(&t.artist),
            escape(t.genre.name()),
            t.popularity,
            t.volume,
            t.window.format("%Y-%m-%d"),
            t.duration_ms,
            f.danceability,
            f.energy,
            f.valence,
            f.acousticness,
            f.instrumentalness,
            f.speechiness,
            f.tempo,
            f.loudness
        )?;
    }

    Ok(())
}

/// Quote a field when it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Generator, Variant};

    #[test]
    fn test_header_uses_variant_labels() {
        let mut buf = Vec::new();
        write(&mut buf, &[], Variant::Library).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("track_id,track_name,artist,genre,popularity,play_count,release_date,"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_rows() {
        let ds = Generator::new().with_seed(Some(12)).generate(Variant::Charts).unwrap();
        let mut buf = Vec::new();
        write(&mut buf, &ds.tracks, ds.variant).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ds.len() + 1);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[1].contains(",Taylor Swift,Pop,"));
        assert!(lines[1].contains(",2024-12-01,"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
