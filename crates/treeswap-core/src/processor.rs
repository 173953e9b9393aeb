use std::fs;
use std::path::Path;

use tracing::debug;

use crate::binary::decode_text;
use crate::events::{EntryKind, WalkEvent};
use crate::stats::{MatchLocation, MatchStats};
use crate::walker::WalkContext;
use crate::{Result, SweepError};

pub(crate) fn process_file(
    context: &mut WalkContext<'_>,
    file: &Path,
    depth: usize,
    stats: &mut MatchStats,
) -> Result<()> {
    context.sink.emit(&WalkEvent::FileDiscovered { path: file });
    context.pace(file, depth)?;

    // Extension counters follow the name the file was found under.
    stats.record_file_seen(file);

    let path = context.rename_matched(file, EntryKind::File, stats)?;

    let bytes = fs::read(&path).map_err(|source| SweepError::Io {
        path: path.clone(),
        source,
    })?;
    let content = match decode_text(&bytes, context.config.binary) {
        Ok(content) => content,
        Err(reason) => {
            context.sink.emit(&WalkEvent::BinarySkipped { path: &path, reason });
            return Ok(());
        }
    };

    let replacement = context.replacer.apply(&content);
    for (pattern, count) in &replacement.counts {
        stats.record_matches(MatchLocation::Content, pattern, *count);
        context.sink.emit(&WalkEvent::PatternMatched {
            pattern,
            location: MatchLocation::Content,
            count: *count,
        });
    }

    let total_matches = replacement.total_matches();
    if total_matches == 0 {
        return Ok(());
    }

    stats.record_file_modified(file);

    if !context.config.dry_run {
        debug!("Writing {:?}", path);
        fs::write(&path, &replacement.text).map_err(|source| SweepError::Io {
            path: path.clone(),
            source,
        })?;
    }

    context.sink.emit(&WalkEvent::ContentReplaced {
        path: &path,
        total_matches,
        original: &content,
        replaced: &replacement.text,
        dry_run: context.config.dry_run,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FindReplacePairs, ReplaceConfig};
    use crate::binary::BinaryReason;
    use crate::events::RecordedEvent;
    use crate::renamer::FsRenamer;
    use crate::replacer::PatternReplacer;
    use tempfile::TempDir;

    fn context<'a>(
        config: &'a ReplaceConfig,
        events: &'a mut Vec<RecordedEvent>,
    ) -> WalkContext<'a> {
        WalkContext {
            config,
            replacer: PatternReplacer::new(&config.pairs).unwrap(),
            renamer: Box::new(FsRenamer),
            sink: Box::new(events),
            pacer: None,
        }
    }

    fn config(values: &[&str]) -> ReplaceConfig {
        ReplaceConfig::new(FindReplacePairs::from_flat(values).unwrap())
    }

    #[test]
    fn test_rename_and_rewrite() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Foo.txt");
        fs::write(&file, "Foo bar Foo").unwrap();
        let config = config(&["Foo", "Bar"]);
        let mut events = Vec::new();
        let mut stats = MatchStats::new();

        process_file(&mut context(&config, &mut events), &file, 0, &mut stats).unwrap();

        let renamed = temp.path().join("Bar.txt");
        assert!(!file.exists());
        assert_eq!(fs::read_to_string(&renamed).unwrap(), "Bar bar Bar");
        assert_eq!(stats.file_name_matches.get("Foo"), Some(&1));
        assert_eq!(stats.content_matches.get("Foo"), Some(&2));
        assert_eq!(stats.files_seen.get(".txt"), Some(&1));
        assert_eq!(stats.files_modified.get(".txt"), Some(&1));
        assert!(events.contains(&RecordedEvent::ContentReplaced {
            path: renamed,
            total_matches: 2
        }));
    }

    #[test]
    fn test_binary_content_skipped() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Foo.bin");
        fs::write(&file, b"\x01\x02Foo").unwrap();
        let config = config(&["Foo", "Bar"]);
        let mut events = Vec::new();
        let mut stats = MatchStats::new();

        process_file(&mut context(&config, &mut events), &file, 0, &mut stats).unwrap();

        let renamed = temp.path().join("Bar.bin");
        assert_eq!(fs::read(&renamed).unwrap(), b"\x01\x02Foo");
        assert!(stats.content_matches.is_empty());
        assert!(stats.files_modified.is_empty());
        assert_eq!(stats.files_seen.get(".bin"), Some(&1));
        assert!(events.contains(&RecordedEvent::BinarySkipped {
            path: renamed,
            reason: BinaryReason::ControlCharacters
        }));
    }

    #[test]
    fn test_binary_content_allowed() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.bin");
        fs::write(&file, b"\x01\x02Foo").unwrap();
        let mut config = config(&["Foo", "Bar"]);
        config.binary = true;
        let mut events = Vec::new();
        let mut stats = MatchStats::new();

        process_file(&mut context(&config, &mut events), &file, 0, &mut stats).unwrap();

        assert_eq!(fs::read(&file).unwrap(), b"\x01\x02Bar");
        assert_eq!(stats.content_matches.get("Foo"), Some(&1));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Foo.txt");
        fs::write(&file, "Foo").unwrap();
        let mut config = config(&["Foo", "Bar"]);
        config.dry_run = true;
        let mut events = Vec::new();
        let mut stats = MatchStats::new();

        process_file(&mut context(&config, &mut events), &file, 0, &mut stats).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "Foo");
        assert!(!temp.path().join("Bar.txt").exists());
        assert_eq!(stats.file_name_matches.get("Foo"), Some(&1));
        assert_eq!(stats.content_matches.get("Foo"), Some(&1));
        assert_eq!(stats.files_modified.get(".txt"), Some(&1));
    }

    #[test]
    fn test_latin1_content_skipped_with_reason() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("legacy.txt");
        fs::write(&file, b"Foo caf\xe9").unwrap();
        let config = config(&["Foo", "Bar"]);
        let mut events = Vec::new();
        let mut stats = MatchStats::new();

        process_file(&mut context(&config, &mut events), &file, 0, &mut stats).unwrap();

        assert_eq!(fs::read(&file).unwrap(), b"Foo caf\xe9");
        assert!(stats.content_matches.is_empty());
        assert!(events.contains(&RecordedEvent::BinarySkipped {
            path: file,
            reason: BinaryReason::InvalidUtf8
        }));
    }
}
