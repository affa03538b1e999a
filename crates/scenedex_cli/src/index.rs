//! `scenedex index`: build and commit the reference index.
//!
//! Indexes every discovered file, then prints the combined totals (text) or
//! the per-file summaries together with the combined index (JSON).

use scenedex_index::CacheIndex;
use serde::Serialize;

use crate::pipeline::{index_sources, FileSummary};
use crate::{GlobalArgs, IndexArgs, OutputFormat};

#[derive(Serialize)]
struct IndexReport<'a> {
    files: &'a [FileSummary],
    index: &'a CacheIndex,
}

/// Runs the `scenedex index` command.
pub fn run(args: &IndexArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (cache, summaries) = index_sources(&args.source, global)?;
    let combined = cache.global().combined();

    match args.format {
        OutputFormat::Text => {
            println!("{}", totals_line(summaries.len(), combined));
        }
        OutputFormat::Json => {
            let report = IndexReport {
                files: &summaries,
                index: combined,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(0)
}

fn totals_line(files: usize, index: &CacheIndex) -> String {
    format!(
        "{files} file(s): {} anchor(s), {} guid(s), {} reference(s)",
        index.anchor_count(),
        index.guid_count(),
        index.reference_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenedex_common::Anchor;

    #[test]
    fn totals_line_counts() {
        let mut index = CacheIndex::new();
        index.increment_anchor(Anchor::new(4));
        index.increment_anchor(Anchor::new(4));
        index.increment_guid("f70555f144d8491a825f0804e09c671c");
        assert_eq!(
            totals_line(2, &index),
            "2 file(s): 1 anchor(s), 1 guid(s), 3 reference(s)"
        );
    }

    #[test]
    fn report_serializes_files_and_index() {
        let mut index = CacheIndex::new();
        index.increment_anchor(Anchor::new(4));
        let files = vec![FileSummary {
            path: "Main.unity".into(),
            documents: 1,
            references: 1,
            passes: 1,
        }];
        let report = IndexReport {
            files: &files,
            index: &index,
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["path"], "Main.unity");
        assert_eq!(json["files"][0]["documents"], 1);
        assert!(json["index"].is_object());
    }
}
