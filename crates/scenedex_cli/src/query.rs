//! `scenedex query`: look up usages and component lists.
//!
//! Indexes the given paths like `scenedex index`, then answers each
//! `--anchor`, `--guid` and `--components` lookup against the combined index
//! in the order given.

use scenedex_common::Anchor;
use scenedex_index::GlobalIndex;
use serde::Serialize;

use crate::pipeline::index_sources;
use crate::{GlobalArgs, OutputFormat, QueryArgs};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AnchorUsage {
    anchor: Anchor,
    usages: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct GuidUsage {
    guid: String,
    usages: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AttachedComponents {
    anchor: Anchor,
    components: Vec<Anchor>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
struct QueryReport {
    anchors: Vec<AnchorUsage>,
    guids: Vec<GuidUsage>,
    components: Vec<AttachedComponents>,
}

/// Runs the `scenedex query` command.
pub fn run(args: &QueryArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (cache, _) = index_sources(&args.source, global)?;
    let report = answer(args, cache.global());

    match args.format {
        OutputFormat::Text => {
            for line in render_text(&report) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(0)
}

fn answer(args: &QueryArgs, index: &GlobalIndex) -> QueryReport {
    QueryReport {
        anchors: args
            .anchor
            .iter()
            .map(|&anchor| AnchorUsage {
                anchor,
                usages: index.anchor_usages(anchor),
            })
            .collect(),
        guids: args
            .guid
            .iter()
            .map(|guid| GuidUsage {
                guid: guid.clone(),
                usages: index.guid_usages(guid),
            })
            .collect(),
        components: args
            .components
            .iter()
            .map(|&anchor| AttachedComponents {
                anchor,
                components: index.components_of(anchor).to_vec(),
            })
            .collect(),
    }
}

fn render_text(report: &QueryReport) -> Vec<String> {
    let mut lines = Vec::new();
    for usage in &report.anchors {
        lines.push(format!("anchor {}: {} usage(s)", usage.anchor, usage.usages));
    }
    for usage in &report.guids {
        lines.push(format!("guid {}: {} usage(s)", usage.guid, usage.usages));
    }
    for attached in &report.components {
        let components: Vec<String> = attached.components.iter().map(Anchor::to_string).collect();
        lines.push(format!(
            "components of {}: [{}]",
            attached.anchor,
            components.join(", ")
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceArgs;
    use scenedex_index::CacheIndex;

    fn query_args() -> QueryArgs {
        QueryArgs {
            source: SourceArgs {
                paths: Vec::new(),
                batch_size: None,
                interrupt_every: None,
            },
            anchor: vec![Anchor::new(7), Anchor::new(99)],
            guid: vec!["abc".to_string()],
            components: vec![Anchor::new(7)],
            format: OutputFormat::Text,
        }
    }

    fn global_index() -> GlobalIndex {
        let mut index = CacheIndex::new();
        index.increment_anchor(Anchor::new(7));
        index.increment_anchor(Anchor::new(7));
        index.increment_guid("abc");
        index.set_attached(Anchor::new(7), vec![Anchor::new(8), Anchor::new(9)]);
        let mut global = GlobalIndex::new();
        global.commit("Main.unity", index);
        global
    }

    #[test]
    fn answers_in_request_order() {
        let report = answer(&query_args(), &global_index());
        assert_eq!(
            report.anchors,
            vec![
                AnchorUsage {
                    anchor: Anchor::new(7),
                    usages: 2
                },
                AnchorUsage {
                    anchor: Anchor::new(99),
                    usages: 0
                },
            ]
        );
        assert_eq!(report.guids[0].usages, 1);
        assert_eq!(report.components[0].components, vec![Anchor::new(8), Anchor::new(9)]);
    }

    #[test]
    fn text_rendering() {
        let report = answer(&query_args(), &global_index());
        assert_eq!(
            render_text(&report),
            vec![
                "anchor 7: 2 usage(s)",
                "anchor 99: 0 usage(s)",
                "guid abc: 1 usage(s)",
                "components of 7: [8, 9]",
            ]
        );
    }

    #[test]
    fn empty_report_renders_nothing() {
        assert!(render_text(&QueryReport::default()).is_empty());
    }
}
