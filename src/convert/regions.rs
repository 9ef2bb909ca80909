use crate::config::CompiledLanguage;
use crate::types::{Region, RegionKind};

/// Cut `text` into alternating prose and code regions.
///
/// Scanning starts in code. An `open` line switches code to prose and a `close` line
/// switches prose back to code; a delimiter that would not change the state stays in the
/// text verbatim. Blank lines around every delimiter are dropped with it, empty regions
/// vanish, and neighbours of the same kind left behind are merged. A text with nothing in
/// it yields a single empty code region.
///
/// Prose is taken as Markdown and copied untouched, fences written in it included; only
/// the fences around code regions are generated here.
pub fn split_regions(text: &str, language: &CompiledLanguage, line_ending: &str) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    let mut state = RegionKind::Code;
    let mut start = 0;

    for found in language.delimiter().find_iter(text) {
        let token = found.as_str().trim_end_matches('\r');
        let next = match state {
            RegionKind::Code if token == language.open() => RegionKind::Prose,
            RegionKind::Prose if token == language.close() => RegionKind::Code,
            _ => continue,
        };
        push_region(&mut regions, state, &text[start..found.start()], line_ending);
        start = found.end();
        state = next;
    }
    push_region(&mut regions, state, &text[start..], line_ending);

    if regions.is_empty() {
        regions.push(Region {
            kind: RegionKind::Code,
            text: String::new(),
        });
    }
    regions
}

fn push_region(regions: &mut Vec<Region>, kind: RegionKind, body: &str, line_ending: &str) {
    let body = body.trim_matches(|c: char| c == '\r' || c == '\n');
    if body.trim().is_empty() {
        return;
    }

    match regions.last_mut() {
        Some(last) if last.kind == kind => {
            last.text.push_str(line_ending);
            if kind == RegionKind::Prose {
                last.text.push_str(line_ending);
            }
            last.text.push_str(body);
        }
        _ => regions.push(Region {
            kind,
            text: body.to_string(),
        }),
    }
}
