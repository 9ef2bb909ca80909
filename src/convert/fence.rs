use crate::types::{Region, RegionKind};

const MIN_FENCE_LEN: usize = 3;

/// Backtick fence long enough that nothing inside `code` can close it early.
pub fn fence_for(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(MIN_FENCE_LEN.max(longest + 1))
}

/// Render regions as Markdown: one blank line between regions, code wrapped in fences
/// tagged with `fence_tag`, and a single line ending at the end.
pub fn render_markdown(regions: &[Region], fence_tag: &str, line_ending: &str) -> String {
    let mut out = String::new();

    for (i, region) in regions.iter().enumerate() {
        if i > 0 {
            out.push_str(line_ending);
            out.push_str(line_ending);
        }
        match region.kind {
            RegionKind::Prose => out.push_str(&region.text),
            RegionKind::Code => {
                let fence = fence_for(&region.text);
                out.push_str(&fence);
                out.push_str(fence_tag);
                out.push_str(line_ending);
                if !region.text.is_empty() {
                    out.push_str(&region.text);
                    out.push_str(line_ending);
                }
                out.push_str(&fence);
            }
        }
    }

    out.push_str(line_ending);
    out
}
