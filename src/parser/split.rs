//! Splitting Markdown source into line-oriented blocks.

const FENCE: &str = "```";

/// Split Markdown into blocks: one per line, except that a fenced code block
/// (from a line containing a fence to the next line containing one) is kept
/// together as a single `\n`-joined block.
///
/// An unmatched fence is left as an ordinary line.
pub fn split_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut lines = markdown.split('\n').peekable();

    while let Some(line) = lines.next() {
        if !line.contains(FENCE) {
            blocks.push(line.to_string());
            continue;
        }

        let mut fenced = vec![line];
        let mut closed = false;
        while let Some(next) = lines.peek() {
            if next.contains(FENCE) {
                fenced.extend(lines.next());
                closed = true;
                break;
            }
            fenced.extend(lines.next());
        }

        if closed {
            blocks.push(fenced.join("\n"));
        } else {
            blocks.extend(fenced.into_iter().map(str::to_string));
        }
    }

    blocks
}
