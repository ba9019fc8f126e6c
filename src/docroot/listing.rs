use std::fmt::Write as _;

use html_escape::encode_text;

use crate::docroot::resolver::{DirEntry, EntryKind};
use crate::http::percent;

/// Rows rendered per refill of the response buffer.
pub const LISTING_BATCH: usize = 16;

/// Capacity of an encoded link, terminator slot included.
const LINK_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Head,
    Rows,
    Done,
}

/// Streams a directory as an HTML table, a batch of rows at a time.
#[derive(Debug)]
pub struct DirectoryListing {
    title: String,
    entries: std::vec::IntoIter<DirEntry>,
    stage: Stage,
}

impl DirectoryListing {
    pub fn new(title: impl Into<String>, entries: Vec<DirEntry>) -> Self {
        Self {
            title: title.into(),
            entries: entries.into_iter(),
            stage: Stage::Head,
        }
    }

    /// Appends the next chunk of HTML to `buf`. Returns `false` once the
    /// whole page has been produced.
    pub fn fill(&mut self, buf: &mut Vec<u8>) -> bool {
        match self.stage {
            Stage::Head => {
                let title = encode_text(&self.title);
                buf.extend_from_slice(
                    format!(
                        "<html><head><title>Index of {title}</title></head>\n\
                         <body><h1>Index of {title}</h1>\n<table>\n"
                    )
                    .as_bytes(),
                );
                self.stage = Stage::Rows;
                true
            }
            Stage::Rows => {
                let mut html = String::new();
                for entry in self.entries.by_ref().take(LISTING_BATCH) {
                    render_row(&mut html, &entry);
                }

                if html.is_empty() {
                    buf.extend_from_slice(b"</table>\n</body>\n</html>\n");
                    self.stage = Stage::Done;
                } else {
                    tracing::trace!(bytes = html.len(), "listing batch rendered");
                    buf.extend_from_slice(html.as_bytes());
                }
                true
            }
            Stage::Done => false,
        }
    }
}

fn render_row(html: &mut String, entry: &DirEntry) {
    let raw = entry.name.as_encoded_bytes();
    let href = percent::encode_bounded(raw, LINK_CAPACITY);
    let label = String::from_utf8_lossy(raw);
    let label = encode_text(&label);
    let slash = match entry.kind {
        EntryKind::Directory => "/",
        EntryKind::File => "",
    };

    // writing into a String cannot fail
    let _ = writeln!(
        html,
        "<tr><td><a href=\"{href}{slash}\">{label}{slash}</a></td><td>{}</td></tr>",
        entry.size
    );
}
