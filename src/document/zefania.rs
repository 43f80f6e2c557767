//! Zefania XML bible documents.
//!
//! A Zefania file looks like:
//!
//! ```xml
//! <XMLBIBLE biblename="King James Version">
//!   <BIBLEBOOK bnumber="1" bname="Genesis" bsname="Gen">
//!     <CHAPTER cnumber="1">
//!       <VERS vnumber="1">In the beginning God created the heaven and the earth.</VERS>
//!     </CHAPTER>
//!   </BIBLEBOOK>
//! </XMLBIBLE>
//! ```
//!
//! `BIBLEBOOK` elements are found anywhere below the root, including inside
//! other books, and are listed in document order. `CHAPTER` elements must be
//! direct children of a book and `VERS` elements direct children of a
//! chapter. Verse text is every piece of text below the `VERS` element,
//! including text inside nested markup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use rayon::prelude::*;

use crate::config::ScriptureConfig;
use crate::corpus::{Book, Chapter, Translation, Verse};
use crate::document::normalize::{
    infer_book_id, infer_translation_id, normalize_whitespace, positive_number,
};
use crate::document::source::{CollisionPolicy, DocumentSource, LoadOutcome, assemble, discover_files};
use crate::error::{Result, ScriptureError};

const TRANSLATION_NAME_ATTR: &[u8] = b"biblename";
const BOOK_ELEMENT: &[u8] = b"BIBLEBOOK";
const CHAPTER_ELEMENT: &[u8] = b"CHAPTER";
const VERSE_ELEMENT: &[u8] = b"VERS";

/// Reads `*.xml` Zefania bibles from a directory.
#[derive(Debug, Clone)]
pub struct ZefaniaSource {
    extension: String,
    collision_policy: CollisionPolicy,
    parallel: bool,
}

impl Default for ZefaniaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ZefaniaSource {
    /// Create a source with default settings: `xml` files, last file wins on
    /// collisions, parsing on the rayon pool.
    pub fn new() -> Self {
        ZefaniaSource {
            extension: "xml".to_string(),
            collision_policy: CollisionPolicy::Overwrite,
            parallel: true,
        }
    }

    /// Create a source from the loader settings of a configuration.
    pub fn from_config(config: &ScriptureConfig) -> Self {
        ZefaniaSource {
            extension: config.extension.clone(),
            collision_policy: config.collision_policy,
            parallel: config.parallel_parse,
        }
    }

    /// Set the file extension (without the dot) to pick up.
    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the collision policy.
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Enable or disable parsing files in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse one file; the translation id comes from its file name.
    ///
    /// The bytes are decoded as the document's XML declaration (or byte order
    /// mark) says, UTF-8 when it says nothing.
    pub fn parse_file(&self, path: &Path) -> Result<Translation> {
        let bytes = fs::read(path)?;
        let translation_id = infer_translation_id(path);
        parse_bytes(&translation_id, &bytes, self.collision_policy)
    }
}

impl DocumentSource for ZefaniaSource {
    fn ingest(&self, directory: &Path) -> Result<LoadOutcome> {
        let started = Instant::now();
        let files = discover_files(directory, &self.extension)?;
        info!(
            "Loading {} .{} document(s) from {}",
            files.len(),
            self.extension,
            directory.display()
        );

        let parse = |path: PathBuf| {
            let result = self.parse_file(&path);
            (path, result)
        };
        let parsed: Vec<(PathBuf, Result<Translation>)> = if self.parallel {
            files.into_par_iter().map(parse).collect()
        } else {
            files.into_iter().map(parse).collect()
        };

        let mut outcome = assemble(parsed, self.collision_policy);
        outcome.report.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "Loaded {} translation(s), {} book(s), {} verse(s) in {} ms; {} file(s) skipped",
            outcome.report.translations,
            outcome.report.books,
            outcome.report.verses,
            outcome.report.duration_ms,
            outcome.report.skipped.len()
        );
        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "zefania"
    }
}

/// An element whose content is being collected.
enum Frame {
    Book {
        depth: usize,
        /// Position of the book in document order.
        order: usize,
        book: Book,
    },
    Chapter {
        depth: usize,
        number: Option<u32>,
        verses: Vec<Verse>,
    },
    Verse {
        depth: usize,
        number: Option<u32>,
        text: String,
    },
}

impl Frame {
    fn depth(&self) -> usize {
        match self {
            Frame::Book { depth, .. } | Frame::Chapter { depth, .. } | Frame::Verse { depth, .. } => {
                *depth
            }
        }
    }

    fn is_verse(&self) -> bool {
        matches!(self, Frame::Verse { .. })
    }
}

/// Parse a Zefania document held in memory as a string.
///
/// Chapters and verses with missing, malformed or non-positive numbers are
/// dropped, as are verses without text, chapters without verses and books
/// without chapters. A book id seen twice is resolved with `policy`.
pub fn parse_document(translation_id: &str, xml: &str, policy: CollisionPolicy) -> Result<Translation> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    read_translation(translation_id, Reader::from_str(xml), policy)
}

/// Parse a Zefania document from raw bytes in any encoding it declares.
pub fn parse_bytes(translation_id: &str, bytes: &[u8], policy: CollisionPolicy) -> Result<Translation> {
    read_translation(translation_id, Reader::from_reader(bytes), policy)
}

fn read_translation(
    translation_id: &str,
    mut reader: Reader<&[u8]>,
    policy: CollisionPolicy,
) -> Result<Translation> {
    let mut translation: Option<Translation> = None;
    let mut root_closed = false;
    let mut open_elements: usize = 0;
    let mut frames: Vec<Frame> = Vec::new();
    let mut finished: Vec<(usize, Book)> = Vec::new();
    let mut books_seen: usize = 0;

    loop {
        let event = reader.read_event().map_err(|e| {
            ScriptureError::xml(format!("at byte {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if root_closed {
                    return Err(junk_after_root(&reader));
                }
                let depth = open_elements;
                let is_empty = matches!(event, Event::Empty(_));
                let decoder = reader.decoder();

                if translation.is_none() {
                    let name = attribute(e, TRANSLATION_NAME_ATTR, decoder)?
                        .unwrap_or_else(|| translation_id.to_string());
                    translation = Some(Translation::new(translation_id, name));
                    root_closed = is_empty;
                } else if !is_empty {
                    // Empty books, chapters and verses carry no text and are
                    // dropped anyway.
                    let parent = frames.last();
                    let frame = match e.name().as_ref() {
                        BOOK_ELEMENT => {
                            let name = attribute(e, b"bname", decoder)?;
                            let id = infer_book_id(
                                attribute(e, b"osis", decoder)?.as_deref(),
                                attribute(e, b"bsname", decoder)?.as_deref(),
                                name.as_deref(),
                            );
                            let name = name.unwrap_or_else(|| id.clone());
                            books_seen += 1;
                            Some(Frame::Book {
                                depth,
                                order: books_seen,
                                book: Book::new(id, name),
                            })
                        }
                        CHAPTER_ELEMENT
                            if matches!(parent, Some(Frame::Book { depth: d, .. }) if d + 1 == depth) =>
                        {
                            Some(Frame::Chapter {
                                depth,
                                number: positive_number(attribute(e, b"cnumber", decoder)?.as_deref()),
                                verses: Vec::new(),
                            })
                        }
                        VERSE_ELEMENT
                            if matches!(parent, Some(Frame::Chapter { depth: d, .. }) if d + 1 == depth) =>
                        {
                            Some(Frame::Verse {
                                depth,
                                number: positive_number(attribute(e, b"vnumber", decoder)?.as_deref()),
                                text: String::new(),
                            })
                        }
                        _ => None,
                    };
                    frames.extend(frame);
                }

                if !is_empty {
                    open_elements += 1;
                }
            }
            Event::Text(e) => {
                if root_closed {
                    if !e.iter().all(u8::is_ascii_whitespace) {
                        return Err(junk_after_root(&reader));
                    }
                } else if frames.iter().any(Frame::is_verse) {
                    let text = e.unescape().map_err(|err| ScriptureError::xml(err.to_string()))?;
                    push_verse_text(&mut frames, &text);
                }
            }
            Event::CData(e) => {
                if root_closed {
                    return Err(junk_after_root(&reader));
                }
                if frames.iter().any(Frame::is_verse) {
                    let text = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|err| ScriptureError::xml(err.to_string()))?;
                    push_verse_text(&mut frames, &text);
                }
            }
            Event::End(_) => {
                open_elements = open_elements.saturating_sub(1);
                let depth = open_elements;
                if depth == 0 {
                    root_closed = true;
                }

                if frames.last().is_some_and(|f| f.depth() == depth) {
                    if let Some(done) = frames.pop() {
                        close_frame(done, frames.last_mut(), &mut finished);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open_elements > 0 {
        return Err(ScriptureError::xml("unexpected end of document"));
    }
    let mut translation = translation.ok_or_else(|| ScriptureError::document("no root element"))?;

    // Nested books close before the book around them; restore document order.
    finished.sort_by_key(|(order, _)| *order);
    for (_, book) in finished {
        add_book(&mut translation, book, policy)?;
    }

    debug!(
        "Parsed translation '{}' with {} book(s)",
        translation.id,
        translation.books.len()
    );
    Ok(translation)
}

fn junk_after_root(reader: &Reader<&[u8]>) -> ScriptureError {
    ScriptureError::xml(format!(
        "at byte {}: content after the root element",
        reader.buffer_position()
    ))
}

/// Every open verse collects text of all its descendants.
fn push_verse_text(frames: &mut [Frame], text: &str) {
    for frame in frames {
        if let Frame::Verse { text: collected, .. } = frame {
            collected.push_str(text);
        }
    }
}

/// Hand a finished element to the element it belongs to.
fn close_frame(done: Frame, parent: Option<&mut Frame>, finished: &mut Vec<(usize, Book)>) {
    match (done, parent) {
        (Frame::Verse { number, text, .. }, Some(Frame::Chapter { verses, .. })) => {
            let text = normalize_whitespace(&text);
            if let Some(number) = number.filter(|_| !text.is_empty()) {
                verses.push(Verse::new(number, text));
            }
        }
        (Frame::Chapter { number, verses, .. }, Some(Frame::Book { book, .. })) => {
            if let Some(number) = number.filter(|_| !verses.is_empty()) {
                book.insert_chapter(Chapter::new(number, verses));
            }
        }
        (Frame::Book { order, book, .. }, _) => finished.push((order, book)),
        _ => {}
    }
}

fn add_book(translation: &mut Translation, book: Book, policy: CollisionPolicy) -> Result<()> {
    if book.chapters.is_empty() {
        return Ok(());
    }
    if translation.books.contains_key(&book.id) {
        match policy {
            CollisionPolicy::Reject => return Err(ScriptureError::DuplicateBook(book.id)),
            CollisionPolicy::Overwrite => {
                warn!(
                    "Book '{}' appears twice in translation '{}'; keeping the later one",
                    book.id, translation.id
                );
            }
        }
    }
    translation.insert_book(book);
    Ok(())
}

/// Read an attribute value; empty values count as absent.
fn attribute(element: &BytesStart<'_>, name: &[u8], decoder: Decoder) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| ScriptureError::xml(e.to_string()))?;
    match attr {
        Some(attr) => {
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|e| ScriptureError::xml(e.to_string()))?;
            Ok(Some(value.into_owned()).filter(|v| !v.is_empty()))
        }
        None => Ok(None),
    }
}
