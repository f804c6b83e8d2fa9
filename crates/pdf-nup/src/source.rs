//! Reading invoice pages from disk
//!
//! Each source file contributes at most its first page. [`SourcePages`]
//! reads files one at a time as it is iterated; problems with a single file
//! become [`SourceWarning`]s instead of errors.

use crate::compose::PageBounds;
use crate::constants::MAX_INHERITANCE_DEPTH;
use crate::layout::Rect;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The first page of a source document, ready to be drawn
#[derive(Debug)]
pub struct SourcePage {
    path: PathBuf,
    document: Document,
    page_id: ObjectId,
    media_box: Rect,
    content: Vec<u8>,
    page_count: usize,
}

impl SourcePage {
    /// Load `path` and take its first page.
    ///
    /// The file is read fully and closed before parsing starts.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| MergeError::UnreadablePage {
            path: path.to_owned(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
        let document = Document::load_mem(&bytes).map_err(|e| unreadable(e.to_string()))?;
        drop(bytes);

        Self::from_document(path, document)
    }

    /// Take the first page of an already parsed document
    pub fn from_document(path: impl Into<PathBuf>, document: Document) -> Result<Self> {
        let path = path.into();
        let pages = document.get_pages();
        let page_count = pages.len();

        let Some(&page_id) = pages.values().next() else {
            return Err(MergeError::EmptyDocument(path));
        };

        let checked = resolve_media_box(&document, page_id).and_then(|media_box| {
            check_resources(&document, page_id)?;
            let content = page_content(&document, page_id)?;
            Ok((media_box, content))
        });
        let (media_box, content) = match checked {
            Ok(checked) => checked,
            Err(reason) => return Err(MergeError::UnreadablePage { path, reason }),
        };

        Ok(Self {
            path,
            document,
            page_id,
            media_box,
            content,
            page_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page_id(&self) -> ObjectId {
        self.page_id
    }

    /// Decoded content stream of the page
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Number of pages in the source document (only the first is used)
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

impl PageBounds for SourcePage {
    fn media_box(&self) -> Rect {
        self.media_box
    }
}

// =============================================================================
// Lazy Reader
// =============================================================================

/// Iterator yielding the first page of each readable source file in order.
///
/// Files that cannot be used are skipped; the reason is logged and kept in
/// [`warnings`](Self::warnings).
pub struct SourcePages<I> {
    paths: I,
    warnings: Vec<SourceWarning>,
}

impl<I> SourcePages<I>
where
    I: Iterator<Item = PathBuf>,
{
    pub fn new(paths: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            paths: paths.into_iter(),
            warnings: Vec::new(),
        }
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[SourceWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<SourceWarning> {
        self.warnings
    }

    fn record(&mut self, warning: SourceWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

impl<I> Iterator for SourcePages<I>
where
    I: Iterator<Item = PathBuf>,
{
    type Item = SourcePage;

    fn next(&mut self) -> Option<SourcePage> {
        loop {
            let path = self.paths.next()?;
            log::debug!("Reading {}", path.display());

            match SourcePage::read(&path) {
                Ok(page) => {
                    if page.page_count > 1 {
                        self.record(SourceWarning::MultiPage {
                            path,
                            page_count: page.page_count,
                        });
                    }
                    return Some(page);
                }
                Err(MergeError::EmptyDocument(path)) => {
                    self.record(SourceWarning::Empty { path });
                }
                Err(e) => {
                    let reason = match e {
                        MergeError::UnreadablePage { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    self.record(SourceWarning::Unreadable { path, reason });
                }
            }
        }
    }
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Look up a page attribute, following `Parent` links for inherited values
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Follow a reference to the object it points at
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// The page's media box, normalised so `x`/`y` is the lower-left corner
fn resolve_media_box(doc: &Document, page_id: ObjectId) -> std::result::Result<Rect, String> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|obj| resolve(doc, obj))
        .ok_or_else(|| "page has no MediaBox".to_string())?;

    let values = media_box
        .as_array()
        .map_err(|_| "MediaBox is not an array".to_string())?;

    let coords: Vec<f32> = values
        .iter()
        .filter_map(|obj| resolve(doc, obj).and_then(extract_number))
        .collect();

    let [x1, y1, x2, y2] = coords[..] else {
        return Err(format!("MediaBox has {} usable numbers, expected 4", coords.len()));
    };

    let rect = Rect::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs());
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return Err(format!("MediaBox is empty ({} x {})", rect.width, rect.height));
    }

    Ok(rect)
}

/// Make sure every object reachable from the page's resources exists
fn check_resources(doc: &Document, page_id: ObjectId) -> std::result::Result<(), String> {
    let Some(resources) = inherited_attribute(doc, page_id, b"Resources") else {
        return Ok(());
    };

    let mut seen = HashSet::new();
    let mut pending = vec![resources];
    while let Some(obj) = pending.pop() {
        match obj {
            Object::Reference(id) => {
                if seen.insert(*id) {
                    let target = doc
                        .get_object(*id)
                        .map_err(|_| format!("missing object {} {} R in resources", id.0, id.1))?;
                    pending.push(target);
                }
            }
            Object::Dictionary(dict) => push_values(dict, &mut pending),
            Object::Stream(stream) => push_values(&stream.dict, &mut pending),
            Object::Array(items) => pending.extend(items),
            _ => {}
        }
    }

    Ok(())
}

fn push_values<'a>(dict: &'a Dictionary, pending: &mut Vec<&'a Object>) {
    pending.extend(
        dict.iter()
            .filter(|(key, _)| key.as_slice() != b"Parent")
            .map(|(_, value)| value),
    );
}

/// The page's content streams, decoded and concatenated.
///
/// A page without `Contents` is blank.
fn page_content(doc: &Document, page_id: ObjectId) -> std::result::Result<Vec<u8>, String> {
    let page = doc.get_dictionary(page_id).map_err(|e| e.to_string())?;
    let Ok(contents) = page.get(b"Contents") else {
        return Ok(Vec::new());
    };

    match resolve(doc, contents) {
        Some(Object::Stream(stream)) => decode_stream(stream),
        Some(Object::Array(parts)) => {
            let mut content = Vec::new();
            for part in parts {
                match resolve(doc, part) {
                    Some(Object::Stream(stream)) => {
                        content.extend_from_slice(&decode_stream(stream)?);
                        content.push(b'\n');
                    }
                    _ => return Err("page contents array holds a non-stream entry".to_string()),
                }
            }
            Ok(content)
        }
        Some(_) => Err("page contents are not a stream".to_string()),
        None => Err("page contents point to a missing object".to_string()),
    }
}

fn decode_stream(stream: &Stream) -> std::result::Result<Vec<u8>, String> {
    if !stream.dict.has(b"Filter") {
        return Ok(stream.content.clone());
    }
    stream
        .decompressed_content()
        .map_err(|e| format!("cannot decode content stream: {}", e))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Dictionary;

    fn document_with_boxes(page_box: Option<Object>, parent_box: Option<Object>) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
        ]);
        if let Some(mb) = page_box {
            page.set("MediaBox", mb);
        }
        let page_id = doc.add_object(page);

        let mut pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        if let Some(mb) = parent_box {
            pages.set("MediaBox", mb);
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn media_box(values: [f32; 4]) -> Object {
        Object::Array(values.iter().map(|&v| Object::Real(v)).collect())
    }

    #[test]
    fn test_media_box_on_page() {
        let doc = document_with_boxes(Some(media_box([0.0, 0.0, 612.0, 792.0])), None);
        let page = SourcePage::from_document("a.pdf", doc).unwrap();

        assert_eq!(page.media_box(), Rect::new(0.0, 0.0, 612.0, 792.0));
        assert_eq!(page.page_count(), 1);
    }

    #[test]
    fn test_media_box_inherited_from_parent() {
        let doc = document_with_boxes(None, Some(media_box([10.0, 20.0, 310.0, 420.0])));
        let page = SourcePage::from_document("a.pdf", doc).unwrap();

        assert_eq!(page.media_box(), Rect::new(10.0, 20.0, 300.0, 400.0));
    }

    #[test]
    fn test_media_box_with_swapped_corners() {
        let doc = document_with_boxes(Some(media_box([300.0, 400.0, 0.0, 0.0])), None);
        let page = SourcePage::from_document("a.pdf", doc).unwrap();

        assert_eq!(page.media_box(), Rect::new(0.0, 0.0, 300.0, 400.0));
    }

    #[test]
    fn test_missing_media_box_is_unreadable() {
        let doc = document_with_boxes(None, None);
        match SourcePage::from_document("a.pdf", doc) {
            Err(MergeError::UnreadablePage { reason, .. }) => {
                assert!(reason.contains("MediaBox"));
            }
            other => panic!("Expected UnreadablePage, got {:?}", other.map(|p| p.page_id())),
        }
    }

    #[test]
    fn test_degenerate_media_box_is_unreadable() {
        let doc = document_with_boxes(Some(media_box([0.0, 0.0, 0.0, 792.0])), None);
        assert!(matches!(
            SourcePage::from_document("a.pdf", doc),
            Err(MergeError::UnreadablePage { .. })
        ));
    }

    #[test]
    fn test_dangling_resource_is_unreadable() {
        let mut doc = document_with_boxes(Some(media_box([0.0, 0.0, 612.0, 792.0])), None);
        let page_id = doc.page_iter().next().unwrap();
        let fonts = Dictionary::from_iter(vec![("F1", Object::Reference((9999, 0)))]);
        doc.get_dictionary_mut(page_id).unwrap().set(
            "Resources",
            Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]),
        );

        match SourcePage::from_document("a.pdf", doc) {
            Err(MergeError::UnreadablePage { reason, .. }) => {
                assert!(reason.contains("9999"), "{}", reason);
            }
            other => panic!("Expected UnreadablePage, got {:?}", other.map(|p| p.page_id())),
        }
    }

    #[test]
    fn test_undecodable_content_is_unreadable() {
        let mut doc = document_with_boxes(Some(media_box([0.0, 0.0, 612.0, 792.0])), None);
        let page_id = doc.page_iter().next().unwrap();
        let stream = Stream::new(
            Dictionary::from_iter(vec![("Filter", Object::Name(b"RunLengthDecode".to_vec()))]),
            b"garbage".to_vec(),
        );
        let content_id = doc.add_object(stream);
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Contents", Object::Reference(content_id));

        assert!(matches!(
            SourcePage::from_document("a.pdf", doc),
            Err(MergeError::UnreadablePage { .. })
        ));
    }

    #[test]
    fn test_non_stream_contents_is_unreadable() {
        let mut doc = document_with_boxes(Some(media_box([0.0, 0.0, 612.0, 792.0])), None);
        let page_id = doc.page_iter().next().unwrap();
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Contents", Object::Integer(7));

        assert!(matches!(
            SourcePage::from_document("a.pdf", doc),
            Err(MergeError::UnreadablePage { .. })
        ));
    }

    #[test]
    fn test_page_content_concatenates_streams() {
        let mut doc = document_with_boxes(Some(media_box([0.0, 0.0, 612.0, 792.0])), None);
        let page_id = doc.page_iter().next().unwrap();
        let first = doc.add_object(Stream::new(Dictionary::new(), b"q".to_vec()));
        let second = doc.add_object(Stream::new(Dictionary::new(), b"Q".to_vec()));
        doc.get_dictionary_mut(page_id).unwrap().set(
            "Contents",
            Object::Array(vec![Object::Reference(first), Object::Reference(second)]),
        );

        let page = SourcePage::from_document("a.pdf", doc).unwrap();
        assert_eq!(page.content(), b"q\nQ\n");
    }

    #[test]
    fn test_missing_file_becomes_warning() {
        let mut pages = SourcePages::new(vec![PathBuf::from("/nonexistent/invoice.pdf")]);

        assert!(pages.next().is_none());
        assert_eq!(pages.warnings().len(), 1);
        assert!(matches!(
            &pages.warnings()[0],
            SourceWarning::Unreadable { path, .. } if path == Path::new("/nonexistent/invoice.pdf")
        ));
    }
}
