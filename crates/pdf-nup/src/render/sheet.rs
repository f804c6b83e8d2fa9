//! Output sheet rendering

use crate::compose::OutputSheet;
use crate::source::SourcePage;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::create_page_xobject;

/// The merged output document, built one sheet at a time
pub struct OutputDocument {
    document: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputDocument {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_tree_id = document.new_object_id();
        Self {
            document,
            pages_tree_id,
            page_refs: Vec::new(),
        }
    }

    /// Append a composed sheet as a new page
    pub fn push_sheet(&mut self, sheet: &OutputSheet<SourcePage>) -> Result<ObjectId> {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(sheet.width),
                Object::Real(sheet.height),
            ]),
        );

        let mut content_ops = Vec::new();
        let mut xobjects = Dictionary::new();

        for placed in &sheet.pages {
            let source = &placed.page;
            let placement = &placed.placement;

            // Object ids are per source document, so each page gets its own cache
            let mut xobject_cache: HashMap<ObjectId, ObjectId> = HashMap::new();
            let xobject_name = format!("P{}", placement.slot);
            let xobject_id = create_page_xobject(&mut self.document, source, &mut xobject_cache)?;
            xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

            log::debug!(
                "Sheet {} cell ({}, {}): {} at scale {:.4}, cm [{}]",
                sheet.index + 1,
                placement.grid_pos.row,
                placement.grid_pos.col,
                source.path().display(),
                placement.scale,
                placement.transform.to_pdf_operands()
            );

            content_ops.push(format!(
                "q {} cm /{} Do Q\n",
                placement.transform.to_pdf_operands(),
                xobject_name
            ));
        }

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content = content_ops.join("");
        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.document.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(page_id)
    }

    /// Write the page tree and catalog and return the finished document
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.document
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));

        self.document.trailer.set("Root", catalog_id);

        self.document
    }
}
