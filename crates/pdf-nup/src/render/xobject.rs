//! XObject creation
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto output sheets with transformations.

use crate::compose::PageBounds;
use crate::source::{SourcePage, inherited_attribute};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// XObject Creation
// =============================================================================

/// Create a Form XObject in `output` from the page of `source`.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source page, with its already decoded content
/// * `cache` - Objects of the source document already copied into `output`
pub fn create_page_xobject(
    output: &mut Document,
    source: &SourcePage,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let bbox = source.media_box();

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(bbox.x),
            Object::Real(bbox.y),
            Object::Real(bbox.right()),
            Object::Real(bbox.top()),
        ]),
    );
    xobject_dict.set("FormType", Object::Integer(1));

    // Resources may live on an ancestor Pages node
    if let Some(resources) = inherited_attribute(source.document(), source.page_id(), b"Resources")
    {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source.document(), resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, source.content().to_vec())))
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Each referenced object is copied once; its new id is reserved before its
/// contents are copied so reference cycles terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        // A back-reference to the page tree would drag the whole source in
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_follows_references_once() {
        let mut source = Document::with_version("1.7");
        let font_id = source.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ]));
        let resources = Object::Dictionary(Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![
                ("F1", Object::Reference(font_id)),
                ("F2", Object::Reference(font_id)),
            ])),
        )]));

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let copied = copy_object_deep(&mut output, &source, &resources, &mut cache).unwrap();

        let fonts = copied.as_dict().unwrap().get(b"Font").unwrap().as_dict().unwrap();
        let f1 = fonts.get(b"F1").unwrap().as_reference().unwrap();
        let f2 = fonts.get(b"F2").unwrap().as_reference().unwrap();
        assert_eq!(f1, f2);
        assert_eq!(output.objects.len(), 1);
        assert!(output.get_dictionary(f1).unwrap().has(b"BaseFont"));
    }

    #[test]
    fn test_copy_terminates_on_cycles() {
        let mut source = Document::with_version("1.7");
        let a_id = source.new_object_id();
        let b_id = source.add_object(Dictionary::from_iter(vec![(
            "Next",
            Object::Reference(a_id),
        )]));
        source.objects.insert(
            a_id,
            Object::Dictionary(Dictionary::from_iter(vec![("Next", Object::Reference(b_id))])),
        );

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        copy_object_deep(&mut output, &source, &Object::Reference(a_id), &mut cache).unwrap();

        assert_eq!(output.objects.len(), 2);
    }
}
