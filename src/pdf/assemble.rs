//! Building an output document from pages of one or more loaded PDFs.
//!
//! Each referenced source is copied into the new document with its object ids shifted
//! past the ones already in use. A fresh single-level page tree is then built over the
//! requested pages, and anything no longer reachable from the new catalog is pruned.

use super::document::{PageHandle, PdfDocument};
use crate::pages::PageCollection;
use anyhow::{anyhow, Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use tracing::debug;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

const MAX_TREE_DEPTH: usize = 64;

/// Build a new document containing `pages`, in order, drawn from `sources`.
///
/// A page used more than once becomes separate page objects sharing the same content.
pub fn assemble(sources: &[&PdfDocument], pages: &PageCollection<PageHandle>) -> Result<Document> {
    let version = sources
        .first()
        .map(|s| s.doc.version.clone())
        .unwrap_or_else(|| "1.7".to_string());
    let mut out = Document::with_version(version);

    let mut offsets: HashMap<usize, u32> = HashMap::new();
    for page in pages {
        let source = page.handle().source;
        if !offsets.contains_key(&source) {
            let pdf = sources
                .get(source)
                .ok_or_else(|| anyhow!("Page refers to unknown source document {}", source))?;
            offsets.insert(source, import(&mut out, &pdf.doc));
        }
    }

    let pages_id = out.new_object_id();
    let mut originals: HashMap<ObjectId, Dictionary> = HashMap::new();
    let mut kids = Vec::with_capacity(pages.len());

    for page in pages {
        let handle = page.handle();
        let offset = offsets[&handle.source];
        let id = (handle.id.0 + offset, handle.id.1);

        let first_use = !originals.contains_key(&id);
        if first_use {
            let dict = out
                .get_dictionary(id)
                .with_context(|| {
                    format!(
                        "Page object {} {} R is missing from {}",
                        handle.id.0, handle.id.1, sources[handle.source].path
                    )
                })?
                .clone();
            originals.insert(id, dict);
        }

        let mut dict = originals[&id].clone();
        dict.set("Parent", Object::Reference(pages_id));
        if page.rotation() != 0 {
            let current = dict.get(b"Rotate").map(rotate_value).unwrap_or(0);
            dict.set(
                "Rotate",
                Object::Integer((current + i64::from(page.rotation())).rem_euclid(360)),
            );
        }

        let target = if first_use {
            out.objects.insert(id, Object::Dictionary(dict));
            id
        } else {
            out.add_object(dict)
        };
        kids.push(Object::Reference(target));
    }

    let count = kids.len() as i64;
    out.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ])),
    );

    let catalog_id = out.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    out.trailer.set("Root", Object::Reference(catalog_id));

    // Keep the document info of the first source
    if let (Some(&offset), Some(first)) = (offsets.get(&0), sources.first()) {
        if let Ok(Object::Reference(info)) = first.doc.trailer.get(b"Info") {
            out.trailer
                .set("Info", Object::Reference((info.0 + offset, info.1)));
        }
    }

    let pruned = out.prune_objects();
    out.renumber_objects();
    out.compress();
    debug!(pages = count, pruned = pruned.len(), "assembled document");

    Ok(out)
}

/// Copy every object of `source` into `out` under shifted ids, returning the shift
fn import(out: &mut Document, source: &Document) -> u32 {
    let offset = out.max_id;

    for (&(num, gen), object) in &source.objects {
        out.objects
            .insert((num + offset, gen), renumber(object.clone(), offset));
    }

    // The new page tree is flat, so inherited attributes move onto the pages themselves
    for page_id in source.get_pages().into_values() {
        let inherited = inherited_attributes(source, page_id);
        if let Some(Object::Dictionary(page)) =
            out.objects.get_mut(&(page_id.0 + offset, page_id.1))
        {
            for (key, value) in inherited {
                page.set(key, renumber(value, offset));
            }
        }
    }

    out.max_id = out.max_id.max(source.max_id + offset);
    offset
}

fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
    let mut found = Vec::new();
    let Ok(page) = doc.get_dictionary(page_id) else {
        return found;
    };

    let mut missing: Vec<&'static [u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    found
}

fn renumber(object: Object, offset: u32) -> Object {
    match object {
        Object::Reference((num, gen)) => Object::Reference((num + offset, gen)),
        Object::Array(items) => Object::Array(
            items
                .into_iter()
                .map(|item| renumber(item, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            renumber_dict(&mut dict, offset);
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            renumber_dict(&mut stream.dict, offset);
            Object::Stream(stream)
        }
        other => other,
    }
}

fn renumber_dict(dict: &mut Dictionary, offset: u32) {
    for (_, value) in dict.iter_mut() {
        let taken = std::mem::replace(value, Object::Null);
        *value = renumber(taken, offset);
    }
}

fn rotate_value(object: &Object) -> i64 {
    match object {
        Object::Integer(n) => *n,
        Object::Real(r) => *r as i64,
        _ => 0,
    }
}
