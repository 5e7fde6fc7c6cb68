pub mod assemble;
pub mod document;

pub use assemble::assemble;
pub use document::{PageHandle, PdfDocument};

#[cfg(test)]
pub(crate) mod testing {
    use lopdf::content::{Content, Operation};
    use lopdf::{Dictionary, Document, Object, Stream};
    use std::path::{Path, PathBuf};

    /// Build a PDF whose pages carry a `/TestTag` of `{prefix}{n}` (1-based).
    ///
    /// The page size and resources live on the page tree node, so every page inherits them.
    pub fn create_test_pdf(num_pages: u32, prefix: &str) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ]));

        let mut page_ids = Vec::new();
        for i in 1..=num_pages {
            let tag = format!("{}{}", prefix, i);
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                    ),
                    Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                    Operation::new("Tj", vec![Object::string_literal(tag.clone())]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            let page_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                ("Contents", Object::Reference(content_id)),
                ("TestTag", Object::string_literal(tag)),
            ]));
            page_ids.push(page_id);
        }

        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![(
                "F1",
                Object::Reference(font_id),
            )])),
        )]);
        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(num_pages as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    pub fn write_test_pdf(dir: &Path, name: &str, num_pages: u32, prefix: &str) -> PathBuf {
        let path = dir.join(name);
        create_test_pdf(num_pages, prefix).save(&path).unwrap();
        path
    }

    fn page_dicts(path: &Path) -> (Document, Vec<lopdf::ObjectId>) {
        let doc = Document::load(path).unwrap();
        let ids = doc.get_pages().into_values().collect();
        (doc, ids)
    }

    /// The `/TestTag` of every page, in order
    pub fn tags(path: &Path) -> Vec<String> {
        let (doc, ids) = page_dicts(path);
        ids.into_iter()
            .map(|id| match doc.get_dictionary(id).unwrap().get(b"TestTag") {
                Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
                _ => String::new(),
            })
            .collect()
    }

    /// The effective `/Rotate` of every page, in order
    pub fn rotations(path: &Path) -> Vec<i64> {
        let (doc, ids) = page_dicts(path);
        ids.into_iter()
            .map(|id| {
                doc.get_dictionary(id)
                    .unwrap()
                    .get(b"Rotate")
                    .and_then(Object::as_i64)
                    .unwrap_or(0)
            })
            .collect()
    }
}
