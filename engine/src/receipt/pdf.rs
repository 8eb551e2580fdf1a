//! PDF encoding of a receipt layout.
//!
//! Uses the two standard Helvetica faces, so no font data is embedded, and
//! writes no dates or IDs: identical layouts encode to identical bytes.

use super::layout::{FontWeight, ReceiptLayout, PAGE_HEIGHT, PAGE_WIDTH};
use crate::{error::Result, Error};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

/// Encode `layout` as a PDF document.
pub fn encode(layout: &ReceiptLayout) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let mut operations = Vec::with_capacity(page.runs.len() * 5);
        for run in &page.runs {
            let font = match run.weight {
                FontWeight::Regular => REGULAR_FONT,
                FontWeight::Bold => BOLD_FONT,
            };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.to_vec()), Object::Real(run.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(run.x), Object::Real(run.y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(win_ansi(&run.text))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations }
            .encode()
            .map_err(|e| Error::Render(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::Render(e.to_string()))?;
    Ok(bytes)
}

/// Latin-1 subset of WinAnsi; anything outside it prints as '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) if !c.is_control() => byte,
            _ => b'?',
        })
        .collect()
}
